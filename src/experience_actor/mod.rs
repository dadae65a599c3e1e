//! Work experience resource.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ExperienceClient;
use crate::config::AdminConfig;
use crate::framework::CollectionActor;
use crate::model::Experience;

/// Creates a new Experience collection actor and its client.
pub fn new(config: &AdminConfig) -> (CollectionActor<Experience>, ExperienceClient) {
    let (actor, generic_client) = CollectionActor::new(config.channel_capacity);
    let actor = actor.with_timeout(config.request_timeout());
    (actor, ExperienceClient::new(generic_client))
}
