//! Skill category resource.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CategoryClient;
use crate::config::AdminConfig;
use crate::framework::CollectionActor;
use crate::model::Category;

/// Creates a new Category collection actor and its client.
pub fn new(config: &AdminConfig) -> (CollectionActor<Category>, CategoryClient) {
    let (actor, generic_client) = CollectionActor::new(config.channel_capacity);
    let actor = actor.with_timeout(config.request_timeout());
    (actor, CategoryClient::new(generic_client))
}
