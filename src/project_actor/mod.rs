//! Project resource: multipart payloads with an image upload.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProjectClient;
use crate::config::AdminConfig;
use crate::framework::CollectionActor;
use crate::model::Project;

/// Creates a new Project collection actor and its client.
pub fn new(config: &AdminConfig) -> (CollectionActor<Project>, ProjectClient) {
    let (actor, generic_client) = CollectionActor::new(config.channel_capacity);
    let actor = actor.with_timeout(config.request_timeout());
    (actor, ProjectClient::new(generic_client))
}
