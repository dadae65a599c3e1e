//! Skill resource.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::SkillClient;
use crate::config::AdminConfig;
use crate::framework::CollectionActor;
use crate::model::Skill;

/// Creates a new Skill collection actor and its client.
pub fn new(config: &AdminConfig) -> (CollectionActor<Skill>, SkillClient) {
    let (actor, generic_client) = CollectionActor::new(config.channel_capacity);
    let actor = actor.with_timeout(config.request_timeout());
    (actor, SkillClient::new(generic_client))
}
