//! Contact messages: submitted by visitors, read and deleted by the admin.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ContactClient;
use crate::config::AdminConfig;
use crate::framework::CollectionActor;
use crate::model::ContactMessage;

/// Creates a new Contact collection actor and its client.
pub fn new(config: &AdminConfig) -> (CollectionActor<ContactMessage>, ContactClient) {
    let (actor, generic_client) = CollectionActor::new(config.channel_capacity);
    let actor = actor.with_timeout(config.request_timeout());
    (actor, ContactClient::new(generic_client))
}
