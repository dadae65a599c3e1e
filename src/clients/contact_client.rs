use crate::clients::admin_client::AdminClient;
use crate::contact_actor::{ContactAction, ContactError};
use crate::framework::CollectionClient;
use crate::model::{ContactFields, ContactMessage};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for contact messages.
#[derive(Clone)]
pub struct ContactClient {
    inner: CollectionClient<ContactMessage>,
}

impl ContactClient {
    pub fn new(inner: CollectionClient<ContactMessage>) -> Self {
        Self { inner }
    }

    /// Submit a message through the public contact endpoint.
    #[instrument(skip(self, fields), fields(email = %fields.email))]
    pub async fn submit(&self, fields: ContactFields) -> Result<Option<ContactMessage>, ContactError> {
        debug!("Sending request");
        Ok(self.inner.create(fields).await?)
    }

    #[instrument(skip(self))]
    pub async fn mark_as_read(&self, id: String) -> Result<ContactMessage, ContactError> {
        debug!("Sending request");
        Ok(self
            .inner
            .perform_action(id, ContactAction::MarkAsRead)
            .await?)
    }

    pub fn unread(&self) -> Vec<ContactMessage> {
        self.inner.items().into_iter().filter(|m| !m.read).collect()
    }
}

#[async_trait]
impl AdminClient<ContactMessage> for ContactClient {
    type Error = ContactError;

    fn inner(&self) -> &CollectionClient<ContactMessage> {
        &self.inner
    }
}
