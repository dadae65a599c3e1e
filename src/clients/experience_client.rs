use crate::clients::admin_client::AdminClient;
use crate::experience_actor::ExperienceError;
use crate::framework::CollectionClient;
use crate::model::{Experience, ExperienceFields};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the Experience collection.
#[derive(Clone)]
pub struct ExperienceClient {
    inner: CollectionClient<Experience>,
}

impl ExperienceClient {
    pub fn new(inner: CollectionClient<Experience>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, fields), fields(company = %fields.company))]
    pub async fn add_experience(
        &self,
        fields: ExperienceFields,
    ) -> Result<Option<Experience>, ExperienceError> {
        debug!("Sending request");
        Ok(self.inner.create(fields).await?)
    }

    #[instrument(skip(self, fields))]
    pub async fn update_experience(
        &self,
        id: String,
        fields: ExperienceFields,
    ) -> Result<Experience, ExperienceError> {
        debug!("Sending request");
        Ok(self.inner.update(id, fields).await?)
    }
}

#[async_trait]
impl AdminClient<Experience> for ExperienceClient {
    type Error = ExperienceError;

    fn inner(&self) -> &CollectionClient<Experience> {
        &self.inner
    }
}
