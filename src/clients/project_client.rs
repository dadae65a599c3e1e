use crate::clients::admin_client::AdminClient;
use crate::framework::CollectionClient;
use crate::model::{Project, ProjectFields};
use crate::project_actor::ProjectError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the Project collection.
#[derive(Clone)]
pub struct ProjectClient {
    inner: CollectionClient<Project>,
}

impl ProjectClient {
    pub fn new(inner: CollectionClient<Project>) -> Self {
        Self { inner }
    }

    /// `Ok(None)` when the server did not echo the project; the list is reloaded instead.
    #[instrument(skip(self, fields), fields(title = %fields.title))]
    pub async fn create_project(
        &self,
        fields: ProjectFields,
    ) -> Result<Option<Project>, ProjectError> {
        debug!("Sending request");
        Ok(self.inner.create(fields).await?)
    }

    #[instrument(skip(self, fields))]
    pub async fn update_project(
        &self,
        id: String,
        fields: ProjectFields,
    ) -> Result<Project, ProjectError> {
        debug!("Sending request");
        Ok(self.inner.update(id, fields).await?)
    }

    /// Toggle the featured flag, resending the cached project's other fields.
    #[instrument(skip(self))]
    pub async fn set_featured(&self, id: String, featured: bool) -> Result<Project, ProjectError> {
        let current = self
            .inner
            .get(&id)
            .ok_or_else(|| ProjectError::NotFound(id.clone()))?;
        let fields = ProjectFields::from(&current).featured(featured);
        self.update_project(id, fields).await
    }

    pub fn featured(&self) -> Vec<Project> {
        self.inner
            .items()
            .into_iter()
            .filter(|p| p.featured)
            .collect()
    }
}

#[async_trait]
impl AdminClient<Project> for ProjectClient {
    type Error = ProjectError;

    fn inner(&self) -> &CollectionClient<Project> {
        &self.inner
    }
}
