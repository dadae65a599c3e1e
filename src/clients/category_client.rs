use crate::clients::admin_client::AdminClient;
use crate::framework::CollectionClient;
use crate::category_actor::CategoryError;
use crate::model::{Category, CategoryFields};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the Category collection.
#[derive(Clone)]
pub struct CategoryClient {
    inner: CollectionClient<Category>,
}

impl CategoryClient {
    pub fn new(inner: CollectionClient<Category>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn add_category(&self, name: String) -> Result<Option<Category>, CategoryError> {
        debug!("Sending request");
        Ok(self.inner.create(CategoryFields::new(name)).await?)
    }

    #[instrument(skip(self))]
    pub async fn rename_category(&self, id: String, name: String) -> Result<Category, CategoryError> {
        debug!("Sending request");
        Ok(self.inner.update(id, CategoryFields::new(name)).await?)
    }

    pub fn find_by_name(&self, name: &str) -> Option<Category> {
        self.inner
            .items()
            .into_iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }
}

#[async_trait]
impl AdminClient<Category> for CategoryClient {
    type Error = CategoryError;

    fn inner(&self) -> &CollectionClient<Category> {
        &self.inner
    }
}
