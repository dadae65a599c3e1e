use crate::clients::admin_client::AdminClient;
use crate::framework::CollectionClient;
use crate::model::{Skill, SkillFields};
use crate::skill_actor::SkillError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Client for the Skill collection.
#[derive(Clone)]
pub struct SkillClient {
    inner: CollectionClient<Skill>,
}

impl SkillClient {
    pub fn new(inner: CollectionClient<Skill>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn add_skill(&self, fields: SkillFields) -> Result<Option<Skill>, SkillError> {
        debug!("Sending request");
        Ok(self.inner.create(fields).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_skill(&self, id: String, fields: SkillFields) -> Result<Skill, SkillError> {
        debug!("Sending request");
        Ok(self.inner.update(id, fields).await?)
    }

    /// Cached skills grouped by category name, in list order within each group.
    pub fn by_category(&self) -> BTreeMap<String, Vec<Skill>> {
        let mut groups: BTreeMap<String, Vec<Skill>> = BTreeMap::new();
        for skill in self.inner.items() {
            groups.entry(skill.category.clone()).or_default().push(skill);
        }
        groups
    }
}

#[async_trait]
impl AdminClient<Skill> for SkillClient {
    type Error = SkillError;

    fn inner(&self) -> &CollectionClient<Skill> {
        &self.inner
    }
}
