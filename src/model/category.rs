use serde::{Deserialize, Serialize};

/// A skill category. Deleting one also removes the skills filed under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryFields {
    pub name: String,
}

impl CategoryFields {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
