use serde::{Deserialize, Serialize};

/// A position in the work history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(alias = "_id")]
    pub id: String,
    pub role: String,
    pub company: String,
    /// Free text, e.g. "2021 - Present".
    pub duration: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExperienceFields {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl From<&Experience> for ExperienceFields {
    fn from(exp: &Experience) -> Self {
        Self {
            role: exp.role.clone(),
            company: exp.company.clone(),
            duration: exp.duration.clone(),
            description: exp.description.clone(),
            location: exp.location.clone(),
        }
    }
}
