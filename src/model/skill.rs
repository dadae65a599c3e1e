use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    /// Name of the category the skill is filed under.
    pub category: String,
    /// Proficiency in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillFields {
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

impl SkillFields {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            level: None,
        }
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }
}

impl From<&Skill> for SkillFields {
    fn from(skill: &Skill) -> Self {
        Self {
            name: skill.name.clone(),
            category: skill.category.clone(),
            level: skill.level,
        }
    }
}
