//! RemoteEntity implementation for the Skill resource.

use crate::framework::{EntityFields, NoAction, RemoteEntity, ValidationError};
use crate::model::{Skill, SkillFields};
use crate::transport::RequestBody;

impl EntityFields for SkillFields {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "Skill name is required"));
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::new("category", "Category is required"));
        }
        if matches!(self.level, Some(level) if level > 100) {
            return Err(ValidationError::new(
                "level",
                "Level must be between 0 and 100",
            ));
        }
        Ok(())
    }

    fn to_body(&self) -> RequestBody {
        RequestBody::Json(serde_json::json!(self))
    }
}

impl RemoteEntity for Skill {
    type Id = String;
    type Fields = SkillFields;
    type Action = NoAction;
    const RESOURCE: &'static str = "skills";
    const LABEL: &'static str = "Skill";

    fn id(&self) -> &String {
        &self.id
    }

    fn merge(&self, fields: &SkillFields) -> Self {
        Self {
            id: self.id.clone(),
            name: fields.name.clone(),
            category: fields.category.clone(),
            level: fields.level,
        }
    }

    fn created_message() -> String {
        "Skill added successfully!".to_string()
    }
}
