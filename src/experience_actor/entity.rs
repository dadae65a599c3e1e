//! RemoteEntity implementation for the Experience resource.

use crate::framework::{EntityFields, NoAction, RemoteEntity, ValidationError};
use crate::model::{Experience, ExperienceFields};
use crate::transport::RequestBody;

impl EntityFields for ExperienceFields {
    fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("role", &self.role, "Role is required"),
            ("company", &self.company, "Company is required"),
            ("duration", &self.duration, "Duration is required"),
            ("description", &self.description, "Description is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::new(field, message));
            }
        }
        Ok(())
    }

    fn to_body(&self) -> RequestBody {
        RequestBody::Json(serde_json::json!(self))
    }
}

impl RemoteEntity for Experience {
    type Id = String;
    type Fields = ExperienceFields;
    type Action = NoAction;
    const RESOURCE: &'static str = "experience";
    const LABEL: &'static str = "Experience";

    fn id(&self) -> &String {
        &self.id
    }

    fn merge(&self, fields: &ExperienceFields) -> Self {
        Self {
            id: self.id.clone(),
            role: fields.role.clone(),
            company: fields.company.clone(),
            duration: fields.duration.clone(),
            description: fields.description.clone(),
            location: fields.location.clone(),
        }
    }

    fn created_message() -> String {
        "Experience added successfully!".to_string()
    }
}
