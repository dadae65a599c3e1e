//! RemoteEntity implementation for contact messages.

use super::actions::ContactAction;
use crate::framework::{EntityFields, RemoteEntity, ValidationError};
use crate::model::{ContactFields, ContactMessage};
use crate::transport::RequestBody;

impl EntityFields for ContactFields {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "Name is required"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::new("email", "Email is required"));
        }
        if !email.contains('@') {
            return Err(ValidationError::new("email", "Please enter a valid email address"));
        }
        if self.message.trim().is_empty() {
            return Err(ValidationError::new("message", "Message is required"));
        }
        if self.service.trim().is_empty() {
            return Err(ValidationError::new("service", "Please select a service"));
        }
        Ok(())
    }

    fn to_body(&self) -> RequestBody {
        RequestBody::Json(serde_json::json!(self))
    }
}

impl RemoteEntity for ContactMessage {
    type Id = String;
    type Fields = ContactFields;
    type Action = ContactAction;
    const RESOURCE: &'static str = "contact";
    const LABEL: &'static str = "Message";

    fn id(&self) -> &String {
        &self.id
    }

    fn merge(&self, fields: &ContactFields) -> Self {
        Self {
            name: fields.name.clone(),
            email: fields.email.clone(),
            message: fields.message.clone(),
            service: fields.service.clone(),
            ..self.clone()
        }
    }

    fn apply_action(&self, action: &ContactAction) -> Self {
        match action {
            ContactAction::MarkAsRead => Self {
                read: true,
                ..self.clone()
            },
        }
    }

    fn created_message() -> String {
        "Email sent successfully! You will receive a confirmation email shortly.".to_string()
    }
}
