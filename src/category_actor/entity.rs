//! RemoteEntity implementation for the Category resource.

use crate::framework::{EntityFields, NoAction, RemoteEntity, ValidationError};
use crate::model::{Category, CategoryFields};
use crate::transport::RequestBody;

impl EntityFields for CategoryFields {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "Category name is required"));
        }
        Ok(())
    }

    fn to_body(&self) -> RequestBody {
        RequestBody::Json(serde_json::json!({ "name": self.name.trim() }))
    }
}

impl RemoteEntity for Category {
    type Id = String;
    type Fields = CategoryFields;
    type Action = NoAction;
    const RESOURCE: &'static str = "categories";
    const LABEL: &'static str = "Category";

    fn id(&self) -> &String {
        &self.id
    }

    fn merge(&self, fields: &CategoryFields) -> Self {
        Self {
            id: self.id.clone(),
            name: fields.name.trim().to_string(),
        }
    }

    fn created_message() -> String {
        "Category added successfully!".to_string()
    }

    // The server cascades the delete to the category's skills.
    fn deleted_message() -> String {
        "Category and associated skills deleted successfully!".to_string()
    }
}
