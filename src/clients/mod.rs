//! Type-safe wrappers around [`CollectionClient`](crate::framework::CollectionClient).

pub mod admin_client;
pub mod auth_client;
pub mod category_client;
pub mod contact_client;
pub mod experience_client;
pub mod project_client;
pub mod skill_client;

pub use admin_client::*;
pub use auth_client::*;
pub use category_client::*;
pub use contact_client::*;
pub use experience_client::*;
pub use project_client::*;
pub use skill_client::*;
