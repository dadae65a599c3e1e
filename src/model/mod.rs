//! Pure data structures (DTOs) for the admin resources and their field payloads.
//!
//! The [`RemoteEntity`](crate::framework::RemoteEntity) implementations live next to
//! each resource's actor factory (e.g. [`crate::project_actor`]).

pub mod category;
pub mod contact;
pub mod experience;
pub mod project;
pub mod skill;

pub use category::*;
pub use contact::*;
pub use experience::*;
pub use project::*;
pub use skill::*;
