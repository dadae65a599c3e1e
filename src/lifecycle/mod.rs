//! # Dashboard Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the five collection actors behind the admin dashboard.
//!
//! 1. **Actor Creation**: each resource module's `new(&config)` returns an actor and its client.
//! 2. **Context Injection**: the transport and the shared feedback channel are handed to
//!    `run()` when the actor is spawned, not when it is built.
//! 3. **Shutdown**: every collection is torn down (in-flight results are discarded), then
//!    the actor tasks are awaited.
//!
//! See [`AdminDashboard`] for the orchestrator and [`setup_tracing`] for logging.

pub mod dashboard;
pub mod tracing;

pub use dashboard::*;
pub use tracing::*;
