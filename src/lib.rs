//! # Portfolio Admin
//!
//! > **Client-side collection management for a portfolio site's admin dashboard.**
//!
//! The dashboard edits five REST resources (projects, skills, categories, experience
//! entries and contact messages). Each resource is cached by its own collection actor
//! that keeps the local list consistent with the server while mutations run
//! concurrently.
//!
//! ## Core Concepts
//!
//! ### One actor per resource
//! `CollectionActor<T: RemoteEntity>` owns the cached list of one resource type and
//! processes requests sequentially in its own Tokio task. Network calls are spawned and
//! their outcomes fed back into the loop, so a slow save never blocks the rest of the list.
//!
//! ### Server state wins
//! Entries are only ever added from the server's response (or a full reload). Deletes
//! are applied after the server confirms. A failed call leaves the list exactly as it was.
//!
//! ### Per-entry serialization
//! A second update, delete or action on an entry that still has one in flight is
//! rejected with `Conflict` before anything is sent. Different entries proceed in parallel.
//!
//! ### Feedback
//! Every mutation that settles (or is rejected) produces exactly one
//! [`Notification`](framework::Notification) on the shared feedback channel.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic actor, client, state snapshot, error taxonomy and test mocks.
//!
//! ### 2. The Wire ([`transport`], [`session`])
//! The `Transport` seam, the `reqwest`-based REST implementation and the bearer-token session.
//!
//! ### 3. The Interface ([`clients`])
//! Resource-specific clients such as [`ProjectClient`](clients::ProjectClient) with
//! typed errors, plus [`AuthClient`](clients::AuthClient) for login.
//!
//! ### 4. The Resources ([`project_actor`], [`skill_actor`], [`category_actor`], [`experience_actor`], [`contact_actor`])
//! `RemoteEntity` implementations: endpoint names, validation rules, wire bodies and messages.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`AdminDashboard`](lifecycle::AdminDashboard) spins up all five actors, and
//! [`setup_tracing`](lifecycle::setup_tracing) configures logging.
//!
//! ## Running
//!
//! ```bash
//! PORTFOLIO_API_URL=http://localhost:5000/api \
//! PORTFOLIO_ADMIN_EMAIL=admin@example.com PORTFOLIO_ADMIN_PASSWORD=... \
//! RUST_LOG=info cargo run
//! ```

pub mod category_actor;
pub mod clients;
pub mod config;
pub mod contact_actor;
pub mod experience_actor;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod project_actor;
pub mod session;
pub mod skill_actor;
pub mod transport;
