//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); every collection event
//! carries a `resource` field instead.
//!
//! ## What Gets Traced
//!
//! - **Collection lifecycle**: started, shutdown with the final size and in-flight count
//! - **Requests**: one `debug` line per request with its id and payload
//! - **Settlements**: `info` on success, `warn` on failure or rejection
//! - **Session**: sign-in, sign-out and server-side rejection of the token
//!
//! ## Usage
//!
//! ```bash
//! # One line per settled mutation
//! RUST_LOG=info cargo run
//!
//! # Payloads and HTTP requests
//! RUST_LOG=debug cargo run
//!
//! # Only the framework
//! RUST_LOG=portfolio_admin::framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a dashboard load looks like:
//!
//! ```text
//! INFO Collection started resource="projects"
//! INFO Loaded resource="projects" size=4
//! INFO Updated resource="projects" id=6650c1
//! WARN Failed to delete project resource="projects" error=Something went wrong
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
