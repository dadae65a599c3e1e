//! # Portfolio Admin
//!
//! Loads the configuration, signs in when credentials are provided, loads every
//! collection of the dashboard and prints a summary.
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `PORTFOLIO_ADMIN_CONFIG` | Path to a TOML config file |
//! | `PORTFOLIO_API_URL` | Overrides `api_base_url` |
//! | `PORTFOLIO_ADMIN_EMAIL` / `PORTFOLIO_ADMIN_PASSWORD` | Admin login |
//! | `RUST_LOG` | Log filter |

use portfolio_admin::clients::{AdminClient, AuthClient};
use portfolio_admin::config::AdminConfig;
use portfolio_admin::framework::{feedback_channel, NotificationLevel};
use portfolio_admin::lifecycle::{setup_tracing, AdminDashboard};
use portfolio_admin::session::{Credentials, Session};
use portfolio_admin::transport::rest::ApiClient;
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = AdminConfig::load().map_err(|e| e.to_string())?;
    info!(api = %config.api_base_url, "Starting admin client");

    let session = Session::new(config.login_path.clone());
    let api = ApiClient::new(&config, session.clone()).map_err(|e| e.to_string())?;

    if let (Ok(email), Ok(password)) = (
        std::env::var("PORTFOLIO_ADMIN_EMAIL"),
        std::env::var("PORTFOLIO_ADMIN_PASSWORD"),
    ) {
        let auth = AuthClient::new(api.clone());
        let span = tracing::info_span!("login");
        match auth
            .login(&Credentials { email, password })
            .instrument(span)
            .await
        {
            Ok(user) => info!(user = %user.name, "Signed in"),
            Err(e) => warn!(error = %e, "Login failed; continuing without a session"),
        }
    }

    let (feedback, mut notifications) = feedback_channel();
    let dashboard = AdminDashboard::new(&api, &config, feedback).map_err(|e| e.to_string())?;

    let report = dashboard
        .load_all()
        .instrument(tracing::info_span!("initial_load"))
        .await;
    for (resource, result) in &report.results {
        match result {
            Ok(count) => println!("{:<12} {:>4} items", resource, count),
            Err(e) => println!("{:<12} error: {}", resource, e),
        }
    }
    println!("{:<12} {:>4} unread", "", dashboard.contact.unread().len());
    println!(
        "{:<12} {:>4} featured",
        "",
        dashboard.projects.featured().len()
    );
    info!(
        skills = dashboard.skills.items().len(),
        groups = dashboard.skills.by_category().len(),
        "Skills loaded"
    );

    while let Ok(notification) = notifications.try_recv() {
        match notification.level {
            NotificationLevel::Error => error!(resource = notification.resource, "{}", notification.message),
            _ => info!(resource = notification.resource, "{}", notification.message),
        }
    }

    dashboard.shutdown().await?;
    info!("Admin client finished");
    Ok(())
}
