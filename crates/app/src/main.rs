//! Booky terminal client - Main Entry Point
//!
//! Restores or opens a session, prints the dashboard and keeps the
//! gamification panel fresh until interrupted.

use booky::{Adapters, EMAIL_VAR, PASSWORD_VAR, build_dashboard, load_screens, render};
use booky_application::RestoreOutcome;
use booky_infrastructure::SettingsLoader;
use tokio::signal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = SettingsLoader::new().load()?;
    tracing::info!(
        api = %settings.base_url(),
        "Starting Booky v{}",
        env!("CARGO_PKG_VERSION")
    );

    let dashboard = build_dashboard(Adapters::from_settings(&settings)?);

    if dashboard.restore().await? == RestoreOutcome::LoginRequired {
        let (Ok(email), Ok(password)) = (std::env::var(EMAIL_VAR), std::env::var(PASSWORD_VAR))
        else {
            tracing::error!("not signed in; set {EMAIL_VAR} and {PASSWORD_VAR}");
            return Err(format!("{EMAIL_VAR} and {PASSWORD_VAR} are required to sign in").into());
        };
        dashboard.login(&email, &password).await?;
    }

    load_screens(&dashboard).await;
    println!("{}", render::screen(&dashboard.context().screen().await));

    let mut ticker = tokio::time::interval(settings.refresh_interval());
    ticker.tick().await;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                dashboard.refresh_tick().await;
                let state = dashboard.context().screen().await;
                print!("{}", render::gamification(&state.gamification));
            }
            result = signal::ctrl_c() => {
                result?;
                tracing::info!("Received Ctrl+C, shutting down");
                break;
            }
        }
    }

    Ok(())
}
