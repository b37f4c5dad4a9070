use std::time::Duration;

mod accounts;
mod app;
mod assistant;
mod auth;
mod budgets;
mod categories;
mod chatbot;
mod config;
mod envelope;
mod error;
mod events;
mod goals;
mod money;
mod notifications;
mod receipts;
mod reports;
mod state;
mod timefmt;
mod transactions;
mod users;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "walletwise=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = state::AppState::init().await?;

    // Run migrations if present
    if let Err(e) = sqlx::migrate!("./migrations").run(&app_state.db).await {
        tracing::warn!(error = %e, "migrations folder not found or migration failed; continuing");
    }

    // Clone each user's previous-month budgets once per month. Checked at
    // startup and then once a day; the check itself is idempotent.
    let rollover_db = app_state.db.clone();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(Duration::from_secs(24 * 60 * 60));
        loop {
            tick.tick().await;
            match budgets::rollover::run_monthly_rollover(&rollover_db).await {
                Ok(0) => {}
                Ok(n) => tracing::info!(budgets = n, "monthly budget rollover done"),
                Err(e) => tracing::error!(error = %e, "monthly budget rollover failed"),
            }
        }
    });

    let app = app::build_app(app_state);
    app::serve(app).await
}
