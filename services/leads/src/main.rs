use std::time::Duration;

use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use vitrex_auth_types::policy::AdminPolicy;
use vitrex_core::tracing::init_tracing;
use vitrex_leads::config::LeadsConfig;
use vitrex_leads::infra::mail::HttpMailTransport;
use vitrex_leads::router::build_router;
use vitrex_leads::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info,vitrex_leads=debug");

    let config = LeadsConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let mail = HttpMailTransport::new(
        &config.mail_api_url,
        &config.mail_api_key,
        Duration::from_secs(config.mail_timeout_secs),
    )?;

    let state = AppState {
        db,
        mail,
        policy: AdminPolicy::new(config.main_admin_email),
        mail_sender: config.mail_sender,
        operator_email: config.operator_email,
        contact_phone: config.contact_phone,
        cookie_domain: config.cookie_domain,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.leads_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    info!("leads service listening on {http_addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
