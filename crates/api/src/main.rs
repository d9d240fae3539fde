use anyhow::Context;

use bloodbank_infra::BankConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bloodbank_observability::init();

    let cfg = BankConfig::from_env().context("invalid configuration")?;
    tracing::info!(storage = ?cfg.storage, db_file = %cfg.db_file.display(), seed = cfg.seed_inventory, "starting blood bank api");

    let bank = bloodbank_api::app::services::build_bank(&cfg).context("failed to open storage")?;
    let app = bloodbank_api::app::build_app(bank);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.port))
        .await
        .with_context(|| format!("failed to bind 0.0.0.0:{}", cfg.port))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
