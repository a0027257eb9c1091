use anyhow::Context;
use tracing::{error, info};

use evgate::utils::conf_helper::init_config;

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "gate.json".to_string());

    let config = init_config(&path).with_context(|| format!("loading config {path}"))?;

    tracing_subscriber::fmt()
        .with_max_level(config.max_level())
        .init();

    info!("Config loaded from {}", path);

    let report = match config.apply() {
        Ok(report) => report,
        Err(e) => {
            error!(kind = ?e.kind(), "Preflight failed: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Preflight passed: encoding={} chunk_size={}",
        report.encoding,
        report.chunk_size.get()
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
