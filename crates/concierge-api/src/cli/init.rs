//! `concierge init`: prepare the data directory.

use anyhow::Result;
use console::style;

use concierge_types::config::ServiceConfig;

use crate::state::AppState;

/// Write a default `config.toml` unless one exists.
///
/// The database and its migrations are already in place once `AppState`
/// is initialized, so this only has the config file left to do.
pub async fn init(state: &AppState, json: bool) -> Result<()> {
    let config_path = state.data_dir.join("config.toml");
    let exists = tokio::fs::try_exists(&config_path).await?;

    if !exists {
        let rendered = toml::to_string_pretty(&ServiceConfig::default())?;
        tokio::fs::write(&config_path, rendered).await?;
        tracing::info!(path = %config_path.display(), "Wrote default config");
    }

    if json {
        println!(
            "{}",
            serde_json::json!({
                "data_dir": state.data_dir.display().to_string(),
                "config": config_path.display().to_string(),
                "config_created": !exists,
            })
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} Data directory ready: {}",
        style("✓").green().bold(),
        style(state.data_dir.display()).cyan()
    );
    if exists {
        println!(
            "  {} Keeping existing {}",
            style("i").blue().bold(),
            style(config_path.display()).dim()
        );
    } else {
        println!(
            "  {} Wrote {}",
            style("✓").green().bold(),
            style(config_path.display()).dim()
        );
    }
    println!();

    Ok(())
}
