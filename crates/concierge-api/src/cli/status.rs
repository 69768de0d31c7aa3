//! System status dashboard command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Display system status dashboard.
///
/// Shows session and message counts, FAQ entries, the reply provider and
/// where data lives.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let stats = state.chat_service.stats().await?;
    let faqs = state.faq_service.list(None).await?;
    let provider = state.chat_service.reply_provider_name();

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "sessions": {
                "total": stats.total_sessions,
                "active": stats.active_sessions,
            },
            "messages": stats.total_messages,
            "faq_entries": faqs.len(),
            "reply_provider": provider,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Concierge v{}",
        style("●").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Chat ──").dim());
    println!("  Sessions: {}", style(stats.total_sessions).bold());
    println!("  Active:   {}", style(stats.active_sessions).green());
    println!("  Messages: {}", stats.total_messages);
    println!();

    println!("  {}", style("── FAQ ──").dim());
    println!("  Active entries: {}", style(faqs.len()).bold());
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Replies:  {}", style(provider).cyan());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!("  Database: {}", style("SQLite (WAL mode)").dim());
    println!();

    Ok(())
}
