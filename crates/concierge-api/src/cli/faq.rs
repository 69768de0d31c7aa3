//! FAQ management CLI commands: list, add.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use concierge_types::faq::{FaqEntry, NewFaqEntry};

use crate::state::AppState;

/// List active FAQ entries in display order.
pub async fn list_faqs(state: &AppState, category: Option<&str>, json: bool) -> Result<()> {
    let entries = state.faq_service.list(category).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!();
        println!(
            "  {} No FAQ entries. Add one with: {}",
            style("i").blue().bold(),
            style("concierge faq add --question ... --answer ...").yellow()
        );
        println!();
        return Ok(());
    }

    println!();
    println!("{}", faq_table(&entries));
    println!();
    println!(
        "  {} entr{}",
        style(entries.len()).bold(),
        if entries.len() == 1 { "y" } else { "ies" }
    );
    println!();

    Ok(())
}

/// Add an FAQ entry.
pub async fn add_faq(state: &AppState, entry: NewFaqEntry, json: bool) -> Result<()> {
    let created = state.faq_service.create(entry).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&created)?);
    } else {
        println!(
            "  {} FAQ entry #{} added ({})",
            style("✓").green().bold(),
            created.id,
            style(created.category.as_deref().unwrap_or("uncategorized")).cyan()
        );
    }

    Ok(())
}

fn faq_table(entries: &[FaqEntry]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Priority").fg(Color::White),
        Cell::new("Category").fg(Color::White),
        Cell::new("Question").fg(Color::White),
    ]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.id).fg(Color::DarkGrey),
            Cell::new(entry.priority),
            Cell::new(entry.category.as_deref().unwrap_or("-")).fg(Color::Cyan),
            Cell::new(&entry.question),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_faq_table_has_row_per_entry() {
        let now = Utc::now();
        let entries = vec![
            FaqEntry {
                id: 1,
                question: "What does a website cost?".to_string(),
                answer: "It depends on scope.".to_string(),
                category: Some("pricing".to_string()),
                priority: 1,
                is_active: true,
                created_at: now,
                updated_at: now,
            },
            FaqEntry {
                id: 2,
                question: "Where are you based?".to_string(),
                answer: "Remote.".to_string(),
                category: None,
                priority: 5,
                is_active: true,
                created_at: now,
                updated_at: now,
            },
        ];

        let table = faq_table(&entries);
        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("pricing"));
        assert!(rendered.contains("Where are you based?"));
    }
}
