use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use serde_json::json;

use reelist_models::{SortBy, WatchlistEntry};
use reelist_providers::CatalogError;

use crate::commands::{finish_spinner, spinner, App};
use crate::output::{Output, OutputFormat};

pub fn run_list(sort: SortBy, output: &Output) -> Result<()> {
    let app = App::init()?;
    let ctx = app.context()?;
    let entries = ctx.watchlist().sorted_view(sort);

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "scope": ctx.scope().to_string(),
            "count": entries.len(),
            "items": entries,
        }));
        ctx.close();
        return Ok(());
    }

    let count = entries.len();
    output.println(format!(
        "My List ({} {})",
        count,
        if count == 1 { "item" } else { "items" }
    ));

    if entries.is_empty() {
        output.info("Your list is empty. Add titles with: reelist add <id>");
        ctx.close();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Rating").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Added").add_attribute(comfy_table::Attribute::Bold),
    ]);

    for entry in &entries {
        table.add_row(vec![
            Cell::new(&entry.id),
            Cell::new(&entry.title),
            Cell::new(
                entry
                    .vote_average
                    .map(|r| format!("⭐ {:.1}", r))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(entry.date_added.format("%Y-%m-%d").to_string()),
        ]);
    }

    output.println(table.to_string());
    ctx.close();
    Ok(())
}

pub async fn run_add(id: u64, output: &Output) -> Result<()> {
    let app = App::init()?;
    let catalog = app.catalog(None)?;

    let pb = spinner(output, "Fetching title...");
    let details = catalog.movie_details(id).await;
    finish_spinner(pb);

    let details = match details {
        Ok(d) => d,
        Err(CatalogError::NotFound) => {
            output.error(format!("Title {} not found", id));
            return Ok(());
        }
        Err(e) => {
            output.error(format!("Catalog unavailable: {}", e));
            return Ok(());
        }
    };

    let mut ctx = app.context()?;
    let entry = WatchlistEntry::from(&details);
    let title = entry.title.clone();

    if ctx
        .watchlist_mut()
        .add(entry)
        .map_err(|e| eyre!("{}", e))?
    {
        output.success(format!("Added '{}' to your list", title));
    } else {
        output.info(format!("'{}' is already in your list", title));
    }

    ctx.close();
    Ok(())
}

pub fn run_remove(id: &str, output: &Output) -> Result<()> {
    let app = App::init()?;
    let mut ctx = app.context()?;

    if ctx
        .watchlist_mut()
        .remove(id)
        .map_err(|e| eyre!("{}", e))?
    {
        output.success(format!("Removed {} from your list", id));
    } else {
        output.info(format!("{} is not in your list", id));
    }

    ctx.close();
    Ok(())
}
