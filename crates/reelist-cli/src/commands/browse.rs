use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use serde_json::json;

use reelist_core::KeyedFetcher;
use reelist_models::CatalogItem;
use reelist_providers::{CatalogError, Category};

use crate::commands::{finish_spinner, spinner, App};
use crate::output::{Output, OutputFormat};

pub async fn run_browse(
    category: Option<String>,
    lang: Option<String>,
    page: u32,
    output: &Output,
) -> Result<()> {
    let app = App::init()?;
    let catalog = app.catalog(lang)?;

    match category {
        Some(token) => {
            let category: Category = token.parse().map_err(|e: String| eyre!(e))?;
            let pb = spinner(output, &format!("Fetching {}...", category));
            let result = catalog.shelf(category, page).await;
            finish_spinner(pb);

            match result {
                Ok(items) => render_shelf(category.token(), &items, output),
                Err(e) => output.error(format!("{}: unavailable ({})", category, e)),
            }
        }
        None => {
            // Home view: one keyed request per shelf, and a failed shelf
            // never blocks its siblings
            let mut fetcher: KeyedFetcher<&str, Result<Vec<CatalogItem>, CatalogError>> =
                KeyedFetcher::new();

            for (title, category) in Category::home_shelves() {
                let client = catalog.clone();
                let pb = spinner(output, &format!("Fetching {}...", title));
                fetcher.request(category.token(), async move { client.shelf(category, 1).await });
                let result = fetcher.resolve(&category.token()).await;
                finish_spinner(pb);

                match result {
                    Some(Ok(items)) => render_shelf(title, &items, output),
                    Some(Err(e)) => output.warn(format!("{}: unavailable ({})", title, e)),
                    None => {}
                }
            }
        }
    }

    Ok(())
}

pub async fn run_search(
    query: String,
    lang: Option<String>,
    page: u32,
    output: &Output,
) -> Result<()> {
    let app = App::init()?;
    let catalog = app.catalog(lang)?;

    let pb = spinner(output, &format!("Searching for '{}'...", query));
    let result = catalog.search(&query, page).await;
    finish_spinner(pb);

    match result {
        Ok(items) if items.is_empty() => output.info(format!("No results for '{}'", query)),
        Ok(items) => render_shelf(&format!("Results for '{}'", query), &items, output),
        Err(e) => output.error(format!("Search unavailable: {}", e)),
    }

    Ok(())
}

fn render_shelf(title: &str, items: &[CatalogItem], output: &Output) {
    if output.format() != OutputFormat::Human {
        output.json(&json!({ "shelf": title, "items": items }));
        return;
    }

    output.println(format!("\n{}", title));

    if items.is_empty() {
        output.info("No content available");
        return;
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Rating").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Released").add_attribute(comfy_table::Attribute::Bold),
    ]);

    for item in items {
        table.add_row(vec![
            Cell::new(item.id),
            Cell::new(item.display_title()),
            Cell::new(
                item.vote_average
                    .map(|r| format!("{:.1}", r))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(item.release_date.as_deref().unwrap_or("-")),
        ]);
    }

    output.println(table.to_string());
}
