use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;

use reelist_providers::tmdb::api::image_url;
use reelist_providers::CatalogError;

use crate::commands::{finish_spinner, spinner, App};
use crate::output::{Output, OutputFormat};

/// Cast entries shown on the details view.
const CAST_SHOWN: usize = 6;

pub async fn run_details(id: u64, lang: Option<String>, output: &Output) -> Result<()> {
    let app = App::init()?;
    let catalog = app.catalog(lang)?;

    let pb = spinner(output, "Fetching details...");
    let (details, credits) = tokio::join!(catalog.movie_details(id), catalog.movie_credits(id));
    finish_spinner(pb);

    let details = match details {
        Ok(d) => d,
        Err(CatalogError::NotFound) => {
            output.error(format!("Title {} not found", id));
            return Ok(());
        }
        Err(e) => return Err(eyre!("{}", e)),
    };

    // The cast section fails independently of the hero section
    let cast = match credits {
        Ok(mut cast) => {
            cast.truncate(CAST_SHOWN);
            cast
        }
        Err(e) => {
            output.warn(format!("Cast unavailable: {}", e));
            Vec::new()
        }
    };

    let ctx = app.context()?;
    let in_list = ctx.watchlist().contains(&id.to_string());

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "details": details,
            "cast": cast,
            "in_list": in_list,
        }));
        ctx.close();
        return Ok(());
    }

    let mut heading = details.display_title().to_string();
    if let Some(year) = details.release_year() {
        heading.push_str(&format!(" ({})", year));
    }
    output.println(format!("\n{}", heading));

    let mut meta = Vec::new();
    if let Some(rating) = details.vote_average {
        meta.push(format!("⭐ {:.1}/10", rating));
    }
    if let Some(runtime) = details.runtime {
        meta.push(format!("{} min", runtime));
    }
    if !details.genres.is_empty() {
        let names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        meta.push(names.join(", "));
    }
    if !meta.is_empty() {
        output.println(meta.join("  ·  "));
    }

    if let Some(overview) = &details.overview {
        output.println(format!("\n{}", overview));
    }

    if !cast.is_empty() {
        output.println("\nCast:");
        for member in &cast {
            match &member.character {
                Some(role) => output.println(format!("  {} as {}", member.name, role)),
                None => output.println(format!("  {}", member.name)),
            }
        }
    }

    if let Some(url) = image_url(details.backdrop_path.as_deref()) {
        output.println(format!("\nBackdrop: {}", url));
    }

    if in_list {
        output.println("✓ In your list");
    } else {
        output.println(format!("+ Add with: reelist add {}", id));
    }

    ctx.close();
    Ok(())
}

pub async fn run_trailer(id: u64, output: &Output) -> Result<()> {
    let app = App::init()?;
    let catalog = app.catalog(None)?;

    let pb = spinner(output, "Fetching trailer...");
    let result = catalog.trailer(id).await;
    finish_spinner(pb);

    match result {
        Ok(Some(clip)) => {
            if output.format() != OutputFormat::Human {
                output.json(&json!({ "id": id, "trailer": clip }));
                return Ok(());
            }
            output.println(format!("{} [{}]", clip.name, clip.clip_type));
            match clip.watch_url() {
                Some(url) => output.println(url),
                None => output.info(format!("Hosted on {} (no direct link)", clip.site)),
            }
        }
        Ok(None) => output.info("Trailer not available"),
        Err(CatalogError::NotFound) => output.error(format!("Title {} not found", id)),
        Err(e) => output.error(format!("Trailer unavailable: {}", e)),
    }

    Ok(())
}
