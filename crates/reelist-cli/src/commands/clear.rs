use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fs;

use reelist_config::{KvStore, PathManager};
use reelist_core::session::SESSION_KEY;

use crate::output::Output;

pub fn run_clear(
    all: bool,
    watchlists: bool,
    session: bool,
    credentials: bool,
    output: &Output,
) -> Result<()> {
    let paths = PathManager::default();

    if all {
        clear_store(&paths, output)?;
        clear_credentials(&paths, output)?;
        output.success("All stored data cleared");
        return Ok(());
    }

    let mut cleared_anything = false;

    if watchlists {
        clear_watchlists(&paths, output)?;
        cleared_anything = true;
    }

    if session {
        clear_session(&paths, output)?;
        cleared_anything = true;
    }

    if credentials {
        clear_credentials(&paths, output)?;
        cleared_anything = true;
    }

    if !cleared_anything {
        output.warn("No clear option specified. Use --watchlists, --session, --credentials, or --all");
        output.println("\nExample: reelist clear --watchlists");
    }

    Ok(())
}

fn open_store(paths: &PathManager) -> Result<KvStore> {
    KvStore::new(paths).map_err(|e| eyre!("{}", e))
}

fn clear_store(paths: &PathManager, output: &Output) -> Result<()> {
    let store = open_store(paths)?;
    store.clear().map_err(|e| eyre!("{}", e))?;
    output.success(format!("Cleared stored data: {}", paths.store_dir().display()));
    Ok(())
}

fn clear_watchlists(paths: &PathManager, output: &Output) -> Result<()> {
    let store = open_store(paths)?;
    let mut removed = 0;
    for key in store.keys() {
        if key.starts_with("watchlist") {
            store.delete(&key).map_err(|e| eyre!("{}", e))?;
            removed += 1;
        }
    }
    if removed > 0 {
        output.success(format!("Cleared {} stored watchlist(s)", removed));
    } else {
        output.info("No stored watchlists found to clear");
    }
    Ok(())
}

fn clear_session(paths: &PathManager, output: &Output) -> Result<()> {
    let store = open_store(paths)?;
    if store.exists(SESSION_KEY) {
        store.delete(SESSION_KEY).map_err(|e| eyre!("{}", e))?;
        output.success("Cleared stored session");
    } else {
        output.info("No stored session found to clear");
    }
    Ok(())
}

fn clear_credentials(paths: &PathManager, output: &Output) -> Result<()> {
    let credentials_file = paths.credentials_file();
    if credentials_file.exists() {
        fs::remove_file(&credentials_file).map_err(|e| {
            eyre!(
                "Failed to remove credentials at {}: {}",
                credentials_file.display(),
                e
            )
        })?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials found to clear");
    }
    Ok(())
}
