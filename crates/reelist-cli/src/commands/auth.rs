use color_eyre::Result;
use serde_json::json;

use reelist_config::config::IDENTITY_KEY_ENV;

use crate::commands::{prompts, App};
use crate::output::Output;

fn require_identity_key(app: &App, output: &Output) -> bool {
    if app.config.identity_key().is_some() {
        true
    } else {
        output.error(format!(
            "Identity provider not configured. Set {} or add it to {}",
            IDENTITY_KEY_ENV,
            app.paths.config_file().display()
        ));
        false
    }
}

pub async fn run_login(email: Option<String>, output: &Output) -> Result<()> {
    let app = App::init()?;
    if !require_identity_key(&app, output) {
        return Ok(());
    }

    let email = match email {
        Some(e) => e,
        None => prompts::prompt_string("Email")?,
    };
    let password = prompts::prompt_password("Password")?;

    let mut ctx = app.context()?;
    match ctx.sign_in(&email, &password).await {
        Ok(session) => {
            output.success(format!("Signed in as {}", session.label()));
            output.info(format!(
                "Your list has {} item(s)",
                ctx.watchlist().len()
            ));
        }
        // Inline failure: session state is untouched
        Err(e) => output.error(format!("Sign-in failed: {}", e)),
    }

    ctx.close();
    Ok(())
}

pub async fn run_signup(
    name: Option<String>,
    email: Option<String>,
    output: &Output,
) -> Result<()> {
    let app = App::init()?;
    if !require_identity_key(&app, output) {
        return Ok(());
    }

    let name = match name {
        Some(n) => n,
        None => prompts::prompt_string("Your name")?,
    };
    let email = match email {
        Some(e) => e,
        None => prompts::prompt_string("Email")?,
    };
    let password = prompts::prompt_password("Password (min 6 characters)")?;

    let mut ctx = app.context()?;
    match ctx.sign_up(&name, &email, &password).await {
        Ok(session) => output.success(format!("Account created, signed in as {}", session.label())),
        Err(e) => output.error(format!("Sign-up failed: {}", e)),
    }

    ctx.close();
    Ok(())
}

pub async fn run_logout(output: &Output) -> Result<()> {
    let app = App::init()?;
    let mut ctx = app.context()?;

    if ctx.session().is_none() {
        output.info("Not signed in");
    } else {
        ctx.sign_out().await;
        output.success("Signed out");
        output.info(format!(
            "Guest list active ({} item(s))",
            ctx.watchlist().len()
        ));
    }

    ctx.close();
    Ok(())
}

pub fn run_whoami(output: &Output) -> Result<()> {
    let app = App::init()?;
    let ctx = app.context()?;

    match ctx.session() {
        Some(session) => match output.format() {
            crate::output::OutputFormat::Human => {
                output.println(format!("{} <{}>", session.label(), session.email));
                output.println(format!("Scope: {}", ctx.scope()));
            }
            _ => output.json(&json!({
                "uid": session.uid,
                "email": session.email,
                "display_name": session.display_name,
                "scope": ctx.scope().to_string(),
            })),
        },
        None => output.info("Not signed in (guest scope)"),
    }

    ctx.close();
    Ok(())
}
