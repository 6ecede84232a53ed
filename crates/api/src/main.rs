//! Vakansiya command-line client
//!
//! Usage:
//! - `vakansiya login <email> <password>`
//! - `vakansiya whoami`
//! - `vakansiya jobs [search]`
//! - `vakansiya logout`
//!
//! Results are printed as JSON on stdout; diagnostics go through tracing.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::{info, warn};
use vakansiya_domain::{JobQuery, LoginRequest};
use vakansiya_infra::{config, observability};
use vakansiya_lib::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    // Environment first so VAKANSIYA_* from .env reach the config loader
    let dotenv = dotenvy::dotenv();

    let config = config::load().context("Failed to load configuration")?;
    observability::init_tracing(&config.logging).context("Failed to initialize logging")?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) => warn!(error = %e, "Could not load .env file"),
    }

    let ctx = AppContext::new(config)?;
    ctx.restore_session();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = run(&ctx, &args).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run(ctx: &AppContext, args: &[String]) -> Result<Value> {
    let command = args.first().map(String::as_str).unwrap_or("whoami");

    let value = match command {
        "login" => {
            let (Some(email), Some(password)) = (args.get(1), args.get(2)) else {
                bail!("usage: vakansiya login <email> <password>");
            };
            let request = LoginRequest::new(email.as_str(), password.as_str());
            let response = ctx.sessions.sign_in(&request).await?;
            serde_json::to_value(response.user)?
        }
        "whoami" => {
            if !ctx.session.is_authenticated() {
                bail!("not signed in; run `vakansiya login <email> <password>`");
            }
            serde_json::to_value(ctx.commands.current_user().await?)?
        }
        "jobs" => {
            let query = JobQuery { search: args.get(1).cloned(), ..JobQuery::default() };
            serde_json::to_value(ctx.commands.list_jobs(&query).await?)?
        }
        "logout" => {
            ctx.sessions.sign_out().await;
            Value::Null
        }
        other => bail!("unknown command: {other}"),
    };

    Ok(value)
}
