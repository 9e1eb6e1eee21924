use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use agentswarm::api::{HttpSwarmApi, SwarmApi};
use agentswarm::config::{ClientSettings, DEFAULT_CONFIG_PATH};
use agentswarm::logging;
use anyhow::{Context, Result, bail};
use log::{debug, error};
use serde::Serialize;

const USAGE: &str = "usage: swarmctl <health|agents|chats|providers|init-config [path]>";

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_stderr_logging();
    match run(env::args().skip(1).collect()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("swarmctl: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Vec<String>) -> Result<()> {
    let settings = ClientSettings::load()?;

    let command = match args.as_slice() {
        [command, path] if command == "init-config" => {
            return init_config(&settings, PathBuf::from(path));
        }
        [command] if command == "init-config" => {
            return init_config(&settings, PathBuf::from(DEFAULT_CONFIG_PATH));
        }
        [command] => command,
        _ => bail!(USAGE),
    };

    let api = HttpSwarmApi::from_settings(&settings).context("Failed to build the HTTP client")?;
    debug!("Running {} against {}", command, api.base_url());

    match command.as_str() {
        "health" => print_json(&api.health().await.context("GET /health failed")?),
        "agents" => print_json(&api.list_agents().await.context("GET /agents failed")?),
        "chats" => print_json(&api.list_chats().await.context("GET /chats failed")?),
        "providers" => print_json(
            &api.list_providers()
                .await
                .context("GET /providers failed")?,
        ),
        other => bail!("unknown command `{}`\n{}", other, USAGE),
    }
}

/// Writes the effective settings so they can be edited by hand.
fn init_config(settings: &ClientSettings, path: PathBuf) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    settings.save_to_file(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to encode response")?;
    println!("{}", rendered);
    Ok(())
}
