use std::env;
use std::process::ExitCode;

use anyhow::Result;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use gogs_branch::auth::{KeyringStore, TokenStore, resolve_token};
use gogs_branch::cli::{CliCommand, USAGE, parse_args};
use gogs_branch::commands::run_command;
use gogs_branch::config::Config;
use gogs_branch::gogs::GogsClient;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let Some(command) = parse_args(&args)? else {
        println!("{USAGE}");
        return Ok(());
    };

    let config = Config::load()?;
    let server = config.server_url()?;
    let store = KeyringStore::new(server);

    if command == CliCommand::AuthReset {
        if store.clear()? {
            println!("Cleared stored token for {server}");
        } else {
            println!("No stored token for {server}");
        }
        return Ok(());
    }

    let token = resolve_token(|key| env::var(key).ok(), config.token.as_deref(), &store)?;
    debug!(source = token.source.label(), "resolved auth token");

    let mut builder = GogsClient::builder(server, &token.value).timeout(config.timeout());
    if let Some(user_agent) = config.user_agent.as_deref() {
        builder = builder.user_agent(user_agent);
    }
    let client = builder.build()?;

    let output = run_command(&client, &command).await?;
    println!("{output}");
    Ok(())
}
