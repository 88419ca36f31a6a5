//! Binary for the tracker bridge.

use anyhow::Result;
use clap::Parser;
use tracker_bridge::{
    load_config, mirror_comment_event, read_event, relay_issue_comment_event, relay_issue_event,
    run_bridge, Cli, Commands,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { places } => {
            let (config, places) = load_config(&places)?;
            run_bridge(config, places).await
        }
        Commands::Relay {
            places,
            owner,
            repo,
            event,
        } => {
            let (config, places) = load_config(&places)?;
            let event = read_event(&event)?;
            relay_issue_event(config, places, &owner, &repo, event).await
        }
        Commands::RelayComment {
            places,
            owner,
            repo,
            event,
        } => {
            let (config, places) = load_config(&places)?;
            let event = read_event(&event)?;
            relay_issue_comment_event(config, places, &owner, &repo, event).await
        }
        Commands::Mirror { places, event } => {
            let (config, places) = load_config(&places)?;
            let event = read_event(&event)?;
            mirror_comment_event(config, places, event).await?;
            Ok(())
        }
    }
}
