//! Folio simulator
//!
//! Drives the portfolio runtime without a browser: animate the backdrop,
//! toggle the stored theme, or scroll the demo page.

mod cli;
mod page;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use folio_core::{logging, FolioConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_format.into());

    let config = FolioConfig::load_optional(cli.config.as_deref())
        .with_context(|| format!("loading configuration {:?}", cli.config))?;

    match cli.command {
        Command::Run(args) => {
            let json = args.json;
            let report = session::run(config, args).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render_text());
            }
        }
        Command::Toggle { store } => {
            let path = store
                .or_else(|| config.theme.store.clone())
                .context("no preference store given; pass --store or set [theme] store")?;
            println!("Theme is now {}", session::toggle(&path)?);
        }
        Command::Reveal {
            viewport_height,
            scroll,
        } => {
            for line in session::reveal(&config, viewport_height, &scroll) {
                println!("{line}");
            }
        }
    }

    Ok(())
}
