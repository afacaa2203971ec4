use std::io::{self, Write};

use clap::Parser;
use cli::{Args, Commands};
use error::{CliError, CliResult};
use input::{load_manifest, load_manifest_with_warnings};
use logging::setup_logging;
use tracing::{debug, info};

mod cli;
mod error;
mod input;
mod logging;
mod render;
mod utils;

fn handle_cli(args: Args) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Commands::Inspect {
            input,
        } => {
            let manifest = load_manifest(&input)?;
            render::inspect(&mut out, &manifest, args.json)?;
        }
        Commands::Hosts {
            input,
            channel,
        } => {
            let manifest = load_manifest(&input)?;
            render::hosts(&mut out, &manifest, channel, args.json)?;
        }
        Commands::Component {
            input,
            name,
        } => {
            let manifest = load_manifest(&input)?;
            let component = manifest
                .component(&name)
                .ok_or_else(|| CliError::ComponentNotFound(name.clone()))?;
            render::component(&mut out, &name, component, args.json)?;
        }
        Commands::Check {
            input,
        } => {
            let (manifest, warnings) = load_manifest_with_warnings(&input)?;
            debug!("checked {} components", manifest.components.len());

            render::warnings(&mut out, &warnings, args.json)?;

            if !warnings.is_empty() {
                return Err(CliError::DroppedFields(warnings.len()));
            }
            if !args.json {
                info!("All fields decoded");
            }
        }
    }

    out.flush().ok();
    Ok(())
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    let args = Args::parse();
    setup_logging(&args);
    utils::set_color(!args.no_color);

    if let Err(err) = handle_cli(args) {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}
