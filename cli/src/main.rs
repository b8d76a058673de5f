//! cldrpack: build locale-keyed packages from CLDR JSON data.
//!
//! Usage:
//!   cldrpack list
//!   cldrpack build --package dates --input ./cldr-dates-modern --output ./out
//!   cldrpack inspect ./out/cldr-dates.cldrstd --locale fr

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cldrpack_cli::{BuildRequest, build, inspect, list_packages, locale_json};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cldrpack")]
#[command(about = "Build locale-keyed packages from CLDR JSON data")]
struct Args {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the packages in the catalog.
    List,

    /// Build a package from an extracted CLDR JSON directory.
    Build {
        /// Package name, with or without the `cldr-` prefix
        #[arg(short, long)]
        package: String,

        /// Directory holding the package's JSON files
        #[arg(short, long)]
        input: PathBuf,

        /// Directory to write the package file into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Skip malformed documents instead of aborting
        #[arg(long)]
        skip_invalid: bool,

        /// Extraction worker threads (default: available parallelism)
        #[arg(long)]
        workers: Option<usize>,
    },

    /// Show the manifest of a built package.
    Inspect {
        file: PathBuf,

        /// Print the merged data of one locale
        #[arg(long)]
        locale: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    match args.command {
        Command::List => {
            for line in list_packages() {
                println!("{line}");
            }
        }
        Command::Build {
            package,
            input,
            output,
            skip_invalid,
            workers,
        } => {
            let path = build(&BuildRequest {
                package,
                input,
                output,
                skip_invalid,
                workers,
            })?;
            info!(path = %path.display(), "Done");
        }
        Command::Inspect { file, locale } => {
            let report = inspect(&file)?;
            match locale {
                Some(code) => println!("{}", locale_json(&report, &code)?),
                None => println!("{report}"),
            }
        }
    }
    Ok(())
}
