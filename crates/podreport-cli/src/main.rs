use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use podreport_core::config::{Config, ConfigPaths};

mod commands;
mod logging;
mod tui;

#[derive(Parser, Debug)]
#[command(
    name = "podreport",
    version,
    about = "Kubernetes pod resource reports and a viewer for them"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Init {
        #[arg(long)]
        path: Option<PathBuf>,
        #[arg(long)]
        force: bool,
    },
    Config {
        #[arg(long)]
        print: bool,
    },
    /// Collect requests, limits and usage for a namespace into a new report
    Generate {
        context: String,
        namespace: String,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Rebuild the report index from the reports in a directory
    Index {
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Print the report list and the latest (or given) report
    Show {
        /// Directory or http(s) URL holding the reports
        #[arg(long)]
        source: Option<String>,
        report: Option<String>,
    },
    /// Browse reports interactively
    View {
        #[arg(long)]
        source: Option<String>,
    },
}

fn main() -> Result<()> {
    let Cli {
        config: config_path,
        command,
    } = Cli::parse();

    let command = match command {
        Commands::Init { path, force } => return init_config(path, force),
        other => other,
    };

    let config = load_config(config_path)?;
    let target = match command {
        Commands::View { .. } => logging::LogTarget::FileOnly {
            default_file: ConfigPaths::resolve()?.log_path,
        },
        _ => logging::LogTarget::Stderr,
    };
    logging::init(&config.logging, &target)?;

    match command {
        Commands::Init { .. } => Ok(()),
        Commands::Config { print } => {
            if print {
                commands::config::print_effective(&config)
            } else {
                Ok(())
            }
        }
        Commands::Generate {
            context,
            namespace,
            output,
        } => commands::generate::execute(&config, context, namespace, output),
        Commands::Index { dir } => commands::index::execute(&config, dir),
        Commands::Show { source, report } => commands::show::execute(&config, source, report),
        Commands::View { source } => {
            if tui::available() {
                commands::view::execute(&config, source)
            } else {
                commands::show::execute(&config, source, None)
            }
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load(&path),
        None => {
            let paths = ConfigPaths::resolve()?;
            Config::load_or_default(&paths.config_path)
        }
    }
}

fn init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let paths = ConfigPaths::resolve()?;
    let config_path = path.unwrap_or(paths.config_path);
    if config_path.exists() && !force {
        return Err(anyhow::anyhow!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        ));
    }
    let config = Config::default_config();
    config.save(&config_path)?;
    println!("Config written to {}", config_path.display());
    Ok(())
}
