use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use iniparser::Ini;
use tracing_subscriber::EnvFilter;

/// Inspect and edit INI files.
#[derive(Parser, Debug)]
#[command(name = "iniparser")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the file in normalized form (sorted, comments dropped)
    Show { file: PathBuf },

    /// List section names
    Sections { file: PathBuf },

    /// Print the value of a key
    Get {
        file: PathBuf,
        section: String,
        key: String,
    },

    /// Set the value of a key and save the file
    Set {
        file: PathBuf,
        section: String,
        key: String,
        value: String,

        /// Write to this file instead of updating FILE in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the file without printing it
    Check { file: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("error: {e:#}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(file: &Path) -> Result<Ini> {
    let mut ini = Ini::new();
    ini.load_from_file(file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    Ok(ini)
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Show { file } => {
            let ini = load(&file)?;
            print!("{}", ini.sections()?);
        }
        Command::Sections { file } => {
            let ini = load(&file)?;
            let mut names = ini.section_names();
            names.sort_unstable();

            for name in names {
                println!("{name}");
            }
        }
        Command::Get { file, section, key } => {
            let ini = load(&file)?;
            println!("{}", ini.get(&section, &key)?);
        }
        Command::Set {
            file,
            section,
            key,
            value,
            output,
        } => {
            let mut ini = load(&file)?;
            ini.set(&section, &key, &value)?;

            let target = output.unwrap_or(file);
            ini.save_to_file(&target)
                .with_context(|| format!("failed to save {}", target.display()))?;
            tracing::debug!(section = %section, key = %key, "updated");
        }
        Command::Check { file } => {
            _ = load(&file)?;
            println!("ok");
        }
    }

    Ok(())
}
