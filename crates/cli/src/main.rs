// gridmark CLI - replay grid selection sessions headlessly

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use gridmark_cli::render::{render_grid, render_text, Snapshot};
use gridmark_cli::script::{read_script, ScriptError};
use gridmark_cli::{init_logging, log_directive, selection_options};
use gridmark_config::{Settings, SettingsError};
use gridmark_selection::SelectionStore;

use exit_codes::{
    EXIT_CONFIG, EXIT_ERROR, EXIT_IO, EXIT_SCRIPT_INVALID, EXIT_SCRIPT_PARSE, EXIT_SUCCESS,
    EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "gridmark")]
#[command(about = "Replay and inspect grid selection sessions (headless)")]
#[command(version)]
struct Cli {
    /// Settings file (default: platform config dir)
    #[arg(long, global = true, env = "GRIDMARK_CONFIG")]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a gesture script and print the resulting selection
    #[command(after_help = "\
Examples:
  gridmark replay drag.json
  gridmark replay drag.json --format grid
  cat session.json | gridmark replay - --format json")]
    Replay {
        /// Script file (use - for stdin)
        script: PathBuf,

        /// Output format
        #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Inspect or create the settings file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the settings file path
    Path,
    /// Print the effective settings as JSON
    Show,
    /// Write a commented default settings file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Grid,
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn script(err: ScriptError) -> Self {
        let code = match err {
            ScriptError::Io(_) => EXIT_IO,
            ScriptError::Parse { .. } => EXIT_SCRIPT_PARSE,
            ScriptError::InvalidCell { .. } => EXIT_SCRIPT_INVALID,
        };
        let hint = match err {
            ScriptError::Parse { .. } => {
                Some("each op needs an \"op\" field: start, extend, end, select, focus, move, clear, clear_rows, select_all_rows, register".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    pub fn settings(err: SettingsError) -> Self {
        let code = match err {
            SettingsError::Io { .. } => EXIT_IO,
            SettingsError::Parse { .. } | SettingsError::Invalid(_) => EXIT_CONFIG,
        };
        Self { code, message: err.to_string(), hint: Some("run `gridmark config init --force` to reset".to_string()) }
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    match path {
        Some(path) => Settings::load_from(path).map_err(CliError::settings),
        None => Ok(Settings::load()),
    }
}

fn cmd_replay(script_path: PathBuf, format: OutputFormat, settings: &Settings) -> Result<(), CliError> {
    let script = read_script(&script_path).map_err(CliError::script)?;

    let mut store = SelectionStore::new(selection_options(settings));
    script.apply(&mut store).map_err(CliError::script)?;

    let output = match format {
        OutputFormat::Text => render_text(&Snapshot::capture(&store)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&Snapshot::capture(&store))
                .map_err(|e| CliError::general(format!("failed to serialize snapshot: {}", e)))?;
            json + "\n"
        }
        OutputFormat::Grid => render_grid(&store),
    };
    print!("{}", output);
    Ok(())
}

fn settings_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map(Path::to_path_buf).unwrap_or_else(Settings::config_path)
}

fn cmd_config(command: ConfigCommands, explicit: Option<&Path>, settings: &Settings) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => {
            println!("{}", settings_path(explicit).display());
            Ok(())
        }
        ConfigCommands::Show => {
            let json = serde_json::to_string_pretty(settings)
                .map_err(|e| CliError::general(format!("failed to serialize settings: {}", e)))?;
            println!("{}", json);
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = settings_path(explicit);
            if path.exists() && !force {
                return Err(CliError::usage(format!("{} already exists", path.display()))
                    .with_hint("pass --force to overwrite"));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| CliError::io(format!("{}: {}", parent.display(), e)))?;
            }
            std::fs::write(&path, Settings::default_file_contents())
                .map_err(|e| CliError::io(format!("{}: {}", path.display(), e)))?;
            log::info!("wrote default settings to {}", path.display());
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Some(command) = cli.command else {
        // No subcommand = show usage
        eprintln!("Usage: gridmark <command> [options]");
        eprintln!("       gridmark --help for more information");
        return Ok(());
    };

    // `config init` must work even when the current file is broken
    let settings = match &command {
        Commands::Config { command: ConfigCommands::Init { .. } } => Settings::default(),
        _ => load_settings(cli.config.as_deref())?,
    };
    let env = std::env::var("GRIDMARK_LOG").ok();
    init_logging(&log_directive(cli.verbose, cli.quiet, env, &settings));

    match command {
        Commands::Replay { script, format } => cmd_replay(script, format, &settings),
        Commands::Config { command } => cmd_config(command, cli.config.as_deref(), &settings),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
