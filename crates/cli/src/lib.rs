// gridmark CLI library: script replay and output rendering, shared by the
// binary and the integration tests.

pub mod render;
pub mod script;

use gridmark_config::Settings;
use gridmark_selection::SelectionOptions;

/// Engine options from user settings.
pub fn selection_options(settings: &Settings) -> SelectionOptions {
    SelectionOptions {
        row_overlay_col: settings.row_overlay_column.clone(),
        primary_cols: settings.primary_columns.clone(),
        select_cell_preserves_rows: settings.select_cell_preserves_rows,
    }
}

/// Log filter directive. Flags win over `GRIDMARK_LOG`, which wins over settings.
pub fn log_directive(verbose: u8, quiet: bool, env: Option<String>, settings: &Settings) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => env.unwrap_or_else(|| settings.log_level.as_str().to_string()),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the stderr logger. Returns false if a global subscriber was
/// already set; records then keep going to that one.
pub fn init_logging(directive: &str) -> bool {
    let filter = tracing_subscriber::EnvFilter::try_new(directive)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
    {
        Ok(()) => true,
        Err(e) => {
            log::debug!("stderr logger not installed: {}", e);
            false
        }
    }
}
