use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use formcanvas::config::{ConfigError, LayoutConfig};
use formcanvas::engine::{Action, EditorCore};
use formcanvas::replay::{self, ReplayError};
use formcanvas::wire::{self, ExportedField, LoadError};
use serde::Serialize;
use tracing::info;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "formcanvas", about = "Template field layout engine")]
struct Cli {
    /// JSON file with layout overrides (canvas size, minimums, zoom limits).
    #[arg(long, env = "FORMCANVAS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a field list and print the normalized save payload.
    Normalize {
        /// Field list JSON, or `-` for stdin.
        #[arg(long)]
        input: String,
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Replay a pointer script against a field list and print the result.
    Replay {
        /// Initial field list JSON; starts empty when omitted.
        #[arg(long)]
        fields: Option<String>,
        /// Newline-delimited JSON script, or `-` for stdin.
        #[arg(long)]
        script: String,
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Width available to the editor, in display pixels.
        #[arg(long)]
        display_width: Option<f64>,
        /// Also print the actions emitted along the way.
        #[arg(long)]
        actions: bool,
    },
}

#[derive(Serialize)]
struct ReplayOutput<'a> {
    actions: &'a [Action],
    fields: &'a [ExportedField],
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Normalize { input, pages } => run_normalize(config, &input, pages),
        Command::Replay { fields, script, pages, display_width, actions } => {
            run_replay(config, fields.as_deref(), &script, pages, display_width, actions)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<LayoutConfig, CliError> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| CliError::Read { path: display.clone(), source })?;
    let config = LayoutConfig::from_json(&text).map_err(|source| CliError::Config { path: display, source })?;
    info!(path = %path.display(), "config loaded");
    Ok(config)
}

fn read_input(path: &str) -> Result<String, CliError> {
    let read_err = |source| CliError::Read { path: path.to_owned(), source };
    if path == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(read_err)?;
        return Ok(text);
    }
    fs::read_to_string(path).map_err(read_err)
}

fn load_editor(config: LayoutConfig, fields: Option<&str>, pages: u32) -> Result<EditorCore, CliError> {
    let mut editor = EditorCore::new(config);
    editor.set_page_count(pages);
    if let Some(path) = fields {
        let list = wire::parse_fields(&read_input(path)?, &config)?;
        let count = editor.load_fields(list);
        info!(%path, count, "fields loaded");
    }
    Ok(editor)
}

fn run_normalize(config: LayoutConfig, input: &str, pages: u32) -> Result<(), CliError> {
    let editor = load_editor(config, Some(input), pages)?;
    println!("{}", wire::to_json(&editor.export())?);
    Ok(())
}

fn run_replay(
    config: LayoutConfig,
    fields: Option<&str>,
    script: &str,
    pages: u32,
    display_width: Option<f64>,
    print_actions: bool,
) -> Result<(), CliError> {
    let mut editor = load_editor(config, fields, pages)?;
    if let Some(width) = display_width {
        let scale = editor.set_display_width(width);
        info!(width, scale, "display width set");
    }
    let steps = replay::parse_script(&read_input(script)?)?;
    let actions = replay::replay(&mut editor, steps)?;
    let exported = editor.export();
    let rendered = if print_actions {
        serde_json::to_string_pretty(&ReplayOutput { actions: &actions, fields: &exported })?
    } else {
        wire::to_json(&exported)?
    };
    println!("{rendered}");
    Ok(())
}
