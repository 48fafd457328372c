//! Command-line interface for rendering feature statements.
#![forbid(unsafe_code)]

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand, ValueEnum};
use featuremap_core::{
    ContainerId, SpatialFeature, delete_statement, describe_table, insert_statement,
    update_statement,
};
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rusqlite::{Connection, OpenFlags};
use serde::{Deserialize, Serialize};

mod error;

pub use error::CliError;

const ARG_DATABASE: &str = "database";
const ARG_TABLE: &str = "table";
const ARG_FEATURE: &str = "feature";
const ENV_DATABASE: &str = "FEATUREMAP_CMDS_RENDER_DATABASE";
const ENV_TABLE: &str = "FEATUREMAP_CMDS_RENDER_TABLE";
const ENV_FEATURE: &str = "FEATUREMAP_CMDS_RENDER_FEATURE";

/// Run the featuremap CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, the
/// inputs cannot be read, or the statement cannot be built.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Render(args) => {
            let config = args.into_config()?;
            config.validate_sources()?;
            let statement = render_statement(&config)?;
            writeln!(io::stdout().lock(), "{statement}").map_err(CliError::WriteOutput)?;
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "featuremap",
    about = "Map spatial features onto GeoPackage feature tables",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the SQL statement that persists a feature.
    Render(RenderArgs),
}

/// Kind of statement to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
enum StatementKind {
    /// Add the feature as a new row.
    #[default]
    Insert,
    /// Overwrite the row addressed by the feature id.
    Update,
    /// Remove the row addressed by the feature id.
    Delete,
}

/// CLI arguments for the `render` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Describe a feature table from a GeoPackage and print the \
                 statement that writes a feature document to it. Options \
                 can come from CLI flags, configuration files, or \
                 environment variables.",
    about = "Render the SQL statement for a feature document"
)]
#[ortho_config(prefix = "FEATUREMAP")]
struct RenderArgs {
    /// Path to the GeoPackage container.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    database: Option<PathBuf>,
    /// Name of the feature table.
    #[arg(long = ARG_TABLE, value_name = "name")]
    #[serde(default)]
    table: Option<String>,
    /// Path to the JSON feature document.
    #[arg(long = ARG_FEATURE, value_name = "path")]
    #[serde(default)]
    feature: Option<PathBuf>,
    /// Statement to render.
    #[arg(long, value_enum)]
    #[serde(default)]
    mode: Option<StatementKind>,
}

impl RenderArgs {
    fn into_config(self) -> Result<RenderConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RenderConfig::try_from(merged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RenderConfig {
    database: PathBuf,
    table: String,
    feature: PathBuf,
    mode: StatementKind,
}

impl RenderConfig {
    fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.database, ARG_DATABASE)?;
        Self::require_existing(&self.feature, ARG_FEATURE)?;
        Ok(())
    }

    fn require_existing(path: &Path, field: &'static str) -> Result<(), CliError> {
        if path.is_file() {
            Ok(())
        } else {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
    }
}

impl TryFrom<RenderArgs> for RenderConfig {
    type Error = CliError;

    fn try_from(args: RenderArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_DATABASE,
        })?;
        let table = args.table.ok_or(CliError::MissingArgument {
            field: ARG_TABLE,
            env: ENV_TABLE,
        })?;
        let feature = args.feature.ok_or(CliError::MissingArgument {
            field: ARG_FEATURE,
            env: ENV_FEATURE,
        })?;
        Ok(Self {
            database,
            table,
            feature,
            mode: args.mode.unwrap_or_default(),
        })
    }
}

fn render_statement(config: &RenderConfig) -> Result<String, CliError> {
    let connection = Connection::open_with_flags(&config.database, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|source| CliError::OpenContainer {
            path: config.database.clone(),
            source,
        })?;
    let container = ContainerId::new(config.database.display().to_string());
    let source = describe_table(&connection, container, &config.table)?;
    let feature = read_feature(&config.feature)?;
    debug!("rendering {:?} for table {}", config.mode, config.table);
    let statement = match config.mode {
        StatementKind::Insert => insert_statement(&source, &feature),
        StatementKind::Update => update_statement(&source, &feature),
        StatementKind::Delete => delete_statement(&source, &feature),
    }?;
    Ok(statement)
}

fn read_feature(path: &Path) -> Result<SpatialFeature, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadFeature {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ParseFeature {
        path: path.to_path_buf(),
        source,
    })
}
