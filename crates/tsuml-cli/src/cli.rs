//! Command-line interface for the tsuml utility
//!
//! Reads a JSON declaration dump and renders it as a Mermaid or yUML
//! class diagram.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::debug;

use tsuml::core::logging::init_logging;
use tsuml::plugins::{Generator, YumlEngine, DEFAULT_YUML_URL};
use tsuml::{parse_declarations, DeclarationSet, EngineKind, EngineRegistry, OutputOptions, UnresolvedPolicy};

/// tsuml - Class diagrams from class and interface declarations
#[derive(Parser)]
#[command(name = "tsuml")]
#[command(about = "Render class and interface declarations as Mermaid or yUML class diagrams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a declaration dump as a class diagram
    Generate {
        /// JSON declaration dump (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Diagram notation
        #[arg(short = 't', long = "type", value_enum, default_value_t = EngineChoice::Mermaid)]
        engine: EngineChoice,

        /// Output file for the diagram (Mermaid) or its URL (yUML); stdout without one
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not open the published yUML diagram in the system viewer
        #[arg(long)]
        no_open: bool,

        /// Fail on unresolved members and heritage clauses instead of dropping them
        #[arg(long)]
        strict: bool,

        /// yUML service to publish to
        #[arg(long, default_value = DEFAULT_YUML_URL)]
        yuml_url: String,
    },

    /// Show available diagram engines
    Engines {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Supported diagram notations
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum EngineChoice {
    /// Mermaid classDiagram
    #[default]
    Mermaid,
    /// yUML bracket notation
    Yuml,
}

impl From<EngineChoice> for EngineKind {
    fn from(value: EngineChoice) -> Self {
        match value {
            EngineChoice::Mermaid => EngineKind::Mermaid,
            EngineChoice::Yuml => EngineKind::Yuml,
        }
    }
}

/// `engines --json` payload
#[derive(Debug, Serialize)]
struct EnginesReport {
    engines: Vec<String>,
    default: String,
}

/// Main CLI application
pub struct TsumlApp;

impl TsumlApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub async fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("TSUML_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("TSUML_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("tsuml v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Generate {
                input,
                engine,
                output,
                no_open,
                strict,
                yuml_url,
            } => {
                let generator = Self::build_generator(engine, strict, &yuml_url)?;
                let options = OutputOptions {
                    output,
                    open_viewer: !no_open,
                };
                self.generate_command(generator, input, options, cli.verbose)
                    .await
            }
            Commands::Engines { json } => self.engines_command(json),
        }
    }

    /// Builtin engines, the yUML one pointed at `yuml_url`, with `engine` selected
    pub fn build_generator(engine: EngineChoice, strict: bool, yuml_url: &str) -> Result<Generator> {
        let mut registry = EngineRegistry::with_builtin_engines();
        registry.register(Box::new(YumlEngine::with_service(yuml_url)));
        registry.select(EngineKind::from(engine).as_str())?;

        let policy = if strict {
            UnresolvedPolicy::Reject
        } else {
            UnresolvedPolicy::Drop
        };
        Ok(Generator::new(registry).with_policy(policy))
    }

    /// Handle the generate command
    async fn generate_command(
        &self,
        generator: Generator,
        input: Option<PathBuf>,
        options: OutputOptions,
        verbose: bool,
    ) -> Result<()> {
        let declarations = self.read_declarations(input)?;
        debug!(
            declarations = declarations.declaration_count(),
            files = declarations.files.len(),
            "Read declaration dump"
        );

        if verbose {
            eprintln!(
                "Read {} declarations from {} files",
                declarations.declaration_count(),
                declarations.files.len()
            );
        }

        generator.run(&declarations, &options).await?;

        if verbose {
            eprintln!("Diagram generated");
        }
        Ok(())
    }

    /// Handle the engines command
    fn engines_command(&self, json: bool) -> Result<()> {
        let registry = EngineRegistry::with_builtin_engines();
        let default = registry
            .selection()
            .map(|selection| selection.name().to_string())
            .unwrap_or_default();

        if json {
            let report = EnginesReport {
                engines: registry.engines(),
                default,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("Available engines:");
            for name in registry.engines() {
                let marker = if name == default { " (default)" } else { "" };
                println!("  {}{}", name, marker);
            }
        }

        Ok(())
    }

    /// Read and parse the declaration dump from a file or stdin
    pub fn read_declarations(&self, input: Option<PathBuf>) -> Result<DeclarationSet> {
        let content = self.read_input(input)?;
        Ok(parse_declarations(&content)?)
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }
}

impl Default for TsumlApp {
    fn default() -> Self {
        Self::new()
    }
}
