//! protoshape CLI.

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use tracing_subscriber::EnvFilter;

use protoshape::{Compiler, CompilerConfig, GenerationOptions};

mod ui;

#[derive(Parser)]
#[command(name = "protoshape", version)]
#[command(about = "protoshape - generates C# declarations from schema documents")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one C# file from the given schemas
    Generate {
        #[command(flatten)]
        schema: SchemaArgs,

        /// Output .cs file or directory (default: first input with .cs extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load and generate without writing anything
    Check {
        #[command(flatten)]
        schema: SchemaArgs,
    },

    /// Regenerate whenever a schema changes
    Watch {
        #[command(flatten)]
        schema: SchemaArgs,

        /// Output .cs file or directory (default: first input with .cs extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Inputs and generation options shared by all commands.
#[derive(Args, Clone)]
struct SchemaArgs {
    /// Schema documents, or directories containing them
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Schema document format
    #[arg(long, default_value = "json")]
    format: String,

    /// Generate interfaces
    #[arg(short, long)]
    interfaces: bool,

    /// Keep names as written in the schema instead of converting them to CamelCase
    #[arg(long)]
    preserve_names: bool,

    /// Rename properties that clash with their class or a nested class instead of failing
    #[arg(long)]
    fix_nameclash: bool,

    /// Indent generated code with tabs rather than four spaces
    #[arg(short = 't', long)]
    use_tabs: bool,

    /// Emit a <Name>FieldID constant with the wire id of every field
    #[arg(long)]
    debug_field_ids: bool,
}

impl SchemaArgs {
    fn into_config(self, output: Option<PathBuf>) -> CompilerConfig {
        CompilerConfig {
            inputs: self.inputs,
            output,
            format: self.format,
            options: GenerationOptions {
                generate_interfaces: self.interfaces,
                preserve_names: self.preserve_names,
                fix_nameclash: self.fix_nameclash,
                use_tabs: self.use_tabs,
                debug_field_ids: self.debug_field_ids,
            },
        }
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate { schema, output } => {
            generate(schema.into_config(output))?;
        }

        Commands::Check { schema } => {
            check(schema.into_config(None))?;
        }

        Commands::Watch { schema, output } => {
            run_watch_mode(schema.into_config(output))?;
        }
    }

    Ok(())
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn generate(config: CompilerConfig) -> miette::Result<()> {
    ui::print_compact_header(env!("CARGO_PKG_VERSION"));
    println!();

    let spinner = ui::spinner("Generating declarations...");
    let start = Instant::now();

    let compiler = Compiler::new(config);
    match compiler.compile() {
        Ok(result) => {
            spinner.finish_and_clear();
            ui::success(&ui::counts(result.schemas, result.messages, result.enums));
            if let Some(output) = &result.output {
                ui::dim(&format!("{} ({} bytes)", output.display(), result.bytes));
            }
            ui::timing("Generated", start.elapsed().as_millis());
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            Err(e.into())
        }
    }
}

fn check(config: CompilerConfig) -> miette::Result<()> {
    let spinner = ui::spinner("Checking schemas...");

    let compiler = Compiler::new(config);
    match compiler.check() {
        Ok(result) => {
            spinner.finish_and_clear();
            ui::success("Schemas are valid.");
            println!();
            println!(
                "    {}",
                ui::counts(result.schemas, result.messages, result.enums)
            );
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            Err(e.into())
        }
    }
}

/// Compiles once, then again after every debounced schema change. Errors
/// are reported and watching continues.
fn run_watch_mode(config: CompilerConfig) -> miette::Result<()> {
    let inputs = config.inputs.clone();
    let extension = config.format.clone();
    let compiler = Compiler::new(config);

    ui::info(&format!("Watching {} input(s) for changes", inputs.len()));
    println!();
    recompile(&compiler);

    let (tx, rx) = mpsc::channel::<()>();
    let mut debouncer = new_debouncer(
        Duration::from_millis(500),
        move |result: DebounceEventResult| match result {
            Ok(events) => {
                // Ignore our own output and editor temp files.
                let schema_changed = events.iter().any(|event| {
                    event
                        .path
                        .extension()
                        .map(|ext| ext == extension.as_str())
                        .unwrap_or(false)
                });
                if schema_changed {
                    let _ = tx.send(());
                }
            }
            Err(e) => tracing::warn!(error = %e, "file watcher error"),
        },
    )
    .into_diagnostic()?;

    for input in &inputs {
        let mode = if input.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        debouncer.watcher().watch(input, mode).into_diagnostic()?;
    }

    ui::info("Ready! Waiting for changes...");

    while rx.recv().is_ok() {
        println!();
        recompile(&compiler);
    }

    Ok(())
}

fn recompile(compiler: &Compiler) {
    let spinner = ui::spinner("Change detected, regenerating...");
    let start = Instant::now();

    match compiler.compile() {
        Ok(result) => {
            spinner.finish_and_clear();
            ui::success(&format!(
                "Generated {} message(s) in {}ms",
                result.messages,
                start.elapsed().as_millis()
            ));
        }
        Err(e) => {
            spinner.finish_and_clear();
            ui::error(&format!("{}", e));
            if let Some(help) = miette::Diagnostic::help(&e) {
                ui::warning(&help.to_string());
            }
        }
    }
}
