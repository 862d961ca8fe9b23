//! # protoshape
//!
//! This crate turns a schema model of messages, fields and enums into C#
//! declarations: partial classes and structs with properties, optional
//! read-only `I<Name>` interfaces, and enums. Serialization code is not
//! generated.
//!
//! ## Architecture
//!
//! ```text
//! Schema documents (JSON)
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Frontend   │  Parse, resolve type references, normalize names
//! │  (doc → IR)  │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │      IR      │  Messages, fields, enums and their options
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  Interfaces, classes, enums through a scoped writer
//! │  (IR → C#)   │
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use protoshape::{Compiler, CompilerConfig, GenerationOptions};
//!
//! let config = CompilerConfig {
//!     inputs: vec!["schemas/people.json".into()],
//!     output: Some("src/Generated/People.cs".into()),
//!     format: "json".to_string(),
//!     options: GenerationOptions {
//!         generate_interfaces: true,
//!         ..GenerationOptions::default()
//!     },
//! };
//!
//! let result = Compiler::new(config).compile()?;
//! println!("{} messages written", result.messages);
//! # Ok::<(), protoshape::CompilerError>(())
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod frontend;
pub mod ir;

use std::path::PathBuf;

pub use codegen::generate;
pub use config::{CompilerConfig, GenerationOptions};
pub use diagnostic::CompilerError;

/// The main compiler struct that orchestrates the compilation pipeline.
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    /// Creates a new compiler with the given configuration.
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compiles the configured schemas into one C# file.
    ///
    /// This runs the full pipeline:
    /// 1. Resolve the output path
    /// 2. Load every input into IR
    /// 3. Generate the C# source
    /// 4. Write the output file
    ///
    /// Nothing is written unless generation succeeded for every input.
    pub fn compile(&self) -> Result<CompileResult, CompilerError> {
        let output = self.config.resolve_output_path()?;
        let schemas = self.load()?;
        let source = codegen::generate(&schemas, &self.config.options)?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CompilerError::IoError {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        std::fs::write(&output, &source).map_err(|e| CompilerError::IoError {
            path: output.clone(),
            message: e.to_string(),
        })?;

        tracing::info!(output = %output.display(), bytes = source.len(), "wrote generated code");

        Ok(CompileResult::new(&schemas, Some(output), source.len()))
    }

    /// Loads and generates without writing anything.
    pub fn check(&self) -> Result<CompileResult, CompilerError> {
        let schemas = self.load()?;
        let source = codegen::generate(&schemas, &self.config.options)?;
        Ok(CompileResult::new(&schemas, None, source.len()))
    }

    /// Loads every configured input into IR, expanding directories.
    pub fn load(&self) -> Result<Vec<ir::Schema>, CompilerError> {
        if self.config.inputs.is_empty() {
            return Err(CompilerError::NoInputs);
        }

        let mut frontend = frontend::create_frontend(&self.config.format, &self.config.options)?;
        let mut schemas = Vec::new();
        for input in &self.config.inputs {
            schemas.extend(frontend.load_path(input)?);
        }
        Ok(schemas)
    }
}

/// Result of a successful compilation.
#[derive(Debug)]
pub struct CompileResult {
    /// File the code was written to; `None` for checks.
    pub output: Option<PathBuf>,
    /// Number of schema documents loaded.
    pub schemas: usize,
    /// Number of messages, nested ones included.
    pub messages: usize,
    /// Number of enums, nested ones included.
    pub enums: usize,
    /// Size of the generated source in bytes.
    pub bytes: usize,
}

impl CompileResult {
    fn new(schemas: &[ir::Schema], output: Option<PathBuf>, bytes: usize) -> Self {
        Self {
            output,
            schemas: schemas.len(),
            messages: schemas.iter().map(ir::Schema::message_count).sum(),
            enums: schemas.iter().map(ir::Schema::enum_count).sum(),
            bytes,
        }
    }
}
