//! Schema frontends that load documents into the IR.
//!
//! Each frontend is responsible for:
//! 1. Reading schema documents in its format
//! 2. Resolving type references and normalizing names into the IR
//!
//! The emitter only ever sees the resulting, already validated tree.

pub mod json;

use std::path::Path;
use walkdir::WalkDir;

use crate::config::GenerationOptions;
use crate::diagnostic::CompilerError;
use crate::ir::Schema;

/// Naming toggles applied while building the IR.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NamingPolicy {
    /// Keep identifiers as written instead of converting them to CamelCase.
    pub preserve_names: bool,
    /// Append `_` to properties that clash with a type name instead of
    /// failing.
    pub fix_nameclash: bool,
}

impl From<&GenerationOptions> for NamingPolicy {
    fn from(options: &GenerationOptions) -> Self {
        Self {
            preserve_names: options.preserve_names,
            fix_nameclash: options.fix_nameclash,
        }
    }
}

/// Trait for schema frontends.
pub trait Frontend {
    /// Returns the format name (e.g., "json").
    fn format(&self) -> &str;

    /// Returns file extensions this frontend handles (e.g., ["json"]).
    fn extensions(&self) -> &[&str];

    /// Loads a single schema document.
    fn load_file(&mut self, path: &Path) -> Result<Schema, CompilerError>;

    /// Loads a schema document, or every matching document below a
    /// directory in file-name order.
    fn load_path(&mut self, path: &Path) -> Result<Vec<Schema>, CompilerError> {
        if !path.is_dir() {
            return Ok(vec![self.load_file(path)?]);
        }

        let mut schemas = Vec::new();
        for entry in WalkDir::new(path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let file = entry.path();
            if !file.is_file() {
                continue;
            }
            let matches = file
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| self.extensions().contains(&ext))
                .unwrap_or(false);
            if matches {
                tracing::debug!(path = %file.display(), "loading schema document");
                schemas.push(self.load_file(file)?);
            }
        }
        Ok(schemas)
    }
}

/// Creates a frontend for the given format.
pub fn create_frontend(
    format: &str,
    options: &GenerationOptions,
) -> Result<Box<dyn Frontend>, CompilerError> {
    match format {
        "json" => Ok(Box::new(json::JsonFrontend::new(NamingPolicy::from(options)))),
        _ => Err(CompilerError::UnsupportedFormat {
            format: format.to_string(),
        }),
    }
}
