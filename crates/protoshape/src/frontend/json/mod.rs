//! JSON schema document frontend.

pub mod document;
pub mod to_ir;

use std::path::Path;

use crate::diagnostic::CompilerError;
use crate::ir::Schema;
use super::{Frontend, NamingPolicy};
use document::SchemaDocument;

/// JSON frontend implementation.
pub struct JsonFrontend {
    policy: NamingPolicy,
}

impl JsonFrontend {
    /// Creates a new JSON frontend.
    pub fn new(policy: NamingPolicy) -> Self {
        Self { policy }
    }

    /// Parses a schema document held in memory. `path` is only used for
    /// diagnostics.
    pub fn parse_str(&self, source: &str, path: &Path) -> Result<Schema, CompilerError> {
        let document: SchemaDocument =
            serde_json::from_str(source).map_err(|e| CompilerError::SchemaParse {
                path: path.to_path_buf(),
                message: e.to_string(),
                line: e.line(),
                column: e.column(),
            })?;

        to_ir::to_ir(&document, self.policy, Some(path.to_path_buf()))
    }
}

impl Frontend for JsonFrontend {
    fn format(&self) -> &str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn load_file(&mut self, path: &Path) -> Result<Schema, CompilerError> {
        let source = std::fs::read_to_string(path).map_err(|e| CompilerError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        self.parse_str(&source, path)
    }
}
