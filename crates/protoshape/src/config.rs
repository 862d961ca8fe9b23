//! Compiler configuration.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use serde::{Deserialize, Serialize};

use crate::diagnostic::CompilerError;

/// Options that shape the generated code. Read-only for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Emit an `I<Name>` interface per message and read-only interface
    /// accessors on the classes.
    pub generate_interfaces: bool,

    /// Keep names as written in the schema instead of converting them to
    /// CamelCase.
    pub preserve_names: bool,

    /// Rename properties that clash with their class or a nested class
    /// instead of failing.
    pub fix_nameclash: bool,

    /// Indent generated code with tabs rather than four spaces.
    pub use_tabs: bool,

    /// Emit a `<Name>FieldID` constant holding the wire id of every field.
    pub debug_field_ids: bool,
}

/// Configuration for the protoshape compiler.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Schema documents, or directories containing them.
    pub inputs: Vec<PathBuf>,

    /// Output file or directory. Derived from the first input when absent.
    pub output: Option<PathBuf>,

    /// Schema document format (default: "json").
    pub format: String,

    pub options: GenerationOptions,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: None,
            format: "json".to_string(),
            options: GenerationOptions::default(),
        }
    }
}

impl CompilerConfig {
    /// Resolves the path of the generated `.cs` file.
    ///
    /// - no output: the first input with its extension replaced by `.cs`
    /// - output ending in a separator or naming an existing directory: the
    ///   first input's file stem + `.cs` inside that directory
    /// - anything else is used as given
    pub fn resolve_output_path(&self) -> Result<PathBuf, CompilerError> {
        let first = self.inputs.first().ok_or(CompilerError::NoInputs)?;
        let first_cs = first.with_extension("cs");

        let Some(output) = &self.output else {
            tracing::warn!(
                output = %first_cs.display(),
                "no output path given, writing next to the first input"
            );
            return Ok(first_cs);
        };

        if is_directory_target(output) {
            let file_name = first_cs
                .file_name()
                .ok_or_else(|| CompilerError::io(first, "input has no file name"))?;
            return Ok(output.join(file_name));
        }

        Ok(output.clone())
    }
}

fn is_directory_target(path: &Path) -> bool {
    let text = path.to_string_lossy();
    text.ends_with(MAIN_SEPARATOR) || text.ends_with('/') || path.is_dir()
}
