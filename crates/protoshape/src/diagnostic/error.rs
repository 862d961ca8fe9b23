//! Compiler error types.

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Error, Diagnostic, Debug)]
pub enum CompilerError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to access '{}': {message}", path.display())]
    #[diagnostic(code(protoshape::io::access_failed))]
    IoError {
        path: PathBuf,
        message: String,
    },

    #[error("No schema inputs given")]
    #[diagnostic(
        code(protoshape::io::no_inputs),
        help("Pass at least one schema document or a directory containing them")
    )]
    NoInputs,

    // =========================================================================
    // Schema Document Errors
    // =========================================================================
    #[error("Failed to parse schema document '{}' at line {line}, column {column}: {message}", path.display())]
    #[diagnostic(code(protoshape::schema::parse_failed))]
    SchemaParse {
        path: PathBuf,
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Unsupported schema format: {format}")]
    #[diagnostic(
        code(protoshape::schema::unsupported_format),
        help("Supported formats: json")
    )]
    UnsupportedFormat {
        format: String,
    },

    // =========================================================================
    // Model Errors
    // =========================================================================
    #[error("Empty name in {context}")]
    #[diagnostic(
        code(protoshape::model::empty_name),
        help("Every message, field and enum needs a non-empty name")
    )]
    EmptyName {
        context: String,
    },

    #[error("Field id {id} is used more than once in message '{message}'")]
    #[diagnostic(code(protoshape::model::duplicate_field_id))]
    DuplicateFieldId {
        message: String,
        id: u32,
    },

    #[error("Enum '{enum_name}' declares member '{member}' more than once")]
    #[diagnostic(code(protoshape::model::duplicate_enum_member))]
    DuplicateEnumMember {
        enum_name: String,
        member: String,
    },

    #[error("Unknown type '{type_name}' for field '{message}.{field}'")]
    #[diagnostic(
        code(protoshape::model::unknown_type),
        help("Use a scalar keyword or the name of a message or enum declared in the same document")
    )]
    UnknownTypeReference {
        message: String,
        field: String,
        type_name: String,
    },

    #[error("Member '{field}' clashes with a type name or another member in message '{message}'")]
    #[diagnostic(
        code(protoshape::model::name_clash),
        help("Rename the field or pass --fix-nameclash to append '_' to clashing members")
    )]
    NameClash {
        message: String,
        field: String,
    },

    #[error("Interface '{interface}' in namespace '{namespace}' is declared for both '{first}' and '{second}'")]
    #[diagnostic(
        code(protoshape::model::duplicate_interface),
        help("Interfaces of nested messages are placed at namespace level; rename one of the messages")
    )]
    DuplicateInterface {
        namespace: String,
        interface: String,
        first: String,
        second: String,
    },
}

impl CompilerError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an empty-name error for the given location.
    pub fn empty_name(context: impl Into<String>) -> Self {
        Self::EmptyName {
            context: context.into(),
        }
    }
}
