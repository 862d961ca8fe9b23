//! In-memory schema model.
//!
//! This IR is produced by schema frontends and consumed by the declaration
//! emitter. It is built once per compilation unit and never mutated while
//! code is being generated.

mod enums;
mod field;
mod message;

pub use enums::{EnumMember, SchemaEnum};
pub use field::{FieldOptions, FieldRule, FieldType, Scalar, SchemaField, TypePath};
pub use message::{MessageOptions, SchemaMessage};

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Access modifier placed in front of generated declarations and members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Access::Public => "public",
            Access::Internal => "internal",
            Access::Protected => "protected",
            Access::Private => "private",
        };
        f.write_str(keyword)
    }
}

/// Structural kind of a generated message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructKind {
    /// Reference type (`class`).
    #[default]
    Class,
    /// Value type (`struct`).
    Struct,
}

impl fmt::Display for StructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructKind::Class => f.write_str("class"),
            StructKind::Struct => f.write_str("struct"),
        }
    }
}

/// One compilation unit: everything loaded from a single schema document.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Target namespace. Empty means the global namespace.
    pub namespace: String,

    /// Enums declared at the top level of the document.
    pub enums: Vec<SchemaEnum>,

    /// Root messages in declaration order.
    pub messages: Vec<SchemaMessage>,

    /// Document the unit was loaded from, if any.
    pub source_path: Option<PathBuf>,
}

impl Schema {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            enums: Vec::new(),
            messages: Vec::new(),
            source_path: None,
        }
    }

    /// Number of messages in the unit, nested ones included.
    pub fn message_count(&self) -> usize {
        self.messages.iter().map(SchemaMessage::message_count).sum()
    }

    /// Number of enums in the unit, nested ones included.
    pub fn enum_count(&self) -> usize {
        self.enums.len()
            + self
                .messages
                .iter()
                .map(SchemaMessage::enum_count)
                .sum::<usize>()
    }
}
