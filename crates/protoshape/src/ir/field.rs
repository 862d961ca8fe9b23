//! Field intermediate representation.

use super::{Access, StructKind};

/// Cardinality of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldRule {
    #[default]
    Singular,
    Repeated,
}

/// Built-in scalar types of the schema language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Double,
    Float,
    Int32,
    Int64,
    UInt32,
    UInt64,
    SInt32,
    SInt64,
    Fixed32,
    Fixed64,
    SFixed32,
    SFixed64,
    Bool,
    String,
    Bytes,
}

impl Scalar {
    /// Looks up a scalar by its schema keyword (`int32`, `string`, ...).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let scalar = match keyword {
            "double" => Scalar::Double,
            "float" => Scalar::Float,
            "int32" => Scalar::Int32,
            "int64" => Scalar::Int64,
            "uint32" => Scalar::UInt32,
            "uint64" => Scalar::UInt64,
            "sint32" => Scalar::SInt32,
            "sint64" => Scalar::SInt64,
            "fixed32" => Scalar::Fixed32,
            "fixed64" => Scalar::Fixed64,
            "sfixed32" => Scalar::SFixed32,
            "sfixed64" => Scalar::SFixed64,
            "bool" => Scalar::Bool,
            "string" => Scalar::String,
            "bytes" => Scalar::Bytes,
            _ => return None,
        };
        Some(scalar)
    }
}

/// Location of a generated message or enum: its namespace plus the chain of
/// enclosing type names, ending with the type's own name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypePath {
    pub namespace: String,
    pub path: Vec<String>,
}

impl TypePath {
    pub fn new(namespace: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path,
        }
    }

    /// The type's own (innermost) name.
    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    /// Fully qualified name of the generated declaration.
    pub fn full_name(&self) -> String {
        self.qualify(&self.path.join("."))
    }

    /// Fully qualified name of the interface generated for a message.
    ///
    /// Interfaces are emitted as siblings at namespace level, so enclosing
    /// types do not appear in the name.
    pub fn full_interface_name(&self) -> String {
        self.qualify(&format!("I{}", self.name()))
    }

    fn qualify(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.namespace, name)
        }
    }
}

/// Declared type of a field, already resolved by the frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Scalar(Scalar),
    Message { path: TypePath, kind: StructKind },
    Enum(TypePath),
}

impl FieldType {
    /// True for fields whose type is a value-type (`struct`) message.
    pub fn is_value_message(&self) -> bool {
        matches!(
            self,
            FieldType::Message {
                kind: StructKind::Struct,
                ..
            }
        )
    }
}

/// Per-field options.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldOptions {
    pub access: Access,

    /// Member is written by hand elsewhere; only documented here.
    pub external: bool,

    /// Member is initialized in place and cannot be reassigned.
    pub read_only: bool,

    /// Replaces the resolved type entirely when present.
    pub code_type: Option<String>,
}

/// IR representation of a message field.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    /// Wire id, unique within the owning message.
    pub id: u32,

    /// Name as written in the schema.
    pub name: String,

    /// Name of the implementation member.
    pub cs_name: String,

    /// Name of the read-only interface member when it cannot share
    /// `cs_name`.
    pub interface_name: String,

    pub field_type: FieldType,
    pub rule: FieldRule,
    pub options: FieldOptions,
    pub comments: Option<String>,
}

impl SchemaField {
    /// Creates a singular public field whose names all equal `cs_name`.
    pub fn new(id: u32, cs_name: impl Into<String>, field_type: FieldType) -> Self {
        let cs_name = cs_name.into();
        Self {
            id,
            name: cs_name.clone(),
            interface_name: cs_name.clone(),
            cs_name,
            field_type,
            rule: FieldRule::Singular,
            options: FieldOptions::default(),
            comments: None,
        }
    }

    pub fn is_repeated(&self) -> bool {
        self.rule == FieldRule::Repeated
    }
}
