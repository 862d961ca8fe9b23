//! C# type resolution for schema fields.

use crate::ir::{FieldType, Scalar, SchemaField};

/// The two surface types of a field's declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Type of the concrete member on the generated class.
    pub implementation: String,
    /// Type exposed through the generated interface.
    pub interface: String,
}

impl ResolvedType {
    /// True when the class member cannot satisfy the interface member by
    /// itself.
    pub fn diverges(&self) -> bool {
        self.implementation != self.interface
    }
}

/// Resolves the implementation and interface types of a declared type.
///
/// Only messages diverge: the class refers to the concrete message type and
/// the interface to its `I<Name>` interface.
pub fn resolve(field_type: &FieldType) -> ResolvedType {
    match field_type {
        FieldType::Scalar(scalar) => {
            let name = scalar_cs_type(*scalar).to_string();
            ResolvedType {
                implementation: name.clone(),
                interface: name,
            }
        }
        FieldType::Enum(path) => {
            let name = path.full_name();
            ResolvedType {
                implementation: name.clone(),
                interface: name,
            }
        }
        FieldType::Message { path, .. } => ResolvedType {
            implementation: path.full_name(),
            interface: path.full_interface_name(),
        },
    }
}

/// Type of the implementation member: the override if present, otherwise the
/// resolved type, as a `List<T>` when repeated.
pub fn implementation_type(field: &SchemaField) -> String {
    let element = match &field.options.code_type {
        Some(code_type) => code_type.clone(),
        None => resolve(&field.field_type).implementation,
    };
    if field.is_repeated() {
        format!("List<{}>", element)
    } else {
        element
    }
}

/// Type of the read-only interface member: the override if present,
/// otherwise the resolved interface type, as an `IEnumerable<T>` when
/// repeated.
pub fn interface_type(field: &SchemaField) -> String {
    let element = match &field.options.code_type {
        Some(code_type) => code_type.clone(),
        None => resolve(&field.field_type).interface,
    };
    if field.is_repeated() {
        format!("IEnumerable<{}>", element)
    } else {
        element
    }
}

/// Converts a schema scalar to its C# type.
pub fn scalar_cs_type(scalar: Scalar) -> &'static str {
    match scalar {
        Scalar::Double => "double",
        Scalar::Float => "float",
        Scalar::Int32 | Scalar::SInt32 | Scalar::SFixed32 => "int",
        Scalar::Int64 | Scalar::SInt64 | Scalar::SFixed64 => "long",
        Scalar::UInt32 | Scalar::Fixed32 => "uint",
        Scalar::UInt64 | Scalar::Fixed64 => "ulong",
        Scalar::Bool => "bool",
        Scalar::String => "string",
        Scalar::Bytes => "byte[]",
    }
}
