//! C# code generation from the schema IR.
//!
//! The generator emits declarations only:
//! - Enums (top-level and nested)
//! - `I<Name>` interfaces, when enabled, as read-only views of the messages
//! - Partial classes and structs holding the message fields
//!
//! Serialization code is not generated here.

pub mod cs_types;
pub mod enums;
pub mod member;
pub mod message;
pub mod naming;
pub mod writer;

use std::collections::HashMap;

use crate::config::GenerationOptions;
use crate::diagnostic::CompilerError;
use crate::ir::{Schema, SchemaEnum, SchemaMessage};
use writer::{CodeWriter, IndentStyle};

/// Generates one C# source file from the given schema units.
///
/// Each unit becomes one `namespace` block. Within a block enums come first,
/// then interfaces (when enabled), then classes, each in declaration order.
/// The tree is checked up front so a malformed unit fails the whole run
/// instead of producing partial output.
pub fn generate(schemas: &[Schema], options: &GenerationOptions) -> Result<String, CompilerError> {
    for schema in schemas {
        check_names(schema)?;
    }
    if options.generate_interfaces {
        check_interfaces(schemas)?;
    }

    let indent = if options.use_tabs {
        IndentStyle::Tabs
    } else {
        IndentStyle::Spaces
    };
    let mut cw = CodeWriter::new(indent);

    cw.comment("Classes and structures being serialized");
    cw.blank_line();
    cw.comment("Generated by protoshape");
    cw.blank_line();
    cw.comment("DO NOT EDIT");
    cw.comment("This file will be overwritten when protoshape is run.");
    cw.blank_line();
    cw.write_line("using System;");
    cw.write_line("using System.Collections.Generic;");
    cw.blank_line();

    for schema in schemas {
        tracing::info!(
            namespace = %schema.namespace,
            messages = schema.message_count(),
            enums = schema.enum_count(),
            "generating schema unit"
        );

        if schema.namespace.is_empty() {
            emit_unit(schema, &mut cw, options);
        } else {
            let mut scope = cw.scope(&format!("namespace {}", schema.namespace));
            emit_unit(schema, &mut scope, options);
        }
        cw.blank_line();
    }

    Ok(cw.finish())
}

fn emit_unit(schema: &Schema, cw: &mut CodeWriter, options: &GenerationOptions) {
    for schema_enum in &schema.enums {
        enums::emit_enum(schema_enum, cw);
    }

    if options.generate_interfaces {
        for root in &schema.messages {
            message::emit_interface(root, cw);
            cw.blank_line();
        }
    }

    for root in &schema.messages {
        message::emit_class(root, cw, options);
        cw.blank_line();
    }
}

/// Rejects empty names anywhere in the unit.
fn check_names(schema: &Schema) -> Result<(), CompilerError> {
    for schema_enum in &schema.enums {
        check_enum(schema_enum, &schema.namespace)?;
    }
    for root in &schema.messages {
        check_message(root, &schema.namespace)?;
    }
    Ok(())
}

fn check_message(message: &SchemaMessage, scope: &str) -> Result<(), CompilerError> {
    if message.cs_type.is_empty() {
        return Err(CompilerError::empty_name(format!("message in '{}'", scope)));
    }
    let path = qualified(scope, &message.cs_type);

    for field in &message.fields {
        if field.cs_name.is_empty() || field.interface_name.is_empty() {
            return Err(CompilerError::empty_name(format!(
                "field {} of message '{}'",
                field.id, path
            )));
        }
    }
    for nested in &message.enums {
        check_enum(nested, &path)?;
    }
    for nested in &message.messages {
        check_message(nested, &path)?;
    }
    Ok(())
}

/// Rejects two messages that would share one `I<Name>` interface.
///
/// Interfaces of nested messages are written at namespace level, so
/// messages with equal names under different parents collide.
fn check_interfaces(schemas: &[Schema]) -> Result<(), CompilerError> {
    let mut seen = HashMap::new();
    for schema in schemas {
        for root in &schema.messages {
            claim_interface(root, &schema.namespace, &schema.namespace, &mut seen)?;
        }
    }
    Ok(())
}

fn claim_interface(
    message: &SchemaMessage,
    namespace: &str,
    scope: &str,
    seen: &mut HashMap<(String, String), String>,
) -> Result<(), CompilerError> {
    let path = qualified(scope, &message.cs_type);
    let interface = message.interface_type();

    if let Some(first) = seen.insert((namespace.to_string(), interface.clone()), path.clone()) {
        return Err(CompilerError::DuplicateInterface {
            namespace: namespace.to_string(),
            interface,
            first,
            second: path,
        });
    }

    // Nested messages of an external message are not emitted.
    if message.options.external {
        return Ok(());
    }
    for nested in &message.messages {
        claim_interface(nested, namespace, &path, seen)?;
    }
    Ok(())
}

fn check_enum(schema_enum: &SchemaEnum, scope: &str) -> Result<(), CompilerError> {
    if schema_enum.cs_type.is_empty() {
        return Err(CompilerError::empty_name(format!("enum in '{}'", scope)));
    }
    if schema_enum.members.iter().any(|m| m.name.is_empty()) {
        return Err(CompilerError::empty_name(format!(
            "member of enum '{}'",
            qualified(scope, &schema_enum.cs_type)
        )));
    }
    Ok(())
}

fn qualified(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", scope, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{FieldType, Scalar, SchemaField};

    fn unit() -> Schema {
        let mut schema = Schema::new("Example");
        schema.enums.push(SchemaEnum::new("Color").with_member("Red", 0));
        schema.messages.push(
            SchemaMessage::new("Person")
                .with_field(SchemaField::new(1, "Name", FieldType::Scalar(Scalar::String))),
        );
        schema
    }

    #[test]
    fn test_file_layout() {
        let options = GenerationOptions {
            generate_interfaces: true,
            ..GenerationOptions::default()
        };
        let output = generate(&[unit()], &options).unwrap();

        let body = output
            .split_once("using System.Collections.Generic;\n\n")
            .map(|(_, body)| body)
            .unwrap();
        assert_eq!(
            body,
            concat!(
                "namespace Example\n",
                "{\n",
                "    public enum Color\n",
                "    {\n",
                "        Red = 0,\n",
                "    }\n",
                "\n",
                "    public partial interface IPerson\n",
                "    {\n",
                "        string Name { get; }\n",
                "    }\n",
                "\n",
                "    public partial class Person : IPerson\n",
                "    {\n",
                "        public string Name { get; set; }\n",
                "    }\n",
                "\n",
                "}\n",
                "\n",
            )
        );
    }

    #[test]
    fn test_global_namespace_and_tabs() {
        let mut schema = unit();
        schema.namespace.clear();
        let options = GenerationOptions {
            use_tabs: true,
            ..GenerationOptions::default()
        };
        let output = generate(&[schema], &options).unwrap();
        assert!(!output.contains("namespace"));
        assert!(output.contains("public partial class Person\n{\n\tpublic string Name { get; set; }\n}\n"));
    }

    #[test]
    fn test_empty_field_name_aborts() {
        let mut schema = unit();
        schema.messages[0].fields[0].cs_name.clear();

        let err = generate(&[schema], &GenerationOptions::default()).unwrap_err();
        match err {
            CompilerError::EmptyName { context } => {
                assert_eq!(context, "field 1 of message 'Example.Person'");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn nested_items() -> Schema {
        let item = |field: SchemaField| SchemaMessage::new("Item").with_field(field);
        let mut schema = Schema::new("P");
        schema.messages.push(
            SchemaMessage::new("A")
                .with_message(item(SchemaField::new(1, "N", FieldType::Scalar(Scalar::Int32)))),
        );
        schema.messages.push(
            SchemaMessage::new("B")
                .with_message(item(SchemaField::new(1, "S", FieldType::Scalar(Scalar::String)))),
        );
        schema
    }

    #[test]
    fn test_shared_nested_interface_name_rejected() {
        let options = GenerationOptions {
            generate_interfaces: true,
            ..GenerationOptions::default()
        };

        let err = generate(&[nested_items()], &options).unwrap_err();
        match err {
            CompilerError::DuplicateInterface { namespace, interface, first, second } => {
                assert_eq!(namespace, "P");
                assert_eq!(interface, "IItem");
                assert_eq!(first, "P.A.Item");
                assert_eq!(second, "P.B.Item");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_shared_nested_name_without_interfaces() {
        let output = generate(&[nested_items()], &GenerationOptions::default()).unwrap();
        assert_eq!(output.matches("public partial class Item").count(), 2);
    }

    #[test]
    fn test_generation_is_idempotent() {
        let options = GenerationOptions {
            generate_interfaces: true,
            debug_field_ids: true,
            ..GenerationOptions::default()
        };
        let first = generate(&[unit()], &options).unwrap();
        let second = generate(&[unit()], &options).unwrap();
        assert_eq!(first, second);
    }
}
