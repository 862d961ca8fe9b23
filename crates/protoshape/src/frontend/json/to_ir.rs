//! Conversion from a parsed schema document to the IR.
//!
//! Runs in two passes: the first records every message and enum under its
//! schema path, the second builds the IR and resolves field types against
//! those records, innermost scope first.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use super::document::{EnumDoc, FieldDoc, MessageDoc, RuleDoc, SchemaDocument};
use crate::codegen::member::MemberKey;
use crate::codegen::naming::to_camel_case;
use crate::diagnostic::CompilerError;
use crate::frontend::NamingPolicy;
use crate::ir::{
    EnumMember, FieldOptions, FieldRule, FieldType, MessageOptions, Scalar, Schema, SchemaEnum,
    SchemaField, SchemaMessage, StructKind, TypePath,
};

/// Member generated for messages that preserve unknown fields.
const PRESERVED_FIELDS: &str = "PreservedFields";

/// A declared message or enum.
#[derive(Debug, Clone)]
struct Symbol {
    /// Generated names of the enclosing types and the type itself.
    cs_path: Vec<String>,
    kind: SymbolKind,
}

#[derive(Debug, Clone, Copy)]
enum SymbolKind {
    Message(StructKind),
    Enum,
}

/// Converts a parsed document into a schema unit.
pub fn to_ir(
    document: &SchemaDocument,
    policy: NamingPolicy,
    source_path: Option<PathBuf>,
) -> Result<Schema, CompilerError> {
    let mut converter = Converter {
        policy,
        package: document.package.clone(),
        namespace: String::new(),
        symbols: HashMap::new(),
    };
    converter.namespace = converter.convert_namespace(&document.package)?;
    converter.collect(document)?;

    let mut schema = Schema::new(converter.namespace.clone());
    schema.source_path = source_path;

    for enum_doc in &document.enums {
        schema.enums.push(converter.convert_enum(enum_doc)?);
    }
    for message_doc in &document.messages {
        schema
            .messages
            .push(converter.convert_message(message_doc, &[], &[])?);
    }

    Ok(schema)
}

struct Converter {
    policy: NamingPolicy,
    package: String,
    namespace: String,
    /// Keyed by schema path: enclosing message names, then the type name.
    symbols: HashMap<Vec<String>, Symbol>,
}

impl Converter {
    fn convert_name(&self, name: &str) -> Result<String, CompilerError> {
        if self.policy.preserve_names {
            if name.is_empty() {
                return Err(CompilerError::empty_name("schema identifier"));
            }
            Ok(name.to_string())
        } else {
            to_camel_case(name)
        }
    }

    fn convert_namespace(&self, package: &str) -> Result<String, CompilerError> {
        if package.is_empty() {
            return Ok(String::new());
        }
        let parts = package
            .split('.')
            .map(|part| self.convert_name(part))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join("."))
    }

    // ---------------------------------------------------------------------
    // Pass 1: symbols
    // ---------------------------------------------------------------------

    fn collect(&mut self, document: &SchemaDocument) -> Result<(), CompilerError> {
        for enum_doc in &document.enums {
            self.insert_enum(enum_doc, &[], &[])?;
        }
        for message_doc in &document.messages {
            self.collect_message(message_doc, &[], &[])?;
        }
        Ok(())
    }

    fn insert_enum(
        &mut self,
        enum_doc: &EnumDoc,
        scope: &[String],
        cs_scope: &[String],
    ) -> Result<(), CompilerError> {
        let cs_name = self.convert_name(&enum_doc.name)?;
        self.symbols.insert(
            extend(scope, &enum_doc.name),
            Symbol {
                cs_path: extend(cs_scope, &cs_name),
                kind: SymbolKind::Enum,
            },
        );
        Ok(())
    }

    fn collect_message(
        &mut self,
        message_doc: &MessageDoc,
        scope: &[String],
        cs_scope: &[String],
    ) -> Result<(), CompilerError> {
        let cs_name = self.convert_name(&message_doc.name)?;
        let path = extend(scope, &message_doc.name);
        let cs_path = extend(cs_scope, &cs_name);

        self.symbols.insert(
            path.clone(),
            Symbol {
                cs_path: cs_path.clone(),
                kind: SymbolKind::Message(message_doc.options.kind),
            },
        );

        for enum_doc in &message_doc.enums {
            self.insert_enum(enum_doc, &path, &cs_path)?;
        }
        for nested in &message_doc.messages {
            self.collect_message(nested, &path, &cs_path)?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Pass 2: IR
    // ---------------------------------------------------------------------

    fn convert_enum(&self, enum_doc: &EnumDoc) -> Result<SchemaEnum, CompilerError> {
        let cs_type = self.convert_name(&enum_doc.name)?;

        let mut seen = HashSet::new();
        let mut members = Vec::with_capacity(enum_doc.values.len());
        for value in &enum_doc.values {
            if value.name.is_empty() {
                return Err(CompilerError::empty_name(format!(
                    "member of enum '{}'",
                    enum_doc.name
                )));
            }
            if !seen.insert(value.name.as_str()) {
                return Err(CompilerError::DuplicateEnumMember {
                    enum_name: enum_doc.name.clone(),
                    member: value.name.clone(),
                });
            }
            members.push(EnumMember {
                name: value.name.clone(),
                value: value.value,
                comment: value.comment.clone(),
            });
        }

        Ok(SchemaEnum {
            name: enum_doc.name.clone(),
            cs_type,
            access: enum_doc.access,
            members,
            comments: enum_doc.comment.clone(),
        })
    }

    fn convert_message(
        &self,
        message_doc: &MessageDoc,
        scope: &[String],
        cs_scope: &[String],
    ) -> Result<SchemaMessage, CompilerError> {
        let cs_type = self.convert_name(&message_doc.name)?;
        let path = extend(scope, &message_doc.name);
        let cs_path = extend(cs_scope, &cs_type);

        let enums = message_doc
            .enums
            .iter()
            .map(|e| self.convert_enum(e))
            .collect::<Result<Vec<_>, _>>()?;
        let messages = message_doc
            .messages
            .iter()
            .map(|m| self.convert_message(m, &path, &cs_path))
            .collect::<Result<Vec<_>, _>>()?;

        // Member names may not repeat the class name or a nested type name.
        let mut type_names: HashSet<&str> = HashSet::new();
        type_names.insert(cs_type.as_str());
        type_names.extend(messages.iter().map(|m| m.cs_type.as_str()));
        type_names.extend(enums.iter().map(|e| e.cs_type.as_str()));

        // Every member the class and interface will declare, so generated
        // names stay unique.
        let mut members: HashSet<String> = HashSet::new();
        if message_doc.options.preserve_unknown {
            members.insert(PRESERVED_FIELDS.to_string());
        }

        let mut ids = HashSet::new();
        let mut fields = Vec::with_capacity(message_doc.fields.len());
        for field_doc in &message_doc.fields {
            if !ids.insert(field_doc.id) {
                return Err(CompilerError::DuplicateFieldId {
                    message: cs_path.join("."),
                    id: field_doc.id,
                });
            }
            fields.push(self.convert_field(field_doc, &path, &cs_path, &type_names, &mut members)?);
        }

        Ok(SchemaMessage {
            name: message_doc.name.clone(),
            cs_type,
            options: MessageOptions {
                access: message_doc.options.access,
                kind: message_doc.options.kind,
                external: message_doc.options.external,
                preserve_unknown: message_doc.options.preserve_unknown,
                triggers: message_doc.options.triggers,
            },
            comments: message_doc.comment.clone(),
            fields,
            enums,
            messages,
        })
    }

    fn convert_field(
        &self,
        field_doc: &FieldDoc,
        scope: &[String],
        cs_scope: &[String],
        type_names: &HashSet<&str>,
        members: &mut HashSet<String>,
    ) -> Result<SchemaField, CompilerError> {
        let cs_name = self.convert_name(&field_doc.name)?;
        let cs_name = self.claim_member(cs_name, cs_scope, type_names, members)?;

        let field_type = self
            .resolve_type(&field_doc.type_name, scope)
            .ok_or_else(|| CompilerError::UnknownTypeReference {
                message: cs_scope.join("."),
                field: field_doc.name.clone(),
                type_name: field_doc.type_name.clone(),
            })?;

        let mut field = SchemaField::new(field_doc.id, cs_name, field_type);
        field.name = field_doc.name.clone();
        field.rule = match field_doc.rule {
            RuleDoc::Repeated => FieldRule::Repeated,
            RuleDoc::Required | RuleDoc::Optional => FieldRule::Singular,
        };
        field.options = FieldOptions {
            access: field_doc.options.access,
            external: field_doc.options.external,
            read_only: field_doc.options.read_only,
            code_type: field_doc.options.code_type.clone(),
        };
        field.comments = field_doc.comment.clone();

        if MemberKey::of(&field).needs_interface_name() {
            let view = format!("{}View", field.cs_name);
            field.interface_name = self.claim_member(view, cs_scope, type_names, members)?;
        }

        Ok(field)
    }

    /// Reserves a member name in the message at `cs_scope`.
    ///
    /// A name equal to the class, a nested type or an earlier member is a
    /// clash: it fails, or with `fix_nameclash` gets `_` appended until it
    /// is unique.
    fn claim_member(
        &self,
        mut name: String,
        cs_scope: &[String],
        type_names: &HashSet<&str>,
        members: &mut HashSet<String>,
    ) -> Result<String, CompilerError> {
        while type_names.contains(name.as_str()) || members.contains(&name) {
            if !self.policy.fix_nameclash {
                return Err(CompilerError::NameClash {
                    message: cs_scope.join("."),
                    field: name,
                });
            }
            tracing::debug!(member = %name, message = %cs_scope.join("."), "renaming clashing member");
            name.push('_');
        }
        members.insert(name.clone());
        Ok(name)
    }

    /// Resolves a type name seen inside the message at `scope`.
    ///
    /// Scalars win; then the name is looked up relative to the enclosing
    /// scope and each outer scope in turn. A leading `.` or the document's
    /// package prefix makes the lookup absolute.
    fn resolve_type(&self, type_name: &str, scope: &[String]) -> Option<FieldType> {
        if let Some(scalar) = Scalar::from_keyword(type_name) {
            return Some(FieldType::Scalar(scalar));
        }

        if let Some(absolute) = type_name.strip_prefix('.') {
            let absolute = self.strip_package(absolute).unwrap_or(absolute);
            return self.lookup(absolute, &[]);
        }

        for depth in (0..=scope.len()).rev() {
            if let Some(found) = self.lookup(type_name, &scope[..depth]) {
                return Some(found);
            }
        }

        self.strip_package(type_name)
            .and_then(|relative| self.lookup(relative, &[]))
    }

    fn strip_package<'n>(&self, name: &'n str) -> Option<&'n str> {
        if self.package.is_empty() {
            return None;
        }
        name.strip_prefix(self.package.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
    }

    fn lookup(&self, name: &str, scope: &[String]) -> Option<FieldType> {
        let mut key = scope.to_vec();
        key.extend(name.split('.').map(str::to_string));

        let symbol = self.symbols.get(&key)?;
        let path = TypePath::new(self.namespace.clone(), symbol.cs_path.clone());
        Some(match symbol.kind {
            SymbolKind::Message(kind) => FieldType::Message { path, kind },
            SymbolKind::Enum => FieldType::Enum(path),
        })
    }
}

fn extend(scope: &[String], name: &str) -> Vec<String> {
    let mut path = scope.to_vec();
    path.push(name.to_string());
    path
}
