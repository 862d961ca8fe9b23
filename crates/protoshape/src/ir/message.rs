//! Message intermediate representation.

use super::{Access, SchemaEnum, SchemaField, StructKind};

/// Per-message options.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessageOptions {
    pub access: Access,
    pub kind: StructKind,

    /// Declaration is written by hand elsewhere; only a stub is emitted.
    pub external: bool,

    /// Keep values of fields unknown to this schema version.
    pub preserve_unknown: bool,

    /// Emit serialization hook stubs.
    pub triggers: bool,
}

/// IR representation of a message.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaMessage {
    /// Name as written in the schema.
    pub name: String,

    /// Name of the generated declaration.
    pub cs_type: String,

    pub options: MessageOptions,
    pub comments: Option<String>,

    /// Fields in declaration order.
    pub fields: Vec<SchemaField>,

    /// Nested enums in declaration order.
    pub enums: Vec<SchemaEnum>,

    /// Nested messages in declaration order.
    pub messages: Vec<SchemaMessage>,
}

impl SchemaMessage {
    pub fn new(cs_type: impl Into<String>) -> Self {
        let cs_type = cs_type.into();
        Self {
            name: cs_type.clone(),
            cs_type,
            options: MessageOptions::default(),
            comments: None,
            fields: Vec::new(),
            enums: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: SchemaField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_enum(mut self, nested: SchemaEnum) -> Self {
        self.enums.push(nested);
        self
    }

    pub fn with_message(mut self, nested: SchemaMessage) -> Self {
        self.messages.push(nested);
        self
    }

    /// Name of the interface generated for this message.
    pub fn interface_type(&self) -> String {
        format!("I{}", self.cs_type)
    }

    /// This message plus every message nested below it.
    pub fn message_count(&self) -> usize {
        1 + self
            .messages
            .iter()
            .map(SchemaMessage::message_count)
            .sum::<usize>()
    }

    /// Enums declared in this message or any message nested below it.
    pub fn enum_count(&self) -> usize {
        self.enums.len()
            + self
                .messages
                .iter()
                .map(SchemaMessage::enum_count)
                .sum::<usize>()
    }
}
