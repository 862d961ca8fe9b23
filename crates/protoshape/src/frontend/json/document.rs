//! Serde types for JSON schema documents.
//!
//! ```json
//! {
//!   "package": "example.people",
//!   "enums": [{ "name": "color", "values": [{ "name": "Red", "value": 0 }] }],
//!   "messages": [{
//!     "name": "person",
//!     "comment": "A person in the address book.",
//!     "options": { "type": "class", "preserve_unknown": true },
//!     "fields": [
//!       { "id": 1, "name": "name", "type": "string" },
//!       { "id": 2, "name": "phones", "type": "phone_number", "rule": "repeated" }
//!     ],
//!     "messages": [{ "name": "phone_number", "fields": [] }]
//!   }]
//! }
//! ```

use serde::Deserialize;

use crate::ir::{Access, StructKind};

/// Root of a schema document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    /// Dot-separated package, mapped to the target namespace.
    #[serde(default)]
    pub package: String,

    #[serde(default)]
    pub enums: Vec<EnumDoc>,

    #[serde(default)]
    pub messages: Vec<MessageDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageDoc {
    pub name: String,

    #[serde(default)]
    pub comment: Option<String>,

    #[serde(default)]
    pub options: MessageOptionsDoc,

    #[serde(default)]
    pub fields: Vec<FieldDoc>,

    #[serde(default)]
    pub enums: Vec<EnumDoc>,

    #[serde(default)]
    pub messages: Vec<MessageDoc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MessageOptionsDoc {
    pub access: Access,

    #[serde(rename = "type")]
    pub kind: StructKind,

    pub external: bool,
    pub preserve_unknown: bool,
    pub triggers: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDoc {
    pub id: u32,
    pub name: String,

    /// Scalar keyword or the name of a message or enum.
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub rule: RuleDoc,

    #[serde(default)]
    pub comment: Option<String>,

    #[serde(default)]
    pub options: FieldOptionsDoc,
}

/// Field label as written in the schema. `required` and `optional` both
/// describe a singular field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleDoc {
    Required,
    #[default]
    Optional,
    Repeated,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldOptionsDoc {
    pub access: Access,
    pub external: bool,

    #[serde(rename = "readonly")]
    pub read_only: bool,

    #[serde(rename = "codetype")]
    pub code_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumDoc {
    pub name: String,

    #[serde(default)]
    pub comment: Option<String>,

    #[serde(default)]
    pub access: Access,

    #[serde(default)]
    pub values: Vec<EnumValueDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumValueDoc {
    pub name: String,
    pub value: i32,

    #[serde(default)]
    pub comment: Option<String>,
}
