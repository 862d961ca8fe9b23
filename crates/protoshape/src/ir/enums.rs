//! Enum intermediate representation.

use super::Access;

/// IR representation of an enum.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEnum {
    /// Name as written in the schema.
    pub name: String,

    /// Name of the generated declaration.
    pub cs_type: String,

    pub access: Access,

    /// Members in declaration order. Values are kept verbatim, duplicates and
    /// gaps included.
    pub members: Vec<EnumMember>,

    pub comments: Option<String>,
}

/// A single `name = value` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub name: String,
    pub value: i32,
    pub comment: Option<String>,
}

impl SchemaEnum {
    pub fn new(cs_type: impl Into<String>) -> Self {
        let cs_type = cs_type.into();
        Self {
            name: cs_type.clone(),
            cs_type,
            access: Access::Public,
            members: Vec::new(),
            comments: None,
        }
    }

    /// Appends a member, keeping declaration order.
    pub fn with_member(mut self, name: impl Into<String>, value: i32) -> Self {
        self.members.push(EnumMember {
            name: name.into(),
            value,
            comment: None,
        });
        self
    }
}
