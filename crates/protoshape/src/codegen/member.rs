//! Member shape selection and rendering.
//!
//! Every field is classified by a [`MemberKey`] and mapped through
//! [`plan_member`] to exactly one [`MemberPlan`]. The mapping is a total
//! match over the key so each combination of options has one defined shape.

use super::cs_types::{implementation_type, interface_type, resolve};
use crate::ir::SchemaField;

/// Suffix of member lines that document a hand-written member.
const EXTERNAL_SUFFIX: &str = " // Implemented by user elsewhere";

/// The option flags that decide a member's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberKey {
    pub external: bool,
    pub read_only: bool,
    /// Declared type is a `struct` message.
    pub value_type: bool,
    pub repeated: bool,
    /// Implementation and interface types differ. Computed on the declared
    /// type; a code-type override does not change it.
    pub diverges: bool,
}

impl MemberKey {
    pub fn of(field: &SchemaField) -> Self {
        Self {
            external: field.options.external,
            read_only: field.options.read_only,
            value_type: field.field_type.is_value_message(),
            repeated: field.is_repeated(),
            diverges: resolve(&field.field_type).diverges(),
        }
    }

    /// Whether the interface member needs its own name instead of sharing
    /// the implementation member's.
    pub fn needs_interface_name(&self) -> bool {
        self.repeated || self.diverges
    }
}

/// Shape of the implementation member on a generated class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberVariant {
    /// `readonly T Name = new T();`
    ReadOnly,
    /// `T Name;`
    Inline,
    /// `T Name { get; set; }`
    Property,
}

/// Read-only accessor that satisfies the interface member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    /// Materializes the backing list into an array on every read.
    Snapshot,
    /// Returns the backing member.
    Forward,
}

/// What to emit for one field of a generated class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberPlan {
    /// A commented-out line with the shape the member would have.
    Disabled(MemberVariant),
    Live {
        variant: MemberVariant,
        accessor: Option<Accessor>,
    },
}

/// Maps a member key to its plan.
pub fn plan_member(key: MemberKey, generate_interfaces: bool) -> MemberPlan {
    let variant = match (key.read_only, key.value_type) {
        (true, _) => MemberVariant::ReadOnly,
        (false, true) => MemberVariant::Inline,
        (false, false) => MemberVariant::Property,
    };

    if key.external {
        return MemberPlan::Disabled(variant);
    }

    let accessor = match (generate_interfaces, key.repeated, key.diverges) {
        (false, _, _) => None,
        (true, true, _) => Some(Accessor::Snapshot),
        (true, false, true) => Some(Accessor::Forward),
        (true, false, false) => None,
    };

    MemberPlan::Live { variant, accessor }
}

/// Renders the implementation member.
pub fn implementation_member(field: &SchemaField, variant: MemberVariant) -> String {
    let access = field.options.access;
    let typ = implementation_type(field);
    let name = &field.cs_name;

    match variant {
        MemberVariant::ReadOnly => {
            format!("{} readonly {} {} = new {}();", access, typ, name, typ)
        }
        MemberVariant::Inline => format!("{} {} {};", access, typ, name),
        MemberVariant::Property => format!("{} {} {} {{ get; set; }}", access, typ, name),
    }
}

/// Renders the read-only accessor placed after the implementation member.
pub fn interface_accessor(field: &SchemaField, accessor: Accessor) -> String {
    let access = field.options.access;
    let typ = interface_type(field);
    let name = &field.cs_name;

    match accessor {
        Accessor::Snapshot => format!(
            "{} {} {} {{ get {{ return {}.ToArray(); }} }}",
            access, typ, field.interface_name, name
        ),
        Accessor::Forward => format!(
            "{} {} {} {{ get {{ return {}; }} }}",
            access, typ, field.interface_name, name
        ),
    }
}

/// Renders the member declared on a generated interface.
pub fn interface_member(field: &SchemaField) -> String {
    let name = if MemberKey::of(field).needs_interface_name() {
        &field.interface_name
    } else {
        &field.cs_name
    };
    format!("{} {} {{ get; }}", interface_type(field), name)
}

/// Comments out a member line, marking it as written by hand.
pub fn disabled(line: &str) -> String {
    format!("//{}{}", line, EXTERNAL_SUFFIX)
}
