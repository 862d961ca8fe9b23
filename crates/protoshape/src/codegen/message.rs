//! Interface and class declarations for messages.
//!
//! Both outputs share one depth-first walk ([`walk`]). The block header,
//! the members and the placement of nested messages come from an
//! [`EmitMode`].

use super::enums::emit_enum;
use super::member::{
    disabled, implementation_member, interface_accessor, interface_member, plan_member,
    MemberKey, MemberPlan,
};
use super::writer::CodeWriter;
use crate::config::GenerationOptions;
use crate::ir::{SchemaField, SchemaMessage};

/// Element type of the member holding preserved unknown fields.
const KEY_VALUE_TYPE: &str = "global::Protoshape.Runtime.KeyValue";

/// Where declarations of nested messages are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedPlacement {
    /// Inside the parent's block.
    Inside,
    /// After the parent's block, at the same depth.
    Sibling,
}

/// Rendering policy for one kind of declaration.
pub trait EmitMode {
    fn placement(&self) -> NestedPlacement;

    /// Header line of the block opened for `message`.
    fn header(&self, message: &SchemaMessage) -> String;

    /// Lines written before the block is opened.
    fn preamble(&self, _message: &SchemaMessage, _cw: &mut CodeWriter) {}

    /// Declarations written at the top of the block, before any field.
    fn before_members(&self, _message: &SchemaMessage, _cw: &mut CodeWriter) {}

    fn render_member(&self, field: &SchemaField, cw: &mut CodeWriter);

    /// Declarations written after all fields.
    fn after_members(&self, _message: &SchemaMessage, _cw: &mut CodeWriter) {}
}

/// Emits `message` and every message nested in it.
///
/// External messages produce only a two-line comment stub: their
/// declaration, members and nested messages are written by hand.
pub fn walk<M: EmitMode + ?Sized>(message: &SchemaMessage, cw: &mut CodeWriter, mode: &M) {
    if message.options.external {
        cw.comment("Written elsewhere");
        cw.comment(&format!(
            "{} {} {} {{}}",
            message.options.access, message.options.kind, message.cs_type
        ));
        return;
    }

    tracing::debug!(
        message = %message.cs_type,
        fields = message.fields.len(),
        nested = message.messages.len(),
        "emitting declaration"
    );

    mode.preamble(message, cw);
    {
        let mut scope = cw.scope(&mode.header(message));
        mode.before_members(message, &mut scope);
        for field in &message.fields {
            mode.render_member(field, &mut scope);
        }
        mode.after_members(message, &mut scope);

        if mode.placement() == NestedPlacement::Inside {
            walk_nested(message, &mut scope, mode);
        }
    }
    if mode.placement() == NestedPlacement::Sibling {
        walk_nested(message, cw, mode);
    }
}

fn walk_nested<M: EmitMode + ?Sized>(message: &SchemaMessage, cw: &mut CodeWriter, mode: &M) {
    for nested in &message.messages {
        cw.blank_line();
        walk(nested, cw, mode);
    }
}

/// Emits the `I<Name>` interface of `message` and, as siblings, the
/// interfaces of its nested messages.
pub fn emit_interface(message: &SchemaMessage, cw: &mut CodeWriter) {
    walk(message, cw, &InterfaceMode);
}

/// Emits the class (or struct) of `message` with its nested enums and
/// messages inside it.
pub fn emit_class(message: &SchemaMessage, cw: &mut CodeWriter, options: &GenerationOptions) {
    walk(message, cw, &ClassMode { options });
}

/// Read-only view of a message.
pub struct InterfaceMode;

impl EmitMode for InterfaceMode {
    fn placement(&self) -> NestedPlacement {
        NestedPlacement::Sibling
    }

    fn header(&self, message: &SchemaMessage) -> String {
        format!(
            "{} partial interface {}",
            message.options.access,
            message.interface_type()
        )
    }

    fn render_member(&self, field: &SchemaField, cw: &mut CodeWriter) {
        if field.options.external {
            cw.write_line(&disabled(&interface_member(field)));
            return;
        }
        if let Some(comments) = &field.comments {
            cw.summary(comments);
        }
        cw.write_line(&interface_member(field));
    }
}

/// Concrete class or struct of a message.
pub struct ClassMode<'o> {
    pub options: &'o GenerationOptions,
}

impl EmitMode for ClassMode<'_> {
    fn placement(&self) -> NestedPlacement {
        NestedPlacement::Inside
    }

    fn header(&self, message: &SchemaMessage) -> String {
        let mut header = format!(
            "{} partial {} {}",
            message.options.access, message.options.kind, message.cs_type
        );
        if self.options.generate_interfaces {
            header.push_str(" : ");
            header.push_str(&message.interface_type());
        }
        header
    }

    fn preamble(&self, message: &SchemaMessage, cw: &mut CodeWriter) {
        if let Some(comments) = &message.comments {
            cw.summary(comments);
        }
    }

    fn before_members(&self, message: &SchemaMessage, cw: &mut CodeWriter) {
        for nested in &message.enums {
            emit_enum(nested, cw);
        }
    }

    fn render_member(&self, field: &SchemaField, cw: &mut CodeWriter) {
        let plan = plan_member(MemberKey::of(field), self.options.generate_interfaces);
        match plan {
            MemberPlan::Disabled(variant) => {
                cw.write_line(&disabled(&implementation_member(field, variant)));
            }
            MemberPlan::Live { variant, accessor } => {
                if accessor.is_some() {
                    cw.blank_line();
                }
                if let Some(comments) = &field.comments {
                    cw.summary(comments);
                }
                cw.write_line(&implementation_member(field, variant));
                if let Some(accessor) = accessor {
                    cw.write_line(&interface_accessor(field, accessor));
                }
            }
        }
    }

    fn after_members(&self, message: &SchemaMessage, cw: &mut CodeWriter) {
        if self.options.debug_field_ids {
            cw.comment("ProtocolBuffers wire field id");
            for field in &message.fields {
                cw.write_line(&format!(
                    "public const int {}FieldID = {};",
                    field.cs_name, field.id
                ));
            }
        }

        if message.options.preserve_unknown {
            cw.summary("Values for unknown fields.");
            cw.write_line(&format!("public List<{}> PreservedFields;", KEY_VALUE_TYPE));
            cw.blank_line();
        }

        if message.options.triggers {
            cw.comment("protected virtual void BeforeSerialize() {}");
            cw.comment("protected virtual void AfterDeserialize() {}");
            cw.blank_line();
        }
    }
}
