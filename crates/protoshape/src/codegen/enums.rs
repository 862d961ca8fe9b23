//! Enum declaration emission.

use super::writer::CodeWriter;
use crate::ir::SchemaEnum;

/// Emits an enum declaration followed by a blank separator line.
///
/// Members are written in declaration order with their values as given;
/// duplicate and non-monotonic values pass through unchanged.
pub fn emit_enum(schema_enum: &SchemaEnum, cw: &mut CodeWriter) {
    tracing::trace!(name = %schema_enum.cs_type, "emitting enum");

    if let Some(comments) = &schema_enum.comments {
        cw.summary(comments);
    }
    {
        let mut scope = cw.scope(&format!("{} enum {}", schema_enum.access, schema_enum.cs_type));
        for member in &schema_enum.members {
            if let Some(comment) = &member.comment {
                scope.summary(comment);
            }
            scope.write_line(&format!("{} = {},", member.name, member.value));
        }
    }
    cw.blank_line();
}
