//! EmmyLua type annotations for exported schemas.
//!
//! Built from declared field types only, so the annotation block is stable
//! regardless of which records exist.

use std::fmt::Write;

use crate::convert::{ConverterRegistry, RegistryError};
use crate::policy::FieldPolicy;
use crate::reflect::{Shape, TypeInfo};

/// Emits a `---@class` block for `schema` with one `---@field` line per
/// emitted field.
pub fn annotate(
    schema: &TypeInfo,
    policy: &FieldPolicy,
    converters: &ConverterRegistry,
) -> Result<String, RegistryError> {
    let mut out = String::new();
    let _ = writeln!(out, "---@class {}", schema.name());

    for field in schema.fields() {
        if policy.decide(schema, field, converters)?.is_suppressed() {
            continue;
        }
        let tag = type_tag(&field.field_type(), converters)?;
        let _ = writeln!(out, "---@field {} {tag}", field.name);
    }

    Ok(out)
}

/// Coarse Lua type of values emitted for `info`.
pub fn type_tag(info: &TypeInfo, converters: &ConverterRegistry) -> Result<String, RegistryError> {
    let converter = converters.lookup(info)?;
    if let Some(tag) = converter.as_ref().and_then(|c| c.annotation()) {
        return Ok(tag.to_string());
    }

    Ok(match info.shape() {
        Shape::Bool => "boolean".to_string(),
        Shape::Integer | Shape::Float => "number".to_string(),
        Shape::String | Shape::Reference(_) => "string".to_string(),
        // Enums and records are strings only when a converter names them.
        Shape::Enum { .. } if converter.is_some() => "string".to_string(),
        Shape::Enum { .. } => "number".to_string(),
        Shape::Struct { record: true, .. } if converter.is_some() => "string".to_string(),
        Shape::Sequence(element) => format!("{}[]", type_tag(&element(), converters)?),
        Shape::Optional(inner) => format!("{}?", type_tag(&inner(), converters)?),
        Shape::Struct { .. } | Shape::Abstract | Shape::Opaque => "table".to_string(),
    })
}
