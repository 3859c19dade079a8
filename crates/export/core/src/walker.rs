//! Graph walker.
//!
//! Expands reflected values into the intermediate tree by following a
//! pre-built [`StructPlan`]. Walking never fails as a whole: a field that
//! cannot be converted yields a [`Warning`] and is left out of its map.

use std::fmt;

use crate::plan::{NodePlan, StructPlan};
use crate::reflect::{Reflect, ReflectRef};
use crate::value::{Map, Value};

/// A recovered per-field failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    /// Location of the dropped field, e.g. `Item["Sword"].stats.power`.
    pub path: String,
    pub message: String,
}

impl Warning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Result of walking a group or a struct.
#[derive(Clone, Debug, PartialEq)]
pub struct Walked {
    pub value: Value,
    pub warnings: Vec<Warning>,
}

/// Walks values along a plan, collecting warnings.
#[derive(Debug, Default)]
pub struct Walker {
    warnings: Vec<Warning>,
}

impl Walker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks a whole config group into a name-keyed map.
    ///
    /// Records are expanded in iteration order; roots are never collapsed to
    /// their names.
    pub fn walk_group<'a, I>(plan: &StructPlan, records: I) -> Walked
    where
        I: IntoIterator<Item = (&'a str, &'a dyn Reflect)>,
    {
        let mut walker = Self::new();
        let mut group = Map::new();

        for (name, record) in records {
            let path = format!("{}[{}]", plan.type_name, quote(name));
            match walker.walk_struct_at(plan, record, &path) {
                Ok(value) => {
                    group.insert(name.to_string(), value);
                }
                Err(warning) => walker.record(warning),
            }
        }

        walker.finish(Value::Map(group))
    }

    /// Walks a single struct.
    pub fn walk_struct(plan: &StructPlan, value: &dyn Reflect, path: &str) -> Walked {
        let mut walker = Self::new();
        match walker.walk_struct_at(plan, value, path) {
            Ok(value) => walker.finish(value),
            Err(warning) => {
                walker.record(warning);
                walker.finish(Value::Map(Map::new()))
            }
        }
    }

    fn finish(self, value: Value) -> Walked {
        Walked {
            value,
            warnings: self.warnings,
        }
    }

    fn record(&mut self, warning: Warning) {
        tracing::warn!(
            target: "export::walker",
            path = %warning.path,
            "field dropped: {}",
            warning.message
        );
        self.warnings.push(warning);
    }

    fn walk_struct_at(
        &mut self,
        plan: &StructPlan,
        value: &dyn Reflect,
        path: &str,
    ) -> Result<Value, Warning> {
        let ReflectRef::Struct(fields) = value.reflect() else {
            return Err(mismatch(path, "struct", &value.reflect()));
        };
        if fields.len() != plan.field_count {
            return Err(Warning::new(
                path,
                format!(
                    "`{}` reflected {} fields, plan expects {}",
                    plan.type_name,
                    fields.len(),
                    plan.field_count
                ),
            ));
        }

        let mut map = Map::new();
        for field in &plan.fields {
            let field_path = format!("{path}.{}", field.name);
            match self.walk_field(&field.node, fields[field.index], &field_path) {
                Ok(value) => {
                    map.insert(field.name.to_string(), value);
                }
                Err(warning) => self.record(warning),
            }
        }
        Ok(Value::Map(map))
    }

    /// Converts one field value. Nested struct fields that fail are recorded
    /// and dropped here; a failure of the field itself is returned.
    fn walk_field(
        &mut self,
        node: &NodePlan,
        value: &dyn Reflect,
        path: &str,
    ) -> Result<Value, Warning> {
        match node {
            NodePlan::Scalar => scalar(value, path),
            NodePlan::Ordinal => match value.reflect() {
                ReflectRef::Enum { ordinal, .. } => i64::try_from(ordinal)
                    .map(Value::Integer)
                    .map_err(|_| Warning::new(path, format!("ordinal {ordinal} out of range"))),
                other => Err(mismatch(path, "enum", &other)),
            },
            NodePlan::Convert(converter) => converter.convert(value).map_err(|err| {
                Warning::new(path, format!("{} converter failed: {err}", converter.name()))
            }),
            NodePlan::Struct(plan) => self.walk_struct_at(plan, value, path),
            NodePlan::Sequence(element) => match value.reflect() {
                ReflectRef::Seq(items) => items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| self.walk_field(element, item, &format!("{path}[{}]", i + 1)))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Sequence),
                other => Err(mismatch(path, "sequence", &other)),
            },
            NodePlan::Optional(inner) => match value.reflect() {
                ReflectRef::Option(None) => Ok(Value::Null),
                ReflectRef::Option(Some(inner_value)) => self.walk_field(inner, inner_value, path),
                other => Err(mismatch(path, "option", &other)),
            },
            NodePlan::Identity => value
                .identity()
                .map(|name| Value::String(name.to_string()))
                .ok_or_else(|| Warning::new(path, "record has no identity name")),
            NodePlan::Unsupported(ty) => Err(Warning::new(
                path,
                format!("no converter registered for `{ty}`"),
            )),
        }
    }
}

fn scalar(value: &dyn Reflect, path: &str) -> Result<Value, Warning> {
    match value.reflect() {
        ReflectRef::Bool(b) => Ok(Value::Bool(b)),
        ReflectRef::Int(i) => Ok(Value::Integer(i)),
        ReflectRef::Unsigned(u) => i64::try_from(u)
            .map(Value::Integer)
            .map_err(|_| Warning::new(path, format!("integer {u} exceeds the exportable range"))),
        ReflectRef::Float(f) if f.is_finite() => Ok(Value::Float(f)),
        ReflectRef::Float(f) => Err(Warning::new(path, format!("non-finite number {f}"))),
        ReflectRef::Str(s) => Ok(Value::String(s.to_string())),
        other => Err(mismatch(path, "scalar", &other)),
    }
}

fn mismatch(path: &str, expected: &str, found: &ReflectRef<'_>) -> Warning {
    Warning::new(path, format!("expected {expected}, found {}", found.kind()))
}

fn quote(name: &str) -> String {
    format!("{name:?}")
}
