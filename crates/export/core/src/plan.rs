//! Pre-resolved export plans.
//!
//! Every schema type is resolved once, when the pipeline is built, into a
//! [`StructPlan`]: the emitted fields in declaration order, each paired with
//! the node plan the walker follows. Converter lookups, policy decisions and
//! configuration errors (ambiguous converters, value cycles) all happen here,
//! before any record is walked.

use std::any::TypeId;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::convert::{Converter, ConverterRegistry, RegistryError};
use crate::policy::{Decision, FieldPolicy};
use crate::reflect::{Shape, TypeInfo};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("value cycle in schema: {path}")]
    ValueCycle { path: String },

    #[error("`{0}` is not a struct and cannot be exported as a schema")]
    NotAStruct(String),
}

/// How the walker turns one value into part of the tree.
#[derive(Clone)]
pub enum NodePlan {
    /// Bool, integer, float or string.
    Scalar,
    /// Enum without a converter: emitted as its ordinal.
    Ordinal,
    Convert(Arc<dyn Converter>),
    Struct(Arc<StructPlan>),
    Sequence(Box<NodePlan>),
    Optional(Box<NodePlan>),
    /// A record type re-entered while it is still being expanded: emitted as
    /// its identity name.
    Identity,
    /// No structural view and no converter.
    Unsupported(Cow<'static, str>),
}

impl fmt::Debug for NodePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.write_str("Scalar"),
            Self::Ordinal => f.write_str("Ordinal"),
            Self::Convert(converter) => f.debug_tuple("Convert").field(&converter.name()).finish(),
            Self::Struct(plan) => f.debug_tuple("Struct").field(&plan.type_name).finish(),
            Self::Sequence(inner) => f.debug_tuple("Sequence").field(inner).finish(),
            Self::Optional(inner) => f.debug_tuple("Optional").field(inner).finish(),
            Self::Identity => f.write_str("Identity"),
            Self::Unsupported(name) => f.debug_tuple("Unsupported").field(name).finish(),
        }
    }
}

/// One emitted field.
#[derive(Clone, Debug)]
pub struct FieldPlan {
    pub name: &'static str,
    /// Position in the reflected field list.
    pub index: usize,
    pub node: NodePlan,
}

/// Emitted fields of one struct type, in declaration order.
#[derive(Debug)]
pub struct StructPlan {
    pub type_name: Cow<'static, str>,
    pub fields: Vec<FieldPlan>,
    /// Number of reflected fields, emitted or not.
    pub field_count: usize,
}

impl StructPlan {
    pub fn field(&self, name: &str) -> Option<&FieldPlan> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Builds and caches struct plans.
pub struct Planner<'a> {
    converters: &'a ConverterRegistry,
    policy: &'a FieldPolicy,
    cache: HashMap<TypeId, Arc<StructPlan>>,
    stack: Vec<(TypeId, String)>,
}

impl<'a> Planner<'a> {
    pub fn new(converters: &'a ConverterRegistry, policy: &'a FieldPolicy) -> Self {
        Self {
            converters,
            policy,
            cache: HashMap::new(),
            stack: Vec::new(),
        }
    }

    /// Plans a schema root. Roots are always expanded, even records that a
    /// converter would otherwise collapse to a name.
    pub fn plan_schema(&mut self, info: &TypeInfo) -> Result<Arc<StructPlan>, PlanError> {
        if !info.is_struct() {
            return Err(PlanError::NotAStruct(info.name().to_string()));
        }
        self.plan_struct(info)
    }

    /// Every struct plan built so far.
    pub fn into_plans(self) -> HashMap<TypeId, Arc<StructPlan>> {
        self.cache
    }

    fn plan_struct(&mut self, info: &TypeInfo) -> Result<Arc<StructPlan>, PlanError> {
        if let Some(plan) = self.cache.get(&info.id()) {
            return Ok(Arc::clone(plan));
        }

        self.stack.push((info.id(), info.name().to_string()));

        let result = self.plan_fields(info);
        self.stack.pop();

        let plan = Arc::new(result?);
        tracing::trace!(
            target: "export::plan",
            ty = info.name(),
            fields = plan.fields.len(),
            "planned struct"
        );
        self.cache.insert(info.id(), Arc::clone(&plan));
        Ok(plan)
    }

    fn plan_fields(&mut self, info: &TypeInfo) -> Result<StructPlan, PlanError> {
        let mut fields = Vec::new();
        for (index, field) in info.fields().iter().enumerate() {
            let node = match self.policy.decide(info, field, self.converters)? {
                Decision::Suppress => continue,
                Decision::Convert(converter) => NodePlan::Convert(converter),
                Decision::Emit => self.plan_shape(&field.field_type())?,
            };
            fields.push(FieldPlan {
                name: field.name,
                index,
                node,
            });
        }

        Ok(StructPlan {
            type_name: Cow::Owned(info.name().to_string()),
            fields,
            field_count: info.fields().len(),
        })
    }

    fn plan_node(&mut self, info: &TypeInfo) -> Result<NodePlan, PlanError> {
        match self.converters.lookup(info)? {
            Some(converter) => Ok(NodePlan::Convert(converter)),
            None => self.plan_shape(info),
        }
    }

    fn plan_shape(&mut self, info: &TypeInfo) -> Result<NodePlan, PlanError> {
        Ok(match info.shape() {
            Shape::Bool | Shape::Integer | Shape::Float | Shape::String => NodePlan::Scalar,
            Shape::Enum { .. } => NodePlan::Ordinal,
            Shape::Sequence(element) => NodePlan::Sequence(Box::new(self.plan_node(&element())?)),
            Shape::Optional(inner) => NodePlan::Optional(Box::new(self.plan_node(&inner())?)),
            Shape::Struct { .. } => {
                if let Some(position) = self.stack.iter().position(|(id, _)| *id == info.id()) {
                    if info.is_record() {
                        NodePlan::Identity
                    } else {
                        return Err(PlanError::ValueCycle {
                            path: self.cycle_path(position, info.name()),
                        });
                    }
                } else {
                    NodePlan::Struct(self.plan_struct(info)?)
                }
            }
            Shape::Reference(_) | Shape::Abstract | Shape::Opaque => {
                NodePlan::Unsupported(Cow::Owned(info.name().to_string()))
            }
        })
    }

    fn cycle_path(&self, from: usize, name: &str) -> String {
        let mut path: Vec<&str> = self.stack[from..]
            .iter()
            .map(|(_, name)| name.as_str())
            .collect();
        path.push(name);
        path.join(" -> ")
    }
}
