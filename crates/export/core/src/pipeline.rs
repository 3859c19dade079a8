//! Shared export configuration.
//!
//! A [`Pipeline`] is built once per run and shared by every exporter: it owns
//! the converter registry, the field policy and a pre-resolved plan for each
//! schema type. All configuration errors surface from [`PipelineBuilder::build`].

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::annotate;
use crate::convert::{Converter, ConverterRegistry, RegistryError};
use crate::plan::{PlanError, Planner, StructPlan};
use crate::policy::FieldPolicy;
use crate::reflect::{Reflect, TypeInfo};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Converter registry, field policy and schema plans.
pub struct Pipeline {
    converters: ConverterRegistry,
    policy: FieldPolicy,
    plans: HashMap<TypeId, Arc<StructPlan>>,
    schemas: Vec<TypeInfo>,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    pub fn policy(&self) -> &FieldPolicy {
        &self.policy
    }

    /// Plan of a registered schema type.
    pub fn plan(&self, schema: &TypeInfo) -> Option<&Arc<StructPlan>> {
        self.plans.get(&schema.id())
    }

    /// Schema types in registration order.
    pub fn schemas(&self) -> &[TypeInfo] {
        &self.schemas
    }

    /// Annotation block for `schema`.
    pub fn annotate(&self, schema: &TypeInfo) -> Result<String, RegistryError> {
        annotate::annotate(schema, &self.policy, &self.converters)
    }
}

/// Collects pipeline configuration. Registration errors are kept until
/// [`build`](Self::build).
#[derive(Default)]
pub struct PipelineBuilder {
    converters: ConverterRegistry,
    policy: FieldPolicy,
    schemas: Vec<TypeInfo>,
    error: Option<RegistryError>,
}

impl PipelineBuilder {
    #[must_use]
    pub fn with_builtin_converters(mut self) -> Self {
        let result = self.converters.register_builtins();
        self.keep_first_error(result);
        self
    }

    /// Registers `converter` for `T` and everything assignable to it.
    #[must_use]
    pub fn converter<T: Reflect>(mut self, converter: impl Converter + 'static) -> Self {
        let result = self.converters.register::<T>(converter);
        self.keep_first_error(result);
        self
    }

    /// Suppresses `field` on the type named `type_name`.
    #[must_use]
    pub fn suppress(mut self, type_name: impl Into<String>, field: impl Into<String>) -> Self {
        self.policy.suppress(type_name, field);
        self
    }

    #[must_use]
    pub fn schema<T: Reflect>(self) -> Self {
        self.schema_info(T::type_info())
    }

    #[must_use]
    pub fn schema_info(mut self, info: TypeInfo) -> Self {
        if !self.schemas.iter().any(|known| known.id() == info.id()) {
            self.schemas.push(info);
        }
        self
    }

    #[must_use]
    pub fn schemas(self, infos: impl IntoIterator<Item = TypeInfo>) -> Self {
        infos.into_iter().fold(self, Self::schema_info)
    }

    pub fn build(self) -> Result<Pipeline, PipelineError> {
        if let Some(err) = self.error {
            return Err(err.into());
        }

        let mut planner = Planner::new(&self.converters, &self.policy);
        let mut plans = HashMap::new();
        for schema in &self.schemas {
            let plan = planner.plan_schema(schema)?;
            plans.insert(schema.id(), plan);
        }

        tracing::debug!(
            target: "export::pipeline",
            schemas = self.schemas.len(),
            converters = self.converters.len(),
            "pipeline built"
        );

        Ok(Pipeline {
            converters: self.converters,
            policy: self.policy,
            plans,
            schemas: self.schemas,
        })
    }

    fn keep_first_error(&mut self, result: Result<(), RegistryError>) {
        if let Err(err) = result
            && self.error.is_none()
        {
            self.error = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HideFlags, reflect_struct};

    #[derive(Default)]
    struct Crate {
        name: String,
        hide_flags: HideFlags,
        size: u8,
        secret: String,
    }
    reflect_struct!(Crate as record { size, secret });

    #[test]
    fn test_build_plans_every_schema() {
        let pipeline = Pipeline::builder()
            .with_builtin_converters()
            .suppress("Crate", "secret")
            .schema::<Crate>()
            .schema::<Crate>()
            .build()
            .unwrap();

        assert_eq!(pipeline.schemas().len(), 1);
        let plan = pipeline.plan(&Crate::type_info()).unwrap();
        let names: Vec<_> = plan.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, ["size"]);
        assert_eq!(
            pipeline.annotate(&Crate::type_info()).unwrap(),
            "---@class Crate\n---@field size number\n"
        );
    }

    #[test]
    fn test_registration_error_surfaces_at_build() {
        let result = Pipeline::builder()
            .with_builtin_converters()
            .with_builtin_converters()
            .schema::<Crate>()
            .build();
        assert!(matches!(
            result,
            Err(PipelineError::Registry(RegistryError::Duplicate(_)))
        ));
    }
}
