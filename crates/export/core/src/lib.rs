//! Generic config export pipeline.
//!
//! Turns collections of authored config records into deterministic Lua
//! table-literal files. The crate knows nothing about concrete schemas; they
//! describe themselves through [`Reflect`] and are exported by an
//! [`Exporter`] each.
//!
//! Modules follow the data flow:
//! - [`reflect`] is the compile-time type table schemas register into
//! - [`convert`] and [`policy`] decide how each declared field is emitted
//! - [`plan`] resolves those decisions once per schema type
//! - [`collect`] gathers records, [`walker`] turns them into a [`Value`] tree
//! - [`render`], [`annotate`] and [`writer`] produce the output file
//! - [`exporter`] and [`dispatch`] run one or every schema
pub mod annotate;
pub mod collect;
pub mod convert;
pub mod dispatch;
pub mod exporter;
pub mod pipeline;
pub mod plan;
pub mod policy;
pub mod reflect;
pub mod render;
pub mod value;
pub mod walker;
pub mod writer;

pub use collect::{Asset, AssetIndex, CollectError, Collector, ConfigGroup};
pub use convert::{
    ConvertError, Converter, ConverterRegistry, EnumConverter, NamedReferenceConverter,
    NumericTupleConverter, RegistryError,
};
pub use dispatch::{DispatchError, ExportFailure, ExporterRegistry, RunSummary};
pub use exporter::{ExportContext, ExportError, ExportReport, Exporter, RecordExporter};
pub use pipeline::{Pipeline, PipelineBuilder, PipelineError};
pub use plan::{FieldPlan, NodePlan, PlanError, StructPlan};
pub use policy::{Decision, FieldPolicy};
pub use reflect::{
    AssetRef, ConfigRecord, EnumBase, FieldFlags, FieldInfo, HideFlags, NumericTuple, RecordBase,
    Reflect, ReflectRef, Shape, TypeFn, TypeInfo,
};
pub use value::{Map, Value};
pub use walker::{Walked, Walker, Warning};
pub use writer::{FileTemplate, WriteError, WriteMode, WriteOutcome};

#[doc(hidden)]
pub mod __private {
    pub use strum::VariantNames;
}
