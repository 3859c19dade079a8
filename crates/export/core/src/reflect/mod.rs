//! Compile-time type table for config schemas.
//!
//! Every type that can appear in an exported record implements [`Reflect`],
//! which exposes two views:
//!
//! - a static [`TypeInfo`] describing the declared shape (field list, field
//!   types, assignable bases), used to build export plans and annotations
//!   without ever looking at a value
//! - a dynamic [`ReflectRef`] view of one value, used by the walker
//!
//! Schema types get their impls from [`reflect_struct!`](crate::reflect_struct)
//! and [`reflect_enum!`](crate::reflect_enum); std types are covered in
//! `impls`.

mod impls;
mod macros;
mod record;

use std::any::{Any, TypeId};
use std::borrow::Cow;

pub use record::{AssetRef, ConfigRecord, EnumBase, HideFlags, NumericTuple, RecordBase};

/// Lazily evaluated type description.
///
/// Field and element types are stored as function pointers so that recursive
/// schemas do not recurse while their own `TypeInfo` is being built.
pub type TypeFn = fn() -> TypeInfo;

bitflags::bitflags! {
    /// Per-field schema markers.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FieldFlags: u8 {
        /// Authored but never exported.
        const NON_SERIALIZED = 1 << 0;
    }
}

/// Declared shape of a reflected type.
#[derive(Clone, Debug)]
pub enum Shape {
    Bool,
    Integer,
    Float,
    String,
    /// Fieldless enumeration with its case names in declaration order.
    Enum { variants: &'static [&'static str] },
    /// Struct with fields in declaration order. `record` is set for config
    /// records, which carry an identity name.
    Struct { fields: Vec<FieldInfo>, record: bool },
    Sequence(TypeFn),
    Optional(TypeFn),
    /// Soft link to a record of the given type.
    Reference(TypeFn),
    /// Marker type used only as an assignable base.
    Abstract,
    /// Type with no structural view; exportable only through a converter.
    Opaque,
}

/// Static description of one field.
#[derive(Clone, Debug)]
pub struct FieldInfo {
    pub name: &'static str,
    pub ty: TypeFn,
    pub declared_by: TypeFn,
    pub flags: FieldFlags,
}

impl FieldInfo {
    /// Describes field `name` of `S`, inferring the field type from the
    /// projection.
    pub fn of<S, F, P>(name: &'static str, declared_by: TypeFn, _project: P) -> Self
    where
        F: Reflect,
        P: for<'a> Fn(&'a S) -> &'a F,
    {
        Self {
            name,
            ty: F::type_info,
            declared_by,
            flags: FieldFlags::empty(),
        }
    }

    /// Marks the field non-serialized.
    #[must_use]
    pub fn skip(mut self) -> Self {
        self.flags |= FieldFlags::NON_SERIALIZED;
        self
    }

    pub fn is_non_serialized(&self) -> bool {
        self.flags.contains(FieldFlags::NON_SERIALIZED)
    }

    /// Resolves the declared field type.
    pub fn field_type(&self) -> TypeInfo {
        (self.ty)()
    }

    /// Resolves the type that declares this field.
    pub fn declaring_type(&self) -> TypeInfo {
        (self.declared_by)()
    }
}

/// Static description of a reflected type.
#[derive(Clone, Debug)]
pub struct TypeInfo {
    id: TypeId,
    name: Cow<'static, str>,
    shape: Shape,
    bases: &'static [TypeFn],
}

impl TypeInfo {
    pub fn new<T: Any + ?Sized>(name: impl Into<Cow<'static, str>>, shape: Shape) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: name.into(),
            shape,
            bases: &[],
        }
    }

    /// Declares the direct bases this type is assignable to.
    #[must_use]
    pub fn with_bases(mut self, bases: &'static [TypeFn]) -> Self {
        self.bases = bases;
        self
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Direct bases, resolved.
    pub fn bases(&self) -> impl Iterator<Item = TypeInfo> + '_ {
        self.bases.iter().map(|base| base())
    }

    /// Declared fields; empty for anything but structs.
    pub fn fields(&self) -> &[FieldInfo] {
        match &self.shape {
            Shape::Struct { fields, .. } => fields,
            _ => &[],
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.shape, Shape::Struct { .. })
    }

    pub fn is_record(&self) -> bool {
        matches!(self.shape, Shape::Struct { record: true, .. })
    }

    /// Returns true if this type is `id` or transitively derives from it.
    pub fn is_assignable_to(&self, id: TypeId) -> bool {
        self.id == id || self.bases().any(|base| base.is_assignable_to(id))
    }
}

/// Dynamic view of a reflected value.
pub enum ReflectRef<'a> {
    Bool(bool),
    Int(i64),
    Unsigned(u64),
    Float(f64),
    Str(&'a str),
    Enum {
        variant: &'static str,
        ordinal: usize,
    },
    Seq(Vec<&'a dyn Reflect>),
    /// Field values in the order of [`TypeInfo::fields`].
    Struct(Vec<&'a dyn Reflect>),
    Option(Option<&'a dyn Reflect>),
    Opaque,
}

impl ReflectRef<'_> {
    /// Short label for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Unsigned(_) => "unsigned integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Enum { .. } => "enum",
            Self::Seq(_) => "sequence",
            Self::Struct(_) => "struct",
            Self::Option(_) => "option",
            Self::Opaque => "opaque value",
        }
    }
}

/// A type that can be walked by the export pipeline.
pub trait Reflect: Any {
    /// Static description of the declared type.
    fn type_info() -> TypeInfo
    where
        Self: Sized;

    /// Dynamic view of this value.
    fn reflect(&self) -> ReflectRef<'_>;

    /// Identity name, for records and references to records.
    fn identity(&self) -> Option<&str> {
        None
    }

    /// The concrete value, for converters that downcast.
    fn as_any(&self) -> &dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{reflect_enum, reflect_struct};

    #[derive(Clone, Copy, Debug, Default, strum::IntoStaticStr, strum::VariantNames)]
    enum Tier {
        #[default]
        Low,
        High,
    }
    reflect_enum!(Tier);

    #[derive(Default)]
    struct Gear {
        name: String,
        hide_flags: HideFlags,
        tier: Tier,
        weight: f32,
        notes: String,
    }
    reflect_struct! {
        Gear as record {
            tier,
            weight,
            #[skip]
            notes,
        }
    }

    #[test]
    fn test_record_fields_include_identity_first() {
        let info = Gear::type_info();
        let names: Vec<_> = info.fields().iter().map(|f| f.name).collect();
        assert_eq!(names, ["name", "hide_flags", "tier", "weight", "notes"]);
        assert!(info.is_record());
        assert!(info.is_assignable_to(TypeId::of::<RecordBase>()));
    }

    #[test]
    fn test_identity_fields_declared_by_record_base() {
        let info = Gear::type_info();
        let declaring: Vec<_> = info
            .fields()
            .iter()
            .map(|f| f.declaring_type().name().to_string())
            .collect();
        assert_eq!(declaring, ["RecordBase", "RecordBase", "Gear", "Gear", "Gear"]);
    }

    #[test]
    fn test_skip_marks_non_serialized() {
        let info = Gear::type_info();
        let notes = info.fields().iter().find(|f| f.name == "notes").unwrap();
        assert!(notes.is_non_serialized());
        let tier = info.fields().iter().find(|f| f.name == "tier").unwrap();
        assert!(!tier.is_non_serialized());
    }

    #[test]
    fn test_field_types_resolve() {
        let info = Gear::type_info();
        let tier = info.fields()[2].field_type();
        assert_eq!(tier.name(), "Tier");
        assert!(matches!(tier.shape(), Shape::Enum { variants } if *variants == ["Low", "High"]));
        assert!(tier.is_assignable_to(TypeId::of::<EnumBase>()));
    }

    #[test]
    fn test_enum_reflects_symbolic_name_and_ordinal() {
        match Tier::High.reflect() {
            ReflectRef::Enum { variant, ordinal } => {
                assert_eq!(variant, "High");
                assert_eq!(ordinal, 1);
            }
            other => panic!("unexpected {}", other.kind()),
        }
    }

    #[test]
    fn test_record_identity() {
        let gear = Gear {
            name: "Helm".into(),
            ..Default::default()
        };
        assert_eq!(gear.identity(), Some("Helm"));
        let ReflectRef::Struct(values) = gear.reflect() else {
            panic!("record should reflect as struct");
        };
        assert_eq!(values.len(), 5);
    }
}
