//! Config records, references between them, and the abstract bases used for
//! converter lookup.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::{Reflect, ReflectRef, Shape, TypeFn, TypeInfo};

/// Common base of every config record and of every reference to one.
///
/// Fields declared by this type are host identity fields, never part of the
/// authored schema.
pub enum RecordBase {}

/// Common base of every reflected enum.
pub enum EnumBase {}

/// Common base of fixed-size numeric tuples (vectors, colors).
pub enum NumericTuple {}

macro_rules! abstract_base {
    ($($ty:ident),+) => {
        $(
            impl Reflect for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::new::<$ty>(stringify!($ty), Shape::Abstract)
                }

                fn reflect(&self) -> ReflectRef<'_> {
                    match *self {}
                }

                fn as_any(&self) -> &dyn Any {
                    match *self {}
                }
            }
        )+
    };
}

abstract_base!(RecordBase, EnumBase, NumericTuple);

bitflags::bitflags! {
    /// Host editor visibility flags carried by every record.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct HideFlags: u8 {
        const HIDE_IN_HIERARCHY = 1 << 0;
        const HIDE_IN_INSPECTOR = 1 << 1;
        const DONT_SAVE = 1 << 2;
        const NOT_EDITABLE = 1 << 3;
    }
}

impl Reflect for HideFlags {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<HideFlags>("HideFlags", Shape::Integer)
    }

    fn reflect(&self) -> ReflectRef<'_> {
        ReflectRef::Unsigned(u64::from(self.bits()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An authored config record, identified by a unique name within its type.
pub trait ConfigRecord: Reflect + Send + Sync {
    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);
}

/// Soft link to another record by identity name.
///
/// Serializes as the bare name. An empty name is an unset reference.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef<T> {
    name: String,
    #[serde(skip)]
    _marker: PhantomData<fn() -> T>,
}

impl<T> AssetRef<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_set(&self) -> bool {
        !self.name.is_empty()
    }
}

impl<T> Default for AssetRef<T> {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl<T> Clone for AssetRef<T> {
    fn clone(&self) -> Self {
        Self::new(self.name.clone())
    }
}

impl<T> PartialEq for AssetRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for AssetRef<T> {}

impl<T> fmt::Debug for AssetRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AssetRef").field(&self.name).finish()
    }
}

impl<T: ConfigRecord> Reflect for AssetRef<T> {
    fn type_info() -> TypeInfo {
        const BASES: &[TypeFn] = &[<RecordBase as Reflect>::type_info];
        let target = T::type_info();
        TypeInfo::new::<AssetRef<T>>(
            format!("AssetRef<{}>", target.name()),
            Shape::Reference(T::type_info),
        )
        .with_bases(BASES)
    }

    fn reflect(&self) -> ReflectRef<'_> {
        ReflectRef::Opaque
    }

    fn identity(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
