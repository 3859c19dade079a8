//! Converter registry.
//!
//! A converter overrides the default field-by-field expansion for one type
//! and everything assignable to it. Lookup is exact-type first, then the
//! nearest base; a tie between unrelated bases is a configuration error.

mod builtin;

use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use thiserror::Error;

use crate::reflect::{Reflect, TypeInfo};
use crate::value::Value;

pub use builtin::{EnumConverter, NamedReferenceConverter, NumericTupleConverter};

/// Failure converting a single value.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },

    #[error("value has no identity name")]
    MissingIdentity,

    #[error("non-finite number {0}")]
    NonFinite(f64),

    #[error("{0}")]
    Custom(String),
}

/// Type-directed override turning a value into part of the intermediate tree.
pub trait Converter: Send + Sync {
    /// Short label used in logs and diagnostics.
    fn name(&self) -> &'static str;

    fn convert(&self, value: &dyn Reflect) -> Result<Value, ConvertError>;

    /// EmmyLua type of the converted values, when it is fixed.
    fn annotation(&self) -> Option<&'static str> {
        None
    }
}

/// Errors in the converter configuration itself.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("converter for `{0}` registered twice")]
    Duplicate(String),

    #[error("ambiguous converters for `{ty}`: {candidates:?}")]
    Ambiguous { ty: String, candidates: Vec<String> },
}

struct Registration {
    info: TypeInfo,
    converter: Arc<dyn Converter>,
}

/// Maps types to converters.
#[derive(Default)]
pub struct ConverterRegistry {
    entries: HashMap<TypeId, Registration>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the named-reference, numeric-tuple and enum converters.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (info, converter) in builtin::builtins() {
            registry.entries.insert(info.id(), Registration { info, converter });
        }
        registry
    }

    /// Adds the built-in converters to an existing registry.
    pub fn register_builtins(&mut self) -> Result<(), RegistryError> {
        builtin::builtins()
            .into_iter()
            .try_for_each(|(info, converter)| self.insert(info, converter))
    }

    /// Registers `converter` for `T` and everything assignable to it.
    pub fn register<T: Reflect>(
        &mut self,
        converter: impl Converter + 'static,
    ) -> Result<(), RegistryError> {
        self.insert(T::type_info(), Arc::new(converter))
    }

    pub(crate) fn insert(
        &mut self,
        info: TypeInfo,
        converter: Arc<dyn Converter>,
    ) -> Result<(), RegistryError> {
        if self.entries.contains_key(&info.id()) {
            return Err(RegistryError::Duplicate(info.name().to_string()));
        }
        self.entries.insert(info.id(), Registration { info, converter });
        Ok(())
    }

    /// Finds the converter for `ty`: exact match first, then the most
    /// specific registered base.
    ///
    /// Every ancestor is considered, whatever its distance. A matching base
    /// that another match derives from is dropped; two or more unrelated
    /// matches left over are [`RegistryError::Ambiguous`].
    pub fn lookup(&self, ty: &TypeInfo) -> Result<Option<Arc<dyn Converter>>, RegistryError> {
        if let Some(entry) = self.entries.get(&ty.id()) {
            return Ok(Some(Arc::clone(&entry.converter)));
        }

        let mut visited = HashSet::from([ty.id()]);
        let mut frontier: Vec<TypeInfo> = ty.bases().collect();
        let mut matches: Vec<&Registration> = Vec::new();

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for base in frontier {
                if !visited.insert(base.id()) {
                    continue;
                }
                if let Some(entry) = self.entries.get(&base.id()) {
                    matches.push(entry);
                }
                next.extend(base.bases());
            }
            frontier = next;
        }

        let specific: Vec<&Registration> = matches
            .iter()
            .copied()
            .filter(|candidate| {
                !matches.iter().any(|other| {
                    other.info.id() != candidate.info.id()
                        && other.info.is_assignable_to(candidate.info.id())
                })
            })
            .collect();

        match specific.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(Arc::clone(&only.converter))),
            many => {
                let mut candidates: Vec<String> =
                    many.iter().map(|r| r.info.name().to_string()).collect();
                candidates.sort();
                Err(RegistryError::Ambiguous {
                    ty: ty.name().to_string(),
                    candidates,
                })
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered type names (for debugging).
    pub fn type_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.values().map(|r| r.info.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::{NumericTuple, ReflectRef, Shape};
    use std::any::Any;

    struct Fixed(&'static str);

    impl Converter for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn convert(&self, _value: &dyn Reflect) -> Result<Value, ConvertError> {
            Ok(Value::from(self.0))
        }
    }

    enum Left {}
    enum Right {}
    enum Middle {}
    struct Both;
    struct Deep;
    enum Below {}
    struct Lopsided;

    macro_rules! marker {
        ($ty:ident, [$($base:ident),*]) => {
            impl Reflect for $ty {
                fn type_info() -> TypeInfo {
                    const BASES: &[crate::reflect::TypeFn] = &[$( <$base as Reflect>::type_info ),*];
                    TypeInfo::new::<$ty>(stringify!($ty), Shape::Abstract).with_bases(BASES)
                }

                fn reflect(&self) -> ReflectRef<'_> {
                    ReflectRef::Opaque
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        };
    }

    marker!(Left, []);
    marker!(Right, []);
    marker!(Middle, [Left]);
    marker!(Both, [Left, Right]);
    marker!(Deep, [Middle, Left]);
    marker!(Below, [Right]);
    marker!(Lopsided, [Left, Below]);

    #[test]
    fn test_exact_match_wins() {
        let mut registry = ConverterRegistry::new();
        registry.register::<Left>(Fixed("left")).unwrap();
        registry.register::<Both>(Fixed("both")).unwrap();

        let found = registry.lookup(&Both::type_info()).unwrap().unwrap();
        assert_eq!(found.name(), "both");
    }

    #[test]
    fn test_base_match() {
        let mut registry = ConverterRegistry::new();
        registry.register::<Left>(Fixed("left")).unwrap();

        let found = registry.lookup(&Middle::type_info()).unwrap().unwrap();
        assert_eq!(found.name(), "left");
        assert!(registry.lookup(&Right::type_info()).unwrap().is_none());
    }

    #[test]
    fn test_unrelated_bases_are_ambiguous() {
        let mut registry = ConverterRegistry::new();
        registry.register::<Left>(Fixed("left")).unwrap();
        registry.register::<Right>(Fixed("right")).unwrap();

        let err = registry.lookup(&Both::type_info()).err().unwrap();
        match err {
            RegistryError::Ambiguous { ty, candidates } => {
                assert_eq!(ty, "Both");
                assert_eq!(candidates, ["Left", "Right"]);
            }
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn test_unrelated_bases_at_different_depths_are_ambiguous() {
        let mut registry = ConverterRegistry::new();
        registry.register::<Left>(Fixed("left")).unwrap();
        registry.register::<Right>(Fixed("right")).unwrap();

        // Left is a direct base, Right only reachable through Below.
        let err = registry.lookup(&Lopsided::type_info()).err().unwrap();
        match err {
            RegistryError::Ambiguous { ty, candidates } => {
                assert_eq!(ty, "Lopsided");
                assert_eq!(candidates, ["Left", "Right"]);
            }
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn test_related_bases_prefer_more_specific() {
        let mut registry = ConverterRegistry::new();
        registry.register::<Left>(Fixed("left")).unwrap();
        registry.register::<Middle>(Fixed("middle")).unwrap();

        // Deep lists both Middle and Left as direct bases; Middle derives from Left.
        let found = registry.lookup(&Deep::type_info()).unwrap().unwrap();
        assert_eq!(found.name(), "middle");
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = ConverterRegistry::with_builtins();
        let err = registry
            .register::<NumericTuple>(Fixed("again"))
            .err()
            .unwrap();
        assert!(matches!(err, RegistryError::Duplicate(name) if name == "NumericTuple"));
    }
}
