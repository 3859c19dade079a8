//! `Reflect` for std types.

use std::any::Any;
use std::sync::Arc;

use super::{Reflect, ReflectRef, Shape, TypeInfo};

impl Reflect for bool {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<bool>("bool", Shape::Bool)
    }

    fn reflect(&self) -> ReflectRef<'_> {
        ReflectRef::Bool(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

macro_rules! reflect_signed {
    ($($ty:ty),+) => {
        $(
            impl Reflect for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::new::<$ty>(stringify!($ty), Shape::Integer)
                }

                fn reflect(&self) -> ReflectRef<'_> {
                    ReflectRef::Int(i64::from(*self))
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )+
    };
}

macro_rules! reflect_unsigned {
    ($($ty:ty),+) => {
        $(
            impl Reflect for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::new::<$ty>(stringify!($ty), Shape::Integer)
                }

                fn reflect(&self) -> ReflectRef<'_> {
                    ReflectRef::Unsigned(u64::from(*self))
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )+
    };
}

reflect_signed!(i8, i16, i32, i64);
reflect_unsigned!(u8, u16, u32, u64);

impl Reflect for usize {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<usize>("usize", Shape::Integer)
    }

    fn reflect(&self) -> ReflectRef<'_> {
        ReflectRef::Unsigned(*self as u64)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Reflect for f32 {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<f32>("f32", Shape::Float)
    }

    // Widening through the shortest f32 decimal keeps 0.1f32 as 0.1 rather
    // than 0.10000000149011612.
    fn reflect(&self) -> ReflectRef<'_> {
        let widened = self
            .to_string()
            .parse::<f64>()
            .unwrap_or_else(|_| f64::from(*self));
        ReflectRef::Float(widened)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Reflect for f64 {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<f64>("f64", Shape::Float)
    }

    fn reflect(&self) -> ReflectRef<'_> {
        ReflectRef::Float(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Reflect for String {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<String>("String", Shape::String)
    }

    fn reflect(&self) -> ReflectRef<'_> {
        ReflectRef::Str(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn type_info() -> TypeInfo {
        let inner = T::type_info();
        TypeInfo::new::<Option<T>>(format!("{}?", inner.name()), Shape::Optional(T::type_info))
    }

    fn reflect(&self) -> ReflectRef<'_> {
        ReflectRef::Option(self.as_ref().map(|value| value as &dyn Reflect))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn type_info() -> TypeInfo {
        let element = T::type_info();
        TypeInfo::new::<Vec<T>>(format!("{}[]", element.name()), Shape::Sequence(T::type_info))
    }

    fn reflect(&self) -> ReflectRef<'_> {
        ReflectRef::Seq(self.iter().map(|value| value as &dyn Reflect).collect())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// Boxes and Arcs are transparent: an `Arc<R>` of a record is a reference to
// that record and resolves to the record's own type entry.
macro_rules! reflect_pointer {
    ($($ptr:ident),+) => {
        $(
            impl<T: Reflect> Reflect for $ptr<T> {
                fn type_info() -> TypeInfo {
                    T::type_info()
                }

                fn reflect(&self) -> ReflectRef<'_> {
                    (**self).reflect()
                }

                fn identity(&self) -> Option<&str> {
                    (**self).identity()
                }

                fn as_any(&self) -> &dyn Any {
                    (**self).as_any()
                }
            }
        )+
    };
}

reflect_pointer!(Box, Arc);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_widens_to_shortest_decimal() {
        match 0.1f32.reflect() {
            ReflectRef::Float(value) => assert_eq!(value, 0.1),
            other => panic!("unexpected {}", other.kind()),
        }
    }

    #[test]
    fn test_container_names() {
        assert_eq!(<Vec<String>>::type_info().name(), "String[]");
        assert_eq!(<Option<u32>>::type_info().name(), "u32?");
        assert_eq!(<Vec<Option<i64>>>::type_info().name(), "i64?[]");
    }

    #[test]
    fn test_pointers_are_transparent() {
        let boxed = Box::new(7u8);
        assert_eq!(<Box<u8>>::type_info().id(), u8::type_info().id());
        assert!(matches!(boxed.reflect(), ReflectRef::Unsigned(7)));
        assert!(boxed.as_any().downcast_ref::<u8>().is_some());
    }

    #[test]
    fn test_option_reflects_inner() {
        let some = Some(3i32);
        let ReflectRef::Option(Some(inner)) = some.reflect() else {
            panic!("expected Some");
        };
        assert!(matches!(inner.reflect(), ReflectRef::Int(3)));
        assert!(matches!(None::<i32>.reflect(), ReflectRef::Option(None)));
    }
}
