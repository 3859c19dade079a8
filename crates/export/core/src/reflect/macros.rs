//! Declarative macros that build type table entries for schema types.

/// Implements [`Reflect`](crate::Reflect) for a struct.
///
/// Three kinds are supported:
///
/// - `record`: a config record. The struct must also carry `name: String` and
///   `hide_flags: HideFlags`; they are reflected first, declared by
///   [`RecordBase`](crate::RecordBase), and [`ConfigRecord`](crate::ConfigRecord)
///   is implemented on top.
/// - `value`: a plain nested struct.
/// - `tuple`: a fixed-size numeric tuple (vectors, colors), assignable to
///   [`NumericTuple`](crate::NumericTuple).
///
/// Fields are listed in declaration order. `#[skip]` marks a field
/// non-serialized.
///
/// ```ignore
/// reflect_struct! {
///     Item as record {
///         rank,
///         tags,
///         #[skip]
///         editor_notes,
///     }
/// }
/// ```
#[macro_export]
macro_rules! reflect_struct {
    ($ty:ident as record { $( $(#[$flag:ident])* $field:ident ),* $(,)? }) => {
        $crate::reflect_struct!(@impl $ty, record, [$crate::RecordBase], [name, hide_flags], [$( $(#[$flag])* $field ),*]);

        impl $crate::ConfigRecord for $ty {
            fn name(&self) -> &str {
                &self.name
            }

            fn set_name(&mut self, name: String) {
                self.name = name;
            }
        }
    };
    ($ty:ident as value { $( $(#[$flag:ident])* $field:ident ),* $(,)? }) => {
        $crate::reflect_struct!(@impl $ty, value, [], [], [$( $(#[$flag])* $field ),*]);
    };
    ($ty:ident as tuple { $( $(#[$flag:ident])* $field:ident ),* $(,)? }) => {
        $crate::reflect_struct!(@impl $ty, value, [$crate::NumericTuple], [], [$( $(#[$flag])* $field ),*]);
    };
    (@impl $ty:ident, $kind:ident, [$($base:ty),*], [$($bf:ident),*], [$( $(#[$flag:ident])* $field:ident ),*]) => {
        impl $crate::Reflect for $ty {
            fn type_info() -> $crate::TypeInfo {
                const BASES: &[$crate::TypeFn] = &[$( <$base as $crate::Reflect>::type_info ),*];
                let fields = vec![
                    $(
                        $crate::FieldInfo::of(
                            stringify!($bf),
                            <$crate::RecordBase as $crate::Reflect>::type_info,
                            |s: &$ty| &s.$bf,
                        ),
                    )*
                    $(
                        $crate::FieldInfo::of(
                            stringify!($field),
                            <$ty as $crate::Reflect>::type_info,
                            |s: &$ty| &s.$field,
                        )
                        $( .$flag() )*,
                    )*
                ];
                $crate::TypeInfo::new::<$ty>(
                    stringify!($ty),
                    $crate::Shape::Struct {
                        fields,
                        record: $crate::reflect_struct!(@is_record $kind),
                    },
                )
                .with_bases(BASES)
            }

            fn reflect(&self) -> $crate::ReflectRef<'_> {
                $crate::ReflectRef::Struct(vec![
                    $( &self.$bf as &dyn $crate::Reflect, )*
                    $( &self.$field as &dyn $crate::Reflect, )*
                ])
            }

            $crate::reflect_struct!(@identity $kind);

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };
    (@is_record record) => { true };
    (@is_record value) => { false };
    (@identity record) => {
        fn identity(&self) -> Option<&str> {
            Some(&self.name)
        }
    };
    (@identity value) => {};
}

/// Implements [`Reflect`](crate::Reflect) for fieldless enums.
///
/// The enum must be `Copy` and derive `strum::IntoStaticStr` and
/// `strum::VariantNames`; case names come from strum, ordinals from the
/// discriminant.
#[macro_export]
macro_rules! reflect_enum {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl $crate::Reflect for $ty {
                fn type_info() -> $crate::TypeInfo {
                    const BASES: &[$crate::TypeFn] = &[<$crate::EnumBase as $crate::Reflect>::type_info];
                    $crate::TypeInfo::new::<$ty>(
                        stringify!($ty),
                        $crate::Shape::Enum {
                            variants: <$ty as $crate::__private::VariantNames>::VARIANTS,
                        },
                    )
                    .with_bases(BASES)
                }

                fn reflect(&self) -> $crate::ReflectRef<'_> {
                    $crate::ReflectRef::Enum {
                        variant: <&'static str>::from(*self),
                        ordinal: *self as usize,
                    }
                }

                fn as_any(&self) -> &dyn ::std::any::Any {
                    self
                }
            }
        )+
    };
}
