//! Built-in converters.

use std::sync::Arc;

use crate::reflect::{EnumBase, NumericTuple, RecordBase, Reflect, ReflectRef, TypeInfo};
use crate::value::Value;

use super::{ConvertError, Converter};

pub(super) fn builtins() -> Vec<(TypeInfo, Arc<dyn Converter>)> {
    vec![
        (
            RecordBase::type_info(),
            Arc::new(NamedReferenceConverter) as Arc<dyn Converter>,
        ),
        (
            NumericTuple::type_info(),
            Arc::new(NumericTupleConverter::default()),
        ),
        (EnumBase::type_info(), Arc::new(EnumConverter)),
    ]
}

/// Renders any record, or reference to one, as its bare identity name.
///
/// Reference edges become soft string links, so records are never expanded
/// inside other records and reference cycles cannot reach the output.
#[derive(Clone, Copy, Debug, Default)]
pub struct NamedReferenceConverter;

impl Converter for NamedReferenceConverter {
    fn name(&self) -> &'static str {
        "named-reference"
    }

    fn annotation(&self) -> Option<&'static str> {
        Some("string")
    }

    fn convert(&self, value: &dyn Reflect) -> Result<Value, ConvertError> {
        match value.identity() {
            Some("") => Ok(Value::Null),
            Some(name) => Ok(Value::String(name.to_string())),
            None => match value.reflect() {
                ReflectRef::Option(None) => Ok(Value::Null),
                _ => Err(ConvertError::MissingIdentity),
            },
        }
    }
}

/// Renders vectors and colors as numeric arrays rounded to a fixed number of
/// decimal digits.
#[derive(Clone, Copy, Debug)]
pub struct NumericTupleConverter {
    decimals: i32,
}

impl NumericTupleConverter {
    pub const DEFAULT_DECIMALS: i32 = 3;

    pub fn new(decimals: i32) -> Self {
        Self { decimals }
    }

    fn round(&self, component: f64) -> Result<f64, ConvertError> {
        if !component.is_finite() {
            return Err(ConvertError::NonFinite(component));
        }
        let scale = 10f64.powi(self.decimals);
        let rounded = (component * scale).round() / scale;
        // Collapse -0 so it never renders as "-0".
        Ok(if rounded == 0.0 { 0.0 } else { rounded })
    }
}

impl Default for NumericTupleConverter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DECIMALS)
    }
}

impl Converter for NumericTupleConverter {
    fn name(&self) -> &'static str {
        "numeric-tuple"
    }

    fn annotation(&self) -> Option<&'static str> {
        Some("number[]")
    }

    fn convert(&self, value: &dyn Reflect) -> Result<Value, ConvertError> {
        let ReflectRef::Struct(components) = value.reflect() else {
            return Err(ConvertError::UnexpectedShape {
                expected: "struct of numbers",
                found: value.reflect().kind(),
            });
        };

        components
            .into_iter()
            .map(|component| match component.reflect() {
                ReflectRef::Float(f) => self.round(f).map(Value::Float),
                ReflectRef::Int(i) => Ok(Value::Integer(i)),
                ReflectRef::Unsigned(u) => i64::try_from(u)
                    .map(Value::Integer)
                    .map_err(|_| ConvertError::Custom(format!("component {u} out of range"))),
                other => Err(ConvertError::UnexpectedShape {
                    expected: "number",
                    found: other.kind(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Sequence)
    }
}

/// Renders an enum as its symbolic case name, never its ordinal.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnumConverter;

impl Converter for EnumConverter {
    fn name(&self) -> &'static str {
        "enum"
    }

    fn annotation(&self) -> Option<&'static str> {
        Some("string")
    }

    fn convert(&self, value: &dyn Reflect) -> Result<Value, ConvertError> {
        match value.reflect() {
            ReflectRef::Enum { variant, .. } => Ok(Value::String(variant.to_string())),
            other => Err(ConvertError::UnexpectedShape {
                expected: "enum",
                found: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::AssetRef;
    use crate::{HideFlags, reflect_enum, reflect_struct};

    #[derive(Default)]
    struct Vec3 {
        x: f32,
        y: f32,
        z: f32,
    }
    reflect_struct!(Vec3 as tuple { x, y, z });

    #[derive(Default)]
    struct Wide {
        a: f64,
        b: u8,
    }
    reflect_struct!(Wide as tuple { a, b });

    #[derive(Default)]
    struct Card {
        name: String,
        hide_flags: HideFlags,
    }
    reflect_struct!(Card as record {});

    #[derive(Clone, Copy, strum::IntoStaticStr, strum::VariantNames)]
    #[allow(clippy::upper_case_acronyms)]
    enum Rank {
        N,
        SR,
        SSR,
    }
    reflect_enum!(Rank);

    #[test]
    fn test_vector_rounds_to_three_decimals() {
        let v = Vec3 {
            x: 1.23456,
            y: 0.0,
            z: -2.0,
        };
        let value = NumericTupleConverter::default().convert(&v).unwrap();
        assert_eq!(
            value,
            Value::Sequence(vec![
                Value::Float(1.235),
                Value::Float(0.0),
                Value::Float(-2.0)
            ])
        );
    }

    #[test]
    fn test_negative_zero_collapses() {
        let v = Vec3 {
            x: -0.0001,
            y: -0.0,
            z: 0.0,
        };
        let Value::Sequence(items) = NumericTupleConverter::default().convert(&v).unwrap() else {
            panic!("expected sequence");
        };
        for item in items {
            let Value::Float(f) = item else {
                panic!("expected float");
            };
            assert!(f.is_sign_positive());
        }
    }

    #[test]
    fn test_tuple_rejects_non_finite() {
        let v = Wide {
            a: f64::NAN,
            b: 1,
        };
        assert!(matches!(
            NumericTupleConverter::default().convert(&v),
            Err(ConvertError::NonFinite(_))
        ));
    }

    #[test]
    fn test_tuple_keeps_integer_components() {
        let v = Wide { a: 0.5, b: 9 };
        let value = NumericTupleConverter::new(1).convert(&v).unwrap();
        assert_eq!(
            value,
            Value::Sequence(vec![Value::Float(0.5), Value::Integer(9)])
        );
    }

    #[test]
    fn test_enum_uses_symbolic_name() {
        let value = EnumConverter.convert(&Rank::SSR).unwrap();
        assert_eq!(value, Value::from("SSR"));
        assert_eq!(EnumConverter.convert(&Rank::N).unwrap(), Value::from("N"));
        assert!(EnumConverter.convert(&Rank::SR).is_ok());
    }

    #[test]
    fn test_named_reference_uses_identity() {
        let card = Card {
            name: "Sword".into(),
            ..Default::default()
        };
        let value = NamedReferenceConverter.convert(&card).unwrap();
        assert_eq!(value, Value::from("Sword"));

        let link: AssetRef<Card> = AssetRef::new("Shield");
        assert_eq!(
            NamedReferenceConverter.convert(&link).unwrap(),
            Value::from("Shield")
        );
    }

    #[test]
    fn test_unset_reference_is_null() {
        let link: AssetRef<Card> = AssetRef::default();
        assert_eq!(NamedReferenceConverter.convert(&link).unwrap(), Value::Null);
        assert!(matches!(
            NamedReferenceConverter.convert(&5u32),
            Err(ConvertError::MissingIdentity)
        ));
    }
}
