//! Field filter policy.
//!
//! Decides per (declaring type, field) whether a field is emitted as-is,
//! emitted through a converter, or suppressed. Decisions depend only on the
//! declared schema, never on values.

use std::any::TypeId;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::convert::{Converter, ConverterRegistry, RegistryError};
use crate::reflect::{FieldInfo, RecordBase, TypeInfo};

/// Outcome of [`FieldPolicy::decide`].
#[derive(Clone)]
pub enum Decision {
    Emit,
    Convert(Arc<dyn Converter>),
    Suppress,
}

impl Decision {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppress)
    }
}

impl fmt::Debug for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Emit => f.write_str("Emit"),
            Self::Convert(converter) => f.debug_tuple("Convert").field(&converter.name()).finish(),
            Self::Suppress => f.write_str("Suppress"),
        }
    }
}

/// Per-field emit/convert/suppress rules.
///
/// Rules in priority order:
/// 1. fields declared by [`RecordBase`] (host identity fields) are suppressed
/// 2. non-serialized fields and explicitly suppressed `(type, field)` pairs
///    are suppressed
/// 3. fields whose type has a converter are converted
/// 4. everything else is emitted as-is
#[derive(Clone, Debug, Default)]
pub struct FieldPolicy {
    suppressed: HashSet<(String, String)>,
}

impl FieldPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Additionally suppresses `field` on the type named `type_name`.
    pub fn suppress(&mut self, type_name: impl Into<String>, field: impl Into<String>) {
        self.suppressed.insert((type_name.into(), field.into()));
    }

    pub fn decide(
        &self,
        declaring: &TypeInfo,
        field: &FieldInfo,
        converters: &ConverterRegistry,
    ) -> Result<Decision, RegistryError> {
        if field.declaring_type().id() == TypeId::of::<RecordBase>() {
            return Ok(Decision::Suppress);
        }

        if field.is_non_serialized()
            || self
                .suppressed
                .contains(&(declaring.name().to_string(), field.name.to_string()))
        {
            return Ok(Decision::Suppress);
        }

        Ok(match converters.lookup(&field.field_type())? {
            Some(converter) => Decision::Convert(converter),
            None => Decision::Emit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HideFlags, Reflect, reflect_enum, reflect_struct};

    #[derive(Clone, Copy, Default, strum::IntoStaticStr, strum::VariantNames)]
    enum Mood {
        #[default]
        Calm,
    }
    reflect_enum!(Mood);

    #[derive(Default)]
    struct Pet {
        name: String,
        hide_flags: HideFlags,
        mood: Mood,
        level: u32,
        cache: Vec<u8>,
        debug_label: String,
    }
    reflect_struct! {
        Pet as record {
            mood,
            level,
            #[skip]
            cache,
            debug_label,
        }
    }

    fn decisions(policy: &FieldPolicy) -> Vec<(&'static str, String)> {
        let registry = ConverterRegistry::with_builtins();
        let info = Pet::type_info();
        info.fields()
            .iter()
            .map(|field| {
                let decision = policy.decide(&info, field, &registry).unwrap();
                (field.name, format!("{decision:?}"))
            })
            .collect()
    }

    #[test]
    fn test_rules_in_priority_order() {
        let got = decisions(&FieldPolicy::new());
        assert_eq!(
            got,
            [
                ("name", "Suppress".to_string()),
                ("hide_flags", "Suppress".to_string()),
                ("mood", "Convert(\"enum\")".to_string()),
                ("level", "Emit".to_string()),
                ("cache", "Suppress".to_string()),
                ("debug_label", "Emit".to_string()),
            ]
        );
    }

    #[test]
    fn test_explicit_suppression() {
        let mut policy = FieldPolicy::new();
        policy.suppress("Pet", "debug_label");
        let got = decisions(&policy);
        assert_eq!(got[5], ("debug_label", "Suppress".to_string()));
        assert_eq!(got[3], ("level", "Emit".to_string()));
    }
}
