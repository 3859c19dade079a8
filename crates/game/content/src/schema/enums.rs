//! Enumerations shared by the record schemas.

use export_core::reflect_enum;
use serde::{Deserialize, Serialize};
use strum::{IntoStaticStr, VariantNames};

/// Rarity tier. Exported by name, so inserting a tier never shifts the
/// meaning of existing data.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    IntoStaticStr,
    VariantNames,
)]
#[allow(clippy::upper_case_acronyms)]
pub enum Rank {
    #[default]
    N,
    R,
    SR,
    SSR,
    UR,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoStaticStr,
    VariantNames,
)]
pub enum Element {
    #[default]
    Neutral,
    Fire,
    Water,
    Earth,
    Wind,
    Light,
    Dark,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoStaticStr,
    VariantNames,
)]
pub enum ItemKind {
    #[default]
    Material,
    Weapon,
    Armor,
    Consumable,
    Key,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoStaticStr,
    VariantNames,
)]
pub enum Currency {
    #[default]
    Gold,
    Gem,
    Ticket,
}

reflect_enum!(Rank, Element, ItemKind, Currency);
