//! Config record schemas.
//!
//! Every record carries the host identity fields `name` and `hide_flags`.
//! Neither is authored in the asset file: the name comes from the file stem
//! and both are left out of the exported tables.

use export_core::{AssetRef, HideFlags, reflect_struct};
use serde::{Deserialize, Serialize};

use super::{Color, Currency, Element, ItemKind, Rank, RewardEntry, SkillLevel, StatBlock, Vector3};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(skip)]
    pub name: String,
    #[serde(skip)]
    pub hide_flags: HideFlags,
    pub kind: ItemKind,
    pub rank: Rank,
    pub tags: Vec<String>,
    pub stack_limit: u32,
    /// Sell price in gold; unsellable when absent.
    pub price: Option<u32>,
    pub icon_tint: Color,
    pub editor_notes: String,
}

reflect_struct! {
    Item as record {
        kind,
        rank,
        tags,
        stack_limit,
        price,
        icon_tint,
        #[skip]
        editor_notes,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pet {
    #[serde(skip)]
    pub name: String,
    #[serde(skip)]
    pub hide_flags: HideFlags,
    pub rank: Rank,
    pub element: Element,
    pub base_stats: StatBlock,
    pub growth: StatBlock,
    pub skills: Vec<AssetRef<Skill>>,
    pub favourite_food: AssetRef<Item>,
    pub evolves_into: AssetRef<Pet>,
    pub model_offset: Vector3,
    pub editor_notes: String,
}

reflect_struct! {
    Pet as record {
        rank,
        element,
        base_stats,
        growth,
        skills,
        favourite_food,
        evolves_into,
        model_offset,
        #[skip]
        editor_notes,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    #[serde(skip)]
    pub name: String,
    #[serde(skip)]
    pub hide_flags: HideFlags,
    pub element: Element,
    pub passive: bool,
    pub range: f32,
    pub levels: Vec<SkillLevel>,
    pub effect_color: Color,
}

reflect_struct!(Skill as record { element, passive, range, levels, effect_color });

/// Weighted drop table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reward {
    #[serde(skip)]
    pub name: String,
    #[serde(skip)]
    pub hide_flags: HideFlags,
    pub rolls: u8,
    pub entries: Vec<RewardEntry>,
    pub guaranteed: Option<AssetRef<Item>>,
}

reflect_struct!(Reward as record { rolls, entries, guaranteed });

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopEntry {
    #[serde(skip)]
    pub name: String,
    #[serde(skip)]
    pub hide_flags: HideFlags,
    pub item: AssetRef<Item>,
    pub currency: Currency,
    pub price: u32,
    /// Units available per reset; unlimited when absent.
    pub stock: Option<u32>,
    pub featured: bool,
}

reflect_struct!(ShopEntry as record { item, currency, price, stock, featured });
