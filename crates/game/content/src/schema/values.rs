//! Value types embedded in records.

use export_core::{AssetRef, reflect_struct};
use serde::{Deserialize, Serialize};

use super::{Item, Skill};

/// Position or offset in model space. Exported as `{x, y, z}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

reflect_struct!(Vector3 as tuple { x, y, z });

/// Linear RGBA. Exported as `{r, g, b, a}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self {
            r: 1.0,
            g: 1.0,
            b: 1.0,
            a: 1.0,
        }
    }
}

reflect_struct!(Color as tuple { r, g, b, a });

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: f32,
    pub crit_rate: f32,
}

reflect_struct!(StatBlock as value { hp, attack, defense, speed, crit_rate });

/// One weighted drop of a reward table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardEntry {
    pub item: AssetRef<Item>,
    pub amount: u32,
    pub weight: f32,
}

reflect_struct!(RewardEntry as value { item, amount, weight });

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillLevel {
    pub level: u8,
    pub power: f32,
    pub cooldown: f32,
    pub description: String,
    /// Skill unlocked alongside this level, if any.
    pub unlocks: Option<AssetRef<Skill>>,
}

reflect_struct!(SkillLevel as value { level, power, cooldown, description, unlocks });
