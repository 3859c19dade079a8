//! Record schemas exported to the game runtime.

mod enums;
mod records;
mod values;

pub use enums::{Currency, Element, ItemKind, Rank};
pub use records::{Item, Pet, Reward, ShopEntry, Skill};
pub use values::{Color, RewardEntry, SkillLevel, StatBlock, Vector3};
