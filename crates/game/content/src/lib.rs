//! Data-driven config records and their exporters.
//!
//! This crate houses the closed set of config schemas authored for the game
//! and wires them into the export pipeline:
//! - [`schema`] declares records (items, pets, skills, rewards, shop entries)
//!   and the enums and value types they embed
//! - [`loaders`] reads one record per RON file
//! - [`exporters`] builds the exporter registry and pipeline
//!
//! The output of every exporter is a Lua table consumed by the game runtime.

pub mod exporters;
pub mod loaders;
pub mod schema;

pub use exporters::{SOURCE_DIRS, exporters, pipeline, registry};
pub use loaders::{LoadResult, RonAssetIndex, leading_type_name, load_record};
pub use schema::{
    Color, Currency, Element, Item, ItemKind, Pet, Rank, Reward, RewardEntry, ShopEntry, Skill,
    SkillLevel, StatBlock, Vector3,
};
