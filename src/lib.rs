//! Contextual tip selection for a Dota 2 coaching overlay.
//!
//! Given the game clock, the controlled hero, its roles and (for a few tips)
//! its map position, decide which authored coaching tips apply right now.
//!
//! - [`catalog`]: the embedded, validated tip data
//! - [`zones`]: map coordinates to grid cells to lane/jungle zones
//! - [`audience`]: which tips matter for which role
//! - [`query`]: hero tip lookups
//! - [`timing`]: game-clock gating
//! - [`engine`]: everything combined into one eligibility pass
pub mod audience;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod logging;
pub mod query;
pub mod timing;
pub mod zones;

pub use audience::{is_relevant, tip_matches_roles, Audience, Role};
pub use catalog::{Category, CatalogError, TipCatalog, TipRecord};
pub use engine::{select_eligible, HeroPosition, TipContext};
pub use query::normalize_hero_key;
pub use timing::GameMode;
pub use zones::{grid_cell, GridCell, PositionGate, Side, Zone};
