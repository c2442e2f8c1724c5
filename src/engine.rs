/// Tip selection: the single question the overlay asks every game tick:
/// "which tips apply right now?"
///
/// Combines time gating, category preferences, hero/role filtering and
/// position gates into one pass over the catalog.  The result is in catalog
/// order.  Deciding which of several eligible tips to actually play, and
/// remembering what has already played, is the playback scheduler's job.
use serde::{Deserialize, Serialize};

use crate::{
    audience::{tip_matches_roles, Role},
    catalog::{Category, TipCatalog, TipRecord},
    query::normalize_hero_key,
    timing::GameMode,
    zones::Side,
};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Live hero position as reported by the game client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeroPosition {
    pub x:    f32,
    pub y:    f32,
    pub side: Side,
}

/// Read-only snapshot of the game state for one selection pass.
#[derive(Debug, Clone, Default)]
pub struct TipContext<'a> {
    pub clock_s:  i32,
    pub mode:     GameMode,
    /// Controlled hero, with or without the client prefix.
    pub hero:     Option<&'a str>,
    /// Assigned roles.  Empty means "unknown" and disables role filtering.
    pub roles:    &'a [Role],
    pub enemies:  &'a [String],
    pub position: Option<HeroPosition>,
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

fn roles_allow(tip: &TipRecord, roles: &[Role]) -> bool {
    roles.is_empty() || tip_matches_roles(tip, roles)
}

fn hero_allows(tip: &TipRecord, ctx: &TipContext) -> bool {
    let tip_hero = tip.hero.as_deref();
    match tip.category {
        Category::OwnHero => {
            let own = ctx.hero.map(normalize_hero_key);
            own.is_some() && own == tip_hero && roles_allow(tip, ctx.roles)
        }
        Category::EnemyHero => ctx
            .enemies
            .iter()
            .any(|e| Some(normalize_hero_key(e)) == tip_hero),
        _ => roles_allow(tip, ctx.roles),
    }
}

fn position_allows(tip: &TipRecord, position: Option<HeroPosition>) -> bool {
    match (&tip.position, position) {
        (None, _)                 => true,
        (Some(_), None)           => false,
        (Some(gate), Some(pos))   => gate.allows(pos.x, pos.y, pos.side),
    }
}

/// Every tip that applies at `ctx.clock_s`, skipping `disabled` categories.
pub fn select_eligible<'c>(
    catalog:  &'c TipCatalog,
    ctx:      &TipContext,
    disabled: &[Category],
) -> Vec<&'c TipRecord> {
    let tips: Vec<&TipRecord> = catalog
        .iter()
        .filter(|t| !disabled.contains(&t.category))
        .filter(|t| t.is_due(ctx.clock_s, ctx.mode))
        .filter(|t| hero_allows(t, ctx))
        .filter(|t| position_allows(t, ctx.position))
        .collect();

    if !tips.is_empty() {
        tracing::debug!("{} tips eligible at {}s", tips.len(), ctx.clock_s);
    }
    tips
}
