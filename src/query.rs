/// Hero tip lookups: the entry points the overlay calls when a hero is
/// picked, a role is assigned or enemy heroes become known.
///
/// Results borrow from the catalog and keep catalog order.  An unknown hero
/// simply gets an empty list.
use crate::audience::{tip_matches_roles, Role};
use crate::catalog::{Category, TipCatalog, TipRecord};

/// Prefix the game client puts on internal hero names.
pub const HERO_PREFIX: &str = "npc_dota_hero_";

/// Strip the client prefix from a hero name.  Idempotent.
pub fn normalize_hero_key(hero: &str) -> &str {
    let hero = hero.trim();
    hero.strip_prefix(HERO_PREFIX).unwrap_or(hero)
}

impl TipCatalog {
    fn hero_tips(&self, category: Category, hero: &str) -> Vec<&TipRecord> {
        let key = normalize_hero_key(hero);
        self.iter()
            .filter(|t| t.category == category && t.hero.as_deref() == Some(key))
            .collect()
    }

    /// Every tip about playing `hero`, regardless of role.
    pub fn own_hero_tips(&self, hero: &str) -> Vec<&TipRecord> {
        let tips = self.hero_tips(Category::OwnHero, hero);
        tracing::debug!("own hero tips for '{}': {}", hero, tips.len());
        tips
    }

    /// Tips about playing `hero` that are relevant to at least one of `roles`.
    pub fn own_hero_tips_for_roles(&self, hero: &str, roles: &[Role]) -> Vec<&TipRecord> {
        let tips: Vec<_> = self
            .hero_tips(Category::OwnHero, hero)
            .into_iter()
            .filter(|t| tip_matches_roles(t, roles))
            .collect();
        tracing::debug!("own hero tips for '{}' as {:?}: {}", hero, roles, tips.len());
        tips
    }

    /// Tips about playing against `hero`.
    pub fn enemy_hero_tips(&self, hero: &str) -> Vec<&TipRecord> {
        let tips = self.hero_tips(Category::EnemyHero, hero);
        tracing::debug!("enemy hero tips for '{}': {}", hero, tips.len());
        tips
    }
}
