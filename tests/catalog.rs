//! Checks against the embedded tip data through the public API.
use dota_coach_lib::{
    grid_cell, select_eligible, tip_matches_roles, Audience, Category, GameMode, GridCell,
    HeroPosition, Role, Side, TipCatalog, TipContext,
};

fn catalog() -> &'static TipCatalog {
    TipCatalog::embedded().expect("embedded tips should load")
}

#[test]
fn embedded_tips_satisfy_invariants() {
    let c = catalog();
    assert!(c.len() > 40);
    for tip in c.iter() {
        if tip.category.is_hero_specific() {
            let hero = tip.hero.as_deref().unwrap_or("");
            assert!(!hero.is_empty(), "hero tip without hero: {}", tip.text);
            assert!(!hero.starts_with("npc_dota_hero_"), "unnormalized hero {}", hero);
        }
        if tip.position.is_some() {
            assert!(!tip.timings(GameMode::Normal).is_empty(), "gated tip without timing: {}", tip.text);
        }
        assert!(!tip.audio.is_empty(), "tip without audio: {}", tip.text);
    }
}

#[test]
fn all_audience_tips_match_every_role() {
    for tip in catalog().iter().filter(|t| t.audience == [Audience::All]) {
        for role in Role::ALL {
            assert!(tip_matches_roles(tip, &[role]), "{} / {}", tip.text, role);
        }
    }
}

#[test]
fn core_only_tips_skip_supports() {
    let core_only: Vec<_> = catalog().iter().filter(|t| t.audience == [Audience::Core]).collect();
    assert!(!core_only.is_empty());
    for tip in core_only {
        assert!(tip_matches_roles(tip, &[Role::Carry]));
        assert!(tip_matches_roles(tip, &[Role::Mid]));
        assert!(tip_matches_roles(tip, &[Role::Offlane]));
        assert!(!tip_matches_roles(tip, &[Role::Support]));
    }
}

#[test]
fn hero_prefix_does_not_change_results() {
    let c = catalog();
    let plain = c.own_hero_tips("antimage");
    assert!(!plain.is_empty());
    assert_eq!(c.own_hero_tips("npc_dota_hero_antimage"), plain);
    assert_eq!(c.enemy_hero_tips("npc_dota_hero_antimage"), c.enemy_hero_tips("antimage"));
}

#[test]
fn abaddon_support_tips() {
    let c = catalog();
    let tips = c.own_hero_tips_for_roles("abaddon", &[Role::Support]);

    let expected: Vec<_> = c
        .own_hero_tips("abaddon")
        .into_iter()
        .filter(|t| {
            t.audience.iter().any(|a| {
                matches!(a, Audience::All | Audience::Support | Audience::SoftSupport | Audience::HardSupport)
            })
        })
        .collect();
    assert_eq!(tips, expected);
    assert_eq!(tips.len(), 3);
    assert!(tips.iter().all(|t| t.hero.as_deref() == Some("abaddon")));
    assert!(tips.iter().all(|t| !t.audience.contains(&Audience::Mid)));
}

#[test]
fn unknown_hero_has_no_tips() {
    let c = catalog();
    assert!(c.own_hero_tips("npc_dota_hero_not_real").is_empty());
    assert!(c.enemy_hero_tips("").is_empty());
}

#[test]
fn first_bounty_tip_is_at_horn() {
    let tip = catalog().find_by_category(Category::BountyRunes).unwrap();
    assert_eq!(tip.audio, "bounty_runes_first");
    assert!(tip.is_due(0, GameMode::Normal));
}

#[test]
fn origin_maps_to_centre_cell() {
    assert_eq!(grid_cell(0.0, 0.0), GridCell { x: 8, y: 8 });
}

#[test]
fn radiant_support_in_own_jungle_gets_stack_call() {
    let roles = [Role::Support];
    let ctx = TipContext {
        clock_s:  53,
        roles:    &roles,
        position: Some(HeroPosition { x: 1500.0, y: -4500.0, side: Side::Radiant }),
        ..TipContext::default()
    };
    let tips = select_eligible(catalog(), &ctx, &[]);
    assert!(tips.iter().any(|t| t.audio == "stacking_first"));

    let disabled = select_eligible(catalog(), &ctx, &[Category::Stacking]);
    assert!(disabled.iter().all(|t| t.category != Category::Stacking));
}

#[test]
fn stack_call_needs_own_jungle() {
    let roles = [Role::Support];
    let ctx = TipContext {
        clock_s:  53,
        roles:    &roles,
        position: Some(HeroPosition { x: 0.0, y: 0.0, side: Side::Radiant }),
        ..TipContext::default()
    };
    let tips = select_eligible(catalog(), &ctx, &[]);
    assert!(tips.iter().all(|t| t.category != Category::Stacking));
}
