/// Audience resolver: decides whether a tip is worth surfacing to a player
/// in a given role.
///
/// Tips declare who they are written for (`Audience`); the player is assigned
/// one or more positions (`Role`) by the client.  The rule table lives in a
/// single exhaustive `match` so adding a variant to either enum forces a
/// decision here.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::TipRecord;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Position the player has been assigned for this match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Carry,
    Mid,
    Offlane,
    Support,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Carry, Role::Mid, Role::Offlane, Role::Support];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Carry   => "carry",
            Role::Mid     => "mid",
            Role::Offlane => "offlane",
            Role::Support => "support",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "carry" | "safelane" | "pos1"      => Ok(Role::Carry),
            "mid" | "midlane" | "pos2"         => Ok(Role::Mid),
            "offlane" | "offlaner" | "pos3"    => Ok(Role::Offlane),
            "support" | "pos4" | "pos5"        => Ok(Role::Support),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Who a tip is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    /// Everyone, regardless of role.
    All,
    /// Anyone still in the laning stage.
    #[serde(alias = "laning_only")]
    InLane,
    /// Carry, mid and offlane.
    Core,
    Mid,
    Carry,
    Offlane,
    Support,
    SoftSupport,
    HardSupport,
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// Whether a single audience tag is relevant to a player in `role`.
///
/// `InLane` is accepted for every role.  It describes a game phase rather
/// than a position, so there is nothing in `Role` to check it against; tips
/// tagged with it should also carry a role tag if they are role specific.
pub fn is_relevant(audience: Audience, role: Role) -> bool {
    match (audience, role) {
        (Audience::All, _) | (Audience::InLane, _) => true,

        (Audience::Core, Role::Carry | Role::Mid | Role::Offlane) => true,
        (Audience::Core, Role::Support) => false,

        (Audience::Mid, r)     => r == Role::Mid,
        (Audience::Carry, r)   => r == Role::Carry,
        (Audience::Offlane, r) => r == Role::Offlane,

        (Audience::Support | Audience::SoftSupport | Audience::HardSupport, r) => {
            r == Role::Support
        }
    }
}

/// True when any of the tip's audience tags is relevant to any of `roles`.
pub fn tip_matches_roles(tip: &TipRecord, roles: &[Role]) -> bool {
    tip.audience
        .iter()
        .any(|a| roles.iter().any(|r| is_relevant(*a, *r)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, TipRecord};

    fn tip_for(audience: Vec<Audience>) -> TipRecord {
        TipRecord {
            audience,
            ..TipRecord::new(Category::General, "test tip")
        }
    }

    #[test]
    fn all_is_relevant_to_every_role() {
        let tip = tip_for(vec![Audience::All]);
        for role in Role::ALL {
            assert!(tip_matches_roles(&tip, &[role]), "{} should match all", role);
        }
    }

    #[test]
    fn in_lane_is_relevant_to_every_role() {
        for role in Role::ALL {
            assert!(is_relevant(Audience::InLane, role));
        }
    }

    #[test]
    fn core_excludes_support() {
        let tip = tip_for(vec![Audience::Core]);
        assert!(tip_matches_roles(&tip, &[Role::Carry]));
        assert!(tip_matches_roles(&tip, &[Role::Mid]));
        assert!(tip_matches_roles(&tip, &[Role::Offlane]));
        assert!(!tip_matches_roles(&tip, &[Role::Support]));
    }

    #[test]
    fn single_lane_tags_match_only_their_role() {
        let pairs = [
            (Audience::Mid, Role::Mid),
            (Audience::Carry, Role::Carry),
            (Audience::Offlane, Role::Offlane),
        ];
        for (audience, own) in pairs {
            for role in Role::ALL {
                assert_eq!(is_relevant(audience, role), role == own, "{:?} vs {}", audience, role);
            }
        }
    }

    #[test]
    fn support_variants_match_support() {
        for audience in [Audience::Support, Audience::SoftSupport, Audience::HardSupport] {
            assert!(is_relevant(audience, Role::Support));
            assert!(!is_relevant(audience, Role::Carry));
            assert!(!is_relevant(audience, Role::Mid));
            assert!(!is_relevant(audience, Role::Offlane));
        }
    }

    #[test]
    fn any_tag_any_role() {
        let tip = tip_for(vec![Audience::Mid, Audience::HardSupport]);
        assert!(tip_matches_roles(&tip, &[Role::Carry, Role::Support]));
        assert!(!tip_matches_roles(&tip, &[Role::Carry, Role::Offlane]));
    }

    #[test]
    fn empty_role_set_matches_nothing() {
        let tip = tip_for(vec![Audience::All]);
        assert!(!tip_matches_roles(&tip, &[]));
    }

    #[test]
    fn parses_role_names() {
        assert_eq!("MID".parse::<Role>().unwrap(), Role::Mid);
        assert_eq!("pos5".parse::<Role>().unwrap(), Role::Support);
        assert!("jungler".parse::<Role>().is_err());
    }
}
