/// Tip catalog: the full set of authored coaching tips, embedded at compile
/// time from `data/tips/*.toml`.
///
/// The catalog is plain data: timing, audience, optional position gate and
/// the text to speak.  It is parsed and validated once, then never changes.
/// `TipCatalog::embedded()` is the process-wide instance; tests and the
/// config's extra tip directory build their own with `from_toml` / `new`.
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::audience::Audience;
use crate::query::normalize_hero_key;
use crate::timing::Timing;
use crate::zones::PositionGate;

// ---------------------------------------------------------------------------
// Embedded TOML data
// ---------------------------------------------------------------------------

const GENERAL: &str = include_str!("../data/tips/general.toml");
const MAP:     &str = include_str!("../data/tips/map.toml");
const HEROES:  &str = include_str!("../data/tips/heroes.toml");

static EMBEDDED_SOURCES: &[(&str, &str)] = &[
    ("general.toml", GENERAL),
    ("map.toml",     MAP),
    ("heroes.toml",  HEROES),
];

static EMBEDDED: OnceCell<TipCatalog> = OnceCell::new();

/// Chat-log display is capped; longer `short_text` is rejected at load.
pub const SHORT_TEXT_MAX: usize = 150;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BountyRunes,
    PowerRunes,
    WisdomRunes,
    WaterRunes,
    Lotus,
    Tormentor,
    Roshan,
    Neutrals,
    Stacking,
    Pulling,
    Outposts,
    DayTime,
    NightTime,
    SiegeCreeps,
    General,
    OwnHero,
    EnemyHero,
}

impl Category {
    pub const ALL: [Category; 17] = [
        Category::BountyRunes,
        Category::PowerRunes,
        Category::WisdomRunes,
        Category::WaterRunes,
        Category::Lotus,
        Category::Tormentor,
        Category::Roshan,
        Category::Neutrals,
        Category::Stacking,
        Category::Pulling,
        Category::Outposts,
        Category::DayTime,
        Category::NightTime,
        Category::SiegeCreeps,
        Category::General,
        Category::OwnHero,
        Category::EnemyHero,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::BountyRunes => "bounty_runes",
            Category::PowerRunes  => "power_runes",
            Category::WisdomRunes => "wisdom_runes",
            Category::WaterRunes  => "water_runes",
            Category::Lotus       => "lotus",
            Category::Tormentor   => "tormentor",
            Category::Roshan      => "roshan",
            Category::Neutrals    => "neutrals",
            Category::Stacking    => "stacking",
            Category::Pulling     => "pulling",
            Category::Outposts    => "outposts",
            Category::DayTime     => "day_time",
            Category::NightTime   => "night_time",
            Category::SiegeCreeps => "siege_creeps",
            Category::General     => "general",
            Category::OwnHero     => "own_hero",
            Category::EnemyHero   => "enemy_hero",
        }
    }

    /// Categories whose tips are keyed to a specific hero.
    pub fn is_hero_specific(&self) -> bool {
        matches!(self, Category::OwnHero | Category::EnemyHero)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// Image shown next to the tip in the overlay.  Opaque here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayImage {
    pub kind: String,
    pub name: String,
}

fn default_audience() -> Vec<Audience> {
    vec![Audience::All]
}

/// One authored coaching message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipRecord {
    pub category: Category,
    /// Normalized hero key (no `npc_dota_hero_` prefix).  Only set on hero tips.
    #[serde(default)]
    pub hero: Option<String>,
    /// Playback asset reference, passed through to the audio layer untouched.
    #[serde(default)]
    pub audio: String,
    /// Game-clock seconds; negative values fire during hero selection.
    #[serde(default)]
    pub timing: Option<Timing>,
    #[serde(default)]
    pub turbo_timing: Option<Timing>,
    #[serde(default)]
    pub repeat_interval: Option<u32>,
    /// Maximum number of repeats after the first trigger.  `None` = unlimited.
    #[serde(default)]
    pub repeat_count: Option<u32>,
    pub text: String,
    #[serde(default)]
    pub short_text: Option<String>,
    #[serde(default = "default_audience")]
    pub audience: Vec<Audience>,
    #[serde(default)]
    pub position: Option<PositionGate>,
    #[serde(default)]
    pub image: Option<DisplayImage>,
}

impl TipRecord {
    /// Bare tip for everyone with no timing.  Handy for fixtures.
    pub fn new(category: Category, text: &str) -> Self {
        Self {
            category,
            hero:            None,
            audio:           String::new(),
            timing:          None,
            turbo_timing:    None,
            repeat_interval: None,
            repeat_count:    None,
            text:            text.to_owned(),
            short_text:      None,
            audience:        default_audience(),
            position:        None,
            image:           None,
        }
    }

    fn check(&self) -> Result<(), InvalidTip> {
        if self.text.trim().is_empty() {
            return Err(InvalidTip::EmptyText);
        }
        if self.audience.is_empty() {
            return Err(InvalidTip::EmptyAudience);
        }
        let has_hero = self.hero.as_deref().is_some_and(|h| !normalize_hero_key(h).is_empty());
        if self.category.is_hero_specific() && !has_hero {
            return Err(InvalidTip::MissingHero(self.category));
        }
        if !self.category.is_hero_specific() && self.hero.is_some() {
            return Err(InvalidTip::UnexpectedHero(self.category));
        }
        if let Some(gate) = &self.position {
            if self.timing.as_ref().map_or(true, |t| t.as_slice().is_empty()) {
                return Err(InvalidTip::PositionWithoutTiming);
            }
            if !gate.is_well_formed() {
                return Err(InvalidTip::MalformedRegion);
            }
        }
        if self.repeat_interval == Some(0) {
            return Err(InvalidTip::ZeroRepeatInterval);
        }
        if let Some(short) = &self.short_text {
            let len = short.chars().count();
            if len > SHORT_TEXT_MAX {
                return Err(InvalidTip::ShortTextTooLong(len));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTip {
    #[error("{0} tip has no hero")]
    MissingHero(Category),
    #[error("{0} tip must not name a hero")]
    UnexpectedHero(Category),
    #[error("position-gated tip has no timing")]
    PositionWithoutTiming,
    #[error("position gate region is malformed")]
    MalformedRegion,
    #[error("repeat_interval must be positive")]
    ZeroRepeatInterval,
    #[error("short_text is {0} chars, over the chat limit")]
    ShortTextTooLong(usize),
    #[error("text is empty")]
    EmptyText,
    #[error("audience is empty")]
    EmptyAudience,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse tip file '{source_name}': {message}")]
    Parse { source_name: String, message: String },

    #[error("failed to read tip directory {path:?}: {source}")]
    Io {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("tip #{index} in '{source_name}': {problem}")]
    Invalid {
        source_name: String,
        index:       usize,
        problem:     InvalidTip,
    },
}

// ---------------------------------------------------------------------------
// TOML deserialization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct TomlFile {
    #[serde(default)]
    tip: Vec<TipRecord>,
}

fn parse_source(source_name: &str, raw: &str) -> Result<Vec<TipRecord>, CatalogError> {
    let file: TomlFile = toml::from_str(raw).map_err(|e| CatalogError::Parse {
        source_name: source_name.to_owned(),
        message:     e.to_string(),
    })?;
    Ok(file.tip)
}

/// Check every record and normalize hero keys.  Fails on the first bad record.
fn validated(source_name: &str, tips: Vec<TipRecord>) -> Result<Vec<TipRecord>, CatalogError> {
    tips.into_iter()
        .enumerate()
        .map(|(index, mut tip)| {
            tip.check().map_err(|problem| {
                tracing::warn!("Rejected tip #{} in '{}': {}", index, source_name, problem);
                CatalogError::Invalid { source_name: source_name.to_owned(), index, problem }
            })?;
            tip.hero = tip.hero.as_deref().map(|h| normalize_hero_key(h).to_owned());
            Ok(tip)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct TipCatalog {
    tips: Vec<TipRecord>,
}

impl TipCatalog {
    /// Build a catalog from already-constructed records, validating each one.
    pub fn new(tips: Vec<TipRecord>) -> Result<Self, CatalogError> {
        Ok(Self { tips: validated("<inline>", tips)? })
    }

    /// Build a catalog from `(source name, TOML text)` pairs, in order.
    pub fn from_toml(sources: &[(&str, &str)]) -> Result<Self, CatalogError> {
        let mut tips = Vec::new();
        for (name, raw) in sources {
            tips.extend(validated(name, parse_source(name, raw)?)?);
        }
        Ok(Self { tips })
    }

    /// The catalog compiled into the binary.
    ///
    /// Parsed on first call and shared for the rest of the process.  A parse
    /// failure is returned to every caller until one succeeds, which for
    /// embedded data means never; the data tests keep that from shipping.
    pub fn embedded() -> Result<&'static TipCatalog, CatalogError> {
        EMBEDDED.get_or_try_init(|| {
            let catalog = Self::from_toml(EMBEDDED_SOURCES)?;
            tracing::info!("Tip catalog loaded: {} tips", catalog.len());
            Ok(catalog)
        })
    }

    /// Append every `*.toml` file in `dir`, in file-name order.
    ///
    /// All or nothing: if any file fails to read, parse or validate, the
    /// catalog is left as it was.
    pub fn extend_from_dir(&mut self, dir: &Path) -> Result<(), CatalogError> {
        let io_err = |source: std::io::Error| CatalogError::Io { path: dir.to_path_buf(), source };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().is_some_and(|ext| ext == "toml") {
                files.push(path);
            }
        }
        files.sort();

        let mut staged = Vec::new();
        for path in files {
            let raw = std::fs::read_to_string(&path).map_err(io_err)?;
            let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
            let tips = validated(&name, parse_source(&name, &raw)?)?;
            tracing::info!("Loaded {} extra tips from {:?}", tips.len(), path);
            staged.extend(tips);
        }
        self.tips.extend(staged);
        Ok(())
    }

    /// First tip in catalog order with the given category.
    pub fn find_by_category(&self, category: Category) -> Option<&TipRecord> {
        self.tips.iter().find(|t| t.category == category)
    }

    pub fn tips(&self) -> &[TipRecord] {
        &self.tips
    }

    pub fn iter(&self) -> impl Iterator<Item = &TipRecord> {
        self.tips.iter()
    }

    pub fn len(&self) -> usize {
        self.tips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tips.is_empty()
    }
}
