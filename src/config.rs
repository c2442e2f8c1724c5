/// Coach configuration: persisted as TOML in the user's config directory.
///
/// Everything here is a preference the overlay owns; the tip engine itself
/// only ever reads a loaded `CoachConfig`.  A missing file means defaults.
///
/// NOTE: `extra_catalog_dir` lets users drop in their own `*.toml` tip files.
/// They go through the same validation as the embedded catalog and are
/// appended after it, so `find_by_category` still prefers built-in tips.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{
    audience::Role,
    catalog::{Category, TipCatalog},
    timing::GameMode,
};

pub const CONFIG_FILE: &str = "config.toml";

// ---------------------------------------------------------------------------
// CoachConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachConfig {
    /// Use turbo timings instead of the normal schedule.
    #[serde(default)]
    pub turbo: bool,

    /// Roles to filter by when the client has not assigned one.
    #[serde(default)]
    pub roles: Vec<Role>,

    /// Tip categories the user has switched off.
    #[serde(default)]
    pub disabled_categories: Vec<Category>,

    /// Directory of additional tip files.
    #[serde(default)]
    pub extra_catalog_dir: Option<PathBuf>,

    /// `tracing` filter directive, e.g. `dota_coach_lib=debug`.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Prefer `short_text` when printing tips.
    #[serde(default)]
    pub use_short_text: bool,
}

fn default_log_filter() -> String {
    "dota_coach_lib=info".to_owned()
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            turbo:               false,
            roles:               Vec::new(),
            disabled_categories: Vec::new(),
            extra_catalog_dir:   None,
            log_filter:          default_log_filter(),
            use_short_text:      false,
        }
    }
}

impl CoachConfig {
    pub fn game_mode(&self) -> GameMode {
        if self.turbo { GameMode::Turbo } else { GameMode::Normal }
    }

    /// The embedded catalog plus any tips from `extra_catalog_dir`.
    pub fn load_catalog(&self) -> Result<TipCatalog> {
        let mut catalog = TipCatalog::embedded()?.clone();
        if let Some(dir) = &self.extra_catalog_dir {
            catalog
                .extend_from_dir(dir)
                .with_context(|| format!("loading extra tips from {}", dir.display()))?;
        }
        Ok(catalog)
    }
}

// ---------------------------------------------------------------------------
// Load / save
// ---------------------------------------------------------------------------

pub fn load_or_default(config_dir: &Path) -> Result<CoachConfig> {
    let path = config_dir.join(CONFIG_FILE);
    if path.exists() {
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let cfg: CoachConfig = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Config parse error: {}", e))?;
        Ok(cfg)
    } else {
        tracing::debug!("No config at {:?}, using defaults", path);
        Ok(CoachConfig::default())
    }
}

pub fn save(config: &CoachConfig, config_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(config_dir)
        .with_context(|| format!("creating config dir {}", config_dir.display()))?;
    let raw = toml::to_string_pretty(config)
        .map_err(|e| anyhow::anyhow!("Config serialize error: {}", e))?;
    let path = config_dir.join(CONFIG_FILE);
    std::fs::write(&path, raw).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_config() {
        let dir = tempdir().unwrap();
        let cfg = CoachConfig {
            turbo:               true,
            roles:               vec![Role::Support],
            disabled_categories: vec![Category::Stacking, Category::DayTime],
            use_short_text:      true,
            ..CoachConfig::default()
        };

        save(&cfg, dir.path()).unwrap();

        let loaded = load_or_default(dir.path()).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.game_mode(), GameMode::Turbo);
    }

    #[test]
    fn save_error_names_the_path() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "").unwrap();

        let err = save(&CoachConfig::default(), &blocker.join("inner")).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("creating config dir"), "{}", msg);
        assert!(msg.contains("not_a_dir"), "{}", msg);
    }

    #[test]
    fn returns_default_when_missing() {
        let dir = tempdir().unwrap();
        let cfg = load_or_default(dir.path()).unwrap();
        assert_eq!(cfg, CoachConfig::default());
        assert_eq!(cfg.game_mode(), GameMode::Normal);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "roles = [\"mid\"]\n").unwrap();
        let cfg = load_or_default(dir.path()).unwrap();
        assert_eq!(cfg.roles, vec![Role::Mid]);
        assert_eq!(cfg.log_filter, "dota_coach_lib=info");
    }

    #[test]
    fn rejects_unknown_role() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "roles = [\"jungle\"]\n").unwrap();
        assert!(load_or_default(dir.path()).is_err());
    }

    #[test]
    fn extra_catalog_dir_is_appended() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("mine.toml"),
            "[[tip]]\ncategory = \"general\"\ntiming = 5\ntext = \"Custom tip.\"\n",
        )
        .unwrap();
        let cfg = CoachConfig {
            extra_catalog_dir: Some(dir.path().to_path_buf()),
            ..CoachConfig::default()
        };
        let catalog = cfg.load_catalog().unwrap();
        let embedded = TipCatalog::embedded().unwrap();
        assert_eq!(catalog.len(), embedded.len() + 1);
        assert_eq!(catalog.tips().last().unwrap().text, "Custom tip.");
    }
}
