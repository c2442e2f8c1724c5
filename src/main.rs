//! Command-line front end to the tip engine.
//!
//! Mostly useful for checking tip data: which tips a hero gets, what zone a
//! coordinate falls in, and what the overlay would surface at a given second.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use dota_coach_lib::{
    config::{self, CoachConfig},
    logging::{self, LogTarget},
    select_eligible, zones, Category, GameMode, HeroPosition, Role, Side, TipContext, TipRecord,
};

#[derive(Parser)]
#[command(name = "dota-coach-tips", about = "Query the coaching tip catalog", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding config.toml (defaults to the platform config dir)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log to stderr instead of the rolling log file
    #[arg(long, global = true)]
    log_stderr: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Tips for playing a hero
    Own {
        #[arg(long)]
        hero: String,
        /// Filter by role; repeatable
        #[arg(long = "role")]
        roles: Vec<Role>,
    },

    /// Tips for playing against a hero
    Enemy {
        #[arg(long)]
        hero: String,
    },

    /// First tip in a category
    Category { category: Category },

    /// Grid cell and zone for a world coordinate
    Zone {
        #[arg(long, allow_negative_numbers = true)]
        x: f32,
        #[arg(long, allow_negative_numbers = true)]
        y: f32,
    },

    /// Tips eligible at a game-clock second
    Eligible {
        #[arg(long, allow_negative_numbers = true)]
        clock: i32,
        #[arg(long)]
        hero: Option<String>,
        #[arg(long = "role")]
        roles: Vec<Role>,
        #[arg(long = "enemy")]
        enemies: Vec<String>,
        #[arg(long, allow_negative_numbers = true, requires_all = ["y", "side"])]
        x: Option<f32>,
        #[arg(long, allow_negative_numbers = true, requires_all = ["x", "side"])]
        y: Option<f32>,
        #[arg(long)]
        side: Option<Side>,
        /// Use turbo timings (overrides config)
        #[arg(long)]
        turbo: bool,
    },
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("dota-coach-tips")
}

fn fmt_clock(seconds: i32) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let s = seconds.unsigned_abs();
    format!("{}{}:{:02}", sign, s / 60, s % 60)
}

fn print_tips(tips: &[&TipRecord], json: bool, short: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tips)?);
        return Ok(());
    }
    if tips.is_empty() {
        println!("(no tips)");
    }
    for tip in tips {
        let when: Vec<String> = tip.timings(GameMode::Normal).iter().map(|t| fmt_clock(*t)).collect();
        println!("[{}] {:<12} {}", tip.category, when.join(","), tip.display_text(short));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_dir = cli.config_dir.clone().unwrap_or_else(default_config_dir);
    let cfg: CoachConfig = config::load_or_default(&config_dir)?;

    let log_dir = config_dir.join("logs");
    let target = if cli.log_stderr { LogTarget::Stderr } else { LogTarget::Dir(&log_dir) };
    let _guard = logging::init(target, &cfg.log_filter);

    let catalog = cfg.load_catalog().context("loading tip catalog")?;
    tracing::info!("dota-coach-tips starting: {} tips", catalog.len());

    let short = cfg.use_short_text;
    match cli.command {
        Commands::Own { hero, roles } => {
            let roles = if roles.is_empty() { cfg.roles.clone() } else { roles };
            let tips = if roles.is_empty() {
                catalog.own_hero_tips(&hero)
            } else {
                catalog.own_hero_tips_for_roles(&hero, &roles)
            };
            print_tips(&tips, cli.json, short)?;
        }

        Commands::Enemy { hero } => {
            print_tips(&catalog.enemy_hero_tips(&hero), cli.json, short)?;
        }

        Commands::Category { category } => {
            let tips: Vec<&TipRecord> = catalog.find_by_category(category).into_iter().collect();
            print_tips(&tips, cli.json, short)?;
        }

        Commands::Zone { x, y } => {
            let cell = zones::grid_cell(x, y);
            let zone = zones::zone_of(cell);
            if cli.json {
                let out = serde_json::json!({ "cell": cell, "zone": zone });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                let name = zone.map(|z| format!("{:?}", z)).unwrap_or_else(|| "none".to_owned());
                println!("cell ({}, {}) zone {}", cell.x, cell.y, name);
            }
        }

        Commands::Eligible { clock, hero, roles, enemies, x, y, side, turbo } => {
            let roles = if roles.is_empty() { cfg.roles.clone() } else { roles };
            let position = match (x, y, side) {
                (Some(x), Some(y), Some(side)) => Some(HeroPosition { x, y, side }),
                _ => None,
            };
            let ctx = TipContext {
                clock_s: clock,
                mode: if turbo { GameMode::Turbo } else { cfg.game_mode() },
                hero: hero.as_deref(),
                roles: &roles,
                enemies: &enemies,
                position,
            };
            let tips = select_eligible(&catalog, &ctx, &cfg.disabled_categories);
            print_tips(&tips, cli.json, short)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn formats_clock() {
        assert_eq!(fmt_clock(0), "0:00");
        assert_eq!(fmt_clock(95), "1:35");
        assert_eq!(fmt_clock(-75), "-1:15");
    }

    #[test]
    fn default_config_dir_is_platform_config_dir() {
        let dir = default_config_dir();
        assert!(dir.ends_with("dota-coach-tips"));
        assert!(dir.is_absolute());
        if let Some(base) = dirs::config_dir() {
            assert_eq!(dir.parent(), Some(base.as_path()));
        }
    }

    #[test]
    fn parses_eligible_with_position() {
        let cli = Cli::try_parse_from([
            "dota-coach-tips", "eligible", "--clock", "-30", "--role", "support",
            "--x", "-1500", "--y", "200", "--side", "dire",
        ])
        .unwrap();
        match cli.command {
            Commands::Eligible { clock, roles, x, side, .. } => {
                assert_eq!(clock, -30);
                assert_eq!(roles, vec![Role::Support]);
                assert_eq!(x, Some(-1500.0));
                assert_eq!(side, Some(Side::Dire));
            }
            _ => panic!("wrong subcommand"),
        }
    }
}
