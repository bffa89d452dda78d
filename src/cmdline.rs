use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{ConfigError, GameSettings};
use crate::snake_game::{Difficulty, MapKind};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "A 3D snake game")]
pub struct Args {
    /// Play headless with the autopilot instead of opening a window.
    #[arg(long)]
    pub sim: bool,

    /// Number of autopilot games to run with --sim.
    #[arg(long, default_value_t = 10)]
    pub games: usize,

    /// JSON settings file; missing fields keep their defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for apple placement. Overrides the settings file.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start on this map, skipping the menus.
    #[arg(long, value_enum)]
    pub map: Option<MapArg>,

    /// Start at this difficulty, skipping the menus.
    #[arg(long, value_enum)]
    pub difficulty: Option<DifficultyArg>,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MapArg {
    Ground,
    Ocean,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum DifficultyArg {
    Easy,
    Hard,
}

impl From<MapArg> for MapKind {
    fn from(arg: MapArg) -> Self {
        match arg {
            MapArg::Ground => MapKind::Ground,
            MapArg::Ocean => MapKind::Ocean,
        }
    }
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

impl Args {
    pub fn settings(&self) -> Result<GameSettings, ConfigError> {
        let mut settings = match &self.config {
            Some(path) => GameSettings::load(path)?,
            None => GameSettings::default(),
        };
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        Ok(settings)
    }

    /// Either flag is enough; the other falls back to its default.
    pub fn quick_start(&self) -> Option<(MapKind, Difficulty)> {
        if self.map.is_none() && self.difficulty.is_none() {
            return None;
        }
        Some((
            self.map.map(MapKind::from).unwrap_or_default(),
            self.difficulty.map(Difficulty::from).unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["snake3d"]);
        assert!(!args.sim);
        assert_eq!(args.games, 10);
        assert_eq!(args.quick_start(), None);
        assert_eq!(args.settings().unwrap(), GameSettings::default());
    }

    #[test]
    fn test_quick_start_and_seed() {
        let args = Args::parse_from(["snake3d", "--difficulty", "hard", "--seed", "9"]);
        assert_eq!(args.quick_start(), Some((MapKind::Ground, Difficulty::Hard)));
        assert_eq!(args.settings().unwrap().seed, Some(9));
    }
}
