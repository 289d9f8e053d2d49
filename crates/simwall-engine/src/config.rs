//! Simulation configuration, validation, and error types.
//!
//! [`SimulationConfig`] is built once (in code or from TOML) and consumed
//! by [`SimulationClock::new`](crate::clock::SimulationClock::new).
//! [`validate()`](SimulationConfig::validate) checks structural invariants;
//! file loading and pattern fitting happen in the clock constructor so that
//! every configuration error surfaces before the first tick.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use simwall_core::{AutomatonKind, Dims, GridError, Rgba, RuleError, Ruleset, RulesetError};
use simwall_pattern::PatternError;
use simwall_rules::AntUpdate;
use thiserror::Error;

// ── RestockConfig ─────────────────────────────────────────────────

/// What a restock does to a stale grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestockStrategy {
    /// Replace the grid with a fresh start state (random or file pattern).
    #[default]
    Regenerate,
    /// Keep the grid and bring dead cells to life at random.
    ///
    /// Seeds ignores this and always regenerates from a small seed.
    Sprinkle,
}

/// Restocking switches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockConfig {
    /// Restock at all. `false` freezes the board once it dies out.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Start from an empty grid, and make every restock empty too.
    #[serde(default)]
    pub start_empty: bool,
    /// What a restock does.
    #[serde(default)]
    pub strategy: RestockStrategy,
}

impl Default for RestockConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            start_empty: false,
            strategy: RestockStrategy::default(),
        }
    }
}

// ── RenderConfig ──────────────────────────────────────────────────

/// Cell shape for the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Filled square.
    #[default]
    Square,
    /// Filled circle inscribed in the cell.
    Circle,
}

/// Presentation settings carried through to every frame.
///
/// The engine only reads the colours, to build the life-like palette and
/// colour the default ant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Cell edge length in pixels.
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
    /// Cell shape.
    #[serde(default)]
    pub shape: Shape,
    /// Alive cell colour.
    #[serde(default = "default_alive")]
    pub alive: Rgba,
    /// Dead cell and background colour.
    #[serde(default = "default_dead")]
    pub dead: Rgba,
    /// Dying cell colour (Brian's Brain).
    #[serde(default = "default_dying")]
    pub dying: Rgba,
    /// Colour of the default ant.
    #[serde(default = "default_ant")]
    pub ant: Rgba,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            shape: Shape::default(),
            alive: default_alive(),
            dead: default_dead(),
            dying: default_dying(),
            ant: default_ant(),
        }
    }
}

impl RenderConfig {
    /// `[dead, alive, dying]`, indexed by life-like cell tag.
    pub fn life_palette(&self) -> Vec<Rgba> {
        vec![self.dead, self.alive, self.dying]
    }
}

// ── SimulationConfig ──────────────────────────────────────────────

/// Everything needed to build a [`SimulationClock`](crate::clock::SimulationClock).
///
/// Nested tables are declared last so the struct serialises to TOML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Which automaton to run.
    #[serde(default = "default_kind")]
    pub kind: AutomatonKind,
    /// Grid width in cells.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Grid height in cells.
    #[serde(default = "default_height")]
    pub height: u32,
    /// RNG seed. Drawn from the OS when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Chance, in percent, that a randomised cell starts alive.
    #[serde(default = "default_percent_alive")]
    pub percent_alive: u8,
    /// Start pattern file. Random start when absent.
    #[serde(default)]
    pub pattern_path: Option<PathBuf>,
    /// Ant definition file. One default ant when absent.
    #[serde(default)]
    pub ant_path: Option<PathBuf>,
    /// Ruleset for the default ant.
    #[serde(default = "default_ant_rules")]
    pub ant_rules: String,
    /// How multiple ants share a tick.
    #[serde(default)]
    pub ant_update: AntUpdate,
    /// Ticks per second.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    /// Restocking switches.
    #[serde(default)]
    pub restock: RestockConfig,
    /// Presentation settings.
    #[serde(default)]
    pub render: RenderConfig,
}

fn default_true() -> bool {
    true
}
fn default_kind() -> AutomatonKind {
    AutomatonKind::GameOfLife
}
// A 1920x1080 screen at the default cell size.
fn default_width() -> u32 {
    76
}
fn default_height() -> u32 {
    43
}
fn default_percent_alive() -> u8 {
    20
}
fn default_ant_rules() -> String {
    "RL".to_string()
}
fn default_frame_rate() -> f64 {
    10.0
}
fn default_cell_size() -> u32 {
    25
}
fn default_alive() -> Rgba {
    Rgba::WHITE
}
fn default_dead() -> Rgba {
    Rgba::BLACK
}
fn default_dying() -> Rgba {
    Rgba::GREY
}
fn default_ant() -> Rgba {
    Rgba::RED
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            width: default_width(),
            height: default_height(),
            seed: None,
            percent_alive: default_percent_alive(),
            pattern_path: None,
            ant_path: None,
            ant_rules: default_ant_rules(),
            ant_update: AntUpdate::default(),
            frame_rate: default_frame_rate(),
            restock: RestockConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Default configuration for `kind` on a `width x height` grid.
    pub fn new(kind: AutomatonKind, width: u32, height: u32) -> Self {
        Self {
            kind,
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Render as a TOML document.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validated grid dimensions.
    pub fn dims(&self) -> Result<Dims, ConfigError> {
        Ok(Dims::new(self.width, self.height)?)
    }

    /// The default ant's ruleset.
    pub fn ruleset(&self) -> Result<Ruleset, ConfigError> {
        Ok(Ruleset::parse(&self.ant_rules)?)
    }

    /// Whether the configured automaton can ever restock.
    pub fn restocks(&self) -> bool {
        self.restock.enabled && self.kind.is_life_like()
    }

    /// Check structural invariants. Does not touch the filesystem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dims()?;
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(ConfigError::InvalidFrameRate {
                value: self.frame_rate,
            });
        }
        if self.percent_alive > 100 {
            return Err(ConfigError::PercentOutOfRange {
                value: self.percent_alive,
            });
        }
        if self.render.cell_size == 0 {
            return Err(ConfigError::InvalidCellSize);
        }
        if self.kind == AutomatonKind::LangtonsAnt && self.ant_path.is_none() {
            self.ruleset()?;
        }
        Ok(())
    }
}

// ── ConfigError ───────────────────────────────────────────────────

/// Errors detected while building a simulation. All of them abort
/// startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Bad dimensions, a pattern that does not fit, or out-of-range tags.
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
    /// `frame_rate` is zero, negative, or not finite.
    #[error("frame rate must be finite and positive, got {value}")]
    InvalidFrameRate {
        /// The rejected value.
        value: f64,
    },
    /// `percent_alive` exceeds 100.
    #[error("percent_alive must be at most 100, got {value}")]
    PercentOutOfRange {
        /// The rejected value.
        value: u8,
    },
    /// `render.cell_size` is zero.
    #[error("cell size must be at least 1 pixel")]
    InvalidCellSize,
    /// `ant_rules` is not a valid ruleset.
    #[error("invalid ant ruleset: {0}")]
    Ruleset(#[from] RulesetError),
    /// A pattern or ant file failed to load.
    #[error(transparent)]
    Pattern(#[from] PatternError),
    /// An ant from the definition file lies outside the grid.
    #[error("invalid ant placement: {0}")]
    Agents(#[from] RuleError),
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The config document is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The config could not be written as TOML.
    #[error("failed to serialise config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
