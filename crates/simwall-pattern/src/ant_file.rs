//! Langton's Ant definition files.
//!
//! ```text
//! RLR                          ruleset
//! default                      palette: default | default_alpha | RRGGBBAA...
//! 10 12 0 FF0000FF             x y heading colour, one ant per line
//! 40 12 2 00FF00FF
//! ```
//!
//! Headings are `0` up, `1` right, `2` down, `3` left. An explicit palette
//! needs one colour per ruleset symbol, the first being the background;
//! extra colours are ignored.

use std::fs;
use std::path::Path;

use simwall_core::{Agent, AgentSet, Dims, Heading, Rgba, Ruleset};
use tracing::debug;

use crate::error::PatternError;

/// Palette keyword for evenly spaced greys.
const DEFAULT_PALETTE: &str = "default";

/// Palette keyword for greys over a transparent background.
const DEFAULT_ALPHA_PALETTE: &str = "default_alpha";

/// Everything an ant file defines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AntDefinition {
    /// Turn rules indexed by cell value.
    pub ruleset: Ruleset,
    /// One colour per cell value. `palette[0]` is the background.
    pub palette: Vec<Rgba>,
    /// Ants in processing order.
    pub agents: AgentSet,
}

impl AntDefinition {
    /// A single red ant in the middle of the grid, heading up, with a grey
    /// palette for `ruleset`.
    pub fn single_centered(dims: Dims, ruleset: Ruleset) -> Self {
        let palette = grey_palette(ruleset.len(), false);
        Self {
            ruleset,
            palette,
            agents: AgentSet::from(vec![Agent::centered(dims)]),
        }
    }
}

/// `count` opaque greys from black to white in equal steps.
///
/// With `transparent_background` the first entry is fully transparent.
pub fn grey_palette(count: usize, transparent_background: bool) -> Vec<Rgba> {
    let step = if count > 1 { 255 / (count - 1) } else { 0 };
    let mut palette: Vec<Rgba> = (0..count)
        .map(|i| Rgba::grey((i * step).min(255) as u8))
        .collect();
    if transparent_background {
        if let Some(bg) = palette.first_mut() {
            *bg = Rgba::TRANSPARENT;
        }
    }
    palette
}

/// Parse the text of an ant definition file.
pub fn parse_ant_definition(text: &str) -> Result<AntDefinition, PatternError> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

    let ruleset = match lines.next() {
        Some((_, l)) if !l.is_empty() => {
            Ruleset::parse(l).map_err(|source| PatternError::InvalidRuleset { source })?
        }
        _ => return Err(PatternError::MissingRuleset),
    };

    let palette = match lines.next() {
        Some((line, l)) if !l.is_empty() => parse_palette(l, line, ruleset.len())?,
        _ => return Err(PatternError::MissingPalette),
    };

    let mut agents = AgentSet::new();
    for (line, l) in lines {
        if l.is_empty() {
            continue;
        }
        agents.push(parse_agent(l, line)?);
    }
    if agents.is_empty() {
        return Err(PatternError::NoAgents);
    }

    Ok(AntDefinition {
        ruleset,
        palette,
        agents,
    })
}

/// Read and parse an ant definition file.
pub fn load_agent_file(path: impl AsRef<Path>) -> Result<AntDefinition, PatternError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| PatternError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let def = parse_ant_definition(&text)?;
    debug!(
        path = %path.display(),
        ruleset = %def.ruleset,
        agents = def.agents.len(),
        "loaded ant definition"
    );
    Ok(def)
}

fn parse_palette(text: &str, line: usize, needed: usize) -> Result<Vec<Rgba>, PatternError> {
    let mut tokens = text.split_whitespace().peekable();
    match tokens.peek() {
        Some(&DEFAULT_PALETTE) => return Ok(grey_palette(needed, false)),
        Some(&DEFAULT_ALPHA_PALETTE) => return Ok(grey_palette(needed, true)),
        _ => {}
    }
    let palette = tokens
        .take(needed)
        .map(|t| {
            t.parse::<Rgba>()
                .map_err(|source| PatternError::InvalidColor { line, source })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if palette.len() < needed {
        return Err(PatternError::PaletteTooShort {
            needed,
            found: palette.len(),
        });
    }
    Ok(palette)
}

fn parse_agent(text: &str, line: usize) -> Result<Agent, PatternError> {
    let malformed = |reason: String| PatternError::MalformedAgent { line, reason };
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [x, y, heading, color] = fields.as_slice() else {
        return Err(malformed(format!("expected 4 fields, found {}", fields.len())));
    };
    let x: u32 = x
        .parse()
        .map_err(|_| malformed(format!("x '{x}' is not a column")))?;
    let y: u32 = y
        .parse()
        .map_err(|_| malformed(format!("y '{y}' is not a row")))?;
    let heading = match heading.parse::<u8>() {
        Ok(h @ 0..=3) => Heading::from_index(h),
        _ => return Err(malformed(format!("heading '{heading}' is not 0-3"))),
    };
    let color = color
        .parse::<Rgba>()
        .map_err(|source| PatternError::InvalidColor { line, source })?;
    Ok(Agent {
        x,
        y,
        heading,
        color,
    })
}
