//! Character ramps, ordered darkest to brightest.

use std::str::FromStr;

/// 10-level ASCII density ramp.
pub const STANDARD_CHARSET: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// 5-level Unicode block ramp.
pub const BLOCKS_CHARSET: &[char] = &[' ', '░', '▒', '▓', '█'];

/// 4-level ramp for a less noisy picture.
pub const MINIMAL_CHARSET: &[char] = &[' ', '.', ':', '#'];

/// Character ramp used to draw frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSet {
    #[default]
    Standard,
    Blocks,
    Minimal,
}

impl CharSet {
    pub fn chars(&self) -> &'static [char] {
        match self {
            CharSet::Standard => STANDARD_CHARSET,
            CharSet::Blocks => BLOCKS_CHARSET,
            CharSet::Minimal => MINIMAL_CHARSET,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharSet::Standard => "standard",
            CharSet::Blocks => "blocks",
            CharSet::Minimal => "minimal",
        }
    }
}

impl FromStr for CharSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(CharSet::Standard),
            "blocks" => Ok(CharSet::Blocks),
            "minimal" => Ok(CharSet::Minimal),
            other => Err(format!(
                "Unknown charset '{}'. Available: standard, blocks, minimal",
                other
            )),
        }
    }
}
