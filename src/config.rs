//! JSON configuration for a conversion run.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::art::ChunkConverter;
use crate::braille::{BrailleConverter, DEFAULT_BREAK_POINT};
use crate::brightness::WeightedBrightness;
use crate::simple::{SimpleConverter, DEFAULT_ALPHABET};
use crate::Result;

pub const DEFAULT_CHUNK_SIZE: usize = 8;

/// Chunk mapping strategy and its parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Simple {
        #[serde(default = "default_alphabet")]
        alphabet: String,
    },
    Braille {
        #[serde(default = "default_break_point")]
        break_point: u8,
        /// Convert border chunks too.
        #[serde(default)]
        edges: bool,
    },
}

fn default_alphabet() -> String {
    DEFAULT_ALPHABET.to_string()
}

fn default_break_point() -> u8 {
    DEFAULT_BREAK_POINT
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Simple { alphabet: default_alphabet() }
    }
}

impl Mode {
    /// Build the converter for this mode; alphabets are validated here.
    pub fn converter(&self, invert: bool) -> Result<Box<dyn ChunkConverter>> {
        Ok(match self {
            Mode::Simple { alphabet } => Box::new(SimpleConverter::new(alphabet)?.with_invert(invert)),
            Mode::Braille { break_point, edges } => Box::new(
                BrailleConverter::new(*break_point)
                    .with_edges(*edges)
                    .with_invert(invert),
            ),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtConfig {
    pub chunk_size: usize,
    pub mode: Mode,
    pub weights: WeightedBrightness,
    pub invert: bool,
    pub parallel: bool,
}

impl Default for ArtConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            mode: Mode::default(),
            weights: WeightedBrightness::default(),
            invert: false,
            parallel: false,
        }
    }
}

impl ArtConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::debug!("loaded config from {}: {config:?}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArtError;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(ArtConfig::from_json("{}").unwrap(), ArtConfig::default());
    }

    #[test]
    fn test_braille_mode() {
        let config = ArtConfig::from_json(
            r#"{"chunk_size": 4, "mode": {"braille": {"break_point": 90}}, "parallel": true}"#,
        )
        .unwrap();
        assert_eq!(config.chunk_size, 4);
        assert_eq!(config.mode, Mode::Braille { break_point: 90, edges: false });
        assert!(config.parallel);
        assert_eq!(config.weights, WeightedBrightness::default());
    }

    #[test]
    fn test_simple_mode_default_alphabet() {
        let config = ArtConfig::from_json(r#"{"mode": {"simple": {}}}"#).unwrap();
        assert_eq!(config.mode, Mode::default());
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = ArtConfig {
            weights: WeightedBrightness::equal(),
            mode: Mode::Braille { break_point: 10, edges: true },
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ArtConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ArtConfig::from_json(r#"{"chunk_size": "big"}"#),
            Err(ArtError::Config(_))
        ));
    }

    #[test]
    fn test_bad_alphabet_rejected_by_converter() {
        let mode = Mode::Simple { alphabet: "x".into() };
        assert!(matches!(mode.converter(false), Err(ArtError::InvalidArguments(_))));
    }
}
