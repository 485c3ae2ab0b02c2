//! The level-file document and its conversions to and from [`Level`].
//!
//! Files are JSON. Decoding is lenient about everything but `name` and
//! `objects`; encoding produces the game's canonical tab-indented layout (see
//! [`encode`]).
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::level::object::LevelObject;
use crate::level::Level;

mod encode;

pub use encode::encode;

/// Name every generated level is saved under. The source level's name goes
/// into the description.
pub const COMBINED_LEVEL_NAME: &str = "Combination";

/// Starting game mode of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Cube,
    Ship,
    Ball,
    Wave,
}

/// Visual and gameplay settings a level starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSettings {
    pub colorbg: [u8; 3],
    pub colorground: [u8; 3],
    pub gamemode: GameMode,
    pub platformer: bool,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            colorbg: [0, 125, 255],
            colorground: [0, 125, 255],
            gamemode: GameMode::Cube,
            platformer: false,
        }
    }
}

/// Best completion percentage and collected coins.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Completion {
    pub percentage: u32,
    pub coins: Vec<bool>,
}

impl Completion {
    /// Zero progress with one uncollected flag per coin.
    pub fn fresh(coins: usize) -> Self {
        Self {
            percentage: 0,
            coins: vec![false; coins],
        }
    }

    pub fn reset(&mut self) {
        self.percentage = 0;
        self.coins.iter_mut().for_each(|c| *c = false);
    }
}

/// A complete level file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub settings: LevelSettings,
    pub objects: Vec<LevelObject>,
    #[serde(default)]
    pub completion: Completion,
    #[serde(default)]
    pub deleted: bool,
}

/// Parse a level file.
pub fn decode(bytes: &[u8]) -> Result<LevelFile> {
    Ok(serde_json::from_slice(bytes)?)
}

impl From<&LevelFile> for Level {
    fn from(file: &LevelFile) -> Self {
        Level::new(file.name.clone(), file.objects.clone())
    }
}

impl From<LevelFile> for Level {
    fn from(file: LevelFile) -> Self {
        Level::new(file.name, file.objects)
    }
}

impl Level {
    /// The document a generated level is saved as: fixed name and default
    /// settings, this level's name as description, objects verbatim, fresh
    /// completion with one flag per coin.
    pub fn to_output_file(&self) -> LevelFile {
        LevelFile {
            name: COMBINED_LEVEL_NAME.into(),
            description: self.name.clone(),
            settings: LevelSettings::default(),
            objects: self.objects.clone(),
            completion: Completion::fresh(self.coin_count()),
            deleted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::field::Field;

    const SAMPLE: &str = r#"{
        "name": "Stereo",
        "description": "first level",
        "settings": {
            "colorbg": [10, 20, 30],
            "colorground": [40, 50, 60],
            "gamemode": "ship",
            "platformer": true
        },
        "objects": [
            {"type": "block.basic-block", "data": {"x": 0, "y": 0, "rotation": 0, "groups": []}},
            {"type": "special.coin", "data": {"x": 3, "y": 1, "rotation": 0, "groups": ["g"]}}
        ],
        "completion": {"percentage": 45, "coins": [true]},
        "deleted": false
    }"#;

    #[test]
    fn decodes_full_document() {
        let file = decode(SAMPLE.as_bytes()).unwrap();
        assert_eq!(file.name, "Stereo");
        assert_eq!(file.settings.gamemode, GameMode::Ship);
        assert_eq!(file.settings.colorground, [40, 50, 60]);
        assert!(file.settings.platformer);
        assert_eq!(file.objects.len(), 2);
        assert_eq!(file.objects[1].x(), Field::Present(3));
        assert_eq!(file.completion.percentage, 45);
        assert_eq!(file.completion.coins, vec![true]);
    }

    #[test]
    fn optional_sections_default() {
        let file = decode(br#"{"name": "bare", "objects": []}"#).unwrap();
        assert_eq!(file.description, "");
        assert_eq!(file.settings, LevelSettings::default());
        assert_eq!(file.completion, Completion::default());
        assert!(!file.deleted);
    }

    #[test]
    fn missing_objects_is_an_error() {
        assert!(decode(br#"{"name": "no objects"}"#).is_err());
        assert!(decode(b"not json").is_err());
    }

    #[test]
    fn output_file_flags_every_coin() {
        let file = decode(SAMPLE.as_bytes()).unwrap();
        let level = Level::from(&file);
        let out = level.to_output_file();
        assert_eq!(out.name, COMBINED_LEVEL_NAME);
        assert_eq!(out.description, "Stereo");
        assert_eq!(out.settings, LevelSettings::default());
        assert_eq!(out.completion, Completion::fresh(1));
        assert_eq!(out.objects, file.objects);
        assert!(!out.deleted);
    }

    #[test]
    fn completion_reset_clears_progress() {
        let mut c = Completion {
            percentage: 100,
            coins: vec![true, false, true],
        };
        c.reset();
        assert_eq!(c, Completion::fresh(3));
    }
}
