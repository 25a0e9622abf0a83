//! Where the input relations live and how they are delimited.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::vocabulary::parser::RecordFormat;

/// Configuration for loading a [`VocabularyGraph`](super::VocabularyGraph).
///
/// Serialized as a flat JSON object:
///
/// ```json
/// { "synsets": "wordnet/synsets.txt", "hypernyms": "wordnet/hypernyms.txt",
///   "field_delimiter": ",", "term_delimiter": " " }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Path to the synset relation.
    pub synsets: PathBuf,
    /// Path to the hypernym relation.
    pub hypernyms: PathBuf,
    /// Record delimiters.
    #[serde(flatten)]
    pub format: RecordFormat,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        VocabularyConfig {
            synsets: PathBuf::from("synsets.txt"),
            hypernyms: PathBuf::from("hypernyms.txt"),
            format: RecordFormat::default(),
        }
    }
}

impl VocabularyConfig {
    /// Configuration for the two given relation files with default delimiters.
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(synsets: P, hypernyms: Q) -> Self {
        VocabularyConfig {
            synsets: synsets.into(),
            hypernyms: hypernyms.into(),
            format: RecordFormat::default(),
        }
    }

    /// Load a configuration from a JSON file.
    ///
    /// Relative relation paths are resolved against the directory holding the
    /// configuration file. Equal field and term delimiters are rejected.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut config: VocabularyConfig = serde_json::from_reader(BufReader::new(file))?;
        config.format.validate()?;

        if let Some(base) = path.parent() {
            if config.synsets.is_relative() {
                config.synsets = base.join(&config.synsets);
            }
            if config.hypernyms.is_relative() {
                config.hypernyms = base.join(&config.hypernyms);
            }
        }

        Ok(config)
    }
}
