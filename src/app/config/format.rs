use crate::app::config::binds::BindsConfig;
use crate::app::config::deck::DeckConfig;
use crate::app::config::logging::LoggingConfig;
use crate::app::config::network::NetworkConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub deck: DeckConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub binds: BindsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Known keys per section, used to warn about typos
const KNOWN_FIELDS: &[(&str, &[&str])] = &[
    (
        "deck",
        &[
            "size",
            "early_threshold",
            "settle_delay_ms",
            "image_width",
            "image_height",
            "source",
        ],
    ),
    ("network", &["timeout_secs", "user_agent"]),
    ("binds", &["accept", "reject", "reset", "quit"]),
    (
        "logging",
        &[
            "enabled",
            "level",
            "directory",
            "append",
            "rotation_size_mb",
            "keep_files",
        ],
    ),
];

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_chars.len()]
}

/// Closest candidate within a loose edit-distance threshold
fn find_similar<'a>(unknown: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let unknown_lower = unknown.to_lowercase();

    candidates
        .iter()
        .map(|&candidate| {
            let distance = levenshtein_distance(&unknown_lower, &candidate.to_lowercase());
            (candidate, distance)
        })
        .filter(|&(candidate, distance)| {
            let max_len = unknown.len().max(candidate.len());
            distance <= (max_len / 2).max(3)
        })
        .min_by_key(|&(_, distance)| distance)
        .map(|(candidate, _)| candidate)
}

fn unknown_section_warning(key: &str, suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!("Unknown config section: [{}] (did you mean: [{}]?)", key, s),
        None => format!("Unknown config section: [{}]", key),
    }
}

fn unknown_key_warning(section: &str, key: &str, suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!(
            "Unknown option in [{}]: {} (did you mean: {}?)",
            section, key, s
        ),
        None => format!("Unknown option in [{}]: {}", section, key),
    }
}

impl Config {
    /// Platform config path, e.g. ~/.config/swipedeck/config.toml on Linux
    pub fn default_config_path() -> color_eyre::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not determine config directory"))?;
        Ok(config_dir.join("swipedeck").join("config.toml"))
    }

    /// Load the config, creating a default file when none exists.
    ///
    /// Returns the config plus warnings about unknown keys or an unparsable file. The
    /// logger is not running yet, so the caller reports them.
    pub fn load(config_path: Option<PathBuf>) -> color_eyre::Result<(Self, Vec<String>)> {
        let config_path = match config_path {
            Some(path) => path,
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            let default_config = Config::default();
            default_config.write_to(&config_path)?;
            return Ok((default_config, Vec::new()));
        }

        let contents = std::fs::read_to_string(&config_path)?;
        Ok(Self::parse(&contents))
    }

    /// Parse config contents, falling back to defaults on a syntax or type error
    pub fn parse(contents: &str) -> (Self, Vec<String>) {
        let mut warnings = Self::check_unknown_fields(contents);

        let config = match toml::from_str(contents) {
            Ok(config) => config,
            Err(e) => {
                warnings.push(format!("Failed to parse config file, using defaults: {}", e));
                Config::default()
            }
        };
        (config, warnings)
    }

    /// Check for unknown sections and keys and return warnings
    fn check_unknown_fields(contents: &str) -> Vec<String> {
        let mut warnings = Vec::new();

        let table: toml::Table = match toml::from_str(contents) {
            Ok(t) => t,
            Err(_) => return warnings,
        };

        let sections: Vec<&str> = KNOWN_FIELDS.iter().map(|(section, _)| *section).collect();

        for (key, value) in &table {
            let Some((section, fields)) = KNOWN_FIELDS.iter().find(|(s, _)| *s == key.as_str()) else {
                let suggestion = find_similar(key, &sections);
                warnings.push(unknown_section_warning(key, suggestion));
                continue;
            };

            if let toml::Value::Table(entries) = value {
                for field in entries.keys() {
                    if !fields.contains(&field.as_str()) {
                        let suggestion = find_similar(field, fields);
                        warnings.push(unknown_key_warning(section, field, suggestion));
                    }
                }
            }
        }

        warnings
    }

    fn write_to(&self, path: &Path) -> color_eyre::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }

    /// Generate a default config file at the specified path
    pub fn generate_default(path: PathBuf) -> color_eyre::Result<()> {
        if path.exists() {
            return Err(color_eyre::eyre::eyre!(
                "Config file already exists at: {}",
                path.display()
            ));
        }

        Config::default().write_to(&path)?;
        println!("Generated default config at: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("size", "size"), 0);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let toml_string = toml::to_string_pretty(&Config::default()).unwrap();
        let (config, warnings) = Config::parse(&toml_string);

        assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
        assert_eq!(config.deck.size, 12);
        assert_eq!(config.deck.early_threshold, 3);
        assert_eq!(config.binds.accept, BindsConfig::default().accept);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let (config, warnings) = Config::parse("[deck]\nsize = 5\n");

        assert!(warnings.is_empty());
        assert_eq!(config.deck.size, 5);
        assert_eq!(config.deck.settle_delay_ms, 250);
        assert_eq!(config.network.timeout_secs, 15);
        assert!(config.logging.enabled);
    }

    #[test]
    fn test_unknown_key_suggests_closest() {
        let (_, warnings) = Config::parse("[deck]\nsiez = 5\n\n[netwrk]\ntimeout_secs = 1\n");

        assert!(warnings.contains(&"Unknown option in [deck]: siez (did you mean: size?)".to_string()));
        assert!(warnings.contains(&"Unknown config section: [netwrk] (did you mean: [network]?)".to_string()));
    }

    #[test]
    fn test_unknown_key_without_suggestion() {
        let (_, warnings) = Config::parse("[binds]\ncompletely_unrelated_option = []\n");
        assert_eq!(
            warnings,
            vec!["Unknown option in [binds]: completely_unrelated_option".to_string()]
        );
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let (config, warnings) = Config::parse("[deck]\nsize = \"many\"\n");

        assert_eq!(config.deck.size, 12);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Failed to parse config file"));
    }

    #[test]
    fn test_load_creates_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let (config, warnings) = Config::load(Some(path.clone())).unwrap();

        assert!(path.exists());
        assert!(warnings.is_empty());
        assert_eq!(config.deck.size, 12);
    }

    #[test]
    fn test_load_reads_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[deck]\nearly_threshold = 1\n").unwrap();

        let (config, _) = Config::load(Some(path)).unwrap();
        assert_eq!(config.deck.early_threshold, 1);
    }

    #[test]
    fn test_generate_default_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        Config::generate_default(path.clone()).unwrap();
        assert!(Config::generate_default(path).is_err());
    }
}
