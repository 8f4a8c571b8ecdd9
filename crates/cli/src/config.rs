//! `codescape.toml` configuration for `codescape run`.
//!
//! # Example
//!
//! ```toml
//! [grid]
//! size = 40
//! mask = "island.txt"
//!
//! [placement]
//! search_radius = 20
//! default_center = [20, 20]
//! ```
//!
//! A relative `mask` path resolves against the config file's directory.
//! Every key is optional.

use std::path::{Path, PathBuf};

use codescape_eval::{SessionConfig, ValidityMask, DEFAULT_GRID_SIZE};
use serde::{Deserialize, Serialize};

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub placement: PlacementSettings,
}

/// `[grid]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridSettings {
    pub size: Option<usize>,
    /// Text (`#`/`.` rows) or JSON (`[[true, false], ...]`) mask file.
    pub mask: Option<PathBuf>,
}

/// `[placement]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlacementSettings {
    pub search_radius: Option<u32>,
    pub default_center: Option<[i64; 2]>,
}

// ── Functions ─────────────────────────────────────────────────────────────────

/// Read and parse a config file. Relative mask paths are rebased onto the
/// file's directory.
pub fn read_config(path: &Path) -> Result<CliConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;
    let mut config: CliConfig =
        toml::from_str(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))?;

    if let (Some(mask), Some(dir)) = (&config.grid.mask, path.parent()) {
        if mask.is_relative() {
            config.grid.mask = Some(dir.join(mask));
        }
    }
    Ok(config)
}

/// Load a mask file; `.json` files are parsed as JSON, anything else as text rows.
pub fn read_mask(path: &Path) -> Result<ValidityMask, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read mask '{}': {}", path.display(), e))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let mask = if is_json {
        ValidityMask::from_json(&content)
    } else {
        ValidityMask::parse_text(&content)
    };
    mask.map_err(|e| format!("invalid mask '{}': {}", path.display(), e))
}

impl CliConfig {
    /// Build the mask and session settings, applying command-line overrides.
    pub fn resolve(
        &self,
        mask_override: Option<&Path>,
        radius_override: Option<u32>,
    ) -> Result<(ValidityMask, SessionConfig), String> {
        let mask_path = mask_override.or(self.grid.mask.as_deref());
        let mask = match mask_path {
            Some(path) => {
                let mask = read_mask(path)?;
                if let Some(size) = self.grid.size {
                    if size != mask.size() {
                        return Err(format!(
                            "mask '{}' is {}x{} but grid.size is {}",
                            path.display(),
                            mask.size(),
                            mask.size(),
                            size
                        ));
                    }
                }
                mask
            }
            None => ValidityMask::all_land(self.grid.size.unwrap_or(DEFAULT_GRID_SIZE)),
        };

        let session = SessionConfig {
            grid_size: mask.size(),
            search_radius: radius_override.or(self.placement.search_radius),
            default_center: self.placement.default_center,
        };
        Ok((mask, session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_full_file_and_rebases_mask() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("codescape.toml");
        std::fs::write(
            &path,
            "[grid]\nsize = 3\nmask = \"island.txt\"\n\n[placement]\nsearch_radius = 2\ndefault_center = [1, 1]\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("island.txt"), "#.#\n###\n.#.\n").unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.grid.mask, Some(dir.path().join("island.txt")));

        let (mask, session) = config.resolve(None, None).unwrap();
        assert_eq!(mask.size(), 3);
        assert_eq!(mask.land_count(), 6);
        assert_eq!(session.radius(), 2);
        assert_eq!(session.default_center, Some([1, 1]));
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        let (mask, session) = config.resolve(None, Some(4)).unwrap();
        assert_eq!(mask.size(), DEFAULT_GRID_SIZE);
        assert_eq!(session.radius(), 4);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<CliConfig>("[grid]\nsides = 3\n").is_err());
    }

    #[test]
    fn mask_size_must_match_grid_size() {
        let dir = TempDir::new().unwrap();
        let mask = dir.path().join("m.json");
        std::fs::write(&mask, "[[true, true], [true, false]]").unwrap();
        let config = CliConfig {
            grid: GridSettings {
                size: Some(40),
                mask: None,
            },
            ..CliConfig::default()
        };
        let err = config.resolve(Some(&mask), None).unwrap_err();
        assert!(err.contains("is 2x2 but grid.size is 40"), "{}", err);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_config(Path::new("/nonexistent/codescape.toml")).unwrap_err();
        assert!(err.starts_with("could not read '/nonexistent/codescape.toml'"));
    }
}
