//! Configuration loaded from `.cfglint.toml`.
//!
//! Every setting has a default, so running without a config file works.
//! The file is discovered by walking ancestor directories of the current
//! working directory, nearest first, up to a fixed depth.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::detectors::Severity;

/// A static call identified by owner type and method name, used for the
/// source/sink predicates of the reachability detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallPattern {
    pub owner: String,
    pub method: String,
}

impl CallPattern {
    pub fn new(owner: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            method: method.into(),
        }
    }

    pub fn math_random() -> Self {
        Self::new("java.lang.Math", "random")
    }

    pub fn math_sin() -> Self {
        Self::new("java.lang.Math", "sin")
    }

    pub fn matches(&self, instruction: &crate::ir::Instruction) -> bool {
        instruction.is_static_call_to(&self.owner, &self.method)
    }
}

/// Which detectors run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorToggles {
    pub cycle: bool,
    pub rand_sin: bool,
}

impl Default for DetectorToggles {
    fn default() -> Self {
        Self {
            cycle: true,
            rand_sin: true,
        }
    }
}

/// Source/sink patterns for the reachability detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandSinPatterns {
    pub source: CallPattern,
    pub sink: CallPattern,
}

impl Default for RandSinPatterns {
    fn default() -> Self {
        Self {
            source: CallPattern::math_random(),
            sink: CallPattern::math_sin(),
        }
    }
}

/// Top-level cfglint configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CfglintConfig {
    pub detectors: DetectorToggles,
    pub rand_sin: RandSinPatterns,
    /// Reports below this severity are dropped before reaching the
    /// reporter.
    pub min_severity: Severity,
}

/// Parse a TOML config string, falling back to field defaults for
/// anything unspecified.
pub fn parse_config(contents: &str) -> Result<CfglintConfig, String> {
    toml::from_str::<CfglintConfig>(contents)
        .map_err(|e| format!("failed to parse .cfglint.toml: {}", e))
}

fn try_load_from_path(path: &Path) -> Option<CfglintConfig> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("failed to read config file {}: {}", path.display(), e);
            }
            return None;
        }
    };
    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("loaded config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: {}. Using defaults.", e);
            None
        }
    }
}

/// Load a config file explicitly, or discover `.cfglint.toml` in the
/// ancestors of the current directory. Defaults apply when nothing is
/// found.
pub fn load_config(explicit: Option<&Path>) -> CfglintConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    if let Some(path) = explicit {
        return try_load_from_path(path).unwrap_or_default();
    }

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!("failed to get current directory: {}. Using defaults.", e);
            return CfglintConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(".cfglint.toml"))
        .find_map(|path| try_load_from_path(&path))
        .unwrap_or_default()
}

fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}
