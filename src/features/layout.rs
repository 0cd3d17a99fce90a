//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the order the scoring model was trained on.**
//!
//! Rules:
//! 1. Add feature → increment FEATURE_VERSION (and retrain the model)
//! 2. Change order → increment FEATURE_VERSION (and retrain the model)
//! 3. Remove feature → increment FEATURE_VERSION (and retrain the model)
//!
//! `air_state` is descriptive only and never part of the layout.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Sensor (0-2) ===
    "air_quality",  // 0: Raw air quality index
    "humidity",     // 1: Relative humidity
    "temperature",  // 2: Temperature

    // === Time context (3-5) ===
    "hour_of_day",  // 3: 0-23
    "day_of_week",  // 4: 0-6, Monday = 0
    "month",        // 5: 1-12
];

/// Total number of features. Must match FEATURE_LAYOUT.len().
pub const FEATURE_COUNT: usize = 6;

/// CRC32 over version and feature names, used to spot layout drift in logs.
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }

    hasher.finalize()
}

/// Layout description exposed on the health endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_layout_order() {
        assert_eq!(
            FEATURE_LAYOUT,
            &["air_quality", "humidity", "temperature", "hour_of_day", "day_of_week", "month"]
        );
        assert_eq!(feature_index("air_state"), None);
    }

    #[test]
    fn test_layout_hash_stable() {
        assert_eq!(layout_hash(), layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.hash, layout_hash());
        assert_eq!(info.feature_names.len(), FEATURE_COUNT);
    }
}
