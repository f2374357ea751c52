//! Utility functions for Voxel-ML

use std::fs::File;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::Result;

/// Save object to JSON file
pub fn save_json<T: Serialize>(obj: &T, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(obj)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Load object from JSON file
pub fn load_json<T: for<'de> Deserialize<'de>>(path: &str) -> Result<T> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    let obj = serde_json::from_str(&contents)?;
    Ok(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EncodingConfig;

    #[test]
    fn test_json_round_trip() {
        let config = EncodingConfig::for_ridge_encoding(2.5).with_folds(4);
        let path = std::env::temp_dir().join("voxel_ml_config_test.json");
        let path = path.to_str().unwrap();

        save_json(&config, path).unwrap();
        let loaded: EncodingConfig = load_json(path).unwrap();

        assert_eq!(config, loaded);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_missing_file_errors() {
        let result: Result<EncodingConfig> = load_json("/nonexistent/voxel_ml.json");
        assert!(result.is_err());
    }
}
