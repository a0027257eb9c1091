use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

use crate::core::error::{GateError, Result};
use crate::models::gate_model::GateConfig;

static CONFIG_CACHE: OnceLock<GateConfig> = OnceLock::new();

pub fn load_config(path: impl AsRef<Path>) -> Result<GateConfig> {
    let path = path.as_ref();

    let data = fs::read_to_string(path).map_err(|source| GateError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let config: GateConfig = serde_json::from_str(&data)?;

    debug!("Config parsed from {}", path.display());
    Ok(config)
}

/// Load the process-wide config once. Later calls return the first value.
pub fn init_config(path: impl AsRef<Path>) -> Result<&'static GateConfig> {
    if let Some(config) = CONFIG_CACHE.get() {
        return Ok(config);
    }
    let config = load_config(path)?;
    Ok(CONFIG_CACHE.get_or_init(|| config))
}

pub fn get_cached_config() -> Option<&'static GateConfig> {
    CONFIG_CACHE.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GateErrorKind;

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gate.json");
        fs::write(&path, r#"{ "encoding": "evt2", "chunk_size": 64 }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.encoding, "evt2");
        assert_eq!(config.apply().unwrap().chunk_size.get(), 64);
    }

    #[test]
    fn test_load_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.json");
        assert_eq!(load_config(&missing).unwrap_err().kind(), GateErrorKind::Config);

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ \"chunk_size\": 64 }").unwrap();
        assert_eq!(load_config(&broken).unwrap_err().kind(), GateErrorKind::Config);
    }

    #[test]
    fn test_init_config_caches_first() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");
        fs::write(&first, r#"{ "encoding": "dat" }"#).unwrap();
        fs::write(&second, r#"{ "encoding": "evt3" }"#).unwrap();

        let a = init_config(&first).unwrap();
        let b = init_config(&second).unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(std::ptr::eq(a, get_cached_config().unwrap()));
        assert_eq!(a.encoding, "dat");
    }
}
