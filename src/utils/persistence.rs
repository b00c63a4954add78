//! JSON persistence helpers for files under ~/.slogi/.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Name of the data directory inside the home directory.
const DATA_DIR: &str = ".slogi";

/// The ~/.slogi/ directory, created on first use.
pub fn slogi_dir() -> io::Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
    let dir = home.join(DATA_DIR);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Path of `filename` inside ~/.slogi/.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    slogi_dir().map(|dir| dir.join(filename))
}

/// Read `filename` as JSON. Any failure yields `T::default()`; a file
/// that exists but does not parse is logged.
pub fn load_json_or_default<T: Default + DeserializeOwned>(filename: &str) -> T {
    let path = match data_path(filename) {
        Ok(path) => path,
        Err(e) => {
            log::warn!("no data directory, using defaults: {}", e);
            return T::default();
        }
    };
    let Ok(json) = fs::read_to_string(&path) else {
        return T::default();
    };
    serde_json::from_str(&json).unwrap_or_else(|e| {
        log::warn!("ignoring unreadable {}: {}", path.display(), e);
        T::default()
    })
}

/// Write `data` as pretty JSON, through a temporary file and a rename.
pub fn save_json<T: Serialize>(filename: &str, data: &T) -> io::Result<()> {
    let path = data_path(filename)?;
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, &path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_path_is_inside_slogi_dir() {
        let path = data_path("test.json").unwrap();
        assert!(path.parent().unwrap().exists());
        assert!(path.ends_with(".slogi/test.json"));
    }

    #[test]
    fn test_load_missing_returns_default() {
        let val: Vec<String> = load_json_or_default("nonexistent_test_file_12345.json");
        assert!(val.is_empty());
    }

    #[test]
    fn test_load_invalid_returns_default() {
        fs::write(data_path("persistence_invalid_test.json").unwrap(), "{not json").unwrap();
        let val: Vec<u32> = load_json_or_default("persistence_invalid_test.json");
        assert!(val.is_empty());
        fs::remove_file(data_path("persistence_invalid_test.json").unwrap()).ok();
    }

    #[test]
    fn test_save_and_load() {
        let data = vec!["ба".to_string(), "ко".to_string()];
        save_json("persistence_test.json", &data).expect("save should succeed");

        let loaded: Vec<String> = load_json_or_default("persistence_test.json");
        assert_eq!(loaded, data);

        let path = data_path("persistence_test.json").unwrap();
        assert!(!path.with_extension("json.tmp").exists());
        fs::remove_file(path).ok();
    }
}
