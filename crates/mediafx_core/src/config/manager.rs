//! Loading and saving settings files.

use std::io;
use std::path::Path;

use super::settings::Settings;

/// Load settings from a TOML file.
pub fn load_from(path: &Path) -> io::Result<Settings> {
    let contents = std::fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Load settings from a TOML file, falling back to defaults if the file does
/// not exist. A malformed file is still an error.
pub fn load_or_default(path: &Path) -> io::Result<Settings> {
    match load_from(path) {
        Ok(settings) => Ok(settings),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(e) => Err(e),
    }
}

/// Save settings to a TOML file.
pub fn save_to(settings: &Settings, path: &Path) -> io::Result<()> {
    let contents = toml::to_string_pretty(settings)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, contents)
}
