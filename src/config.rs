//! RON file plumbing shared by [`crate::params::ExpansionParameters`] and
//! [`crate::l_system::RuleSet`].
use std::io::Read;
use std::path::Path;

use log::info;
use ron::ser::PrettyConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::Result;

pub fn to_ron_string<T: Serialize>(value: &T) -> Result<String> {
    Ok(ron::ser::to_string_pretty(value, PrettyConfig::default())?)
}

pub fn from_ron_str<T: DeserializeOwned>(data: &str) -> Result<T> {
    Ok(ron::from_str(data)?)
}

/// Writes to a temp file next to `path` first, then renames it into place so a
/// half-written file never shows up under the real name.
pub fn to_file<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let content = to_ron_string(value)?;
    let tmp_path = path.with_extension(format!("tmp-{}", std::process::id()));
    std::fs::write(&tmp_path, content)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    info!("Wrote {}", path.display());
    Ok(())
}

pub fn from_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let mut reader = std::fs::File::open(path)?;
    let mut data = String::new();
    reader.read_to_string(&mut data)?;
    from_ron_str(&data)
}
