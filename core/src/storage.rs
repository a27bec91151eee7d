// core/src/storage.rs
use std::error::Error;
use std::path::Path;

use crate::models::Profile;

/// Leser rytterprofil fra disk (JSON) med feltpresise feilmeldinger.
/// Hvis filen ikke finnes, returneres default-riggen.
pub fn load_profile(path: &str) -> Result<Profile, Box<dyn Error>> {
    if Path::new(path).exists() {
        let contents = std::fs::read_to_string(path)?;
        let mut de = serde_json::Deserializer::from_str(&contents);
        let profile: Profile = serde_path_to_error::deserialize(&mut de)?;
        log::debug!("profil lastet fra {path}");
        Ok(profile)
    } else {
        log::warn!("fant ikke profil på {path}, bruker default-rigg");
        Ok(Profile::default())
    }
}

/// Lagrer profil til disk som JSON (pretty-print).
pub fn save_profile(profile: &Profile, path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(profile)?;
    std::fs::write(path, json)?;
    log::debug!("profil lagret til {path}");
    Ok(())
}
