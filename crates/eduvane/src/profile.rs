use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub use crate::models::context::UserProfile;

pub const PROFILE_FILE_NAME: &str = "profile.json";

/// Read-only lookup of the signed-in user's persisted profile
pub trait ProfileStore: Send + Sync {
    fn get_user_profile(&self) -> Option<UserProfile>;
}

/// A profile store for deployments without any persisted user
pub struct NoProfileStore;

impl ProfileStore for NoProfileStore {
    fn get_user_profile(&self) -> Option<UserProfile> {
        None
    }
}

/// Reads the profile from a JSON file, `~/.config/eduvane/profile.json` by default
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn from_default_location() -> Result<Self> {
        Ok(Self::new(profile_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Option<UserProfile>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}

impl ProfileStore for FileProfileStore {
    fn get_user_profile(&self) -> Option<UserProfile> {
        match self.load() {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "ignoring unreadable profile: {}", e);
                None
            }
        }
    }
}

pub fn config_dir() -> Result<PathBuf> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(".config").join("eduvane"))
}

pub fn profile_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(PROFILE_FILE_NAME))
}
