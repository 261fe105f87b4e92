// permission.rs - Media Storage Permission
//
// The permission to write into the export target is an explicit capability
// object handed to the editor, not ambient global state. On desktop the
// request boils down to making sure the target directory exists and is
// writable.

use std::fs;
use std::path::PathBuf;

use log::{info, warn};

/// Tri-state permission status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionStatus {
    /// Not asked yet; the editor requests eagerly in this state
    #[default]
    Undetermined,
    Granted,
    Denied,
}

/// Capability to write into the media storage target
pub trait PermissionProvider: Send {
    fn status(&self) -> PermissionStatus;

    /// Ask for the permission; returns the resulting status
    fn request(&mut self) -> PermissionStatus;
}

/// Permission backed by a writability probe of a directory
pub struct DirProbe {
    dir: PathBuf,
    status: PermissionStatus,
}

impl DirProbe {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            status: PermissionStatus::Undetermined,
        }
    }

    /// Probe rooted at the platform pictures directory
    pub fn for_media_library() -> Self {
        let dir = dirs::picture_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir)
    }
}

impl PermissionProvider for DirProbe {
    fn status(&self) -> PermissionStatus {
        self.status
    }

    fn request(&mut self) -> PermissionStatus {
        self.status = match fs::create_dir_all(&self.dir)
            .and_then(|_| fs::metadata(&self.dir))
        {
            Ok(meta) if !meta.permissions().readonly() => {
                info!("Media storage permission granted for {:?}", self.dir);
                PermissionStatus::Granted
            }
            Ok(_) => {
                warn!("Media storage target {:?} is read-only", self.dir);
                PermissionStatus::Denied
            }
            Err(e) => {
                warn!("Media storage target {:?} unavailable: {}", self.dir, e);
                PermissionStatus::Denied
            }
        };
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_undetermined() {
        let probe = DirProbe::new("/tmp");
        assert_eq!(probe.status(), PermissionStatus::Undetermined);
    }

    #[test]
    fn request_grants_on_a_writable_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let mut probe = DirProbe::new(tmp.path());
        assert_eq!(probe.request(), PermissionStatus::Granted);
        assert_eq!(probe.status(), PermissionStatus::Granted);
    }

    #[test]
    fn request_creates_a_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("pictures").join("app");
        let mut probe = DirProbe::new(&nested);

        assert_eq!(probe.request(), PermissionStatus::Granted);
        assert!(nested.is_dir());
    }

    #[test]
    fn request_denies_when_the_target_cannot_exist() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        fs::write(&blocker, b"x").unwrap();

        // A directory cannot be created under a regular file
        let mut probe = DirProbe::new(blocker.join("sub"));
        assert_eq!(probe.request(), PermissionStatus::Denied);
    }
}
