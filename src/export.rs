// export.rs - Storage Sinks
//
// This module provides the persistence half of the export flow. The platform
// branch (device media library vs browser-style download) is expressed as a
// `StorageSink` trait with one implementation per platform, selected once at
// construction by `create_storage_sink`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::info;

use crate::capture::CapturedImage;
use crate::constants::{messages, DOWNLOAD_FILE_NAME};

/// The only two error kinds the screen distinguishes. Everything a sink or
/// capture can throw collapses into `OperationFailed`; nothing propagates
/// past the notification layer.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("the image picker was dismissed without a selection")]
    UserCancelled,

    #[error("operation failed: {0}")]
    OperationFailed(#[from] anyhow::Error),
}

/// Which persistence behavior to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Save into the device media library (pictures directory)
    Native,
    /// Browser-style download (fixed file name in the downloads directory)
    Download,
}

impl Platform {
    /// Detect the platform, honoring a `--download` override the way the
    /// binary's other flags are scanned.
    pub fn detect(force_download: bool) -> Self {
        if force_download {
            Platform::Download
        } else {
            Platform::Native
        }
    }
}

/// Trait for image persistence implementations
pub trait StorageSink: Send + Sync {
    /// Persist the captured image, returning where it landed
    fn persist(&self, image: &CapturedImage) -> Result<PathBuf, EditorError>;

    /// Success notification text for this sink
    fn success_message(&self) -> &'static str;
}

/// Saves captures into the platform pictures directory with a timestamped
/// name, the desktop analog of the mobile media library.
pub struct MediaLibrarySink {
    dir: PathBuf,
}

impl MediaLibrarySink {
    pub fn new() -> Self {
        let dir = dirs::picture_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Stickershot");
        Self { dir }
    }

    /// Sink rooted at an explicit directory (used by tests)
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Default for MediaLibrarySink {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageSink for MediaLibrarySink {
    fn persist(&self, image: &CapturedImage) -> Result<PathBuf, EditorError> {
        let name = format!("sticker-{}.jpeg", chrono::Local::now().format("%Y%m%d-%H%M%S"));
        let path = write_jpeg(&self.dir, &name, &image.data)?;
        info!("Saved {}x{} capture to media library: {:?}", image.width, image.height, path);
        Ok(path)
    }

    fn success_message(&self) -> &'static str {
        messages::SAVED_MEDIA_LIBRARY
    }
}

/// Drops the capture into the downloads directory under the fixed name
/// `image.jpeg`, mirroring a browser download.
pub struct DownloadSink {
    dir: PathBuf,
}

impl DownloadSink {
    pub fn new() -> Self {
        let dir = dirs::download_dir().unwrap_or_else(|| PathBuf::from("."));
        Self { dir }
    }

    /// Sink rooted at an explicit directory (used by tests)
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Default for DownloadSink {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageSink for DownloadSink {
    fn persist(&self, image: &CapturedImage) -> Result<PathBuf, EditorError> {
        let path = write_jpeg(&self.dir, DOWNLOAD_FILE_NAME, &image.data)?;
        info!("Downloaded {}x{} capture to {:?}", image.width, image.height, path);
        Ok(path)
    }

    fn success_message(&self) -> &'static str {
        messages::SAVED_DOWNLOAD
    }
}

/// Create the storage sink for the given platform
pub fn create_storage_sink(platform: Platform) -> Box<dyn StorageSink> {
    match platform {
        Platform::Native => Box::new(MediaLibrarySink::new()),
        Platform::Download => Box::new(DownloadSink::new()),
    }
}

fn write_jpeg(dir: &Path, name: &str, data: &[u8]) -> Result<PathBuf, EditorError> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(name);
    fs::write(&path, data)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> CapturedImage {
        CapturedImage {
            data: vec![0xFF, 0xD8, 0xFF, 0xD9],
            width: 320,
            height: 440,
        }
    }

    #[test]
    fn download_sink_writes_the_fixed_file_name() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = DownloadSink::with_dir(tmp.path());

        let path = sink.persist(&capture()).unwrap();

        assert_eq!(path.file_name().unwrap(), "image.jpeg");
        assert_eq!(fs::read(&path).unwrap(), capture().data);
        assert_eq!(sink.success_message(), "Image saved successfully");
    }

    #[test]
    fn media_library_sink_writes_a_timestamped_jpeg() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = MediaLibrarySink::with_dir(tmp.path());

        let path = sink.persist(&capture()).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("sticker-"), "{name}");
        assert!(name.ends_with(".jpeg"), "{name}");
        assert_eq!(sink.success_message(), "Image Saved Successfully");
    }

    #[test]
    fn sinks_create_their_directory_on_demand() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("not").join("yet").join("there");
        let sink = DownloadSink::with_dir(&nested);

        assert!(sink.persist(&capture()).is_ok());
        assert!(nested.join("image.jpeg").exists());
    }

    #[test]
    fn persisting_into_an_unwritable_location_fails() {
        let tmp = tempfile::tempdir().unwrap();
        // A regular file where the sink expects a directory
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();

        let sink = DownloadSink::with_dir(&blocker);
        let err = sink.persist(&capture()).unwrap_err();
        assert!(matches!(err, EditorError::OperationFailed(_)));
    }

    #[test]
    fn factory_selects_the_sink_for_the_platform() {
        assert_eq!(
            create_storage_sink(Platform::Native).success_message(),
            "Image Saved Successfully"
        );
        assert_eq!(
            create_storage_sink(Platform::Download).success_message(),
            "Image saved successfully"
        );
    }

    #[test]
    fn platform_detection_honors_the_download_override() {
        assert_eq!(Platform::detect(false), Platform::Native);
        assert_eq!(Platform::detect(true), Platform::Download);
    }
}
