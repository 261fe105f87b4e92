//! Stickershot - Emoji Sticker Photo Editor
//!
//! This library holds everything below the window: the editor state machine,
//! the emoji sticker catalog, the scene compositor and the storage sinks.
//! The iced binary in `main.rs` is a thin message loop over it.

pub mod capture;
pub mod constants;
pub mod editor;
pub mod export;
pub mod permission;
pub mod picker;
pub mod state;
pub mod sticker;

// Re-export commonly used types
pub use capture::{CaptureService, CapturedImage, Compositor, Scene};
pub use editor::{Editor, ExportJob, SaveReport};
pub use export::{create_storage_sink, DownloadSink, EditorError, MediaLibrarySink, Platform, StorageSink};
pub use permission::{DirProbe, PermissionProvider, PermissionStatus};
pub use picker::PickOutcome;
pub use state::{EditorState, ExportPhase, Notification, ViewState};
pub use sticker::{Emoji, Sticker};
