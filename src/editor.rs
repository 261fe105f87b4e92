// editor.rs - Screen Controller
//
// Orchestrates the three external capabilities (picker, capture service,
// storage sink) around the editor state. Lives in the library so the whole
// save/export flow can be driven headless, without an iced runtime.

use std::path::PathBuf;
use std::sync::Arc;

use log::{error, info};

use crate::capture::{CaptureService, Compositor, Scene};
use crate::export::{create_storage_sink, EditorError, Platform, StorageSink};
use crate::permission::{DirProbe, PermissionProvider, PermissionStatus};
use crate::picker::PickOutcome;
use crate::state::EditorState;
use crate::sticker::Emoji;

/// Outcome of a finished export job, cheap to clone across the UI boundary
#[derive(Debug, Clone)]
pub struct SaveReport {
    pub message: &'static str,
    pub path: PathBuf,
}

/// A ready-to-run capture + persist job. Built on the UI thread under the
/// no-sticker guard, executed wherever the caller likes.
pub struct ExportJob {
    scene: Scene,
    capture: Arc<dyn CaptureService>,
    sink: Arc<dyn StorageSink>,
}

impl ExportJob {
    pub fn run(self) -> Result<SaveReport, EditorError> {
        let image = self.capture.capture(&self.scene)?;
        let path = self.sink.persist(&image)?;
        Ok(SaveReport {
            message: self.sink.success_message(),
            path,
        })
    }
}

/// The screen controller
pub struct Editor {
    pub state: EditorState,
    capture: Arc<dyn CaptureService>,
    sink: Arc<dyn StorageSink>,
    permission: Box<dyn PermissionProvider>,
}

impl Editor {
    /// Wire the controller with explicit capabilities. The media permission
    /// is requested eagerly when it has not been determined yet.
    pub fn new(
        capture: Arc<dyn CaptureService>,
        sink: Arc<dyn StorageSink>,
        mut permission: Box<dyn PermissionProvider>,
    ) -> Self {
        if permission.status() == PermissionStatus::Undetermined {
            let status = permission.request();
            info!("Media permission requested eagerly: {:?}", status);
        }

        Self {
            state: EditorState::new(),
            capture,
            sink,
            permission,
        }
    }

    /// Default wiring for the given platform: software compositor, the
    /// platform's storage sink, and a media-library permission probe.
    pub fn for_platform(platform: Platform) -> Self {
        Self::new(
            Arc::new(Compositor::new()),
            Arc::from(create_storage_sink(platform)),
            Box::new(DirProbe::for_media_library()),
        )
    }

    pub fn permission_status(&self) -> PermissionStatus {
        self.permission.status()
    }

    /// Apply the picker outcome to the screen
    pub fn image_picked(&mut self, outcome: PickOutcome) {
        match outcome {
            PickOutcome::Picked(path) => self.state.image_picked(path),
            PickOutcome::Cancelled => self.state.picker_cancelled(),
        }
    }

    /// Proceed with the placeholder photo
    pub fn use_placeholder(&mut self) {
        self.state.use_placeholder();
    }

    pub fn choose_sticker(&mut self, emoji: Emoji) {
        self.state.choose_sticker(emoji);
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Guarded export trigger. With no sticker present the warning
    /// notification is raised and no job is produced, so the storage sink is
    /// never invoked. Otherwise the state enters Exporting and the returned
    /// job captures + persists the current scene.
    pub fn save_image(&mut self) -> Option<ExportJob> {
        let sticker = self.state.begin_export()?;
        Some(ExportJob {
            scene: Scene {
                image: self.state.selected_image.clone(),
                sticker: Some(sticker),
            },
            capture: Arc::clone(&self.capture),
            sink: Arc::clone(&self.sink),
        })
    }

    /// Resolve a finished export into a terminal phase + notification
    pub fn export_finished(&mut self, outcome: Result<SaveReport, String>) {
        match outcome {
            Ok(report) => {
                info!("Export finished: {:?}", report.path);
                self.state.finish_export(Some(report.message));
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.state.finish_export(None);
            }
        }
    }

    pub fn dismiss_notification(&mut self) {
        self.state.notification.dismiss();
    }
}
