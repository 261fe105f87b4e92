// Integration tests for the save/export flow, driven headless through the
// editor controller with mock capture services and storage sinks.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::anyhow;
use stickershot::capture::{CaptureService, CapturedImage, Compositor, Scene};
use stickershot::editor::Editor;
use stickershot::export::{DownloadSink, EditorError, StorageSink};
use stickershot::permission::{PermissionProvider, PermissionStatus};
use stickershot::picker::PickOutcome;
use stickershot::state::{ExportPhase, ViewState};
use stickershot::sticker::Emoji;

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

struct MockCapture;

impl CaptureService for MockCapture {
    fn capture(&self, _scene: &Scene) -> anyhow::Result<CapturedImage> {
        Ok(CapturedImage {
            data: vec![0xFF, 0xD8, 0xFF, 0xD9],
            width: 320,
            height: 440,
        })
    }
}

struct FailingCapture;

impl CaptureService for FailingCapture {
    fn capture(&self, _scene: &Scene) -> anyhow::Result<CapturedImage> {
        Err(anyhow!("capture blew up"))
    }
}

struct RecordingSink {
    calls: AtomicUsize,
    fail: bool,
}

impl RecordingSink {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StorageSink for RecordingSink {
    fn persist(&self, _image: &CapturedImage) -> Result<PathBuf, EditorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(EditorError::OperationFailed(anyhow!("disk full")))
        } else {
            Ok(PathBuf::from("/tmp/saved.jpeg"))
        }
    }

    fn success_message(&self) -> &'static str {
        "Image Saved Successfully"
    }
}

struct StubPermission {
    status: PermissionStatus,
    requested: Arc<AtomicBool>,
}

impl PermissionProvider for StubPermission {
    fn status(&self) -> PermissionStatus {
        self.status
    }

    fn request(&mut self) -> PermissionStatus {
        self.requested.store(true, Ordering::SeqCst);
        self.status = PermissionStatus::Granted;
        self.status
    }
}

fn granted_permission() -> Box<StubPermission> {
    Box::new(StubPermission {
        status: PermissionStatus::Granted,
        requested: Arc::new(AtomicBool::new(false)),
    })
}

fn editor_with(sink: Arc<dyn StorageSink>, capture: Arc<dyn CaptureService>) -> Editor {
    Editor::new(capture, sink, granted_permission())
}

/// Drive a pending export job to completion the way the UI does
fn run_export(editor: &mut Editor) {
    if let Some(job) = editor.save_image() {
        let outcome = job.run().map_err(|e| e.to_string());
        editor.export_finished(outcome);
    }
}

// ---------------------------------------------------------------------------
// Spec scenarios
// ---------------------------------------------------------------------------

#[test]
fn export_without_sticker_warns_and_never_invokes_the_sink() {
    let sink = RecordingSink::new(false);
    let mut editor = editor_with(sink.clone(), Arc::new(MockCapture));
    editor.image_picked(PickOutcome::Picked(PathBuf::from("/tmp/photo.png")));

    run_export(&mut editor);

    assert_eq!(sink.calls(), 0);
    assert_eq!(
        editor.state.notification.message,
        "Oh! no, no, no!!! You must add an emoji before saving the image."
    );
    assert!(editor.state.notification.visible);
    assert_ne!(editor.state.phase, ExportPhase::Exporting);
}

#[test]
fn export_with_sticker_invokes_exactly_one_sink_call() {
    let sink = RecordingSink::new(false);
    let mut editor = editor_with(sink.clone(), Arc::new(MockCapture));
    editor.choose_sticker(Emoji::Grin);

    run_export(&mut editor);

    assert_eq!(sink.calls(), 1);
    assert_eq!(editor.state.phase, ExportPhase::ExportSucceeded);
    assert_eq!(editor.state.notification.message, "Image Saved Successfully");
}

#[test]
fn failed_sink_yields_generic_failure_and_preserves_state() {
    let sink = RecordingSink::new(true);
    let mut editor = editor_with(sink.clone(), Arc::new(MockCapture));
    editor.image_picked(PickOutcome::Picked(PathBuf::from("/tmp/photo.png")));
    editor.choose_sticker(Emoji::Wink);

    run_export(&mut editor);

    assert_eq!(sink.calls(), 1);
    assert_eq!(editor.state.phase, ExportPhase::ExportFailed);
    assert_eq!(
        editor.state.notification.message,
        "An error occurred while saving the image"
    );
    // Prior image and sticker survive the failure
    assert_eq!(
        editor.state.selected_image,
        Some(PathBuf::from("/tmp/photo.png"))
    );
    assert_eq!(editor.state.sticker.map(|s| s.emoji), Some(Emoji::Wink));
}

#[test]
fn failed_capture_never_reaches_the_sink() {
    let sink = RecordingSink::new(false);
    let mut editor = editor_with(sink.clone(), Arc::new(FailingCapture));
    editor.choose_sticker(Emoji::Smile);

    run_export(&mut editor);

    assert_eq!(sink.calls(), 0);
    assert_eq!(editor.state.phase, ExportPhase::ExportFailed);
    assert_eq!(
        editor.state.notification.message,
        "An error occurred while saving the image"
    );
}

#[test]
fn cancelling_the_picker_keeps_options_hidden_and_notifies() {
    let sink = RecordingSink::new(false);
    let mut editor = editor_with(sink, Arc::new(MockCapture));

    editor.image_picked(PickOutcome::Cancelled);

    assert!(!editor.state.show_options);
    assert_eq!(editor.state.view_state(), ViewState::Idle);
    assert_eq!(editor.state.notification.message, "You cancelled the image picker");
}

#[test]
fn reset_returns_to_defaults_regardless_of_prior_state() {
    let sink = RecordingSink::new(false);
    let mut editor = editor_with(sink, Arc::new(MockCapture));
    editor.image_picked(PickOutcome::Picked(PathBuf::from("/tmp/photo.png")));
    editor.choose_sticker(Emoji::Cool);
    run_export(&mut editor);

    editor.reset();

    assert_eq!(editor.state.selected_image, None);
    assert_eq!(editor.state.sticker, None);
    assert!(!editor.state.show_options);
    assert_eq!(editor.state.phase, ExportPhase::NoSticker);
}

#[test]
fn permission_is_requested_eagerly_when_undetermined() {
    let requested = Arc::new(AtomicBool::new(false));
    let permission = Box::new(StubPermission {
        status: PermissionStatus::Undetermined,
        requested: requested.clone(),
    });

    let editor = Editor::new(Arc::new(MockCapture), RecordingSink::new(false), permission);

    assert!(requested.load(Ordering::SeqCst));
    assert_eq!(editor.permission_status(), PermissionStatus::Granted);
}

#[test]
fn permission_is_not_rerequested_when_already_granted() {
    let requested = Arc::new(AtomicBool::new(false));
    let permission = Box::new(StubPermission {
        status: PermissionStatus::Granted,
        requested: requested.clone(),
    });

    let _editor = Editor::new(Arc::new(MockCapture), RecordingSink::new(false), permission);

    assert!(!requested.load(Ordering::SeqCst));
}

// ---------------------------------------------------------------------------
// Download branch, end to end with the real compositor
// ---------------------------------------------------------------------------

#[test]
fn download_branch_saves_image_jpeg_and_reports_success() {
    let tmp = tempfile::tempdir().unwrap();
    let sink: Arc<dyn StorageSink> = Arc::new(DownloadSink::with_dir(tmp.path()));
    let mut editor = Editor::new(Arc::new(Compositor::new()), sink, granted_permission());

    // Placeholder photo + sticker, like the web scenario
    editor.use_placeholder();
    editor.choose_sticker(Emoji::HeartEyes);

    run_export(&mut editor);

    assert_eq!(editor.state.phase, ExportPhase::ExportSucceeded);
    assert_eq!(editor.state.notification.message, "Image saved successfully");

    let saved = tmp.path().join("image.jpeg");
    assert!(saved.exists());
    let decoded = image::open(&saved).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (320, 440));
}
