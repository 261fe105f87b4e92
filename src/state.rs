// state.rs - Core Editor State
//
// This module defines the transient, session-scoped state of the editing
// screen and the export state machine. It is the single source of truth:
// the UI derives everything it shows from here.

use std::path::PathBuf;

use crate::constants::messages;
use crate::sticker::{Emoji, Sticker};

/// What the screen is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// No photo chosen yet; the footer offers "Choose a photo" / "Use this photo"
    Idle,
    /// A photo (or the placeholder) is on screen and the option row is shown
    Editing,
}

/// Phase of the save/export flow.
///
/// Replaces the overlapping booleans a naive implementation would keep
/// (`emoji_selected`, `picked_emoji != None`, ...) with one enumeration, so
/// inconsistent combinations cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportPhase {
    /// No sticker on the photo; export is rejected with a warning
    #[default]
    NoSticker,
    /// A sticker is placed; export may proceed
    StickerAdded,
    /// A capture + persist job is in flight
    Exporting,
    /// Last export finished and the image was persisted
    ExportSucceeded,
    /// Last export failed (capture or sink error)
    ExportFailed,
}

/// Transient user-facing notification
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notification {
    pub message: String,
    pub visible: bool,
}

impl Notification {
    pub fn show(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.visible = true;
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }
}

/// Session-scoped editor state. Nothing here survives a restart.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    /// Photo picked from disk; `None` means the built-in placeholder
    pub selected_image: Option<PathBuf>,
    /// Sticker stamped on the photo, if any
    pub sticker: Option<Sticker>,
    /// Whether the option row (Reset / Add sticker / Save) is shown
    pub show_options: bool,
    /// Whether the emoji picker sheet is open
    pub picker_open: bool,
    /// Current phase of the export flow
    pub phase: ExportPhase,
    /// Transient message shown to the user
    pub notification: Notification,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive what the screen shows from image presence and the options flag
    pub fn view_state(&self) -> ViewState {
        if self.show_options {
            ViewState::Editing
        } else {
            ViewState::Idle
        }
    }

    /// A photo was picked from disk
    pub fn image_picked(&mut self, path: PathBuf) {
        self.selected_image = Some(path);
        self.show_options = true;
    }

    /// The picker was dismissed without a selection
    pub fn picker_cancelled(&mut self) {
        self.notification.show(messages::PICKER_CANCELLED);
    }

    /// Proceed with the built-in placeholder instead of picking a photo
    pub fn use_placeholder(&mut self) {
        self.show_options = true;
    }

    /// Stamp an emoji onto the photo. Re-arms the state machine from any
    /// phase, including the terminal ones.
    pub fn choose_sticker(&mut self, emoji: Emoji) {
        self.sticker = Some(Sticker::new(emoji));
        self.picker_open = false;
        self.phase = ExportPhase::StickerAdded;
    }

    /// Explicit Reset: back to defaults regardless of prior state
    pub fn reset(&mut self) {
        self.selected_image = None;
        self.sticker = None;
        self.show_options = false;
        self.picker_open = false;
        self.phase = ExportPhase::NoSticker;
    }

    /// Guarded entry into the Exporting phase.
    ///
    /// Returns the sticker to composite when export may proceed. With no
    /// sticker present the export is rejected: the warning notification is
    /// raised and the phase is left untouched, so the storage sink is never
    /// reached.
    pub fn begin_export(&mut self) -> Option<Sticker> {
        // Only one job in flight at a time
        if self.phase == ExportPhase::Exporting {
            return None;
        }
        match self.sticker {
            Some(sticker) => {
                self.phase = ExportPhase::Exporting;
                Some(sticker)
            }
            None => {
                self.notification.show(messages::NO_STICKER);
                None
            }
        }
    }

    /// Resolve the Exporting phase into a terminal one. The image and
    /// sticker are left untouched either way.
    pub fn finish_export(&mut self, success_message: Option<&str>) {
        match success_message {
            Some(msg) => {
                self.phase = ExportPhase::ExportSucceeded;
                self.notification.show(msg);
            }
            None => {
                self.phase = ExportPhase::ExportFailed;
                self.notification.show(messages::SAVE_FAILED);
            }
        }
    }
}
