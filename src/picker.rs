// picker.rs - Image Source Picker
//
// Wraps the platform file dialog. Cancellation is a first-class outcome, not
// an error: the screen reacts to it with a notification and nothing else.

use std::path::PathBuf;

use log::info;

/// Result of asking the user for a photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Picked(PathBuf),
    Cancelled,
}

/// Open the platform file dialog filtered to common image formats
pub async fn pick_image() -> PickOutcome {
    let picked = rfd::AsyncFileDialog::new()
        .set_title("Choose a photo")
        .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "webp"])
        .pick_file()
        .await;

    match picked {
        Some(handle) => {
            let path = handle.path().to_path_buf();
            info!("Photo picked: {:?}", path);
            PickOutcome::Picked(path)
        }
        None => {
            info!("Image picker cancelled");
            PickOutcome::Cancelled
        }
    }
}
