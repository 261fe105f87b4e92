// constants.rs - Application-wide Constants
//
// Centralized constants for the capture region, sticker metrics and the
// user-facing notification strings.

/// Composited capture region (logical pixels)
pub mod capture {
    /// Output width of the exported image
    pub const WIDTH: u32 = 320;
    /// Output height of the exported image
    pub const HEIGHT: u32 = 440;
    /// JPEG encode quality (1-100)
    pub const JPEG_QUALITY: u8 = 100;
}

/// Sticker metrics
pub mod sticker {
    /// Default sticker edge length when stamped onto the photo
    pub const DEFAULT_SIZE: u32 = 96;
    /// Thumbnail edge length in the emoji picker sheet
    pub const THUMBNAIL_SIZE: u32 = 56;
}

/// Notification strings surfaced to the user.
///
/// The exact wording matters: tests assert on these strings, including the
/// casing difference between the two save messages.
pub mod messages {
    /// Picker dismissed without a selection
    pub const PICKER_CANCELLED: &str = "You cancelled the image picker";
    /// Save attempted with no sticker on the photo
    pub const NO_STICKER: &str =
        "Oh! no, no, no!!! You must add an emoji before saving the image.";
    /// Media-library sink succeeded
    pub const SAVED_MEDIA_LIBRARY: &str = "Image Saved Successfully";
    /// Download sink succeeded
    pub const SAVED_DOWNLOAD: &str = "Image saved successfully";
    /// Capture or sink failed
    pub const SAVE_FAILED: &str = "An error occurred while saving the image";
}

/// Fixed file name used by the download sink
pub const DOWNLOAD_FILE_NAME: &str = "image.jpeg";
