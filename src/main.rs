//! Stickershot - Iced UI
//!
//! Single-window photo editing screen:
//! - Pick a photo (or keep the placeholder)
//! - Stamp an emoji sticker on it from the bottom sheet
//! - Export the composited 320x440 region to the media library, or as a
//!   browser-style download with `--download`

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use iced::widget::{
    button, center, column, container, image, mouse_area, opaque, row, scrollable, stack, text,
    horizontal_space, vertical_space,
};
use iced::{Alignment, Color, Element, Length, Padding, Size, Subscription, Task, Theme};

use log::info;

use stickershot::constants;
use stickershot::editor::{Editor, SaveReport};
use stickershot::picker::{self, PickOutcome};
use stickershot::state::{ExportPhase, ViewState};
use stickershot::sticker::Emoji;
use stickershot::{capture, Platform};

// ============================================================================
// Constants
// ============================================================================

const WINDOW_WIDTH: f32 = 480.0;
const WINDOW_HEIGHT: f32 = 660.0;

const IMAGE_AREA_WIDTH: f32 = constants::capture::WIDTH as f32;
const IMAGE_AREA_HEIGHT: f32 = constants::capture::HEIGHT as f32;

// Color palette (modern dark theme)
mod colors {
    use iced::Color;

    pub const BG_PRIMARY: Color = Color::from_rgb(0.09, 0.09, 0.12);
    pub const BG_SECONDARY: Color = Color::from_rgb(0.12, 0.12, 0.16);
    pub const BG_TERTIARY: Color = Color::from_rgb(0.16, 0.16, 0.22);

    pub const ACCENT: Color = Color::from_rgb(0.35, 0.55, 0.95);
    pub const SUCCESS: Color = Color::from_rgb(0.2, 0.75, 0.45);
    pub const DANGER: Color = Color::from_rgb(0.9, 0.3, 0.35);

    pub const TEXT_PRIMARY: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.95);
    pub const TEXT_SECONDARY: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.6);
    pub const TEXT_MUTED: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.4);

    pub const BORDER: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.1);
    pub const SCRIM: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.6);
}

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone)]
enum Message {
    // Image source
    OpenImagePicker,
    PickerResult(PickOutcome),
    UsePlaceholder,

    // Options row
    Reset,
    OpenStickerPicker,
    SaveImage,

    // Sticker sheet
    StickerChosen(Emoji),
    CloseStickerPicker,

    // Export flow
    ExportFinished(Result<SaveReport, String>),

    // Overlays
    DismissNotification,
    DismissOverlays,
}

// ============================================================================
// Application State
// ============================================================================

struct StickerApp {
    editor: Editor,

    // Cached raster handles so view() never re-rasterizes
    placeholder: image::Handle,
    thumbnails: Vec<(Emoji, image::Handle)>,
    sticker_handle: Option<image::Handle>,
}

impl StickerApp {
    fn new() -> (Self, Task<Message>) {
        let force_download = std::env::args().any(|arg| arg == "--download");
        let platform = Platform::detect(force_download);
        info!("Stickershot starting, platform branch: {:?}", platform);

        let editor = Editor::for_platform(platform);

        let placeholder = rgba_handle(capture::placeholder_image(
            constants::capture::WIDTH,
            constants::capture::HEIGHT,
        ));

        let thumbnails = Emoji::ALL
            .iter()
            .map(|&emoji| {
                let raster = emoji.rasterize(constants::sticker::THUMBNAIL_SIZE);
                (emoji, rgba_handle(raster))
            })
            .collect();

        let app = Self {
            editor,
            placeholder,
            thumbnails,
            sticker_handle: None,
        };

        (app, Task::none())
    }

    fn title(&self) -> String {
        format!(
            "Stickershot - {}x{}",
            constants::capture::WIDTH,
            constants::capture::HEIGHT
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenImagePicker => {
                return Task::perform(picker::pick_image(), Message::PickerResult);
            }
            Message::PickerResult(outcome) => {
                self.editor.image_picked(outcome);
            }
            Message::UsePlaceholder => {
                self.editor.use_placeholder();
            }

            Message::Reset => {
                self.editor.reset();
                self.sticker_handle = None;
            }
            Message::OpenStickerPicker => {
                self.editor.state.picker_open = true;
            }
            Message::CloseStickerPicker => {
                self.editor.state.picker_open = false;
            }
            Message::StickerChosen(emoji) => {
                self.editor.choose_sticker(emoji);
                let size = self
                    .editor
                    .state
                    .sticker
                    .map(|s| s.size)
                    .unwrap_or(constants::sticker::DEFAULT_SIZE);
                self.sticker_handle = Some(rgba_handle(emoji.rasterize(size)));
            }

            Message::SaveImage => {
                if let Some(job) = self.editor.save_image() {
                    return Task::perform(
                        async move { job.run().map_err(|e| e.to_string()) },
                        Message::ExportFinished,
                    );
                }
            }
            Message::ExportFinished(outcome) => {
                self.editor.export_finished(outcome);
            }

            Message::DismissNotification => {
                self.editor.dismiss_notification();
            }
            Message::DismissOverlays => {
                self.editor.state.picker_open = false;
                self.editor.dismiss_notification();
            }
        }

        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let content = column![
            vertical_space().height(16),
            center(self.view_image_area()).height(Length::Shrink),
            vertical_space(),
            self.view_controls(),
            vertical_space().height(8),
            self.view_status_line(),
            vertical_space().height(12),
        ]
        .align_x(Alignment::Center)
        .width(Length::Fill);

        let base = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_| container::Style {
                background: Some(iced::Background::Color(colors::BG_PRIMARY)),
                ..Default::default()
            });

        // Overlays stack on top of the screen; the sticker sheet sits below
        // the notification so a save warning is never hidden by the sheet
        let mut layers = stack![base];
        if self.editor.state.picker_open {
            layers = layers.push(self.view_sticker_sheet());
        }
        if self.editor.state.notification.visible {
            layers = layers.push(self.view_notification());
        }
        layers.into()
    }

    // ------------------------------------------------------------------
    // Image area: base photo (or placeholder) with the sticker overlaid
    // ------------------------------------------------------------------
    fn view_image_area(&self) -> Element<'_, Message> {
        let base: Element<'_, Message> = match &self.editor.state.selected_image {
            Some(path) => image(image::Handle::from_path(path))
                .width(Length::Fixed(IMAGE_AREA_WIDTH))
                .height(Length::Fixed(IMAGE_AREA_HEIGHT))
                .content_fit(iced::ContentFit::Cover)
                .into(),
            None => image(self.placeholder.clone())
                .width(Length::Fixed(IMAGE_AREA_WIDTH))
                .height(Length::Fixed(IMAGE_AREA_HEIGHT))
                .content_fit(iced::ContentFit::Cover)
                .into(),
        };

        let mut area = stack![base];

        if let (Some(sticker), Some(handle)) = (&self.editor.state.sticker, &self.sticker_handle) {
            let overlay = container(
                image(handle.clone())
                    .width(Length::Fixed(sticker.size as f32))
                    .height(Length::Fixed(sticker.size as f32)),
            )
            .padding(Padding {
                top: sticker.y as f32,
                left: sticker.x as f32,
                right: 0.0,
                bottom: 0.0,
            });
            area = area.push(overlay);
        }

        container(area)
            .width(Length::Fixed(IMAGE_AREA_WIDTH))
            .height(Length::Fixed(IMAGE_AREA_HEIGHT))
            .clip(true)
            .style(|_| container::Style {
                background: Some(iced::Background::Color(colors::BG_SECONDARY)),
                border: iced::Border {
                    color: colors::BORDER,
                    width: 1.0,
                    radius: 10.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    // ------------------------------------------------------------------
    // Footer (Idle) or option row (Editing)
    // ------------------------------------------------------------------
    fn view_controls(&self) -> Element<'_, Message> {
        match self.editor.state.view_state() {
            ViewState::Idle => self.view_footer(),
            ViewState::Editing => self.view_option_row(),
        }
    }

    fn view_footer(&self) -> Element<'_, Message> {
        let choose_btn = button(
            text("Choose a photo")
                .size(14)
                .align_x(Alignment::Center)
                .width(Length::Fill),
        )
        .width(Length::Fixed(240.0))
        .padding(Padding::from([10, 16]))
        .style(|_, status| {
            let bg = match status {
                button::Status::Hovered | button::Status::Pressed => {
                    Color::from_rgb(0.45, 0.65, 1.0)
                }
                _ => colors::ACCENT,
            };
            button::Style {
                background: Some(iced::Background::Color(bg)),
                text_color: colors::BG_PRIMARY,
                border: iced::Border {
                    radius: 8.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            }
        })
        .on_press(Message::OpenImagePicker);

        let use_btn = button(
            text("Use this photo")
                .size(13)
                .align_x(Alignment::Center)
                .width(Length::Fill),
        )
        .width(Length::Fixed(240.0))
        .padding(Padding::from([8, 16]))
        .style(|_, status| {
            let bg = match status {
                button::Status::Hovered | button::Status::Pressed => colors::BG_TERTIARY,
                _ => Color::TRANSPARENT,
            };
            button::Style {
                background: Some(iced::Background::Color(bg)),
                text_color: colors::TEXT_SECONDARY,
                border: iced::Border {
                    radius: 8.0.into(),
                    color: colors::BORDER,
                    width: 1.0,
                },
                ..Default::default()
            }
        })
        .on_press(Message::UsePlaceholder);

        column![choose_btn, use_btn]
            .spacing(8)
            .align_x(Alignment::Center)
            .into()
    }

    fn view_option_row(&self) -> Element<'_, Message> {
        let reset_btn = option_button("Reset", colors::TEXT_SECONDARY, Some(Message::Reset));

        // Circular add-sticker button, the visual anchor of the row
        let add_btn = button(text("+").size(26).align_x(Alignment::Center).width(Length::Fill))
            .width(Length::Fixed(64.0))
            .height(Length::Fixed(64.0))
            .style(|_, status| {
                let bg = match status {
                    button::Status::Hovered | button::Status::Pressed => colors::BG_TERTIARY,
                    _ => colors::BG_SECONDARY,
                };
                button::Style {
                    background: Some(iced::Background::Color(bg)),
                    text_color: colors::TEXT_PRIMARY,
                    border: iced::Border {
                        radius: 32.0.into(),
                        color: colors::TEXT_PRIMARY,
                        width: 2.0,
                    },
                    ..Default::default()
                }
            })
            .on_press(Message::OpenStickerPicker);

        // Save is disabled while an export is in flight
        let saving = self.editor.state.phase == ExportPhase::Exporting;
        let save_btn = option_button(
            if saving { "Saving..." } else { "Save" },
            colors::TEXT_SECONDARY,
            (!saving).then_some(Message::SaveImage),
        );

        row![
            horizontal_space(),
            reset_btn,
            horizontal_space().width(24),
            add_btn,
            horizontal_space().width(24),
            save_btn,
            horizontal_space(),
        ]
        .align_y(Alignment::Center)
        .into()
    }

    fn view_status_line(&self) -> Element<'_, Message> {
        let status = match self.editor.state.phase {
            ExportPhase::NoSticker => "Add an emoji, then save",
            ExportPhase::StickerAdded => "Ready to save",
            ExportPhase::Exporting => "Exporting...",
            ExportPhase::ExportSucceeded => "Saved",
            ExportPhase::ExportFailed => "Save failed",
        };

        text(status).size(12).color(colors::TEXT_MUTED).into()
    }

    // ------------------------------------------------------------------
    // Emoji picker bottom sheet
    // ------------------------------------------------------------------
    fn view_sticker_sheet(&self) -> Element<'_, Message> {
        let thumbs = self.thumbnails.iter().fold(
            row![].spacing(12).align_y(Alignment::Center),
            |r, (emoji, handle)| {
                let thumb = button(
                    image(handle.clone())
                        .width(Length::Fixed(constants::sticker::THUMBNAIL_SIZE as f32))
                        .height(Length::Fixed(constants::sticker::THUMBNAIL_SIZE as f32)),
                )
                .padding(6)
                .style(|_, status| {
                    let bg = match status {
                        button::Status::Hovered | button::Status::Pressed => colors::BG_TERTIARY,
                        _ => Color::TRANSPARENT,
                    };
                    button::Style {
                        background: Some(iced::Background::Color(bg)),
                        border: iced::Border {
                            radius: 8.0.into(),
                            ..Default::default()
                        },
                        ..Default::default()
                    }
                })
                .on_press(Message::StickerChosen(*emoji));
                r.push(thumb)
            },
        );

        let header = row![
            text("Choose a sticker").size(14).color(colors::TEXT_PRIMARY),
            horizontal_space(),
            button(text("X").size(12))
                .padding(Padding::from([4, 10]))
                .style(|_, status| {
                    let (bg, text_col) = match status {
                        button::Status::Hovered | button::Status::Pressed => {
                            (colors::DANGER, Color::WHITE)
                        }
                        _ => (Color::TRANSPARENT, colors::TEXT_SECONDARY),
                    };
                    button::Style {
                        background: Some(iced::Background::Color(bg)),
                        text_color: text_col,
                        border: iced::Border {
                            radius: 6.0.into(),
                            ..Default::default()
                        },
                        ..Default::default()
                    }
                })
                .on_press(Message::CloseStickerPicker),
        ]
        .align_y(Alignment::Center);

        let sheet = container(
            column![
                header,
                vertical_space().height(8),
                scrollable(thumbs).direction(scrollable::Direction::Horizontal(
                    scrollable::Scrollbar::default(),
                )),
            ]
            .spacing(4),
        )
        .padding(16)
        .width(Length::Fill)
        .style(|_| container::Style {
            background: Some(iced::Background::Color(colors::BG_SECONDARY)),
            border: iced::Border {
                color: colors::BORDER,
                width: 1.0,
                radius: iced::border::Radius {
                    top_left: 12.0,
                    top_right: 12.0,
                    bottom_right: 0.0,
                    bottom_left: 0.0,
                },
            },
            ..Default::default()
        });

        // Sheet docked at the bottom; the transparent rest of the screen
        // dismisses on click
        opaque(
            column![
                mouse_area(vertical_space().height(Length::Fill))
                    .on_press(Message::CloseStickerPicker),
                sheet,
            ]
            .width(Length::Fill)
            .height(Length::Fill),
        )
    }

    // ------------------------------------------------------------------
    // Notification overlay
    // ------------------------------------------------------------------
    fn view_notification(&self) -> Element<'_, Message> {
        let card = container(
            column![
                text(&self.editor.state.notification.message)
                    .size(14)
                    .color(colors::TEXT_PRIMARY)
                    .align_x(Alignment::Center),
                vertical_space().height(12),
                button(
                    text("Close")
                        .size(12)
                        .align_x(Alignment::Center)
                        .width(Length::Fill)
                )
                .width(Length::Fixed(120.0))
                .padding(Padding::from([6, 12]))
                .style(|_, status| {
                    let bg = match status {
                        button::Status::Hovered | button::Status::Pressed => colors::SUCCESS,
                        _ => colors::BG_TERTIARY,
                    };
                    button::Style {
                        background: Some(iced::Background::Color(bg)),
                        text_color: colors::TEXT_PRIMARY,
                        border: iced::Border {
                            radius: 6.0.into(),
                            ..Default::default()
                        },
                        ..Default::default()
                    }
                })
                .on_press(Message::DismissNotification),
            ]
            .align_x(Alignment::Center),
        )
        .padding(20)
        .max_width(360)
        .style(|_| container::Style {
            background: Some(iced::Background::Color(colors::BG_SECONDARY)),
            border: iced::Border {
                color: colors::BORDER,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        });

        opaque(
            mouse_area(
                center(opaque(card)).style(|_| container::Style {
                    background: Some(iced::Background::Color(colors::SCRIM)),
                    ..Default::default()
                }),
            )
            .on_press(Message::DismissNotification),
        )
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::keyboard::on_key_press(|key, _modifiers| match key.as_ref() {
            iced::keyboard::Key::Named(iced::keyboard::key::Named::Escape) => {
                Some(Message::DismissOverlays)
            }
            iced::keyboard::Key::Named(iced::keyboard::key::Named::Enter) => {
                Some(Message::SaveImage)
            }
            _ => None,
        })
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Pill-style text button for the option row; `on_press == None` disables it
fn option_button(
    label: &str,
    text_color: Color,
    on_press: Option<Message>,
) -> Element<'_, Message> {
    let mut btn = button(text(label).size(13))
        .padding(Padding::from([8, 14]))
        .style(move |_, status| {
            let bg = match status {
                button::Status::Hovered | button::Status::Pressed => colors::BG_TERTIARY,
                button::Status::Disabled => Color::TRANSPARENT,
                _ => colors::BG_SECONDARY,
            };
            button::Style {
                background: Some(iced::Background::Color(bg)),
                text_color,
                border: iced::Border {
                    radius: 6.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            }
        });
    if let Some(msg) = on_press {
        btn = btn.on_press(msg);
    }
    btn.into()
}

/// Wrap an RGBA raster in an iced image handle
fn rgba_handle(raster: ::image::RgbaImage) -> image::Handle {
    let (w, h) = raster.dimensions();
    image::Handle::from_rgba(w, h, raster.into_raw())
}

// ============================================================================
// Main
// ============================================================================

fn main() -> iced::Result {
    // Initialize logger with wgpu warnings filtered out
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .filter_module("wgpu_core", log::LevelFilter::Error)
        .filter_module("naga", log::LevelFilter::Error)
        .init();
    info!("Stickershot starting...");

    iced::application(StickerApp::title, StickerApp::update, StickerApp::view)
        .subscription(StickerApp::subscription)
        .theme(StickerApp::theme)
        .window_size(Size::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .run_with(StickerApp::new)
}
