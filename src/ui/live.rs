// SPDX-License-Identifier: MPL-2.0
//! Live channel player.
//!
//! The stream is a fixed embedded source. Play, mute, quality and progress
//! are local UI state only; nothing here talks to the backend.

use crate::domain::content::{embed_url, DEMO_VIDEO_ID};
use crate::domain::live::{Progress, VideoQuality, SCHEDULE};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::icons::{self, Icon};
use crate::ui::state::AutoHide;
use crate::ui::styles;
use iced::widget::{
    button, mouse_area, responsive, scrollable, slider, text, Column, Container, Row, Space, Stack,
};
use iced::{alignment, Element, Length, Size};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct State {
    playing: bool,
    muted: bool,
    progress: Progress,
    quality: VideoQuality,
    quality_menu_open: bool,
    fullscreen: bool,
    controls: AutoHide,
}

impl Default for State {
    fn default() -> Self {
        Self {
            playing: true,
            muted: false,
            progress: Progress::default(),
            quality: VideoQuality::default(),
            quality_menu_open: false,
            fullscreen: false,
            controls: AutoHide::default(),
        }
    }
}

impl State {
    /// Shows the controls when the screen is entered.
    pub fn enter(&mut self, now: Instant) {
        self.controls.show(now);
    }

    /// Advances the controls auto-hide timer.
    pub fn tick(&mut self, now: Instant) {
        if self.controls.tick(now) {
            self.quality_menu_open = false;
        }
    }

    /// Leaves fullscreen if active. Returns `true` if it was.
    pub fn exit_fullscreen(&mut self) -> bool {
        std::mem::replace(&mut self.fullscreen, false)
    }

    /// Adopts the fullscreen state reported by the window, which the window
    /// manager may change on its own. Returns `true` if the flag changed.
    pub fn sync_fullscreen(&mut self, fullscreen: bool) -> bool {
        fullscreen != std::mem::replace(&mut self.fullscreen, fullscreen)
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    #[must_use]
    pub fn quality(&self) -> VideoQuality {
        self.quality
    }

    #[must_use]
    pub fn is_quality_menu_open(&self) -> bool {
        self.quality_menu_open
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.controls.is_visible()
    }

    /// URL of the embedded stream for the current mute setting.
    #[must_use]
    pub fn source(&self) -> String {
        embed_url(DEMO_VIDEO_ID, self.muted)
    }
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Click anywhere on the player surface.
    Tap,
    TogglePlay,
    ToggleMute,
    SkipBack,
    SkipForward,
    Seek(f32),
    ToggleQualityMenu,
    SelectQuality(VideoQuality),
    ToggleFullscreen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// Ask the window to enter (`true`) or leave fullscreen.
    SetFullscreen(bool),
}

pub fn update(state: &mut State, message: Message, now: Instant) -> Event {
    state.controls.show(now);
    match message {
        Message::Tap => {
            state.quality_menu_open = false;
        }
        Message::TogglePlay => state.playing = !state.playing,
        Message::ToggleMute => state.muted = !state.muted,
        Message::SkipBack => state.progress = state.progress.skip_back(),
        Message::SkipForward => state.progress = state.progress.skip_forward(),
        Message::Seek(value) => state.progress = Progress::new(value),
        Message::ToggleQualityMenu => state.quality_menu_open = !state.quality_menu_open,
        Message::SelectQuality(quality) => {
            state.quality = quality;
            state.quality_menu_open = false;
        }
        Message::ToggleFullscreen => {
            state.fullscreen = !state.fullscreen;
            return Event::SetFullscreen(state.fullscreen);
        }
    }
    Event::None
}

#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;
    let state = ctx.state;

    responsive(move |size: Size| {
        let player_height = if state.fullscreen {
            size.height
        } else {
            (size.width / sizing::PLAYER_ASPECT).min(size.height)
        };
        let player = Container::new(build_player(i18n, state))
            .width(Length::Fill)
            .height(Length::Fixed(player_height.max(1.0)));

        if state.fullscreen {
            return player.into();
        }

        Column::new()
            .push(player)
            .push(scrollable(build_schedule(i18n)).height(Length::Fill))
            .into()
    })
    .into()
}

fn build_player<'a>(i18n: &'a I18n, state: &'a State) -> Element<'a, Message> {
    let surface = Container::new(
        Column::new()
            .spacing(spacing::XS)
            .align_x(alignment::Horizontal::Center)
            .push(
                icons::sized(
                    if state.playing { Icon::Live } else { Icon::Pause },
                    sizing::ICON_XL,
                )
                .color(palette::WHITE),
            )
            .push(
                text(state.source())
                    .size(typography::CAPTION)
                    .color(palette::GRAY_400),
            ),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(alignment::Horizontal::Center)
    .align_y(alignment::Vertical::Center)
    .style(styles::container::video);

    let mut stack = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(mouse_area(surface).on_press(Message::Tap));

    if state.controls.is_visible() {
        stack = stack.push(build_controls(i18n, state));
    }
    if state.quality_menu_open {
        stack = stack.push(build_quality_menu(state.quality));
    }

    stack.into()
}

fn build_controls<'a>(i18n: &'a I18n, state: &'a State) -> Element<'a, Message> {
    let live_badge = Container::new(
        text(i18n.tr("live-badge"))
            .size(typography::CAPTION)
            .color(palette::WHITE),
    )
    .padding([spacing::XXS, spacing::XS])
    .style(styles::container::badge(palette::BRAND_500));

    let top = Row::new()
        .align_y(alignment::Vertical::Center)
        .push(live_badge)
        .push(Space::new().width(Length::Fill))
        .push(
            button(text(state.quality.label()).size(typography::CAPTION))
                .on_press(Message::ToggleQualityMenu)
                .style(styles::button::overlay(None)),
        );

    let center = Row::new()
        .spacing(spacing::LG)
        .align_y(alignment::Vertical::Center)
        .push(control(Icon::SkipBack, Message::SkipBack))
        .push(control(
            if state.playing { Icon::Pause } else { Icon::Play },
            Message::TogglePlay,
        ))
        .push(control(Icon::SkipForward, Message::SkipForward));

    let progress = slider(0.0..=100.0, state.progress.value(), Message::Seek)
        .step(0.5)
        .style(styles::slider::progress);

    let bottom = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(progress)
        .push(control(
            if state.muted { Icon::Muted } else { Icon::Volume },
            Message::ToggleMute,
        ))
        .push(control(
            if state.fullscreen {
                Icon::ExitFullscreen
            } else {
                Icon::Fullscreen
            },
            Message::ToggleFullscreen,
        ));

    Container::new(
        Column::new()
            .push(top)
            .push(
                Container::new(center)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(alignment::Horizontal::Center)
                    .align_y(alignment::Vertical::Center),
            )
            .push(bottom),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .padding(spacing::SM)
    .into()
}

fn build_quality_menu<'a>(selected: VideoQuality) -> Element<'a, Message> {
    let menu = Column::with_children(VideoQuality::ALL.iter().map(|quality| {
        button(text(quality.label()).size(typography::BODY_SM))
            .width(Length::Fill)
            .on_press(Message::SelectQuality(*quality))
            .style(styles::button::pill(*quality == selected))
            .into()
    }))
    .spacing(spacing::XXS)
    .width(Length::Fixed(sizing::THUMBNAIL));

    Container::new(
        Container::new(menu)
            .padding(spacing::XS)
            .style(styles::container::video_overlay),
    )
    .width(Length::Fill)
    .padding([spacing::XXL, spacing::SM])
    .align_x(alignment::Horizontal::Right)
    .into()
}

fn control<'a>(icon: Icon, message: Message) -> Element<'a, Message> {
    button(icons::sized(icon, sizing::ICON_MD))
        .on_press(message)
        .style(styles::button::overlay(None))
        .into()
}

fn build_schedule<'a>(i18n: &I18n) -> Element<'a, Message> {
    let mut column = Column::new()
        .spacing(spacing::SM)
        .padding(spacing::MD)
        .push(text(i18n.tr("live-on-air")).size(typography::TITLE_SM))
        .push(text(i18n.tr("live-up-next")).size(typography::BODY_SM));

    for entry in &SCHEDULE {
        column = column.push(
            Container::new(
                Row::new()
                    .spacing(spacing::MD)
                    .push(
                        text(entry.time)
                            .size(typography::BODY)
                            .color(palette::BRAND_500),
                    )
                    .push(text(entry.title).size(typography::BODY)),
            )
            .width(Length::Fill)
            .padding(spacing::SM)
            .style(styles::container::panel),
        );
    }

    column.into()
}
