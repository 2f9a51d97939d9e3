// SPDX-License-Identifier: MPL-2.0
//! Exit confirmation shown after a double back-press on the root screen.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, checkbox, text, Column, Container, Row};
use iced::{alignment, Element, Length};

#[derive(Debug, Default)]
pub struct State {
    open: bool,
    never_ask: bool,
}

impl State {
    pub fn open(&mut self) {
        self.open = true;
        self.never_ask = false;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

#[derive(Debug, Clone)]
pub enum Message {
    Exit,
    Stay,
    NeverAskToggled(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// Leave the app; `never_ask` is the "don't ask again" choice to persist.
    Exit { never_ask: bool },
    Stay,
}

pub fn update(state: &mut State, message: Message) -> Event {
    match message {
        Message::Exit => {
            state.open = false;
            Event::Exit {
                never_ask: state.never_ask,
            }
        }
        Message::Stay => {
            state.open = false;
            Event::Stay
        }
        Message::NeverAskToggled(value) => {
            state.never_ask = value;
            Event::None
        }
    }
}

#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;

    let never_ask = checkbox(ctx.state.never_ask)
        .label(i18n.tr("exit-never-ask"))
        .on_toggle(Message::NeverAskToggled)
        .text_size(typography::BODY_SM);

    let actions = Row::new()
        .spacing(spacing::SM)
        .push(
            button(text(i18n.tr("exit-stay")))
                .on_press(Message::Stay)
                .style(styles::button::secondary),
        )
        .push(
            button(text(i18n.tr("exit-confirm")))
                .on_press(Message::Exit)
                .style(styles::button::primary),
        );

    let content = Column::new()
        .spacing(spacing::MD)
        .push(text(i18n.tr("exit-title")).size(typography::TITLE_SM))
        .push(text(i18n.tr("exit-message")).size(typography::BODY))
        .push(never_ask)
        .push(
            Container::new(actions)
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Right),
        );

    Container::new(content)
        .width(Length::Fixed(sizing::DIALOG_WIDTH))
        .padding(spacing::LG)
        .style(styles::container::dialog)
        .into()
}
