// SPDX-License-Identifier: MPL-2.0
//! Modal layering: a dimmed backdrop that swallows input, with the modal
//! content either centered (dialogs) or docked to the bottom (sheets).

use crate::ui::styles;
use iced::widget::{mouse_area, opaque, Container, Stack};
use iced::{alignment, Element, Length};

/// Where the modal content sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Center,
    Bottom,
}

/// Draws `content` over `base`. Clicking the backdrop emits `on_blur`.
pub fn modal<'a, Message>(
    base: Element<'a, Message>,
    content: Element<'a, Message>,
    placement: Placement,
    on_blur: Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let align_y = match placement {
        Placement::Center => alignment::Vertical::Center,
        Placement::Bottom => alignment::Vertical::Bottom,
    };

    let backdrop = Container::new(opaque(content))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(align_y)
        .style(styles::container::scrim);

    Stack::new()
        .push(base)
        .push(opaque(mouse_area(backdrop).on_press(on_blur)))
        .into()
}
