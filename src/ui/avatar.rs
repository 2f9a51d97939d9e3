// SPDX-License-Identifier: MPL-2.0
//! Round avatar: the loaded picture, or the user's initial on a brand disc.

use crate::ui::design_tokens::typography;
use crate::ui::styles;
use iced::widget::{image, text, Container, Image};
use iced::{alignment, ContentFit, Element, Length};

pub fn view<'a, Message: 'a>(
    initial: String,
    picture: Option<&image::Handle>,
    size: f32,
) -> Element<'a, Message> {
    if let Some(handle) = picture {
        return Image::new(handle.clone())
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .content_fit(ContentFit::Cover)
            .into();
    }

    let font_size = (size * 0.45).max(typography::CAPTION);
    Container::new(text(initial).size(font_size))
        .width(Length::Fixed(size))
        .height(Length::Fixed(size))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::avatar)
        .into()
}
