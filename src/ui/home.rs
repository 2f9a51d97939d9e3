// SPDX-License-Identifier: MPL-2.0
//! Home screen: "Top Stories" news list and the "Shorts" feed.
//!
//! The feed state lives with the application (it is reloaded on sign-in and
//! after a cache clear); this screen only forwards its messages.

use crate::domain::content::{filter_articles, Article};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, radius, sizing, spacing, typography};
use crate::ui::icons::{self, Icon};
use crate::ui::shorts;
use crate::ui::styles;
use crate::ui::ImageCache;
use iced::widget::{button, scrollable, text, text_input, Column, Container, Row, Space};
use iced::{alignment, Element, Length, Theme};

/// Home tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    TopStories,
    Shorts,
}

#[derive(Debug, Default)]
pub struct State {
    tab: Tab,
    search_open: bool,
    query: String,
}

impl State {
    #[must_use]
    pub fn tab(&self) -> Tab {
        self.tab
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn is_search_open(&self) -> bool {
        self.search_open
    }

    /// Whether the bottom navigation should be shown.
    #[must_use]
    pub fn shows_navigation(&self) -> bool {
        self.tab != Tab::Shorts
    }

    /// Articles matching the current query.
    #[must_use]
    pub fn articles(&self) -> Vec<&'static Article> {
        filter_articles(self.query.trim())
    }
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
    pub feed: &'a shorts::State,
    pub signed_in: bool,
    pub images: &'a ImageCache,
}

#[derive(Debug, Clone)]
pub enum Message {
    SelectTab(Tab),
    ToggleSearch,
    QueryChanged(String),
    ClearQuery,
    OpenSettings,
    Feed(shorts::Message),
}

#[derive(Debug, Clone)]
pub enum Event {
    None,
    OpenSettings,
    /// A message for the shorts feed, handled by the application.
    Feed(shorts::Message),
}

pub fn update(state: &mut State, message: Message) -> Event {
    match message {
        Message::SelectTab(tab) => {
            state.tab = tab;
            Event::None
        }
        Message::ToggleSearch => {
            state.search_open = !state.search_open;
            if !state.search_open {
                state.query.clear();
            }
            Event::None
        }
        Message::QueryChanged(query) => {
            state.query = query;
            Event::None
        }
        Message::ClearQuery => {
            state.query.clear();
            Event::None
        }
        Message::OpenSettings => Event::OpenSettings,
        Message::Feed(message) => Event::Feed(message),
    }
}

#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let body: Element<'_, Message> = match ctx.state.tab {
        Tab::TopStories => build_stories(ctx.i18n, ctx.state),
        Tab::Shorts => shorts::view(shorts::ViewContext {
            i18n: ctx.i18n,
            state: ctx.feed,
            signed_in: ctx.signed_in,
            images: ctx.images,
        })
        .map(Message::Feed),
    };

    Column::new()
        .push(build_header(ctx.i18n, ctx.state))
        .push(Container::new(body).width(Length::Fill).height(Length::Fill))
        .into()
}

fn build_header<'a>(i18n: &I18n, state: &'a State) -> Element<'a, Message> {
    let title = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(text(i18n.tr("app-name")).size(typography::TITLE_MD))
        .push(Space::new().width(Length::Fill))
        .push(
            button(icons::sized(Icon::Search, sizing::ICON_MD))
                .on_press(Message::ToggleSearch)
                .style(styles::button::ghost),
        )
        .push(
            button(icons::sized(Icon::Settings, sizing::ICON_MD))
                .on_press(Message::OpenSettings)
                .style(styles::button::ghost),
        );

    let tabs = Row::new()
        .spacing(spacing::XS)
        .push(tab_button(i18n.tr("home-tab-top-stories"), Tab::TopStories, state.tab))
        .push(tab_button(i18n.tr("home-tab-shorts"), Tab::Shorts, state.tab));

    let mut header = Column::new().spacing(spacing::SM).push(title).push(tabs);

    if state.search_open && state.tab == Tab::TopStories {
        let mut search = Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center)
            .push(
                text_input(&i18n.tr("home-search-placeholder"), &state.query)
                    .on_input(Message::QueryChanged)
                    .padding(spacing::SM)
                    .size(typography::BODY),
            );
        if !state.query.is_empty() {
            search = search.push(
                button(icons::sized(Icon::Close, sizing::ICON_SM))
                    .on_press(Message::ClearQuery)
                    .style(styles::button::ghost),
            );
        }
        header = header.push(search);
    }

    Container::new(header)
        .width(Length::Fill)
        .padding([spacing::SM, spacing::MD])
        .into()
}

fn tab_button<'a>(label: String, tab: Tab, active: Tab) -> Element<'a, Message> {
    button(text(label).size(typography::BODY))
        .padding([spacing::XS, spacing::MD])
        .on_press(Message::SelectTab(tab))
        .style(styles::button::pill(tab == active))
        .into()
}

fn build_stories<'a>(i18n: &I18n, state: &State) -> Element<'a, Message> {
    let articles = state.articles();
    if articles.is_empty() {
        return Container::new(text(i18n.tr("home-no-results")).size(typography::BODY))
            .width(Length::Fill)
            .padding(spacing::XL)
            .align_x(alignment::Horizontal::Center)
            .into();
    }

    let list = Column::with_children(articles.into_iter().map(|article| {
        if article.featured {
            build_featured(article)
        } else {
            build_row(article)
        }
    }))
    .spacing(spacing::MD)
    .padding(spacing::MD);

    scrollable(list).height(Length::Fill).into()
}

fn build_featured<'a>(article: &'static Article) -> Element<'a, Message> {
    let badge = Container::new(
        text(article.category)
            .size(typography::CAPTION)
            .color(palette::WHITE),
    )
    .padding([spacing::XXS, spacing::XS])
    .style(styles::container::badge(palette::BRAND_500));

    let content = Column::new()
        .spacing(spacing::XS)
        .push(badge)
        .push(Space::new().height(Length::Fill))
        .push(
            text(article.title)
                .size(typography::TITLE_SM)
                .color(palette::WHITE),
        )
        .push(
            text(article.time)
                .size(typography::CAPTION)
                .color(palette::GRAY_200),
        );

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::FEATURED_CARD_HEIGHT))
        .padding(spacing::MD)
        .style(styles::container::video_overlay)
        .into()
}

fn build_row<'a>(article: &'static Article) -> Element<'a, Message> {
    let thumbnail = Container::new(Space::new())
        .width(Length::Fixed(sizing::THUMBNAIL))
        .height(Length::Fixed(sizing::THUMBNAIL))
        .style(|theme: &Theme| {
            let mut style = styles::container::panel(theme);
            style.border.radius = radius::MD.into();
            style
        });

    Row::new()
        .spacing(spacing::SM)
        .push(thumbnail)
        .push(
            Column::new()
                .spacing(spacing::XXS)
                .push(
                    text(article.category)
                        .size(typography::CAPTION)
                        .color(palette::BRAND_500),
                )
                .push(text(article.title).size(typography::BODY))
                .push(text(article.time).size(typography::CAPTION)),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorts_tab_hides_navigation() {
        let mut state = State::default();
        assert!(state.shows_navigation());
        update(&mut state, Message::SelectTab(Tab::Shorts));
        assert!(!state.shows_navigation());
    }

    #[test]
    fn query_filters_articles() {
        let mut state = State::default();
        assert_eq!(state.articles().len(), 4);

        update(&mut state, Message::ToggleSearch);
        update(&mut state, Message::QueryChanged("SPORTS".into()));
        assert_eq!(state.articles().len(), 1);

        update(&mut state, Message::ClearQuery);
        assert_eq!(state.articles().len(), 4);
    }

    #[test]
    fn closing_search_clears_query() {
        let mut state = State::default();
        update(&mut state, Message::ToggleSearch);
        update(&mut state, Message::QueryChanged("markets".into()));
        update(&mut state, Message::ToggleSearch);
        assert!(!state.is_search_open());
        assert!(state.query().is_empty());
    }

    #[test]
    fn feed_messages_are_forwarded() {
        let mut state = State::default();
        let event = update(
            &mut state,
            Message::Feed(shorts::Message::Share("s1".into())),
        );
        assert!(matches!(event, Event::Feed(shorts::Message::Share(id)) if id == "s1"));
    }

    #[test]
    fn home_renders_both_tabs() {
        let i18n = I18n::default();
        let feed = shorts::State::new();
        let images = ImageCache::new();
        let mut state = State::default();
        for tab in [Tab::TopStories, Tab::Shorts] {
            state.tab = tab;
            let _element = view(ViewContext {
                i18n: &i18n,
                state: &state,
                feed: &feed,
                signed_in: false,
                images: &images,
            });
        }
    }
}
