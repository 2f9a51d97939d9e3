// SPDX-License-Identifier: MPL-2.0
//! Comment panel for one short.

use crate::domain::content::{is_demo_id, CommentView};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::icons::{self, Icon};
use crate::ui::styles;
use crate::ui::{avatar, ImageCache};
use iced::widget::{button, scrollable, text, text_input, Column, Container, Row, Space};
use iced::{alignment, Element, Length, Theme};

#[derive(Debug, Default)]
pub struct State {
    short_id: Option<String>,
    items: Vec<CommentView>,
    loading: bool,
    draft: String,
    posting: bool,
}

impl State {
    /// Opens the panel. Returns `true` when comments must be fetched.
    pub fn open(&mut self, short_id: &str) -> bool {
        self.short_id = Some(short_id.to_string());
        self.items.clear();
        self.draft.clear();
        self.posting = false;
        self.loading = !is_demo_id(short_id);
        self.loading
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn short_id(&self) -> Option<&str> {
        self.short_id.as_deref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.short_id.is_some()
    }

    #[must_use]
    pub fn items(&self) -> &[CommentView] {
        &self.items
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub fn is_posting(&self) -> bool {
        self.posting
    }

    /// Installs fetched comments if the panel still shows `short_id`.
    pub fn loaded(&mut self, short_id: &str, items: Vec<CommentView>) -> bool {
        if self.short_id() != Some(short_id) {
            return false;
        }
        self.items = items;
        self.loading = false;
        true
    }

    /// The fetch failed; the list stays empty.
    pub fn load_failed(&mut self, short_id: &str) {
        if self.short_id() == Some(short_id) {
            self.loading = false;
        }
    }

    /// Appends the viewer's new comment and clears the draft.
    pub fn posted(&mut self, short_id: &str, comment: CommentView) -> bool {
        if self.short_id() != Some(short_id) {
            return false;
        }
        self.items.push(comment);
        self.draft.clear();
        self.posting = false;
        true
    }

    /// The insert failed; the draft is kept for another try.
    pub fn post_failed(&mut self) {
        self.posting = false;
    }
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
    pub signed_in: bool,
    pub images: &'a ImageCache,
}

#[derive(Debug, Clone)]
pub enum Message {
    Close,
    DraftChanged(String),
    Submit,
    SignIn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    Closed,
    /// Post `content` (already trimmed) under `short_id`.
    Post { short_id: String, content: String },
    SignInRequired,
}

pub fn update(state: &mut State, message: Message, signed_in: bool) -> Event {
    match message {
        Message::Close => {
            state.close();
            Event::Closed
        }
        Message::DraftChanged(draft) => {
            state.draft = draft;
            Event::None
        }
        Message::SignIn => Event::SignInRequired,
        Message::Submit => {
            if !signed_in {
                return Event::SignInRequired;
            }
            let content = state.draft.trim();
            if content.is_empty() || state.posting {
                return Event::None;
            }
            let Some(short_id) = state.short_id.clone() else {
                return Event::None;
            };
            let content = content.to_string();
            state.posting = true;
            Event::Post { short_id, content }
        }
    }
}

#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;
    let state = ctx.state;

    let header = Row::new()
        .align_y(alignment::Vertical::Center)
        .push(text(i18n.tr("comments-title")).size(typography::TITLE_SM))
        .push(Space::new().width(Length::Fill))
        .push(
            button(icons::sized(Icon::Close, sizing::ICON_SM))
                .on_press(Message::Close)
                .style(styles::button::ghost),
        );

    let body: Element<'_, Message> = if state.loading {
        centered_note(i18n.tr("comments-loading"))
    } else if state.items.is_empty() {
        centered_note(i18n.tr("comments-empty"))
    } else {
        let list = Column::with_children(
            state
                .items
                .iter()
                .map(|item| build_comment(item, ctx.images)),
        )
        .spacing(spacing::MD);
        scrollable(list).height(Length::Fill).into()
    };

    let footer: Element<'_, Message> = if ctx.signed_in {
        let input = text_input(&i18n.tr("comments-placeholder"), &state.draft)
            .on_input(Message::DraftChanged)
            .on_submit(Message::Submit)
            .padding(spacing::SM)
            .size(typography::BODY);
        let can_send = !state.posting && !state.draft.trim().is_empty();
        Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center)
            .push(input)
            .push(
                button(icons::sized(Icon::Send, sizing::ICON_SM))
                    .on_press_maybe(can_send.then_some(Message::Submit))
                    .style(styles::button::primary),
            )
            .into()
    } else {
        button(
            Container::new(text(i18n.tr("comments-sign-in")))
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Center),
        )
        .width(Length::Fill)
        .padding(spacing::SM)
        .on_press(Message::SignIn)
        .style(styles::button::primary)
        .into()
    };

    Container::new(
        Column::new()
            .spacing(spacing::MD)
            .push(header)
            .push(Container::new(body).height(Length::Fill))
            .push(footer),
    )
    .width(Length::Fill)
    .max_width(sizing::SHEET_MAX_WIDTH)
    .height(Length::Fixed(sizing::COMMENTS_PANEL_HEIGHT))
    .padding(spacing::MD)
    .style(styles::container::sheet)
    .into()
}

fn build_comment<'a>(item: &'a CommentView, images: &'a ImageCache) -> Element<'a, Message> {
    let initial = item
        .username
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default();
    let picture = item.avatar_url.as_deref().and_then(|url| images.get(url));

    Row::new()
        .spacing(spacing::SM)
        .push(avatar::view(initial, picture, sizing::AVATAR_SM))
        .push(
            Column::new()
                .spacing(spacing::XXS)
                .push(text(&item.username).size(typography::CAPTION).style(muted))
                .push(text(&item.comment.content).size(typography::BODY)),
        )
        .into()
}

fn centered_note<'a>(note: String) -> Element<'a, Message> {
    Container::new(text(note).size(typography::BODY).style(muted))
        .width(Length::Fill)
        .padding(spacing::XL)
        .align_x(alignment::Horizontal::Center)
        .into()
}

fn muted(theme: &Theme) -> text::Style {
    text::Style {
        color: Some(theme.extended_palette().background.strong.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::ShortComment;

    fn comment(short_id: &str, content: &str) -> CommentView {
        CommentView {
            comment: ShortComment {
                id: "c1".into(),
                short_id: short_id.into(),
                user_id: "u1".into(),
                content: content.into(),
                created_at: None,
            },
            username: "jane".into(),
            avatar_url: None,
        }
    }

    #[test]
    fn demo_items_open_without_fetching() {
        let mut state = State::default();
        assert!(!state.open("demo-1"));
        assert!(state.items().is_empty());
        assert!(state.open("s1"));
    }

    #[test]
    fn submit_trims_and_requires_content() {
        let mut state = State::default();
        state.open("s1");
        update(&mut state, Message::DraftChanged("   ".into()), true);
        assert_eq!(update(&mut state, Message::Submit, true), Event::None);

        update(&mut state, Message::DraftChanged("  nice  ".into()), true);
        assert_eq!(
            update(&mut state, Message::Submit, true),
            Event::Post {
                short_id: "s1".into(),
                content: "nice".into()
            }
        );
        assert!(state.is_posting());
    }

    #[test]
    fn signed_out_submit_asks_for_sign_in() {
        let mut state = State::default();
        state.open("s1");
        update(&mut state, Message::DraftChanged("hello".into()), false);
        assert_eq!(
            update(&mut state, Message::Submit, false),
            Event::SignInRequired
        );
        assert!(!state.is_posting());
    }

    #[test]
    fn late_results_for_another_short_are_dropped() {
        let mut state = State::default();
        state.open("s1");
        state.open("s2");
        assert!(!state.loaded("s1", vec![comment("s1", "old")]));
        assert!(state.items().is_empty());
        assert!(state.loaded("s2", vec![comment("s2", "new")]));
        assert_eq!(state.items().len(), 1);
    }

    #[test]
    fn posted_comment_is_appended_and_draft_cleared() {
        let mut state = State::default();
        state.open("s1");
        state.loaded("s1", vec![comment("s1", "first")]);
        update(&mut state, Message::DraftChanged("second".into()), true);
        update(&mut state, Message::Submit, true);

        assert!(state.posted("s1", comment("s1", "second")));
        assert_eq!(state.items().len(), 2);
        assert_eq!(state.items()[1].comment.content, "second");
        assert!(state.draft().is_empty());
        assert!(!state.is_posting());
    }

    #[test]
    fn failed_post_keeps_draft() {
        let mut state = State::default();
        state.open("s1");
        update(&mut state, Message::DraftChanged("retry me".into()), true);
        update(&mut state, Message::Submit, true);
        state.post_failed();

        assert_eq!(state.draft(), "retry me");
        assert!(!state.is_posting());
    }
}
