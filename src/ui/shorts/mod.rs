// SPDX-License-Identifier: MPL-2.0
//! Short-video feed: vertical full-height cards with like, comment,
//! bookmark and share actions.
//!
//! The feed owns a [`ReactionCache`] that is updated optimistically. Backend
//! writes are requested through [`Event`]s; if one fails the app calls
//! [`State::revert`]. Responses are tagged with the feed generation so a
//! reload makes older responses harmless.

pub mod comments;
mod view;

pub use view::view;

use crate::application::feed::{FeedSnapshot, Memberships, Reaction};
use crate::domain::content::{CommentView, Short};
use crate::i18n::fluent::I18n;
use crate::ui::auth_gate::{gate, Gated};
use crate::ui::image_cache::ImageCache;
use crate::ui::state::{ReactionCache, Toggle};

/// Scrollable id of the feed.
pub const SCROLLABLE_ID: &str = "shorts-feed";

/// Index of the card filling the viewport for a vertical scroll offset.
///
/// Zero when the viewport has no height; never past the last card.
#[must_use]
pub fn active_index(offset: f32, viewport_height: f32, len: usize) -> usize {
    if viewport_height <= 0.0 || len == 0 || !offset.is_finite() {
        return 0;
    }
    let index = (offset / viewport_height).round().max(0.0);
    // Saturating float-to-int cast; clamped right after.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = index as usize;
    index.min(len - 1)
}

#[derive(Debug, Default)]
pub struct State {
    shorts: Vec<Short>,
    reactions: ReactionCache,
    generation: u64,
    loading: bool,
    active: usize,
    comments: comments::State,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a reload and returns the generation its responses must carry.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Installs a loaded feed unless a newer load has started since.
    pub fn loaded(&mut self, generation: u64, snapshot: FeedSnapshot) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "dropping stale feed");
            return false;
        }
        self.reactions = ReactionCache::from_snapshot(&snapshot);
        self.shorts = snapshot.shorts;
        self.loading = false;
        self.active = 0;
        self.comments.close();
        true
    }

    /// Installs the viewer's memberships if they belong to this feed and to
    /// the user still signed in.
    pub fn memberships_loaded(
        &mut self,
        generation: u64,
        for_user: &str,
        current_user: Option<&str>,
        memberships: Memberships,
    ) -> bool {
        if generation != self.generation || current_user != Some(for_user) {
            tracing::debug!(generation, "dropping stale memberships");
            return false;
        }
        self.reactions.set_memberships(memberships);
        true
    }

    /// Forgets the viewer's likes and bookmarks (sign-out).
    pub fn clear_memberships(&mut self) {
        self.reactions.clear_memberships();
    }

    /// Undoes a toggle whose backend write failed, unless the feed was
    /// reloaded or the viewer changed since the write was requested.
    pub fn revert(
        &mut self,
        generation: u64,
        for_user: &str,
        current_user: Option<&str>,
        toggle: &Toggle,
    ) -> bool {
        if generation != self.generation || current_user != Some(for_user) {
            tracing::debug!(generation, short = %toggle.short_id, "dropping stale reaction failure");
            return false;
        }
        self.reactions.revert(toggle)
    }

    /// Counts and, when its panel is open, shows a newly posted comment.
    pub fn comment_posted(&mut self, short_id: &str, comment: CommentView) {
        self.reactions.add_comment(short_id);
        self.comments.posted(short_id, comment);
    }

    #[must_use]
    pub fn shorts(&self) -> &[Short] {
        &self.shorts
    }

    #[must_use]
    pub fn reactions(&self) -> &ReactionCache {
        &self.reactions
    }

    #[must_use]
    pub fn active(&self) -> usize {
        self.active
    }

    #[must_use]
    pub fn comments(&self) -> &comments::State {
        &self.comments
    }

    pub fn comments_mut(&mut self) -> &mut comments::State {
        &mut self.comments
    }

    fn find(&self, short_id: &str) -> Option<&Short> {
        self.shorts.iter().find(|s| s.id == short_id)
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
    /// Vertical scroll offset and viewport height of the feed.
    Scrolled { offset: f32, height: f32 },
    ToggleLike(String),
    ToggleBookmark(String),
    OpenComments(String),
    Share(String),
    Comments(comments::Message),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// A gated action was attempted while signed out.
    SignInRequired,
    /// Persist an optimistic toggle; revert it if the write fails.
    WriteReaction {
        generation: u64,
        toggle: Toggle,
        user_id: String,
    },
    LoadComments(String),
    PostComment {
        short_id: String,
        user_id: String,
        content: String,
    },
    /// Put this text on the clipboard.
    Share(String),
}

/// Handles a feed message. `user_id` is the signed-in user, if any.
pub fn update(state: &mut State, message: Message, user_id: Option<&str>) -> Event {
    match message {
        Message::Scrolled { offset, height } => {
            state.active = active_index(offset, height, state.shorts.len());
            Event::None
        }
        Message::ToggleLike(short_id) => toggle(state, Reaction::Like, &short_id, user_id),
        Message::ToggleBookmark(short_id) => {
            toggle(state, Reaction::Bookmark, &short_id, user_id)
        }
        Message::OpenComments(short_id) => {
            if state.comments.open(&short_id) {
                Event::LoadComments(short_id)
            } else {
                Event::None
            }
        }
        Message::Share(short_id) => match state.find(&short_id) {
            Some(short) => Event::Share(share_text(short)),
            None => Event::None,
        },
        Message::Comments(message) => {
            match comments::update(&mut state.comments, message, user_id.is_some()) {
                comments::Event::None | comments::Event::Closed => Event::None,
                comments::Event::SignInRequired => Event::SignInRequired,
                comments::Event::Post { short_id, content } => match user_id {
                    Some(user_id) => Event::PostComment {
                        short_id,
                        user_id: user_id.to_string(),
                        content,
                    },
                    None => Event::SignInRequired,
                },
            }
        }
    }
}

fn toggle(state: &mut State, reaction: Reaction, short_id: &str, user_id: Option<&str>) -> Event {
    let demo = match state.find(short_id) {
        Some(short) => short.is_demo(),
        None => return Event::None,
    };
    let generation = state.generation;
    let outcome = gate(user_id, |user_id| {
        let toggle = state.reactions.toggle(reaction, short_id);
        if demo {
            Event::None
        } else {
            Event::WriteReaction {
                generation,
                toggle,
                user_id: user_id.to_string(),
            }
        }
    });
    match outcome {
        Gated::Ran(event) => event,
        Gated::SignInRequired => Event::SignInRequired,
    }
}

/// Clipboard text for sharing a short.
#[must_use]
pub fn share_text(short: &Short) -> String {
    format!("{} \u{2014} {}", short.title, short.video_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::DEMO_SHORT_ID;

    fn short(id: &str) -> Short {
        Short {
            id: id.into(),
            title: format!("Title {id}"),
            audio_name: None,
            channel_name: "TV3 News".into(),
            channel_logo_url: None,
            video_url: format!("https://cdn.tv3.example/{id}.mp4"),
            created_at: None,
        }
    }

    fn loaded(shorts: Vec<Short>) -> State {
        let mut state = State::new();
        let generation = state.begin_load();
        let mut snapshot = FeedSnapshot {
            shorts,
            ..FeedSnapshot::default()
        };
        snapshot.like_counts.insert("s1".into(), 3);
        assert!(state.loaded(generation, snapshot));
        state
    }

    #[test]
    fn active_index_rounds_and_clamps() {
        assert_eq!(active_index(0.0, 800.0, 3), 0);
        assert_eq!(active_index(390.0, 800.0, 3), 0);
        assert_eq!(active_index(410.0, 800.0, 3), 1);
        assert_eq!(active_index(5000.0, 800.0, 3), 2);
        assert_eq!(active_index(400.0, 0.0, 3), 0);
        assert_eq!(active_index(400.0, 800.0, 0), 0);
    }

    #[test]
    fn scrolling_tracks_active_card() {
        let mut state = loaded(vec![short("s1"), short("s2")]);
        update(
            &mut state,
            Message::Scrolled {
                offset: 700.0,
                height: 720.0,
            },
            None,
        );
        assert_eq!(state.active(), 1);
    }

    #[test]
    fn like_requires_sign_in() {
        let mut state = loaded(vec![short("s1")]);
        let event = update(&mut state, Message::ToggleLike("s1".into()), None);
        assert_eq!(event, Event::SignInRequired);
        assert!(!state.reactions().is_on(Reaction::Like, "s1"));
        assert_eq!(state.reactions().like_count("s1"), 3);
    }

    #[test]
    fn like_applies_optimistically_and_requests_write() {
        let mut state = loaded(vec![short("s1")]);
        let event = update(&mut state, Message::ToggleLike("s1".into()), Some("u1"));

        assert_eq!(state.reactions().like_count("s1"), 4);
        match event {
            Event::WriteReaction {
                generation,
                toggle,
                user_id,
            } => {
                assert_eq!(user_id, "u1");
                assert_eq!(generation, state.generation());
                assert!(toggle.on);
                assert!(state.revert(generation, "u1", Some("u1"), &toggle));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(state.reactions().like_count("s1"), 3);
    }

    #[test]
    fn reaction_failures_from_an_older_feed_or_viewer_are_dropped() {
        let mut state = loaded(vec![short("s1")]);
        let Event::WriteReaction {
            generation, toggle, ..
        } = update(&mut state, Message::ToggleLike("s1".into()), Some("u1"))
        else {
            panic!("expected a write");
        };

        assert!(!state.revert(generation, "u1", None, &toggle));
        assert!(!state.revert(generation, "u1", Some("u2"), &toggle));
        assert!(!state.revert(generation + 1, "u1", Some("u1"), &toggle));
        assert!(state.reactions().is_on(Reaction::Like, "s1"));
        assert_eq!(state.reactions().like_count("s1"), 4);
    }

    #[test]
    fn demo_toggles_stay_local() {
        let mut state = loaded(vec![Short::demo()]);
        let event = update(
            &mut state,
            Message::ToggleBookmark(DEMO_SHORT_ID.into()),
            Some("u1"),
        );
        assert_eq!(event, Event::None);
        assert!(state.reactions().is_on(Reaction::Bookmark, DEMO_SHORT_ID));
    }

    #[test]
    fn stale_feed_is_dropped() {
        let mut state = State::new();
        let old = state.begin_load();
        let new = state.begin_load();
        assert!(!state.loaded(old, FeedSnapshot::demo()));
        assert!(state.is_loading());
        assert!(state.loaded(new, FeedSnapshot::demo()));
        assert_eq!(state.shorts().len(), 1);
    }

    #[test]
    fn memberships_for_another_user_are_dropped() {
        let mut state = loaded(vec![short("s1")]);
        let generation = state.generation();
        let memberships = Memberships {
            liked: ["s1".to_string()].into(),
            bookmarked: Default::default(),
        };
        assert!(!state.memberships_loaded(generation, "u1", Some("u2"), memberships.clone()));
        assert!(!state.memberships_loaded(generation, "u1", None, memberships.clone()));
        assert!(state.memberships_loaded(generation, "u1", Some("u1"), memberships));
        assert!(state.reactions().is_on(Reaction::Like, "s1"));
    }

    #[test]
    fn opening_comments_fetches_only_real_items() {
        let mut state = loaded(vec![short("s1"), Short::demo()]);
        assert_eq!(
            update(&mut state, Message::OpenComments("s1".into()), None),
            Event::LoadComments("s1".into())
        );
        assert_eq!(
            update(&mut state, Message::OpenComments(DEMO_SHORT_ID.into()), None),
            Event::None
        );
        assert!(state.comments().is_open());
    }

    #[test]
    fn share_copies_title_and_link() {
        let mut state = loaded(vec![short("s1")]);
        assert_eq!(
            update(&mut state, Message::Share("s1".into()), None),
            Event::Share("Title s1 \u{2014} https://cdn.tv3.example/s1.mp4".into())
        );
    }

    #[test]
    fn posted_comment_increments_counter() {
        let mut state = loaded(vec![short("s1")]);
        update(&mut state, Message::OpenComments("s1".into()), Some("u1"));
        state.comments_mut().loaded("s1", Vec::new());
        update(
            &mut state,
            Message::Comments(comments::Message::DraftChanged("hi".into())),
            Some("u1"),
        );
        let event = update(
            &mut state,
            Message::Comments(comments::Message::Submit),
            Some("u1"),
        );
        assert_eq!(
            event,
            Event::PostComment {
                short_id: "s1".into(),
                user_id: "u1".into(),
                content: "hi".into()
            }
        );
        assert_eq!(state.reactions().comment_count("s1"), 0);
    }
}
