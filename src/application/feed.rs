// SPDX-License-Identifier: MPL-2.0
//! Shorts feed use cases: loading the feed and its counts, the viewer's
//! like/bookmark memberships, reaction writes, and comments.
//!
//! Loads degrade instead of failing: a failed count reads as zero and an
//! empty or unreachable feed is replaced by the local demo item.

use crate::application::port::{Order, Query, SharedBackend};
use crate::application::session::fetch_profile;
use crate::domain::content::{tables, CommentView, Profile, Short, ShortComment};
use crate::domain::error::BackendError;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};

/// Username shown for a comment whose author has no profile.
pub const UNKNOWN_AUTHOR: &str = "User";

/// Username shown for the viewer's own comment when their profile is missing.
pub const SELF_AUTHOR: &str = "You";

/// Which reaction table a toggle writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reaction {
    Like,
    Bookmark,
}

impl Reaction {
    #[must_use]
    pub fn table(self) -> &'static str {
        match self {
            Reaction::Like => tables::SHORT_LIKES,
            Reaction::Bookmark => tables::SHORT_BOOKMARKS,
        }
    }
}

/// Feed items with their like and comment counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSnapshot {
    pub shorts: Vec<Short>,
    pub like_counts: HashMap<String, u64>,
    pub comment_counts: HashMap<String, u64>,
}

impl FeedSnapshot {
    /// The single-item offline feed.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            shorts: vec![Short::demo()],
            ..Self::default()
        }
    }
}

/// Short ids the viewer has liked and bookmarked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memberships {
    pub liked: HashSet<String>,
    pub bookmarked: HashSet<String>,
}

fn decode_rows<T: DeserializeOwned>(table: &str, rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::warn!(%table, "skipping malformed row: {err}");
                None
            }
        })
        .collect()
}

fn count_or_zero(table: &str, result: Result<u64, BackendError>) -> u64 {
    result.unwrap_or_else(|err| {
        tracing::warn!(%table, "count failed: {err}");
        0
    })
}

/// Loads shorts newest first, then counts likes and comments one short at a
/// time.
pub async fn load_feed(backend: SharedBackend) -> FeedSnapshot {
    let rows = match backend
        .select(
            tables::SHORTS,
            Query::new().order("created_at", Order::Desc),
        )
        .await
    {
        Ok(rows) => rows,
        Err(err) => {
            tracing::warn!("feed load failed, showing demo item: {err}");
            return FeedSnapshot::demo();
        }
    };

    let shorts: Vec<Short> = decode_rows(tables::SHORTS, rows);
    if shorts.is_empty() {
        return FeedSnapshot::demo();
    }

    let mut like_counts = HashMap::with_capacity(shorts.len());
    let mut comment_counts = HashMap::with_capacity(shorts.len());
    for short in &shorts {
        let likes = backend
            .count(tables::SHORT_LIKES, Query::new().eq("short_id", &short.id))
            .await;
        like_counts.insert(short.id.clone(), count_or_zero(tables::SHORT_LIKES, likes));

        let comments = backend
            .count(
                tables::SHORT_COMMENTS,
                Query::new().eq("short_id", &short.id),
            )
            .await;
        comment_counts.insert(
            short.id.clone(),
            count_or_zero(tables::SHORT_COMMENTS, comments),
        );
    }

    tracing::debug!(count = shorts.len(), "feed loaded");
    FeedSnapshot {
        shorts,
        like_counts,
        comment_counts,
    }
}

/// Loads the viewer's like and bookmark sets. Failures yield empty sets.
pub async fn load_memberships(backend: SharedBackend, user_id: String) -> Memberships {
    let mut memberships = Memberships::default();
    for reaction in [Reaction::Like, Reaction::Bookmark] {
        let query = Query::new().select("short_id").eq("user_id", &user_id);
        let ids: HashSet<String> = match backend.select(reaction.table(), query).await {
            Ok(rows) => rows
                .iter()
                .filter_map(|row| row.get("short_id").and_then(Value::as_str))
                .map(str::to_string)
                .collect(),
            Err(err) => {
                tracing::warn!(table = reaction.table(), "membership load failed: {err}");
                HashSet::new()
            }
        };
        match reaction {
            Reaction::Like => memberships.liked = ids,
            Reaction::Bookmark => memberships.bookmarked = ids,
        }
    }
    memberships
}

/// Adds (`on`) or removes the viewer's reaction row for a short.
///
/// # Errors
///
/// Returns the backend error so the caller can revert its optimistic state.
pub async fn set_reaction(
    backend: SharedBackend,
    reaction: Reaction,
    short_id: String,
    user_id: String,
    on: bool,
) -> Result<(), BackendError> {
    if on {
        backend
            .insert(
                reaction.table(),
                json!({ "short_id": short_id, "user_id": user_id }),
            )
            .await
            .map(|_| ())
    } else {
        backend
            .delete(
                reaction.table(),
                Query::new().eq("short_id", short_id).eq("user_id", user_id),
            )
            .await
    }
}

/// Loads a short's comments oldest first, joined with their authors'
/// profiles in one batched lookup.
///
/// # Errors
///
/// Fails only when the comments themselves cannot be read; a failed profile
/// lookup falls back to [`UNKNOWN_AUTHOR`].
pub async fn load_comments(
    backend: SharedBackend,
    short_id: String,
) -> Result<Vec<CommentView>, BackendError> {
    let rows = backend
        .select(
            tables::SHORT_COMMENTS,
            Query::new()
                .eq("short_id", short_id)
                .order("created_at", Order::Asc),
        )
        .await?;
    let comments: Vec<ShortComment> = decode_rows(tables::SHORT_COMMENTS, rows);
    if comments.is_empty() {
        return Ok(Vec::new());
    }

    let mut author_ids: Vec<&str> = Vec::new();
    for comment in &comments {
        if !author_ids.contains(&comment.user_id.as_str()) {
            author_ids.push(&comment.user_id);
        }
    }

    let profiles: HashMap<String, Profile> = match backend
        .select(
            tables::PROFILES,
            Query::new()
                .select("user_id,username,avatar_url")
                .is_in("user_id", author_ids),
        )
        .await
    {
        Ok(rows) => decode_rows::<Profile>(tables::PROFILES, rows)
            .into_iter()
            .map(|profile| (profile.user_id.clone(), profile))
            .collect(),
        Err(err) => {
            tracing::warn!("comment author lookup failed: {err}");
            HashMap::new()
        }
    };

    Ok(comments
        .into_iter()
        .map(|comment| {
            let author = profiles.get(&comment.user_id);
            CommentView {
                username: author
                    .map_or_else(|| UNKNOWN_AUTHOR.to_string(), |p| p.username.clone()),
                avatar_url: author.and_then(|p| p.avatar_url.clone()),
                comment,
            }
        })
        .collect())
}

/// Posts a comment and returns it ready for display.
///
/// # Errors
///
/// Returns the backend error when the insert fails.
pub async fn post_comment(
    backend: SharedBackend,
    short_id: String,
    user_id: String,
    content: String,
) -> Result<CommentView, BackendError> {
    let row = backend
        .insert(
            tables::SHORT_COMMENTS,
            json!({ "short_id": short_id, "user_id": user_id, "content": content }),
        )
        .await?;
    let comment: ShortComment =
        serde_json::from_value(row).map_err(|err| BackendError::Decode(err.to_string()))?;

    let author = fetch_profile(backend, user_id).await.unwrap_or_else(|err| {
        tracing::warn!("own profile lookup failed: {err}");
        None
    });
    Ok(CommentView {
        username: author
            .as_ref()
            .map_or_else(|| SELF_AUTHOR.to_string(), |p| p.username.clone()),
        avatar_url: author.and_then(|p| p.avatar_url),
        comment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::DEMO_SHORT_ID;
    use crate::test_utils::FakeBackend;

    fn short_row(id: &str, title: &str, created_at: &str) -> Value {
        json!({
            "id": id,
            "title": title,
            "channel_name": "TV3 News",
            "video_url": "https://cdn.tv3.example/clip.mp4",
            "created_at": created_at,
        })
    }

    #[tokio::test]
    async fn empty_feed_falls_back_to_demo() {
        let fake = FakeBackend::new().shared();
        let feed = load_feed(fake).await;
        assert_eq!(feed.shorts.len(), 1);
        assert_eq!(feed.shorts[0].id, DEMO_SHORT_ID);
        assert!(feed.like_counts.is_empty());
    }

    #[tokio::test]
    async fn unreachable_feed_falls_back_to_demo() {
        let fake = FakeBackend::new()
            .with_row(tables::SHORTS, short_row("s1", "One", "2024-05-01T10:00:00Z"))
            .shared();
        fake.fail("select:shorts");
        assert_eq!(load_feed(fake).await, FeedSnapshot::demo());
    }

    #[tokio::test]
    async fn feed_is_newest_first_with_counts() {
        let fake = FakeBackend::new()
            .with_row(tables::SHORTS, short_row("old", "Old", "2024-05-01T10:00:00Z"))
            .with_row(tables::SHORTS, short_row("new", "New", "2024-05-02T10:00:00Z"))
            .with_row(tables::SHORT_LIKES, json!({ "short_id": "old", "user_id": "a" }))
            .with_row(tables::SHORT_LIKES, json!({ "short_id": "old", "user_id": "b" }))
            .with_row(
                tables::SHORT_COMMENTS,
                json!({ "id": "c1", "short_id": "new", "user_id": "a", "content": "hi" }),
            )
            .shared();

        let feed = load_feed(fake).await;
        let ids: Vec<_> = feed.shorts.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["new", "old"]);
        assert_eq!(feed.like_counts["old"], 2);
        assert_eq!(feed.like_counts["new"], 0);
        assert_eq!(feed.comment_counts["new"], 1);
    }

    #[tokio::test]
    async fn failed_count_reads_as_zero() {
        let fake = FakeBackend::new()
            .with_row(tables::SHORTS, short_row("s1", "One", "2024-05-01T10:00:00Z"))
            .with_row(tables::SHORT_LIKES, json!({ "short_id": "s1", "user_id": "a" }))
            .shared();
        fake.fail("count:short_likes");
        let feed = load_feed(fake).await;
        assert_eq!(feed.like_counts["s1"], 0);
    }

    #[tokio::test]
    async fn memberships_are_per_user() {
        let fake = FakeBackend::new()
            .with_row(tables::SHORT_LIKES, json!({ "short_id": "s1", "user_id": "me" }))
            .with_row(tables::SHORT_LIKES, json!({ "short_id": "s2", "user_id": "other" }))
            .with_row(tables::SHORT_BOOKMARKS, json!({ "short_id": "s2", "user_id": "me" }))
            .shared();
        let memberships = load_memberships(fake, "me".into()).await;
        assert_eq!(memberships.liked, HashSet::from(["s1".to_string()]));
        assert_eq!(memberships.bookmarked, HashSet::from(["s2".to_string()]));
    }

    #[tokio::test]
    async fn reaction_toggle_inserts_then_deletes() {
        let fake = FakeBackend::new().shared();
        set_reaction(fake.clone(), Reaction::Like, "s1".into(), "me".into(), true)
            .await
            .expect("liked");
        assert_eq!(fake.rows(tables::SHORT_LIKES).len(), 1);

        set_reaction(fake.clone(), Reaction::Like, "s1".into(), "me".into(), false)
            .await
            .expect("unliked");
        assert!(fake.rows(tables::SHORT_LIKES).is_empty());
    }

    #[tokio::test]
    async fn comments_join_authors_with_fallback() {
        let fake = FakeBackend::new()
            .with_row(
                tables::PROFILES,
                json!({ "user_id": "a", "username": "alice", "avatar_url": "https://img/a.png" }),
            )
            .with_row(
                tables::SHORT_COMMENTS,
                json!({ "id": "c2", "short_id": "s1", "user_id": "ghost", "content": "second",
                        "created_at": "2024-05-01T10:05:00Z" }),
            )
            .with_row(
                tables::SHORT_COMMENTS,
                json!({ "id": "c1", "short_id": "s1", "user_id": "a", "content": "first",
                        "created_at": "2024-05-01T10:00:00Z" }),
            )
            .with_row(
                tables::SHORT_COMMENTS,
                json!({ "id": "c3", "short_id": "s2", "user_id": "a", "content": "elsewhere",
                        "created_at": "2024-05-01T09:00:00Z" }),
            )
            .shared();

        let comments = load_comments(fake.clone(), "s1".into()).await.expect("loaded");
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].comment.content, "first");
        assert_eq!(comments[0].username, "alice");
        assert_eq!(comments[0].avatar_url.as_deref(), Some("https://img/a.png"));
        assert_eq!(comments[1].username, UNKNOWN_AUTHOR);

        let profile_lookups = fake
            .calls()
            .iter()
            .filter(|call| call.as_str() == "select:profiles")
            .count();
        assert_eq!(profile_lookups, 1);
    }

    #[tokio::test]
    async fn posted_comment_uses_own_profile_or_you() {
        let fake = FakeBackend::new().shared();
        let view = post_comment(fake.clone(), "s1".into(), "me".into(), "hello".into())
            .await
            .expect("posted");
        assert_eq!(view.username, SELF_AUTHOR);
        assert_eq!(view.comment.content, "hello");
        assert_eq!(fake.rows(tables::SHORT_COMMENTS).len(), 1);
    }

    #[tokio::test]
    async fn failed_comment_insert_is_reported() {
        let fake = FakeBackend::new().shared();
        fake.fail("insert:short_comments");
        let result = post_comment(fake, "s1".into(), "me".into(), "hello".into()).await;
        assert!(result.is_err());
    }
}
