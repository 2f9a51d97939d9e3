// SPDX-License-Identifier: MPL-2.0
//! Content records exchanged with the backend, plus the static article list.
//!
//! The backend owns every row; the client only ever holds transient copies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend table names.
pub mod tables {
    pub const PROFILES: &str = "profiles";
    pub const SHORTS: &str = "shorts";
    pub const SHORT_LIKES: &str = "short_likes";
    pub const SHORT_BOOKMARKS: &str = "short_bookmarks";
    pub const SHORT_COMMENTS: &str = "short_comments";
}

/// Object storage bucket holding uploaded avatars.
pub const AVATAR_BUCKET: &str = "avatars";

/// Built-in avatars offered before any upload.
pub const DEFAULT_AVATARS: [&str; 3] = [
    "/avatars/default-1.jpg",
    "/avatars/default-2.jpg",
    "/avatars/default-3.jpg",
];

/// Video used by the live player and the placeholder short.
pub const DEMO_VIDEO_ID: &str = "0tOIeimtNTU";

/// Identifier of the placeholder short shown when the backend has none.
pub const DEMO_SHORT_ID: &str = "demo-1";

/// Builds the embeddable player URL for a video.
///
/// Playback starts automatically and loops; `muted` drives the `mute` flag.
#[must_use]
pub fn embed_url(video_id: &str, muted: bool) -> String {
    format!(
        "https://www.youtube.com/embed/{video_id}?autoplay=1&mute={}&loop=1&playlist={video_id}\
         &controls=0&showinfo=0&rel=0&modestbranding=1&playsinline=1",
        u8::from(muted)
    )
}

/// Builds the object path of a user's uploaded avatar.
#[must_use]
pub fn avatar_object_path(user_id: &str, extension: &str) -> String {
    format!("{user_id}/avatar.{extension}")
}

/// One per authenticated user; created on sign-up, never deleted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<String>,
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Uppercase first letter of the username, used when no avatar is set.
    #[must_use]
    pub fn initial(&self) -> String {
        self.username
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }
}

/// Short-form vertical video post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Short {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub audio_name: Option<String>,
    pub channel_name: String,
    #[serde(default)]
    pub channel_logo_url: Option<String>,
    pub video_url: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Short {
    /// The placeholder short shown when the backend returns no rows.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            id: DEMO_SHORT_ID.to_string(),
            title: "Breaking: Major developments unfold in city centre as crowds gather"
                .to_string(),
            audio_name: Some("TV3 News Theme \u{2014} Original".to_string()),
            channel_name: "TV3 News".to_string(),
            channel_logo_url: None,
            video_url: embed_url(DEMO_VIDEO_ID, true),
            created_at: None,
        }
    }

    /// Whether this is the local placeholder (never written to the backend).
    #[must_use]
    pub fn is_demo(&self) -> bool {
        is_demo_id(&self.id)
    }

    /// Whether the video is an embeddable player page rather than a file.
    #[must_use]
    pub fn is_embed(&self) -> bool {
        self.video_url.contains("youtube.com")
    }
}

/// Whether a short id belongs to the local placeholder.
#[must_use]
pub fn is_demo_id(short_id: &str) -> bool {
    short_id.starts_with("demo-")
}

/// Like or bookmark row; (user, short) is assumed unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortReaction {
    #[serde(default)]
    pub id: Option<String>,
    pub short_id: String,
    pub user_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Comment row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortComment {
    pub id: String,
    pub short_id: String,
    pub user_id: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Comment joined with its author's public profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    pub comment: ShortComment,
    pub username: String,
    pub avatar_url: Option<String>,
}

/// Article shown in the "Top Stories" tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Article {
    pub category: &'static str,
    pub title: &'static str,
    pub time: &'static str,
    pub featured: bool,
}

impl Article {
    /// Case-insensitive match of `query` against title or category.
    ///
    /// An empty query matches everything.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.category.to_lowercase().contains(&query)
    }
}

/// The featured stories.
pub const ARTICLES: [Article; 4] = [
    Article {
        category: "Breaking",
        title: "Emergency services respond to major incident in city centre",
        time: "12 min ago",
        featured: true,
    },
    Article {
        category: "Politics",
        title: "Government announces sweeping new policy reforms ahead of summit",
        time: "45 min ago",
        featured: true,
    },
    Article {
        category: "Sports",
        title: "National team clinches dramatic last-minute victory in cup final",
        time: "1 hr ago",
        featured: true,
    },
    Article {
        category: "Business",
        title: "Markets rally as investors react to quarterly earnings reports",
        time: "2 hrs ago",
        featured: true,
    },
];

/// Articles matching the search query, in display order.
#[must_use]
pub fn filter_articles(query: &str) -> Vec<&'static Article> {
    ARTICLES.iter().filter(|a| a.matches(query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_short_uses_fixed_identifier() {
        let demo = Short::demo();
        assert_eq!(demo.id, "demo-1");
        assert!(demo.is_demo());
        assert!(demo.is_embed());
        assert!(demo.video_url.contains("mute=1"));
    }

    #[test]
    fn embed_url_follows_mute_flag() {
        assert!(embed_url("abc", false).contains("mute=0"));
        assert!(embed_url("abc", true).contains("mute=1"));
        assert!(embed_url("abc", true).contains("playlist=abc"));
    }

    #[test]
    fn article_filter_is_case_insensitive_on_title_and_category() {
        assert_eq!(filter_articles("").len(), 4);
        assert_eq!(filter_articles("SPORTS").len(), 1);
        assert_eq!(filter_articles("markets")[0].category, "Business");
        assert!(filter_articles("no such story").is_empty());
    }

    #[test]
    fn profile_initial_falls_back_to_question_mark() {
        let mut profile = Profile {
            id: None,
            user_id: "u".into(),
            username: "jane".into(),
            avatar_url: None,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(profile.initial(), "J");
        profile.username.clear();
        assert_eq!(profile.initial(), "?");
    }

    #[test]
    fn short_row_deserializes_with_optional_fields_missing() {
        let row = serde_json::json!({
            "id": "s1",
            "title": "Title",
            "channel_name": "TV3 News",
            "video_url": "https://cdn.example/clip.mp4",
            "created_at": "2024-05-01T10:00:00+00:00"
        });
        let short: Short = serde_json::from_value(row).expect("parse");
        assert!(short.audio_name.is_none());
        assert!(!short.is_embed());
        assert!(short.created_at.is_some());
    }

    #[test]
    fn avatar_object_path_is_per_user() {
        assert_eq!(avatar_object_path("u1", "png"), "u1/avatar.png");
    }
}
