// SPDX-License-Identifier: MPL-2.0
//! Per-feed cache of counters and the viewer's reactions, keyed by short id.
//!
//! Toggles apply locally first. A [`Toggle`] records what was applied so a
//! failed backend write can be undone with [`ReactionCache::revert`].

use crate::application::feed::{FeedSnapshot, Memberships, Reaction};
use std::collections::{HashMap, HashSet};

/// A locally applied reaction change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub reaction: Reaction,
    pub short_id: String,
    /// State after the toggle.
    pub on: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionCache {
    liked: HashSet<String>,
    bookmarked: HashSet<String>,
    like_counts: HashMap<String, u64>,
    comment_counts: HashMap<String, u64>,
}

impl ReactionCache {
    /// Counters from a freshly loaded feed; memberships start empty.
    #[must_use]
    pub fn from_snapshot(snapshot: &FeedSnapshot) -> Self {
        Self {
            like_counts: snapshot.like_counts.clone(),
            comment_counts: snapshot.comment_counts.clone(),
            ..Self::default()
        }
    }

    pub fn set_memberships(&mut self, memberships: Memberships) {
        self.liked = memberships.liked;
        self.bookmarked = memberships.bookmarked;
    }

    pub fn clear_memberships(&mut self) {
        self.liked.clear();
        self.bookmarked.clear();
    }

    #[must_use]
    pub fn is_on(&self, reaction: Reaction, short_id: &str) -> bool {
        self.set(reaction).contains(short_id)
    }

    #[must_use]
    pub fn like_count(&self, short_id: &str) -> u64 {
        self.like_counts.get(short_id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn comment_count(&self, short_id: &str) -> u64 {
        self.comment_counts.get(short_id).copied().unwrap_or(0)
    }

    /// Flips a reaction. Likes also move the displayed count by one, never
    /// below zero.
    pub fn toggle(&mut self, reaction: Reaction, short_id: &str) -> Toggle {
        let on = !self.is_on(reaction, short_id);
        self.apply(reaction, short_id, on);
        Toggle {
            reaction,
            short_id: short_id.to_string(),
            on,
        }
    }

    /// Undoes `toggle` unless the user has flipped the reaction again since.
    pub fn revert(&mut self, toggle: &Toggle) -> bool {
        if self.is_on(toggle.reaction, &toggle.short_id) != toggle.on {
            return false;
        }
        self.apply(toggle.reaction, &toggle.short_id, !toggle.on);
        true
    }

    /// Counts a newly posted comment.
    pub fn add_comment(&mut self, short_id: &str) {
        *self.comment_counts.entry(short_id.to_string()).or_insert(0) += 1;
    }

    fn apply(&mut self, reaction: Reaction, short_id: &str, on: bool) {
        let set = match reaction {
            Reaction::Like => &mut self.liked,
            Reaction::Bookmark => &mut self.bookmarked,
        };
        if on {
            set.insert(short_id.to_string());
        } else {
            set.remove(short_id);
        }

        if reaction == Reaction::Like {
            let count = self.like_counts.entry(short_id.to_string()).or_insert(0);
            *count = if on {
                count.saturating_add(1)
            } else {
                count.saturating_sub(1)
            };
        }
    }

    fn set(&self, reaction: Reaction) -> &HashSet<String> {
        match reaction {
            Reaction::Like => &self.liked,
            Reaction::Bookmark => &self.bookmarked,
        }
    }
}
