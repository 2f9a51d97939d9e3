// SPDX-License-Identifier: MPL-2.0
//! Remote images (avatars, channel logos) decoded into widget handles.
//!
//! Each URL is fetched at most once per session. Relative paths point at
//! web-only assets and are never requested; those images fall back to a
//! placeholder.

use iced::widget::image;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct ImageCache {
    handles: HashMap<String, image::Handle>,
    requested: HashSet<String>,
}

impl ImageCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` as requested and returns `true` if a download should start.
    pub fn request(&mut self, url: &str) -> bool {
        if !is_remote(url) || self.requested.contains(url) {
            return false;
        }
        self.requested.insert(url.to_string());
        true
    }

    pub fn insert(&mut self, url: String, bytes: Vec<u8>) {
        self.handles.insert(url, image::Handle::from_bytes(bytes));
    }

    #[must_use]
    pub fn get(&self, url: &str) -> Option<&image::Handle> {
        self.handles.get(url)
    }

    /// Forgets everything, so images are fetched again on demand.
    pub fn clear(&mut self) {
        self.handles.clear();
        self.requested.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

fn is_remote(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}
