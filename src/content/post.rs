//! Blog post records from the content store.

use serde::{Deserialize, Serialize};

/// One blog post, as stored in the blog JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub date: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    /// Human-readable read time (e.g., "8 min read").
    pub read_time: String,
    /// Image filenames; the first becomes the page's og:image.
    pub images: Vec<String>,
}

impl BlogPost {
    /// Word count of the post body, by whitespace splitting.
    ///
    /// An empty body counts as zero words, not one.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}
