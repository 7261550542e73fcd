//! Defines the [`PostSummary`] type, the minimal displayable record for a blog
//! entry. Summaries are produced by [`crate::content::Loader`] and consumed
//! read-only by [`crate::filter`], [`crate::tags`], and
//! [`crate::pagination`].

use serde::{Deserialize, Serialize};

/// A post as it appears in a listing: enough to render a card and to search
/// against, but not the rendered body.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PostSummary {
    /// The post's path relative to the site root (e.g., `blog/hello-world`).
    /// Unique within a list.
    pub path: String,

    /// The title of the post.
    pub title: String,

    /// Short plain-text description shown under the title.
    #[serde(default)]
    pub summary: String,

    /// The post date as an ISO-8601 calendar date (`YYYY-MM-DD`).
    pub date: String,

    /// The tags associated with the post, in frontmatter order. Missing tags
    /// deserialize as an empty list.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PostSummary {
    /// Returns the text a search query is matched against: the title,
    /// summary, and space-joined tags concatenated together, lowercased.
    pub fn search_text(&self) -> String {
        let mut text = String::with_capacity(
            self.title.len() + self.summary.len() + self.tags.len() * 8,
        );
        text.push_str(&self.title);
        text.push_str(&self.summary);
        text.push_str(&self.tags.join(" "));
        text.to_lowercase()
    }

    /// Returns `true` if `query` occurs anywhere in [`Self::search_text`],
    /// ignoring case. The empty query matches every post.
    pub fn matches(&self, query: &str) -> bool {
        self.search_text().contains(&query.to_lowercase())
    }
}
