//! Live filtering of a post listing. See [`PostListFilter`] for the stateful
//! wrapper and [`visible_posts`] for the underlying selection rule.

use crate::post::PostSummary;

/// Selects the posts to display for a listing.
///
/// When `query` is empty and `initial_page` is non-empty, `initial_page` is
/// returned unchanged, which preserves whatever subset and ordering the
/// caller chose for the first page. Otherwise every post in `all_posts` that
/// matches `query` (see [`PostSummary::matches`]) is returned in its original
/// order.
pub fn visible_posts<'a>(
    all_posts: &'a [PostSummary],
    query: &str,
    initial_page: &'a [PostSummary],
) -> Vec<&'a PostSummary> {
    if query.is_empty() && !initial_page.is_empty() {
        return initial_page.iter().collect();
    }

    let query = query.to_lowercase();
    all_posts
        .iter()
        .filter(|post| post.search_text().contains(&query))
        .collect()
}

/// Holds a post listing and the search box's current value.
pub struct PostListFilter {
    /// Every post that can be searched.
    posts: Vec<PostSummary>,

    /// The page shown while the search box is empty. May be empty, in which
    /// case all of `posts` is shown.
    initial_page: Vec<PostSummary>,

    /// The current search string, stored exactly as typed.
    query: String,
}

impl PostListFilter {
    /// Creates a filter with an empty query.
    pub fn new(posts: Vec<PostSummary>, initial_page: Vec<PostSummary>) -> Self {
        PostListFilter {
            posts,
            initial_page,
            query: String::new(),
        }
    }

    /// Replaces the query verbatim. No trimming is applied.
    pub fn set_query<S: Into<String>>(&mut self, query: S) {
        self.query = query.into();
        tracing::trace!(query = %self.query, "query updated");
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn posts(&self) -> &[PostSummary] {
        &self.posts
    }

    /// The posts to render for the current query.
    pub fn visible_posts(&self) -> Vec<&PostSummary> {
        visible_posts(&self.posts, &self.query, &self.initial_page)
    }
}
