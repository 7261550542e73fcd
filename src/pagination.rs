//! Pagination for post listings: splitting a listing into pages
//! ([`paginate`]) and computing the previous/next controls for a page
//! ([`PaginationState::prev`], [`PaginationState::next`]).

use crate::post::PostSummary;
use serde::Serialize;
use std::fmt;

/// The position of a listing page within its listing. `current_page` is
/// 1-based and never exceeds `total_pages`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub current_page: usize,
    pub total_pages: usize,
}

/// The target of a pagination control. Missing neighbors render as a
/// disabled control rather than a dead link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLink {
    Target(String),
    Disabled,
}

impl PageLink {
    pub fn target(&self) -> Option<&str> {
        match self {
            PageLink::Target(path) => Some(path),
            PageLink::Disabled => None,
        }
    }
}

impl fmt::Display for PageLink {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PageLink::Target(path) => path.fmt(f),
            PageLink::Disabled => write!(f, "-"),
        }
    }
}

impl PaginationState {
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        PaginationState {
            current_page,
            total_pages,
        }
    }

    /// Controls are only shown for listings with more than one page.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    /// The link to the previous page under `/{base_path}`. Page 1 is the
    /// listing root (`/{base_path}/`); later pages live at
    /// `/{base_path}/page/{n}`.
    pub fn prev(&self, base_path: &str) -> PageLink {
        match self.current_page {
            0 | 1 => PageLink::Disabled,
            2 => PageLink::Target(format!("/{}/", base_path)),
            n => PageLink::Target(format!("/{}/page/{}", base_path, n - 1)),
        }
    }

    /// The link to the next page under `/{base_path}`.
    pub fn next(&self, base_path: &str) -> PageLink {
        match self.current_page < self.total_pages {
            false => PageLink::Disabled,
            true => PageLink::Target(format!(
                "/{}/page/{}",
                base_path,
                self.current_page + 1
            )),
        }
    }
}

/// Splits `posts` into pages of `page_size` and returns page `page`
/// (1-based) together with its [`PaginationState`]. An empty listing has a
/// single empty page. Returns `None` if `page` is out of range or
/// `page_size` is zero.
pub fn paginate(
    posts: &[PostSummary],
    page_size: usize,
    page: usize,
) -> Option<(&[PostSummary], PaginationState)> {
    if page_size == 0 {
        return None;
    }

    let total_pages = match posts.len() % page_size {
        0 => posts.len() / page_size,
        _ => posts.len() / page_size + 1,
    }
    .max(1);

    if page < 1 || page > total_pages {
        return None;
    }

    let start = (page - 1) * page_size;
    let stop = (start + page_size).min(posts.len());
    Some((&posts[start..stop], PaginationState::new(page, total_pages)))
}
