//! Exports [`Site`], which stitches together the high-level steps of
//! preparing a listing: loading the posts ([`crate::content`]), aggregating
//! their tags ([`crate::tags`]), selecting the requested page
//! ([`crate::pagination`]), and filtering by the search query
//! ([`crate::filter`]).

use crate::config::{Config, Error as ConfigError};
use crate::content::{Error as LoadError, Loader};
use crate::filter::PostListFilter;
use crate::pagination::{paginate, PageLink, PaginationState};
use crate::post::PostSummary;
use crate::tags::{SidebarTag, TagFrequency};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Every post on the site plus the configuration needed to list them.
pub struct Site {
    pub config: Config,
    pub posts: Vec<PostSummary>,
    pub tags: TagFrequency,
}

/// One rendered listing page: the visible posts, the tag sidebar, and the
/// pagination controls.
#[derive(Debug, Serialize)]
pub struct Listing {
    pub posts: Vec<PostSummary>,
    pub tags: Vec<SidebarTag>,
    pub pagination: PaginationState,

    /// `None` when the listing fits on one page and the controls are hidden.
    pub prev: Option<PageLink>,
    pub next: Option<PageLink>,
}

impl Site {
    /// Finds the project from `dir` and loads every post. See
    /// [`Config::from_directory`].
    pub fn from_directory(dir: &Path) -> Result<Site> {
        Site::load(Config::from_directory(dir)?)
    }

    pub fn load(config: Config) -> Result<Site> {
        let posts = Loader::new(&config.base_path).load(&config.posts_directory)?;
        let tags = TagFrequency::from_posts(&posts);
        Ok(Site {
            config,
            posts,
            tags,
        })
    }

    /// Builds listing page `page` (1-based). A non-empty `query` searches
    /// every post instead of showing the page, but the search box lives on
    /// a listing page, so `page` must still exist: an out-of-range page is
    /// [`Error::PageOutOfRange`] with or without a query.
    pub fn listing(&self, page: usize, query: &str) -> Result<Listing> {
        let (initial, pagination) = paginate(&self.posts, self.config.posts_per_page, page)
            .ok_or(Error::PageOutOfRange(page))?;

        let mut filter = PostListFilter::new(self.posts.clone(), initial.to_vec());
        filter.set_query(query);

        let current_path = match page {
            1 => format!("/{}", self.config.base_path),
            n => format!("/{}/page/{}", self.config.base_path, n),
        };
        let (prev, next) = match pagination.is_visible() {
            true => (
                Some(pagination.prev(&self.config.base_path)),
                Some(pagination.next(&self.config.base_path)),
            ),
            false => (None, None),
        };

        Ok(Listing {
            posts: filter.visible_posts().into_iter().cloned().collect(),
            tags: self.tags.sidebar(&current_path),
            pagination,
            prev,
            next,
        })
    }
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for loading a site or building a listing.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors loading the configuration.
    Config(ConfigError),

    /// Returned for errors loading posts.
    Load(LoadError),

    /// Returned when the requested page doesn't exist.
    PageOutOfRange(usize),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Config(err) => err.fmt(f),
            Error::Load(err) => err.fmt(f),
            Error::PageOutOfRange(page) => write!(f, "no such page: {}", page),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            Error::Load(err) => Some(err),
            Error::PageOutOfRange(_) => None,
        }
    }
}

impl From<ConfigError> for Error {
    /// Converts [`ConfigError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: ConfigError) -> Error {
        Error::Config(err)
    }
}

impl From<LoadError> for Error {
    /// Converts [`LoadError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: LoadError) -> Error {
        Error::Load(err)
    }
}
