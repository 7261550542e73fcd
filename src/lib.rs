//! The library code for `folio`, the interactive core of a personal blog. It
//! covers two behaviors:
//!
//! 1. Listing posts: live search over post summaries ([`crate::filter`]),
//!    tag sidebar ordering ([`crate::tags`]), and page-to-page navigation
//!    ([`crate::pagination`])
//! 2. Locking background scroll while the mobile navigation drawer is open
//!    ([`crate::scroll`], [`crate::nav`])
//!
//! Of the two, the first is the more involved. Posts are loaded from markdown
//! sources by [`crate::content`] and arrive newest first. The first page of
//! that list is shown until the reader types a query, at which point every
//! post whose title, summary, or tags contain the query is shown instead.
//!
//! The second is small but easy to get wrong: the lock must restore the
//! reader's scroll offset on close, and must also be released if the drawer
//! goes away while open. [`crate::scroll::ScrollLockController`] releases
//! the lock when dropped.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod config;
pub mod content;
pub mod filter;
pub mod nav;
pub mod pagination;
pub mod post;
pub mod scroll;
pub mod site;
pub mod tags;
