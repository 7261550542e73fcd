//! The mobile navigation drawer: a toggle button, a panel of links, and a
//! [`ScrollLockController`] that keeps the page still while the panel is
//! open.

use crate::scroll::{ScrollLockController, Viewport};
use serde::{Deserialize, Serialize};

/// A header navigation entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct NavLink {
    pub title: String,
    pub href: String,
}

impl NavLink {
    pub fn new(title: &str, href: &str) -> Self {
        NavLink {
            title: title.to_owned(),
            href: href.to_owned(),
        }
    }
}

/// The links shown when none are configured.
pub fn default_links() -> Vec<NavLink> {
    vec![
        NavLink::new("Home", "/"),
        NavLink::new("Blog", "/blog"),
        NavLink::new("Tags", "/tags"),
        NavLink::new("Projects", "/projects"),
        NavLink::new("About", "/about"),
    ]
}

pub struct NavDrawer<V: Viewport> {
    links: Vec<NavLink>,
    open: bool,
    scroll_lock: ScrollLockController<V>,
}

impl<V: Viewport> NavDrawer<V> {
    pub fn new(links: Vec<NavLink>, viewport: V) -> Self {
        NavDrawer {
            links,
            open: false,
            scroll_lock: ScrollLockController::new(viewport),
        }
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn scroll_lock(&self) -> &ScrollLockController<V> {
        &self.scroll_lock
    }

    /// Flips the drawer. Bound to the menu button, the close button, and
    /// clicks on the backdrop.
    pub fn toggle(&mut self) {
        match self.open {
            true => self.close(),
            false => self.open(),
        }
    }

    pub fn open(&mut self) {
        self.open = true;
        self.scroll_lock.on_overlay_open();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.scroll_lock.on_overlay_close();
    }

    /// Follows the link at `index`: closes the drawer and returns the
    /// destination, or `None` if there is no such link.
    pub fn follow(&mut self, index: usize) -> Option<String> {
        let href = self.links.get(index)?.href.clone();
        self.close();
        Some(href)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scroll::MemoryViewport;

    #[test]
    fn test_toggle_locks_and_unlocks() {
        let mut viewport = MemoryViewport::new(1200);
        {
            let mut drawer = NavDrawer::new(default_links(), &mut viewport);
            drawer.toggle();
            assert!(drawer.is_open());
            assert!(drawer.scroll_lock().is_locked());
            drawer.toggle();
            assert!(!drawer.is_open());
            assert!(!drawer.scroll_lock().is_locked());
        }
        assert!(viewport.style().is_clear());
        assert_eq!(1200, viewport.scroll_y());
    }

    #[test]
    fn test_follow_closes_drawer() {
        let mut drawer = NavDrawer::new(default_links(), MemoryViewport::new(10));
        drawer.open();
        assert_eq!(Some(String::from("/blog")), drawer.follow(1));
        assert!(!drawer.is_open());
        assert!(drawer.scroll_lock().viewport().style().is_clear());
    }

    #[test]
    fn test_follow_missing_link() {
        let mut drawer = NavDrawer::new(Vec::new(), MemoryViewport::new(0));
        drawer.open();
        assert_eq!(None, drawer.follow(0));
        assert!(drawer.is_open());
    }

    #[test]
    fn test_dropping_open_drawer_restores_scroll() {
        let mut viewport = MemoryViewport::new(75);
        {
            let mut drawer = NavDrawer::new(default_links(), &mut viewport);
            drawer.open();
        }
        assert!(viewport.style().is_clear());
        assert_eq!(75, viewport.scroll_y());
    }
}
