//! Background scroll locking for overlays.
//!
//! While an overlay (the mobile navigation drawer) is open, the page behind
//! it must not scroll, yet it must not visibly jump either. The lock pins the
//! document body in place with `position: fixed` and a negative `top` equal
//! to the current scroll offset, then scrolls back to that offset when the
//! lock is released.
//!
//! The document itself is reached through the [`Viewport`] trait so that the
//! controller can be driven against [`MemoryViewport`] in tests, or against a
//! real document elsewhere.

use tracing::debug;

/// Handle onto the document's scroll position and body style.
pub trait Viewport {
    /// Returns the current vertical scroll offset.
    fn scroll_y(&self) -> i64;

    /// Pins the body in place: overflow hidden, position fixed, full width,
    /// and `top` set to `-offset`.
    fn lock(&mut self, offset: i64);

    /// Removes every override applied by [`Viewport::lock`]. Must be safe to
    /// call when nothing is locked.
    fn unlock(&mut self);

    /// Scrolls the document to vertical offset `y`.
    fn scroll_to(&mut self, y: i64);
}

/// The lock's two states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockState {
    Unlocked,

    /// Locked, remembering the offset captured when the lock began.
    Locked { saved_scroll_y: i64 },
}

/// Drives a [`Viewport`] through the lock lifecycle. Dropping the controller
/// runs [`ScrollLockController::teardown`], so a controller discarded while
/// its overlay is open never leaves the document locked.
pub struct ScrollLockController<V: Viewport> {
    viewport: V,
    state: LockState,
}

impl<V: Viewport> ScrollLockController<V> {
    pub fn new(viewport: V) -> Self {
        ScrollLockController {
            viewport,
            state: LockState::Unlocked,
        }
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, LockState::Locked { .. })
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Captures the scroll offset and locks the viewport. Opening an already
    /// locked controller does nothing; re-capturing would record the pinned
    /// offset instead of the user's.
    pub fn on_overlay_open(&mut self) {
        if self.is_locked() {
            return;
        }
        let saved_scroll_y = self.viewport.scroll_y();
        self.viewport.lock(saved_scroll_y);
        self.state = LockState::Locked { saved_scroll_y };
        debug!(saved_scroll_y, "scroll locked");
    }

    /// Removes the lock and, if one was held, restores the saved offset.
    /// Idempotent.
    pub fn on_overlay_close(&mut self) {
        self.release();
    }

    /// Releases the lock regardless of the last known state. Re-entrant.
    pub fn teardown(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        // Style overrides are always cleared, even when unlocked.
        self.viewport.unlock();
        if let LockState::Locked { saved_scroll_y } = self.state {
            // Dropping `position: fixed` alone leaves the page at the top.
            self.viewport.scroll_to(saved_scroll_y);
            debug!(saved_scroll_y, "scroll restored");
        }
        self.state = LockState::Unlocked;
    }
}

impl<V: Viewport> Drop for ScrollLockController<V> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// The body style properties the lock touches. `None`/`false` means the
/// property is not overridden.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BodyStyle {
    pub overflow_hidden: bool,
    pub position_fixed: bool,
    pub full_width: bool,
    pub top: Option<i64>,
}

impl BodyStyle {
    /// Returns `true` when no property is overridden.
    pub fn is_clear(&self) -> bool {
        *self == BodyStyle::default()
    }
}

/// An in-memory document: a scroll offset and a body style. Scrolling is
/// ignored while the body is fixed, as in a browser.
#[derive(Clone, Debug, Default)]
pub struct MemoryViewport {
    scroll_y: i64,
    style: BodyStyle,
}

impl MemoryViewport {
    pub fn new(scroll_y: i64) -> Self {
        MemoryViewport {
            scroll_y,
            style: BodyStyle::default(),
        }
    }

    pub fn style(&self) -> &BodyStyle {
        &self.style
    }

    /// The offset the user sees. While the body is fixed, that is the
    /// negated `top` rather than the document's own scroll offset.
    pub fn visual_scroll_y(&self) -> i64 {
        match self.style.top {
            Some(top) if self.style.position_fixed => -top,
            _ => self.scroll_y,
        }
    }
}

impl Viewport for MemoryViewport {
    fn scroll_y(&self) -> i64 {
        self.scroll_y
    }

    fn lock(&mut self, offset: i64) {
        self.style = BodyStyle {
            overflow_hidden: true,
            position_fixed: true,
            full_width: true,
            top: Some(-offset),
        };
        // A fixed body has nothing to scroll.
        self.scroll_y = 0;
    }

    fn unlock(&mut self) {
        self.style = BodyStyle::default();
    }

    fn scroll_to(&mut self, y: i64) {
        if !self.style.position_fixed {
            self.scroll_y = y;
        }
    }
}

impl<V: Viewport + ?Sized> Viewport for &mut V {
    fn scroll_y(&self) -> i64 {
        (**self).scroll_y()
    }

    fn lock(&mut self, offset: i64) {
        (**self).lock(offset)
    }

    fn unlock(&mut self) {
        (**self).unlock()
    }

    fn scroll_to(&mut self, y: i64) {
        (**self).scroll_to(y)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_open_pins_visual_offset() {
        let mut controller = ScrollLockController::new(MemoryViewport::new(640));
        controller.on_overlay_open();

        assert_eq!(LockState::Locked { saved_scroll_y: 640 }, controller.state());
        let viewport = controller.viewport();
        assert_eq!(640, viewport.visual_scroll_y());
        assert_eq!(
            &BodyStyle {
                overflow_hidden: true,
                position_fixed: true,
                full_width: true,
                top: Some(-640),
            },
            viewport.style()
        );
    }

    #[test]
    fn test_round_trip_restores_offset() {
        let mut controller = ScrollLockController::new(MemoryViewport::new(640));
        controller.on_overlay_open();
        controller.on_overlay_close();

        assert_eq!(LockState::Unlocked, controller.state());
        assert!(controller.viewport().style().is_clear());
        assert_eq!(640, controller.viewport().scroll_y());
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut controller = ScrollLockController::new(MemoryViewport::new(100));
        controller.on_overlay_open();
        controller.on_overlay_close();
        controller.on_overlay_close();
        assert!(controller.viewport().style().is_clear());
        assert_eq!(100, controller.viewport().scroll_y());
    }

    #[test]
    fn test_close_without_open_keeps_offset() {
        let mut controller = ScrollLockController::new(MemoryViewport::new(250));
        controller.on_overlay_close();
        assert!(!controller.is_locked());
        assert_eq!(250, controller.viewport().scroll_y());
    }

    #[test]
    fn test_double_open_keeps_first_capture() {
        let mut controller = ScrollLockController::new(MemoryViewport::new(300));
        controller.on_overlay_open();
        controller.on_overlay_open();
        assert_eq!(LockState::Locked { saved_scroll_y: 300 }, controller.state());
        controller.on_overlay_close();
        assert_eq!(300, controller.viewport().scroll_y());
    }

    #[test]
    fn test_drop_while_open_restores() {
        let mut viewport = MemoryViewport::new(480);
        {
            let mut controller = ScrollLockController::new(&mut viewport);
            controller.on_overlay_open();
            assert!(!controller.viewport().style().is_clear());
        }
        assert!(viewport.style().is_clear());
        assert_eq!(480, viewport.scroll_y());
    }

    #[test]
    fn test_teardown_twice() {
        let mut viewport = MemoryViewport::new(90);
        {
            let mut controller = ScrollLockController::new(&mut viewport);
            controller.on_overlay_open();
            controller.teardown();
            controller.teardown();
            assert_eq!(LockState::Unlocked, controller.state());
        }
        assert!(viewport.style().is_clear());
        assert_eq!(90, viewport.scroll_y());
    }
}
