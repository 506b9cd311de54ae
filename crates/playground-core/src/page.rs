//! Page-wide side effects held for a bounded scope.
//!
//! A drag suspends page scrolling, touch panning and text selection for as
//! long as it runs; the playground listens for viewport resizes for as long
//! as it is mounted. Both are modelled as guards that undo their effect on
//! drop, so every exit path (release, cancel, teardown) restores the page.

use std::fmt;
use std::rc::Rc;

/// Host hooks for page-wide effects.
pub trait PageEffects {
    /// Disable scrolling, touch panning and text selection.
    fn suspend_interaction(&self);
    /// Undo [`PageEffects::suspend_interaction`].
    fn restore_interaction(&self);
    /// Start listening for viewport resize/orientation changes.
    fn attach_viewport_listener(&self) {}
    /// Stop listening for viewport changes.
    fn detach_viewport_listener(&self) {}
}

/// Page effects that do nothing. Used when there is no host page.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPage;

impl PageEffects for NoPage {
    fn suspend_interaction(&self) {}
    fn restore_interaction(&self) {}
}

/// Keeps page interaction suspended until dropped.
#[must_use = "interaction is restored as soon as the guard is dropped"]
pub struct InteractionGuard {
    page: Rc<dyn PageEffects>,
}

impl InteractionGuard {
    pub fn acquire(page: Rc<dyn PageEffects>) -> Self {
        page.suspend_interaction();
        Self { page }
    }
}

impl Drop for InteractionGuard {
    fn drop(&mut self) {
        self.page.restore_interaction();
    }
}

impl fmt::Debug for InteractionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionGuard").finish_non_exhaustive()
    }
}

/// Keeps the viewport listener attached until dropped.
#[must_use = "the listener is detached as soon as the guard is dropped"]
pub struct ViewportGuard {
    page: Rc<dyn PageEffects>,
}

impl ViewportGuard {
    pub fn attach(page: Rc<dyn PageEffects>) -> Self {
        page.attach_viewport_listener();
        Self { page }
    }
}

impl Drop for ViewportGuard {
    fn drop(&mut self) {
        self.page.detach_viewport_listener();
    }
}

impl fmt::Debug for ViewportGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportGuard").finish_non_exhaustive()
    }
}

/// Page effects that count calls. Useful for tests and diagnostics.
#[derive(Debug, Default)]
pub struct RecordingPage {
    suspended: std::cell::Cell<i32>,
    listeners: std::cell::Cell<i32>,
}

impl RecordingPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of outstanding interaction suspensions.
    pub fn suspended(&self) -> i32 {
        self.suspended.get()
    }

    /// Number of attached viewport listeners.
    pub fn listeners(&self) -> i32 {
        self.listeners.get()
    }
}

impl PageEffects for RecordingPage {
    fn suspend_interaction(&self) {
        self.suspended.set(self.suspended.get() + 1);
    }

    fn restore_interaction(&self) {
        self.suspended.set(self.suspended.get() - 1);
    }

    fn attach_viewport_listener(&self) {
        self.listeners.set(self.listeners.get() + 1);
    }

    fn detach_viewport_listener(&self) {
        self.listeners.set(self.listeners.get() - 1);
    }
}
