use std::cell::Cell;
use std::rc::Rc;

/// Whatever actually stops the page from scrolling.
pub trait PageScroll {
    fn set_scroll_locked(&self, locked: bool);
}

/// Toggles `overflow: hidden` on `<body>`.
pub struct BodyScroll;

impl PageScroll for BodyScroll {
    fn set_scroll_locked(&self, locked: bool) {
        let body = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body());
        if let Some(body) = body {
            let value = if locked { "hidden" } else { "" };
            if let Err(e) = body.style().set_property("overflow", value) {
                log::warn!("Failed to update body overflow: {:?}", e);
            }
        }
    }
}

/// Page-wide scroll lock shared by every overlay.
///
/// Holders take a [`ScrollLockGuard`]; the page stays locked while at least
/// one guard is alive and is unlocked when the last one drops.
#[derive(Clone)]
pub struct ScrollLock {
    holders: Rc<Cell<usize>>,
    page: Rc<dyn PageScroll>,
}

impl ScrollLock {
    pub fn new(page: Rc<dyn PageScroll>) -> Self {
        Self {
            holders: Rc::new(Cell::new(0)),
            page,
        }
    }

    pub fn for_body() -> Self {
        Self::new(Rc::new(BodyScroll))
    }

    pub fn acquire(&self) -> ScrollLockGuard {
        let holders = self.holders.get() + 1;
        self.holders.set(holders);
        if holders == 1 {
            self.page.set_scroll_locked(true);
        }
        ScrollLockGuard { lock: self.clone() }
    }

    pub fn is_locked(&self) -> bool {
        self.holders.get() > 0
    }

    fn release(&self) {
        let holders = self.holders.get().saturating_sub(1);
        self.holders.set(holders);
        if holders == 0 {
            self.page.set_scroll_locked(false);
        }
    }
}

impl PartialEq for ScrollLock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.holders, &other.holders)
    }
}

pub struct ScrollLockGuard {
    lock: ScrollLock,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.lock.release();
    }
}

#[cfg(test)]
pub use recording::RecordingPage;
