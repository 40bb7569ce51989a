#![forbid(unsafe_code)]

//! Deferred notification scopes.
//!
//! While a [`BatchScope`] is alive, [`Observable`](crate::Observable) writes
//! take effect immediately but their subscriber callbacks are queued. The
//! queue is flushed when the outermost scope drops, so observers see all
//! writes made inside the scope together.
//!
//! Each observable is queued at most once per flush; its subscribers receive
//! the value current at flush time.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

type Pending = Box<dyn FnOnce()>;

#[derive(Default)]
struct BatchState {
    depth: u32,
    keys: Vec<usize>,
    pending: Vec<Pending>,
}

thread_local! {
    static BATCH: RefCell<BatchState> = RefCell::new(BatchState::default());
}

/// RAII guard that defers observable notifications until it drops.
///
/// Scopes nest; only the outermost one flushes.
#[must_use = "notifications flush as soon as the scope is dropped"]
pub struct BatchScope {
    _not_send: PhantomData<Rc<()>>,
}

impl BatchScope {
    /// Enter a batch scope on the current thread.
    pub fn new() -> Self {
        BATCH.with(|b| b.borrow_mut().depth += 1);
        Self {
            _not_send: PhantomData,
        }
    }

    /// Number of observables waiting for the outermost scope to exit.
    #[must_use]
    pub fn pending_count() -> usize {
        BATCH.with(|b| b.borrow().pending.len())
    }
}

impl Default for BatchScope {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BatchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchScope")
            .field("pending", &Self::pending_count())
            .finish()
    }
}

impl Drop for BatchScope {
    fn drop(&mut self) {
        let flush = BATCH.with(|b| {
            let mut state = b.borrow_mut();
            state.depth = state.depth.saturating_sub(1);
            if state.depth == 0 {
                state.keys.clear();
                std::mem::take(&mut state.pending)
            } else {
                Vec::new()
            }
        });
        if !flush.is_empty() {
            tracing::trace!(count = flush.len(), "flushing batched notifications");
        }
        for notify in flush {
            notify();
        }
    }
}

pub(crate) fn is_active() -> bool {
    BATCH.with(|b| b.borrow().depth > 0)
}

pub(crate) fn defer(key: usize, notify: Pending) {
    BATCH.with(|b| {
        let mut state = b.borrow_mut();
        if !state.keys.contains(&key) {
            state.keys.push(key);
            state.pending.push(notify);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Observable;
    use std::cell::Cell;

    #[test]
    fn notifications_deferred_until_scope_exit() {
        let obs = Observable::new(0);
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = obs.subscribe(move |_| h.set(h.get() + 1));

        let scope = BatchScope::new();
        obs.set(1);
        assert_eq!(obs.get(), 1);
        assert_eq!(hits.get(), 0);
        drop(scope);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn repeated_writes_notify_once_with_final_value() {
        let obs = Observable::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        let _sub = obs.subscribe(move |v| l.borrow_mut().push(*v));
        {
            let _scope = BatchScope::new();
            obs.set(1);
            obs.set(2);
            obs.set(3);
        }
        assert_eq!(*log.borrow(), vec![3]);
        assert_eq!(obs.version(), 3);
    }

    #[test]
    fn nested_scopes_flush_on_outermost() {
        let obs = Observable::new(0);
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = obs.subscribe(move |_| h.set(h.get() + 1));
        let outer = BatchScope::new();
        {
            let _inner = BatchScope::new();
            obs.set(1);
        }
        assert_eq!(hits.get(), 0);
        assert_eq!(BatchScope::pending_count(), 1);
        drop(outer);
        assert_eq!(hits.get(), 1);
        assert_eq!(BatchScope::pending_count(), 0);
    }

    #[test]
    fn two_cells_observed_together() {
        let a = Observable::new(0);
        let b = Observable::new(false);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (s, bb) = (Rc::clone(&seen), b.clone());
        let _sub = a.subscribe(move |v| s.borrow_mut().push((*v, bb.get())));
        {
            let _scope = BatchScope::new();
            a.set(5);
            b.set(true);
        }
        assert_eq!(*seen.borrow(), vec![(5, true)]);
    }
}
