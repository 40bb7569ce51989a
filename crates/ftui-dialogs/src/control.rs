#![forbid(unsafe_code)]

//! Open/close handle for a single modal dialog.
//!
//! A [`DialogControl`] is what a dialog widget and the code that summons it
//! share: the widget renders while [`is_open`](DialogControl::is_open) is
//! true, and callers flip it with [`open`](DialogControl::open) /
//! [`close`](DialogControl::close). Rendering, animation and focus handling
//! belong to the widget, not to the control.
//!
//! # Invariants
//!
//! - Every control gets a process-unique [`DialogId`].
//! - `open()` on an open control and `close()` on a closed one do not bump
//!   the version or notify subscribers.
//! - Close callbacks run exactly once, in registration order, after the
//!   state has switched to closed.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use ftui_reactive::{Binding, Observable, Subscription, bind_observable};

/// Global counter for unique dialog IDs.
static DIALOG_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a dialog control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogId(u64);

impl DialogId {
    fn new() -> Self {
        Self(DIALOG_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw ID value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dialog-{}", self.0)
    }
}

type CloseCallback = Box<dyn FnOnce()>;

struct ControlInner {
    id: DialogId,
    name: &'static str,
    open: Observable<bool>,
    on_close: RefCell<Vec<CloseCallback>>,
}

/// Shared handle to one dialog's open state.
///
/// Clones refer to the same dialog; use [`ptr_eq`](Self::ptr_eq) to compare
/// identity.
#[derive(Clone)]
pub struct DialogControl {
    inner: Rc<ControlInner>,
}

impl DialogControl {
    /// Create a closed control labelled `name` (used in logs).
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            inner: Rc::new(ControlInner {
                id: DialogId::new(),
                name,
                open: Observable::new(false),
                on_close: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Process-unique identifier of this dialog.
    #[inline]
    #[must_use]
    pub fn id(&self) -> DialogId {
        self.inner.id
    }

    /// Label given at construction.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Whether the dialog is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.open.get()
    }

    /// Open the dialog.
    pub fn open(&self) {
        if self.inner.open.set(true) {
            tracing::debug!(dialog = self.inner.name, id = self.inner.id.0, "dialog opened");
        }
    }

    /// Close the dialog and run any queued close callbacks.
    pub fn close(&self) {
        if self.inner.open.set(false) {
            tracing::debug!(dialog = self.inner.name, id = self.inner.id.0, "dialog closed");
        }
        self.run_close_callbacks();
    }

    /// Close the dialog, then run `callback`.
    ///
    /// Callbacks queued earlier run first.
    pub fn close_with(&self, callback: impl FnOnce() + 'static) {
        self.inner.on_close.borrow_mut().push(Box::new(callback));
        self.close();
    }

    /// Version of the open state; changes on every open/close transition.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.open.version()
    }

    /// Observe open/close transitions.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(bool) + 'static) -> Subscription {
        self.inner.open.subscribe(move |open| callback(*open))
    }

    /// Read-only binding to the open state.
    pub fn bind_open(&self) -> Binding<bool> {
        bind_observable(&self.inner.open)
    }

    /// Whether both handles control the same dialog.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn open_cell(&self) -> &Observable<bool> {
        &self.inner.open
    }

    fn run_close_callbacks(&self) {
        let callbacks = std::mem::take(&mut *self.inner.on_close.borrow_mut());
        for callback in callbacks {
            callback();
        }
    }
}

impl fmt::Debug for DialogControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogControl")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("open", &self.is_open())
            .finish()
    }
}
