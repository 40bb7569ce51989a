#![forbid(unsafe_code)]

//! Dialog controls that carry a payload.
//!
//! A [`StatefulControl<T>`] pairs a [`DialogControl`] with a value cell so a
//! dialog can be opened "with data" (the URL to confirm, the link to warn
//! about) and the data reset later.
//!
//! # Invariants
//!
//! 1. `open(v)` stores `v` and opens the dialog inside one batch: subscribers
//!    of either cell observe both changes together.
//! 2. `clear()` restores the initial value captured at construction (`None`
//!    when none was given). It does not close the dialog.
//! 3. `version()` moves only when the open state or the value changes.

use std::fmt;

use ftui_reactive::{BatchScope, Binding, Observable, Subscription, bind_mapped2, bind_observable};

use crate::control::DialogControl;

/// A dialog control bundled with its current payload.
pub struct StatefulControl<T> {
    control: DialogControl,
    value: Observable<Option<T>>,
    initial: Option<T>,
}

impl<T: Clone> Clone for StatefulControl<T> {
    fn clone(&self) -> Self {
        Self {
            control: self.control.clone(),
            value: self.value.clone(),
            initial: self.initial.clone(),
        }
    }
}

impl<T: Clone + PartialEq + 'static> StatefulControl<T> {
    /// Wrap `control` with an empty payload.
    #[must_use]
    pub fn new(control: DialogControl) -> Self {
        Self::with_initial(control, None)
    }

    /// Wrap `control`, starting from (and clearing back to) `initial`.
    #[must_use]
    pub fn with_initial(control: DialogControl, initial: Option<T>) -> Self {
        Self {
            control,
            value: Observable::new(initial.clone()),
            initial,
        }
    }

    /// Store `value` and open the dialog.
    pub fn open(&self, value: T) {
        let _batch = BatchScope::new();
        self.value.set(Some(value));
        self.control.open();
    }

    /// Reset the payload to its initial value. The dialog stays as it is.
    pub fn clear(&self) {
        if self.value.set(self.initial.clone()) {
            tracing::debug!(
                dialog = self.control.name(),
                id = self.control.id().id(),
                "dialog payload cleared"
            );
        }
    }

    /// Current payload.
    #[must_use]
    pub fn value(&self) -> Option<T> {
        self.value.get()
    }

    /// Borrow the current payload for the duration of `f`.
    pub fn with_value<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        self.value.with(|v| f(v.as_ref()))
    }

    /// The value `clear()` resets to.
    #[must_use]
    pub fn initial(&self) -> Option<&T> {
        self.initial.as_ref()
    }

    /// The underlying open/close control.
    #[inline]
    pub fn control(&self) -> &DialogControl {
        &self.control
    }

    /// Whether the underlying dialog is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.control.is_open()
    }

    /// Change counter over the open state and the payload.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.control.version() + self.value.version()
    }

    /// Observe payload changes.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(Option<&T>) + 'static) -> Subscription {
        self.value.subscribe(move |v| callback(v.as_ref()))
    }

    /// Read-only binding to the payload.
    pub fn bind_value(&self) -> Binding<Option<T>> {
        bind_observable(&self.value)
    }

    /// Binding to the payload while the dialog is open, `None` otherwise.
    ///
    /// This is what a dialog widget renders from.
    pub fn bind_open_payload(&self) -> Binding<Option<T>> {
        bind_mapped2(self.control.open_cell(), &self.value, |open, value| {
            if *open { value.clone() } else { None }
        })
    }

    /// Whether both handles share the same control and payload cell.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.control.ptr_eq(&other.control) && self.value.ptr_eq(&other.value)
    }
}

impl<T: fmt::Debug + Clone + PartialEq + 'static> fmt::Debug for StatefulControl<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatefulControl")
            .field("control", &self.control)
            .field("value", &self.value.get())
            .field("initial", &self.initial)
            .finish()
    }
}
