#![forbid(unsafe_code)]

//! Read-only views over [`Observable`] cells.
//!
//! A dialog widget does not need to own the cells behind its control; it
//! renders from a [`Binding`] instead. Bindings re-read their sources on
//! every [`get`](Binding::get), so a view handed out once stays current:
//!
//! ```ignore
//! let link_warning: StatefulControl<LinkWarning> = /* ... */;
//! let shown = link_warning.bind_open_payload();
//! assert_eq!(shown.get(), None);
//!
//! link_warning.open(LinkWarning::new("https://example.com", "Example"));
//! assert!(shown.get().is_some());
//!
//! link_warning.control().close();
//! assert_eq!(shown.get(), None);
//! ```

use std::fmt;
use std::rc::Rc;

use crate::Observable;

/// A derived, read-only value that is recomputed on each read.
///
/// Clones share the same evaluation closure.
pub struct Binding<T> {
    read: Rc<dyn Fn() -> T>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            read: Rc::clone(&self.read),
        }
    }
}

impl<T: 'static> Binding<T> {
    /// Wrap an arbitrary read function.
    pub fn new(read: impl Fn() -> T + 'static) -> Self {
        Self {
            read: Rc::new(read),
        }
    }

    /// Evaluate the binding against the current source values.
    #[must_use]
    pub fn get(&self) -> T {
        (self.read)()
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Binding").field(&self.get()).finish()
    }
}

/// View of `source` as-is.
pub fn bind_observable<T: Clone + PartialEq + 'static>(source: &Observable<T>) -> Binding<T> {
    let source = source.clone();
    Binding::new(move || source.get())
}

/// View combining `first` and `second` through `combine`.
///
/// Both cells are borrowed only for the duration of `combine`.
pub fn bind_mapped2<A, B, T>(
    first: &Observable<A>,
    second: &Observable<B>,
    combine: impl Fn(&A, &B) -> T + 'static,
) -> Binding<T>
where
    A: Clone + PartialEq + 'static,
    B: Clone + PartialEq + 'static,
    T: 'static,
{
    let (first, second) = (first.clone(), second.clone());
    Binding::new(move || first.with(|a| second.with(|b| combine(a, b))))
}
