#![forbid(unsafe_code)]

//! Reactive state primitives for FrankenTUI dialogs.
//!
//! - [`Observable`]: a shared, version-tracked value with change callbacks.
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//! - [`BatchScope`]: defers notifications so several writes are observed
//!   together.
//! - [`Binding`]: a read-only, always-fresh view derived from observables.
//!
//! # Architecture
//!
//! Everything here is single-threaded: cells are `Rc<RefCell<..>>` and the
//! batch context is thread-local. Handles are `!Send` and are meant to live on
//! the UI thread.

pub mod batch;
pub mod binding;
pub mod observable;

pub use batch::BatchScope;
pub use binding::{Binding, bind_mapped2, bind_observable};
pub use observable::{Observable, Subscription};
