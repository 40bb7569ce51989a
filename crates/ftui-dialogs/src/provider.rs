#![forbid(unsafe_code)]

//! Provider and lookup for the shared [`DialogControls`].
//!
//! Mount a [`DialogControlsProvider`] once near the root of the UI. It builds
//! the registry and keeps it reachable for as long as the provider lives:
//!
//! - Pass [`DialogControlsProvider::controls`] down explicitly to widgets
//!   that need it. Such widgets cannot be built without a provider.
//! - Or call [`use_dialog_controls`] from anywhere on the UI thread. It
//!   resolves the innermost mounted provider and fails with
//!   [`DialogControlsError::MissingProvider`] when there is none.
//!
//! # Invariants
//!
//! - The registry is built once per provider; every lookup returns the same
//!   `Rc` until the provider drops.
//! - Providers nest. Lookups resolve the most recently mounted live one.
//! - Dropping a provider unmounts it even when it is not the innermost.

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::rc::Rc;

use crate::config::DialogsConfig;
use crate::registry::DialogControls;

struct Mounted {
    id: u64,
    controls: Rc<DialogControls>,
}

thread_local! {
    static PROVIDERS: RefCell<Vec<Mounted>> = const { RefCell::new(Vec::new()) };
    static NEXT_PROVIDER_ID: Cell<u64> = const { Cell::new(1) };
}

/// Errors from resolving the dialog controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogControlsError {
    /// Lookup happened outside any mounted [`DialogControlsProvider`].
    MissingProvider,
}

impl std::fmt::Display for DialogControlsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingProvider => write!(
                f,
                "dialog controls looked up outside of a DialogControlsProvider"
            ),
        }
    }
}

impl std::error::Error for DialogControlsError {}

/// Owner of a mounted [`DialogControls`] registry.
///
/// Dropping the provider unmounts the registry.
#[must_use = "dropping the provider unmounts the dialog controls"]
pub struct DialogControlsProvider {
    id: u64,
    controls: Rc<DialogControls>,
    _not_send: PhantomData<Rc<()>>,
}

impl DialogControlsProvider {
    /// Build the registry with default payloads and mount it.
    pub fn mount() -> Self {
        Self::mount_controls(DialogControls::new())
    }

    /// Build the registry from `config` and mount it.
    pub fn mount_with_config(config: &DialogsConfig) -> Self {
        Self::mount_controls(DialogControls::from_config(config))
    }

    /// Mount an already-built registry.
    pub fn mount_controls(controls: DialogControls) -> Self {
        let id = NEXT_PROVIDER_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            id
        });
        let controls = Rc::new(controls);
        let depth = PROVIDERS.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push(Mounted {
                id,
                controls: Rc::clone(&controls),
            });
            stack.len()
        });
        tracing::debug!(provider = id, depth, "dialog controls mounted");
        Self {
            id,
            controls,
            _not_send: PhantomData,
        }
    }

    /// The registry owned by this provider.
    #[must_use]
    pub fn controls(&self) -> Rc<DialogControls> {
        Rc::clone(&self.controls)
    }
}

impl std::fmt::Debug for DialogControlsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogControlsProvider")
            .field("id", &self.id)
            .field("controls", &self.controls)
            .finish()
    }
}

impl Drop for DialogControlsProvider {
    fn drop(&mut self) {
        // The thread-local may already be gone during thread teardown.
        let _ = PROVIDERS.try_with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(idx) = stack.iter().rposition(|m| m.id == self.id) {
                stack.remove(idx);
            }
        });
        tracing::debug!(provider = self.id, "dialog controls unmounted");
    }
}

/// Resolve the innermost mounted dialog controls.
pub fn use_dialog_controls() -> Result<Rc<DialogControls>, DialogControlsError> {
    let found = PROVIDERS.with(|stack| stack.borrow().last().map(|m| Rc::clone(&m.controls)));
    found.ok_or_else(|| {
        tracing::error!("dialog controls looked up outside of a DialogControlsProvider");
        DialogControlsError::MissingProvider
    })
}

/// Run `f` with the innermost mounted dialog controls.
pub fn with_dialog_controls<R>(
    f: impl FnOnce(&DialogControls) -> R,
) -> Result<R, DialogControlsError> {
    let controls = use_dialog_controls()?;
    Ok(f(&controls))
}

/// Number of providers mounted on this thread.
#[must_use]
pub fn mounted_providers() -> usize {
    PROVIDERS.with(|stack| stack.borrow().len())
}
