#![forbid(unsafe_code)]

//! App-wide dialog controls for FrankenTUI.
//!
//! A handful of dialogs (muted words, sign-in, in-app browser consent, link
//! warning) can be summoned from any screen. This crate gives them one
//! shared home:
//!
//! - [`DialogControl`]: open/close handle for a single dialog.
//! - [`StatefulControl`]: a control that also carries a payload, set on
//!   `open(v)` and reset on `clear()`.
//! - [`DialogControls`]: the registry holding one control per
//!   [`DialogName`].
//! - [`DialogControlsProvider`] / [`use_dialog_controls`]: mount the registry
//!   once and reach it from the rest of the UI.
//!
//! # Example
//!
//! ```
//! use ftui_dialogs::{DialogControlsProvider, LinkWarning, use_dialog_controls};
//!
//! let provider = DialogControlsProvider::mount();
//!
//! let controls = use_dialog_controls().unwrap();
//! controls
//!     .link_warning
//!     .open(LinkWarning::new("https://example.com", "Example"));
//! assert!(controls.link_warning.is_open());
//!
//! drop(provider);
//! assert!(use_dialog_controls().is_err());
//! ```
//!
//! # Threading
//!
//! All handles are `!Send`. Build and use them on the UI thread.

pub mod config;
pub mod control;
pub mod provider;
pub mod registry;
pub mod stateful;

#[cfg(feature = "config")]
pub use config::ConfigError;
pub use config::DialogsConfig;
pub use control::{DialogControl, DialogId};
pub use provider::{
    DialogControlsError, DialogControlsProvider, mounted_providers, use_dialog_controls,
    with_dialog_controls,
};
pub use registry::{DialogControls, DialogName, LinkWarning};
pub use stateful::StatefulControl;
