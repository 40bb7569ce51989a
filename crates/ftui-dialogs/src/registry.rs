#![forbid(unsafe_code)]

//! The set of app-wide dialog controls.
//!
//! [`DialogControls`] holds one control per [`DialogName`]. It is built once
//! by a [`DialogControlsProvider`](crate::DialogControlsProvider) and shared
//! behind an `Rc`, so its identity is fixed for the provider's lifetime;
//! state changes show up through [`version`](DialogControls::version) and the
//! per-control subscriptions instead.

use std::fmt;

use crate::config::DialogsConfig;
use crate::control::DialogControl;
use crate::stateful::StatefulControl;

/// The dialogs every screen can summon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogName {
    MutedWords,
    Signin,
    InAppBrowserConsent,
    LinkWarning,
}

impl DialogName {
    /// All dialog names, in registry order.
    pub const ALL: [DialogName; 4] = [
        DialogName::MutedWords,
        DialogName::Signin,
        DialogName::InAppBrowserConsent,
        DialogName::LinkWarning,
    ];

    /// Stable identifier used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MutedWords => "muted_words",
            Self::Signin => "signin",
            Self::InAppBrowserConsent => "in_app_browser_consent",
            Self::LinkWarning => "link_warning",
        }
    }
}

impl fmt::Display for DialogName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of the link-warning dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkWarning {
    /// Destination URL.
    pub href: String,
    /// Text the link was displayed with.
    pub display_text: String,
    /// Whether the link is being shared rather than followed.
    #[cfg_attr(feature = "config", serde(default))]
    pub share: Option<bool>,
}

impl LinkWarning {
    #[must_use]
    pub fn new(href: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            display_text: display_text.into(),
            share: None,
        }
    }

    /// Mark the link as being shared.
    #[must_use]
    pub fn shared(mut self, share: bool) -> Self {
        self.share = Some(share);
        self
    }
}

/// Registry of dialog controls, one per [`DialogName`].
pub struct DialogControls {
    pub muted_words: DialogControl,
    pub signin: DialogControl,
    /// Payload: the URL the user is asked to open in the in-app browser.
    pub in_app_browser_consent: StatefulControl<String>,
    pub link_warning: StatefulControl<LinkWarning>,
}

impl DialogControls {
    /// Build every control with default (empty) payloads.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&DialogsConfig::default())
    }

    /// Build every control, seeding stateful payloads from `config`.
    #[must_use]
    pub fn from_config(config: &DialogsConfig) -> Self {
        Self {
            muted_words: DialogControl::new(DialogName::MutedWords.as_str()),
            signin: DialogControl::new(DialogName::Signin.as_str()),
            in_app_browser_consent: StatefulControl::with_initial(
                DialogControl::new(DialogName::InAppBrowserConsent.as_str()),
                config.in_app_browser_consent_initial.clone(),
            ),
            link_warning: StatefulControl::with_initial(
                DialogControl::new(DialogName::LinkWarning.as_str()),
                config.link_warning_initial.clone(),
            ),
        }
    }

    /// The open/close control behind `name`.
    #[must_use]
    pub fn control(&self, name: DialogName) -> &DialogControl {
        match name {
            DialogName::MutedWords => &self.muted_words,
            DialogName::Signin => &self.signin,
            DialogName::InAppBrowserConsent => self.in_app_browser_consent.control(),
            DialogName::LinkWarning => self.link_warning.control(),
        }
    }

    /// Names of the dialogs that are currently open.
    #[must_use]
    pub fn open_dialogs(&self) -> Vec<DialogName> {
        DialogName::ALL
            .into_iter()
            .filter(|name| self.control(*name).is_open())
            .collect()
    }

    #[must_use]
    pub fn is_any_open(&self) -> bool {
        DialogName::ALL
            .into_iter()
            .any(|name| self.control(name).is_open())
    }

    /// Close every open dialog. Payloads are left untouched.
    ///
    /// Returns the names that were open.
    pub fn close_all(&self) -> Vec<DialogName> {
        let open = self.open_dialogs();
        for name in &open {
            self.control(*name).close();
        }
        if !open.is_empty() {
            tracing::debug!(count = open.len(), "closed all dialogs");
        }
        open
    }

    /// Change counter over every control and payload.
    ///
    /// Equal versions mean nothing observable changed in between.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.muted_words.version()
            + self.signin.version()
            + self.in_app_browser_consent.version()
            + self.link_warning.version()
    }
}

impl Default for DialogControls {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DialogControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogControls")
            .field("muted_words", &self.muted_words)
            .field("signin", &self.signin)
            .field("in_app_browser_consent", &self.in_app_browser_consent)
            .field("link_warning", &self.link_warning)
            .finish()
    }
}
