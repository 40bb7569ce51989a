#![forbid(unsafe_code)]

//! Integration tests: mounting the provider and driving dialogs through it.

use std::rc::Rc;
use std::sync::{Arc, Mutex};

use ftui_dialogs::{
    DialogControls, DialogControlsError, DialogControlsProvider, DialogName, LinkWarning,
    use_dialog_controls,
};
use tracing::Subscriber;
use tracing_subscriber::Registry;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

// ============================================================================
// Helpers
// ============================================================================

/// A widget that takes the registry as a constructor argument.
struct LinkButton {
    controls: Rc<DialogControls>,
    link: LinkWarning,
}

impl LinkButton {
    fn new(controls: Rc<DialogControls>, href: &str, text: &str) -> Self {
        Self {
            controls,
            link: LinkWarning::new(href, text),
        }
    }

    fn press(&self) {
        self.controls.link_warning.open(self.link.clone());
    }
}

#[derive(Clone, Default)]
struct CapturedEvents(Arc<Mutex<Vec<(tracing::Level, String)>>>);

struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for CapturedEvents {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.0
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.0));
    }
}

impl CapturedEvents {
    fn messages(&self) -> Vec<(tracing::Level, String)> {
        self.0.lock().unwrap().clone()
    }
}

// ============================================================================
// Provider
// ============================================================================

#[test]
fn every_dialog_is_reachable_inside_provider() {
    let _provider = DialogControlsProvider::mount();
    let controls = use_dialog_controls().unwrap();
    for name in DialogName::ALL {
        let control = controls.control(name);
        assert!(!control.is_open(), "{name} should start closed");
    }
}

#[test]
fn lookup_outside_provider_is_missing_provider() {
    let err = use_dialog_controls().unwrap_err();
    assert_eq!(err, DialogControlsError::MissingProvider);

    let provider = DialogControlsProvider::mount();
    drop(provider);
    assert_eq!(
        use_dialog_controls().unwrap_err(),
        DialogControlsError::MissingProvider
    );
}

#[test]
fn registry_identity_is_stable_across_lookups() {
    let _provider = DialogControlsProvider::mount();
    let first = use_dialog_controls().unwrap();
    let version = first.version();

    // A "re-render" that changes nothing.
    let second = use_dialog_controls().unwrap();
    second.muted_words.close();
    second.in_app_browser_consent.clear();

    assert!(Rc::ptr_eq(&first, &second));
    assert!(first.muted_words.ptr_eq(&second.muted_words));
    assert!(first.link_warning.ptr_eq(&second.link_warning));
    assert_eq!(second.version(), version);
}

// ============================================================================
// Link warning scenario
// ============================================================================

#[test]
fn link_warning_open_then_clear() {
    let _provider = DialogControlsProvider::mount();
    let controls = use_dialog_controls().unwrap();
    let payload = LinkWarning::new("https://example.com", "Example");

    controls.link_warning.open(payload.clone());
    assert_eq!(controls.link_warning.value(), Some(payload));
    assert!(controls.link_warning.control().is_open());

    controls.link_warning.clear();
    assert_eq!(controls.link_warning.value(), None);
    assert!(controls.link_warning.control().is_open());
}

#[test]
fn injected_widget_opens_link_warning() {
    let provider = DialogControlsProvider::mount();
    let button = LinkButton::new(provider.controls(), "https://example.com/a", "a");
    button.press();

    let controls = use_dialog_controls().unwrap();
    assert_eq!(controls.open_dialogs(), vec![DialogName::LinkWarning]);
    assert_eq!(
        controls
            .link_warning
            .with_value(|v| v.map(|w| w.href.clone())),
        Some("https://example.com/a".to_string())
    );
}

#[test]
fn close_all_then_reopen_consent() {
    let _provider = DialogControlsProvider::mount();
    let controls = use_dialog_controls().unwrap();
    controls.signin.open();
    controls
        .in_app_browser_consent
        .open("https://example.com/story".into());

    controls.close_all();
    assert!(!controls.is_any_open());

    controls
        .in_app_browser_consent
        .open("https://example.com/next".into());
    assert_eq!(
        controls.in_app_browser_consent.value().as_deref(),
        Some("https://example.com/next")
    );
    assert_eq!(
        controls.open_dialogs(),
        vec![DialogName::InAppBrowserConsent]
    );
}

// ============================================================================
// Logging
// ============================================================================

#[test]
fn transitions_and_missing_provider_are_logged() {
    let captured = CapturedEvents::default();
    let subscriber = Registry::default().with(captured.clone());

    tracing::subscriber::with_default(subscriber, || {
        let _ = use_dialog_controls();
        let _provider = DialogControlsProvider::mount();
        let controls = use_dialog_controls().unwrap();
        controls.signin.open();
        controls.signin.close();
    });

    let messages = captured.messages();
    assert!(
        messages
            .iter()
            .any(|(level, msg)| *level == tracing::Level::ERROR
                && msg.contains("outside of a DialogControlsProvider"))
    );
    assert!(messages.iter().any(|(_, msg)| msg == "dialog opened"));
    assert!(messages.iter().any(|(_, msg)| msg == "dialog closed"));
    assert!(
        messages
            .iter()
            .any(|(_, msg)| msg == "dialog controls mounted")
    );
}
