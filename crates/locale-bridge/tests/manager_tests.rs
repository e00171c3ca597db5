use async_trait::async_trait;
use locale_bridge::{
    EventEmitter, EventSource, LOCALE_CHANGED_EVENT, LocaleCapability, LocaleError, LocaleManager,
    LocalePreferences,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Capability double that replies with a scripted result and exposes its
/// emitter so tests can trigger change events.
struct ScriptedCapability {
    emitter: EventEmitter,
    reply: Reply,
}

enum Reply {
    Locale(Option<String>),
    Failure(&'static str),
}

impl ScriptedCapability {
    fn resolving(locale: &str) -> Self {
        Self {
            emitter: EventEmitter::new(),
            reply: Reply::Locale(Some(locale.to_owned())),
        }
    }

    fn failing(message: &'static str) -> Self {
        Self {
            emitter: EventEmitter::new(),
            reply: Reply::Failure(message),
        }
    }
}

#[async_trait]
impl LocaleCapability for ScriptedCapability {
    async fn get_locale(&self) -> Result<LocalePreferences, LocaleError> {
        match &self.reply {
            Reply::Locale(locale) => Ok(LocalePreferences {
                locale: locale.clone(),
            }),
            Reply::Failure(message) => Err(LocaleError::Platform(anyhow::anyhow!(*message))),
        }
    }

    fn event_source(&self) -> &dyn EventSource {
        &self.emitter
    }
}

fn manager_over(capability: Arc<ScriptedCapability>) -> LocaleManager {
    LocaleManager::new(Some(capability as Arc<dyn LocaleCapability>))
}

#[tokio::test]
async fn absent_capability_fails_every_query() {
    let manager = LocaleManager::new(None);
    assert!(!manager.is_available());

    for _ in 0..3 {
        let err = manager.get_locale().await.unwrap_err();
        assert!(matches!(err, LocaleError::CapabilityUnavailable));
        assert_eq!(err.to_string(), "native locale capability is unavailable");
    }
}

#[test]
fn absent_capability_registers_nothing() {
    let manager = LocaleManager::new(None);
    let invocations = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&invocations);
    let subscription = manager.add_change_listener(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert!(subscription.is_none());
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn present_capability_resolution_passes_through() {
    let manager = manager_over(Arc::new(ScriptedCapability::resolving("fr_FR")));
    assert!(manager.is_available());

    let preferences = manager.get_locale().await.unwrap();
    assert_eq!(preferences, LocalePreferences::new("fr_FR"));
}

#[tokio::test]
async fn present_capability_failure_passes_through_unmodified() {
    let manager = manager_over(Arc::new(ScriptedCapability::failing("locale service down")));

    let err = manager.get_locale().await.unwrap_err();
    assert!(matches!(err, LocaleError::Platform(_)));
    // Transparent pass-through keeps the platform's own message intact.
    assert_eq!(err.to_string(), "locale service down");
}

#[test]
fn listener_receives_each_change_exactly_once() {
    let capability = Arc::new(ScriptedCapability::resolving("en_US"));
    let manager = manager_over(Arc::clone(&capability));

    let received: Arc<Mutex<Vec<LocalePreferences>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);
    let subscription = manager
        .add_change_listener(move |preferences| sink.lock().push(preferences.clone()))
        .unwrap();

    capability
        .emitter
        .emit(LOCALE_CHANGED_EVENT, &LocalePreferences::new("de_DE"));

    assert_eq!(&*received.lock(), &[LocalePreferences::new("de_DE")]);
    subscription.release();
}

#[test]
fn every_listener_receives_the_same_payload() {
    let capability = Arc::new(ScriptedCapability::resolving("en_US"));
    let manager = manager_over(Arc::clone(&capability));

    let first: Arc<Mutex<Vec<LocalePreferences>>> = Arc::new(Mutex::new(Vec::new()));
    let second: Arc<Mutex<Vec<LocalePreferences>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&first);
    let _first_handle = manager
        .add_change_listener(move |preferences| sink.lock().push(preferences.clone()))
        .unwrap();
    let sink = Arc::clone(&second);
    let _second_handle = manager
        .add_change_listener(move |preferences| sink.lock().push(preferences.clone()))
        .unwrap();

    let payload = LocalePreferences::new("zh_CN");
    capability.emitter.emit(LOCALE_CHANGED_EVENT, &payload);

    assert_eq!(&*first.lock(), &[payload.clone()]);
    assert_eq!(&*second.lock(), &[payload]);
}

#[test]
fn released_subscription_stops_delivery_without_disturbing_others() {
    let capability = Arc::new(ScriptedCapability::resolving("en_US"));
    let manager = manager_over(Arc::clone(&capability));

    let released_count = Arc::new(AtomicUsize::new(0));
    let kept_count = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&released_count);
    let handle = manager
        .add_change_listener(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    let counter = Arc::clone(&kept_count);
    let _kept = manager
        .add_change_listener(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    capability
        .emitter
        .emit(LOCALE_CHANGED_EVENT, &LocalePreferences::new("de_DE"));
    handle.release();
    capability
        .emitter
        .emit(LOCALE_CHANGED_EVENT, &LocalePreferences::new("fr_FR"));

    assert_eq!(released_count.load(Ordering::SeqCst), 1);
    assert_eq!(kept_count.load(Ordering::SeqCst), 2);
}

#[test]
fn dropping_the_handle_keeps_the_listener_attached() {
    let capability = Arc::new(ScriptedCapability::resolving("en_US"));
    let manager = manager_over(Arc::clone(&capability));

    let invocations = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invocations);
    let handle = manager.add_change_listener(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    drop(handle);

    capability
        .emitter
        .emit(LOCALE_CHANGED_EVENT, &LocalePreferences::new("de_DE"));
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
}
