#![doc = include_str!("../README.md")]

pub mod translator;

pub use translator::{Translator, fallback_language};
pub use unic_langid::{LanguageIdentifier, langid};

use fluent_bundle::FluentValue;
use locale_bridge::{LocaleManager, Subscription};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

static TRANSLATOR: OnceLock<Arc<RwLock<Translator>>> = OnceLock::new();

/// Initializes the process-wide translator.
///
/// Call once at the beginning of the application's lifecycle. Later calls
/// log a warning and have no effect.
pub fn init() {
    let translator = Arc::new(RwLock::new(Translator::new()));
    if TRANSLATOR.set(translator).is_ok() {
        tracing::info!("initialized embedded translations");
    } else {
        tracing::warn!("embedded translations already initialized");
    }
}

/// Selects the active language for the process-wide translator.
///
/// Logs an error when [`init`] has not been called yet.
pub fn select_language(lang: &LanguageIdentifier) {
    if let Some(translator) = TRANSLATOR.get() {
        translator.write().select_language(lang);
    } else {
        tracing::error!("translations not initialized; call init() first");
    }
}

/// Formats the message `id` in the active language.
///
/// `None` before [`init`], and for messages no embedded bundle carries.
pub fn localize<'a>(id: &str, args: Option<&HashMap<&str, FluentValue<'a>>>) -> Option<String> {
    TRANSLATOR
        .get()
        .and_then(|translator| translator.read().localize(id, args))
}

/// The active language, when initialized.
pub fn current_language() -> Option<LanguageIdentifier> {
    TRANSLATOR
        .get()
        .map(|translator| translator.read().current_language().clone())
}

/// Registers a locale-change listener that re-selects the translator
/// language whenever the device locale moves.
///
/// The platform delivers identifiers in `language_REGION` form; they are
/// mapped back to language tags before selection. Unknown payloads are
/// ignored. Returns `None` when the platform capability is absent, the same
/// silent degradation the manager itself applies.
pub fn attach(manager: &LocaleManager) -> Option<Subscription> {
    manager.add_change_listener(|preferences| {
        let Some(raw) = preferences.locale.as_deref() else {
            return;
        };
        match raw.replace('_', "-").parse::<LanguageIdentifier>() {
            Ok(lang) => select_language(&lang),
            Err(_) => tracing::warn!(locale = raw, "ignoring unparseable locale from platform"),
        }
    })
}
