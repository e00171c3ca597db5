#![doc = include_str!("../README.md")]

pub mod capability;
pub mod error;
pub mod event;
pub mod manager;
pub mod preferences;

pub use capability::LocaleCapability;
pub use error::LocaleError;
pub use event::{EventEmitter, EventHandler, EventSource, LOCALE_CHANGED_EVENT, Subscription};
pub use manager::LocaleManager;
pub use preferences::LocalePreferences;
