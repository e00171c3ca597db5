use fluent_bundle::bundle::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use intl_memoizer::concurrent::IntlLangMemoizer;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use unic_langid::{LanguageIdentifier, langid};

const EN_US_FTL: &str = include_str!("../i18n/en-US.ftl");
const ZH_CN_FTL: &str = include_str!("../i18n/zh-CN.ftl");

type SyncFluentBundle = FluentBundle<Arc<FluentResource>, IntlLangMemoizer>;

/// The language used when a message is missing from the active one.
pub fn fallback_language() -> LanguageIdentifier {
    langid!("en-US")
}

fn embedded_resources() -> &'static [(LanguageIdentifier, Arc<FluentResource>)] {
    static RESOURCES: OnceLock<Vec<(LanguageIdentifier, Arc<FluentResource>)>> = OnceLock::new();
    RESOURCES.get_or_init(|| {
        [(langid!("en-US"), EN_US_FTL), (langid!("zh-CN"), ZH_CN_FTL)]
            .into_iter()
            .map(|(lang, source)| {
                let resource = FluentResource::try_new(source.to_owned())
                    .expect("Invalid Fluent resource embedded in locale-bridge-i18n/i18n");
                (lang, Arc::new(resource))
            })
            .collect()
    })
}

/// Formats messages from the embedded language bundles.
///
/// One bundle per embedded language, built once; the concurrent intl
/// memoizer keeps the whole translator `Send + Sync` so it can sit behind
/// the process-wide singleton.
pub struct Translator {
    bundles: Vec<(LanguageIdentifier, SyncFluentBundle)>,
    current: LanguageIdentifier,
}

impl Translator {
    pub fn new() -> Self {
        let bundles = embedded_resources()
            .iter()
            .map(|(lang, resource)| {
                let mut bundle = SyncFluentBundle::new_concurrent(vec![lang.clone()]);
                // The UI renders plain strings; keep bidi isolation marks out
                // of interpolated values.
                bundle.set_use_isolating(false);
                bundle
                    .add_resource(Arc::clone(resource))
                    .expect("embedded bundles must not carry duplicate message ids");
                (lang.clone(), bundle)
            })
            .collect();
        Self {
            bundles,
            current: fallback_language(),
        }
    }

    /// Languages with an embedded bundle.
    pub fn available_languages(&self) -> Vec<LanguageIdentifier> {
        self.bundles.iter().map(|(lang, _)| lang.clone()).collect()
    }

    pub fn current_language(&self) -> &LanguageIdentifier {
        &self.current
    }

    /// Selects `lang` when an embedded bundle matches it; range matching, so
    /// plain `en` selects `en-US`. Returns whether a bundle matched.
    pub fn select_language(&mut self, lang: &LanguageIdentifier) -> bool {
        for (bundle_lang, _) in &self.bundles {
            if lang.matches(bundle_lang, true, true) {
                self.current = bundle_lang.clone();
                return true;
            }
        }
        tracing::warn!(%lang, "no embedded bundle matches requested language");
        false
    }

    /// Formats the message `id` in the active language, falling back to
    /// [`fallback_language`] when the active bundle does not carry it.
    pub fn localize<'a>(
        &self,
        id: &str,
        args: Option<&HashMap<&str, FluentValue<'a>>>,
    ) -> Option<String> {
        self.format(&self.current, id, args).or_else(|| {
            let fallback = fallback_language();
            if self.current == fallback {
                return None;
            }
            self.format(&fallback, id, args)
        })
    }

    fn format<'a>(
        &self,
        lang: &LanguageIdentifier,
        id: &str,
        args: Option<&HashMap<&str, FluentValue<'a>>>,
    ) -> Option<String> {
        let (_, bundle) = self
            .bundles
            .iter()
            .find(|(bundle_lang, _)| bundle_lang == lang)?;
        let message = bundle.get_message(id)?;
        let pattern = message.value()?;

        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (key, value) in args {
                fluent_args.set(*key, value.clone());
            }
            fluent_args
        });

        let mut errors = Vec::new();
        let formatted = bundle.format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if errors.is_empty() {
            Some(formatted.into_owned())
        } else {
            tracing::error!(id, ?errors, "fluent formatting errors");
            None
        }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}
