use std::fmt;
use std::str::FromStr;

use web_sys::Element;

use crate::analytics::{AnalyticsEvent, Reporter};
use crate::dom;
use crate::error::SetupError;
use crate::page::PageContext;
use crate::storage::{self, KeyValueStore};

/// The visitor's answer to the banner. Once stored it is never asked again;
/// only clearing site data brings the banner back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentChoice {
    Accepted,
    Declined,
}

impl ConsentChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            ConsentChoice::Accepted => "accepted",
            ConsentChoice::Declined => "declined",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ConsentChoice::Accepted => "Accepted",
            ConsentChoice::Declined => "Declined",
        }
    }
}

impl fmt::Display for ConsentChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsentChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accepted" => Ok(ConsentChoice::Accepted),
            "declined" => Ok(ConsentChoice::Declined),
            other => Err(format!("unknown consent value: {}", other)),
        }
    }
}

/// The banner shows until any non-empty value has been stored.
pub fn banner_visible(store: &dyn KeyValueStore, key: &str) -> bool {
    store.get(key).map_or(true, |value| value.is_empty())
}

/// Persists the choice and reports it. A storage failure is logged but does
/// not stop the report; the banner hides either way.
pub fn record_choice(
    store: &dyn KeyValueStore,
    key: &str,
    choice: ConsentChoice,
    analytics: &dyn Reporter,
) {
    if let Err(e) = store.set(key, choice.as_str()) {
        log::warn!("could not persist cookie consent: {}", e);
    }
    analytics.report(
        &AnalyticsEvent::new("cookie_consent")
            .category("Privacy")
            .label(choice.label()),
    );
}

fn show(banner: &Element, visible: bool) {
    dom::set_style(banner, "display", if visible { "block" } else { "none" });
}

pub fn attach(ctx: &PageContext) -> Result<(), SetupError> {
    let banner = dom::require(&ctx.document, "#cookie-consent")?;
    let store = storage::open(&ctx.window);
    let key = ctx.config.consent_storage_key.clone();

    if banner_visible(store.as_ref(), &key) {
        show(&banner, true);
    } else if let Some(value) = store.get(&key) {
        log::debug!("cookie consent already {:?}", value.parse::<ConsentChoice>());
    }

    for (selector, choice) in [
        ("#accept-cookies", ConsentChoice::Accepted),
        ("#decline-cookies", ConsentChoice::Declined),
    ] {
        let Some(button) = dom::query(&ctx.document, selector) else {
            continue;
        };
        let banner = banner.clone();
        let store = store.clone();
        let key = key.clone();
        let analytics = ctx.analytics.clone();
        dom::listen(&button, "click", move |_| {
            record_choice(store.as_ref(), &key, choice, analytics.as_ref());
            show(&banner, false);
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::RecordingReporter;
    use crate::storage::MemoryStore;

    const KEY: &str = "cookie-consent";

    #[test]
    fn first_visit_shows_banner() {
        let store = MemoryStore::default();
        assert!(banner_visible(&store, KEY));
    }

    #[test]
    fn accept_hides_banner_on_later_visits() {
        let store = MemoryStore::default();
        let reporter = RecordingReporter::default();
        record_choice(&store, KEY, ConsentChoice::Accepted, &reporter);
        assert_eq!(store.get(KEY).as_deref(), Some("accepted"));
        assert!(!banner_visible(&store, KEY));
    }

    #[test]
    fn decline_hides_banner_on_later_visits() {
        let store = MemoryStore::default();
        let reporter = RecordingReporter::default();
        record_choice(&store, KEY, ConsentChoice::Declined, &reporter);
        assert_eq!(store.get(KEY).as_deref(), Some("declined"));
        assert!(!banner_visible(&store, KEY));
    }

    #[test]
    fn empty_stored_value_still_shows_banner() {
        let store = MemoryStore::default();
        store.set(KEY, "").unwrap();
        assert!(banner_visible(&store, KEY));
    }

    #[test]
    fn choice_is_reported() {
        let store = MemoryStore::default();
        let reporter = RecordingReporter::default();
        record_choice(&store, KEY, ConsentChoice::Declined, &reporter);
        let events = reporter.events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, "cookie_consent");
        assert_eq!(events[0].category.as_deref(), Some("Privacy"));
        assert_eq!(events[0].label.as_deref(), Some("Declined"));
    }

    #[test]
    fn stored_values_parse() {
        assert_eq!("accepted".parse::<ConsentChoice>(), Ok(ConsentChoice::Accepted));
        assert_eq!("declined".parse::<ConsentChoice>(), Ok(ConsentChoice::Declined));
        assert!("maybe".parse::<ConsentChoice>().is_err());
        assert_eq!(ConsentChoice::Accepted.to_string(), "accepted");
    }
}
