use web_sys::Element;

use crate::analytics::AnalyticsEvent;
use crate::dom;
use crate::error::SetupError;
use crate::page::PageContext;

const CARD_VISIBLE_FRACTION: f64 = 0.5;

/// Heading of a pricing card, or a positional name when it has none.
pub fn card_title(heading: Option<&str>, index: usize) -> String {
    match heading.map(str::trim).filter(|h| !h.is_empty()) {
        Some(heading) => heading.to_string(),
        None => format!("Pricing Tier {}", index + 1),
    }
}

pub fn page_view_event() -> AnalyticsEvent {
    AnalyticsEvent::new("page_view")
        .category("Pricing")
        .label("Pricing Page")
}

pub fn card_view_event(title: &str) -> AnalyticsEvent {
    AnalyticsEvent::new("pricing_card_view")
        .category("Pricing")
        .label(title)
}

pub fn cta_click_event(title: &str, index: usize) -> AnalyticsEvent {
    AnalyticsEvent::new("pricing_cta_click")
        .category("Pricing")
        .label(title)
        .value(index as i64 + 1)
}

/// Runs `setup` for every card. A card that fails is logged and skipped so
/// the cards after it still get wired. Returns how many succeeded.
pub fn setup_each<T, F>(cards: &[T], mut setup: F) -> usize
where
    F: FnMut(usize, &T) -> Result<(), SetupError>,
{
    let mut attached = 0;
    for (index, card) in cards.iter().enumerate() {
        match setup(index, card) {
            Ok(()) => attached += 1,
            Err(e) => log::warn!("pricing card {} not tracked: {}", index + 1, e),
        }
    }
    attached
}

fn setup_card(ctx: &PageContext, index: usize, card: &Element) -> Result<(), SetupError> {
    let heading = dom::query_in(card, "h3").map(|h| dom::text(&h));
    let title = card_title(heading.as_deref(), index);

    if let Some(cta) = dom::query_in(card, ".pricing-cta") {
        let analytics = ctx.analytics.clone();
        let title = title.clone();
        dom::listen(&cta, "click", move |_| {
            analytics.report(&cta_click_event(&title, index));
        })?;
    }

    // One observer per card keeps the title bound to its own callback.
    let analytics = ctx.analytics.clone();
    let observer = dom::one_shot_observer(CARD_VISIBLE_FRACTION, None, move |_| {
        analytics.report(&card_view_event(&title));
    })?;
    observer.observe(card);
    Ok(())
}

pub fn attach(ctx: &PageContext) -> Result<(), SetupError> {
    if ctx.path() != ctx.config.pricing_path {
        return Ok(());
    }
    ctx.analytics.report(&page_view_event());

    let cards = dom::query_all(&ctx.document, ".pricing-card");
    let attached = setup_each(&cards, |index, card| setup_card(ctx, index, card));
    log::debug!("tracking {} of {} pricing cards", attached, cards.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_prefers_heading() {
        assert_eq!(card_title(Some(" Growth "), 1), "Growth");
    }

    #[test]
    fn title_falls_back_to_position() {
        assert_eq!(card_title(None, 0), "Pricing Tier 1");
        assert_eq!(card_title(Some("   "), 2), "Pricing Tier 3");
    }

    #[test]
    fn cta_position_is_one_based() {
        let event = cta_click_event("Starter", 0);
        assert_eq!(event.value, Some(1));
        assert_eq!(event.label.as_deref(), Some("Starter"));
        assert_eq!(event.category.as_deref(), Some("Pricing"));
    }

    #[test]
    fn card_view_event_shape() {
        let event = card_view_event("Enterprise");
        assert_eq!(event.action, "pricing_card_view");
        assert_eq!(event.label.as_deref(), Some("Enterprise"));
    }

    #[test]
    fn failing_card_does_not_stop_later_cards() {
        let cards = ["Starter", "Growth", "Enterprise"];
        let mut seen = Vec::new();
        let attached = setup_each(&cards, |index, card| {
            seen.push(*card);
            if index == 1 {
                Err(SetupError::Js("IntersectionObserver unavailable".to_string()))
            } else {
                Ok(())
            }
        });
        assert_eq!(attached, 2);
        assert_eq!(seen, vec!["Starter", "Growth", "Enterprise"]);
    }
}
