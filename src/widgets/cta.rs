use crate::analytics::AnalyticsEvent;
use crate::dom;
use crate::error::SetupError;
use crate::page::PageContext;

const FALLBACK_LABEL: &str = "CTA Button";

/// Label for a call-to-action: its own text, else the text of a nested
/// `<span>` (icon buttons), else a generic name.
pub fn cta_label(text: &str, span_text: Option<&str>) -> String {
    [Some(text), span_text]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .unwrap_or(FALLBACK_LABEL)
        .to_string()
}

pub fn cta_event(label: &str, href: &str) -> AnalyticsEvent {
    AnalyticsEvent::new("click")
        .category("CTA")
        .label(label)
        .prop("button", label)
        .prop("href", href)
        .goal("CTA Click")
}

pub fn attach(ctx: &PageContext) -> Result<(), SetupError> {
    for button in dom::query_all(&ctx.document, ".btn-primary, .btn-secondary, .btn-link") {
        let target = button.clone();
        let analytics = ctx.analytics.clone();
        dom::listen(&button, "click", move |_| {
            let span_text = dom::query_in(&target, "span").map(|span| dom::text(&span));
            let label = cta_label(&dom::text(&target), span_text.as_deref());
            let href = target.get_attribute("href").unwrap_or_default();
            analytics.report(&cta_event(&label, &href));
        })?;
    }
    Ok(())
}
