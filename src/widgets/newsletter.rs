use crate::analytics::AnalyticsEvent;
use crate::dom;
use crate::error::SetupError;
use crate::page::PageContext;

pub fn signup_event() -> AnalyticsEvent {
    AnalyticsEvent::new("newsletter_signup")
        .category("Lead Generation")
        .label("Newsletter Subscription")
}

/// Reports each newsletter submission. The form still posts normally.
pub fn attach(ctx: &PageContext) -> Result<(), SetupError> {
    for form in dom::query_all(&ctx.document, ".newsletter-form") {
        let analytics = ctx.analytics.clone();
        dom::listen(&form, "submit", move |_| analytics.report(&signup_event()))?;
    }
    Ok(())
}
