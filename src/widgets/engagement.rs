//! Scroll-depth and time-on-page reporting, driven by the page's
//! [`PageSession`](crate::session::PageSession).

use chrono::Utc;
use gloo_timers::callback::Interval;

use crate::analytics::{AnalyticsEvent, Reporter};
use crate::dom;
use crate::error::SetupError;
use crate::page::PageContext;
use crate::session::{scroll_percent, PageSession};

pub fn depth_event(threshold: u32) -> AnalyticsEvent {
    AnalyticsEvent::new("scroll_depth")
        .category("Engagement")
        .label(format!("{}%", threshold))
        .value(i64::from(threshold))
}

pub fn dwell_event(elapsed_secs: i64, interval_secs: u32) -> AnalyticsEvent {
    AnalyticsEvent::new("time_on_page")
        .category("Engagement")
        .label(format!("{} seconds", interval_secs))
        .value(elapsed_secs)
}

/// Feeds one scroll sample through the session and reports every threshold
/// it newly crossed.
pub fn on_scroll(
    session: &mut PageSession,
    percent: u32,
    thresholds: &[u32],
    analytics: &dyn Reporter,
) {
    let crossed = session.record_scroll(percent, thresholds);
    if crossed.is_empty() {
        return;
    }
    log::debug!("scroll depth now {}%", session.max_scroll());
    for threshold in crossed {
        analytics.report(&depth_event(threshold));
    }
}

fn attach_scroll_depth(ctx: &PageContext) -> Result<(), SetupError> {
    let page = ctx.clone();
    dom::listen(&ctx.window, "scroll", move |_| {
        let Some(root) = page.document.document_element() else {
            return;
        };
        let viewport = page
            .window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        let Some(percent) = scroll_percent(page.scroll_y(), f64::from(root.scroll_height()), viewport)
        else {
            return;
        };
        on_scroll(
            &mut page.session.borrow_mut(),
            percent,
            &page.config.scroll_depth_thresholds,
            page.analytics.as_ref(),
        );
    })
}

fn attach_dwell_timer(ctx: &PageContext) {
    let interval_secs = ctx.config.dwell_interval_secs;
    if interval_secs == 0 {
        return;
    }
    let session = ctx.session.clone();
    let analytics = ctx.analytics.clone();
    Interval::new(interval_secs.saturating_mul(1000), move || {
        let sample = session.borrow().dwell_sample(Utc::now(), interval_secs);
        if let Some(elapsed) = sample {
            analytics.report(&dwell_event(elapsed, interval_secs));
        }
    })
    .forget();
}

pub fn attach(ctx: &PageContext) -> Result<(), SetupError> {
    attach_dwell_timer(ctx);
    attach_scroll_depth(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::RecordingReporter;
    use chrono::TimeZone;

    const THRESHOLDS: [u32; 5] = [25, 50, 75, 90, 100];

    fn session() -> PageSession {
        PageSession::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn jump_reports_each_crossed_threshold() {
        let mut s = session();
        let reporter = RecordingReporter::default();
        on_scroll(&mut s, 10, &THRESHOLDS, &reporter);
        on_scroll(&mut s, 80, &THRESHOLDS, &reporter);

        let labels: Vec<Option<String>> =
            reporter.events.borrow().iter().map(|e| e.label.clone()).collect();
        assert_eq!(
            labels,
            vec![Some("25%".to_string()), Some("50%".to_string()), Some("75%".to_string())]
        );
    }

    #[test]
    fn scrolling_back_and_forth_reports_once() {
        let mut s = session();
        let reporter = RecordingReporter::default();
        for percent in [30, 0, 30, 55, 20, 55, 100, 100] {
            on_scroll(&mut s, percent, &THRESHOLDS, &reporter);
        }
        assert_eq!(reporter.actions().len(), 5);
        let values: Vec<Option<i64>> = reporter.events.borrow().iter().map(|e| e.value).collect();
        assert_eq!(values, vec![Some(25), Some(50), Some(75), Some(90), Some(100)]);
    }

    #[test]
    fn dwell_event_shape() {
        let event = dwell_event(90, 30);
        assert_eq!(event.action, "time_on_page");
        assert_eq!(event.label.as_deref(), Some("30 seconds"));
        assert_eq!(event.value, Some(90));
    }
}
