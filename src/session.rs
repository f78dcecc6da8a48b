use chrono::{DateTime, Utc};

/// State that lives for exactly one page view: how far the visitor has
/// scrolled and when the page was opened.
#[derive(Debug, Clone)]
pub struct PageSession {
    max_scroll: u32,
    started_at: DateTime<Utc>,
}

impl PageSession {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            max_scroll: 0,
            started_at,
        }
    }

    pub fn max_scroll(&self) -> u32 {
        self.max_scroll
    }

    /// Raises the scroll high-water mark and returns the thresholds newly
    /// crossed by this sample, ascending. A sample at or below the mark
    /// changes nothing, so each threshold is returned at most once.
    pub fn record_scroll(&mut self, percent: u32, thresholds: &[u32]) -> Vec<u32> {
        if percent <= self.max_scroll {
            return Vec::new();
        }
        let previous = self.max_scroll;
        self.max_scroll = percent;
        thresholds
            .iter()
            .copied()
            .filter(|&t| percent >= t && previous < t)
            .collect()
    }

    /// Whole seconds since page load, rounded to the nearest second.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> i64 {
        let millis = (now - self.started_at).num_milliseconds();
        (millis as f64 / 1000.0).round() as i64
    }

    /// Dwell time to report for a timer tick, if it lands on an exact
    /// multiple of the interval.
    pub fn dwell_sample(&self, now: DateTime<Utc>, interval_secs: u32) -> Option<i64> {
        let interval = i64::from(interval_secs);
        let elapsed = self.elapsed_secs(now);
        (interval > 0 && elapsed > 0 && elapsed % interval == 0).then_some(elapsed)
    }
}

/// Vertical scroll position as a percentage of the scrollable distance.
/// `None` when the page is not scrollable.
pub fn scroll_percent(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> Option<u32> {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 || !scroll_y.is_finite() {
        return None;
    }
    let percent = (scroll_y / scrollable * 100.0).round().clamp(0.0, 100.0);
    Some(percent as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    const THRESHOLDS: [u32; 5] = [25, 50, 75, 90, 100];

    fn session() -> PageSession {
        PageSession::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn jump_fires_every_crossed_threshold_together() {
        let mut s = session();
        assert!(s.record_scroll(10, &THRESHOLDS).is_empty());
        assert_eq!(s.record_scroll(80, &THRESHOLDS), vec![25, 50, 75]);
        assert_eq!(s.max_scroll(), 80);
    }

    #[test]
    fn thresholds_fire_at_most_once() {
        let mut s = session();
        assert_eq!(s.record_scroll(30, &THRESHOLDS), vec![25]);
        assert!(s.record_scroll(10, &THRESHOLDS).is_empty());
        assert!(s.record_scroll(30, &THRESHOLDS).is_empty());
        assert_eq!(s.record_scroll(100, &THRESHOLDS), vec![50, 75, 90, 100]);
        assert!(s.record_scroll(100, &THRESHOLDS).is_empty());
    }

    #[test]
    fn high_water_mark_never_decreases() {
        let mut s = session();
        s.record_scroll(60, &THRESHOLDS);
        s.record_scroll(20, &THRESHOLDS);
        assert_eq!(s.max_scroll(), 60);
    }

    #[test]
    fn scroll_percent_rounds_and_clamps() {
        assert_eq!(scroll_percent(0.0, 2000.0, 1000.0), Some(0));
        assert_eq!(scroll_percent(254.0, 2000.0, 1000.0), Some(25));
        assert_eq!(scroll_percent(1000.0, 2000.0, 1000.0), Some(100));
        // Overscroll bounce on touch devices
        assert_eq!(scroll_percent(1100.0, 2000.0, 1000.0), Some(100));
        assert_eq!(scroll_percent(-40.0, 2000.0, 1000.0), Some(0));
    }

    #[test]
    fn unscrollable_page_has_no_percentage() {
        assert_eq!(scroll_percent(0.0, 800.0, 1000.0), None);
        assert_eq!(scroll_percent(0.0, 1000.0, 1000.0), None);
    }

    #[test]
    fn dwell_reports_only_exact_multiples() {
        let s = session();
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(s.dwell_sample(start + Duration::seconds(30), 30), Some(30));
        assert_eq!(s.dwell_sample(start + Duration::milliseconds(60_400), 30), Some(60));
        assert_eq!(s.dwell_sample(start + Duration::seconds(61), 30), None);
        assert_eq!(s.dwell_sample(start, 30), None);
    }
}
