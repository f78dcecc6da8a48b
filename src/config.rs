use log::Level;
use serde::Deserialize;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose widget attach logs when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Name of the `<body>` attribute a page can use to override [`SiteConfig`].
pub const CONFIG_ATTRIBUTE: &str = "data-site-config";

/// Tunables shared by the widgets. Every field has a default, so a page only
/// needs to spell out what it changes, e.g.
/// `<body data-site-config='{"pricing_path": "/plans"}'>`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub navbar_scroll_threshold: f64,
    pub back_to_top_threshold: f64,
    pub scroll_depth_thresholds: Vec<u32>,
    pub dwell_interval_secs: u32,
    pub reveal_stagger_ms: u32,
    pub ripple_lifetime_ms: u32,
    pub submit_pulse_ms: u32,
    pub consent_storage_key: String,
    pub pricing_path: String,
    pub blog_path_marker: String,
    /// Off on staging pages so test traffic stays out of the dashboards.
    pub analytics_enabled: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            navbar_scroll_threshold: 50.0,
            back_to_top_threshold: 300.0,
            scroll_depth_thresholds: vec![25, 50, 75, 90, 100],
            dwell_interval_secs: 30,
            reveal_stagger_ms: 100,
            ripple_lifetime_ms: 600,
            submit_pulse_ms: 100,
            consent_storage_key: "cookie-consent".to_string(),
            pricing_path: "/pricing".to_string(),
            blog_path_marker: "/blog/".to_string(),
            analytics_enabled: true,
        }
    }
}

impl SiteConfig {
    /// Parses a page override. Malformed JSON falls back to the defaults so a
    /// typo in markup never takes the widgets down with it.
    pub fn from_override(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };
        match serde_json::from_str::<SiteConfig>(raw) {
            Ok(mut config) => {
                config.scroll_depth_thresholds.sort_unstable();
                config.scroll_depth_thresholds.dedup();
                config
            }
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", CONFIG_ATTRIBUTE, e);
                Self::default()
            }
        }
    }

    /// Reads the override attribute from the live document.
    pub fn load(document: &web_sys::Document) -> Self {
        let raw = document
            .body()
            .and_then(|body| body.get_attribute(CONFIG_ATTRIBUTE));
        Self::from_override(raw.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_override_uses_defaults() {
        assert_eq!(SiteConfig::from_override(None), SiteConfig::default());
        assert_eq!(SiteConfig::from_override(Some("  ")), SiteConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = SiteConfig::from_override(Some(r#"{"pricing_path": "/plans"}"#));
        assert_eq!(config.pricing_path, "/plans");
        assert_eq!(config.navbar_scroll_threshold, 50.0);
        assert_eq!(config.consent_storage_key, "cookie-consent");
    }

    #[test]
    fn thresholds_are_normalised_ascending() {
        let config =
            SiteConfig::from_override(Some(r#"{"scroll_depth_thresholds": [90, 25, 50, 25]}"#));
        assert_eq!(config.scroll_depth_thresholds, vec![25, 50, 90]);
    }

    #[test]
    fn malformed_override_falls_back() {
        let config = SiteConfig::from_override(Some("{not json"));
        assert_eq!(config, SiteConfig::default());
    }
}
