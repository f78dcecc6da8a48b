//! Analytics reporting.
//!
//! Widgets describe what happened as an [`AnalyticsEvent`] and hand it to a
//! [`Reporter`]. The browser reporter forwards to the `gtag` and `plausible`
//! globals when the page has loaded them; with neither present every report is
//! a no-op, so analytics never affects page behaviour.

use std::collections::BTreeMap;

use js_sys::{Function, Reflect};
use serde::Serialize;
use serde_json::json;
use wasm_bindgen::{JsCast, JsValue};

/// One analytics hit. Serialises to the gtag parameter object:
/// `{event_category, event_label, value, ...props}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    #[serde(skip)]
    pub action: String,
    #[serde(rename = "event_category", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "event_label", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(flatten)]
    pub props: BTreeMap<String, String>,
    /// Plausible goal name. Only events carrying one are sent to Plausible.
    #[serde(skip)]
    pub goal: Option<String>,
}

impl AnalyticsEvent {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            category: None,
            label: None,
            value: None,
            props: BTreeMap::new(),
            goal: None,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }
}

pub trait Reporter {
    fn report(&self, event: &AnalyticsEvent);
}

/// Default reporter: swallows everything.
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&self, _event: &AnalyticsEvent) {}
}

/// Forwards to `window.gtag` / `window.plausible`. The globals are looked up on
/// every report because the SDK scripts are usually deferred and may finish
/// loading after the widgets attach.
pub struct BrowserReporter {
    window: web_sys::Window,
}

impl BrowserReporter {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }

    fn global_fn(&self, name: &str) -> Option<Function> {
        Reflect::get(&self.window, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }

    fn send_gtag(&self, event: &AnalyticsEvent) -> Result<(), JsValue> {
        let Some(gtag) = self.global_fn("gtag") else {
            return Ok(());
        };
        let params = event
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(JsValue::from)?;
        gtag.call3(
            &JsValue::NULL,
            &JsValue::from_str("event"),
            &JsValue::from_str(&event.action),
            &params,
        )?;
        Ok(())
    }

    fn send_plausible(&self, event: &AnalyticsEvent) -> Result<(), JsValue> {
        let Some(goal) = event.goal.as_deref() else {
            return Ok(());
        };
        let Some(plausible) = self.global_fn("plausible") else {
            return Ok(());
        };
        if event.props.is_empty() {
            plausible.call1(&JsValue::NULL, &JsValue::from_str(goal))?;
        } else {
            let options = json!({ "props": event.props })
                .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
                .map_err(JsValue::from)?;
            plausible.call2(&JsValue::NULL, &JsValue::from_str(goal), &options)?;
        }
        Ok(())
    }
}

impl Reporter for BrowserReporter {
    fn report(&self, event: &AnalyticsEvent) {
        log::debug!("analytics: {} {:?}", event.action, event.label);
        if let Err(e) = self.send_gtag(event) {
            log::warn!("gtag call failed: {:?}", e);
        }
        if let Err(e) = self.send_plausible(event) {
            log::warn!("plausible call failed: {:?}", e);
        }
    }
}
