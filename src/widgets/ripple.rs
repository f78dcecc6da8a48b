use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};

use crate::dom;
use crate::error::SetupError;
use crate::page::PageContext;

/// Size and offset of a ripple, in px relative to the button's box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl RippleGeometry {
    /// A circle large enough to cover the button, centred on the click.
    pub fn from_click(
        rect_left: f64,
        rect_top: f64,
        width: f64,
        height: f64,
        client_x: f64,
        client_y: f64,
    ) -> Self {
        let size = width.max(height);
        Self {
            size,
            left: client_x - rect_left - size / 2.0,
            top: client_y - rect_top - size / 2.0,
        }
    }
}

fn spawn_ripple(button: &Element, event: &MouseEvent, lifetime_ms: u32) -> Result<(), SetupError> {
    let rect = button.get_bounding_client_rect();
    let geometry = RippleGeometry::from_click(
        rect.left(),
        rect.top(),
        rect.width(),
        rect.height(),
        f64::from(event.client_x()),
        f64::from(event.client_y()),
    );

    let document = button
        .owner_document()
        .ok_or(SetupError::MissingElement("document"))?;
    let ripple = document.create_element("span")?;
    dom::set_class(&ripple, "ripple", true);
    let size = format!("{}px", geometry.size);
    dom::set_style(&ripple, "width", &size);
    dom::set_style(&ripple, "height", &size);
    dom::set_style(&ripple, "left", &format!("{}px", geometry.left));
    dom::set_style(&ripple, "top", &format!("{}px", geometry.top));
    button.append_child(&ripple)?;

    Timeout::new(lifetime_ms, move || ripple.remove()).forget();
    Ok(())
}

pub fn attach(ctx: &PageContext) -> Result<(), SetupError> {
    let lifetime_ms = ctx.config.ripple_lifetime_ms;
    for button in dom::query_all(&ctx.document, ".btn") {
        let target = button.clone();
        dom::listen(&button, "click", move |e| {
            let Some(event) = e.dyn_ref::<MouseEvent>() else {
                return;
            };
            if let Err(e) = spawn_ripple(&target, event, lifetime_ms) {
                log::warn!("ripple skipped: {}", e);
            }
        })?;
    }
    Ok(())
}
