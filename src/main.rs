use log::{debug, info, warn};

mod analytics;
mod config;
mod dom;
mod error;
mod page;
mod session;
mod storage;
mod widgets {
    pub mod back_to_top;
    pub mod contact_form;
    pub mod cookie_consent;
    pub mod cta;
    pub mod engagement;
    pub mod faq;
    pub mod floating_labels;
    pub mod nav;
    pub mod newsletter;
    pub mod pricing;
    pub mod reveal;
    pub mod ripple;
    pub mod share;
}

use error::SetupError;
use page::PageContext;

type Attach = fn(&PageContext) -> Result<(), SetupError>;

/// Every widget, attached independently. Order only matters where two
/// widgets touch the same markup: floating labels go after the contact form
/// so the form's submit listener is registered first.
const WIDGETS: &[(&str, Attach)] = &[
    ("nav toggle", widgets::nav::attach_toggle),
    ("navbar scroll style", widgets::nav::attach_scroll_style),
    ("active nav links", widgets::nav::attach_active_links),
    ("button ripple", widgets::ripple::attach),
    ("cta tracking", widgets::cta::attach),
    ("reveal animations", widgets::reveal::attach),
    ("back to top", widgets::back_to_top::attach),
    ("contact form", widgets::contact_form::attach),
    ("floating labels", widgets::floating_labels::attach),
    ("cookie consent", widgets::cookie_consent::attach),
    ("faq accordion", widgets::faq::attach),
    ("social share", widgets::share::attach),
    ("newsletter tracking", widgets::newsletter::attach),
    ("engagement tracking", widgets::engagement::attach),
    ("pricing analytics", widgets::pricing::attach),
];

fn attach_all(ctx: &PageContext) {
    for (name, attach) in WIDGETS {
        match attach(ctx) {
            Ok(()) => debug!("Attached {}", name),
            Err(SetupError::MissingElement(selector)) => {
                debug!("Skipping {}: no {} on this page", name, selector)
            }
            Err(e) => warn!("Could not attach {}: {}", name, e),
        }
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        warn!("No document, nothing to attach to");
        return;
    };

    info!("Starting site behaviors");
    let ready_document = document.clone();
    if let Err(e) = dom::on_ready(&ready_document, move || {
        let ctx = PageContext::new(window, document);
        attach_all(&ctx);
        info!("Site behaviors ready on {}", ctx.path());
    }) {
        warn!("Could not wait for DOMContentLoaded: {}", e);
    }
}
