use web_sys::{ScrollBehavior, ScrollToOptions};

use crate::dom;
use crate::error::SetupError;
use crate::page::PageContext;

pub fn is_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn attach(ctx: &PageContext) -> Result<(), SetupError> {
    let button = dom::require(&ctx.document, "#back-to-top")?;

    {
        let button = button.clone();
        let threshold = ctx.config.back_to_top_threshold;
        let page = ctx.clone();
        dom::listen(&ctx.window, "scroll", move |_| {
            dom::set_class(&button, "visible", is_visible(page.scroll_y(), threshold));
        })?;
    }

    let window = ctx.window.clone();
    dom::listen(&button, "click", move |_| {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_only_after_threshold() {
        assert!(!is_visible(0.0, 300.0));
        assert!(!is_visible(300.0, 300.0));
        assert!(is_visible(301.0, 300.0));
    }
}
