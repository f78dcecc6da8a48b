use web_sys::Element;

use crate::dom;
use crate::error::SetupError;
use crate::page::PageContext;

const OPEN_CLASS: &str = "active";

/// Open/closed state of the mobile menu. The DOM class is the source of
/// truth; this only decides transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub open: bool,
}

impl MenuState {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Returns true when the click closed the menu.
    pub fn outside_click(&mut self, inside: bool) -> bool {
        if !inside && self.open {
            self.open = false;
            return true;
        }
        false
    }
}

pub fn navbar_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn is_current_link(href: Option<&str>, path: &str) -> bool {
    href == Some(path)
}

fn apply(toggle: &Element, menu: &Element, state: MenuState) {
    dom::set_class(menu, OPEN_CLASS, state.open);
    let _ = toggle.set_attribute("aria-expanded", if state.open { "true" } else { "false" });
}

pub fn attach_toggle(ctx: &PageContext) -> Result<(), SetupError> {
    let toggle = dom::require(&ctx.document, ".nav-toggle")?;
    let menu = dom::require(&ctx.document, ".nav-menu")?;

    {
        let toggle_el = toggle.clone();
        let menu = menu.clone();
        dom::listen(&toggle, "click", move |_| {
            let mut state = MenuState { open: dom::has_class(&menu, OPEN_CLASS) };
            state.toggle();
            apply(&toggle_el, &menu, state);
        })?;
    }

    let document = ctx.document.clone();
    dom::listen(&document, "click", move |e| {
        let target = e.target();
        let inside = dom::contains_target(&toggle, target.as_ref())
            || dom::contains_target(&menu, target.as_ref());
        let mut state = MenuState { open: dom::has_class(&menu, OPEN_CLASS) };
        if state.outside_click(inside) {
            apply(&toggle, &menu, state);
        }
    })
}

pub fn attach_scroll_style(ctx: &PageContext) -> Result<(), SetupError> {
    let navbar = dom::require(&ctx.document, ".navbar")?;
    let threshold = ctx.config.navbar_scroll_threshold;
    let page = ctx.clone();
    dom::listen(&ctx.window, "scroll", move |_| {
        dom::set_class(&navbar, "scrolled", navbar_scrolled(page.scroll_y(), threshold));
    })
}

pub fn attach_active_links(ctx: &PageContext) -> Result<(), SetupError> {
    let path = ctx.path();
    for link in dom::query_all(&ctx.document, ".nav-menu a") {
        if is_current_link(link.get_attribute("href").as_deref(), &path) {
            dom::set_class(&link, "active", true);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_click_closes_open_menu() {
        let mut state = MenuState { open: true };
        assert!(state.outside_click(false));
        assert!(!state.open);
    }

    #[test]
    fn inside_click_keeps_menu_open() {
        let mut state = MenuState { open: true };
        assert!(!state.outside_click(true));
        assert!(state.open);
    }

    #[test]
    fn outside_click_on_closed_menu_is_ignored() {
        let mut state = MenuState::default();
        assert!(!state.outside_click(false));
        assert!(!state.open);
    }

    #[test]
    fn toggle_flips() {
        let mut state = MenuState::default();
        state.toggle();
        assert!(state.open);
        state.toggle();
        assert!(!state.open);
    }

    #[test]
    fn navbar_styles_only_past_threshold() {
        assert!(!navbar_scrolled(0.0, 50.0));
        assert!(!navbar_scrolled(50.0, 50.0));
        assert!(navbar_scrolled(50.5, 50.0));
    }

    #[test]
    fn current_link_matches_exact_path() {
        assert!(is_current_link(Some("/"), "/"));
        assert!(is_current_link(Some("/services"), "/services"));
        assert!(!is_current_link(Some("/services"), "/services/web"));
        assert!(!is_current_link(None, "/"));
    }
}
