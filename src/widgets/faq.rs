use web_sys::Element;

use crate::analytics::AnalyticsEvent;
use crate::dom;
use crate::error::SetupError;
use crate::page::PageContext;

/// Expanded flags for every FAQ item on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accordion {
    expanded: Vec<bool>,
}

impl Accordion {
    pub fn new(expanded: Vec<bool>) -> Self {
        Self { expanded }
    }

    pub fn expanded(&self) -> &[bool] {
        &self.expanded
    }

    /// Collapses every other item, then flips `index`. Returns whether the
    /// item ended up expanded. Out-of-range indices change nothing.
    pub fn toggle(&mut self, index: usize) -> bool {
        let Some(was_open) = self.expanded.get(index).copied() else {
            return false;
        };
        for (i, open) in self.expanded.iter_mut().enumerate() {
            *open = i == index && !was_open;
        }
        !was_open
    }
}

fn is_expanded(question: &Element) -> bool {
    question.get_attribute("aria-expanded").as_deref() == Some("true")
}

fn question_label(question: &Element) -> String {
    dom::query_in(question, "h3")
        .map(|h| dom::text(&h))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| dom::text(question))
}

pub fn view_event(question: &str) -> AnalyticsEvent {
    AnalyticsEvent::new("faq_view")
        .category("Engagement")
        .label(question)
}

fn on_question_click(ctx: &PageContext, question: &Element) {
    let Some(item) = question.closest(".faq-item").ok().flatten() else {
        return;
    };
    let items = dom::query_all(&ctx.document, ".faq-item");
    let Some(index) = items.iter().position(|i| *i == item) else {
        return;
    };

    let states = items
        .iter()
        .map(|i| {
            if *i == item {
                is_expanded(question)
            } else {
                dom::query_in(i, ".faq-question").map_or(false, |q| is_expanded(&q))
            }
        })
        .collect();
    let mut accordion = Accordion::new(states);
    let opened = accordion.toggle(index);

    for (i, open) in items.iter().zip(accordion.expanded()) {
        dom::set_class(i, "active", *open);
        let value = if *open { "true" } else { "false" };
        if *i == item {
            let _ = question.set_attribute("aria-expanded", value);
        } else if let Some(q) = dom::query_in(i, ".faq-question") {
            let _ = q.set_attribute("aria-expanded", value);
        }
    }

    if opened {
        ctx.analytics.report(&view_event(&question_label(question)));
    }
}

pub fn attach(ctx: &PageContext) -> Result<(), SetupError> {
    for question in dom::query_all(&ctx.document, ".faq-question") {
        let page = ctx.clone();
        let target = question.clone();
        dom::listen(&question, "click", move |_| on_question_click(&page, &target))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_count(a: &Accordion) -> usize {
        a.expanded().iter().filter(|o| **o).count()
    }

    #[test]
    fn expanding_b_collapses_a() {
        let mut accordion = Accordion::new(vec![true, false, false]);
        assert!(accordion.toggle(1));
        assert_eq!(accordion.expanded(), &[false, true, false]);
    }

    #[test]
    fn clicking_open_item_collapses_it() {
        let mut accordion = Accordion::new(vec![false, true]);
        assert!(!accordion.toggle(1));
        assert_eq!(open_count(&accordion), 0);
    }

    #[test]
    fn never_more_than_one_open() {
        // Markup may ship with several items pre-expanded.
        let mut accordion = Accordion::new(vec![true, true, false, true]);
        for index in [2, 0, 0, 3, 1, 1, 2] {
            accordion.toggle(index);
            assert!(open_count(&accordion) <= 1);
        }
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut accordion = Accordion::new(vec![true]);
        assert!(!accordion.toggle(4));
        assert_eq!(accordion.expanded(), &[true]);
    }

    #[test]
    fn view_event_carries_question() {
        let event = view_event("Do you offer support?");
        assert_eq!(event.action, "faq_view");
        assert_eq!(event.label.as_deref(), Some("Do you offer support?"));
    }
}
