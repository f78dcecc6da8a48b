use web_sys::Element;

use crate::dom;
use crate::error::SetupError;
use crate::page::PageContext;

const FLOATING: &str = "floating-label";
const FOCUSED: &str = "focused";

/// Whether a field's container should stay `focused` after it loses focus.
pub fn keeps_focus_mark(value: &str) -> bool {
    !value.is_empty()
}

/// Marks the container and moves its label right after the field so
/// `input:focus + label` style rules apply. Runs once per container.
fn prepare_container(field: &Element) {
    let Some(group) = field.closest(".form-group").ok().flatten() else {
        return;
    };
    if dom::has_class(&group, FLOATING) {
        return;
    }
    dom::set_class(&group, FLOATING, true);

    let id = field.id();
    if id.is_empty() {
        return;
    }
    if let Some(label) = dom::query_in(&group, "label") {
        if label.get_attribute("for").as_deref() == Some(id.as_str()) {
            let _ = field.insert_adjacent_element("afterend", &label);
        }
    }
}

pub fn attach(ctx: &PageContext) -> Result<(), SetupError> {
    let form = dom::require(&ctx.document, ".contact-form")?;

    for field in dom::query_all_in(&form, "input, textarea") {
        prepare_container(&field);

        {
            let target = field.clone();
            dom::listen(&field, "focus", move |_| {
                if let Some(parent) = target.parent_element() {
                    dom::set_class(&parent, FOCUSED, true);
                }
            })?;
        }
        {
            let target = field.clone();
            dom::listen(&field, "blur", move |_| {
                let value = dom::field_value(&target).unwrap_or_default();
                if let Some(parent) = target.parent_element() {
                    if !keeps_focus_mark(&value) {
                        dom::set_class(&parent, FOCUSED, false);
                    }
                }
            })?;
        }

        let prefilled = dom::field_value(&field).map_or(false, |v| keeps_focus_mark(&v));
        if let Some(parent) = field.parent_element().filter(|_| prefilled) {
            dom::set_class(&parent, FOCUSED, true);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_drops_focus_mark() {
        assert!(!keeps_focus_mark(""));
    }

    #[test]
    fn any_content_keeps_focus_mark() {
        assert!(keeps_focus_mark("Ada"));
        // Matches the browser check: whitespace is still a value.
        assert!(keeps_focus_mark(" "));
    }
}
