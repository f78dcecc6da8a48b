use crate::dom;
use crate::error::SetupError;
use crate::page::PageContext;

const ANIMATED: &str = ".slide-up, .feature-card, .service-card, .solution-card, .use-case-item";
const VISIBLE_FRACTION: f64 = 0.1;
const ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// CSS transition delay for the `index`-th animated element.
pub fn stagger_delay(index: usize, step_ms: u32) -> String {
    format!("{}ms", index as u64 * u64::from(step_ms))
}

pub fn attach(ctx: &PageContext) -> Result<(), SetupError> {
    let elements = dom::query_all(&ctx.document, ANIMATED);
    if elements.is_empty() {
        return Ok(());
    }

    for (index, element) in elements.iter().enumerate() {
        dom::set_class(element, "slide-up", true);
        dom::set_style(
            element,
            "transition-delay",
            &stagger_delay(index, ctx.config.reveal_stagger_ms),
        );
    }

    let observer = match dom::one_shot_observer(VISIBLE_FRACTION, Some(ROOT_MARGIN), |el| {
        dom::set_class(el, "visible", true);
    }) {
        Ok(observer) => observer,
        Err(e) => {
            // Without an observer nothing would ever become visible.
            for element in &elements {
                dom::set_class(element, "visible", true);
            }
            return Err(e);
        }
    };
    for element in &elements {
        observer.observe(element);
    }
    log::debug!("observing {} reveal elements", elements.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_grows_with_index() {
        assert_eq!(stagger_delay(0, 100), "0ms");
        assert_eq!(stagger_delay(3, 100), "300ms");
        assert_eq!(stagger_delay(12, 100), "1200ms");
    }
}
