//! Client-side validation for the contact form.
//!
//! Submission runs idle → validating → rejected | accepted. A rejected
//! submission is cancelled and annotated inline; an accepted one is left to
//! the browser's native form post.

use gloo_timers::callback::Timeout;
use once_cell::sync::Lazy;
use regex::Regex;
use web_sys::{Document, Element};

use crate::analytics::AnalyticsEvent;
use crate::dom;
use crate::error::SetupError;
use crate::page::PageContext;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

const ERROR_CLASS: &str = "error";
const ERROR_MESSAGE_CLASS: &str = "error-message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn element_id(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    fn selector(self) -> &'static str {
        match self {
            Field::Name => "#name",
            Field::Email => "#email",
            Field::Message => "#message",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct ContactSubmission<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub message: &'a str,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Checks the three required fields in form order. An empty result means
/// the submission may go ahead.
pub fn validate(submission: &ContactSubmission<'_>) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if submission.name.trim().is_empty() {
        errors.push(FieldError { field: Field::Name, message: "Name is required" });
    }

    if submission.email.trim().is_empty() {
        errors.push(FieldError { field: Field::Email, message: "Email is required" });
    } else if !is_valid_email(submission.email) {
        errors.push(FieldError {
            field: Field::Email,
            message: "Please enter a valid email address",
        });
    }

    if submission.message.trim().is_empty() {
        errors.push(FieldError { field: Field::Message, message: "Message is required" });
    }

    errors
}

pub fn submitted_event() -> AnalyticsEvent {
    AnalyticsEvent::new("form_submit")
        .category("Contact")
        .label("Contact Form")
        .goal("Contact Form Submission")
}

struct ContactFields {
    name: Element,
    email: Element,
    message: Element,
}

impl ContactFields {
    fn find(document: &Document) -> Result<Self, SetupError> {
        Ok(Self {
            name: dom::require(document, Field::Name.selector())?,
            email: dom::require(document, Field::Email.selector())?,
            message: dom::require(document, Field::Message.selector())?,
        })
    }

    fn element(&self, field: Field) -> &Element {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn value(&self, field: Field) -> String {
        dom::field_value(self.element(field)).unwrap_or_default()
    }
}

fn clear_errors(document: &Document) {
    for message in dom::query_all(document, &format!(".{}", ERROR_MESSAGE_CLASS)) {
        message.remove();
    }
    for field in dom::query_all(document, ".form-group input, .form-group textarea") {
        dom::set_class(&field, ERROR_CLASS, false);
    }
}

fn show_error(document: &Document, field: &Element, message: &str) -> Result<(), SetupError> {
    dom::set_class(field, ERROR_CLASS, true);
    let note = document.create_element("div")?;
    note.set_class_name(ERROR_MESSAGE_CLASS);
    note.set_text_content(Some(message));
    dom::set_style(&note, "color", "var(--error-color)");
    dom::set_style(&note, "font-size", "0.875rem");
    dom::set_style(&note, "margin-top", "0.25rem");
    dom::set_style(&note, "animation", "slideDown 0.3s ease-out");
    field.insert_adjacent_element("afterend", &note)?;
    Ok(())
}

pub fn attach(ctx: &PageContext) -> Result<(), SetupError> {
    let form = dom::require(&ctx.document, ".contact-form")?;
    let fields = ContactFields::find(&ctx.document)?;

    let document = ctx.document.clone();
    let analytics = ctx.analytics.clone();
    let pulse_ms = ctx.config.submit_pulse_ms;
    let form_el = form.clone();
    dom::listen(&form, "submit", move |event| {
        clear_errors(&document);

        let [name, email, message] = Field::ALL.map(|f| fields.value(f));
        let errors = validate(&ContactSubmission {
            name: &name,
            email: &email,
            message: &message,
        });

        if !errors.is_empty() {
            event.prevent_default();
            for error in &errors {
                if let Err(e) = show_error(&document, fields.element(error.field), error.message) {
                    log::warn!("could not annotate #{}: {}", error.field.element_id(), e);
                }
            }
            return;
        }

        analytics.report(&submitted_event());

        dom::set_style(&form_el, "opacity", "0.7");
        let form_el = form_el.clone();
        Timeout::new(pulse_ms, move || dom::set_style(&form_el, "opacity", "1")).forget();
    })
}
