//! Contact form.
//!
//! Submission is local: a valid form posts a success toast and clears, an
//! invalid one posts an error toast and keeps whatever was typed.

use coatline_core::{Error, Result, Signal, signal};
use serde::{Deserialize, Serialize};

use crate::toast::Toasts;

pub const SUCCESS_MESSAGE: &str = "Thanks! We'll get back to you within one business day.";
pub const ERROR_MESSAGE: &str = "Please fill in your name, a valid email and a message.";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Company,
    Phone,
    Message,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl ContactForm {
    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Company => &mut self.company,
            Field::Phone => &mut self.phone,
            Field::Message => &mut self.message,
        }
    }

    /// All problems, in field order. Empty when the form can be sent.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError {
                field: Field::Name,
                message: "Name is required",
            });
        }
        if self.email.trim().is_empty() {
            errors.push(FieldError {
                field: Field::Email,
                message: "Email is required",
            });
        } else if !looks_like_email(self.email.trim()) {
            errors.push(FieldError {
                field: Field::Email,
                message: "Email address looks incomplete",
            });
        }
        if self.message.trim().is_empty() {
            errors.push(FieldError {
                field: Field::Message,
                message: "Message is required",
            });
        }
        errors
    }
}

/// `local@domain.tld` with no whitespace. Anything stricter belongs to the
/// mail server.
pub fn looks_like_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
}

/// Form state plus the submit rules.
pub struct ContactController {
    form: Signal<ContactForm>,
    errors: Signal<Vec<FieldError>>,
    toasts: Toasts,
}

impl ContactController {
    pub fn new(toasts: Toasts) -> Self {
        Self {
            form: signal(ContactForm::default()),
            errors: signal(Vec::new()),
            toasts,
        }
    }

    pub fn form(&self) -> ContactForm {
        self.form.get()
    }

    pub fn errors(&self) -> Vec<FieldError> {
        self.errors.get()
    }

    pub fn form_signal(&self) -> Signal<ContactForm> {
        self.form.clone()
    }

    pub fn errors_signal(&self) -> Signal<Vec<FieldError>> {
        self.errors.clone()
    }

    /// Editing a field clears its error.
    pub fn set(&self, field: Field, value: impl Into<String>) {
        let value = value.into();
        self.form.update(|f| *f.field_mut(field) = value);
        let stale = self.errors.with(|e| e.iter().any(|err| err.field == field));
        if stale {
            self.errors.update(|e| e.retain(|err| err.field != field));
        }
    }

    /// Returns the submitted form on success.
    pub fn submit(&self) -> Result<ContactForm> {
        let errors = self.form.with(ContactForm::validate);
        if !errors.is_empty() {
            let fields: Vec<_> = errors.iter().map(|e| format!("{:?}", e.field)).collect();
            log::debug!("contact form rejected: {}", fields.join(", "));
            self.errors.set(errors);
            self.toasts.error(ERROR_MESSAGE);
            return Err(Error::validation(format!(
                "invalid fields: {}",
                fields.join(", ")
            )));
        }

        let sent = self.form.get();
        log::info!("contact form submitted");
        self.form.set(ContactForm::default());
        self.errors.set_if_changed(Vec::new());
        self.toasts.success(SUCCESS_MESSAGE);
        Ok(sent)
    }
}
