//! Local validation of the checkout payment form.
//!
//! Validation runs entirely client-side, before any simulated payment
//! call; server-side validation of payment fields is out of scope.

/// The fields of the payment form, for per-field inline feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentField {
    FirstName,
    LastName,
    Email,
    CardNumber,
    Expiry,
    Cvv,
    Terms,
}

/// Raw form input as entered by the shopper.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
    pub accept_terms: bool,
}

/// Per-field validation failures, in form order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(Vec<(PaymentField, &'static str)>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The inline message for a field, if it failed validation.
    pub fn message_for(&self, field: PaymentField) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| *msg)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(PaymentField, &'static str)> {
        self.0.iter()
    }

    fn push(&mut self, field: PaymentField, message: &'static str) {
        self.0.push((field, message));
    }
}

impl PaymentForm {
    /// Validate every field; `Err` carries one message per failing field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.first_name.trim().is_empty() {
            errors.push(PaymentField::FirstName, "Please provide your first name.");
        }
        if self.last_name.trim().is_empty() {
            errors.push(PaymentField::LastName, "Please provide your last name.");
        }
        if !is_plausible_email(&self.email) {
            errors.push(PaymentField::Email, "Please provide a valid email.");
        }
        if !is_card_number(&self.card_number) {
            errors.push(
                PaymentField::CardNumber,
                "Please provide a valid 16-digit card number.",
            );
        }
        if !is_expiry(&self.expiry) {
            errors.push(
                PaymentField::Expiry,
                "Please provide a valid expiration date (MM/YY).",
            );
        }
        if !is_cvv(&self.cvv) {
            errors.push(PaymentField::Cvv, "Please provide a valid CVV.");
        }
        if !self.accept_terms {
            errors.push(PaymentField::Terms, "You must agree before submitting.");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

fn is_card_number(card: &str) -> bool {
    card.len() == 16 && card.bytes().all(|b| b.is_ascii_digit())
}

/// `MM/YY` with a month in 01-12.
fn is_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    if month.len() != 2 || year.len() != 2 {
        return false;
    }
    if !month.bytes().all(|b| b.is_ascii_digit()) || !year.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12))
}

fn is_cvv(cvv: &str) -> bool {
    (3..=4).contains(&cvv.len()) && cvv.bytes().all(|b| b.is_ascii_digit())
}
