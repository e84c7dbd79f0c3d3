use crate::error::WizardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const CARD_NUMBER_DIGITS: usize = 16;
pub const EXPIRY_DIGITS: usize = 4;
pub const CVV_DIGITS: usize = 3;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    Upi,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Card => f.write_str("card"),
            PaymentMethod::Upi => f.write_str("upi"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "upi" => Ok(PaymentMethod::Upi),
            other => Err(WizardError::InvalidEvent(format!(
                "unknown payment method '{other}'"
            ))),
        }
    }
}

/// An input on the detail-entry step.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CardNumber,
    #[serde(alias = "expiry_date")]
    Expiry,
    Cvv,
    CardholderName,
    UpiId,
}

impl Field {
    /// The payment method whose form owns this field.
    pub fn method(&self) -> PaymentMethod {
        match self {
            Field::UpiId => PaymentMethod::Upi,
            _ => PaymentMethod::Card,
        }
    }

    /// Whether the field holds card data that must stay out of logs.
    pub fn is_sensitive(&self) -> bool {
        matches!(self, Field::CardNumber | Field::Cvv)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::CardNumber => "cardNumber",
            Field::Expiry => "expiryDate",
            Field::Cvv => "cvv",
            Field::CardholderName => "cardholderName",
            Field::UpiId => "upiId",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardDetails {
    /// Digits grouped in fours, e.g. `4111 1111 1111 1111`.
    pub card_number: String,
    /// `MM/YY` as typed so far.
    pub expiry: String,
    pub cvv: String,
    pub cardholder_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpiDetails {
    pub upi_id: String,
}

impl CardDetails {
    pub fn edit(&mut self, field: Field, input: &str) {
        match field {
            Field::CardNumber => self.card_number = format_card_number(input),
            Field::Expiry => self.expiry = format_expiry(input),
            Field::Cvv => self.cvv = format_cvv(input),
            Field::CardholderName => self.cardholder_name = input.to_string(),
            Field::UpiId => {}
        }
    }
}

impl UpiDetails {
    pub fn edit(&mut self, field: Field, input: &str) {
        if field == Field::UpiId {
            self.upi_id = input.to_string();
        }
    }
}

fn digits(input: &str, cap: usize) -> String {
    input.chars().filter(char::is_ascii_digit).take(cap).collect()
}

/// Keeps the first 16 digits and separates them in groups of four.
pub fn format_card_number(input: &str) -> String {
    let raw = digits(input, CARD_NUMBER_DIGITS);
    let mut out = String::with_capacity(raw.len() + raw.len() / 4);
    for (i, c) in raw.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Keeps the first 4 digits; a slash follows the month once two digits exist.
pub fn format_expiry(input: &str) -> String {
    let raw = digits(input, EXPIRY_DIGITS);
    if raw.len() >= 2 {
        format!("{}/{}", &raw[..2], &raw[2..])
    } else {
        raw
    }
}

pub fn format_cvv(input: &str) -> String {
    digits(input, CVV_DIGITS)
}
