use super::details::{CARD_NUMBER_DIGITS, CVV_DIGITS, CardDetails, Field, PaymentMethod, UpiDetails};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{2})$").expect("valid expiry pattern"));
static UPI_HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+$").expect("valid upi pattern"));
static UPI_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}@[a-zA-Z0-9.-]+$").expect("valid upi phone pattern"));

/// Inline messages for the fields that failed the last payment attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

pub fn message(field: Field) -> &'static str {
    match field {
        Field::CardNumber => "Please enter a valid 16-digit card number",
        Field::Expiry => "Please enter a valid expiry date (MM/YY)",
        Field::Cvv => "Please enter a valid 3-digit CVV",
        Field::CardholderName => "Please enter a valid cardholder name",
        Field::UpiId => "Please enter a valid UPI ID (e.g., name@paytm or 9876543210@upi)",
    }
}

fn all_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

pub fn is_valid_card_number(card_number: &str) -> bool {
    let cleaned: String = card_number.chars().filter(|c| !c.is_whitespace()).collect();
    all_digits(&cleaned, CARD_NUMBER_DIGITS)
}

/// `MM/YY` that has not expired as of `today`. A card expiring this month is valid.
pub fn is_valid_expiry(expiry: &str, today: NaiveDate) -> bool {
    let Some(caps) = EXPIRY_RE.captures(expiry) else {
        return false;
    };
    let (Ok(month), Ok(year)) = (caps[1].parse::<u32>(), caps[2].parse::<i32>()) else {
        return false;
    };
    (2000 + year, month) >= (today.year(), today.month())
}

pub fn is_valid_cvv(cvv: &str) -> bool {
    all_digits(cvv, CVV_DIGITS)
}

pub fn is_valid_cardholder_name(name: &str) -> bool {
    let trimmed = name.trim();
    trimmed.chars().count() >= 2
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}

pub fn is_valid_upi_id(upi_id: &str) -> bool {
    UPI_HANDLE_RE.is_match(upi_id) || UPI_PHONE_RE.is_match(upi_id)
}

/// Checks every field of the active method and reports all failures at once.
pub fn validate(
    method: PaymentMethod,
    card: &CardDetails,
    upi: &UpiDetails,
    today: NaiveDate,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let mut check = |ok: bool, field: Field| {
        if !ok {
            errors.insert(field, message(field));
        }
    };

    match method {
        PaymentMethod::Card => {
            check(is_valid_card_number(&card.card_number), Field::CardNumber);
            check(is_valid_expiry(&card.expiry, today), Field::Expiry);
            check(is_valid_cvv(&card.cvv), Field::Cvv);
            check(
                is_valid_cardholder_name(&card.cardholder_name),
                Field::CardholderName,
            );
        }
        PaymentMethod::Upi => check(is_valid_upi_id(&upi.upi_id), Field::UpiId),
    }
    errors
}
