use crate::{date, CURRENCY_PRECISION};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The backend-assigned identifier of a persisted expense
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

/// An expense that has been persisted and therefore has an id.
///
/// `Expense`s are never mutated in place. The store replaces them wholesale with
/// [`Expense::merged`] when an update arrives.
#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// A validated candidate expense that the backend hasn't assigned an id to yet.
///
/// This is also the wire record stored under each id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpenseData {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(serialize_with = "serialize_date", deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    pub description: String,
}

/// A partial set of fields to merge into an existing expense. Fields that are
/// `None` are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ExpenseUpdate {
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(
        serialize_with = "serialize_date_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExpenseId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        ExpenseId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Expense {
    /// Attach a backend-assigned id to a candidate
    pub fn new(id: ExpenseId, data: ExpenseData) -> Self {
        Expense {
            id,
            description: data.description,
            amount: data.amount,
            date: data.date,
        }
    }

    /// Returns a new `Expense` with the fields from `update` taking precedence.
    pub fn merged(&self, update: &ExpenseUpdate) -> Self {
        Expense {
            id: self.id.clone(),
            description: update
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            amount: update.amount.unwrap_or(self.amount),
            date: update.date.unwrap_or(self.date),
        }
    }

    /// The amount rounded to currency precision, e.g. "$19.99"
    pub fn formatted_amount(&self) -> String {
        format_amount(self.amount)
    }

    pub fn formatted_date(&self) -> String {
        date::formatted_date(self.date)
    }
}

impl ExpenseUpdate {
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

// A submitted form always carries every field, so it updates all of them.
impl From<ExpenseData> for ExpenseUpdate {
    fn from(data: ExpenseData) -> Self {
        ExpenseUpdate {
            amount: Some(data.amount),
            date: Some(data.date),
            description: Some(data.description),
        }
    }
}

pub(crate) fn format_amount(amount: Decimal) -> String {
    format!(
        "${:.*}",
        CURRENCY_PRECISION as usize,
        amount.round_dp(CURRENCY_PRECISION)
    )
}

fn serialize_date<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date::formatted_date(*value))
}

fn serialize_date_option<S: Serializer>(
    value: &Option<NaiveDate>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(d) => serialize_date(d, serializer),
        None => serializer.serialize_none(),
    }
}

fn deserialize_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let text = String::deserialize(deserializer)?;
    date::parse_date(&text)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid calendar date '{}'", text)))
}
