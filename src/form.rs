use crate::{
    date,
    expense::{Expense, ExpenseData},
    CURRENCY_PRECISION,
};
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

const FORM_INVALID_MESSAGE: &str = "Invalid input values - please check your entered data!";

/// The editable fields of an expense form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Amount,
    Date,
    Description,
}

/// Raw text for a single field, plus whether the last submit found it valid
#[derive(Clone, Debug, PartialEq)]
pub struct FieldInput {
    pub value: String,
    pub is_valid: bool,
}

/// One or more fields failed validation. Each flag is `true` for a field that is
/// invalid.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{}", FORM_INVALID_MESSAGE)]
pub struct ValidationError {
    pub amount: bool,
    pub date: bool,
    pub description: bool,
}

/// The state of the add/edit expense form.
///
/// Fields start out valid, even when empty, so that errors are only shown once the
/// user has tried to submit.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseForm {
    amount: FieldInput,
    date: FieldInput,
    description: FieldInput,
}

impl FieldInput {
    fn new<S: Into<String>>(value: S) -> Self {
        FieldInput {
            value: value.into(),
            is_valid: true,
        }
    }
}

impl Default for ExpenseForm {
    fn default() -> Self {
        ExpenseForm {
            amount: FieldInput::new(""),
            date: FieldInput::new(""),
            description: FieldInput::new(""),
        }
    }
}

impl ExpenseForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fill the form with an expense that is being edited
    pub fn with_defaults(expense: &Expense) -> Self {
        ExpenseForm {
            amount: FieldInput::new(expense.amount.to_string()),
            date: FieldInput::new(expense.formatted_date()),
            description: FieldInput::new(expense.description.clone()),
        }
    }

    pub fn input(&self, field: Field) -> &FieldInput {
        match field {
            Field::Amount => &self.amount,
            Field::Date => &self.date,
            Field::Description => &self.description,
        }
    }

    /// Replace a field's text. The field is assumed valid until the next submit.
    pub fn set_input<S: Into<String>>(&mut self, field: Field, value: S) {
        let input = match field {
            Field::Amount => &mut self.amount,
            Field::Date => &mut self.date,
            Field::Description => &mut self.description,
        };
        *input = FieldInput::new(value);
    }

    pub fn is_invalid(&self) -> bool {
        !self.amount.is_valid || !self.date.is_valid || !self.description.is_valid
    }

    /// The form-level message to show under the fields, if any
    pub fn error_message(&self) -> Option<&'static str> {
        if self.is_invalid() {
            Some(FORM_INVALID_MESSAGE)
        } else {
            None
        }
    }

    /// Validate every field at once.
    ///
    /// On success the typed candidate is returned. On failure each field's validity
    /// flag is updated so the caller can highlight it, and nothing else happens.
    pub fn submit(&mut self) -> Result<ExpenseData, ValidationError> {
        let amount = parse_amount(&self.amount.value);
        let date = parse_date(&self.date.value);
        let description = parse_description(&self.description.value);

        self.amount.is_valid = amount.is_some();
        self.date.is_valid = date.is_some();
        self.description.is_valid = description.is_some();

        match (amount, date, description) {
            (Some(amount), Some(date), Some(description)) => Ok(ExpenseData {
                amount,
                date,
                description,
            }),
            (amount, date, description) => {
                let err = ValidationError {
                    amount: amount.is_none(),
                    date: date.is_none(),
                    description: description.is_none(),
                };

                debug!("expense form failed validation: {:?}", err);

                Err(err)
            }
        }
    }
}

/// A number worth at least one cent. Plain decimals and scientific notation are
/// both accepted, as a numeric keypad can produce either.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();

    // `Decimal` would otherwise accept digit separators like "1_000"
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }

    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
        .filter(|amount| amount.round_dp(CURRENCY_PRECISION) > Decimal::ZERO)
}

/// A real calendar day in `YYYY-MM-DD` form
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    date::parse_date(text)
}

/// Non-empty once surrounding whitespace is trimmed. The trimmed text is kept.
pub fn parse_description(text: &str) -> Option<String> {
    let text = text.trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::ExpenseId;
    use rust_decimal_macros::dec;

    fn filled(amount: &str, date: &str, description: &str) -> ExpenseForm {
        let mut form = ExpenseForm::new();
        form.set_input(Field::Amount, amount);
        form.set_input(Field::Date, date);
        form.set_input(Field::Description, description);
        form
    }

    #[test]
    fn parse_amount_rules() {
        assert_eq!(parse_amount("0"), None);
        assert_eq!(parse_amount("-5"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("12.50"), Some(dec!(12.50)));
        assert_eq!(parse_amount(" 7 "), Some(dec!(7)));
        assert_eq!(parse_amount("1e2"), Some(dec!(100)));
    }

    #[test]
    fn parse_amount_rejects_digit_separators() {
        assert_eq!(parse_amount("1_000"), None);
        assert_eq!(parse_amount("1,000"), None);
        assert_eq!(parse_amount("1000"), Some(dec!(1000)));
    }

    #[test]
    fn parse_amount_rejects_sub_cent() {
        assert_eq!(parse_amount("0.001"), None);
        assert_eq!(parse_amount("0.004"), None);
        assert_eq!(parse_amount("0.01"), Some(dec!(0.01)));
        assert_eq!(parse_amount("12.505"), Some(dec!(12.505)));
    }

    #[test]
    fn parse_date_rules() {
        assert_eq!(parse_date("2023-02-30"), None);
        assert_eq!(
            parse_date("2023-09-06"),
            NaiveDate::from_ymd_opt(2023, 9, 6)
        );
    }

    #[test]
    fn parse_description_rules() {
        assert_eq!(parse_description("   "), None);
        assert_eq!(parse_description("Coffee"), Some("Coffee".into()));
        assert_eq!(parse_description("  Coffee "), Some("Coffee".into()));
    }

    #[test]
    fn new_form_is_valid_and_empty() {
        let form = ExpenseForm::new();
        assert!(!form.is_invalid());
        assert_eq!(form.error_message(), None);
        assert_eq!(form.input(Field::Amount).value, "");
    }

    #[test]
    fn submit_valid_form() {
        let mut form = filled("19.99", "2023-09-06", "Coffee");
        assert_eq!(
            form.submit(),
            Ok(ExpenseData {
                amount: dec!(19.99),
                date: NaiveDate::from_ymd_opt(2023, 9, 6).unwrap(),
                description: "Coffee".into(),
            })
        );
        assert!(!form.is_invalid());
    }

    #[test]
    fn submit_flags_each_invalid_field() {
        let mut form = filled("0", "2023-02-30", "Coffee");
        assert_eq!(
            form.submit(),
            Err(ValidationError {
                amount: true,
                date: true,
                description: false,
            })
        );
        assert!(!form.input(Field::Amount).is_valid);
        assert!(!form.input(Field::Date).is_valid);
        assert!(form.input(Field::Description).is_valid);
        assert_eq!(form.error_message(), Some(FORM_INVALID_MESSAGE));
        // Values are kept so the user can correct them
        assert_eq!(form.input(Field::Amount).value, "0");
    }

    #[test]
    fn set_input_resets_validity() {
        let mut form = filled("-5", "2023-09-06", "   ");
        assert!(form.submit().is_err());
        assert!(!form.input(Field::Description).is_valid);

        form.set_input(Field::Description, "");
        assert!(form.input(Field::Description).is_valid);
        assert!(!form.input(Field::Amount).is_valid);

        // Still empty, so the next submit flags it again
        assert_eq!(
            form.submit(),
            Err(ValidationError {
                amount: true,
                date: false,
                description: true,
            })
        );
    }

    #[test]
    fn with_defaults_prefills_fields() {
        let expense = Expense {
            id: ExpenseId::new("e1"),
            description: "A book".into(),
            amount: dec!(14.99),
            date: NaiveDate::from_ymd_opt(2023, 9, 10).unwrap(),
        };
        let mut form = ExpenseForm::with_defaults(&expense);
        assert_eq!(form.input(Field::Amount).value, "14.99");
        assert_eq!(form.input(Field::Date).value, "2023-09-10");
        assert_eq!(form.input(Field::Description).value, "A book");

        let data = form.submit().unwrap();
        assert_eq!(Expense::new(expense.id.clone(), data), expense);
    }
}
