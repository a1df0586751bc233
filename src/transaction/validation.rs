//! Validation and normalization of client supplied transaction data.
//!
//! Both the REST handlers and the GraphQL mutations decode their input into a
//! [TransactionInput] and run it through [validate], so they reject bad input
//! with the same [Error] and the same message.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    Error,
    transaction::{Category, TransactionType},
};

/// An amount as sent by a client, either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number, e.g. `12.5`.
    Number(f64),
    /// A string holding a number, e.g. `"12.5"`.
    Text(String),
}

impl AmountInput {
    /// Zero and the empty string count as "not provided".
    fn is_blank(&self) -> bool {
        match self {
            AmountInput::Number(number) => *number == 0.0,
            AmountInput::Text(text) => text.is_empty(),
        }
    }

    fn parse(&self) -> Result<f64, Error> {
        let amount = match self {
            AmountInput::Number(number) => *number,
            AmountInput::Text(text) => text.trim().parse().map_err(|_| Error::InvalidAmount)?,
        };

        if amount.is_finite() && amount > 0.0 {
            Ok(amount)
        } else {
            Err(Error::InvalidAmount)
        }
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}

/// A field that should hold a string but may hold any JSON value.
///
/// Non-string values are kept so that [validate] can reject them with the
/// same error as an unknown string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    /// A JSON string.
    Text(String),
    /// Any other JSON value, e.g. `7` or `true`.
    Other(Value),
}

impl TextInput {
    /// The empty string, `false`, zero and empty arrays or objects count as "not provided".
    fn is_blank(&self) -> bool {
        match self {
            TextInput::Text(text) => text.is_empty(),
            TextInput::Other(value) => match value {
                Value::Null => true,
                Value::Bool(flag) => !flag,
                Value::Number(number) => number.as_f64() == Some(0.0),
                Value::String(text) => text.is_empty(),
                Value::Array(items) => items.is_empty(),
                Value::Object(fields) => fields.is_empty(),
            },
        }
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            TextInput::Text(text) => Some(text.as_str()),
            TextInput::Other(_) => None,
        }
    }
}

impl From<&str> for TextInput {
    fn from(value: &str) -> Self {
        TextInput::Text(value.to_owned())
    }
}

impl From<String> for TextInput {
    fn from(value: String) -> Self {
        TextInput::Text(value)
    }
}

/// The data a client sends to create or update a transaction.
///
/// Every field is optional here so that missing fields are reported by
/// [validate] rather than by the JSON decoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionInput {
    /// "expense" or "income".
    #[serde(rename = "type")]
    pub kind: Option<TextInput>,
    /// The amount, must be greater than zero.
    pub amount: Option<AmountInput>,
    /// The category name, required for expenses and ignored for income.
    pub category: Option<TextInput>,
    /// The date as "YYYY-MM-DD".
    pub date: Option<String>,
}

/// A transaction that passed [validate] and is ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTransaction {
    /// Whether this is an expense or income.
    pub kind: TransactionType,
    /// The amount, greater than zero.
    pub amount: f64,
    /// Set for expenses, always `None` for income.
    pub category: Option<Category>,
    /// The date as given by the client.
    pub date: String,
}

/// Check `input` against the rules for a transaction and normalize it.
///
/// The checks run in a fixed order and the first failure is returned:
/// 1. `type`, `amount` and `date` must be present and non-empty,
/// 2. `type` must be "expense" or "income",
/// 3. `amount` must be a number greater than zero,
/// 4. expenses must have one of the allowed categories.
///
/// Income always ends up without a category, whatever the client sent.
///
/// # Errors
/// Returns [Error::MissingFields], [Error::InvalidType], [Error::InvalidAmount],
/// [Error::MissingCategory] or [Error::InvalidCategory].
pub fn validate(input: &TransactionInput) -> Result<ValidatedTransaction, Error> {
    let kind = present(&input.kind);
    let amount = input.amount.as_ref().filter(|amount| !amount.is_blank());
    let date = non_empty(&input.date);

    let (Some(kind), Some(amount), Some(date)) = (kind, amount, date) else {
        return Err(Error::MissingFields);
    };

    let kind = TransactionType::try_from(kind.as_text().ok_or(Error::InvalidType)?)?;
    let amount = amount.parse()?;

    let category = match kind {
        TransactionType::Expense => {
            let category = present(&input.category).ok_or(Error::MissingCategory)?;
            let name = category.as_text().ok_or(Error::InvalidCategory)?;
            Some(Category::try_from(name)?)
        }
        TransactionType::Income => None,
    };

    Ok(ValidatedTransaction {
        kind,
        amount,
        category,
        date: date.to_owned(),
    })
}

fn present(value: &Option<TextInput>) -> Option<&TextInput> {
    value.as_ref().filter(|value| !value.is_blank())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        Error,
        transaction::{Category, TransactionType},
    };

    use super::{AmountInput, TextInput, TransactionInput, validate};

    fn expense(amount: AmountInput, category: Option<&str>) -> TransactionInput {
        TransactionInput {
            kind: Some("expense".into()),
            amount: Some(amount),
            category: category.map(TextInput::from),
            date: Some("2024-03-15".to_owned()),
        }
    }

    #[test]
    fn accepts_valid_expense() {
        let got = validate(&expense(12.5.into(), Some("Food"))).unwrap();

        assert_eq!(got.kind, TransactionType::Expense);
        assert_eq!(got.amount, 12.5);
        assert_eq!(got.category, Some(Category::Food));
        assert_eq!(got.date, "2024-03-15");
    }

    #[test]
    fn income_category_is_dropped() {
        let input = TransactionInput {
            kind: Some("income".into()),
            amount: Some(100.0.into()),
            category: Some("Rent".into()),
            date: Some("2024-03-15".to_owned()),
        };

        let got = validate(&input).unwrap();

        assert_eq!(got.category, None);
    }

    #[test]
    fn income_with_unknown_category_is_accepted() {
        let input = TransactionInput {
            kind: Some("income".into()),
            amount: Some(100.0.into()),
            category: Some("Salary".into()),
            date: Some("2024-03-15".to_owned()),
        };

        assert_eq!(validate(&input).unwrap().category, None);
    }

    #[test]
    fn missing_fields_are_rejected() {
        let mut input = expense(10.0.into(), Some("Food"));
        input.date = None;
        assert_eq!(validate(&input), Err(Error::MissingFields));

        let mut input = expense(10.0.into(), Some("Food"));
        input.kind = Some("".into());
        assert_eq!(validate(&input), Err(Error::MissingFields));

        assert_eq!(
            validate(&TransactionInput::default()),
            Err(Error::MissingFields)
        );
    }

    #[test]
    fn zero_amount_counts_as_missing() {
        assert_eq!(
            validate(&expense(0.0.into(), Some("Food"))),
            Err(Error::MissingFields)
        );
        assert_eq!(
            validate(&expense(AmountInput::Text(String::new()), Some("Food"))),
            Err(Error::MissingFields)
        );
    }

    #[test]
    fn missing_fields_are_checked_before_type() {
        let input = TransactionInput {
            kind: Some("transfer".into()),
            amount: None,
            category: None,
            date: Some("2024-03-15".to_owned()),
        };

        assert_eq!(validate(&input), Err(Error::MissingFields));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let mut input = expense(10.0.into(), Some("Food"));
        input.kind = Some("Expense".into());

        assert_eq!(validate(&input), Err(Error::InvalidType));
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        for amount in [
            AmountInput::Number(-1.0),
            AmountInput::Number(-0.01),
            AmountInput::Text("0".to_owned()),
            AmountInput::Text("-5".to_owned()),
            AmountInput::Text("abc".to_owned()),
            AmountInput::Text("inf".to_owned()),
        ] {
            assert_eq!(
                validate(&expense(amount.clone(), Some("Food"))),
                Err(Error::InvalidAmount),
                "amount {amount:?} should be rejected"
            );
        }
    }

    #[test]
    fn numeric_string_amount_is_parsed() {
        let got = validate(&expense(AmountInput::Text("42.10".to_owned()), Some("Misc"))).unwrap();

        assert_eq!(got.amount, 42.10);
    }

    #[test]
    fn expense_requires_category() {
        assert_eq!(
            validate(&expense(10.0.into(), None)),
            Err(Error::MissingCategory)
        );
        assert_eq!(
            validate(&expense(10.0.into(), Some(""))),
            Err(Error::MissingCategory)
        );
    }

    #[test]
    fn expense_category_must_be_allowed() {
        let error = validate(&expense(10.0.into(), Some("Groceries"))).unwrap_err();

        assert_eq!(error, Error::InvalidCategory);
        assert_eq!(
            error.to_string(),
            "Category must be one of ['Food', 'Misc', 'Rent', 'Travel']"
        );
    }

    #[test]
    fn decodes_json_with_string_amount() {
        let input: TransactionInput = serde_json::from_value(json!({
            "type": "expense",
            "amount": "19.99",
            "category": "Travel",
            "date": "2024-05-01"
        }))
        .unwrap();

        assert_eq!(input.amount, Some(AmountInput::Text("19.99".to_owned())));
        assert_eq!(validate(&input).unwrap().amount, 19.99);
    }

    #[test]
    fn decodes_json_with_null_and_absent_fields() {
        let input: TransactionInput = serde_json::from_value(json!({
            "type": "income",
            "category": null
        }))
        .unwrap();

        assert_eq!(input.amount, None);
        assert_eq!(validate(&input), Err(Error::MissingFields));
    }

    #[test]
    fn non_string_type_is_an_invalid_type() {
        let mut input = expense(10.0.into(), Some("Food"));
        input.kind = Some(TextInput::Other(json!(7)));

        assert_eq!(validate(&input), Err(Error::InvalidType));
    }

    #[test]
    fn falsy_type_counts_as_missing() {
        for value in [json!(false), json!(0), json!([]), json!({})] {
            let mut input = expense(10.0.into(), Some("Food"));
            input.kind = Some(TextInput::Other(value.clone()));

            assert_eq!(
                validate(&input),
                Err(Error::MissingFields),
                "type {value} should count as missing"
            );
        }
    }

    #[test]
    fn non_string_expense_category_is_invalid() {
        let mut input = expense(10.0.into(), None);
        input.category = Some(TextInput::Other(json!(["Food"])));

        assert_eq!(validate(&input), Err(Error::InvalidCategory));
    }

    #[test]
    fn falsy_expense_category_is_missing() {
        let mut input = expense(10.0.into(), None);
        input.category = Some(TextInput::Other(json!(false)));

        assert_eq!(validate(&input), Err(Error::MissingCategory));
    }

    #[test]
    fn income_ignores_category_of_any_json_type() {
        let input: TransactionInput = serde_json::from_value(json!({
            "type": "income",
            "amount": 5,
            "category": 7,
            "date": "2024-03-01"
        }))
        .unwrap();

        assert_eq!(input.category, Some(TextInput::Other(json!(7))));
        assert_eq!(validate(&input).unwrap().category, None);
    }
}
