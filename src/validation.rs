//! Field validation for request payloads.
//!
//! Each payload declares its rules as a static table through [`Validate`].
//! Checking walks the table in declaration order and reports at most one
//! error per field: the first rule that fails.

use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidateEmail;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub error_message: String,
}

impl FieldError {
    pub fn new(field: &str, error_message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            error_message: error_message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    Required,
    Email,
    /// Optionally signed decimal number written as text, e.g. a phone number.
    Numeric,
    /// Minimum character count for text, minimum value for numbers.
    Min(f64),
    /// Maximum character count for text, maximum value for numbers.
    Max(f64),
    /// Strictly greater than.
    Gt(f64),
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    pub name: &'static str,
    pub value: FieldValue<'a>,
    pub rules: &'static [Rule],
}

impl<'a> Field<'a> {
    pub fn text(name: &'static str, value: &'a str, rules: &'static [Rule]) -> Self {
        Self {
            name,
            value: FieldValue::Text(value),
            rules,
        }
    }

    pub fn number(name: &'static str, value: f64, rules: &'static [Rule]) -> Self {
        Self {
            name,
            value: FieldValue::Number(value),
            rules,
        }
    }
}

pub trait Validate {
    /// The payload's fields paired with their rules, in report order.
    fn fields(&self) -> Vec<Field<'_>>;

    fn validate(&self) -> Vec<FieldError> {
        check_fields(&self.fields())
    }
}

impl Rule {
    fn tag(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Email => "email",
            Rule::Numeric => "numeric",
            Rule::Min(_) => "min",
            Rule::Max(_) => "max",
            Rule::Gt(_) => "gt",
            Rule::OneOf(_) => "oneof",
        }
    }

    fn param(&self) -> Option<String> {
        match self {
            Rule::Min(n) | Rule::Max(n) | Rule::Gt(n) => Some(n.to_string()),
            Rule::OneOf(options) => Some(options.join(" ")),
            Rule::Required | Rule::Email | Rule::Numeric => None,
        }
    }

    fn passes(&self, value: FieldValue<'_>) -> bool {
        match (self, value) {
            (Rule::Required, FieldValue::Text(s)) => !s.is_empty(),
            (Rule::Required, FieldValue::Number(n)) => n != 0.0,
            (Rule::Email, FieldValue::Text(s)) => s.validate_email(),
            (Rule::Email, FieldValue::Number(_)) => false,
            (Rule::Numeric, FieldValue::Text(s)) => is_numeric(s),
            (Rule::Numeric, FieldValue::Number(_)) => true,
            (Rule::Min(min), value) => measure(value) >= *min,
            (Rule::Max(max), value) => measure(value) <= *max,
            (Rule::Gt(bound), value) => measure(value) > *bound,
            (Rule::OneOf(options), FieldValue::Text(s)) => options.contains(&s),
            (Rule::OneOf(options), FieldValue::Number(n)) => {
                options.iter().any(|o| o.parse::<f64>().ok() == Some(n))
            }
        }
    }

    fn message(&self, field: &str) -> String {
        match self.param() {
            Some(param) => format!("{field} must contain {}={param}", self.tag()),
            None => format!("{field} must contain {}", self.tag()),
        }
    }
}

fn measure(value: FieldValue<'_>) -> f64 {
    match value {
        FieldValue::Text(s) => s.chars().count() as f64,
        FieldValue::Number(n) => n,
    }
}

fn is_numeric(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.is_none_or(all_digits)
}

/// Evaluate a rule table; one error per field, from its first failing rule.
pub fn check_fields(fields: &[Field<'_>]) -> Vec<FieldError> {
    fields
        .iter()
        .filter_map(|field| {
            field
                .rules
                .iter()
                .find(|rule| !rule.passes(field.value))
                .map(|rule| FieldError::new(field.name, rule.message(field.name)))
        })
        .collect()
}

/// Layer the password composition policy on top of existing field errors.
///
/// Leaves `errors` untouched when the password already failed a field rule,
/// and otherwise appends only the first composition class that is missing.
pub fn check_password(password: &str, mut errors: Vec<FieldError>) -> Vec<FieldError> {
    if errors.iter().any(|e| e.field == "password") {
        return errors;
    }

    let failure = if !password.chars().any(|c| c.is_ascii_uppercase()) {
        Some("password must contain at least one uppercase letter")
    } else if password.chars().any(|c| c.is_ascii_whitespace()) {
        Some("password must contain no space")
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("password must contain at least one digit number")
    } else if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some("password must contain at least one special letter")
    } else {
        None
    };

    if let Some(message) = failure {
        errors.push(FieldError::new("password", message));
    }
    errors
}

/// Turn a non-empty error list into a 422.
pub fn ensure_valid(errors: Vec<FieldError>) -> AppResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_accepts_signed_and_decimal_text() {
        assert!(is_numeric("08123456789"));
        assert!(is_numeric("+628123"));
        assert!(is_numeric("12.50"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("12a"));
        assert!(!is_numeric("1."));
        assert!(!is_numeric("+"));
    }

    #[test]
    fn length_rules_count_characters_not_bytes() {
        let fields = [Field::text("name", "ééé", &[Rule::Max(3.0)])];
        assert!(check_fields(&fields).is_empty());
    }

    #[test]
    fn oneof_rejects_empty_text_without_required() {
        let fields = [Field::text("role", "", &[Rule::OneOf(&["seller", "customer"])])];
        let errors = check_fields(&fields);
        assert_eq!(errors[0].error_message, "role must contain oneof=seller customer");
    }

    #[test]
    fn number_rules_compare_values() {
        let fields = [
            Field::number("price", 0.0, &[Rule::Gt(0.0)]),
            Field::number("stock", -1.0, &[Rule::Min(0.0)]),
            Field::number("category_id", 0.0, &[Rule::Required]),
        ];
        let messages: Vec<_> = check_fields(&fields)
            .into_iter()
            .map(|e| e.error_message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "price must contain gt=0",
                "stock must contain min=0",
                "category_id must contain required",
            ]
        );
    }
}
