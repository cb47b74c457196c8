//! Minimal evaluator for legacy condition expressions.
//!
//! An expression is an operator followed by a right-hand operand, for example
//! `>= 18`, `== {country}` or `includes "@"`. Anything before the operator is
//! ignored; the left-hand side is always the rule's dependent field.
//!
//! The operator is the first of `==`, `!=`, `>=`, `<=`, `>`, `<`, `includes`
//! found anywhere in the text, tried in that order. The operand is a field
//! reference in braces, a quoted string, `true`, `false`, `null`, a number, or
//! a bare word taken as a string.

use crate::coercion::{
    display, is_date_like, loose_eq, parse_number, to_number, to_timestamp_millis,
};
use rules_core::{DataValue, Record};
use std::cmp::Ordering;
use thiserror::Error;

/// Errors raised while parsing a condition expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    /// None of the supported operators occurs in the expression
    #[error("no supported operator in '{0}'")]
    MissingOperator(String),

    /// Nothing follows the operator
    #[error("missing right-hand operand in '{0}'")]
    MissingOperand(String),

    /// A `{` is not closed by a `}`
    #[error("unterminated field reference '{0}'")]
    UnterminatedReference(String),

    /// `{}` with no field name
    #[error("empty field reference in '{0}'")]
    EmptyReference(String),
}

/// Supported operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Ge,
    Le,
    Gt,
    Lt,
    Includes,
}

/// Operator tokens in lookup priority order.
const OPERATORS: [(&str, Operator); 7] = [
    ("==", Operator::Eq),
    ("!=", Operator::Ne),
    (">=", Operator::Ge),
    ("<=", Operator::Le),
    (">", Operator::Gt),
    ("<", Operator::Lt),
    ("includes", Operator::Includes),
];

/// Right-hand side of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// `{fieldName}`, resolved from the record at evaluation time
    Field(String),
    /// Literal value
    Literal(DataValue),
}

impl Operand {
    fn parse(text: &str, expression: &str) -> Result<Self, ExpressionError> {
        if let Some(inner) = text.strip_prefix('{') {
            let name = inner
                .strip_suffix('}')
                .ok_or_else(|| ExpressionError::UnterminatedReference(text.to_string()))?
                .trim();
            if name.is_empty() {
                return Err(ExpressionError::EmptyReference(expression.to_string()));
            }
            return Ok(Operand::Field(name.to_string()));
        }

        for quote in ['"', '\''] {
            if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
                return Ok(Operand::Literal(DataValue::String(
                    text[1..text.len() - 1].to_string(),
                )));
            }
        }

        let literal = match text {
            "true" => DataValue::Bool(true),
            "false" => DataValue::Bool(false),
            "null" => DataValue::Null,
            _ => match text.parse::<i64>() {
                Ok(i) => DataValue::Int(i),
                Err(_) => {
                    let number = parse_number(text);
                    if number.is_finite() {
                        DataValue::Float(number)
                    } else {
                        DataValue::String(text.to_string())
                    }
                }
            },
        };

        Ok(Operand::Literal(literal))
    }

    fn resolve<'a>(&'a self, record: &'a Record) -> Option<&'a DataValue> {
        match self {
            Operand::Field(name) => record.get(name),
            Operand::Literal(value) => Some(value),
        }
    }
}

/// A parsed condition expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub operator: Operator,
    pub operand: Operand,
}

impl Expression {
    /// Parses a condition expression.
    pub fn parse(text: &str) -> Result<Self, ExpressionError> {
        let (index, token, operator) = OPERATORS
            .iter()
            .find_map(|(token, operator)| text.find(token).map(|i| (i, *token, *operator)))
            .ok_or_else(|| ExpressionError::MissingOperator(text.to_string()))?;

        let rhs = text[index + token.len()..].trim();
        if rhs.is_empty() {
            return Err(ExpressionError::MissingOperand(text.to_string()));
        }

        Ok(Self {
            operator,
            operand: Operand::parse(rhs, text)?,
        })
    }

    /// Evaluates `subject <operator> operand` against a record.
    pub fn evaluate(&self, subject: Option<&DataValue>, record: &Record) -> bool {
        let operand = self.operand.resolve(record);

        match self.operator {
            Operator::Eq => loose_eq(subject, operand),
            Operator::Ne => !loose_eq(subject, operand),
            Operator::Ge => matches!(
                ordering(subject, operand),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Operator::Le => matches!(
                ordering(subject, operand),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Operator::Gt => ordering(subject, operand) == Some(Ordering::Greater),
            Operator::Lt => ordering(subject, operand) == Some(Ordering::Less),
            Operator::Includes => match subject {
                None | Some(DataValue::Null) => false,
                Some(value) => value.to_string().contains(&display(operand)),
            },
        }
    }
}

/// Orders two values: dates as instants, two strings as text, anything else
/// as numbers. `None` when the numbers are not comparable (NaN).
fn ordering(a: Option<&DataValue>, b: Option<&DataValue>) -> Option<Ordering> {
    if is_date_like(a) && is_date_like(b) {
        if let (Some(a), Some(b)) = (to_timestamp_millis(a), to_timestamp_millis(b)) {
            return a.partial_cmp(&b);
        }
    }
    if let (Some(DataValue::String(a)), Some(DataValue::String(b))) = (a, b) {
        return Some(a.as_str().cmp(b.as_str()));
    }
    to_number(a).partial_cmp(&to_number(b))
}
