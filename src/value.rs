use crate::enums::FieldType;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl Value {
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::String(_) => FieldType::String,
            Value::Integer(_) => FieldType::Integer,
            Value::Float(_) => FieldType::Float,
            Value::Boolean(_) => FieldType::Boolean,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Boolean(v) => write!(f, "{v}"),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot convert '{value}' to {field_type}")]
pub struct CoerceError {
    pub value: String,
    pub field_type: FieldType,
}

pub type CoerceResult<T> = Result<T, CoerceError>;

impl FieldType {
    pub fn zero(&self) -> Value {
        match self {
            FieldType::String => Value::String(String::new()),
            FieldType::Integer => Value::Integer(0),
            FieldType::Float => Value::Float(0.0),
            FieldType::Boolean => Value::Boolean(false),
        }
    }

    pub fn coerce(&self, raw: &str) -> CoerceResult<Value> {
        let converted = match self {
            FieldType::String => Some(Value::String(raw.to_string())),
            FieldType::Integer => parse_integer(raw).map(Value::Integer),
            FieldType::Float => raw.parse::<f64>().ok().map(Value::Float),
            FieldType::Boolean => parse_bool(raw).map(Value::Boolean),
        };

        converted.ok_or_else(|| CoerceError {
            value: raw.to_string(),
            field_type: *self,
        })
    }

    pub fn coerce_or_zero(&self, raw: &str) -> Value {
        self.coerce(raw).unwrap_or_else(|_| self.zero())
    }
}

fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = trim_zero_fraction(raw);
    let (negative, digits) = match trimmed.as_bytes().first()? {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match digits.get(..2) {
        Some("0x") | Some("0X") => (16, &digits[2..]),
        Some("0o") | Some("0O") => (8, &digits[2..]),
        Some("0b") | Some("0B") => (2, &digits[2..]),
        _ => (10, digits),
    };

    // from_str_radix accepts its own sign, which must not follow ours
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }

    let magnitude = u64::from_str_radix(digits, radix).ok()?;
    if negative {
        if magnitude == i64::MIN.unsigned_abs() {
            Some(i64::MIN)
        } else {
            i64::try_from(magnitude).ok().map(|v| -v)
        }
    } else {
        i64::try_from(magnitude).ok()
    }
}

// "10.00" parses as 10
fn trim_zero_fraction(raw: &str) -> &str {
    match raw.rsplit_once('.') {
        Some((head, tail)) if !tail.is_empty() && tail.bytes().all(|b| b == b'0') => head,
        _ => raw,
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_coercion_accepts_prefixes_and_zero_fractions() {
        assert_eq!(FieldType::Integer.coerce("8080"), Ok(Value::Integer(8080)));
        assert_eq!(FieldType::Integer.coerce("-42"), Ok(Value::Integer(-42)));
        assert_eq!(FieldType::Integer.coerce("+7"), Ok(Value::Integer(7)));
        assert_eq!(FieldType::Integer.coerce("0x1F"), Ok(Value::Integer(31)));
        assert_eq!(FieldType::Integer.coerce("0b101"), Ok(Value::Integer(5)));
        assert_eq!(FieldType::Integer.coerce("0o17"), Ok(Value::Integer(15)));
        assert_eq!(FieldType::Integer.coerce("10.00"), Ok(Value::Integer(10)));
        assert_eq!(
            FieldType::Integer.coerce("-9223372036854775808"),
            Ok(Value::Integer(i64::MIN))
        );
    }

    #[test]
    fn integer_coercion_rejects_garbage() {
        for raw in ["", "-", "1.5", "abc", "--1", "+-1", "0x", "9223372036854775808"] {
            let err = FieldType::Integer
                .coerce(raw)
                .expect_err("coercion should fail");
            assert_eq!(err.field_type, FieldType::Integer);
            assert_eq!(err.value, raw);
        }
    }

    #[test]
    fn bool_coercion_follows_accepted_spellings() {
        assert_eq!(FieldType::Boolean.coerce("True"), Ok(Value::Boolean(true)));
        assert_eq!(FieldType::Boolean.coerce("0"), Ok(Value::Boolean(false)));
        assert!(FieldType::Boolean.coerce("yes").is_err());
    }

    #[test]
    fn failed_coercion_falls_back_to_zero_value() {
        assert_eq!(FieldType::Integer.coerce_or_zero("n/a"), Value::Integer(0));
        assert_eq!(FieldType::Float.coerce_or_zero(""), Value::Float(0.0));
        assert_eq!(FieldType::Boolean.coerce_or_zero("maybe"), Value::Boolean(false));
        assert_eq!(
            FieldType::String.coerce_or_zero("kept"),
            Value::String("kept".to_string())
        );
    }
}
