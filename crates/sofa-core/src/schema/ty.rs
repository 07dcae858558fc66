use crate::{attributes::Value, Error, Result};

use std::fmt;

/// Declared type of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyTy {
    String,
    Integer,
    Float,
    Boolean,
    Object,
    /// Any JSON value, stored untouched.
    Any,
    /// Ordered sequence of the inner type.
    Array(Box<PropertyTy>),
}

impl PropertyTy {
    /// Shorthand for `Array(String)`, the type of a collection of ids.
    pub fn string_array() -> PropertyTy {
        PropertyTy::Array(Box::new(PropertyTy::String))
    }

    /// Casts `value` to this type. `null` is accepted by every type.
    pub fn coerce(&self, name: &str, value: Value) -> Result<Value> {
        if value.is_null() {
            return Ok(value);
        }

        match (self, value) {
            (PropertyTy::Any, value) => Ok(value),
            (PropertyTy::String, Value::String(s)) => Ok(Value::String(s)),
            (PropertyTy::String, Value::Number(n)) => Ok(Value::String(n.to_string())),
            (PropertyTy::String, Value::Bool(b)) => Ok(Value::String(b.to_string())),
            (PropertyTy::Integer, Value::Number(n)) if n.is_i64() || n.is_u64() => {
                Ok(Value::Number(n))
            }
            (PropertyTy::Integer, Value::Number(n)) => match n.as_f64() {
                Some(f) if f.fract() == 0.0 => Ok(Value::from(f as i64)),
                _ => Err(mismatch(name, self, &Value::Number(n))),
            },
            (PropertyTy::Integer, Value::String(s)) => match s.trim().parse::<i64>() {
                Ok(i) => Ok(Value::from(i)),
                Err(_) => Err(mismatch(name, self, &Value::String(s))),
            },
            (PropertyTy::Float, Value::Number(n)) => Ok(Value::Number(n)),
            (PropertyTy::Float, Value::String(s)) => match s.trim().parse::<f64>() {
                Ok(f) => serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| mismatch(name, self, &Value::String(s.clone()))),
                Err(_) => Err(mismatch(name, self, &Value::String(s))),
            },
            (PropertyTy::Boolean, Value::Bool(b)) => Ok(Value::Bool(b)),
            (PropertyTy::Boolean, Value::String(s)) => match s.trim() {
                "true" | "1" => Ok(Value::Bool(true)),
                "false" | "0" => Ok(Value::Bool(false)),
                _ => Err(mismatch(name, self, &Value::String(s))),
            },
            (PropertyTy::Boolean, Value::Number(n)) => match n.as_i64() {
                Some(1) => Ok(Value::Bool(true)),
                Some(0) => Ok(Value::Bool(false)),
                _ => Err(mismatch(name, self, &Value::Number(n))),
            },
            (PropertyTy::Object, Value::Object(map)) => Ok(Value::Object(map)),
            (PropertyTy::Array(item), Value::Array(items)) => items
                .into_iter()
                .map(|value| item.coerce(name, value))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            (_, value) => Err(mismatch(name, self, &value)),
        }
    }
}

fn mismatch(name: &str, ty: &PropertyTy, value: &Value) -> Error {
    Error::validation(name, format!("expected {ty}, got {value}"))
}

impl fmt::Display for PropertyTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyTy::String => f.write_str("string"),
            PropertyTy::Integer => f.write_str("integer"),
            PropertyTy::Float => f.write_str("float"),
            PropertyTy::Boolean => f.write_str("boolean"),
            PropertyTy::Object => f.write_str("object"),
            PropertyTy::Any => f.write_str("any"),
            PropertyTy::Array(item) => write!(f, "[{item}]"),
        }
    }
}
