//! Order types and decoding

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Empty order payload")]
    Empty,

    #[error("{0}")]
    Invalid(String),

    #[error("invalid literal for cantidad_producto: {value}")]
    Quantity { value: String },
}

pub type OrderResult<T> = Result<T, OrderError>;

/// `numero_pedido` may arrive as a string or a number
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OrderNumber {
    Text(String),
    Number(serde_json::Number),
}

impl OrderNumber {
    fn into_string(self) -> String {
        match self {
            OrderNumber::Text(s) => s,
            OrderNumber::Number(n) => n.to_string(),
        }
    }
}

/// Wire shape of an order
#[derive(Debug, Deserialize)]
struct OrderPayload {
    numero_pedido: OrderNumber,
    productos_detalle: Vec<LineItemPayload>,
    para_hora: String,
    #[serde(default)]
    cliente: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LineItemPayload {
    cantidad_producto: Value,
    nombre_producto: String,
}

/// A decoded order, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Order identifier, printed as the headline
    pub number: String,
    /// Products in the order they were received
    pub items: Vec<LineItem>,
    /// Pickup/ready time
    pub pickup_time: String,
    /// Customer name (optional, printed only when enabled)
    pub customer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub quantity: i64,
    pub name: String,
}

impl Order {
    /// Decode a request body
    ///
    /// Empty bodies and empty JSON values (`null`, `{}`, `[]`, `""`, `0`,
    /// `false`) are [`OrderError::Empty`]. Malformed JSON and missing or
    /// mistyped fields are [`OrderError::Invalid`]. A quantity that is not
    /// an integer is [`OrderError::Quantity`].
    pub fn from_json(body: &[u8]) -> OrderResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(OrderError::Empty);
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| OrderError::Invalid(format!("invalid JSON: {}", e)))?;

        Self::from_value(value)
    }

    /// Decode an already parsed JSON value
    pub fn from_value(value: Value) -> OrderResult<Self> {
        if is_empty_value(&value) {
            return Err(OrderError::Empty);
        }

        let payload: OrderPayload =
            serde_json::from_value(value).map_err(|e| OrderError::Invalid(e.to_string()))?;

        let items = payload
            .productos_detalle
            .into_iter()
            .map(|item| {
                Ok(LineItem {
                    quantity: coerce_quantity(&item.cantidad_producto)?,
                    name: item.nombre_producto,
                })
            })
            .collect::<OrderResult<Vec<_>>>()?;

        Ok(Self {
            number: payload.numero_pedido.into_string(),
            items,
            pickup_time: payload.para_hora,
            customer: payload.cliente,
        })
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Coerce a JSON quantity to an integer
///
/// Integers pass through, finite floats truncate toward zero, booleans count
/// as 1/0, strings must hold an integer literal. Anything else fails.
fn coerce_quantity(value: &Value) -> OrderResult<i64> {
    let invalid = || OrderError::Quantity {
        value: value.to_string(),
    };

    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(f.trunc() as i64)
                }
                _ => Err(invalid()),
            }
        }
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::String(s) => parse_int_literal(s).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// Parse a decimal integer literal
///
/// Surrounding whitespace and a leading sign are allowed, as are single
/// underscores between digits (`"1_000"`).
fn parse_int_literal(s: &str) -> Option<i64> {
    let s = s.trim();
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);

    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
        || !digits.chars().all(|c| c.is_ascii_digit() || c == '_')
    {
        return None;
    }

    let cleaned: String = s.chars().filter(|c| *c != '_').collect();
    cleaned.parse().ok()
}
