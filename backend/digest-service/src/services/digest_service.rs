use serde_json::{Number, Value};
use sha2::{Digest, Sha256};

#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error("operation failed: {0}")]
    Internal(String),
}

pub trait Operations: Send + Sync {
    /// Sum every numeric leaf of `data` and return the hex SHA-256 of the decimal total.
    fn sum(&self, data: &Value) -> Result<String, OperationError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DigestService;

impl DigestService {
    pub fn new() -> Self {
        Self
    }
}

impl Operations for DigestService {
    fn sum(&self, data: &Value) -> Result<String, OperationError> {
        let total = numeric_sum(data);
        Ok(hex::encode(Sha256::digest(total.to_string().as_bytes())))
    }
}

/// Recursive sum over arrays and object values. Numbers are truncated toward
/// zero; strings, booleans and nulls count as zero.
pub fn numeric_sum(data: &Value) -> i64 {
    match data {
        Value::Array(items) => items
            .iter()
            .fold(0i64, |acc, item| acc.wrapping_add(numeric_sum(item))),
        Value::Object(fields) => fields
            .values()
            .fold(0i64, |acc, value| acc.wrapping_add(numeric_sum(value))),
        Value::Number(n) => truncate(n),
        Value::Null | Value::Bool(_) | Value::String(_) => 0,
    }
}

fn truncate(n: &Number) -> i64 {
    if let Some(i) = n.as_i64() {
        i
    } else if let Some(u) = n.as_u64() {
        i64::try_from(u).unwrap_or(i64::MAX)
    } else {
        // `as` truncates toward zero and saturates out-of-range floats
        n.as_f64().map(|f| f as i64).unwrap_or(0)
    }
}
