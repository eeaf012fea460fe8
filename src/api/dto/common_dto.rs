//! Shared DTO types and field helpers used across endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// `{success, message}` acknowledgement.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    /// Successful acknowledgement carrying `message`.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl NumberOrString {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            Self::Unsigned(n) => Ok(n),
            Self::Float(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 => Ok(f as u64),
            Self::Float(f) => Err(E::custom(format!("expected a whole number, got {f}"))),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected a whole number, got '{s}'"))),
        }
    }
}

/// Deserializes a non-negative integer sent either as a JSON number or as
/// a numeric string (HTML forms post `"500"`).
///
/// # Errors
///
/// Fails on negative, fractional or non-numeric input.
pub fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    NumberOrString::deserialize(deserializer)?.into_u64()
}

/// Optional variant of [`number_or_string`]; `null` maps to `None`.
///
/// # Errors
///
/// Fails on negative, fractional or non-numeric input.
pub fn opt_number_or_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    Option::<NumberOrString>::deserialize(deserializer)?
        .map(NumberOrString::into_u64)
        .transpose()
}
