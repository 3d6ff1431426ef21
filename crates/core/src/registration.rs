//! Registration IDs and scanned QR payloads.
//!
//! Typed entries are validated strictly (digits only). Scanned payloads are
//! lenient: the ID is pulled out of a JSON object when present and every
//! non-digit character is discarded.

use std::fmt;

use serde::Serialize;
use serde_json::{Number, Value};

use crate::error::CoreError;

/// JSON keys a scanned payload may carry the registration ID under, in
/// priority order.
pub const SCAN_ID_KEYS: [&str; 3] = ["registrationid", "registrationId", "id"];

/// A non-empty, ASCII-digit-only registration ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RegistrationId(String);

impl RegistrationId {
    /// Validate a typed registration ID.
    ///
    /// Surrounding whitespace is trimmed; anything else that is not a digit
    /// is rejected rather than stripped.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidInput(
                "Please enter registration ID".to_string(),
            ));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidInput(
                "Registration ID must contain only numbers".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Scan payloads
// ---------------------------------------------------------------------------

/// Extract a registration ID from a decoded QR payload.
///
/// The payload is either a bare ID or a JSON object carrying one of
/// [`SCAN_ID_KEYS`]. Payloads that look like JSON but fail to parse are used
/// as-is. Non-digits are discarded from whatever was found.
pub fn extract_registration_id(payload: &str) -> Result<RegistrationId, CoreError> {
    let trimmed = payload.trim();
    let candidate = if trimmed.starts_with('{') || trimmed.starts_with('[') {
        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => id_from_json(&value)?,
            Err(_) => trimmed.to_string(),
        }
    } else {
        trimmed.to_string()
    };

    let digits: String = candidate.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(invalid_scan());
    }
    Ok(RegistrationId(digits))
}

/// First truthy ID value in a parsed payload. Arrays never carry an ID.
fn id_from_json(value: &Value) -> Result<String, CoreError> {
    let object = value.as_object().ok_or_else(invalid_scan)?;
    for candidate in SCAN_ID_KEYS.iter().filter_map(|key| object.get(*key)) {
        match candidate {
            Value::String(s) if !s.is_empty() => return Ok(s.clone()),
            Value::Number(n) => {
                if let Some(id) = whole_number(n)? {
                    return Ok(id);
                }
            }
            _ => {}
        }
    }
    Err(invalid_scan())
}

/// Decimal digits of a whole-valued number; zero is falsy and yields `None`.
///
/// `12345.0` and `1e5` read as `12345` and `100000`. Fractional values are
/// not IDs.
fn whole_number(n: &Number) -> Result<Option<String>, CoreError> {
    if let Some(u) = n.as_u64() {
        return Ok((u != 0).then(|| u.to_string()));
    }
    if let Some(i) = n.as_i64() {
        return Ok(Some(i.to_string()));
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => Ok(None),
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
            Ok(Some(format!("{f:.0}")))
        }
        _ => Err(invalid_scan()),
    }
}

fn invalid_scan() -> CoreError {
    CoreError::InvalidInput("Invalid QR code data".to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -----------------------------------------------------------------------
    // Typed entry
    // -----------------------------------------------------------------------

    #[test]
    fn digits_are_accepted() {
        let id = RegistrationId::parse("12345").unwrap();
        assert_eq!(id.as_str(), "12345");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let id = RegistrationId::parse("  0042\n").unwrap();
        assert_eq!(id.as_str(), "0042");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_matches!(
            RegistrationId::parse("   "),
            Err(CoreError::InvalidInput(msg)) if msg == "Please enter registration ID"
        );
    }

    #[test]
    fn non_digits_are_rejected_not_stripped() {
        for raw in ["abc12", "12 34", "12-34", "١٢٣", "+12"] {
            assert_matches!(
                RegistrationId::parse(raw),
                Err(CoreError::InvalidInput(_)),
                "{raw:?} should be rejected"
            );
        }
    }

    // -----------------------------------------------------------------------
    // Scanned payloads
    // -----------------------------------------------------------------------

    #[test]
    fn bare_numeric_payload() {
        assert_eq!(extract_registration_id("12345").unwrap().as_str(), "12345");
    }

    #[test]
    fn camel_case_json_key() {
        let id = extract_registration_id(r#"{"registrationId":"987"}"#).unwrap();
        assert_eq!(id.as_str(), "987");
    }

    #[test]
    fn lowercase_key_wins_over_later_keys() {
        let id = extract_registration_id(r#"{"id":"1","registrationid":"222"}"#).unwrap();
        assert_eq!(id.as_str(), "222");
    }

    #[test]
    fn numeric_id_value() {
        let id = extract_registration_id(r#"{"id": 5501}"#).unwrap();
        assert_eq!(id.as_str(), "5501");
    }

    #[test]
    fn whole_float_id_value_keeps_its_digits() {
        let id = extract_registration_id(r#"{"id": 12345.0}"#).unwrap();
        assert_eq!(id.as_str(), "12345");
    }

    #[test]
    fn exponent_id_value_is_expanded() {
        let id = extract_registration_id(r#"{"registrationid": 1e5}"#).unwrap();
        assert_eq!(id.as_str(), "100000");
    }

    #[test]
    fn fractional_id_value_is_rejected() {
        assert_matches!(
            extract_registration_id(r#"{"id": 123.45}"#),
            Err(CoreError::InvalidInput(msg)) if msg == "Invalid QR code data"
        );
    }

    #[test]
    fn zero_id_value_falls_through_to_next_key() {
        let id = extract_registration_id(r#"{"registrationid": 0, "id": "88"}"#).unwrap();
        assert_eq!(id.as_str(), "88");
    }

    #[test]
    fn empty_value_falls_through_to_next_key() {
        let id = extract_registration_id(r#"{"registrationid":"","id":"77"}"#).unwrap();
        assert_eq!(id.as_str(), "77");
    }

    #[test]
    fn non_digits_are_discarded() {
        let id = extract_registration_id("REG-00-1234").unwrap();
        assert_eq!(id.as_str(), "001234");
    }

    #[test]
    fn malformed_json_is_used_raw() {
        let id = extract_registration_id(r#"{registration: 314"#).unwrap();
        assert_eq!(id.as_str(), "314");
    }

    #[test]
    fn object_without_id_keys_is_invalid() {
        assert_matches!(
            extract_registration_id(r#"{"name":"Sam"}"#),
            Err(CoreError::InvalidInput(_))
        );
    }

    #[test]
    fn json_array_is_invalid() {
        assert_matches!(
            extract_registration_id(r#"["123"]"#),
            Err(CoreError::InvalidInput(_))
        );
    }

    #[test]
    fn payload_without_digits_is_invalid() {
        assert_matches!(
            extract_registration_id("hello"),
            Err(CoreError::InvalidInput(_))
        );
    }
}
