//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Sensor serials as printed on device labels: alphanumeric with
    /// dashes/underscores, 1-64 chars, no leading separator.
    static ref SERIAL_NUMBER_RE: Regex =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]{0,63}$").expect("valid serial regex");
}

/// Returns true when the string is a well-formed sensor serial number.
pub fn is_valid_serial_number(serial: &str) -> bool {
    SERIAL_NUMBER_RE.is_match(serial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_serials() {
        assert!(is_valid_serial_number("sensor-1"));
        assert!(is_valid_serial_number("WH2_TH_004"));
        assert!(is_valid_serial_number("a"));
    }

    #[test]
    fn rejects_malformed_serials() {
        assert!(!is_valid_serial_number(""));
        assert!(!is_valid_serial_number("-leading-dash"));
        assert!(!is_valid_serial_number("has space"));
        assert!(!is_valid_serial_number("slash/inside"));
        assert!(!is_valid_serial_number(&"x".repeat(65)));
    }
}
