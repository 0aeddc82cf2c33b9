use std::fmt;

/// Money is stored as integer cents to keep recorded amounts exact.
/// €50.00 = 5000 cents. Only derived settlement figures use floating point.
pub type Cents = i64;

/// Format cents as a currency string with two decimal places.
/// Example: 5000 -> "50.00", 1 -> "0.01"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Format a fractional cents value (a derived balance or fair share) with two
/// decimal places. Rounds first so values within a rounding step of zero never
/// print as "-0.00".
pub fn format_balance(cents: f64) -> String {
    let units = cents.round() / 100.0;
    let units = if units == 0.0 { 0.0 } else { units };
    format!("{:.2}", units)
}

/// Parse a non-negative decimal string into cents.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "100" -> 10000, ".50" -> 50
///
/// Rejects negative values and anything more precise than a cent; an expense
/// amount is typed in by a person, so sub-cent input is a typo.
pub fn parse_cents(input: &str) -> Result<Cents, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() || input.starts_with('-') {
        return Err(ParseAmountError::InvalidFormat);
    }

    let (units_str, decimal_str) = match input.split_once('.') {
        Some((units, decimals)) => (units, decimals),
        None => (input, ""),
    };

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str
            .parse()
            .map_err(|_| ParseAmountError::InvalidFormat)?
    };

    let decimal_cents: i64 = match decimal_str.len() {
        0 => 0,
        // A single digit like "5" means 50 cents
        1 => {
            decimal_str
                .parse::<i64>()
                .map_err(|_| ParseAmountError::InvalidFormat)?
                * 10
        }
        2 => decimal_str
            .parse()
            .map_err(|_| ParseAmountError::InvalidFormat)?,
        _ => return Err(ParseAmountError::TooPrecise),
    };

    units
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(decimal_cents))
        .ok_or(ParseAmountError::InvalidFormat)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
    TooPrecise,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => {
                write!(f, "invalid amount, expected a positive number like 12.50")
            }
            ParseAmountError::TooPrecise => {
                write!(f, "amounts are tracked to the cent, use at most 2 decimals")
            }
        }
    }
}

impl std::error::Error for ParseAmountError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(5000), "50.00");
        assert_eq!(format_cents(1234), "12.34");
        assert_eq!(format_cents(1), "0.01");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-5000), "-50.00");
    }

    #[test]
    fn test_format_balance() {
        assert_eq!(format_balance(5000.0), "50.00");
        assert_eq!(format_balance(-3333.3333333), "-33.33");
        assert_eq!(format_balance(3333.3333333), "33.33");
        assert_eq!(format_balance(0.0), "0.00");
    }

    #[test]
    fn test_format_balance_never_negative_zero() {
        assert_eq!(format_balance(-0.0000001), "0.00");
        assert_eq!(format_balance(-0.4), "0.00");
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("50.00"), Ok(5000));
        assert_eq!(parse_cents("50"), Ok(5000));
        assert_eq!(parse_cents("12.34"), Ok(1234));
        assert_eq!(parse_cents("12.5"), Ok(1250));
        assert_eq!(parse_cents("0.01"), Ok(1));
        assert_eq!(parse_cents(".50"), Ok(50));
        assert_eq!(parse_cents(" 7.25 "), Ok(725));
    }

    #[test]
    fn test_parse_cents_invalid() {
        assert!(parse_cents("abc").is_err());
        assert!(parse_cents("").is_err());
        assert!(parse_cents("12.34.56").is_err());
        assert_eq!(parse_cents("-50.00"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_cents("1.999"), Err(ParseAmountError::TooPrecise));
    }

    #[test]
    fn test_parse_cents_rejects_amounts_beyond_cents_range() {
        // A unit part too large to represent in cents must error, not wrap
        assert_eq!(
            parse_cents("99999999999999999"),
            Err(ParseAmountError::InvalidFormat)
        );
        assert_eq!(
            parse_cents(&i64::MAX.to_string()),
            Err(ParseAmountError::InvalidFormat)
        );
        // The largest representable whole-unit amount still parses
        let max_units = i64::MAX / 100;
        assert_eq!(parse_cents(&max_units.to_string()), Ok(max_units * 100));
    }
}
