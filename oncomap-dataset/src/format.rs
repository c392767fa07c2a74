/// Formats the integer part of a number with thousands separators.
///
/// The fraction is truncated toward zero. Returns `N/A` for non-finite values.
///
/// ```
/// use oncomap_dataset::format_number;
///
/// assert_eq!(format_number(1234567.89), "1,234,567");
/// assert_eq!(format_number(f64::NAN), "N/A");
/// ```
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_owned();
    }

    let integer = value.trunc();
    let digits = format!("{:.0}", integer.abs());

    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if integer < 0.0 {
        formatted.push('-');
    }

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.99), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(123456.0), "123,456");
        assert_eq!(format_number(-1234.5), "-1,234");
        assert_eq!(format_number(-0.5), "0");
        assert_eq!(format_number(f64::INFINITY), "N/A");
    }
}
