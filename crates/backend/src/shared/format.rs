/// Форматирует число с разделителями тысяч (точками)
///
/// # Примеры
/// ```ignore
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut result = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result
}

/// Rounds to a fixed number of decimal places, halves away from zero
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Percentage of `part` in `total`, rounded to 2 decimals.
/// A zero total yields 0 instead of NaN/inf.
pub fn percent_share(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    round_to(part / total * 100.0, 2)
}
