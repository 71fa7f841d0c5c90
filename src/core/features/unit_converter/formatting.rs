use crate::shared::settings::MAX_PRECISION;

/// Format a conversion result for display and history.
///
/// Rounds to `precision` decimals (capped at [`MAX_PRECISION`]), then strips
/// trailing zeros and a dangling decimal point. Digits left of the decimal
/// point are never stripped, and negative zero renders as `0`.
///
/// Examples at precision 6: `1000.0 -> "1000"`, `12.5 -> "12.5"`,
/// `0.1234567 -> "0.123457"`.
pub fn format_result(value: f64, precision: u8) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "∞".to_string() } else { "-∞".to_string() };
    }

    let precision = usize::from(precision.min(MAX_PRECISION));
    let mut text = format!("{:.*}", precision, value);

    if text.contains('.') {
        let trimmed_len = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed_len);
    }

    if text == "-0" {
        text = "0".to_string();
    }
    text
}
