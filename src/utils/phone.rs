//! Phone number helpers for log output

/// Mask a phone number for logging, keeping only the last four digits
///
/// Non-digit characters other than a leading `+` are dropped, so
/// `"+1 (555) 123-4567"` becomes `"+*******4567"`. Numbers with four or fewer
/// digits are masked entirely.
pub fn mask_phone_number(number: &str) -> String {
    let trimmed = number.trim();
    let prefix = if trimmed.starts_with('+') { "+" } else { "" };
    let digits: Vec<char> = trimmed.chars().filter(char::is_ascii_digit).collect();

    if digits.len() <= 4 {
        return format!("{prefix}{}", "*".repeat(digits.len()));
    }

    let visible: String = digits[digits.len() - 4..].iter().collect();
    format!("{prefix}{}{visible}", "*".repeat(digits.len() - 4))
}
