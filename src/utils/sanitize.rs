//! Input clean-up applied to registration fields before validation.

/// Trims surrounding whitespace and drops control characters and angle brackets.
pub fn sanitize_input(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !c.is_control() && *c != '<' && *c != '>')
        .collect()
}

/// Sanitizes an email address and lower-cases it.
pub fn sanitize_email(input: &str) -> String {
    sanitize_input(input).to_lowercase()
}
