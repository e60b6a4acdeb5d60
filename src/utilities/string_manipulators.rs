use crate::utilities::constants::NOISE_MARKER;

/// Strips the `■` marker the wiki embeds in multi-value cells and trims
/// the surrounding whitespace. Idempotent.
pub fn sanitize_cell_text(input: &str) -> String {
    input.replace(NOISE_MARKER, "").trim().to_string()
}

/// Leading-digit integer parse: skips leading whitespace, accepts an
/// optional sign, reads decimal digits and ignores whatever follows
/// ("5 mana" is 5, "6000+" is 6000). No leading digits yields 0.
pub fn parse_leading_int(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }

    digits.parse::<i64>().map(|n| sign * n).unwrap_or(0)
}
