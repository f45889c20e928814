pub mod sales;
pub mod settings;

/// Parse a currency text input (`"1234"`, `"1234.5"`, `"1 234,50"`) into
/// non-negative integer cents. Returns `None` for anything else.
pub(crate) fn parse_money_cents(input: &str) -> Option<i64> {
    let normalized: String = input
        .trim()
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| if ch == ',' { '.' } else { ch })
        .collect();

    if normalized.is_empty() {
        return None;
    }

    let (whole, frac) = match normalized.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (normalized.as_str(), ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    if frac.len() > 2 || !frac.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }

    let whole_cents = if whole.is_empty() {
        0
    } else {
        whole.parse::<i64>().ok()?.checked_mul(100)?
    };
    let frac_cents = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse::<i64>().ok()?,
    };

    whole_cents.checked_add(frac_cents)
}

/// Collapse runs of whitespace and strip control characters from a
/// single-line text input.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_money_cents_accepts_common_shapes() {
        assert_eq!(parse_money_cents("1234"), Some(123_400));
        assert_eq!(parse_money_cents("12.5"), Some(1_250));
        assert_eq!(parse_money_cents("12.50"), Some(1_250));
        assert_eq!(parse_money_cents("1 234,50"), Some(123_450));
        assert_eq!(parse_money_cents("0"), Some(0));
        assert_eq!(parse_money_cents(".75"), Some(75));
    }

    #[test]
    fn parse_money_cents_rejects_garbage() {
        assert_eq!(parse_money_cents(""), None);
        assert_eq!(parse_money_cents("abc"), None);
        assert_eq!(parse_money_cents("-10"), None);
        assert_eq!(parse_money_cents("1.234"), None);
        assert_eq!(parse_money_cents("1.2.3"), None);
    }

    #[test]
    fn sanitize_inline_text_collapses_whitespace() {
        assert_eq!(sanitize_inline_text("  Acme \t Ltda  "), "Acme Ltda");
        assert_eq!(sanitize_inline_text("\u{7}plain"), "plain");
    }
}
