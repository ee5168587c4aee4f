/// Display symbol and decimal exponent for the currencies the checkout shows.
fn currency_style(code: &str) -> Option<(&'static str, u32)> {
    match code {
        "USD" => Some(("$", 2)),
        "EUR" => Some(("€", 2)),
        "GBP" => Some(("£", 2)),
        "CAD" => Some(("CA$", 2)),
        "AUD" => Some(("A$", 2)),
        "JPY" => Some(("¥", 0)),
        _ => None,
    }
}

/// Renders an amount in minor units for display, e.g. `10000, "USD"` -> `$100.00`.
///
/// Unknown currency codes are rendered with two decimals followed by the code.
pub fn format_minor_units(cents: i64, currency: &str) -> String {
    let code = currency.trim().to_ascii_uppercase();
    let (symbol, exponent) = match currency_style(&code) {
        Some((symbol, exponent)) => (Some(symbol), exponent),
        None => (None, 2),
    };

    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    let number = if exponent == 0 {
        group_thousands(magnitude)
    } else {
        let scale = 10u64.pow(exponent);
        format!(
            "{}.{:0width$}",
            group_thousands(magnitude / scale),
            magnitude % scale,
            width = exponent as usize
        )
    };

    match symbol {
        Some(symbol) => format!("{sign}{symbol}{number}"),
        None if code.is_empty() => format!("{sign}{number}"),
        None => format!("{sign}{number} {code}"),
    }
}

/// Inserts `,` between groups of three digits, as en-US number formatting does.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// `round(amount * pct / 100)` with halves rounded towards positive infinity.
pub(crate) fn percent_of(amount: i64, pct: u8) -> i64 {
    (amount * i64::from(pct) + 50).div_euclid(100)
}
