// Display formatting shared by the engine and the dashboard.

/// Whole currency units with thousands grouping, e.g. `-1234.6` -> `"-1,235"`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = format!("{:.0}", value.abs());
    let grouped = group_thousands(&rounded);
    if value < 0.0 && rounded.chars().any(|c| c != '0') {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Ratio rendered as a percentage with one decimal, e.g. `0.3918` -> `"39.2%"`.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

const SI_SUFFIXES: [(f64, &str); 8] = [
    (1e12, "T"),
    (1e9, "G"),
    (1e6, "M"),
    (1e3, "k"),
    (1.0, ""),
    (1e-3, "m"),
    (1e-6, "µ"),
    (1e-9, "n"),
];

/// Two significant digits with an SI prefix, e.g. `1480.0` -> `"1.5k"`, `389.0` -> `"390"`,
/// `0.05` -> `"50m"`. Values below one nano stay in nano units.
pub fn format_si(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", if value.is_finite() { 0.0 } else { value });
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    // Round to two significant digits before picking the suffix so 999.6k becomes 1.0M.
    let exponent = magnitude.log10().floor() as i32;
    let factor = 10f64.powi(exponent - 1);
    let rounded = (magnitude / factor).round() * factor;

    let (scale, suffix) = SI_SUFFIXES
        .iter()
        .copied()
        .find(|(scale, _)| rounded >= *scale)
        .unwrap_or((1e-9, "n"));
    // Drop division noise such as 9.999999999 so the digit count stays right.
    let scaled = (rounded / scale * 1e6).round() / 1e6;
    let decimals = (1 - scaled.log10().floor() as i32).max(0) as usize;
    format!("{}{:.*}{}", sign, decimals, scaled, suffix)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
