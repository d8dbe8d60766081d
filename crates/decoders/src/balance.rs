use serde_json::Value;

/// Canonical balance reported when the CLI prints nothing.
pub const ZERO_BALANCE: &str = "0";

/// Convert a raw `balance` call output into a canonical decimal string.
///
/// - empty or whitespace-only output is `"0"`
/// - a JSON string is returned verbatim
/// - a JSON number is truncated to `u64` (fractional part dropped)
/// - anything else has one surrounding pair of `"` stripped and is returned as-is
///
/// Balances are never routed through `f64` when they fit in a `u64`.
pub fn normalize_balance(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ZERO_BALANCE.to_string();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(s)) => return s,
        Ok(Value::Number(n)) => {
            let units = n
                .as_u64()
                .unwrap_or_else(|| n.as_f64().map(|f| f as u64).unwrap_or_default());
            return units.to_string();
        }
        _ => {}
    }

    let unquoted = trimmed.strip_prefix('"').unwrap_or(trimmed);
    unquoted.strip_suffix('"').unwrap_or(unquoted).to_string()
}
