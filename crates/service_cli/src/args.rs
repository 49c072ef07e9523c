//! Parsers for `name=value` parameters and `name:low:high:count` axes.

use pricer_pricing::{AxisSpec, ModelParameters};

/// Parses a `name=value` parameter assignment.
pub fn parse_assignment(raw: &str) -> Result<(String, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in '{raw}'"));
    }
    let value = parse_number(value, raw)?;
    Ok((name.to_string(), value))
}

/// Parses a `name:low:high:count` sweep axis.
pub fn parse_axis(raw: &str) -> Result<AxisSpec, String> {
    let parts: Vec<&str> = raw.split(':').map(str::trim).collect();
    let [name, low, high, count] = parts.as_slice() else {
        return Err(format!("expected name:low:high:count, got '{raw}'"));
    };
    if name.is_empty() {
        return Err(format!("missing axis name in '{raw}'"));
    }
    let count = count
        .parse::<usize>()
        .map_err(|_| format!("count must be a non-negative integer in '{raw}'"))?;
    Ok(AxisSpec::new(
        *name,
        parse_number(low, raw)?,
        parse_number(high, raw)?,
        count,
    ))
}

/// Collects repeated assignments into a parameter map; later values win.
pub fn collect_parameters(assignments: &[(String, f64)]) -> ModelParameters {
    assignments.iter().cloned().collect()
}

fn parse_number(text: &str, raw: &str) -> Result<f64, String> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a number in '{raw}'", text.trim()))
}
