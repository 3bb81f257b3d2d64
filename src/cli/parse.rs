/// Parse a travel cost: finite and non-negative
pub fn parse_cost(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("cost must be finite and non-negative, got {s}"));
    }
    Ok(value)
}
