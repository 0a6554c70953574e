use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Reads a number that may arrive as JSON, as text, or not at all. Values that
/// are not numbers become `None` instead of failing the whole record.
fn lenient_f64_value<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrString::Number(n)) => Some(n),
        Some(NumberOrString::Text(s)) => s.trim().parse().ok(),
        None => None,
    }
    .filter(|n: &f64| n.is_finite()))
}

fn whole_in_range(n: f64, max: f64) -> bool {
    n >= 0.0 && n <= max && n.fract() == 0.0
}

/// Accepts `2018`, `"2018"` or `null`; form-submitted records store numbers as text.
pub fn lenient_u16<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64_value(deserializer)?
        .filter(|n| whole_in_range(*n, u16::MAX as f64))
        .map(|n| n as u16))
}

pub fn lenient_u8<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64_value(deserializer)?
        .filter(|n| whole_in_range(*n, u8::MAX as f64))
        .map(|n| n as u8))
}

/// Coordinates from query strings: `lat=abc` reads as missing.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_f64_value(deserializer)
}
