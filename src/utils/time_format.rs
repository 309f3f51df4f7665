//! Conversions between seconds and the `[[H:]M:]S` text used by the display,
//! the output file and the default-time field

use crate::error::TimerError;

/// Render a second count as `H:MM:SS`, or `M:SS` when there are no whole hours
pub fn render(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let total = seconds.unsigned_abs();
    let (minutes, secs) = (total / 60, total % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);

    if hours > 0 {
        format!("{}{}:{:02}:{:02}", sign, hours, minutes, secs)
    } else {
        format!("{}{}:{:02}", sign, minutes, secs)
    }
}

/// Parse `H:M:S`, `M:S` or `S` into seconds. Missing leading components are zero.
pub fn parse_time(input: &str) -> Result<i64, TimerError> {
    let parts: Vec<&str> = input.trim().split(':').collect();
    if parts.len() > 3 {
        return Err(TimerError::format(
            input,
            format!("expected at most 3 components, found {}", parts.len()),
        ));
    }

    let mut total: i64 = 0;
    for part in &parts {
        let value: i64 = part
            .trim()
            .parse::<u32>()
            .map_err(|e| TimerError::format(input, format!("{:?} is not a non-negative integer: {}", part, e)))?
            .into();
        total = total
            .checked_mul(60)
            .and_then(|t| t.checked_add(value))
            .ok_or_else(|| TimerError::format(input, "value out of range"))?;
    }

    Ok(total)
}
