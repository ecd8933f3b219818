use std::fmt::{Display, Write};

use chrono::TimeZone;

/// Converts CRLF to LF, trims the text and ends it with exactly one newline.
pub fn normalize_body(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let mut body = text.trim().to_string();
    body.push('\n');
    body
}

/// Quotes `value` as a JSON string literal, optionally escaping all non-ASCII chars.
pub fn json_quote(value: &str, ascii_only: bool) -> String {
    let quoted = serde_json::Value::String(value.to_string()).to_string();
    if ascii_only {
        escape_non_ascii(&quoted)
    } else {
        quoted
    }
}

fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut units = [0u16; 2];

    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
            continue;
        }
        for unit in c.encode_utf16(&mut units) {
            let _ = write!(&mut out, "\\u{:04x}", unit);
        }
    }

    out
}

/// Calendar date (YYYY-MM-DD) of an epoch timestamp in the given zone.
pub fn format_date<Tz>(timestamp: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let date_time = tz.timestamp_opt(timestamp, 0).earliest()?;
    Some(date_time.format("%Y-%m-%d").to_string())
}
