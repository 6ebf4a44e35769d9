//! String padding and date formatting helpers shared across modules.
use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;

/// Left-pad `s` with `pad` up to `width`. Idempotent once at width.
pub fn left_pad(s: &str, pad: char, width: usize) -> String {
    if s.len() >= width {
        return s.to_string();
    }
    let mut out = String::with_capacity(width);
    for _ in 0..width - s.len() {
        out.push(pad);
    }
    out.push_str(s);
    out
}

/// Right-pad `s` with `pad` up to `width`.
pub fn right_pad(s: &str, pad: char, width: usize) -> String {
    if s.len() >= width {
        return s.to_string();
    }
    let mut out = String::with_capacity(width);
    out.push_str(s);
    for _ in 0..width - s.len() {
        out.push(pad);
    }
    out
}

/// `YYYY-MM-DD`, the only date-only format SIFEN accepts.
pub fn format_fecha(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM-DDTHH:MM:SS`, no timezone, no milliseconds.
pub fn format_fecha_hora(datetime: NaiveDateTime) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Current local time in the SIFEN datetime format.
pub fn now_fecha_hora() -> String {
    format_fecha_hora(chrono::Local::now().naive_local())
}

/// Random 9-digit security code for CDC generation.
pub fn generate_security_code() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{n:09}")
}

/// Minimal XML text escaping for values embedded in hand-built requests.
pub fn xml_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_pad_cases() {
        let cases = [
            ("123", '0', 5, "00123"),
            ("12345", '0', 5, "12345"),
            ("123456", '0', 5, "123456"),
            ("", '0', 3, "000"),
            ("1", '0', 1, "1"),
        ];
        for (input, pad, width, expected) in cases {
            assert_eq!(left_pad(input, pad, width), expected);
        }
    }

    #[test]
    fn right_pad_cases() {
        let cases = [
            ("123", '0', 5, "12300"),
            ("12345", '0', 5, "12345"),
            ("", '0', 3, "000"),
        ];
        for (input, pad, width, expected) in cases {
            assert_eq!(right_pad(input, pad, width), expected);
        }
    }

    #[test]
    fn date_formats_have_no_timezone() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(format_fecha(date), "2024-01-15");
        let dt = date.and_hms_opt(10, 30, 5).unwrap();
        assert_eq!(format_fecha_hora(dt), "2024-01-15T10:30:05");
    }

    #[test]
    fn security_code_is_nine_digits() {
        let code = generate_security_code();
        assert_eq!(code.len(), 9);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn xml_escape_replaces_markup() {
        assert_eq!(xml_escape("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&apos;");
    }
}
