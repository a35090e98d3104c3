//! Key=value extraction from access-log lines.

use chrono::{DateTime, Utc};

use crate::parser::record::RequestRecord;

const POOL_KEY: &str = "pool=";
const STATUS_KEY: &str = "upstream_status=";
const ADDR_KEY: &str = "upstream_addr=";
const REQUEST_TIME_KEY: &str = "request_time=";

/// Parse one access-log line.
///
/// Returns `None` when the line carries no usable pool marker. Optional
/// fields that are missing or malformed come back as `None` without
/// rejecting the record.
pub fn parse_line(line: &str, observed_at: DateTime<Utc>) -> Option<RequestRecord> {
    let pool = capture(line, POOL_KEY, is_word_char)?;

    Some(RequestRecord {
        pool: pool.to_string(),
        upstream_status: upstream_status(line),
        upstream_addr: upstream_addr(line),
        request_time: request_time(line),
        observed_at,
        raw: line.to_string(),
    })
}

/// First status in a retry list such as `502, 200`.
fn upstream_status(line: &str) -> Option<u16> {
    let statuses = capture(line, STATUS_KEY, |c| {
        c.is_ascii_digit() || c == ',' || c.is_whitespace()
    })?;
    statuses.split(',').next()?.trim().parse().ok()
}

fn upstream_addr(line: &str) -> Option<String> {
    let addrs = capture(line, ADDR_KEY, |c| {
        c.is_ascii_digit() || matches!(c, '.' | ':' | ',') || c.is_whitespace()
    })?;
    let addrs = addrs.trim();
    (!addrs.is_empty()).then(|| addrs.to_string())
}

fn request_time(line: &str) -> Option<f64> {
    capture(line, REQUEST_TIME_KEY, |c| c.is_ascii_digit() || c == '.')?
        .parse()
        .ok()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Value following the first occurrence of `key` that is immediately
/// followed by at least one `allowed` character.
fn capture<'a>(line: &'a str, key: &str, allowed: impl Fn(char) -> bool) -> Option<&'a str> {
    line.match_indices(key).find_map(|(idx, _)| {
        let rest = &line[idx + key.len()..];
        let end = rest
            .char_indices()
            .find(|&(_, c)| !allowed(c))
            .map_or(rest.len(), |(i, _)| i);
        (end > 0).then(|| &rest[..end])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = r#"172.18.0.1 - - [10/Oct/2025:13:55:36 +0000] "GET /version HTTP/1.1" 200 57 pool=blue release=blue-1.0.0 upstream_status=200 upstream_addr=172.18.0.2:3000 request_time=0.004 upstream_response_time=0.004"#;

    fn parse(line: &str) -> Option<RequestRecord> {
        parse_line(line, Utc::now())
    }

    #[test]
    fn test_full_line() {
        let record = parse(LINE).unwrap();
        assert_eq!(record.pool, "blue");
        assert_eq!(record.upstream_status, Some(200));
        assert_eq!(record.upstream_addr.as_deref(), Some("172.18.0.2:3000"));
        assert_eq!(record.request_time, Some(0.004));
        assert_eq!(record.raw, LINE);
    }

    #[test]
    fn test_line_without_pool_is_skipped() {
        assert!(parse("nginx: worker process started").is_none());
        assert!(parse("upstream_status=502 request_time=0.1").is_none());
    }

    #[test]
    fn test_empty_pool_value_is_skipped() {
        assert!(parse("pool= upstream_status=200").is_none());
        assert!(parse("pool=-").is_none());
    }

    #[test]
    fn test_retried_request_keeps_first_status() {
        let record = parse(
            "pool=green upstream_status=502, 200 upstream_addr=172.18.0.2:3000, 172.18.0.3:3000",
        )
        .unwrap();
        assert_eq!(record.upstream_status, Some(502));
        assert!(record.is_upstream_error());
        assert_eq!(
            record.upstream_addr.as_deref(),
            Some("172.18.0.2:3000, 172.18.0.3:3000")
        );
    }

    #[test]
    fn test_malformed_status_keeps_record() {
        let record = parse("pool=blue upstream_status=, 200").unwrap();
        assert_eq!(record.pool, "blue");
        assert_eq!(record.upstream_status, None);

        let record = parse("pool=blue upstream_status=- request_time=0.2").unwrap();
        assert_eq!(record.upstream_status, None);
        assert_eq!(record.request_time, Some(0.2));

        let record = parse("pool=blue upstream_status=99999").unwrap();
        assert_eq!(record.upstream_status, None);
    }

    #[test]
    fn test_optional_fields_absent() {
        let record = parse("pool=green").unwrap();
        assert_eq!(record.upstream_status, None);
        assert_eq!(record.upstream_addr, None);
        assert_eq!(record.request_time, None);
        assert!(!record.is_upstream_error());
    }

    #[test]
    fn test_malformed_request_time_is_absent() {
        let record = parse("pool=blue request_time=1.2.3").unwrap();
        assert_eq!(record.request_time, None);
    }

    #[test]
    fn test_pool_is_free_form_token() {
        let record = parse("pool=canary_2 upstream_status=200").unwrap();
        assert_eq!(record.pool, "canary_2");
    }
}
