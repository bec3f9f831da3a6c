//! Upstream target URL construction.

use url::{form_urlencoded, Url};

use crate::forwarding::error::ForwardError;

/// Parse the configured base URL.
///
/// Only absolute `http`/`https` URLs with a host are accepted.
pub fn parse_endpoint(raw: &str) -> Result<Url, ForwardError> {
    let invalid = |reason: String| ForwardError::InvalidEndpoint {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url)
}

/// Set or overwrite query parameters on `url`.
///
/// An overwritten name keeps the position of its first occurrence and any
/// later occurrences are dropped; names not yet present are appended. Pairs
/// with other names pass through byte for byte. When `overrides` repeats a
/// name, its first value is used.
pub fn merge_query_params(mut url: Url, overrides: &[(&str, &str)]) -> Url {
    if overrides.is_empty() {
        return url;
    }

    let mut pending: Vec<(&str, &str)> = Vec::with_capacity(overrides.len());
    for &(name, value) in overrides {
        if !pending.iter().any(|(n, _)| *n == name) {
            pending.push((name, value));
        }
    }

    let mut segments = Vec::new();
    let mut replaced: Vec<String> = Vec::new();
    for segment in url.query().unwrap_or_default().split('&') {
        if segment.is_empty() {
            continue;
        }
        let name = form_urlencoded::parse(segment.as_bytes())
            .next()
            .map(|(name, _)| name.into_owned())
            .unwrap_or_default();

        match pending.iter().find(|(n, _)| *n == name) {
            Some(_) if replaced.contains(&name) => {}
            Some(&pair) => {
                segments.push(encode_pair(pair));
                replaced.push(name);
            }
            None => segments.push(segment.to_string()),
        }
    }
    for &pair in &pending {
        if !replaced.iter().any(|n| n == pair.0) {
            segments.push(encode_pair(pair));
        }
    }

    url.set_query(Some(&segments.join("&")));
    url
}

fn encode_pair((name, value): (&str, &str)) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(name, value)
        .finish()
}
