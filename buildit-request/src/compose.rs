//! URL composition.
//!
//! The builder never assembles URL strings itself. It hands the resolved
//! parts to a [`UrlComposer`], which encodes components, joins them and
//! validates the result.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::{Host, Position, Url};

/// Characters escaped inside a query name or value.
const QUERY_COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>');

/// Characters escaped inside a path. `/` passes through.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Parts of a URL built from host and path.
#[derive(Debug, Clone, Copy)]
pub struct UrlParts<'a> {
    /// Scheme, embedded verbatim.
    pub scheme: &'a str,
    /// Host, embedded verbatim.
    pub host: &'a str,
    /// Path, already normalized to start with `/`.
    pub path: Option<&'a str>,
    /// Query items in insertion order.
    pub query: &'a [(String, String)],
}

/// Assembles and validates absolute URLs.
pub trait UrlComposer: Send + Sync {
    /// Build a URL from scheme, host, path and query items.
    ///
    /// Returns `None` when the parts do not form an absolute URL.
    fn compose(&self, parts: &UrlParts<'_>) -> Option<String>;

    /// Rewrite an existing URL with a new scheme and, when `query` is not
    /// empty, a new query string.
    ///
    /// Returns `None` when the result is not an absolute URL.
    fn rebase(&self, existing: &str, scheme: &str, query: &[(String, String)]) -> Option<String>;
}

/// Default composer backed by `percent-encoding` and `url`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardComposer;

impl StandardComposer {
    /// Create a new composer.
    pub fn new() -> Self {
        Self
    }
}

impl UrlComposer for StandardComposer {
    fn compose(&self, parts: &UrlParts<'_>) -> Option<String> {
        if parts.host.is_empty() {
            return None;
        }

        let mut url = format!("{}://{}", parts.scheme, parts.host);
        if let Some(path) = parts.path {
            url.extend(utf8_percent_encode(path, PATH));
        }
        if !parts.query.is_empty() {
            url.push('?');
            url.push_str(&encode_query(parts.query));
        }

        let parsed = parse_absolute(&url)?;
        if !host_matches(&parsed, parts.host) {
            tracing::debug!(host = parts.host, "Host does not survive URL parsing");
            return None;
        }

        Some(serialize(&parsed, parts.path.is_some()))
    }

    fn rebase(&self, existing: &str, scheme: &str, query: &[(String, String)]) -> Option<String> {
        let (_, rest) = existing.split_once("://")?;
        let has_path = rest
            .find(['/', '?', '#'])
            .is_some_and(|i| rest[i..].starts_with('/'));

        let (rest, fragment) = match rest.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (rest, None),
        };

        let mut url = format!("{}://", scheme);
        if query.is_empty() {
            url.push_str(rest);
        } else {
            let base = rest.split_once('?').map_or(rest, |(base, _)| base);
            url.push_str(base);
            url.push('?');
            url.push_str(&encode_query(query));
        }
        if let Some(fragment) = fragment {
            url.push('#');
            url.push_str(fragment);
        }

        let parsed = parse_absolute(&url)?;
        Some(serialize(&parsed, has_path))
    }
}

/// Encode query items as `name=value` pairs joined by `&`.
pub fn encode_query(query: &[(String, String)]) -> String {
    query
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(name, QUERY_COMPONENT),
                utf8_percent_encode(value, QUERY_COMPONENT)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn parse_absolute(url: &str) -> Option<Url> {
    match Url::parse(url) {
        Ok(parsed) if parsed.has_host() && !parsed.cannot_be_a_base() => Some(parsed),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(url = %url, error = %e, "Composed URL does not parse");
            None
        }
    }
}

/// The parsed host (and port) must be the configured host after IDNA and
/// case normalization.
fn host_matches(parsed: &Url, host: &str) -> bool {
    let (name, port) = split_port(host);

    let Ok(expected) = Host::parse(name) else {
        return false;
    };
    let same_host = parsed
        .host_str()
        .is_some_and(|h| h.eq_ignore_ascii_case(&expected.to_string()));

    let same_port = match port {
        Some(port) => port
            .parse::<u16>()
            .is_ok_and(|p| parsed.port_or_known_default() == Some(p)),
        None => parsed.port().is_none(),
    };

    same_host && same_port
}

fn split_port(host: &str) -> (&str, Option<&str>) {
    let search_from = if host.starts_with('[') {
        host.find(']').unwrap_or(0)
    } else {
        0
    };
    match host[search_from..].rfind(':') {
        Some(i) => (&host[..search_from + i], Some(&host[search_from + i + 1..])),
        None => (host, None),
    }
}

/// Serialize a parsed URL, without the `/` that `url` inserts when no path
/// was given.
fn serialize(parsed: &Url, has_path: bool) -> String {
    if !has_path && parsed.path() == "/" {
        format!(
            "{}{}",
            &parsed[..Position::BeforePath],
            &parsed[Position::AfterPath..]
        )
    } else {
        parsed.as_str().to_string()
    }
}
