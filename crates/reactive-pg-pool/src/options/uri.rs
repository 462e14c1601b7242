//! Connection URI handling: legacy prefix stripping, parsing and masking.

use std::borrow::Cow;
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;
use url::{Host, Url};

use super::PgConnectOptions;
use crate::{PgError, PgResult};

/// Scheme wrapper used by older configurations in front of a standard
/// PostgreSQL URI, e.g. `vertx-reactive:postgresql://localhost/db`.
pub const LEGACY_URL_PREFIX: &str = "vertx-reactive:";

static LEGACY_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^vertx-reactive:postgre(?:s|sql)://.*$").expect("legacy URL pattern is valid")
});

/// Removes the [`LEGACY_URL_PREFIX`] when it wraps a `postgres://` or
/// `postgresql://` URI.
///
/// The match is case-sensitive and anchored; any other URL is returned
/// unchanged.
///
/// ```
/// use reactive_pg_pool::strip_legacy_prefix;
///
/// assert_eq!(
///     strip_legacy_prefix("vertx-reactive:postgresql://localhost/db"),
///     "postgresql://localhost/db"
/// );
/// assert_eq!(
///     strip_legacy_prefix("vertx-reactive:mysql://localhost/db"),
///     "vertx-reactive:mysql://localhost/db"
/// );
/// ```
pub fn strip_legacy_prefix(url: &str) -> &str {
    if LEGACY_URL_PATTERN.is_match(url) {
        &url[LEGACY_URL_PREFIX.len()..]
    } else {
        url
    }
}

/// Masks the password in a connection URL for safe logging.
///
/// Handles both the userinfo password and a `password` query parameter.
pub(crate) fn mask_url(url: &str) -> String {
    let mut masked = url.to_string();

    let authority_start = url.find("://").map_or(0, |pos| pos + 3);
    let rest = &url[authority_start..];
    let authority_end = rest.find('/').unwrap_or(rest.len());
    let authority = &rest[..authority_end];

    if let Some(at_pos) = authority.rfind('@')
        && let Some(colon_pos) = authority[..at_pos].find(':')
    {
        masked.replace_range(
            authority_start + colon_pos + 1..authority_start + at_pos,
            "***",
        );
    }

    if let Some(query_start) = masked.find('?') {
        let (head, query) = masked.split_at(query_start + 1);
        let query = query
            .split('&')
            .map(|pair| match pair.split_once('=') {
                Some(("password", _)) => Cow::Borrowed("password=***"),
                _ => Cow::Borrowed(pair),
            })
            .collect::<Vec<_>>()
            .join("&");
        masked = format!("{head}{query}");
    }

    masked
}

/// Parses a standard `postgres://` / `postgresql://` URI.
///
/// Accepted form:
///
/// ```text
/// postgresql://[user[:password]@][host][:port][/database][?key=value&...]
/// ```
///
/// The `host`, `port`, `user`, `password` and `dbname` query parameters
/// override the corresponding URI components; any other parameter is kept
/// as a connection property. The scheme is matched case-sensitively.
pub(crate) fn parse_uri(uri: &str) -> PgResult<PgConnectOptions> {
    let masked = mask_url(uri);

    let url = Url::parse(uri).map_err(|e| PgError::parse(masked.clone(), e.to_string()))?;

    let scheme = uri.split_once(':').map_or(uri, |(scheme, _)| scheme);
    if !matches!(scheme, "postgres" | "postgresql") {
        return Err(PgError::parse(masked, format!("unsupported scheme '{scheme}'")));
    }

    if url.cannot_be_a_base() {
        return Err(PgError::parse(masked, "expected '//' after the scheme"));
    }

    let mut options = PgConnectOptions::new();

    if !url.username().is_empty() {
        options.user = Some(decode(url.username(), &masked)?);
    }

    if let Some(password) = url.password() {
        options.password = Some(decode(password, &masked)?);
    }

    options.host = match url.host() {
        Some(Host::Domain(domain)) if !domain.is_empty() => Some(decode(domain, &masked)?),
        Some(Host::Ipv4(addr)) => Some(addr.to_string()),
        Some(Host::Ipv6(addr)) => Some(addr.to_string()),
        _ => None,
    };

    options.port = url.port();

    let database = url.path().strip_prefix('/').unwrap_or(url.path());
    if !database.is_empty() {
        options.database = Some(decode(database, &masked)?);
    }

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "host" => options.host = Some(value.into_owned()),
            "port" => {
                let port = value
                    .parse::<u16>()
                    .map_err(|_| PgError::parse(masked.clone(), format!("invalid port '{value}'")))?;
                options.port = Some(port);
            }
            "user" => options.user = Some(value.into_owned()),
            "password" => options.password = Some(value.into_owned()),
            "dbname" => options.database = Some(value.into_owned()),
            _ => {
                options
                    .properties
                    .insert(key.into_owned(), value.into_owned());
            }
        }
    }

    Ok(options)
}

fn decode(component: &str, masked: &str) -> PgResult<String> {
    percent_decode_str(component)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| PgError::parse(masked, "invalid UTF-8 in percent-encoded component"))
}
