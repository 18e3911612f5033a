//! Typed attribute coercion.
//!
//! Handlers build their attribute structs from [`ShortcodeArgs`] with these
//! helpers. Coercion is lax in the same way the legacy importer was: integers
//! may carry surrounding whitespace and a sign, booleans accept the usual
//! spellings, URLs must be absolute `http(s)` with a top-level domain.

use url::{Host, Url};

use crate::ShortcodeArgs;
use crate::error::ValidationError;

/// Longest accepted URL.
const MAX_URL_LENGTH: usize = 2083;

impl ShortcodeArgs {
    /// Get a required keyword argument.
    pub fn require(&self, field: &str) -> Result<&str, ValidationError> {
        self.get(field).ok_or_else(|| ValidationError::Missing {
            field: field.to_owned(),
        })
    }

    /// Get a required keyword argument that must be an `http(s)` URL.
    ///
    /// Returns the URL as written (surrounding whitespace trimmed), not the
    /// normalized form.
    pub fn require_url(&self, field: &str) -> Result<&str, ValidationError> {
        parse_http_url(field, self.require(field)?)
    }

    /// Get an optional integer keyword argument.
    pub fn optional_int(&self, field: &str) -> Result<Option<i64>, ValidationError> {
        self.get(field).map(|v| parse_int(field, v)).transpose()
    }

    /// Get an optional boolean keyword argument.
    pub fn optional_bool(&self, field: &str) -> Result<Option<bool>, ValidationError> {
        self.get(field).map(|v| parse_bool(field, v)).transpose()
    }

    /// Get an optional string keyword argument as an owned value.
    #[must_use]
    pub fn optional_string(&self, field: &str) -> Option<String> {
        self.get(field).map(str::to_owned)
    }
}

/// Validate an absolute `http`/`https` URL with a host.
///
/// Domain hosts need a top-level domain (`example.com`, not `localhost`);
/// IP hosts are accepted as-is.
pub fn parse_http_url<'a>(field: &str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    let invalid = |reason: &str| ValidationError::InvalidUrl {
        field: field.to_owned(),
        value: value.to_owned(),
        reason: reason.to_owned(),
    };

    if trimmed.is_empty() {
        return Err(invalid("empty URL"));
    }
    if trimmed.len() > MAX_URL_LENGTH {
        return Err(invalid("URL too long"));
    }

    let url = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("URL scheme not permitted"));
    }

    match url.host() {
        None => return Err(invalid("URL host required")),
        Some(Host::Domain(domain)) => {
            if !has_tld(domain) {
                return Err(invalid("URL host invalid, top level domain required"));
            }
        }
        Some(Host::Ipv4(_) | Host::Ipv6(_)) => {}
    }

    Ok(trimmed)
}

fn has_tld(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    match domain.rsplit_once('.') {
        Some((name, tld)) => {
            !name.is_empty()
                && (2..=63).contains(&tld.len())
                && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

/// Parse a decimal integer, tolerating surrounding whitespace and a sign.
pub fn parse_int(field: &str, value: &str) -> Result<i64, ValidationError> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

    digits
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidInt {
            field: field.to_owned(),
            value: value.to_owned(),
        })
}

/// Parse a boolean from its common spellings.
pub fn parse_bool(field: &str, value: &str) -> Result<bool, ValidationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        _ => Err(ValidationError::InvalidBool {
            field: field.to_owned(),
            value: value.to_owned(),
        }),
    }
}
