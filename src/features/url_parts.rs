use std::borrow::Cow;
use std::net::Ipv6Addr;

use crate::utils::{DetectorError, Result};

/// Generic-syntax components of a URL, borrowed from the input.
///
/// Splitting is lexical only: nothing is decoded, lower-cased or resolved, and
/// input without a scheme or authority is accepted with those parts empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlParts<'a> {
    pub scheme: &'a str,
    /// Network location: optional userinfo, host and optional port
    pub netloc: &'a str,
    pub path: &'a str,
    pub query: &'a str,
    pub fragment: &'a str,
}

impl<'a> UrlParts<'a> {
    pub fn split(url: &'a str) -> Result<Self> {
        let (scheme, rest) = split_scheme(url);

        let (netloc, rest) = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after.find(['/', '?', '#']).unwrap_or(after.len());
                (&after[..end], &after[end..])
            }
            None => ("", rest),
        };
        check_brackets(url, netloc)?;

        let (rest, fragment) = rest.split_once('#').unwrap_or((rest, ""));
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

        Ok(Self {
            scheme,
            netloc,
            path,
            query,
            fragment,
        })
    }
}

/// Drop leading control characters and spaces, and every tab, CR and LF.
///
/// Browsers ignore these when reading a URL, so `http://exa\tmple.com/` names
/// the host `example.com`. Input that needs no cleaning is borrowed as is.
pub fn sanitize(url: &str) -> Cow<'_, str> {
    let trimmed = url.trim_start_matches(|c: char| c <= ' ');
    if trimmed.contains(['\t', '\r', '\n']) {
        Cow::Owned(trimmed.replace(['\t', '\r', '\n'], ""))
    } else {
        Cow::Borrowed(trimmed)
    }
}

fn split_scheme(url: &str) -> (&str, &str) {
    if let Some(colon) = url.find(':') {
        let candidate = &url[..colon];
        let starts_alpha = candidate
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic());
        let valid = candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if starts_alpha && valid {
            return (candidate, &url[colon + 1..]);
        }
    }
    ("", url)
}

fn check_brackets(url: &str, netloc: &str) -> Result<()> {
    let open = netloc.find('[');
    let close = netloc.find(']');

    match (open, close) {
        (None, None) => Ok(()),
        (Some(start), Some(end)) if start < end => {
            let host = &netloc[start + 1..end];
            if is_bracketed_host(host) {
                Ok(())
            } else {
                Err(DetectorError::extraction(
                    url,
                    format!("invalid bracketed host [{}]", host),
                ))
            }
        }
        _ => Err(DetectorError::extraction(
            url,
            "unbalanced IPv6 brackets in network location",
        )),
    }
}

/// IPv6 literal or an IPvFuture literal (`v<hex>.<chars>`)
fn is_bracketed_host(host: &str) -> bool {
    if let Some(future) = host.strip_prefix(['v', 'V']) {
        return match future.split_once('.') {
            Some((version, body)) => {
                !version.is_empty()
                    && version.chars().all(|c| c.is_ascii_hexdigit())
                    && !body.is_empty()
            }
            None => false,
        };
    }
    // Zone identifiers ("%eth0") are not part of the address itself
    let address = host.split('%').next().unwrap_or(host);
    address.parse::<Ipv6Addr>().is_ok()
}
