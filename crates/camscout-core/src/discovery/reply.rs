//! ProbeMatch reply parsing.
//!
//! Replies are best-effort: anything that fails to parse yields no device
//! rather than an error, so one bad responder cannot spoil a batch.

use percent_encoding::percent_decode_str;
use quick_xml::events::Event;
use quick_xml::Reader;
use url::{Host, Url};

use crate::types::Device;

/// Element path of the XAddrs text node, by local name.
const XADDRS_PATH: [&str; 4] = ["Body", "ProbeMatches", "ProbeMatch", "XAddrs"];

/// Element path of the Scopes text node, by local name.
const SCOPES_PATH: [&str; 4] = ["Body", "ProbeMatches", "ProbeMatch", "Scopes"];

/// Parse one raw reply into a device record.
///
/// Returns `None` when the reply is not well-formed XML or carries no
/// XAddrs URI with a usable host. Scope metadata is optional; missing
/// entries leave the corresponding field empty.
pub fn parse_probe_match(raw: &str) -> Option<Device> {
    let fields = extract_text_fields(raw)?;
    let (xaddr, xaddr_v6) = parse_xaddrs(fields.xaddrs.as_deref()?)?;

    let (hardware, mut name, location) = fields
        .scopes
        .as_deref()
        .map(classify_scopes)
        .unwrap_or_default();

    // Vendors sometimes prefix the name scope with the hardware token.
    if !hardware.is_empty() && name.contains(&hardware) {
        name = name.replace(&hardware, "");
    }
    let name = name.trim().to_string();

    Some(Device {
        xaddr,
        xaddr_v6,
        hardware,
        name,
        location,
    })
}

struct ReplyFields {
    xaddrs: Option<String>,
    scopes: Option<String>,
}

/// Pull the XAddrs and Scopes text nodes out of the reply, matching element
/// paths on local names so namespace prefixes do not matter.
fn extract_text_fields(raw: &str) -> Option<ReplyFields> {
    let mut reader = Reader::from_str(raw);

    let mut path: Vec<String> = Vec::new();
    let mut xaddrs = None;
    let mut scopes = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Text(t)) => {
                let text = t.unescape().ok()?;
                if path_ends_with(&path, &XADDRS_PATH) {
                    xaddrs = Some(text.trim().to_string());
                } else if path_ends_with(&path, &SCOPES_PATH) {
                    scopes = Some(text.trim().to_string());
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                log::trace!("skipping malformed reply: {}", e);
                return None;
            }
        }
    }

    Some(ReplyFields { xaddrs, scopes })
}

fn path_ends_with(path: &[String], suffix: &[&str]) -> bool {
    path.len() >= suffix.len()
        && path[path.len() - suffix.len()..]
            .iter()
            .zip(suffix)
            .all(|(a, b)| a == b)
}

/// Extract the endpoint hosts from a whitespace-separated XAddrs URI list.
///
/// The primary is the first IPv4 or hostname form; the device's IPv6 form
/// (bracketed in the URI) is reported separately. When only IPv6 addresses
/// were advertised the first one becomes the primary instead.
fn parse_xaddrs(text: &str) -> Option<(String, Option<String>)> {
    let mut primary: Option<String> = None;
    let mut v6: Option<String> = None;

    for token in text.split_whitespace() {
        let Ok(url) = Url::parse(token) else { continue };
        match url.host() {
            Some(Host::Ipv6(addr)) => {
                if v6.is_none() {
                    v6 = Some(addr.to_string());
                }
            }
            Some(host) => {
                if primary.is_none() {
                    primary = Some(host.to_string());
                }
            }
            None => {}
        }
    }

    match (primary, v6) {
        (Some(primary), v6) => Some((primary, v6)),
        (None, Some(v6)) => Some((v6, None)),
        (None, None) => None,
    }
}

/// Classify scope URIs into (hardware, name, location) by their path.
///
/// Matching is case-sensitive on the path as received; values are the
/// percent-decoded final path segment. Unrecognized scopes are ignored.
fn classify_scopes(text: &str) -> (String, String, String) {
    let mut hardware = String::new();
    let mut name = String::new();
    let mut location = String::new();

    for token in text.split_whitespace() {
        let Ok(url) = Url::parse(token) else { continue };
        let Some(value) = last_path_segment(&url) else {
            continue;
        };

        let path = url.path();
        if path.contains("hardware") {
            hardware = value;
        } else if path.contains("name") {
            name = value;
        } else if path.contains("location") {
            location = value;
        }
    }

    (hardware, name, location)
}

fn last_path_segment(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.last()?;
    if segment.is_empty() {
        return None;
    }
    Some(percent_decode_str(segment).decode_utf8_lossy().into_owned())
}
