//! Client certificate decoding and subject rendering.

use base64::{engine::general_purpose::STANDARD, Engine};
use x509_parser::prelude::*;

use crate::error::AuthorizerError;

const BEGIN_MARKER: &str = "-----BEGIN CERTIFICATE-----";
const END_MARKER: &str = "-----END CERTIFICATE-----";

/// Subject attribute short names, keyed by dotted OID.
const SHORT_NAMES: &[(&str, &str)] = &[
    ("2.5.4.6", "C"),
    ("2.5.4.8", "ST"),
    ("2.5.4.7", "L"),
    ("2.5.4.10", "O"),
    ("2.5.4.11", "OU"),
    ("2.5.4.3", "CN"),
    ("2.5.4.5", "serialNumber"),
    ("2.5.4.9", "street"),
    ("2.5.4.12", "title"),
    ("2.5.4.4", "SN"),
    ("2.5.4.42", "GN"),
    ("1.2.840.113549.1.9.1", "emailAddress"),
    ("0.9.2342.19200300.100.1.25", "DC"),
    ("0.9.2342.19200300.100.1.1", "UID"),
];

/// Decode a PEM client certificate into DER bytes.
pub fn decode_pem(pem: &str) -> Result<Vec<u8>, AuthorizerError> {
    let pem = pem.trim();

    let start = pem
        .find(BEGIN_MARKER)
        .ok_or_else(|| AuthorizerError::parse("invalid PEM: missing BEGIN marker"))?;
    let end = pem
        .find(END_MARKER)
        .ok_or_else(|| AuthorizerError::parse("invalid PEM: missing END marker"))?;
    if end < start {
        return Err(AuthorizerError::parse("invalid PEM: END marker precedes BEGIN"));
    }

    let base64_content: String = pem[start + BEGIN_MARKER.len()..end]
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    STANDARD
        .decode(base64_content)
        .map_err(|e| AuthorizerError::parse(format!("invalid PEM base64 content: {e}")))
}

/// Parse a PEM client certificate and render its subject, one RDN per line.
///
/// RDNs appear in encoding order as `SHORTNAME=value`; the attributes of a
/// multi-valued RDN share a line joined by ` + `. Values are escaped as in
/// RFC 2253, matching OpenSSL's multi-line subject printer.
pub fn subject_from_pem(pem: &str) -> Result<String, AuthorizerError> {
    let der = decode_pem(pem)?;
    let (_, cert) = X509Certificate::from_der(&der)
        .map_err(|e| AuthorizerError::parse(format!("invalid X.509 certificate: {e}")))?;

    Ok(render_subject(cert.subject()))
}

fn render_subject(name: &X509Name<'_>) -> String {
    name.iter()
        .map(|rdn| {
            rdn.iter()
                .map(render_attribute)
                .collect::<Vec<_>>()
                .join(" + ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_attribute(attr: &AttributeTypeAndValue<'_>) -> String {
    let oid = attr.attr_type().to_id_string();
    let key = SHORT_NAMES
        .iter()
        .find(|(dotted, _)| *dotted == oid)
        .map(|(_, short)| (*short).to_string())
        .unwrap_or(oid);

    let value = attr.attr_value();
    let text = match attr.as_str() {
        Ok(s) => Some(s.to_string()),
        Err(_) => decode_string(value.tag().0, value.as_bytes()),
    };

    match text {
        Some(text) => format!("{key}={}", escape_value(&text)),
        None => format!("{key}={}", raw_value(value.as_bytes())),
    }
}

/// Decode the ASN.1 string types `as_str` leaves out.
///
/// T61 and the ISO 646 family are read as Latin-1, BMP as UTF-16BE and
/// Universal as UTF-32BE.
fn decode_string(tag: u32, bytes: &[u8]) -> Option<String> {
    match tag {
        // TeletexString, VideotexString, GraphicString, VisibleString, GeneralString
        0x14 | 0x15 | 0x19 | 0x1a | 0x1b => Some(bytes.iter().map(|&b| char::from(b)).collect()),
        // BMPString
        0x1e => {
            if bytes.len() % 2 != 0 {
                return None;
            }
            let units = bytes.chunks_exact(2).map(|c| u16::from_be_bytes([c[0], c[1]]));
            char::decode_utf16(units).collect::<Result<String, _>>().ok()
        }
        // UniversalString
        0x1c => {
            if bytes.len() % 4 != 0 {
                return None;
            }
            bytes
                .chunks_exact(4)
                .map(|c| char::from_u32(u32::from_be_bytes([c[0], c[1], c[2], c[3]])))
                .collect()
        }
        _ => None,
    }
}

/// RFC 2253 escaping plus `\XX` for control characters.
fn escape_value(value: &str) -> String {
    let last = value.chars().count().saturating_sub(1);
    let mut escaped = String::with_capacity(value.len());

    for (i, c) in value.chars().enumerate() {
        match c {
            ',' | '+' | '"' | '\\' | '<' | '>' | ';' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '#' if i == 0 => escaped.push_str("\\#"),
            ' ' if i == 0 || i == last => escaped.push_str("\\ "),
            c if c < ' ' || c == '\x7f' => escaped.push_str(&format!("\\{:02X}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

fn raw_value(bytes: &[u8]) -> String {
    let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
    format!("#{hex}")
}

/// Fold a multi-line subject into a single-line identity token.
pub fn normalize_subject(subject: &str) -> String {
    subject.replace('\n', ",")
}
