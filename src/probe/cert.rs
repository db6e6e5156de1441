//! Leaf certificate inspection.
//!
//! Field rendering follows OpenSSL's own textual forms: distinguished
//! names use the one-line `/C=../O=../CN=..` layout of `X509_NAME_oneline`,
//! the expiry uses `ASN1_TIME_print`, and self-signedness is decided by
//! `X509_NAME_cmp` rather than by comparing rendered strings.

use crate::error::{TlsError, TlsResult};
use openssl::asn1::Asn1TimeRef;
use openssl::x509::{X509NameRef, X509Ref};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Write;

/// Identity and validity signals of a peer's leaf certificate.
///
/// The default value (`valid == false`, everything else empty) is what a
/// failed probe reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateInfo {
    /// True when a certificate was retrieved and all fields are populated.
    pub valid: bool,
    pub subject: String,
    pub issuer: String,
    /// Expiry as OpenSSL prints it, e.g. `Jan  1 00:00:00 2030 GMT`.
    pub not_after: String,
    pub self_signed: bool,
}

impl CertificateInfo {
    /// The failure value.
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Extract the reported fields from a leaf certificate.
    pub fn from_certificate(cert: &X509Ref) -> TlsResult<Self> {
        let subject = cert.subject_name();
        let issuer = cert.issuer_name();

        Ok(Self {
            valid: true,
            subject: oneline(subject),
            issuer: oneline(issuer),
            not_after: render_time(cert.not_after())?,
            self_signed: names_equal(subject, issuer),
        })
    }
}

/// Render a distinguished name the way `X509_NAME_oneline` does.
///
/// Attribute types use their short names (falling back to the dotted OID),
/// and bytes outside printable ASCII are escaped as `\xHH`.
///
/// One OpenSSL quirk is not reproduced: for a `GeneralString` value whose
/// length is a multiple of four, OpenSSL guesses UCS-4 and drops the zero
/// padding bytes. The string type is not reachable through the safe API,
/// so here those zero bytes are escaped like any other.
pub fn oneline(name: &X509NameRef) -> String {
    let mut out = String::new();
    for entry in name.entries() {
        let object = entry.object();
        out.push('/');
        match object.nid().short_name() {
            Ok(short) => out.push_str(short),
            Err(_) => out.push_str(&object.to_string()),
        }
        out.push('=');
        for &byte in entry.data().as_slice() {
            if (b' '..=b'~').contains(&byte) {
                out.push(byte as char);
            } else {
                let _ = write!(out, "\\x{byte:02X}");
            }
        }
    }
    out
}

/// Attribute-set equality of two names, as `X509_NAME_cmp` defines it.
pub fn names_equal(a: &X509NameRef, b: &X509NameRef) -> bool {
    matches!(a.try_cmp(b), Ok(Ordering::Equal))
}

fn render_time(time: &Asn1TimeRef) -> TlsResult<String> {
    // OpenSSL writes "error" when its memory BIO cannot be set up.
    let rendered = time.to_string();
    if rendered.is_empty() || rendered == "error" {
        return Err(TlsError::ExpiryRender);
    }
    Ok(rendered)
}
