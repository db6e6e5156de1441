//! Certificates and in-process peers for probe tests.

use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::ec::{EcGroup, EcKey};
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::{PKey, Private};
use openssl::ssl::{Ssl, SslAcceptor, SslMethod};
use openssl::x509::{X509Builder, X509Name, X509NameBuilder, X509NameRef, X509};
use std::net::SocketAddr;
use std::pin::Pin;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio_openssl::SslStream;

const TEST_ORG: &str = "portprobe tests";

pub struct Identity {
    pub cert: X509,
    pub key: PKey<Private>,
}

pub fn key() -> PKey<Private> {
    let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).unwrap();
    PKey::from_ec_key(EcKey::generate(&group).unwrap()).unwrap()
}

pub fn name(entries: &[(&str, &str)]) -> X509Name {
    let mut builder = X509NameBuilder::new().unwrap();
    for (field, value) in entries {
        builder.append_entry_by_text(field, value).unwrap();
    }
    builder.build()
}

fn issue(
    subject: &X509NameRef,
    subject_key: &PKey<Private>,
    issuer: &X509NameRef,
    issuer_key: &PKey<Private>,
    serial: u32,
) -> X509 {
    let mut builder = X509Builder::new().unwrap();
    builder.set_version(2).unwrap();
    let serial = BigNum::from_u32(serial).unwrap().to_asn1_integer().unwrap();
    builder.set_serial_number(&serial).unwrap();
    builder.set_subject_name(subject).unwrap();
    builder.set_issuer_name(issuer).unwrap();
    builder.set_pubkey(subject_key).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(30).unwrap())
        .unwrap();
    builder.sign(issuer_key, MessageDigest::sha256()).unwrap();
    builder.build()
}

/// A leaf whose subject is also its issuer.
pub fn self_signed(cn: &str) -> Identity {
    let key = key();
    let subject = name(&[("O", TEST_ORG), ("CN", cn)]);
    let cert = issue(&subject, &key, &subject, &key, 1);
    Identity { cert, key }
}

/// A leaf signed by a separate CA.
pub fn ca_issued(cn: &str, ca_cn: &str) -> Identity {
    let ca_key = key();
    let ca_name = name(&[("O", TEST_ORG), ("CN", ca_cn)]);

    let key = key();
    let subject = name(&[("O", TEST_ORG), ("CN", cn)]);
    let cert = issue(&subject, &key, &ca_name, &ca_key, 2);
    Identity { cert, key }
}

/// Serve `identity` over TLS on an ephemeral loopback port.
pub async fn spawn_tls_server(identity: Identity) -> SocketAddr {
    let mut builder = SslAcceptor::mozilla_intermediate_v5(SslMethod::tls()).unwrap();
    builder.set_private_key(&identity.key).unwrap();
    builder.set_certificate(&identity.cert).unwrap();
    builder.check_private_key().unwrap();
    let acceptor = builder.build();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((tcp, _)) = listener.accept().await {
            let ssl = Ssl::new(acceptor.context()).unwrap();
            let mut stream = SslStream::new(ssl, tcp).unwrap();
            if Pin::new(&mut stream).accept().await.is_ok() {
                let _ = stream.shutdown().await;
            }
        }
    });

    addr
}

/// A plain TCP service that answers every connection with an HTTP error.
pub async fn spawn_plain_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut tcp, _)) = listener.accept().await {
            let _ = tcp
                .write_all(b"HTTP/1.1 400 Bad Request\r\nConnection: close\r\n\r\n")
                .await;
            let _ = tcp.shutdown().await;
        }
    });

    addr
}

/// A port nothing listens on.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}
