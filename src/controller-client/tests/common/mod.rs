#![allow(dead_code)]

use actix_web::{web, HttpRequest, HttpResponse};
use openssl::asn1::Asn1Time;
use openssl::bn::{BigNum, MsbOption};
use openssl::hash::MessageDigest;
use openssl::pkey::{PKey, Private};
use openssl::ssl::{SslAcceptor, SslMethod};
use openssl::x509::extension::{
    BasicConstraints, ExtendedKeyUsage, KeyUsage, SubjectAlternativeName,
};
use openssl::x509::{X509Name, X509};
use std::io::Write;

pub const SCOPES: &str = r#"{"scopes":[{"scopeName":"_system"},{"scopeName":"examples"}]}"#;

/// Routes of the mock controller
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/ok", web::get().to(|| async { HttpResponse::Ok().body("ok") }))
        .route("/v1/scopes", web::get().to(|| async { HttpResponse::Ok().body(SCOPES) }))
        .route(
            "/unauthorized",
            web::get().to(|| async { HttpResponse::Unauthorized().body("denied") }),
        )
        .route(
            "/unavailable",
            web::get().to(|| async { HttpResponse::ServiceUnavailable().body("try later") }),
        )
        .route(
            "/error",
            web::get().to(|| async { HttpResponse::InternalServerError().body("boom") }),
        )
        .route("/auth", web::get().to(authorization))
        .route("/accept", web::get().to(accept));
}

fn header(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

async fn authorization(req: HttpRequest) -> HttpResponse {
    match header(&req, "authorization") {
        Some(value) => HttpResponse::Ok().body(value),
        None => HttpResponse::Unauthorized().finish(),
    }
}

async fn accept(req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().body(header(&req, "accept").unwrap_or_default())
}

pub struct Certificate {
    pub cert: X509,
    pub key: PKey<Private>,
}

fn prime256v1_key() -> PKey<Private> {
    let group = openssl::ec::EcGroup::from_curve_name(openssl::nid::Nid::X9_62_PRIME256V1).unwrap();
    let key = openssl::ec::EcKey::generate(&group).unwrap();
    PKey::from_ec_key(key).unwrap()
}

fn build_x509_name(common_name: &str) -> X509Name {
    let mut x509_name = openssl::x509::X509NameBuilder::new().unwrap();
    x509_name.append_entry_by_text("O", "Controller").unwrap();
    x509_name.append_entry_by_text("CN", common_name).unwrap();
    x509_name.build()
}

fn builder(subject: &X509Name, key: &PKey<Private>) -> openssl::x509::X509Builder {
    let mut bn = BigNum::new().unwrap();
    bn.rand(96, MsbOption::MAYBE_ZERO, false).unwrap();
    let serial = bn.to_asn1_integer().unwrap();
    let mut x509 = X509::builder().unwrap();
    x509.set_version(2).unwrap();
    x509.set_serial_number(&serial).unwrap();
    x509.set_subject_name(subject).unwrap();
    x509.set_pubkey(key).unwrap();
    x509.set_not_before(&Asn1Time::days_from_now(0).unwrap()).unwrap();
    x509.set_not_after(&Asn1Time::days_from_now(7).unwrap()).unwrap();
    x509
}

/// Self-signed certificate authority
pub fn ca(common_name: &str) -> Certificate {
    let key = prime256v1_key();
    let name = build_x509_name(common_name);
    let mut x509 = builder(&name, &key);
    x509.set_issuer_name(&name).unwrap();
    x509.append_extension(BasicConstraints::new().critical().ca().build().unwrap())
        .unwrap();
    x509.append_extension(
        KeyUsage::new()
            .critical()
            .key_cert_sign()
            .crl_sign()
            .build()
            .unwrap(),
    )
    .unwrap();
    x509.sign(&key, MessageDigest::sha256()).unwrap();
    Certificate {
        cert: x509.build(),
        key,
    }
}

/// Server certificate for `dns_name`, signed by `ca`
pub fn server(ca: &Certificate, dns_name: &str) -> Certificate {
    let key = prime256v1_key();
    let name = build_x509_name(dns_name);
    let mut x509 = builder(&name, &key);
    x509.set_issuer_name(ca.cert.subject_name()).unwrap();
    x509.append_extension(BasicConstraints::new().build().unwrap())
        .unwrap();
    x509.append_extension(
        KeyUsage::new()
            .critical()
            .digital_signature()
            .key_agreement()
            .build()
            .unwrap(),
    )
    .unwrap();
    x509.append_extension(ExtendedKeyUsage::new().server_auth().build().unwrap())
        .unwrap();
    let alt_names = SubjectAlternativeName::new()
        .dns(dns_name)
        .build(&x509.x509v3_context(Some(&*ca.cert), None))
        .unwrap();
    x509.append_extension(alt_names).unwrap();
    x509.sign(&ca.key, MessageDigest::sha256()).unwrap();
    Certificate {
        cert: x509.build(),
        key,
    }
}

pub fn acceptor(server: &Certificate) -> SslAcceptor {
    let mut ssl_builder = SslAcceptor::mozilla_intermediate(SslMethod::tls()).unwrap();
    ssl_builder.set_private_key(&server.key).unwrap();
    ssl_builder.set_certificate(&server.cert).unwrap();
    ssl_builder.build()
}

/// Write `certs` as a PEM bundle
pub fn pem_file(certs: &[&X509]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for cert in certs {
        file.write_all(&cert.to_pem().unwrap()).unwrap();
    }
    file
}

pub fn file(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file
}
