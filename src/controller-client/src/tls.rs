use openssl::error::ErrorStack;
use openssl::ssl::{SslConnector, SslMethod, SslVerifyMode};
use openssl::x509::store::{X509Store, X509StoreBuilder};
use openssl::x509::{X509StoreContextRef, X509};
use std::{fmt, io, path};

// X509_V_ERR_* codes raised by the peer name check
const HOSTNAME_MISMATCH: i32 = 62;
const IP_ADDRESS_MISMATCH: i32 = 64;

// first four bytes of a Java keystore
const JKS_MAGIC: &[u8] = &[0xfe, 0xed, 0xfe, 0xed];
const PEM_CERTIFICATE: &str = "-----BEGIN CERTIFICATE-----";

#[derive(Debug)]
pub enum TrustStoreError {
    Io(io::Error),
    UnsupportedFormat(String),
    WrongFormat(ErrorStack),
    InvalidCertificate(String),
}

impl fmt::Display for TrustStoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrustStoreError::Io(err) => write!(
                f,
                "The keystore file is invalid, check if the file exists: {}",
                err
            ),
            TrustStoreError::UnsupportedFormat(s) => write!(
                f,
                "The keystore file is invalid, the keystore type is not supported: {}",
                s
            ),
            TrustStoreError::WrongFormat(err) => write!(
                f,
                "The keystore file is invalid, the keystore file might be in the wrong format: {}",
                err
            ),
            TrustStoreError::InvalidCertificate(s) => write!(
                f,
                "The keystore file is invalid, check if the certificates are valid: {}",
                s
            ),
        }
    }
}

impl std::error::Error for TrustStoreError {}

/// Certificates used to verify the controller
pub struct TrustMaterial {
    store: X509Store,
    certificates: usize,
}

impl TrustMaterial {
    pub fn certificates(&self) -> usize {
        self.certificates
    }
}

/// Read a trust store: a PEM bundle of one or more certificates, or a single
/// DER encoded certificate.
pub fn load_trust_store<P: AsRef<path::Path>>(p: P) -> Result<TrustMaterial, TrustStoreError> {
    let bytes = std::fs::read(p.as_ref()).map_err(|err| {
        log::warn!("failed to read trust store: {}", p.as_ref().display());
        TrustStoreError::Io(err)
    })?;
    let certs = certificates(&bytes)?;
    let mut builder = X509StoreBuilder::new()
        .map_err(|err| TrustStoreError::InvalidCertificate(err.to_string()))?;
    let certificates = certs.len();
    for cert in certs {
        builder
            .add_cert(cert)
            .map_err(|err| TrustStoreError::InvalidCertificate(err.to_string()))?
    }
    log::debug!(
        "loaded {} certificate(s) from {}",
        certificates,
        p.as_ref().display()
    );
    Ok(TrustMaterial {
        store: builder.build(),
        certificates,
    })
}

fn certificates(bytes: &[u8]) -> Result<Vec<X509>, TrustStoreError> {
    if bytes.starts_with(JKS_MAGIC) {
        Err(TrustStoreError::UnsupportedFormat(
            "JKS keystore, convert it to a PEM certificate bundle".to_string(),
        ))
    } else if String::from_utf8_lossy(bytes).contains(PEM_CERTIFICATE) {
        match X509::stack_from_pem(bytes) {
            Ok(certs) if certs.is_empty() => Err(TrustStoreError::InvalidCertificate(
                "no readable certificates".to_string(),
            )),
            Ok(certs) => Ok(certs),
            Err(err) => Err(TrustStoreError::InvalidCertificate(err.to_string())),
        }
    } else {
        X509::from_der(bytes)
            .map(|cert| vec![cert])
            .map_err(TrustStoreError::WrongFormat)
    }
}

// The chain must verify, but controller certificates name the service
// rather than the address that is dialled, so peer name mismatches pass.
fn controller_hostname_verifier(preverify_ok: bool, ctx: &mut X509StoreContextRef) -> bool {
    preverify_ok || {
        let err = ctx.error().as_raw();
        err == HOSTNAME_MISMATCH || err == IP_ADDRESS_MISMATCH
    }
}

/// TLS connector for controller connections.
///
/// Without trust material the system default trust roots are used.
pub fn ssl_connector(trust: Option<TrustMaterial>) -> Result<SslConnector, ErrorStack> {
    let mut ssl_builder = SslConnector::builder(SslMethod::tls_client())?;
    if let Some(trust) = trust {
        ssl_builder.set_cert_store(trust.store)
    }
    ssl_builder.set_verify_callback(SslVerifyMode::PEER, controller_hostname_verifier);
    Ok(ssl_builder.build())
}
