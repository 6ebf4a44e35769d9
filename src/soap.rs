//! SOAP 1.2 framing over a TLS 1.2-pinned, client-certificate HTTP transport.
use std::path::Path;
use std::time::Duration;

use base64ct::{Base64, Encoding};
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::config::SifenConfig;
use crate::error::SifenError;

pub const SOAP_ENV_NS: &str = "http://www.w3.org/2003/05/soap-envelope";

/// Load the PKCS#12 container from a filesystem path, or decode it from
/// base64 when the value is not a readable path.
pub fn load_certificate(path_or_base64: &str) -> Result<Vec<u8>, SifenError> {
    if Path::new(path_or_base64).exists() {
        return std::fs::read(path_or_base64).map_err(|e| {
            SifenError::crypto_with("CRYPTO_001", "Certificado no encontrado", Box::new(e))
        });
    }
    Base64::decode_vec(path_or_base64).map_err(|e| {
        SifenError::crypto(
            "CRYPTO_001",
            format!("certificado no es un path ni base64 válido: {e}"),
        )
    })
}

/// Wrap a request payload in a SOAP 1.2 envelope with an empty header.
pub fn envelope(payload: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <soap:Envelope xmlns:soap=\"{SOAP_ENV_NS}\">\
         <soap:Header/>\
         <soap:Body>{payload}</soap:Body>\
         </soap:Envelope>"
    )
}

/// HTTP client speaking SOAP 1.2 to the SIFEN services.
pub struct SoapClient {
    http: reqwest::Client,
}

impl SoapClient {
    /// Build the transport. When `pkcs12_der` is given, the client presents
    /// it as TLS identity; TLS is pinned to 1.2 both as minimum and maximum.
    pub fn new(config: &SifenConfig, pkcs12_der: Option<&[u8]>) -> Result<SoapClient, SifenError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(config.http_connect_timeout_ms))
            .timeout(Duration::from_millis(config.http_read_timeout_ms))
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .max_tls_version(reqwest::tls::Version::TLS_1_2)
            .user_agent(config.user_agent.clone());

        if let Some(der) = pkcs12_der {
            let identity =
                reqwest::Identity::from_pkcs12_der(der, &config.contrasena_certificado)
                    .map_err(|e| {
                        SifenError::crypto_with(
                            "CRYPTO_003",
                            "no se pudo cargar la identidad TLS desde el PKCS#12",
                            Box::new(e),
                        )
                    })?;
            builder = builder.identity(identity);
        }

        let http = builder
            .build()
            .map_err(|e| SifenError::wrap(Box::new(e), "no se pudo construir el cliente HTTP"))?;
        Ok(SoapClient { http })
    }

    /// POST the enveloped payload and return the raw response body. A
    /// non-200 status is a network error carrying the body for diagnostics.
    pub async fn send(&self, url: &str, payload: &str) -> Result<String, SifenError> {
        let body = envelope(payload);
        debug!(url, bytes = body.len(), "enviando solicitud SOAP");

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/xml; charset=utf-8")
            .body(body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(classify_transport_error)?;

        if status != reqwest::StatusCode::OK {
            return Err(SifenError::network(
                "NETWORK_ERROR",
                format!("SIFEN retornó estado {status}: {text}"),
            ));
        }
        debug!(url, bytes = text.len(), "respuesta SOAP recibida");
        Ok(text)
    }
}

fn classify_transport_error(err: reqwest::Error) -> SifenError {
    if err.is_timeout() {
        return SifenError::network_with(
            "NET_001",
            "Timeout de conexión con SIFEN",
            Box::new(err),
        );
    }
    if err.is_connect() {
        return SifenError::network_with(
            "NET_003",
            "Conexión rechazada por servidor SIFEN",
            Box::new(err),
        );
    }
    SifenError::wrap(Box::new(err), "request failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_wraps_payload_in_soap12() {
        let out = envelope("<x>1</x>");
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(out.contains("xmlns:soap=\"http://www.w3.org/2003/05/soap-envelope\""));
        assert!(out.contains("<soap:Header/>"));
        assert!(out.contains("<soap:Body><x>1</x></soap:Body>"));
    }

    #[test]
    fn load_certificate_decodes_base64_fallback() {
        let encoded = Base64::encode_string(b"pkcs12-bytes");
        assert_eq!(load_certificate(&encoded).unwrap(), b"pkcs12-bytes");
        assert!(load_certificate("!!not-base64!!").is_err());
    }

    #[test]
    fn load_certificate_prefers_files() {
        let dir = std::env::temp_dir().join("sifen-soap-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("cert.p12");
        std::fs::write(&path, b"file-bytes").unwrap();
        assert_eq!(
            load_certificate(path.to_str().unwrap()).unwrap(),
            b"file-bytes"
        );
        std::fs::remove_file(&path).ok();
    }
}
