//! Client configuration and environment selection.
use std::fmt;
use std::str::FromStr;

use crate::cache::CacheConfig;
use crate::error::SifenError;
use crate::util::left_pad;

/// Crate version, echoed in the default `User-Agent`.
pub const SDK_VERSION: &str = "0.2.4";

pub const URL_BASE_DEV: &str = "https://sifen-test.set.gov.py";
pub const URL_BASE_PROD: &str = "https://sifen.set.gov.py";
pub const URL_CONSULTA_QR_DEV: &str = "https://ekuatia.set.gov.py/consultas-test/qr?";
pub const URL_CONSULTA_QR_PROD: &str = "https://ekuatia.set.gov.py/consultas/qr?";

/// Target SIFEN environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ambiente {
    Dev,
    Prod,
}

impl Ambiente {
    pub fn as_str(self) -> &'static str {
        match self {
            Ambiente::Dev => "DEV",
            Ambiente::Prod => "PROD",
        }
    }

    pub fn url_base(self) -> &'static str {
        match self {
            Ambiente::Dev => URL_BASE_DEV,
            Ambiente::Prod => URL_BASE_PROD,
        }
    }

    pub fn url_consulta_qr(self) -> &'static str {
        match self {
            Ambiente::Dev => URL_CONSULTA_QR_DEV,
            Ambiente::Prod => URL_CONSULTA_QR_PROD,
        }
    }
}

impl FromStr for Ambiente {
    type Err = SifenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "DEV" => Ok(Ambiente::Dev),
            "PROD" => Ok(Ambiente::Prod),
            other => Err(SifenError::validation(
                "VAL_022",
                format!("ambiente inválido: {other}"),
            )),
        }
    }
}

/// Configuration for [`crate::client::SifenClient`].
///
/// `url_base`, when set, overrides the environment-default base URL; each
/// service appends its fixed WSDL path.
#[derive(Debug, Clone)]
pub struct SifenConfig {
    pub ambiente: Ambiente,
    pub url_base: Option<String>,
    pub url_base_local: String,
    pub url_consulta_qr: String,

    pub path_recibe: String,
    pub path_recibe_lote: String,
    pub path_evento: String,
    pub path_consulta_lote: String,
    pub path_consulta_ruc: String,
    pub path_consulta: String,

    pub usar_certificado_cliente: bool,
    /// Filesystem path to the PKCS#12 container, or the container itself
    /// base64-encoded.
    pub certificado_cliente: String,
    pub contrasena_certificado: String,

    /// Issuer RUC base digits, required for event building.
    pub ruc_emisor: String,
    /// Issuer RUC check digit.
    pub dv_emisor: String,

    pub id_csc: String,
    pub csc: String,

    pub http_connect_timeout_ms: u64,
    pub http_read_timeout_ms: u64,
    pub user_agent: String,

    pub cache: CacheConfig,
}

impl Default for SifenConfig {
    fn default() -> Self {
        SifenConfig {
            ambiente: Ambiente::Dev,
            url_base: None,
            url_base_local: URL_BASE_DEV.to_string(),
            url_consulta_qr: URL_CONSULTA_QR_DEV.to_string(),

            path_recibe: "/de/ws/sync/recibe.wsdl".to_string(),
            path_recibe_lote: "/de/ws/async/recibe-lote.wsdl".to_string(),
            path_evento: "/de/ws/eventos/evento.wsdl".to_string(),
            path_consulta_lote: "/de/ws/consultas/consulta-lote.wsdl".to_string(),
            path_consulta_ruc: "/de/ws/consultas/consulta-ruc.wsdl".to_string(),
            path_consulta: "/de/ws/consultas/consulta.wsdl".to_string(),

            usar_certificado_cliente: true,
            certificado_cliente: String::new(),
            contrasena_certificado: String::new(),

            ruc_emisor: String::new(),
            dv_emisor: String::new(),

            id_csc: "0002".to_string(),
            csc: "EFGH0000000000000000000000000000".to_string(),

            http_connect_timeout_ms: 15_000,
            http_read_timeout_ms: 45_000,
            user_agent: format!("sifen-rs/{SDK_VERSION}"),

            cache: CacheConfig::default(),
        }
    }
}

impl SifenConfig {
    /// Switch environment, resetting the environment-derived URLs.
    pub fn set_ambiente(&mut self, ambiente: Ambiente) {
        self.ambiente = ambiente;
        self.url_base_local = ambiente.url_base().to_string();
        self.url_consulta_qr = ambiente.url_consulta_qr().to_string();
    }

    /// Set the CSC identifier, zero-padded to its 4-digit wire width.
    pub fn set_id_csc(&mut self, id: &str) {
        self.id_csc = left_pad(id, '0', 4);
    }

    /// Effective base URL: explicit override or environment default.
    pub fn base_url(&self) -> &str {
        self.url_base.as_deref().unwrap_or(&self.url_base_local)
    }
}

impl fmt::Display for SifenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SifenConfig{{ambiente={}, url_base={}}}",
            self.ambiente.as_str(),
            self.base_url()
        )
    }
}
