//! Error taxonomy for the SIFEN client.
use std::error::Error as StdError;

use thiserror::Error;

type Cause = Box<dyn StdError + Send + Sync>;

/// Category of a [`SifenError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Input shape problems detected before any I/O.
    Validation,
    /// Certificate or signing problems.
    Cryptography,
    /// Connectivity, handshake or timeout problems.
    Network,
    /// Coded rejections produced by SIFEN itself.
    Remote,
    /// Batch/event business rules violated client-side.
    Business,
    /// Anything unclassified.
    Internal,
}

/// Error type shared by every operation of the crate.
///
/// Each variant carries a short code (either a local `VAL_`/`NET_`/`BUS_`
/// style code or a SIFEN wire code such as `0160`) and a human message.
#[derive(Debug, Error)]
pub enum SifenError {
    #[error("[VALIDATION] {code}: {message}")]
    Validation { code: String, message: String },

    #[error("[CRYPTOGRAPHY] {code}: {message}")]
    Cryptography {
        code: String,
        message: String,
        #[source]
        cause: Option<Cause>,
    },

    #[error("[NETWORK] {code}: {message}")]
    Network {
        code: String,
        message: String,
        #[source]
        cause: Option<Cause>,
    },

    #[error("[SIFEN] {code}: {message}")]
    Remote { code: String, message: String },

    #[error("[BUSINESS] {code}: {message}")]
    Business { code: String, message: String },

    #[error("[INTERNAL] {code}: {message}")]
    Internal {
        code: String,
        message: String,
        #[source]
        cause: Option<Cause>,
    },
}

impl SifenError {
    pub fn validation(code: &str, message: impl Into<String>) -> Self {
        SifenError::Validation {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn crypto(code: &str, message: impl Into<String>) -> Self {
        SifenError::Cryptography {
            code: code.to_string(),
            message: message.into(),
            cause: None,
        }
    }

    pub fn crypto_with(code: &str, message: impl Into<String>, cause: Cause) -> Self {
        SifenError::Cryptography {
            code: code.to_string(),
            message: message.into(),
            cause: Some(cause),
        }
    }

    pub fn network(code: &str, message: impl Into<String>) -> Self {
        SifenError::Network {
            code: code.to_string(),
            message: message.into(),
            cause: None,
        }
    }

    pub fn network_with(code: &str, message: impl Into<String>, cause: Cause) -> Self {
        SifenError::Network {
            code: code.to_string(),
            message: message.into(),
            cause: Some(cause),
        }
    }

    pub fn remote(code: &str, message: impl Into<String>) -> Self {
        SifenError::Remote {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn business(code: &str, message: impl Into<String>) -> Self {
        SifenError::Business {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        SifenError::Internal {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            cause: None,
        }
    }

    pub fn internal_with(message: impl Into<String>, cause: Cause) -> Self {
        SifenError::Internal {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            cause: Some(cause),
        }
    }

    /// Wrap a lower-level error, reclassifying it from its text.
    ///
    /// Messages mentioning `timeout` or `connection refused` become network
    /// errors; `certificate` or `tls` become cryptography errors; anything
    /// else is internal.
    pub fn wrap(cause: Cause, context: &str) -> Self {
        let text = cause.to_string().to_lowercase();
        if text.contains("timeout") || text.contains("connection refused") {
            return SifenError::network_with("NETWORK_ERROR", context.to_string(), cause);
        }
        if text.contains("certificate") || text.contains("tls") {
            return SifenError::crypto_with("CRYPTO_ERROR", context.to_string(), cause);
        }
        SifenError::internal_with(context.to_string(), cause)
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SifenError::Validation { .. } => ErrorCategory::Validation,
            SifenError::Cryptography { .. } => ErrorCategory::Cryptography,
            SifenError::Network { .. } => ErrorCategory::Network,
            SifenError::Remote { .. } => ErrorCategory::Remote,
            SifenError::Business { .. } => ErrorCategory::Business,
            SifenError::Internal { .. } => ErrorCategory::Internal,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            SifenError::Validation { code, .. }
            | SifenError::Cryptography { code, .. }
            | SifenError::Network { code, .. }
            | SifenError::Remote { code, .. }
            | SifenError::Business { code, .. }
            | SifenError::Internal { code, .. } => code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SifenError::Validation { message, .. }
            | SifenError::Cryptography { message, .. }
            | SifenError::Network { message, .. }
            | SifenError::Remote { message, .. }
            | SifenError::Business { message, .. }
            | SifenError::Internal { message, .. } => message,
        }
    }

    /// Whether retrying the same operation can reasonably succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SifenError::Network { .. } => true,
            SifenError::Remote { code, .. } => is_recoverable_sifen_code(code),
            _ => false,
        }
    }

    // Predefined validation errors.

    pub fn cdc_invalido() -> Self {
        SifenError::validation("VAL_001", "CDC debe tener 44 caracteres")
    }

    pub fn ruc_invalido() -> Self {
        SifenError::validation("VAL_002", "Formato de RUC inválido")
    }

    pub fn documento_vacio() -> Self {
        SifenError::validation("VAL_006", "Documento sin items")
    }

    pub fn establecimiento_invalido() -> Self {
        SifenError::validation("VAL_007", "Establecimiento debe tener 3 dígitos")
    }

    pub fn punto_expedicion_invalido() -> Self {
        SifenError::validation("VAL_008", "Punto de expedición debe tener 3 dígitos")
    }

    pub fn timbrado_invalido() -> Self {
        SifenError::validation("VAL_009", "Número de timbrado inválido")
    }

    pub fn motivo_requerido() -> Self {
        SifenError::validation("VAL_010", "Motivo es requerido")
    }

    pub fn numero_documento_invalido() -> Self {
        SifenError::validation("VAL_011", "Número de documento debe tener 7 dígitos")
    }

    // Predefined business errors.

    pub fn lote_vacio() -> Self {
        SifenError::business("BUS_001", "El lote debe contener al menos un documento")
    }

    pub fn lote_excede_maximo() -> Self {
        SifenError::business("BUS_002", "El lote excede el máximo de 50 documentos")
    }

    pub fn lote_tipo_mixto() -> Self {
        SifenError::business(
            "BUS_003",
            "Todos los documentos del lote deben ser del mismo tipo",
        )
    }
}

/// Human message for a SIFEN wire code.
pub fn sifen_code_message(code: &str) -> Option<&'static str> {
    let message = match code {
        "0260" => "Documento recibido correctamente",
        "0261" => "Documento aprobado con observaciones",
        "0300" => "Documento procesado correctamente",

        "0100" => "Error interno del servidor SIFEN",
        "0101" => "Estructura XML inválida",
        "0102" => "Firma digital inválida",
        "0103" => "CDC inválido",

        "0160" => "CDC duplicado",
        "0161" => "Emisor no autorizado",
        "0162" => "Receptor inválido",
        "0163" => "Timbrado no vigente",
        "0164" => "Número de documento fuera de rango",

        "0320" => "Tamaño de mensaje excede límite permitido",
        "0321" => "Formato de lote inválido",
        "0322" => "Lote contiene tipos de documento mixtos",

        "0510" => "Evento procesado correctamente",
        "0520" => "Evento aceptado",
        "0530" => "Evento rechazado",
        "0531" => "Evento fuera de plazo",

        "0500" => "Servicio temporalmente no disponible",
        "0501" => "Mantenimiento programado",
        _ => return None,
    };
    Some(message)
}

pub(crate) fn is_recoverable_sifen_code(code: &str) -> bool {
    matches!(code, "0500" | "0501" | "0100")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_reclassifies_timeouts_as_network() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "operation timeout");
        let err = SifenError::wrap(Box::new(io), "ConsultaRUC failed");
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.is_recoverable());
    }

    #[test]
    fn wrap_reclassifies_connection_refused_as_network() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = SifenError::wrap(Box::new(io), "send failed");
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[test]
    fn wrap_reclassifies_tls_as_cryptography() {
        let io = std::io::Error::other("bad TLS certificate chain");
        let err = SifenError::wrap(Box::new(io), "handshake");
        assert_eq!(err.category(), ErrorCategory::Cryptography);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn wrap_defaults_to_internal() {
        let io = std::io::Error::other("disk on fire");
        let err = SifenError::wrap(Box::new(io), "unexpected");
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn remote_recoverability_follows_code_table() {
        assert!(SifenError::remote("0500", "down").is_recoverable());
        assert!(SifenError::remote("0501", "maintenance").is_recoverable());
        assert!(SifenError::remote("0100", "boom").is_recoverable());
        assert!(!SifenError::remote("0160", "duplicate").is_recoverable());
    }

    #[test]
    fn code_dictionary_covers_terminal_codes() {
        assert_eq!(
            sifen_code_message("0260"),
            Some("Documento recibido correctamente")
        );
        assert_eq!(sifen_code_message("0530"), Some("Evento rechazado"));
        assert_eq!(sifen_code_message("9999"), None);
    }

    #[test]
    fn predefined_errors_carry_stable_codes() {
        assert_eq!(SifenError::cdc_invalido().code(), "VAL_001");
        assert_eq!(SifenError::lote_vacio().code(), "BUS_001");
        assert_eq!(SifenError::lote_excede_maximo().code(), "BUS_002");
        assert_eq!(SifenError::lote_tipo_mixto().code(), "BUS_003");
    }
}
