//! Client library for SIFEN, Paraguay's national electronic invoicing
//! platform.
//!
//! Given structured business data describing a fiscal document, the crate
//! produces a schema-conformant signed XML document, submits it to the tax
//! authority's SOAP services over mutually-authenticated TLS, decodes the
//! reply and keeps local caches for the idempotent queries.
//!
//! ```rust,no_run
//! use sifen::{SifenClient, SifenConfig};
//!
//! # async fn run() -> Result<(), sifen::SifenError> {
//! let mut config = SifenConfig::default();
//! config.certificado_cliente = "/etc/sifen/emisor.p12".to_string();
//! config.contrasena_certificado = "secreto".to_string();
//! config.ruc_emisor = "80069563".to_string();
//! config.dv_emisor = "1".to_string();
//!
//! let client = SifenClient::new(config)?;
//! let respuesta = client.consulta_ruc("80069563").await?;
//! println!("{}", respuesta.status.d_msg_res);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cdc;
pub mod client;
pub mod config;
pub mod de;
pub mod error;
pub mod events;
pub mod kude;
pub mod lote;
pub mod qr;
pub mod request;
pub mod response;
pub mod sign;
pub mod soap;
pub mod types;
pub mod util;

pub use cache::{Cache, CacheConfig, CacheStats, SifenCache};
pub use cdc::{generate_cdc, validate_cdc, validate_ruc, CdcParams};
pub use client::SifenClient;
pub use config::{Ambiente, SifenConfig, SDK_VERSION};
pub use de::Rde;
pub use error::{ErrorCategory, SifenError};
pub use events::{EventBuilder, EventoEnvelope};
pub use lote::{LoteResult, MAX_DOCUMENTOS_LOTE, MAX_SIZE_LOTE_KB};
pub use qr::{generate_qr_url, QrParams};
pub use sign::XmlSigner;
