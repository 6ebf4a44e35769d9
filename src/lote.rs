//! Batch (lote) pipeline: sign per document, wrap in `rLoteDE`, zip,
//! base64-encode and gate on size.
use std::io::Write;

use base64ct::{Base64, Encoding};
use tracing::debug;

use crate::client::SifenClient;
use crate::de::Rde;
use crate::error::SifenError;
use crate::request::EnvioLoteRequest;
use crate::response::{BatchQueryResponse, BatchReceiptResponse, SifenResponse};

/// Maximum documents per batch.
pub const MAX_DOCUMENTOS_LOTE: usize = 50;
/// Maximum size of the base64-encoded batch, in KiB.
pub const MAX_SIZE_LOTE_KB: usize = 10_000;
/// Name of the single entry inside the zip archive.
pub const LOTE_FILE_NAME: &str = "lote.xml";

/// Result of a successful batch submission.
#[derive(Debug, Clone, PartialEq)]
pub struct LoteResult {
    /// Server-assigned ticket (`dProtConsLot`) for later consultation.
    pub numero_lote: String,
    /// Estimated processing time in minutes.
    pub tiempo_estimado: i32,
    /// Size of the base64 payload actually sent, in KiB.
    pub tamano_enviado_kb: usize,
    pub num_documentos: usize,
}

impl SifenClient {
    /// Build the batch payload: validate, serialize and sign each document,
    /// wrap them in `rLoteDE`, deflate into a zip named `lote.xml` and
    /// base64-encode the archive.
    pub fn crear_lote_de(&self, documentos: &[Rde]) -> Result<String, SifenError> {
        if documentos.is_empty() {
            return Err(SifenError::lote_vacio());
        }
        if documentos.len() > MAX_DOCUMENTOS_LOTE {
            return Err(SifenError::lote_excede_maximo());
        }
        let tipo = documentos[0].de.g_timb.i_ti_de;
        if documentos
            .iter()
            .any(|doc| doc.de.g_timb.i_ti_de != tipo)
        {
            return Err(SifenError::lote_tipo_mixto());
        }

        let mut lote_xml = String::with_capacity(4096 * documentos.len());
        lote_xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        lote_xml.push_str("<rLoteDE><dVerFor>150</dVerFor>");
        for documento in documentos {
            let signed = self.serialize_and_sign(documento)?;
            // The signed rDE goes in verbatim, stripped of its own XML
            // declaration.
            let inner = signed
                .strip_prefix("<?xml version=\"1.0\" encoding=\"UTF-8\"?>")
                .unwrap_or(&signed);
            lote_xml.push_str("<rDE>");
            lote_xml.push_str(inner);
            lote_xml.push_str("</rDE>");
        }
        lote_xml.push_str("</rLoteDE>");

        let zip_bytes = zip_lote(lote_xml.as_bytes())?;
        let encoded = Base64::encode_string(&zip_bytes);

        let size_kb = encoded.len() / 1024;
        if size_kb > MAX_SIZE_LOTE_KB {
            return Err(SifenError::business(
                "BUS_006",
                format!(
                    "tamaño del lote {size_kb} KB excede el máximo permitido {MAX_SIZE_LOTE_KB} KB"
                ),
            ));
        }
        debug!(
            documentos = documentos.len(),
            size_kb, "lote comprimido y codificado"
        );
        Ok(encoded)
    }

    /// Submit a batch for asynchronous processing.
    pub async fn recepcion_lote_de(
        &self,
        documentos: &[Rde],
    ) -> Result<LoteResult, SifenError> {
        let encoded = self.crear_lote_de(documentos)?;
        let request = EnvioLoteRequest {
            d_id: self.next_id(),
            x_de: encoded.clone(),
        };

        let url = self.service_url(&self.config().path_recibe_lote);
        let raw = self.soap().send(&url, &request.to_xml()).await?;
        let response: BatchReceiptResponse = match crate::response::decode_response(&raw)? {
            SifenResponse::RecepcionLote(response) => response,
            _ => {
                return Err(SifenError::remote(
                    "EMPTY_RESPONSE",
                    "response body is empty or invalid type",
                ))
            }
        };

        Ok(LoteResult {
            numero_lote: response.d_prot_cons_lot.clone(),
            tiempo_estimado: response.d_tmp_lot,
            tamano_enviado_kb: encoded.len() / 1024,
            num_documentos: documentos.len(),
        })
    }

    /// Query the per-document outcomes of a previously submitted batch.
    /// Never cached: the server is the source of truth for batch progress.
    pub async fn consulta_lote_de(
        &self,
        numero_lote: &str,
    ) -> Result<BatchQueryResponse, SifenError> {
        if numero_lote.is_empty() {
            return Err(SifenError::validation(
                "VAL_019",
                "número de lote es requerido",
            ));
        }
        self.consulta_lote_raw(numero_lote).await
    }
}

fn zip_lote(xml: &[u8]) -> Result<Vec<u8>, SifenError> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut cursor);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        writer
            .start_file(LOTE_FILE_NAME, options)
            .map_err(|e| SifenError::internal(format!("error al crear archivo en zip: {e}")))?;
        writer
            .write_all(xml)
            .map_err(|e| SifenError::internal(format!("error al escribir en zip: {e}")))?;
        writer
            .finish()
            .map_err(|e| SifenError::internal(format!("error al cerrar zip: {e}")))?;
    }
    Ok(cursor.into_inner())
}
