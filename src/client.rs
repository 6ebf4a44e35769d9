//! Client facade: orchestrates serialize → sign → send → decode and owns the
//! per-client request counter and query cache.
use std::sync::atomic::{AtomicI64, Ordering};

use tracing::debug;

use crate::cache::{SifenCache, SifenCacheStats};
use crate::config::SifenConfig;
use crate::de::Rde;
use crate::error::SifenError;
use crate::events::{
    ActTransporteData, CancelacionData, ConformidadData, DesconocimientoData, DisconformidadData,
    EventBuilder, EventoEnvelope, InutilizacionData, NominacionData, NotificacionData,
};
use crate::request::{
    ConsultaDeRequest, ConsultaLoteRequest, ConsultaRucRequest, EnvioDeRequest,
    EnvioEventoRequest,
};
use crate::response::{
    codes, decode_response, BatchQueryResponse, DocumentQueryResponse, DocumentReceiptResponse,
    EventReceiptResponse, RucQueryResponse, SifenResponse,
};
use crate::sign::XmlSigner;
use crate::soap::{load_certificate, SoapClient};

/// SIFEN client. Safe to share across concurrent callers: the request
/// counter is atomic and the cache is internally locked.
pub struct SifenClient {
    config: SifenConfig,
    soap: SoapClient,
    signer: Option<XmlSigner>,
    request_id: AtomicI64,
    cache: SifenCache,
}

impl SifenClient {
    /// Build the client. When client certificates are enabled the PKCS#12
    /// container is loaded once and feeds both the TLS identity and the XML
    /// signer; nothing is shared across client instances.
    pub fn new(config: SifenConfig) -> Result<SifenClient, SifenError> {
        let (pkcs12, signer) = if config.usar_certificado_cliente {
            let der = load_certificate(&config.certificado_cliente)?;
            let signer = XmlSigner::from_pkcs12(&der, &config.contrasena_certificado)?;
            (Some(der), Some(signer))
        } else {
            (None, None)
        };

        let soap = SoapClient::new(&config, pkcs12.as_deref())?;
        let cache = SifenCache::new(config.cache.clone());

        Ok(SifenClient {
            config,
            soap,
            signer,
            request_id: AtomicI64::new(0),
            cache,
        })
    }

    pub fn config(&self) -> &SifenConfig {
        &self.config
    }

    pub fn cache_stats(&self) -> SifenCacheStats {
        self.cache.stats()
    }

    /// Shut down the cache sweeper; no further cache inserts are accepted.
    pub fn close(&self) {
        self.cache.close();
    }

    // -----------------------------------------------------------------------
    // RUC consultation
    // -----------------------------------------------------------------------

    /// Query taxpayer data by RUC. Replies are cached unless the service
    /// reported itself unavailable (`0500`/`0501`).
    pub async fn consulta_ruc(&self, ruc: &str) -> Result<RucQueryResponse, SifenError> {
        if let Some(cached) = self.cache.ruc.get(ruc) {
            debug!(ruc, "consulta RUC servida desde caché");
            return Ok(cached);
        }

        let request = ConsultaRucRequest {
            d_id: self.next_id(),
            d_ruc_cons: ruc.to_string(),
        };
        let url = self.service_url(&self.config.path_consulta_ruc);
        let raw = self.soap.send(&url, &request.to_xml()).await?;

        let response = match decode_response(&raw)? {
            SifenResponse::ConsultaRuc(response) => response,
            _ => return Err(empty_response()),
        };

        match response.status.d_cod_res.as_str() {
            codes::SERVICIO_NO_DISPONIBLE | codes::MANTENIMIENTO => {}
            _ => self.cache.ruc.set(ruc, response.clone()),
        }
        Ok(response)
    }

    // -----------------------------------------------------------------------
    // Document reception
    // -----------------------------------------------------------------------

    /// Submit a single document: serialize, sign when configured, wrap in
    /// the reception request and decode the reply.
    pub async fn recepcion_de(
        &self,
        documento: &Rde,
    ) -> Result<DocumentReceiptResponse, SifenError> {
        let signed = self.serialize_and_sign(documento)?;
        let inner = signed
            .strip_prefix(crate::de::xml::XML_DECLARATION)
            .unwrap_or(&signed)
            .to_string();

        let request = EnvioDeRequest {
            d_id: self.next_id(),
            x_de: inner,
        };
        let url = self.service_url(&self.config.path_recibe);
        let raw = self.soap.send(&url, &request.to_xml()).await?;

        match decode_response(&raw)? {
            SifenResponse::RecepcionDe(response) => Ok(response),
            _ => Err(empty_response()),
        }
    }

    // -----------------------------------------------------------------------
    // Document query
    // -----------------------------------------------------------------------

    /// Query a document by CDC. Terminal replies (approved `0260`, rejected
    /// `0530`) are cached; anything else is returned uncached.
    pub async fn consulta_de(&self, cdc: &str) -> Result<DocumentQueryResponse, SifenError> {
        if cdc.len() != 44 {
            return Err(SifenError::cdc_invalido());
        }

        if let Some(cached) = self.cache.de.get(cdc) {
            debug!(cdc, "consulta DE servida desde caché");
            return Ok(cached);
        }

        let request = ConsultaDeRequest {
            d_id: self.next_id(),
            d_cdc_de: cdc.to_string(),
        };
        let url = self.service_url(&self.config.path_consulta);
        let raw = self.soap.send(&url, &request.to_xml()).await?;

        let response = match decode_response(&raw)? {
            SifenResponse::ConsultaDe(response) => response,
            _ => return Err(empty_response()),
        };

        if matches!(
            response.status.d_cod_res.as_str(),
            codes::RECIBIDO | codes::EVENTO_RECHAZADO
        ) {
            self.cache.de.set(cdc, response.clone());
        }
        Ok(response)
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    /// Serialize the event, sign it by its `gEvento/@Id` and submit it.
    pub async fn enviar_evento(
        &self,
        evento: &EventoEnvelope,
    ) -> Result<EventReceiptResponse, SifenError> {
        let xml = evento.to_xml()?;
        let signed = match &self.signer {
            Some(signer) => signer.sign(&xml, &evento.g_evento.id)?,
            None => xml,
        };
        let inner = signed
            .strip_prefix(crate::de::xml::XML_DECLARATION)
            .unwrap_or(&signed)
            .to_string();

        let request = EnvioEventoRequest {
            d_id: self.next_id(),
            d_ev_reg: inner,
        };
        let url = self.service_url(&self.config.path_evento);
        let raw = self.soap.send(&url, &request.to_xml()).await?;

        match decode_response(&raw)? {
            SifenResponse::Evento(response) => Ok(response),
            _ => Err(empty_response()),
        }
    }

    /// Cancel a previously approved document.
    pub async fn cancelar_de(
        &self,
        cdc: &str,
        motivo: &str,
    ) -> Result<EventReceiptResponse, SifenError> {
        let evento = self.event_builder().build_cancelacion(CancelacionData {
            cdc: cdc.to_string(),
            motivo: motivo.to_string(),
        })?;
        self.enviar_evento(&evento).await
    }

    /// Void a range of document numbers.
    pub async fn inutilizar_numeracion(
        &self,
        data: InutilizacionData,
    ) -> Result<EventReceiptResponse, SifenError> {
        let evento = self.event_builder().build_inutilizacion(data)?;
        self.enviar_evento(&evento).await
    }

    /// Nominate the receiver of an innominate document.
    pub async fn nominar_de(
        &self,
        data: NominacionData,
    ) -> Result<EventReceiptResponse, SifenError> {
        let evento = self.event_builder().build_nominacion(data)?;
        self.enviar_evento(&evento).await
    }

    /// Update transport data of a remission note.
    pub async fn actualizar_transporte(
        &self,
        data: ActTransporteData,
    ) -> Result<EventReceiptResponse, SifenError> {
        let evento = self.event_builder().build_actualizacion_transporte(data)?;
        self.enviar_evento(&evento).await
    }

    /// Acknowledge conformity with a received document.
    pub async fn confirmar_recepcion(
        &self,
        data: ConformidadData,
    ) -> Result<EventReceiptResponse, SifenError> {
        let evento = self.event_builder().build_conformidad(data)?;
        self.enviar_evento(&evento).await
    }

    /// Report non-conformity with a received document.
    pub async fn reportar_disconformidad(
        &self,
        cdc: &str,
        motivo: &str,
    ) -> Result<EventReceiptResponse, SifenError> {
        let evento = self
            .event_builder()
            .build_disconformidad(DisconformidadData {
                cdc: cdc.to_string(),
                motivo: motivo.to_string(),
            })?;
        self.enviar_evento(&evento).await
    }

    /// Declare ignorance of a document issued in one's name.
    pub async fn desconocer_de(
        &self,
        data: DesconocimientoData,
    ) -> Result<EventReceiptResponse, SifenError> {
        let evento = self.event_builder().build_desconocimiento(data)?;
        self.enviar_evento(&evento).await
    }

    /// Notify reception of a document.
    pub async fn notificar_recepcion(
        &self,
        data: NotificacionData,
    ) -> Result<EventReceiptResponse, SifenError> {
        let evento = self.event_builder().build_notificacion(data)?;
        self.enviar_evento(&evento).await
    }

    // -----------------------------------------------------------------------
    // Internals shared with the lote pipeline
    // -----------------------------------------------------------------------

    /// Next request id: strictly monotonic across all callers of this
    /// client, starting at 1.
    pub(crate) fn next_id(&self) -> i64 {
        self.request_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn soap(&self) -> &SoapClient {
        &self.soap
    }

    pub(crate) fn service_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    /// Serialize a document and, when a certificate is configured, sign it
    /// by its CDC.
    pub(crate) fn serialize_and_sign(&self, documento: &Rde) -> Result<String, SifenError> {
        let xml = documento.to_xml()?;
        match &self.signer {
            Some(signer) => signer.sign(&xml, &documento.de.id),
            None => Ok(xml),
        }
    }

    pub(crate) async fn consulta_lote_raw(
        &self,
        numero_lote: &str,
    ) -> Result<BatchQueryResponse, SifenError> {
        let request = ConsultaLoteRequest {
            d_id: self.next_id(),
            d_prot_cons_lote: numero_lote.to_string(),
        };
        let url = self.service_url(&self.config.path_consulta_lote);
        let raw = self.soap.send(&url, &request.to_xml()).await?;

        match decode_response(&raw)? {
            SifenResponse::ConsultaLote(response) => Ok(response),
            _ => Err(empty_response()),
        }
    }

    fn event_builder(&self) -> EventBuilder {
        EventBuilder::new(
            self.next_id(),
            &self.config.ruc_emisor,
            &self.config.dv_emisor,
        )
    }
}

fn empty_response() -> SifenError {
    SifenError::remote("EMPTY_RESPONSE", "response body is empty or invalid type")
}
