//! Typed decoding of the SIFEN SOAP reply bodies.
//!
//! Replies arrive as a SOAP envelope whose body holds exactly one of six
//! shapes. Decoding matches elements by `local-name()` so whatever namespace
//! prefixes the server chooses never matter.
use libxml::{parser::Parser, tree::Node, xpath};

use crate::error::SifenError;

/// Terminal and notable SIFEN result codes.
pub mod codes {
    /// DE recibido correctamente.
    pub const RECIBIDO: &str = "0260";
    /// DE aprobado con observaciones.
    pub const APROBADO_CON_OBS: &str = "0261";
    /// DE procesado correctamente.
    pub const PROCESADO: &str = "0300";
    /// CDC duplicado.
    pub const CDC_DUPLICADO: &str = "0160";
    /// Evento procesado correctamente.
    pub const EVENTO_PROCESADO: &str = "0510";
    /// Evento aceptado.
    pub const EVENTO_ACEPTADO: &str = "0520";
    /// Evento rechazado.
    pub const EVENTO_RECHAZADO: &str = "0530";
    /// Servicio temporalmente no disponible.
    pub const SERVICIO_NO_DISPONIBLE: &str = "0500";
    /// Mantenimiento programado.
    pub const MANTENIMIENTO: &str = "0501";
}

/// Common `(dCodRes, dMsgRes)` pair present on every reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseStatus {
    pub d_cod_res: String,
    pub d_msg_res: String,
}

impl ResponseStatus {
    pub fn is_success(&self) -> bool {
        matches!(
            self.d_cod_res.as_str(),
            codes::RECIBIDO | codes::APROBADO_CON_OBS | codes::PROCESADO
        )
    }
}

/// RUC consultation reply (`rResEnviConsRuc`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RucQueryResponse {
    pub status: ResponseStatus,
    pub x_cont_ruc: Option<RucInfo>,
}

/// `xContRUC` payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RucInfo {
    pub d_ruc_cons: String,
    pub d_raz_cons: String,
    pub d_cod_est_cons: String,
    pub d_des_est_cons: String,
    pub d_ruc_fact_elec: String,
}

/// Per-document processing protocol (`rProtDe`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingProtocol {
    /// CDC of the processed document.
    pub id: String,
    pub d_fec_proc: String,
    pub d_dig_val: String,
    pub d_est_res: String,
    pub d_prot_aut: String,
    pub g_res_proc: Vec<ProcessingResult>,
}

/// One `gResProc` entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingResult {
    pub d_cod_res: String,
    pub d_msg_res: String,
}

/// Single-document reception reply (`rRetEnviDe`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentReceiptResponse {
    pub status: ResponseStatus,
    pub r_prot_de: Option<ProcessingProtocol>,
}

impl DocumentReceiptResponse {
    pub fn is_approved(&self) -> bool {
        self.r_prot_de
            .as_ref()
            .map(|prot| prot.d_est_res == "Aprobado")
            .unwrap_or(false)
    }
}

/// Batch reception reply (`rRetEnviLoteDe`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReceiptResponse {
    pub status: ResponseStatus,
    /// Ticket for later consultation.
    pub d_prot_cons_lot: String,
    /// Estimated processing time in minutes.
    pub d_tmp_lot: i32,
}

/// Document query reply (`rResEnviConsDe`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentQueryResponse {
    pub status: ResponseStatus,
    pub r_prot_de: Option<ProcessingProtocol>,
    /// Raw `xContenDE` XML when the server returns the document body.
    pub x_conten_de: Option<String>,
}

/// Batch query reply (`rResEnviConsLoteDe`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchQueryResponse {
    pub status: ResponseStatus,
    pub d_est_lote: String,
    pub d_prot_cons_lot: String,
    pub g_res_proc_lote: Vec<BatchDocumentResult>,
}

/// Per-document outcome inside a batch query reply (`gResProcLot`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchDocumentResult {
    pub id: String,
    pub d_est_res: String,
    pub d_prot_aut: String,
    pub g_res_proc: Vec<ProcessingResult>,
}

/// Event protocol (`rProtEve`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventProtocol {
    pub id: String,
    pub d_fec_proc: String,
    pub d_cod_res: String,
    pub d_msg_res: String,
}

/// Event reception reply (`rRetEnviEventoDe`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventReceiptResponse {
    pub status: ResponseStatus,
    pub r_prot_eve: Option<EventProtocol>,
}

impl EventReceiptResponse {
    pub fn is_approved(&self) -> bool {
        self.r_prot_eve
            .as_ref()
            .map(|prot| {
                prot.d_cod_res == codes::EVENTO_PROCESADO
                    || prot.d_cod_res == codes::EVENTO_ACEPTADO
            })
            .unwrap_or(false)
    }
}

/// Discriminated union over the six reply shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum SifenResponse {
    ConsultaRuc(RucQueryResponse),
    RecepcionDe(DocumentReceiptResponse),
    RecepcionLote(BatchReceiptResponse),
    ConsultaDe(DocumentQueryResponse),
    ConsultaLote(BatchQueryResponse),
    Evento(EventReceiptResponse),
}

/// Decode a SOAP reply into the shape present in its body.
///
/// Exactly one shape is populated per reply; a body matching none of them is
/// an `EMPTY_RESPONSE` error.
pub fn decode_response(xml: &str) -> Result<SifenResponse, SifenError> {
    let doc = Parser::default()
        .parse_string(xml)
        .map_err(|e| SifenError::remote("XML_ERROR", format!("failed to unmarshal response: {e:?}")))?;
    let ctx = xpath::Context::new(&doc)
        .map_err(|e| SifenError::remote("XML_ERROR", format!("xpath context error: {e:?}")))?;

    if let Some(node) = find_first(&ctx, "rResEnviConsRuc")? {
        return Ok(SifenResponse::ConsultaRuc(decode_ruc(&node)));
    }
    if let Some(node) = find_first(&ctx, "rRetEnviDe")? {
        return Ok(SifenResponse::RecepcionDe(DocumentReceiptResponse {
            status: decode_status(&node),
            r_prot_de: child(&node, "rProtDe").map(|prot| decode_protocol(&prot)),
        }));
    }
    if let Some(node) = find_first(&ctx, "rRetEnviLoteDe")? {
        return Ok(SifenResponse::RecepcionLote(BatchReceiptResponse {
            status: decode_status(&node),
            d_prot_cons_lot: child_text(&node, "dProtConsLot"),
            d_tmp_lot: child_text(&node, "dTmpLot").parse().unwrap_or(0),
        }));
    }
    if let Some(node) = find_first(&ctx, "rResEnviConsDe")? {
        return Ok(SifenResponse::ConsultaDe(DocumentQueryResponse {
            status: decode_status(&node),
            r_prot_de: child(&node, "rProtDe").map(|prot| decode_protocol(&prot)),
            x_conten_de: child(&node, "xContenDE").map(|content| content.get_content()),
        }));
    }
    if let Some(node) = find_first(&ctx, "rResEnviConsLoteDe")? {
        return Ok(SifenResponse::ConsultaLote(BatchQueryResponse {
            status: decode_status(&node),
            d_est_lote: child_text(&node, "dEstLote"),
            d_prot_cons_lot: child_text(&node, "dProtConsLot"),
            g_res_proc_lote: children(&node, "gResProcLot")
                .iter()
                .map(decode_batch_result)
                .collect(),
        }));
    }
    if let Some(node) = find_first(&ctx, "rRetEnviEventoDe")? {
        return Ok(SifenResponse::Evento(EventReceiptResponse {
            status: decode_status(&node),
            r_prot_eve: child(&node, "rProtEve").map(|prot| EventProtocol {
                id: child_text(&prot, "Id"),
                d_fec_proc: child_text(&prot, "dFecProc"),
                d_cod_res: child_text(&prot, "dCodRes"),
                d_msg_res: child_text(&prot, "dMsgRes"),
            }),
        }));
    }

    Err(SifenError::remote(
        "EMPTY_RESPONSE",
        "response body is empty or invalid type",
    ))
}

fn decode_ruc(node: &Node) -> RucQueryResponse {
    RucQueryResponse {
        status: decode_status(node),
        x_cont_ruc: child(node, "xContRUC").map(|cont| RucInfo {
            d_ruc_cons: child_text(&cont, "dRUCCons"),
            d_raz_cons: child_text(&cont, "dRazCons"),
            d_cod_est_cons: child_text(&cont, "dCodEstCons"),
            d_des_est_cons: child_text(&cont, "dDesEstCons"),
            d_ruc_fact_elec: child_text(&cont, "dRUCFactElec"),
        }),
    }
}

fn decode_status(node: &Node) -> ResponseStatus {
    ResponseStatus {
        d_cod_res: child_text(node, "dCodRes"),
        d_msg_res: child_text(node, "dMsgRes"),
    }
}

fn decode_protocol(node: &Node) -> ProcessingProtocol {
    ProcessingProtocol {
        id: child_text(node, "Id"),
        d_fec_proc: child_text(node, "dFecProc"),
        d_dig_val: child_text(node, "dDigVal"),
        d_est_res: child_text(node, "dEstRes"),
        d_prot_aut: child_text(node, "dProtAut"),
        g_res_proc: decode_results(node),
    }
}

fn decode_batch_result(node: &Node) -> BatchDocumentResult {
    BatchDocumentResult {
        id: child_text(node, "Id"),
        d_est_res: child_text(node, "dEstRes"),
        d_prot_aut: child_text(node, "dProtAut"),
        g_res_proc: decode_results(node),
    }
}

fn decode_results(node: &Node) -> Vec<ProcessingResult> {
    children(node, "gResProc")
        .iter()
        .map(|res| ProcessingResult {
            d_cod_res: child_text(res, "dCodRes"),
            d_msg_res: child_text(res, "dMsgRes"),
        })
        .collect()
}

fn find_first(ctx: &xpath::Context, local_name: &str) -> Result<Option<Node>, SifenError> {
    let nodes = ctx
        .evaluate(&format!("//*[local-name()='{local_name}']"))
        .map_err(|e| SifenError::remote("XML_ERROR", format!("xpath error: {e:?}")))?
        .get_nodes_as_vec();
    Ok(nodes.into_iter().next())
}

fn child(node: &Node, name: &str) -> Option<Node> {
    node.get_child_elements()
        .into_iter()
        .find(|element| element.get_name() == name)
}

fn children(node: &Node, name: &str) -> Vec<Node> {
    node.get_child_elements()
        .into_iter()
        .filter(|element| element.get_name() == name)
        .collect()
}

fn child_text(node: &Node, name: &str) -> String {
    child(node, name)
        .map(|element| element.get_content().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(body: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <env:Envelope xmlns:env=\"http://www.w3.org/2003/05/soap-envelope\">\
             <env:Body>{body}</env:Body></env:Envelope>"
        )
    }

    #[test]
    fn decodes_ruc_consultation() {
        let xml = envelope(
            "<ns:rResEnviConsRuc xmlns:ns=\"http://ekuatia.set.gov.py/sifen/xsd\">\
             <ns:dCodRes>0502</ns:dCodRes><ns:dMsgRes>RUC encontrado</ns:dMsgRes>\
             <ns:xContRUC><ns:dRUCCons>80069563</ns:dRUCCons>\
             <ns:dRazCons>EMPRESA SA</ns:dRazCons>\
             <ns:dCodEstCons>ACT</ns:dCodEstCons>\
             <ns:dDesEstCons>ACTIVO</ns:dDesEstCons>\
             <ns:dRUCFactElec>S</ns:dRUCFactElec></ns:xContRUC>\
             </ns:rResEnviConsRuc>",
        );
        match decode_response(&xml).unwrap() {
            SifenResponse::ConsultaRuc(resp) => {
                assert_eq!(resp.status.d_cod_res, "0502");
                let info = resp.x_cont_ruc.unwrap();
                assert_eq!(info.d_raz_cons, "EMPRESA SA");
                assert_eq!(info.d_ruc_fact_elec, "S");
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn decodes_document_reception_with_protocol() {
        let xml = envelope(
            "<rRetEnviDe><dCodRes>0260</dCodRes><dMsgRes>ok</dMsgRes>\
             <rProtDe><Id>0180069563</Id><dFecProc>2024-01-15T10:31:00</dFecProc>\
             <dDigVal>abc=</dDigVal><dEstRes>Aprobado</dEstRes><dProtAut>777</dProtAut>\
             <gResProc><dCodRes>0260</dCodRes><dMsgRes>recibido</dMsgRes></gResProc>\
             </rProtDe></rRetEnviDe>",
        );
        match decode_response(&xml).unwrap() {
            SifenResponse::RecepcionDe(resp) => {
                assert!(resp.status.is_success());
                assert!(resp.is_approved());
                let prot = resp.r_prot_de.unwrap();
                assert_eq!(prot.d_prot_aut, "777");
                assert_eq!(prot.g_res_proc.len(), 1);
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn decodes_batch_reception_and_query() {
        let xml = envelope(
            "<rRetEnviLoteDe><dCodRes>0300</dCodRes><dMsgRes>lote recibido</dMsgRes>\
             <dProtConsLot>12345678</dProtConsLot><dTmpLot>5</dTmpLot></rRetEnviLoteDe>",
        );
        match decode_response(&xml).unwrap() {
            SifenResponse::RecepcionLote(resp) => {
                assert_eq!(resp.d_prot_cons_lot, "12345678");
                assert_eq!(resp.d_tmp_lot, 5);
            }
            other => panic!("unexpected shape: {other:?}"),
        }

        let xml = envelope(
            "<rResEnviConsLoteDe><dCodRes>0362</dCodRes><dMsgRes>procesado</dMsgRes>\
             <dEstLote>Finalizado</dEstLote><dProtConsLot>12345678</dProtConsLot>\
             <gResProcLot><Id>cdc1</Id><dEstRes>Aprobado</dEstRes><dProtAut>1</dProtAut>\
             <gResProc><dCodRes>0260</dCodRes><dMsgRes>ok</dMsgRes></gResProc></gResProcLot>\
             <gResProcLot><Id>cdc2</Id><dEstRes>Rechazado</dEstRes><dProtAut></dProtAut>\
             </gResProcLot></rResEnviConsLoteDe>",
        );
        match decode_response(&xml).unwrap() {
            SifenResponse::ConsultaLote(resp) => {
                assert_eq!(resp.d_est_lote, "Finalizado");
                assert_eq!(resp.g_res_proc_lote.len(), 2);
                assert_eq!(resp.g_res_proc_lote[0].id, "cdc1");
                assert_eq!(resp.g_res_proc_lote[1].d_est_res, "Rechazado");
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn decodes_document_query_with_content() {
        let xml = envelope(
            "<rResEnviConsDe><dCodRes>0260</dCodRes><dMsgRes>ok</dMsgRes>\
             <xContenDE>&lt;rDE&gt;...&lt;/rDE&gt;</xContenDE></rResEnviConsDe>",
        );
        match decode_response(&xml).unwrap() {
            SifenResponse::ConsultaDe(resp) => {
                assert_eq!(resp.x_conten_de.as_deref(), Some("<rDE>...</rDE>"));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn decodes_event_receipt() {
        let xml = envelope(
            "<rRetEnviEventoDe><dCodRes>0520</dCodRes><dMsgRes>aceptado</dMsgRes>\
             <rProtEve><Id>evt1</Id><dFecProc>2024-01-15T11:00:00</dFecProc>\
             <dCodRes>0520</dCodRes><dMsgRes>Evento aceptado</dMsgRes></rProtEve>\
             </rRetEnviEventoDe>",
        );
        match decode_response(&xml).unwrap() {
            SifenResponse::Evento(resp) => {
                assert!(resp.is_approved());
                assert_eq!(resp.r_prot_eve.unwrap().id, "evt1");
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn empty_body_is_an_empty_response_error() {
        let xml = envelope("");
        let err = decode_response(&xml).unwrap_err();
        assert_eq!(err.code(), "EMPTY_RESPONSE");
    }

    #[test]
    fn status_success_set_is_closed() {
        for code in ["0260", "0261", "0300"] {
            let status = ResponseStatus {
                d_cod_res: code.to_string(),
                d_msg_res: String::new(),
            };
            assert!(status.is_success());
        }
        let status = ResponseStatus {
            d_cod_res: "0160".to_string(),
            d_msg_res: String::new(),
        };
        assert!(!status.is_success());
    }
}
