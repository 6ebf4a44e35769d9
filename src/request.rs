//! Request payload builders for the six SIFEN services.
//!
//! Every request is a small record: the monotonic request id (`dId`) plus a
//! service-specific payload. Payloads carrying already-signed documents embed
//! the inner XML verbatim, so requests are rendered by hand instead of going
//! through serde.
use crate::util::xml_escape;

/// Namespace of all SIFEN request elements.
pub const SIFEN_NS: &str = "http://ekuatia.set.gov.py/sifen/xsd";

/// RUC consultation (`rEnviConsRUC`).
#[derive(Debug, Clone)]
pub struct ConsultaRucRequest {
    pub d_id: i64,
    pub d_ruc_cons: String,
}

impl ConsultaRucRequest {
    pub fn to_xml(&self) -> String {
        format!(
            "<rEnviConsRUC xmlns=\"{SIFEN_NS}\"><dId>{}</dId><dRUCCons>{}</dRUCCons></rEnviConsRUC>",
            self.d_id,
            xml_escape(&self.d_ruc_cons)
        )
    }
}

/// Single document reception (`rEnviDe`). `x_de` is the signed `rDE` XML,
/// embedded verbatim.
#[derive(Debug, Clone)]
pub struct EnvioDeRequest {
    pub d_id: i64,
    pub x_de: String,
}

impl EnvioDeRequest {
    pub fn to_xml(&self) -> String {
        format!(
            "<rEnviDe xmlns=\"{SIFEN_NS}\"><dId>{}</dId><xDE>{}</xDE></rEnviDe>",
            self.d_id, self.x_de
        )
    }
}

/// Batch reception (`rEnviLoteDe`). `x_de` carries the base64-encoded zip.
#[derive(Debug, Clone)]
pub struct EnvioLoteRequest {
    pub d_id: i64,
    pub x_de: String,
}

impl EnvioLoteRequest {
    pub fn to_xml(&self) -> String {
        format!(
            "<rEnviLoteDe xmlns=\"{SIFEN_NS}\"><dId>{}</dId><xDE>{}</xDE></rEnviLoteDe>",
            self.d_id, self.x_de
        )
    }
}

/// Document query by CDC (`rEnviConsDe`).
#[derive(Debug, Clone)]
pub struct ConsultaDeRequest {
    pub d_id: i64,
    pub d_cdc_de: String,
}

impl ConsultaDeRequest {
    pub fn to_xml(&self) -> String {
        format!(
            "<rEnviConsDe xmlns=\"{SIFEN_NS}\"><dId>{}</dId><dCdCDE>{}</dCdCDE></rEnviConsDe>",
            self.d_id,
            xml_escape(&self.d_cdc_de)
        )
    }
}

/// Batch query by ticket (`rEnviConsLoteDe`).
#[derive(Debug, Clone)]
pub struct ConsultaLoteRequest {
    pub d_id: i64,
    pub d_prot_cons_lote: String,
}

impl ConsultaLoteRequest {
    pub fn to_xml(&self) -> String {
        format!(
            "<rEnviConsLoteDe xmlns=\"{SIFEN_NS}\"><dId>{}</dId><dProtConsLote>{}</dProtConsLote></rEnviConsLoteDe>",
            self.d_id,
            xml_escape(&self.d_prot_cons_lote)
        )
    }
}

/// Event submission (`rEnviEventoDe`). `d_ev_reg` is the signed event XML,
/// embedded verbatim.
#[derive(Debug, Clone)]
pub struct EnvioEventoRequest {
    pub d_id: i64,
    pub d_ev_reg: String,
}

impl EnvioEventoRequest {
    pub fn to_xml(&self) -> String {
        format!(
            "<rEnviEventoDe xmlns=\"{SIFEN_NS}\"><dId>{}</dId><dEvReg>{}</dEvReg></rEnviEventoDe>",
            self.d_id, self.d_ev_reg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ruc_request_carries_namespace_and_id() {
        let req = ConsultaRucRequest {
            d_id: 7,
            d_ruc_cons: "80069563".to_string(),
        };
        assert_eq!(
            req.to_xml(),
            "<rEnviConsRUC xmlns=\"http://ekuatia.set.gov.py/sifen/xsd\">\
             <dId>7</dId><dRUCCons>80069563</dRUCCons></rEnviConsRUC>"
        );
    }

    #[test]
    fn envio_de_embeds_inner_xml_verbatim() {
        let req = EnvioDeRequest {
            d_id: 1,
            x_de: "<rDE><DE Id=\"x\"/></rDE>".to_string(),
        };
        assert!(req.to_xml().contains("<xDE><rDE><DE Id=\"x\"/></rDE></xDE>"));
    }

    #[test]
    fn query_values_are_escaped() {
        let req = ConsultaLoteRequest {
            d_id: 2,
            d_prot_cons_lote: "a<b".to_string(),
        };
        assert!(req.to_xml().contains("<dProtConsLote>a&lt;b</dProtConsLote>"));
    }
}
