//! XML serialization and parsing for `rDE` documents.
use quick_xml::se::Serializer as QuickXmlSerializer;
use serde::Serialize;

use super::Rde;
use crate::error::SifenError;

pub const XMLNS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const SCHEMA_LOCATION: &str = "http://ekuatia.set.gov.py/sifen/xsd siRecepDE_v150.xsd";
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

impl Rde {
    /// Serialize the document to its wire form, XML declaration included.
    ///
    /// The serialized element order follows the XSD sequence; absent optional
    /// groups produce no element at all, and no insignificant whitespace is
    /// emitted inside the document.
    pub fn to_xml(&self) -> Result<String, SifenError> {
        self.validate()?;

        let mut buffer = String::with_capacity(4096);
        buffer.push_str(XML_DECLARATION);
        {
            let serializer = QuickXmlSerializer::new(&mut buffer);
            self.serialize(serializer)
                .map_err(|e| SifenError::internal(format!("no se pudo serializar el rDE: {e}")))?;
        }
        Ok(buffer)
    }

    /// Parse a document back from its wire form.
    pub fn from_xml(xml: &str) -> Result<Rde, SifenError> {
        quick_xml::de::from_str(xml)
            .map_err(|e| SifenError::internal(format!("no se pudo parsear el rDE: {e}")))
    }

    /// Structural checks applied before serialization: required fields
    /// present, strict-width fields at their widths, exactly one detail
    /// branch populated.
    pub fn validate(&self) -> Result<(), SifenError> {
        let de = &self.de;
        if de.id.len() != 44 {
            return Err(SifenError::cdc_invalido());
        }
        if de.d_fec_firma.is_empty() {
            return Err(SifenError::validation("VAL_004", "dFecFirma es requerido"));
        }
        if de.g_ope_de.i_tip_emi.is_none() {
            return Err(SifenError::validation("VAL_014", "iTipEmi es requerido"));
        }
        if de.g_ope_de.d_cod_seg.is_empty() {
            return Err(SifenError::validation("VAL_014", "dCodSeg es requerido"));
        }

        let timb = &de.g_timb;
        if timb.i_ti_de.is_none() {
            return Err(SifenError::validation("VAL_014", "iTiDE es requerido"));
        }
        if timb.d_num_tim <= 0 {
            return Err(SifenError::timbrado_invalido());
        }
        if timb.d_est.len() != 3 {
            return Err(SifenError::establecimiento_invalido());
        }
        if timb.d_pun_exp.len() != 3 {
            return Err(SifenError::punto_expedicion_invalido());
        }
        if timb.d_num_doc.len() != 7 {
            return Err(SifenError::numero_documento_invalido());
        }

        if de.g_dat_gral_ope.d_fe_emi_de.is_empty() {
            return Err(SifenError::validation("VAL_014", "dFeEmiDE es requerido"));
        }
        if de.g_dat_gral_ope.g_emis.d_ruc_em.is_empty() {
            return Err(SifenError::validation("VAL_014", "dRucEm es requerido"));
        }
        if de.g_dat_gral_ope.g_emis.d_nom_emi.is_empty() {
            return Err(SifenError::validation("VAL_014", "dNomEmi es requerido"));
        }
        if de.g_dat_gral_ope.g_dat_rec.d_nom_rec.is_empty() {
            return Err(SifenError::validation("VAL_014", "dNomRec es requerido"));
        }

        match de.g_dtip_de.branch_count() {
            1 => {}
            0 => {
                return Err(SifenError::validation(
                    "VAL_013",
                    "gDtipDE debe contener un tipo de documento",
                ))
            }
            _ => {
                return Err(SifenError::validation(
                    "VAL_013",
                    "gDtipDE contiene más de un tipo de documento",
                ))
            }
        }

        if de.g_dtip_de.g_cam_item.is_empty() {
            return Err(SifenError::documento_vacio());
        }

        Ok(())
    }
}
