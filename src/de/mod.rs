//! Typed tree for the `rDE` document and its sub-groups.
//!
//! Struct and field names track the v150 XSD element names; serde renames
//! carry the exact wire spelling. Optional groups are `Option` and are left
//! out of the XML entirely when absent.
use serde::{Deserialize, Serialize};

use crate::types::{
    CaracteristicaCarga, Departamento, Moneda, NaturalezaReceptor, Pais, TipoContribuyente,
    TipoConstancia, TipoDocumento, TipoDocumentoAsociado, TipoDocumentoImpreso, TipoEmision,
    TipoImpuesto, TipoOperacion, TipoTransaccion, UnidadMedida,
};
use crate::util::now_fecha_hora;

mod detail;
#[cfg(test)]
pub(crate) mod testutil;
mod totals;
pub mod xml;

pub use detail::*;
pub use totals::*;

/// Root `rDE` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "rDE")]
pub struct Rde {
    #[serde(rename = "@xmlns:xsi")]
    pub xmlns_xsi: String,
    #[serde(rename = "@xsi:schemaLocation")]
    pub xsi_schema_location: String,
    /// Format version, constant `150`.
    #[serde(rename = "dVerFor")]
    pub d_ver_for: i32,
    #[serde(rename = "DE")]
    pub de: De,
    #[serde(rename = "gCamFuFD", skip_serializing_if = "Option::is_none")]
    pub g_cam_fu_fd: Option<GCamFuFd>,
}

impl Rde {
    /// New document skeleton for the given CDC. Stamps the schema location,
    /// format version, client-system flag and signing timestamp; `dDVId` is
    /// taken from the CDC's check digit.
    pub fn new(cdc: &str) -> Rde {
        Rde {
            xmlns_xsi: xml::XMLNS_XSI.to_string(),
            xsi_schema_location: xml::SCHEMA_LOCATION.to_string(),
            d_ver_for: 150,
            de: De {
                id: cdc.to_string(),
                d_dv_id: cdc.chars().last().map(String::from).unwrap_or_default(),
                d_fec_firma: now_fecha_hora(),
                d_sis_fact: 1,
                g_ope_de: GOpeDe::default(),
                g_timb: GTimb::default(),
                g_dat_gral_ope: GDatGralOpe::default(),
                g_dtip_de: GDtipDe::default(),
                g_tot_sub: None,
                g_cam_gen: None,
                g_cam_de_asoc: Vec::new(),
            },
            g_cam_fu_fd: None,
        }
    }
}

/// `DE` element; its `Id` attribute is the 44-character CDC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct De {
    #[serde(rename = "@Id")]
    pub id: String,
    /// Check digit of the CDC.
    #[serde(rename = "dDVId")]
    pub d_dv_id: String,
    /// Signing timestamp, `YYYY-MM-DDTHH:MM:SS`.
    #[serde(rename = "dFecFirma")]
    pub d_fec_firma: String,
    /// 1 = client system, 2 = SET's free facturation.
    #[serde(rename = "dSisFact")]
    pub d_sis_fact: i16,
    #[serde(rename = "gOpeDE")]
    pub g_ope_de: GOpeDe,
    #[serde(rename = "gTimb")]
    pub g_timb: GTimb,
    #[serde(rename = "gDatGralOpe")]
    pub g_dat_gral_ope: GDatGralOpe,
    #[serde(rename = "gDtipDE")]
    pub g_dtip_de: GDtipDe,
    #[serde(rename = "gTotSub", skip_serializing_if = "Option::is_none")]
    pub g_tot_sub: Option<GTotSub>,
    #[serde(rename = "gCamGen", skip_serializing_if = "Option::is_none")]
    pub g_cam_gen: Option<GCamGen>,
    #[serde(rename = "gCamDEAsoc", default, skip_serializing_if = "Vec::is_empty")]
    pub g_cam_de_asoc: Vec<GCamDeAsoc>,
}

/// QR data carrier (`gCamFuFD`), filled after signing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GCamFuFd {
    #[serde(rename = "dCarQR")]
    pub d_car_qr: String,
}

/// Operation group (`gOpeDE`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GOpeDe {
    #[serde(rename = "iTipEmi")]
    pub i_tip_emi: Option<TipoEmision>,
    #[serde(rename = "dDesTipEmi", default)]
    pub d_des_tip_emi: String,
    /// Security code of the operation.
    #[serde(rename = "dCodSeg", default)]
    pub d_cod_seg: String,
    #[serde(rename = "dInfoEmi", skip_serializing_if = "Option::is_none")]
    pub d_info_emi: Option<String>,
    #[serde(rename = "dInfoFisc", skip_serializing_if = "Option::is_none")]
    pub d_info_fisc: Option<String>,
}

impl GOpeDe {
    /// Build with the emission-type description echoed automatically.
    pub fn new(tipo_emision: TipoEmision, codigo_seguridad: &str) -> GOpeDe {
        GOpeDe {
            i_tip_emi: Some(tipo_emision),
            d_des_tip_emi: tipo_emision.description().to_string(),
            d_cod_seg: codigo_seguridad.to_string(),
            d_info_emi: None,
            d_info_fisc: None,
        }
    }
}

/// Stamping group (`gTimb`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GTimb {
    #[serde(rename = "iTiDE")]
    pub i_ti_de: Option<TipoDocumento>,
    #[serde(rename = "dDesTiDE", default)]
    pub d_des_ti_de: String,
    /// Stamping authorization number.
    #[serde(rename = "dNumTim", default)]
    pub d_num_tim: i32,
    /// Establishment, 3 digits.
    #[serde(rename = "dEst", default)]
    pub d_est: String,
    /// Expedition point, 3 digits.
    #[serde(rename = "dPunExp", default)]
    pub d_pun_exp: String,
    /// Document number, 7 digits.
    #[serde(rename = "dNumDoc", default)]
    pub d_num_doc: String,
    #[serde(rename = "dSerieNum", skip_serializing_if = "Option::is_none")]
    pub d_serie_num: Option<String>,
    /// Stamping validity start date, `YYYY-MM-DD`.
    #[serde(rename = "dFeIniT", default)]
    pub d_fe_ini_t: String,
}

impl GTimb {
    pub fn new(
        tipo: TipoDocumento,
        numero_timbrado: i32,
        establecimiento: &str,
        punto_expedicion: &str,
        numero_documento: &str,
        fecha_inicio: &str,
    ) -> GTimb {
        GTimb {
            i_ti_de: Some(tipo),
            d_des_ti_de: tipo.description().to_string(),
            d_num_tim: numero_timbrado,
            d_est: establecimiento.to_string(),
            d_pun_exp: punto_expedicion.to_string(),
            d_num_doc: numero_documento.to_string(),
            d_serie_num: None,
            d_fe_ini_t: fecha_inicio.to_string(),
        }
    }
}

/// General operation group (`gDatGralOpe`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GDatGralOpe {
    /// Issue datetime, `YYYY-MM-DDTHH:MM:SS`.
    #[serde(rename = "dFeEmiDE", default)]
    pub d_fe_emi_de: String,
    #[serde(rename = "gOpeCom", skip_serializing_if = "Option::is_none")]
    pub g_ope_com: Option<GOpeCom>,
    #[serde(rename = "gEmis", default)]
    pub g_emis: GEmis,
    #[serde(rename = "gDatRec", default)]
    pub g_dat_rec: GDatRec,
}

/// Commercial operation group (`gOpeCom`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GOpeCom {
    #[serde(rename = "iTipTra", skip_serializing_if = "Option::is_none")]
    pub i_tip_tra: Option<TipoTransaccion>,
    #[serde(rename = "dDesTipTra", skip_serializing_if = "Option::is_none")]
    pub d_des_tip_tra: Option<String>,
    #[serde(rename = "iTImp")]
    pub i_t_imp: TipoImpuesto,
    #[serde(rename = "dDesTImp")]
    pub d_des_t_imp: String,
    #[serde(rename = "cMoneOpe")]
    pub c_mone_ope: Moneda,
    #[serde(rename = "dDesMoneOpe")]
    pub d_des_mone_ope: String,
    #[serde(rename = "dCondTiCam", skip_serializing_if = "Option::is_none")]
    pub d_cond_ti_cam: Option<i16>,
    #[serde(rename = "dTiCam", skip_serializing_if = "Option::is_none")]
    pub d_ti_cam: Option<f64>,
    #[serde(rename = "iCondAnt", skip_serializing_if = "Option::is_none")]
    pub i_cond_ant: Option<i16>,
    #[serde(rename = "dDesCondAnt", skip_serializing_if = "Option::is_none")]
    pub d_des_cond_ant: Option<String>,
}

impl GOpeCom {
    pub fn new(impuesto: TipoImpuesto, moneda: Moneda) -> GOpeCom {
        GOpeCom {
            i_tip_tra: None,
            d_des_tip_tra: None,
            i_t_imp: impuesto,
            d_des_t_imp: impuesto.description().to_string(),
            c_mone_ope: moneda,
            d_des_mone_ope: moneda.nombre().to_string(),
            d_cond_ti_cam: None,
            d_ti_cam: None,
            i_cond_ant: None,
            d_des_cond_ant: None,
        }
    }
}

/// Issuer group (`gEmis`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GEmis {
    #[serde(rename = "dRucEm", default)]
    pub d_ruc_em: String,
    #[serde(rename = "dDVEmi", default)]
    pub d_dv_emi: String,
    #[serde(rename = "iTipCont")]
    pub i_tip_cont: Option<TipoContribuyente>,
    #[serde(rename = "cTipReg", skip_serializing_if = "Option::is_none")]
    pub c_tip_reg: Option<i16>,
    #[serde(rename = "dNomEmi", default)]
    pub d_nom_emi: String,
    #[serde(rename = "dNomFanEmi", skip_serializing_if = "Option::is_none")]
    pub d_nom_fan_emi: Option<String>,
    #[serde(rename = "dDirEmi", default)]
    pub d_dir_emi: String,
    #[serde(rename = "dNumCas", default)]
    pub d_num_cas: String,
    #[serde(rename = "dCompDir1", skip_serializing_if = "Option::is_none")]
    pub d_comp_dir1: Option<String>,
    #[serde(rename = "dCompDir2", skip_serializing_if = "Option::is_none")]
    pub d_comp_dir2: Option<String>,
    #[serde(rename = "cDepEmi")]
    pub c_dep_emi: Option<Departamento>,
    #[serde(rename = "dDesDepEmi", default)]
    pub d_des_dep_emi: String,
    #[serde(rename = "cDisEmi", skip_serializing_if = "Option::is_none")]
    pub c_dis_emi: Option<i16>,
    #[serde(rename = "dDesDisEmi", skip_serializing_if = "Option::is_none")]
    pub d_des_dis_emi: Option<String>,
    #[serde(rename = "cCiuEmi", default)]
    pub c_ciu_emi: i32,
    #[serde(rename = "dDesCiuEmi", default)]
    pub d_des_ciu_emi: String,
    #[serde(rename = "dTelEmi", default)]
    pub d_tel_emi: String,
    #[serde(rename = "dEmailE", default)]
    pub d_email_e: String,
    #[serde(rename = "dDenSuc", skip_serializing_if = "Option::is_none")]
    pub d_den_suc: Option<String>,
    /// Economic activities of the issuer.
    #[serde(rename = "gActEco", default, skip_serializing_if = "Vec::is_empty")]
    pub g_act_eco: Vec<GActEco>,
    #[serde(rename = "gRespDE", skip_serializing_if = "Option::is_none")]
    pub g_resp_de: Option<GRespDe>,
}

/// Economic activity entry (`gActEco`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GActEco {
    #[serde(rename = "cActEco")]
    pub c_act_eco: String,
    #[serde(rename = "dDesActEco")]
    pub d_des_act_eco: String,
}

/// Responsible party for the DE (`gRespDE`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GRespDe {
    #[serde(rename = "iTipIDRespDE")]
    pub i_tip_id_resp_de: i16,
    #[serde(rename = "dDTipIDRespDE")]
    pub d_d_tip_id_resp_de: String,
    #[serde(rename = "dNumIDRespDE")]
    pub d_num_id_resp_de: String,
    #[serde(rename = "dNomRespDE")]
    pub d_nom_resp_de: String,
    #[serde(rename = "dCarRespDE")]
    pub d_car_resp_de: String,
}

/// Receiver group (`gDatRec`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GDatRec {
    #[serde(rename = "iNatRec")]
    pub i_nat_rec: Option<NaturalezaReceptor>,
    #[serde(rename = "iTiOpe")]
    pub i_ti_ope: Option<TipoOperacion>,
    #[serde(rename = "cPaisRec")]
    pub c_pais_rec: Option<Pais>,
    #[serde(rename = "dDesPaisRe", default)]
    pub d_des_pais_re: String,
    #[serde(rename = "iTiContRec", skip_serializing_if = "Option::is_none")]
    pub i_ti_cont_rec: Option<TipoContribuyente>,
    #[serde(rename = "dRucRec", skip_serializing_if = "Option::is_none")]
    pub d_ruc_rec: Option<String>,
    #[serde(rename = "dDVRec", skip_serializing_if = "Option::is_none")]
    pub d_dv_rec: Option<i16>,
    #[serde(rename = "iTipIDRec", skip_serializing_if = "Option::is_none")]
    pub i_tip_id_rec: Option<i16>,
    #[serde(rename = "dDTipIDRec", skip_serializing_if = "Option::is_none")]
    pub d_d_tip_id_rec: Option<String>,
    #[serde(rename = "dNumIDRec", skip_serializing_if = "Option::is_none")]
    pub d_num_id_rec: Option<String>,
    #[serde(rename = "dNomRec", default)]
    pub d_nom_rec: String,
    #[serde(rename = "dNomFanRec", skip_serializing_if = "Option::is_none")]
    pub d_nom_fan_rec: Option<String>,
    #[serde(rename = "dDirRec", skip_serializing_if = "Option::is_none")]
    pub d_dir_rec: Option<String>,
    #[serde(rename = "dNumCasRec", skip_serializing_if = "Option::is_none")]
    pub d_num_cas_rec: Option<i32>,
    #[serde(rename = "cDepRec", skip_serializing_if = "Option::is_none")]
    pub c_dep_rec: Option<Departamento>,
    #[serde(rename = "dDesDepRec", skip_serializing_if = "Option::is_none")]
    pub d_des_dep_rec: Option<String>,
    #[serde(rename = "cDisRec", skip_serializing_if = "Option::is_none")]
    pub c_dis_rec: Option<i16>,
    #[serde(rename = "dDesDisRec", skip_serializing_if = "Option::is_none")]
    pub d_des_dis_rec: Option<String>,
    #[serde(rename = "cCiuRec", skip_serializing_if = "Option::is_none")]
    pub c_ciu_rec: Option<i32>,
    #[serde(rename = "dDesCiuRec", skip_serializing_if = "Option::is_none")]
    pub d_des_ciu_rec: Option<String>,
    #[serde(rename = "dTelRec", skip_serializing_if = "Option::is_none")]
    pub d_tel_rec: Option<String>,
    #[serde(rename = "dCelRec", skip_serializing_if = "Option::is_none")]
    pub d_cel_rec: Option<String>,
    #[serde(rename = "dEmailRec", skip_serializing_if = "Option::is_none")]
    pub d_email_rec: Option<String>,
    #[serde(rename = "dCodCliente", skip_serializing_if = "Option::is_none")]
    pub d_cod_cliente: Option<String>,
}

/// Complementary general group (`gCamGen`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GCamGen {
    #[serde(rename = "dOrdCompra", skip_serializing_if = "Option::is_none")]
    pub d_ord_compra: Option<String>,
    #[serde(rename = "dOrdVta", skip_serializing_if = "Option::is_none")]
    pub d_ord_vta: Option<String>,
    #[serde(rename = "dAsiento", skip_serializing_if = "Option::is_none")]
    pub d_asiento: Option<String>,
    #[serde(rename = "gCamCarg", skip_serializing_if = "Option::is_none")]
    pub g_cam_carg: Option<GCamCarg>,
}

/// Cargo data (`gCamCarg`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GCamCarg {
    #[serde(rename = "cUniMedTotVol", skip_serializing_if = "Option::is_none")]
    pub c_uni_med_tot_vol: Option<UnidadMedida>,
    #[serde(rename = "dDesUniMedTotVol", skip_serializing_if = "Option::is_none")]
    pub d_des_uni_med_tot_vol: Option<String>,
    #[serde(rename = "dTotVolMerc", skip_serializing_if = "Option::is_none")]
    pub d_tot_vol_merc: Option<i64>,
    #[serde(rename = "cUniMedTotPes", skip_serializing_if = "Option::is_none")]
    pub c_uni_med_tot_pes: Option<UnidadMedida>,
    #[serde(rename = "dDesUniMedTotPes", skip_serializing_if = "Option::is_none")]
    pub d_des_uni_med_tot_pes: Option<String>,
    #[serde(rename = "dTotPesMerc", skip_serializing_if = "Option::is_none")]
    pub d_tot_pes_merc: Option<i64>,
    #[serde(rename = "iCarCarga", skip_serializing_if = "Option::is_none")]
    pub i_car_carga: Option<CaracteristicaCarga>,
    #[serde(rename = "dDesCarCarga", skip_serializing_if = "Option::is_none")]
    pub d_des_car_carga: Option<String>,
}

/// Associated-document entry (`gCamDEAsoc`), used by credit/debit notes to
/// reference their source invoices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GCamDeAsoc {
    #[serde(rename = "iTipDocAso")]
    pub i_tip_doc_aso: TipoDocumentoAsociado,
    #[serde(rename = "dDesTipDocAso")]
    pub d_des_tip_doc_aso: String,
    /// CDC of the referenced electronic document.
    #[serde(rename = "dCdCDERef", skip_serializing_if = "Option::is_none")]
    pub d_cdc_de_ref: Option<String>,
    #[serde(rename = "dNTimDI", skip_serializing_if = "Option::is_none")]
    pub d_n_tim_di: Option<String>,
    #[serde(rename = "dEstDocAso", skip_serializing_if = "Option::is_none")]
    pub d_est_doc_aso: Option<String>,
    #[serde(rename = "dPExpDocAso", skip_serializing_if = "Option::is_none")]
    pub d_p_exp_doc_aso: Option<String>,
    #[serde(rename = "dNumDocAso", skip_serializing_if = "Option::is_none")]
    pub d_num_doc_aso: Option<String>,
    #[serde(rename = "iTipoDocAso", skip_serializing_if = "Option::is_none")]
    pub i_tipo_doc_aso: Option<TipoDocumentoImpreso>,
    #[serde(rename = "dDTipoDocAso", skip_serializing_if = "Option::is_none")]
    pub d_d_tipo_doc_aso: Option<String>,
    #[serde(rename = "dFecEmiDI", skip_serializing_if = "Option::is_none")]
    pub d_fec_emi_di: Option<String>,
    #[serde(rename = "dNumComRet", skip_serializing_if = "Option::is_none")]
    pub d_num_com_ret: Option<String>,
    #[serde(rename = "dNumResCF", skip_serializing_if = "Option::is_none")]
    pub d_num_res_cf: Option<String>,
    #[serde(rename = "iTipCons", skip_serializing_if = "Option::is_none")]
    pub i_tip_cons: Option<TipoConstancia>,
    #[serde(rename = "dDesTipCons", skip_serializing_if = "Option::is_none")]
    pub d_des_tip_cons: Option<String>,
    #[serde(rename = "dNumCons", skip_serializing_if = "Option::is_none")]
    pub d_num_cons: Option<i64>,
    #[serde(rename = "dNumControl", skip_serializing_if = "Option::is_none")]
    pub d_num_control: Option<String>,
}

impl GCamDeAsoc {
    /// Reference an electronic document by CDC.
    pub fn electronico(cdc: &str) -> GCamDeAsoc {
        GCamDeAsoc {
            i_tip_doc_aso: TipoDocumentoAsociado::Electronico,
            d_des_tip_doc_aso: TipoDocumentoAsociado::Electronico.description().to_string(),
            d_cdc_de_ref: Some(cdc.to_string()),
            d_n_tim_di: None,
            d_est_doc_aso: None,
            d_p_exp_doc_aso: None,
            d_num_doc_aso: None,
            i_tipo_doc_aso: None,
            d_d_tipo_doc_aso: None,
            d_fec_emi_di: None,
            d_num_com_ret: None,
            d_num_res_cf: None,
            i_tip_cons: None,
            d_des_tip_cons: None,
            d_num_cons: None,
            d_num_control: None,
        }
    }
}
