//! Detail group (`gDtipDE`): the four document-kind branches, line items and
//! their value/IVA/tracking sub-entities, operation condition, sector and
//! transport groups.
use serde::{Deserialize, Serialize};

use crate::types::{
    AfectacionIva, CondicionCredito, CondicionOperacion, Departamento, IndicadorPresencia,
    ModalidadTransporte, Moneda, MotivoEmisionNc, MotivoEmisionNr, NaturalezaReceptor,
    NaturalezaVendedor, Pais, ResponsableFlete, TipoCombustible, TipoDocumentoReceptor, TipoPago,
    TipoTransporte, UnidadMedida,
};

/// Detail group (`gDtipDE`). Exactly one of the four document-kind branches
/// must be populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GDtipDe {
    /// Factura electrónica branch.
    #[serde(rename = "gCamFE", skip_serializing_if = "Option::is_none")]
    pub g_cam_fe: Option<GCamFe>,
    /// Autofactura branch.
    #[serde(rename = "gCamAE", skip_serializing_if = "Option::is_none")]
    pub g_cam_ae: Option<GCamAe>,
    /// Nota de crédito/débito branch.
    #[serde(rename = "gCamNCDE", skip_serializing_if = "Option::is_none")]
    pub g_cam_ncde: Option<GCamNcde>,
    /// Nota de remisión branch.
    #[serde(rename = "gCamNRE", skip_serializing_if = "Option::is_none")]
    pub g_cam_nre: Option<GCamNre>,
    #[serde(rename = "gCamCond", skip_serializing_if = "Option::is_none")]
    pub g_cam_cond: Option<GCamCond>,
    #[serde(rename = "gCamItem", default, skip_serializing_if = "Vec::is_empty")]
    pub g_cam_item: Vec<GCamItem>,
    #[serde(rename = "gCamEsp", skip_serializing_if = "Option::is_none")]
    pub g_cam_esp: Option<GCamEsp>,
    #[serde(rename = "gTransp", skip_serializing_if = "Option::is_none")]
    pub g_transp: Option<GTransp>,
}

impl GDtipDe {
    /// Number of populated document-kind branches.
    pub(crate) fn branch_count(&self) -> usize {
        [
            self.g_cam_fe.is_some(),
            self.g_cam_ae.is_some(),
            self.g_cam_ncde.is_some(),
            self.g_cam_nre.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}

/// Factura electrónica fields (`gCamFE`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GCamFe {
    #[serde(rename = "iIndPres")]
    pub i_ind_pres: IndicadorPresencia,
    #[serde(rename = "dDesIndPres")]
    pub d_des_ind_pres: String,
    #[serde(rename = "dFecEmNR", skip_serializing_if = "Option::is_none")]
    pub d_fec_em_nr: Option<String>,
    /// Public-procurement (DNCP) data.
    #[serde(rename = "gCompPub", skip_serializing_if = "Option::is_none")]
    pub g_comp_pub: Option<GCompPub>,
}

impl GCamFe {
    pub fn new(indicador: IndicadorPresencia) -> GCamFe {
        GCamFe {
            i_ind_pres: indicador,
            d_des_ind_pres: indicador.description().to_string(),
            d_fec_em_nr: None,
            g_comp_pub: None,
        }
    }
}

/// Public-procurement data (`gCompPub`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GCompPub {
    #[serde(rename = "dModCont")]
    pub d_mod_cont: String,
    #[serde(rename = "dEntCont")]
    pub d_ent_cont: i32,
    #[serde(rename = "dAnoContP")]
    pub d_ano_cont_p: i16,
    #[serde(rename = "dSecCont")]
    pub d_sec_cont: i32,
    #[serde(rename = "dFeCodCont", skip_serializing_if = "Option::is_none")]
    pub d_fe_cod_cont: Option<String>,
}

/// Autofactura fields (`gCamAE`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GCamAe {
    #[serde(rename = "iNatVen")]
    pub i_nat_ven: NaturalezaVendedor,
    #[serde(rename = "dDesNatVen")]
    pub d_des_nat_ven: String,
    #[serde(rename = "iTipIDVen")]
    pub i_tip_id_ven: TipoDocumentoReceptor,
    #[serde(rename = "dDesTipIDVen")]
    pub d_des_tip_id_ven: String,
    #[serde(rename = "dNumIDVen")]
    pub d_num_id_ven: String,
    #[serde(rename = "dNomVen")]
    pub d_nom_ven: String,
    #[serde(rename = "dDirVen")]
    pub d_dir_ven: String,
    #[serde(rename = "dNumCasVen")]
    pub d_num_cas_ven: i32,
    #[serde(rename = "cDepVen")]
    pub c_dep_ven: Departamento,
    #[serde(rename = "dDesDepVen")]
    pub d_des_dep_ven: String,
    #[serde(rename = "cDisVen", skip_serializing_if = "Option::is_none")]
    pub c_dis_ven: Option<i16>,
    #[serde(rename = "dDesDisVen", skip_serializing_if = "Option::is_none")]
    pub d_des_dis_ven: Option<String>,
    #[serde(rename = "cCiuVen")]
    pub c_ciu_ven: i32,
    #[serde(rename = "dDesCiuVen")]
    pub d_des_ciu_ven: String,
    /// Transaction place.
    #[serde(rename = "gLugRec", skip_serializing_if = "Option::is_none")]
    pub g_lug_rec: Option<GLugRec>,
}

/// Transaction place for autofactura (`gLugRec`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GLugRec {
    #[serde(rename = "dDirLug")]
    pub d_dir_lug: String,
    #[serde(rename = "cDepLug")]
    pub c_dep_lug: Departamento,
    #[serde(rename = "dDesDepLug")]
    pub d_des_dep_lug: String,
    #[serde(rename = "cDisLug", skip_serializing_if = "Option::is_none")]
    pub c_dis_lug: Option<i16>,
    #[serde(rename = "dDesDisLug", skip_serializing_if = "Option::is_none")]
    pub d_des_dis_lug: Option<String>,
    #[serde(rename = "cCiuLug")]
    pub c_ciu_lug: i32,
    #[serde(rename = "dDesCiuLug")]
    pub d_des_ciu_lug: String,
}

/// Nota de crédito/débito fields (`gCamNCDE`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GCamNcde {
    #[serde(rename = "iMotEmi")]
    pub i_mot_emi: MotivoEmisionNc,
    #[serde(rename = "dDesMotEmi")]
    pub d_des_mot_emi: String,
}

impl GCamNcde {
    pub fn new(motivo: MotivoEmisionNc) -> GCamNcde {
        GCamNcde {
            i_mot_emi: motivo,
            d_des_mot_emi: motivo.description().to_string(),
        }
    }
}

/// Nota de remisión fields (`gCamNRE`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GCamNre {
    #[serde(rename = "iMotEmiNR")]
    pub i_mot_emi_nr: MotivoEmisionNr,
    #[serde(rename = "dDesMotEmiNR")]
    pub d_des_mot_emi_nr: String,
    #[serde(rename = "iRespEmiNR")]
    pub i_resp_emi_nr: ResponsableFlete,
    #[serde(rename = "dDesRespEmiNR")]
    pub d_des_resp_emi_nr: String,
    /// Estimated kilometres of the transfer.
    #[serde(rename = "dKmR", skip_serializing_if = "Option::is_none")]
    pub d_km_r: Option<f64>,
    #[serde(rename = "dFecEm", skip_serializing_if = "Option::is_none")]
    pub d_fec_em: Option<String>,
}

/// Operation condition (`gCamCond`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GCamCond {
    #[serde(rename = "iCondOpe")]
    pub i_cond_ope: CondicionOperacion,
    #[serde(rename = "dDCondOpe")]
    pub d_d_cond_ope: String,
    #[serde(rename = "gPaConEIni", default, skip_serializing_if = "Vec::is_empty")]
    pub g_pa_con_e_ini: Vec<GPaConEIni>,
    #[serde(rename = "gPagCred", skip_serializing_if = "Option::is_none")]
    pub g_pag_cred: Option<GPagCred>,
}

/// Cash payment delivery (`gPaConEIni`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GPaConEIni {
    #[serde(rename = "iTiPago")]
    pub i_ti_pago: TipoPago,
    #[serde(rename = "dDesTiPag")]
    pub d_des_ti_pag: String,
    #[serde(rename = "dMonTiPag")]
    pub d_mon_ti_pag: f64,
    #[serde(rename = "cMoneTiPag")]
    pub c_mone_ti_pag: Moneda,
    #[serde(rename = "dDMoneTiPag", skip_serializing_if = "Option::is_none")]
    pub d_d_mone_ti_pag: Option<String>,
    #[serde(rename = "dTiCamTiPag", skip_serializing_if = "Option::is_none")]
    pub d_ti_cam_ti_pag: Option<f64>,
    #[serde(rename = "gPagTarCD", skip_serializing_if = "Option::is_none")]
    pub g_pag_tar_cd: Option<GPagTarCd>,
    #[serde(rename = "gPagCheq", skip_serializing_if = "Option::is_none")]
    pub g_pag_cheq: Option<GPagCheq>,
}

/// Card payment data (`gPagTarCD`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GPagTarCd {
    #[serde(rename = "iDenTarj")]
    pub i_den_tarj: i16,
    #[serde(rename = "dDesDenTarj", skip_serializing_if = "Option::is_none")]
    pub d_des_den_tarj: Option<String>,
    #[serde(rename = "dRSProTar", skip_serializing_if = "Option::is_none")]
    pub d_rs_pro_tar: Option<String>,
    #[serde(rename = "dRUCProTar", skip_serializing_if = "Option::is_none")]
    pub d_ruc_pro_tar: Option<String>,
    #[serde(rename = "dDVProTar", skip_serializing_if = "Option::is_none")]
    pub d_dv_pro_tar: Option<i16>,
    #[serde(rename = "iForProPa", skip_serializing_if = "Option::is_none")]
    pub i_for_pro_pa: Option<i16>,
    #[serde(rename = "dCodAu662", skip_serializing_if = "Option::is_none")]
    pub d_cod_au_662: Option<String>,
}

/// Cheque payment data (`gPagCheq`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GPagCheq {
    #[serde(rename = "dNumCheq")]
    pub d_num_cheq: String,
    #[serde(rename = "dBcoEmi")]
    pub d_bco_emi: String,
}

/// Credit condition (`gPagCred`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GPagCred {
    #[serde(rename = "iCondCred")]
    pub i_cond_cred: CondicionCredito,
    #[serde(rename = "dDCondCred")]
    pub d_d_cond_cred: String,
    #[serde(rename = "dPlazoCre", skip_serializing_if = "Option::is_none")]
    pub d_plazo_cre: Option<String>,
    #[serde(rename = "dCuotas", skip_serializing_if = "Option::is_none")]
    pub d_cuotas: Option<i16>,
    #[serde(rename = "dMonEnt", skip_serializing_if = "Option::is_none")]
    pub d_mon_ent: Option<f64>,
    #[serde(rename = "gCuotas", default, skip_serializing_if = "Vec::is_empty")]
    pub g_cuotas: Vec<GCuotas>,
}

/// Installment detail (`gCuotas`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GCuotas {
    #[serde(rename = "cMoneCuo")]
    pub c_mone_cuo: Moneda,
    #[serde(rename = "dDMoneCuo", skip_serializing_if = "Option::is_none")]
    pub d_d_mone_cuo: Option<String>,
    #[serde(rename = "dMonCuota")]
    pub d_mon_cuota: f64,
    #[serde(rename = "dVencCuo", skip_serializing_if = "Option::is_none")]
    pub d_venc_cuo: Option<String>,
}

/// Line item (`gCamItem`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GCamItem {
    #[serde(rename = "dCodInt")]
    pub d_cod_int: String,
    #[serde(rename = "dParAranc", skip_serializing_if = "Option::is_none")]
    pub d_par_aranc: Option<i16>,
    #[serde(rename = "dNCM", skip_serializing_if = "Option::is_none")]
    pub d_ncm: Option<i32>,
    #[serde(rename = "dDncpG", skip_serializing_if = "Option::is_none")]
    pub d_dncp_g: Option<String>,
    #[serde(rename = "dDncpE", skip_serializing_if = "Option::is_none")]
    pub d_dncp_e: Option<String>,
    #[serde(rename = "dGtin", skip_serializing_if = "Option::is_none")]
    pub d_gtin: Option<i64>,
    #[serde(rename = "dGtinPq", skip_serializing_if = "Option::is_none")]
    pub d_gtin_pq: Option<i64>,
    #[serde(rename = "dDesProSer")]
    pub d_des_pro_ser: String,
    #[serde(rename = "cUniMed")]
    pub c_uni_med: UnidadMedida,
    #[serde(rename = "dDesUniMed")]
    pub d_des_uni_med: String,
    #[serde(rename = "dCantProSer")]
    pub d_cant_pro_ser: f64,
    #[serde(rename = "cPaisOrig", skip_serializing_if = "Option::is_none")]
    pub c_pais_orig: Option<Pais>,
    #[serde(rename = "dDesPaisOrig", skip_serializing_if = "Option::is_none")]
    pub d_des_pais_orig: Option<String>,
    #[serde(rename = "dInfItem", skip_serializing_if = "Option::is_none")]
    pub d_inf_item: Option<String>,
    #[serde(rename = "cRelMerc", skip_serializing_if = "Option::is_none")]
    pub c_rel_merc: Option<i16>,
    #[serde(rename = "dDesRelMerc", skip_serializing_if = "Option::is_none")]
    pub d_des_rel_merc: Option<String>,
    #[serde(rename = "dCanQuiMer", skip_serializing_if = "Option::is_none")]
    pub d_can_qui_mer: Option<f64>,
    #[serde(rename = "dPorQuiMer", skip_serializing_if = "Option::is_none")]
    pub d_por_qui_mer: Option<f64>,
    #[serde(rename = "dCDCAnticipo", skip_serializing_if = "Option::is_none")]
    pub d_cdc_anticipo: Option<String>,
    #[serde(rename = "gValorItem")]
    pub g_valor_item: GValorItem,
    #[serde(rename = "gCamIVA", skip_serializing_if = "Option::is_none")]
    pub g_cam_iva: Option<GCamIva>,
    #[serde(rename = "gRasMerc", skip_serializing_if = "Option::is_none")]
    pub g_ras_merc: Option<GRasMerc>,
    #[serde(rename = "gVehNuevo", skip_serializing_if = "Option::is_none")]
    pub g_veh_nuevo: Option<GVehNuevo>,
}

impl GCamItem {
    /// Minimal item: code, description, unit, quantity and unit price. The
    /// gross total is quantity times unit price; residuals start at the same
    /// value with no discounts.
    pub fn new(
        codigo: &str,
        descripcion: &str,
        unidad: UnidadMedida,
        cantidad: f64,
        precio_unitario: f64,
    ) -> GCamItem {
        let bruto = precio_unitario * cantidad;
        GCamItem {
            d_cod_int: codigo.to_string(),
            d_par_aranc: None,
            d_ncm: None,
            d_dncp_g: None,
            d_dncp_e: None,
            d_gtin: None,
            d_gtin_pq: None,
            d_des_pro_ser: descripcion.to_string(),
            c_uni_med: unidad,
            d_des_uni_med: unidad.description().to_string(),
            d_cant_pro_ser: cantidad,
            c_pais_orig: None,
            d_des_pais_orig: None,
            d_inf_item: None,
            c_rel_merc: None,
            d_des_rel_merc: None,
            d_can_qui_mer: None,
            d_por_qui_mer: None,
            d_cdc_anticipo: None,
            g_valor_item: GValorItem {
                d_p_uni_pro_ser: precio_unitario,
                d_ti_cam_it: None,
                d_tot_bru_ope_item: bruto,
                g_valor_resta_item: GValorRestaItem {
                    d_desc_item: None,
                    d_porc_des_it: None,
                    d_desc_glo_item: None,
                    d_ant_pre_uni_it: None,
                    d_ant_glo_pre_uni_it: None,
                    d_tot_ope_item: bruto,
                    d_tot_ope_gs: None,
                },
            },
            g_cam_iva: None,
            g_ras_merc: None,
            g_veh_nuevo: None,
        }
    }

    /// Attach the IVA sub-entity, deriving base and liquidation from the
    /// item's net total and the given rate/proportion.
    pub fn with_iva(mut self, afectacion: AfectacionIva, tasa: f64, proporcion: f64) -> GCamItem {
        let neto = self.g_valor_item.g_valor_resta_item.d_tot_ope_item;
        let (base, liquidacion) = match afectacion {
            AfectacionIva::Exento | AfectacionIva::Exonerado => (0.0, 0.0),
            _ => {
                let base = neto * proporcion / 100.0 / (1.0 + tasa / 100.0);
                (base, base * tasa / 100.0)
            }
        };
        self.g_cam_iva = Some(GCamIva {
            i_afec_iva: afectacion,
            d_des_afec_iva: afectacion.description().to_string(),
            d_prop_iva: proporcion,
            d_tasa_iva: tasa,
            d_bas_grav_iva: base,
            d_liq_iva_item: liquidacion,
            d_bas_exe: None,
        });
        self
    }
}

/// Item values (`gValorItem`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GValorItem {
    #[serde(rename = "dPUniProSer")]
    pub d_p_uni_pro_ser: f64,
    #[serde(rename = "dTiCamIt", skip_serializing_if = "Option::is_none")]
    pub d_ti_cam_it: Option<f64>,
    #[serde(rename = "dTotBruOpeItem")]
    pub d_tot_bru_ope_item: f64,
    #[serde(rename = "gValorRestaItem")]
    pub g_valor_resta_item: GValorRestaItem,
}

/// Item discounts/anticipos and final totals (`gValorRestaItem`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GValorRestaItem {
    #[serde(rename = "dDescItem", skip_serializing_if = "Option::is_none")]
    pub d_desc_item: Option<f64>,
    #[serde(rename = "dPorcDesIt", skip_serializing_if = "Option::is_none")]
    pub d_porc_des_it: Option<f64>,
    #[serde(rename = "dDescGloItem", skip_serializing_if = "Option::is_none")]
    pub d_desc_glo_item: Option<f64>,
    #[serde(rename = "dAntPreUniIt", skip_serializing_if = "Option::is_none")]
    pub d_ant_pre_uni_it: Option<f64>,
    #[serde(rename = "dAntGloPreUniIt", skip_serializing_if = "Option::is_none")]
    pub d_ant_glo_pre_uni_it: Option<f64>,
    #[serde(rename = "dTotOpeItem")]
    pub d_tot_ope_item: f64,
    #[serde(rename = "dTotOpeGs", skip_serializing_if = "Option::is_none")]
    pub d_tot_ope_gs: Option<f64>,
}

/// Item IVA fields (`gCamIVA`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GCamIva {
    #[serde(rename = "iAfecIVA")]
    pub i_afec_iva: AfectacionIva,
    #[serde(rename = "dDesAfecIVA")]
    pub d_des_afec_iva: String,
    /// Taxed proportion, percentage.
    #[serde(rename = "dPropIVA")]
    pub d_prop_iva: f64,
    #[serde(rename = "dTasaIVA")]
    pub d_tasa_iva: f64,
    #[serde(rename = "dBasGravIVA")]
    pub d_bas_grav_iva: f64,
    #[serde(rename = "dLiqIVAItem")]
    pub d_liq_iva_item: f64,
    #[serde(rename = "dBasExe", skip_serializing_if = "Option::is_none")]
    pub d_bas_exe: Option<f64>,
}

/// Merchandise tracking (`gRasMerc`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GRasMerc {
    #[serde(rename = "dNLote", skip_serializing_if = "Option::is_none")]
    pub d_n_lote: Option<String>,
    #[serde(rename = "dVencMerc", skip_serializing_if = "Option::is_none")]
    pub d_venc_merc: Option<String>,
    #[serde(rename = "dNSerie", skip_serializing_if = "Option::is_none")]
    pub d_n_serie: Option<String>,
    #[serde(rename = "dNPedido", skip_serializing_if = "Option::is_none")]
    pub d_n_pedido: Option<String>,
    #[serde(rename = "dNSeguim", skip_serializing_if = "Option::is_none")]
    pub d_n_seguim: Option<String>,
    #[serde(rename = "gCamImp", skip_serializing_if = "Option::is_none")]
    pub g_cam_imp: Option<GCamImp>,
    #[serde(rename = "dNRegSenave", skip_serializing_if = "Option::is_none")]
    pub d_n_reg_senave: Option<String>,
    #[serde(rename = "dNRegEntCom", skip_serializing_if = "Option::is_none")]
    pub d_n_reg_ent_com: Option<String>,
}

/// Importer data (`gCamImp`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GCamImp {
    #[serde(rename = "dNomImp", skip_serializing_if = "Option::is_none")]
    pub d_nom_imp: Option<String>,
    #[serde(rename = "dDirImp", skip_serializing_if = "Option::is_none")]
    pub d_dir_imp: Option<String>,
    #[serde(rename = "dNumReg", skip_serializing_if = "Option::is_none")]
    pub d_num_reg: Option<String>,
}

/// New/used vehicle sector fields (`gVehNuevo`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GVehNuevo {
    #[serde(rename = "iTipOpVN")]
    pub i_tip_op_vn: i16,
    #[serde(rename = "dDesTipOpVN")]
    pub d_des_tip_op_vn: String,
    #[serde(rename = "dChasis", skip_serializing_if = "Option::is_none")]
    pub d_chasis: Option<String>,
    #[serde(rename = "dColor", skip_serializing_if = "Option::is_none")]
    pub d_color: Option<String>,
    #[serde(rename = "dPotVeh", skip_serializing_if = "Option::is_none")]
    pub d_pot_veh: Option<i32>,
    #[serde(rename = "dCapMot", skip_serializing_if = "Option::is_none")]
    pub d_cap_mot: Option<i32>,
    #[serde(rename = "dPNet", skip_serializing_if = "Option::is_none")]
    pub d_p_net: Option<f64>,
    #[serde(rename = "dPBrut", skip_serializing_if = "Option::is_none")]
    pub d_p_brut: Option<f64>,
    #[serde(rename = "iTipComb", skip_serializing_if = "Option::is_none")]
    pub i_tip_comb: Option<TipoCombustible>,
    #[serde(rename = "dDesTipComb", skip_serializing_if = "Option::is_none")]
    pub d_des_tip_comb: Option<String>,
    #[serde(rename = "dNroMotor", skip_serializing_if = "Option::is_none")]
    pub d_nro_motor: Option<String>,
    #[serde(rename = "dCapTracc", skip_serializing_if = "Option::is_none")]
    pub d_cap_tracc: Option<f64>,
    #[serde(rename = "dAnoFab", skip_serializing_if = "Option::is_none")]
    pub d_ano_fab: Option<i16>,
    #[serde(rename = "dTipVeh", skip_serializing_if = "Option::is_none")]
    pub d_tip_veh: Option<String>,
    #[serde(rename = "dCap", skip_serializing_if = "Option::is_none")]
    pub d_cap: Option<i16>,
    #[serde(rename = "dCil", skip_serializing_if = "Option::is_none")]
    pub d_cil: Option<String>,
}

/// Sector-specific fields (`gCamEsp`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GCamEsp {
    #[serde(rename = "gGrupEner", skip_serializing_if = "Option::is_none")]
    pub g_grup_ener: Option<GGrupEner>,
    #[serde(rename = "gGrupSeg", skip_serializing_if = "Option::is_none")]
    pub g_grup_seg: Option<GGrupSeg>,
    #[serde(rename = "gGrupSup", skip_serializing_if = "Option::is_none")]
    pub g_grup_sup: Option<GGrupSup>,
    #[serde(rename = "gGrupAdi", skip_serializing_if = "Option::is_none")]
    pub g_grup_adi: Option<GGrupAdi>,
}

/// Electric energy sector (`gGrupEner`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GGrupEner {
    #[serde(rename = "dNroMed", default)]
    pub d_nro_med: String,
    #[serde(rename = "dActEner", skip_serializing_if = "Option::is_none")]
    pub d_act_ener: Option<i32>,
    #[serde(rename = "dCatEner", skip_serializing_if = "Option::is_none")]
    pub d_cat_ener: Option<String>,
    #[serde(rename = "dLecAnt", skip_serializing_if = "Option::is_none")]
    pub d_lec_ant: Option<f64>,
    #[serde(rename = "dLecAct", skip_serializing_if = "Option::is_none")]
    pub d_lec_act: Option<f64>,
    #[serde(rename = "dConKwh", skip_serializing_if = "Option::is_none")]
    pub d_con_kwh: Option<f64>,
}

/// Insurance sector (`gGrupSeg`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GGrupSeg {
    #[serde(rename = "dCodEmpSeg", skip_serializing_if = "Option::is_none")]
    pub d_cod_emp_seg: Option<String>,
    #[serde(rename = "gGrupPolSeg", skip_serializing_if = "Option::is_none")]
    pub g_grup_pol_seg: Option<GGrupPolSeg>,
}

/// Insurance policy data (`gGrupPolSeg`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GGrupPolSeg {
    #[serde(rename = "dPoliza", default)]
    pub d_poliza: String,
    #[serde(rename = "dNumPoliza", default)]
    pub d_num_poliza: String,
    #[serde(rename = "dVigencia", skip_serializing_if = "Option::is_none")]
    pub d_vigencia: Option<i16>,
    #[serde(rename = "dUnidVig", skip_serializing_if = "Option::is_none")]
    pub d_unid_vig: Option<String>,
    #[serde(rename = "dFecIniVig", skip_serializing_if = "Option::is_none")]
    pub d_fec_ini_vig: Option<String>,
    #[serde(rename = "dFecFinVig", skip_serializing_if = "Option::is_none")]
    pub d_fec_fin_vig: Option<String>,
    #[serde(rename = "dCodInt", skip_serializing_if = "Option::is_none")]
    pub d_cod_int: Option<String>,
}

/// Supermarket sector (`gGrupSup`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GGrupSup {
    #[serde(rename = "dNomCaj", skip_serializing_if = "Option::is_none")]
    pub d_nom_caj: Option<String>,
    #[serde(rename = "dEfectivo", skip_serializing_if = "Option::is_none")]
    pub d_efectivo: Option<f64>,
    #[serde(rename = "dVuelto", skip_serializing_if = "Option::is_none")]
    pub d_vuelto: Option<f64>,
    #[serde(rename = "dDonac", skip_serializing_if = "Option::is_none")]
    pub d_donac: Option<f64>,
    #[serde(rename = "dDesDonac", skip_serializing_if = "Option::is_none")]
    pub d_des_donac: Option<String>,
}

/// Additional data group (`gGrupAdi`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GGrupAdi {
    #[serde(rename = "dCiclo", skip_serializing_if = "Option::is_none")]
    pub d_ciclo: Option<String>,
    #[serde(rename = "dFecIniC", skip_serializing_if = "Option::is_none")]
    pub d_fec_ini_c: Option<String>,
    #[serde(rename = "dFecFinC", skip_serializing_if = "Option::is_none")]
    pub d_fec_fin_c: Option<String>,
    #[serde(rename = "dVencPag", skip_serializing_if = "Option::is_none")]
    pub d_venc_pag: Option<String>,
    #[serde(rename = "dContrato", skip_serializing_if = "Option::is_none")]
    pub d_contrato: Option<String>,
    #[serde(rename = "dSalAnt", skip_serializing_if = "Option::is_none")]
    pub d_sal_ant: Option<f64>,
}

/// Transport group (`gTransp`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GTransp {
    #[serde(rename = "iTipTrans")]
    pub i_tip_trans: TipoTransporte,
    #[serde(rename = "dDesTipTrans")]
    pub d_des_tip_trans: String,
    #[serde(rename = "iModTrans")]
    pub i_mod_trans: ModalidadTransporte,
    #[serde(rename = "dDesModTrans")]
    pub d_des_mod_trans: String,
    #[serde(rename = "iTipRep")]
    pub i_tip_rep: ResponsableFlete,
    #[serde(rename = "dDesTipRep")]
    pub d_des_tip_rep: String,
    #[serde(rename = "dCondNeg", skip_serializing_if = "Option::is_none")]
    pub d_cond_neg: Option<String>,
    #[serde(rename = "dNuMan", skip_serializing_if = "Option::is_none")]
    pub d_nu_man: Option<String>,
    #[serde(rename = "dNuDespImp", skip_serializing_if = "Option::is_none")]
    pub d_nu_desp_imp: Option<String>,
    #[serde(rename = "dIniTras", skip_serializing_if = "Option::is_none")]
    pub d_ini_tras: Option<String>,
    #[serde(rename = "dFinTras", skip_serializing_if = "Option::is_none")]
    pub d_fin_tras: Option<String>,
    #[serde(rename = "cPaisDest", skip_serializing_if = "Option::is_none")]
    pub c_pais_dest: Option<Pais>,
    #[serde(rename = "dDesPaisDest", skip_serializing_if = "Option::is_none")]
    pub d_des_pais_dest: Option<String>,
    #[serde(rename = "gCamSal", skip_serializing_if = "Option::is_none")]
    pub g_cam_sal: Option<GCamSalEnt>,
    #[serde(rename = "gCamEnt", skip_serializing_if = "Option::is_none")]
    pub g_cam_ent: Option<GCamSalEnt>,
    #[serde(rename = "gVehTras", skip_serializing_if = "Option::is_none")]
    pub g_veh_tras: Option<GVehTras>,
    #[serde(rename = "gCamTrans", skip_serializing_if = "Option::is_none")]
    pub g_cam_trans: Option<GCamTrans>,
}

/// Departure/delivery address (`gCamSal`, `gCamEnt`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GCamSalEnt {
    #[serde(rename = "dDirLocSal", default)]
    pub d_dir_loc_sal: String,
    #[serde(rename = "dNumCasSal", skip_serializing_if = "Option::is_none")]
    pub d_num_cas_sal: Option<String>,
    #[serde(rename = "dComp1Sal", skip_serializing_if = "Option::is_none")]
    pub d_comp1_sal: Option<String>,
    #[serde(rename = "dComp2Sal", skip_serializing_if = "Option::is_none")]
    pub d_comp2_sal: Option<String>,
    #[serde(rename = "cDepSal", skip_serializing_if = "Option::is_none")]
    pub c_dep_sal: Option<Departamento>,
    #[serde(rename = "dDesDepSal", skip_serializing_if = "Option::is_none")]
    pub d_des_dep_sal: Option<String>,
    #[serde(rename = "cDisSal", skip_serializing_if = "Option::is_none")]
    pub c_dis_sal: Option<i16>,
    #[serde(rename = "dDesDisSal", skip_serializing_if = "Option::is_none")]
    pub d_des_dis_sal: Option<String>,
    #[serde(rename = "cCiuSal", skip_serializing_if = "Option::is_none")]
    pub c_ciu_sal: Option<i32>,
    #[serde(rename = "dDesCiuSal", skip_serializing_if = "Option::is_none")]
    pub d_des_ciu_sal: Option<String>,
    #[serde(rename = "cPaisSal", skip_serializing_if = "Option::is_none")]
    pub c_pais_sal: Option<Pais>,
    #[serde(rename = "dDesPaisSal", skip_serializing_if = "Option::is_none")]
    pub d_des_pais_sal: Option<String>,
    #[serde(rename = "dTelSal", skip_serializing_if = "Option::is_none")]
    pub d_tel_sal: Option<String>,
}

/// Vehicle data (`gVehTras`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GVehTras {
    #[serde(rename = "dTipVeh", default)]
    pub d_tip_veh: String,
    #[serde(rename = "dMarVeh", skip_serializing_if = "Option::is_none")]
    pub d_mar_veh: Option<String>,
    #[serde(rename = "dTipIdeVeh", skip_serializing_if = "Option::is_none")]
    pub d_tip_ide_veh: Option<i16>,
    #[serde(rename = "dNroIDVeh", skip_serializing_if = "Option::is_none")]
    pub d_nro_id_veh: Option<String>,
    #[serde(rename = "dAdicVeh", skip_serializing_if = "Option::is_none")]
    pub d_adic_veh: Option<String>,
    #[serde(rename = "dNroMatVeh", skip_serializing_if = "Option::is_none")]
    pub d_nro_mat_veh: Option<String>,
    #[serde(rename = "dNroVuelo", skip_serializing_if = "Option::is_none")]
    pub d_nro_vuelo: Option<String>,
}

/// Carrier data (`gCamTrans`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GCamTrans {
    #[serde(rename = "iNatTrans")]
    pub i_nat_trans: NaturalezaReceptor,
    #[serde(rename = "dNomTrans")]
    pub d_nom_trans: String,
    #[serde(rename = "dRucTrans", skip_serializing_if = "Option::is_none")]
    pub d_ruc_trans: Option<String>,
    #[serde(rename = "dDVTrans", skip_serializing_if = "Option::is_none")]
    pub d_dv_trans: Option<i16>,
    #[serde(rename = "iTipIDTrans", skip_serializing_if = "Option::is_none")]
    pub i_tip_id_trans: Option<TipoDocumentoReceptor>,
    #[serde(rename = "dDTipIDTrans", skip_serializing_if = "Option::is_none")]
    pub d_d_tip_id_trans: Option<String>,
    #[serde(rename = "dNumIDTrans", skip_serializing_if = "Option::is_none")]
    pub d_num_id_trans: Option<String>,
    #[serde(rename = "cNacTrans", skip_serializing_if = "Option::is_none")]
    pub c_nac_trans: Option<Pais>,
    #[serde(rename = "dDesNacTrans", skip_serializing_if = "Option::is_none")]
    pub d_des_nac_trans: Option<String>,
    #[serde(rename = "dDirTrans", skip_serializing_if = "Option::is_none")]
    pub d_dir_trans: Option<String>,
    #[serde(rename = "gCamChof", skip_serializing_if = "Option::is_none")]
    pub g_cam_chof: Option<GCamChof>,
    #[serde(rename = "gCamAgente", skip_serializing_if = "Option::is_none")]
    pub g_cam_agente: Option<GCamAgente>,
}

/// Driver data (`gCamChof`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GCamChof {
    #[serde(rename = "dNomChof", default)]
    pub d_nom_chof: String,
    #[serde(rename = "dNumIDChof", skip_serializing_if = "Option::is_none")]
    pub d_num_id_chof: Option<String>,
    #[serde(rename = "dDirChof", skip_serializing_if = "Option::is_none")]
    pub d_dir_chof: Option<String>,
}

/// Agent data (`gCamAgente`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GCamAgente {
    #[serde(rename = "dNomAg", skip_serializing_if = "Option::is_none")]
    pub d_nom_ag: Option<String>,
    #[serde(rename = "dRucAg", skip_serializing_if = "Option::is_none")]
    pub d_ruc_ag: Option<String>,
    #[serde(rename = "dDVAg", skip_serializing_if = "Option::is_none")]
    pub d_dv_ag: Option<i16>,
    #[serde(rename = "dDirAg", skip_serializing_if = "Option::is_none")]
    pub d_dir_ag: Option<String>,
}
