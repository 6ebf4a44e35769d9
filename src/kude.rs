//! KuDE collaborator interface: the read-only view over a document that a
//! printable-representation renderer consumes. Only the exported structure
//! lives here; HTML/QR-image rendering is an external collaborator.
use crate::de::Rde;
use crate::error::SifenError;
use crate::qr::{generate_qr_url, QrParams};

/// Configuration handed to a KuDE renderer.
#[derive(Debug, Clone, Default)]
pub struct KudeConfig {
    /// e.g. `https://ekuatia.set.gov.py/consultas/qr?`.
    pub base_url_qr: String,
    pub csc: String,
    pub id_csc: String,
    /// Issuer logo, base64, if the renderer should embed one.
    pub logo_emisor_base64: Option<String>,
}

/// One printable line item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KudeItem {
    pub codigo: String,
    pub descripcion: String,
    pub cantidad: f64,
    pub unidad: String,
    pub precio_unitario: f64,
    pub descuento: f64,
    pub exenta: f64,
    pub iva5: f64,
    pub iva10: f64,
}

/// Display-ready projection of a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KudeData {
    // Document identification.
    pub cdc: String,
    /// CDC split into groups of four for printing.
    pub cdc_formateado: String,
    pub tipo_documento: String,
    pub numero_timbrado: String,
    pub establecimiento: String,
    pub punto_expedicion: String,
    pub numero_documento: String,
    pub fecha_emision: String,
    pub fecha_firma: String,

    // Issuer.
    pub ruc_emisor: String,
    pub dv_emisor: String,
    pub nombre_emisor: String,
    pub nombre_fantasia: String,
    pub direccion_emisor: String,
    pub telefono_emisor: String,
    pub email_emisor: String,
    pub actividad_economica: String,

    // Receiver.
    pub ruc_receptor: String,
    pub dv_receptor: String,
    pub nombre_receptor: String,
    pub direccion_receptor: String,

    // Items and totals.
    pub items: Vec<KudeItem>,
    pub subtotal_exentas: f64,
    pub subtotal_iva5: f64,
    pub subtotal_iva10: f64,
    pub total_iva5: f64,
    pub total_iva10: f64,
    pub total_iva: f64,
    pub total_general: f64,
    pub moneda: String,
    /// Amount in words; produced by an external generator.
    pub monto_letras: Option<String>,

    // Payment condition.
    pub condicion_pago: String,

    /// Full QR consultation URL.
    pub url_qr: String,
}

impl KudeData {
    /// Project a document into its printable view. `digest_value` is the
    /// base64 `DigestValue` of the signed document, required for the QR URL.
    pub fn from_document(
        rde: &Rde,
        config: &KudeConfig,
        digest_value: &str,
    ) -> Result<KudeData, SifenError> {
        let de = &rde.de;
        if de.g_dtip_de.g_cam_item.is_empty() {
            return Err(SifenError::documento_vacio());
        }
        let timb = &de.g_timb;
        let emis = &de.g_dat_gral_ope.g_emis;
        let rec = &de.g_dat_gral_ope.g_dat_rec;

        let items: Vec<KudeItem> = de.g_dtip_de.g_cam_item.iter().map(kude_item).collect();

        let subtotal_exentas: f64 = items.iter().map(|item| item.exenta).sum();
        let subtotal_iva5: f64 = items.iter().map(|item| item.iva5).sum();
        let subtotal_iva10: f64 = items.iter().map(|item| item.iva10).sum();
        let totals = de.g_tot_sub.clone().unwrap_or_default();

        let fecha_emision = de.g_dat_gral_ope.d_fe_emi_de.clone();
        let emision_dt = chrono::NaiveDateTime::parse_from_str(&fecha_emision, "%Y-%m-%dT%H:%M:%S")
            .unwrap_or_else(|_| chrono::Local::now().naive_local());

        let url_qr = generate_qr_url(
            &config.base_url_qr,
            &QrParams {
                cdc: de.id.clone(),
                fecha_emision: emision_dt,
                ruc_receptor: rec.d_ruc_rec.clone().unwrap_or_default(),
                total_general: totals.d_tot_gral_ope,
                total_iva: totals.d_tot_iva.unwrap_or(0.0),
                items: items.len(),
                digest_value: digest_value.to_string(),
            },
            &config.id_csc,
            &config.csc,
        );

        Ok(KudeData {
            cdc: de.id.clone(),
            cdc_formateado: format_cdc(&de.id),
            tipo_documento: timb
                .i_ti_de
                .map(|tipo| tipo.description().to_string())
                .unwrap_or_default(),
            numero_timbrado: timb.d_num_tim.to_string(),
            establecimiento: timb.d_est.clone(),
            punto_expedicion: timb.d_pun_exp.clone(),
            numero_documento: timb.d_num_doc.clone(),
            fecha_emision,
            fecha_firma: de.d_fec_firma.clone(),

            ruc_emisor: emis.d_ruc_em.clone(),
            dv_emisor: emis.d_dv_emi.clone(),
            nombre_emisor: emis.d_nom_emi.clone(),
            nombre_fantasia: emis.d_nom_fan_emi.clone().unwrap_or_default(),
            direccion_emisor: emis.d_dir_emi.clone(),
            telefono_emisor: emis.d_tel_emi.clone(),
            email_emisor: emis.d_email_e.clone(),
            actividad_economica: emis
                .g_act_eco
                .first()
                .map(|act| act.d_des_act_eco.clone())
                .unwrap_or_default(),

            ruc_receptor: rec.d_ruc_rec.clone().unwrap_or_default(),
            dv_receptor: rec.d_dv_rec.map(|dv| dv.to_string()).unwrap_or_default(),
            nombre_receptor: rec.d_nom_rec.clone(),
            direccion_receptor: rec.d_dir_rec.clone().unwrap_or_default(),

            items,
            subtotal_exentas,
            subtotal_iva5,
            subtotal_iva10,
            total_iva5: totals.d_liq_tot_iva5.unwrap_or(0.0),
            total_iva10: totals.d_liq_tot_iva10.unwrap_or(0.0),
            total_iva: totals.d_tot_iva.unwrap_or(0.0),
            total_general: totals.d_tot_gral_ope,
            moneda: de
                .g_dat_gral_ope
                .g_ope_com
                .as_ref()
                .map(|ope| ope.c_mone_ope.code().to_string())
                .unwrap_or_else(|| "PYG".to_string()),
            monto_letras: None,

            condicion_pago: de
                .g_dtip_de
                .g_cam_cond
                .as_ref()
                .map(|cond| cond.d_d_cond_ope.clone())
                .unwrap_or_default(),

            url_qr,
        })
    }
}

fn kude_item(item: &crate::de::GCamItem) -> KudeItem {
    let neto = item.g_valor_item.g_valor_resta_item.d_tot_ope_item;
    let (exenta, iva5, iva10) = match &item.g_cam_iva {
        Some(iva) if iva.d_tasa_iva == 5.0 => (0.0, neto, 0.0),
        Some(iva) if iva.d_tasa_iva == 10.0 => (0.0, 0.0, neto),
        _ => (neto, 0.0, 0.0),
    };
    KudeItem {
        codigo: item.d_cod_int.clone(),
        descripcion: item.d_des_pro_ser.clone(),
        cantidad: item.d_cant_pro_ser,
        unidad: item.c_uni_med.abreviatura().to_string(),
        precio_unitario: item.g_valor_item.d_p_uni_pro_ser,
        descuento: item
            .g_valor_item
            .g_valor_resta_item
            .d_desc_item
            .unwrap_or(0.0),
        exenta,
        iva5,
        iva10,
    }
}

fn format_cdc(cdc: &str) -> String {
    cdc.as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::de::testutil::sample_rde;

    fn kude_config() -> KudeConfig {
        KudeConfig {
            base_url_qr: "https://ekuatia.set.gov.py/consultas-test/qr?".to_string(),
            csc: "EFGH0000".to_string(),
            id_csc: "0002".to_string(),
            logo_emisor_base64: None,
        }
    }

    #[test]
    fn cdc_is_grouped_in_fours() {
        assert_eq!(
            format_cdc("0180069563100100100000012120240115123456789"),
            "0180 0695 6310 0100 1000 0001 2120 2401 1512 3456 789"
        );
    }

    #[test]
    fn projection_carries_document_issuer_and_items() {
        let rde = sample_rde();
        let data = KudeData::from_document(&rde, &kude_config(), "AbCd==").unwrap();

        assert_eq!(data.cdc, rde.de.id);
        assert_eq!(data.tipo_documento, "Factura electrónica");
        assert_eq!(data.numero_timbrado, "12345678");
        assert_eq!(data.nombre_emisor, "Empresa Test SA");
        assert_eq!(data.ruc_receptor, "50062360");
        assert_eq!(data.moneda, "PYG");
        assert_eq!(data.items.len(), 1);

        // The item code binds to the unaccented field.
        let item = &data.items[0];
        assert_eq!(item.codigo, "001");
        assert_eq!(item.unidad, "UNI");
        assert!((item.iva10 - 200_000.0).abs() < 1e-6);
        assert!((data.total_general - 200_000.0).abs() < 1e-6);

        assert!(data.url_qr.starts_with(&kude_config().base_url_qr));
        assert!(data.url_qr.contains(&format!("Id={}", rde.de.id)));
        assert!(data.url_qr.contains("&cHashQR="));
    }

    #[test]
    fn projection_rejects_empty_documents() {
        let mut rde = sample_rde();
        rde.de.g_dtip_de.g_cam_item.clear();
        let err = KudeData::from_document(&rde, &kude_config(), "").unwrap_err();
        assert_eq!(err.code(), "VAL_006");
    }
}
