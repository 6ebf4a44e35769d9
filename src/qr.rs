//! QR consultation-URL construction.
//!
//! The URL carries a fixed-order parameter string whose SHA-256 fingerprint,
//! computed over the parameters concatenated with the taxpayer's CSC secret,
//! is appended as `cHashQR` in lowercase hex.
use chrono::NaiveDateTime;
use sha2::{Digest, Sha256};

use crate::util::format_fecha_hora;

/// Inputs for [`generate_qr_url`].
#[derive(Debug, Clone)]
pub struct QrParams {
    pub cdc: String,
    pub fecha_emision: NaiveDateTime,
    /// Empty for innominate receivers.
    pub ruc_receptor: String,
    pub total_general: f64,
    pub total_iva: f64,
    pub items: usize,
    /// `DigestValue` of the signed document, base64.
    pub digest_value: String,
}

/// Build the full QR URL for a document.
pub fn generate_qr_url(base_url: &str, params: &QrParams, id_csc: &str, csc: &str) -> String {
    let query = format!(
        "nVersion=150&Id={}&dFeEmiDE={}&dRucRec={}&dTotGralOpe={}&dTotIVA={}&cItems={}&DigestValue={}&IdCSC={}",
        params.cdc,
        format_fecha_hora(params.fecha_emision),
        params.ruc_receptor,
        format_amount(params.total_general),
        format_amount(params.total_iva),
        params.items,
        params.digest_value,
        id_csc,
    );

    let mut hasher = Sha256::new();
    hasher.update(query.as_bytes());
    hasher.update(csc.as_bytes());
    let hash = hasher.finalize();

    let mut hash_hex = String::with_capacity(64);
    for byte in hash {
        hash_hex.push_str(&format!("{byte:02x}"));
    }

    format!("{base_url}{query}&cHashQR={hash_hex}")
}

fn format_amount(value: f64) -> String {
    if value == value.trunc() {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn params() -> QrParams {
        QrParams {
            cdc: "01800695631001001000000121202401151234567890".to_string(),
            fecha_emision: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            ruc_receptor: "50062360".to_string(),
            total_general: 270_000.0,
            total_iva: 20_330.0,
            items: 3,
            digest_value: "AbCdEf==".to_string(),
        }
    }

    #[test]
    fn url_has_fixed_parameter_order_and_hash() {
        let url = generate_qr_url(
            "https://ekuatia.set.gov.py/consultas-test/qr?",
            &params(),
            "0002",
            "EFGH0000",
        );

        let expected_query = "nVersion=150&Id=01800695631001001000000121202401151234567890\
             &dFeEmiDE=2024-01-15T10:30:00&dRucRec=50062360&dTotGralOpe=270000&dTotIVA=20330\
             &cItems=3&DigestValue=AbCdEf==&IdCSC=0002";
        assert!(url.starts_with("https://ekuatia.set.gov.py/consultas-test/qr?nVersion=150"));
        assert!(url.contains(expected_query));

        let expected_hash = {
            let mut hasher = Sha256::new();
            hasher.update(expected_query.as_bytes());
            hasher.update(b"EFGH0000");
            hasher
                .finalize()
                .iter()
                .map(|b| format!("{b:02x}"))
                .collect::<String>()
        };
        assert!(url.ends_with(&format!("&cHashQR={expected_hash}")));
    }

    #[test]
    fn hash_depends_on_csc_secret() {
        let a = generate_qr_url("base?", &params(), "0002", "secret-a");
        let b = generate_qr_url("base?", &params(), "0002", "secret-b");
        assert_ne!(a, b);
        let (a_query, _) = a.rsplit_once("&cHashQR=").unwrap();
        let (b_query, _) = b.rsplit_once("&cHashQR=").unwrap();
        assert_eq!(a_query, b_query);
    }

    #[test]
    fn fractional_amounts_keep_decimal_point() {
        let mut p = params();
        p.total_general = 1234.5;
        let url = generate_qr_url("base?", &p, "0002", "csc");
        assert!(url.contains("dTotGralOpe=1234.5&"));
    }
}
