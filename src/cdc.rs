//! CDC (Código de Control) generation and Module-11 check digits.
//!
//! The CDC is the 44-character document identifier that doubles as the `Id`
//! attribute of the `DE` element. Its field order and padding are part of the
//! fiscal contract:
//!
//! `DD RRRRRRRR V EEE PPP NNNNNNN T E AAAAMMDD SSSSSSSSS C`
use chrono::NaiveDate;

use crate::error::SifenError;
use crate::types::{TipoContribuyente, TipoDocumento, TipoEmision};
use crate::util::left_pad;

/// Parameter bundle for [`generate_cdc`].
#[derive(Debug, Clone)]
pub struct CdcParams {
    pub tipo_documento: TipoDocumento,
    /// RUC base digits, left-padded to 8 during generation.
    pub ruc: String,
    /// Check digit of the RUC.
    pub digito_verificador: String,
    /// Establishment code, exactly 3 digits.
    pub establecimiento: String,
    /// Expedition point, exactly 3 digits.
    pub punto_expedicion: String,
    /// Document number, exactly 7 digits.
    pub numero_documento: String,
    pub tipo_contribuyente: TipoContribuyente,
    pub fecha_emision: NaiveDate,
    pub tipo_emision: TipoEmision,
    /// Security code, exactly 9 digits.
    pub codigo_seguridad: String,
}

/// Build the 44-character CDC from its parameter bundle.
pub fn generate_cdc(params: &CdcParams) -> Result<String, SifenError> {
    if params.ruc.is_empty() {
        return Err(SifenError::ruc_invalido());
    }
    if params.establecimiento.len() != 3 {
        return Err(SifenError::establecimiento_invalido());
    }
    if params.punto_expedicion.len() != 3 {
        return Err(SifenError::punto_expedicion_invalido());
    }
    if params.numero_documento.len() != 7 {
        return Err(SifenError::numero_documento_invalido());
    }
    if params.codigo_seguridad.len() != 9 {
        return Err(SifenError::validation(
            "VAL_012",
            "Código de seguridad debe tener 9 dígitos",
        ));
    }

    let mut cdc = String::with_capacity(44);
    cdc.push_str(&left_pad(&params.tipo_documento.code().to_string(), '0', 2));
    cdc.push_str(&left_pad(&params.ruc, '0', 8));
    cdc.push_str(&left_pad(&params.digito_verificador, '0', 1));
    cdc.push_str(&params.establecimiento);
    cdc.push_str(&params.punto_expedicion);
    cdc.push_str(&params.numero_documento);
    cdc.push_str(&params.tipo_contribuyente.code().to_string());
    cdc.push_str(&params.tipo_emision.code().to_string());
    cdc.push_str(&params.fecha_emision.format("%Y%m%d").to_string());
    cdc.push_str(&params.codigo_seguridad);

    let dv = cdc_check_digit(&cdc);
    cdc.push_str(&dv.to_string());
    Ok(cdc)
}

/// Module-11 check digit for the 43-digit CDC prefix.
///
/// Digits are walked right to left with the weight cycle `(2,3,4,5,6,7)`;
/// a result of 10 or 11 collapses to 0. Non-digit characters are skipped.
pub fn cdc_check_digit(digits: &str) -> u32 {
    const WEIGHTS: [u32; 6] = [2, 3, 4, 5, 6, 7];
    let mut sum = 0u32;
    let mut weight_index = 0usize;
    for c in digits.chars().rev() {
        let Some(digit) = c.to_digit(10) else {
            continue;
        };
        sum += digit * WEIGHTS[weight_index % WEIGHTS.len()];
        weight_index += 1;
    }
    module11(sum)
}

/// Module-11 check digit for a RUC base.
///
/// Weights `(2..=10)` apply right to left; digits beyond the weight vector
/// are ignored.
pub fn ruc_check_digit(base: &str) -> u32 {
    const WEIGHTS: [u32; 9] = [2, 3, 4, 5, 6, 7, 8, 9, 10];
    let mut sum = 0u32;
    let mut weight_index = 0usize;
    for c in base.chars().rev() {
        let Some(digit) = c.to_digit(10) else {
            continue;
        };
        if weight_index < WEIGHTS.len() {
            sum += digit * WEIGHTS[weight_index];
        }
        weight_index += 1;
    }
    module11(sum)
}

fn module11(sum: u32) -> u32 {
    let result = 11 - sum % 11;
    if result >= 10 {
        0
    } else {
        result
    }
}

/// Validate a RUC in `base-dv` form against its Module-11 check digit.
pub fn validate_ruc(ruc: &str) -> Result<bool, SifenError> {
    let (base, dv) = split_ruc(ruc)?;
    if base.chars().any(|c| !c.is_ascii_digit()) {
        return Err(SifenError::ruc_invalido());
    }
    let expected: u32 = dv
        .parse()
        .map_err(|_| SifenError::validation("VAL_003", "Dígito verificador de RUC no numérico"))?;
    Ok(ruc_check_digit(&base) == expected)
}

/// Split a RUC into base digits and check digit at the hyphen.
pub fn split_ruc(ruc: &str) -> Result<(String, String), SifenError> {
    let mut parts = ruc.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(base), Some(dv), None) if !base.is_empty() && !dv.is_empty() => {
            Ok((base.to_string(), dv.to_string()))
        }
        _ => Err(SifenError::ruc_invalido()),
    }
}

/// Structural CDC check: 44 digits whose last digit is the Module-11 of the
/// preceding 43.
pub fn validate_cdc(cdc: &str) -> bool {
    if cdc.len() != 44 || cdc.chars().any(|c| !c.is_ascii_digit()) {
        return false;
    }
    let (prefix, dv) = cdc.split_at(43);
    dv.parse::<u32>()
        .map(|dv| cdc_check_digit(prefix) == dv)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_params() -> CdcParams {
        CdcParams {
            tipo_documento: TipoDocumento::FacturaElectronica,
            ruc: "80069563".to_string(),
            digito_verificador: "1".to_string(),
            establecimiento: "001".to_string(),
            punto_expedicion: "001".to_string(),
            numero_documento: "0000001".to_string(),
            tipo_contribuyente: TipoContribuyente::PersonaJuridica,
            fecha_emision: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            tipo_emision: TipoEmision::Normal,
            codigo_seguridad: "123456789".to_string(),
        }
    }

    #[test]
    fn generated_cdc_is_44_chars_with_valid_check_digit() {
        let cdc = generate_cdc(&sample_params()).unwrap();
        assert_eq!(cdc.len(), 44);
        assert!(cdc.starts_with("01800695631001001000000121"));
        assert!(cdc.contains("20240115123456789"));
        let (prefix, dv) = cdc.split_at(43);
        assert_eq!(cdc_check_digit(prefix), dv.parse::<u32>().unwrap());
        assert!(validate_cdc(&cdc));
    }

    #[test]
    fn generation_rejects_bad_widths() {
        let mut params = sample_params();
        params.establecimiento = "01".to_string();
        assert_eq!(generate_cdc(&params).unwrap_err().code(), "VAL_007");

        let mut params = sample_params();
        params.punto_expedicion = "1".to_string();
        assert_eq!(generate_cdc(&params).unwrap_err().code(), "VAL_008");

        let mut params = sample_params();
        params.numero_documento = "001".to_string();
        assert_eq!(generate_cdc(&params).unwrap_err().code(), "VAL_011");

        let mut params = sample_params();
        params.codigo_seguridad = "123".to_string();
        assert_eq!(generate_cdc(&params).unwrap_err().code(), "VAL_012");
    }

    #[test]
    fn ruc_check_digits_match_known_values() {
        assert_eq!(ruc_check_digit("80069563"), 1);
        assert_eq!(ruc_check_digit("50062360"), 0);
    }

    #[test]
    fn validate_ruc_accepts_and_rejects() {
        assert!(validate_ruc("80069563-1").unwrap());
        assert!(!validate_ruc("80069563-0").unwrap());
        assert!(validate_ruc("50062360-0").unwrap());
        assert!(validate_ruc("invalid").is_err());
        assert!(validate_ruc("12345-X").is_err());
    }

    #[test]
    fn split_ruc_requires_single_hyphen() {
        assert_eq!(
            split_ruc("80069563-1").unwrap(),
            ("80069563".to_string(), "1".to_string())
        );
        assert!(split_ruc("80069563").is_err());
        assert!(split_ruc("8-1-2").is_err());
    }

    #[test]
    fn validate_cdc_rejects_wrong_length_and_digit() {
        assert!(!validate_cdc("123"));
        let mut cdc = generate_cdc(&sample_params()).unwrap();
        let last = cdc.pop().unwrap();
        let flipped = if last == '0' { '1' } else { '0' };
        cdc.push(flipped);
        assert!(!validate_cdc(&cdc));
    }
}
