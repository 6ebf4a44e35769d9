//! Document totals (`gTotSub`) and their derivation from line items.
//!
//! Totals are derived from items but carried explicitly in the document: the
//! signer must sign exactly what the server recomputes against.
use serde::{Deserialize, Serialize};

use super::detail::GCamItem;
use crate::types::AfectacionIva;

/// Totals group (`gTotSub`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GTotSub {
    #[serde(rename = "dSubExe")]
    pub d_sub_exe: f64,
    #[serde(rename = "dSubExo")]
    pub d_sub_exo: f64,
    #[serde(rename = "dSub5", skip_serializing_if = "Option::is_none")]
    pub d_sub5: Option<f64>,
    #[serde(rename = "dSub10", skip_serializing_if = "Option::is_none")]
    pub d_sub10: Option<f64>,
    #[serde(rename = "dTotOpe")]
    pub d_tot_ope: f64,
    #[serde(rename = "dTotDesc")]
    pub d_tot_desc: f64,
    #[serde(rename = "dTotDescGlotem")]
    pub d_tot_desc_glotem: f64,
    #[serde(rename = "dTotAntItem")]
    pub d_tot_ant_item: f64,
    #[serde(rename = "dTotAnt")]
    pub d_tot_ant: f64,
    #[serde(rename = "dPorcDescTotal")]
    pub d_porc_desc_total: f64,
    #[serde(rename = "dDescTotal")]
    pub d_desc_total: f64,
    #[serde(rename = "dAnticipo")]
    pub d_anticipo: f64,
    #[serde(rename = "dRedon")]
    pub d_redon: f64,
    #[serde(rename = "dComi", skip_serializing_if = "Option::is_none")]
    pub d_comi: Option<f64>,
    #[serde(rename = "dTotGralOpe")]
    pub d_tot_gral_ope: f64,
    #[serde(rename = "dIVA5", skip_serializing_if = "Option::is_none")]
    pub d_iva5: Option<f64>,
    #[serde(rename = "dIVA10", skip_serializing_if = "Option::is_none")]
    pub d_iva10: Option<f64>,
    #[serde(rename = "dLiqTotIVA5", skip_serializing_if = "Option::is_none")]
    pub d_liq_tot_iva5: Option<f64>,
    #[serde(rename = "dLiqTotIVA10", skip_serializing_if = "Option::is_none")]
    pub d_liq_tot_iva10: Option<f64>,
    #[serde(rename = "dIVAComi", skip_serializing_if = "Option::is_none")]
    pub d_iva_comi: Option<f64>,
    #[serde(rename = "dTotIVA", skip_serializing_if = "Option::is_none")]
    pub d_tot_iva: Option<f64>,
    #[serde(rename = "dBaseGrav5", skip_serializing_if = "Option::is_none")]
    pub d_base_grav5: Option<f64>,
    #[serde(rename = "dBaseGrav10", skip_serializing_if = "Option::is_none")]
    pub d_base_grav10: Option<f64>,
    #[serde(rename = "dTBasGraIVA", skip_serializing_if = "Option::is_none")]
    pub d_t_bas_gra_iva: Option<f64>,
    #[serde(rename = "dTotalGs", skip_serializing_if = "Option::is_none")]
    pub d_total_gs: Option<f64>,
}

/// Item-level input for totals calculation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemTotalsInput {
    pub precio_unitario: f64,
    pub cantidad: f64,
    pub descuento: f64,
    /// 0, 5 or 10.
    pub tasa_iva: f64,
    pub es_exento: bool,
    pub es_exonerado: bool,
}

/// Monetary aggregates over items.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TotalsSummary {
    pub subtotal_exe: f64,
    pub subtotal_exo: f64,
    pub subtotal5: f64,
    pub subtotal10: f64,
    pub total_bruto: f64,
    pub total_descuento: f64,
    pub total_neto: f64,
    pub base_gravada5: f64,
    pub base_gravada10: f64,
    pub iva5: f64,
    pub iva10: f64,
    pub total_iva: f64,
}

/// Aggregate item values. IVA is obtained by dividing the rate out of the
/// tax-inclusive net amount.
pub fn calculate_totals(items: &[ItemTotalsInput]) -> TotalsSummary {
    let mut result = TotalsSummary::default();

    for item in items {
        let bruto = item.precio_unitario * item.cantidad;
        let neto = bruto - item.descuento;

        result.total_bruto += bruto;
        result.total_descuento += item.descuento;
        result.total_neto += neto;

        if item.es_exento {
            result.subtotal_exe += neto;
        } else if item.es_exonerado {
            result.subtotal_exo += neto;
        } else if item.tasa_iva == 5.0 {
            result.subtotal5 += neto;
            result.base_gravada5 += neto / 1.05;
            result.iva5 += neto - neto / 1.05;
        } else if item.tasa_iva == 10.0 {
            result.subtotal10 += neto;
            result.base_gravada10 += neto / 1.10;
            result.iva10 += neto - neto / 1.10;
        }
    }

    result.total_iva = result.iva5 + result.iva10;
    result
}

impl GTotSub {
    /// Derive the totals group from the document's items.
    pub fn from_items(items: &[GCamItem]) -> GTotSub {
        let inputs: Vec<ItemTotalsInput> = items.iter().map(item_input).collect();
        let summary = calculate_totals(&inputs);

        GTotSub {
            d_sub_exe: summary.subtotal_exe,
            d_sub_exo: summary.subtotal_exo,
            d_sub5: nonzero(summary.subtotal5),
            d_sub10: nonzero(summary.subtotal10),
            d_tot_ope: summary.total_neto,
            d_tot_desc: summary.total_descuento,
            d_tot_desc_glotem: 0.0,
            d_tot_ant_item: 0.0,
            d_tot_ant: 0.0,
            d_porc_desc_total: 0.0,
            d_desc_total: summary.total_descuento,
            d_anticipo: 0.0,
            d_redon: 0.0,
            d_comi: None,
            d_tot_gral_ope: summary.total_neto,
            d_iva5: nonzero(summary.iva5),
            d_iva10: nonzero(summary.iva10),
            d_liq_tot_iva5: nonzero(summary.iva5),
            d_liq_tot_iva10: nonzero(summary.iva10),
            d_iva_comi: None,
            d_tot_iva: nonzero(summary.total_iva),
            d_base_grav5: nonzero(summary.base_gravada5),
            d_base_grav10: nonzero(summary.base_gravada10),
            d_t_bas_gra_iva: nonzero(summary.base_gravada5 + summary.base_gravada10),
            d_total_gs: None,
        }
    }
}

fn item_input(item: &GCamItem) -> ItemTotalsInput {
    let descuento = item
        .g_valor_item
        .g_valor_resta_item
        .d_desc_item
        .unwrap_or(0.0);
    let (tasa, exento, exonerado) = match &item.g_cam_iva {
        Some(iva) => (
            iva.d_tasa_iva,
            iva.i_afec_iva == AfectacionIva::Exento,
            iva.i_afec_iva == AfectacionIva::Exonerado,
        ),
        None => (0.0, true, false),
    };
    ItemTotalsInput {
        precio_unitario: item.g_valor_item.d_p_uni_pro_ser,
        cantidad: item.d_cant_pro_ser,
        descuento,
        tasa_iva: tasa,
        es_exento: exento,
        es_exonerado: exonerado,
    }
}

fn nonzero(value: f64) -> Option<f64> {
    if value == 0.0 {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{a} != {b}");
    }

    #[test]
    fn totals_over_mixed_items() {
        let items = [
            ItemTotalsInput {
                precio_unitario: 100_000.0,
                cantidad: 2.0,
                descuento: 0.0,
                tasa_iva: 10.0,
                ..Default::default()
            },
            ItemTotalsInput {
                precio_unitario: 50_000.0,
                cantidad: 1.0,
                descuento: 5_000.0,
                tasa_iva: 5.0,
                ..Default::default()
            },
            ItemTotalsInput {
                precio_unitario: 25_000.0,
                cantidad: 1.0,
                es_exento: true,
                ..Default::default()
            },
        ];

        let result = calculate_totals(&items);
        close(result.total_bruto, 275_000.0);
        close(result.total_descuento, 5_000.0);
        close(result.subtotal_exe, 25_000.0);
        close(result.iva10, 200_000.0 - 200_000.0 / 1.10);
        close(result.iva5, 45_000.0 - 45_000.0 / 1.05);
        close(result.total_iva, result.iva5 + result.iva10);
        close(result.total_neto, 270_000.0);
    }

    #[test]
    fn exonerado_accumulates_separately() {
        let items = [ItemTotalsInput {
            precio_unitario: 10_000.0,
            cantidad: 3.0,
            es_exonerado: true,
            ..Default::default()
        }];
        let result = calculate_totals(&items);
        close(result.subtotal_exo, 30_000.0);
        close(result.total_iva, 0.0);
    }

    #[test]
    fn tot_sub_from_items_fills_optional_slots() {
        use crate::types::{AfectacionIva, UnidadMedida};

        let items = vec![
            GCamItem::new("001", "Producto gravado", UnidadMedida::Unidad, 2.0, 100_000.0)
                .with_iva(AfectacionIva::Gravado, 10.0, 100.0),
            GCamItem::new("002", "Producto exento", UnidadMedida::Unidad, 1.0, 25_000.0)
                .with_iva(AfectacionIva::Exento, 0.0, 0.0),
        ];
        let totals = GTotSub::from_items(&items);
        close(totals.d_tot_ope, 225_000.0);
        close(totals.d_sub_exe, 25_000.0);
        assert!(totals.d_sub5.is_none());
        close(totals.d_sub10.unwrap(), 200_000.0);
        close(totals.d_iva10.unwrap(), 200_000.0 - 200_000.0 / 1.10);
        assert!(totals.d_iva5.is_none());
    }
}
