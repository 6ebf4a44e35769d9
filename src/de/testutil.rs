//! Sample documents shared by unit tests.
use chrono::NaiveDate;

use super::{
    GActEco, GCamFe, GCamItem, GDatGralOpe, GDatRec, GEmis, GOpeCom, GOpeDe, GTimb, GTotSub, Rde,
};
use crate::cdc::{generate_cdc, CdcParams};
use crate::types::{
    AfectacionIva, Departamento, IndicadorPresencia, Moneda, NaturalezaReceptor, Pais,
    TipoContribuyente, TipoDocumento, TipoEmision, TipoImpuesto, TipoOperacion, UnidadMedida,
};

pub(crate) fn sample_cdc() -> String {
    generate_cdc(&CdcParams {
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
    })
    .unwrap()
}

pub(crate) fn sample_rde() -> Rde {
    let mut rde = Rde::new(&sample_cdc());
    rde.de.d_fec_firma = "2024-01-15T10:30:00".to_string();
    rde.de.g_ope_de = GOpeDe::new(TipoEmision::Normal, "12345");
    rde.de.g_timb = GTimb::new(
        TipoDocumento::FacturaElectronica,
        12345678,
        "001",
        "001",
        "0000001",
        "2024-01-01",
    );
    rde.de.g_dat_gral_ope = GDatGralOpe {
        d_fe_emi_de: "2024-01-15T10:00:00".to_string(),
        g_ope_com: Some(GOpeCom::new(TipoImpuesto::Iva, Moneda::Pyg)),
        g_emis: GEmis {
            d_ruc_em: "80069563".to_string(),
            d_dv_emi: "1".to_string(),
            i_tip_cont: Some(TipoContribuyente::PersonaJuridica),
            d_nom_emi: "Empresa Test SA".to_string(),
            d_dir_emi: "Avda Test 123".to_string(),
            d_num_cas: "123".to_string(),
            c_dep_emi: Some(Departamento::Capital),
            d_des_dep_emi: Departamento::Capital.description().to_string(),
            c_ciu_emi: 1,
            d_des_ciu_emi: "ASUNCION (DISTRITO)".to_string(),
            d_tel_emi: "021555000".to_string(),
            d_email_e: "facturacion@test.com.py".to_string(),
            g_act_eco: vec![GActEco {
                c_act_eco: "62010".to_string(),
                d_des_act_eco: "Desarrollo de software".to_string(),
            }],
            ..Default::default()
        },
        g_dat_rec: GDatRec {
            i_nat_rec: Some(NaturalezaReceptor::Contribuyente),
            i_ti_ope: Some(TipoOperacion::B2B),
            c_pais_rec: Some(Pais::Pry),
            d_des_pais_re: Pais::Pry.nombre().to_string(),
            i_ti_cont_rec: Some(TipoContribuyente::PersonaJuridica),
            d_ruc_rec: Some("50062360".to_string()),
            d_dv_rec: Some(0),
            d_nom_rec: "Cliente SA".to_string(),
            ..Default::default()
        },
    };
    rde.de.g_dtip_de.g_cam_fe = Some(GCamFe::new(IndicadorPresencia::Presencial));
    rde.de.g_dtip_de.g_cam_item = vec![GCamItem::new(
        "001",
        "Servicio de consultoría",
        UnidadMedida::Unidad,
        2.0,
        100_000.0,
    )
    .with_iva(AfectacionIva::Gravado, 10.0, 100.0)];
    rde.de.g_tot_sub = Some(GTotSub::from_items(&rde.de.g_dtip_de.g_cam_item));
    rde
}
