mod common;

use std::io::Read;

use base64ct::{Base64, Encoding};
use sifen::client::SifenClient;
use sifen::config::SifenConfig;
use sifen::de::{GCamCond, GCamDeAsoc, GCamNcde, GPaConEIni, Rde};
use sifen::types::{
    CondicionOperacion, Moneda, MotivoEmisionNc, TipoDocumento, TipoPago,
};

fn offline_config() -> SifenConfig {
    let mut config = SifenConfig::default();
    config.usar_certificado_cliente = false;
    config
}

#[test]
fn full_document_round_trips_through_xml() {
    let mut documento = common::sample_factura("0000001");

    // Exercise optional groups as well.
    documento.de.g_dtip_de.g_cam_cond = Some(GCamCond {
        i_cond_ope: CondicionOperacion::Contado,
        d_d_cond_ope: CondicionOperacion::Contado.description().to_string(),
        g_pa_con_e_ini: vec![GPaConEIni {
            i_ti_pago: TipoPago::Efectivo,
            d_des_ti_pag: TipoPago::Efectivo.description().to_string(),
            d_mon_ti_pag: 220_000.0,
            c_mone_ti_pag: Moneda::Pyg,
            d_d_mone_ti_pag: None,
            d_ti_cam_ti_pag: None,
            g_pag_tar_cd: None,
            g_pag_cheq: None,
        }],
        g_pag_cred: None,
    });

    let xml = documento.to_xml().expect("serialize");
    let parsed = Rde::from_xml(&xml).expect("parse");
    assert_eq!(parsed, documento);
}

#[test]
fn credit_note_with_associated_document_round_trips() {
    let mut nota = common::sample_factura("0000009");
    nota.de.g_timb.i_ti_de = Some(TipoDocumento::NotaCreditoElectronica);
    nota.de.g_timb.d_des_ti_de = TipoDocumento::NotaCreditoElectronica
        .description()
        .to_string();
    nota.de.g_dtip_de.g_cam_fe = None;
    nota.de.g_dtip_de.g_cam_ncde = Some(GCamNcde::new(MotivoEmisionNc::Devolucion));
    nota.de.g_cam_de_asoc = vec![GCamDeAsoc::electronico(&common::sample_cdc("0000001"))];

    let xml = nota.to_xml().expect("serialize");
    assert!(xml.contains("<gCamNCDE><iMotEmi>2</iMotEmi>"));
    assert!(xml.contains("<gCamDEAsoc><iTipDocAso>1</iTipDocAso>"));

    let parsed = Rde::from_xml(&xml).expect("parse");
    assert_eq!(parsed, nota);
}

#[test]
fn lote_zip_round_trips_to_the_original_lote_xml() {
    let client = SifenClient::new(offline_config()).expect("client");
    let documentos = vec![
        common::sample_factura("0000001"),
        common::sample_factura("0000002"),
    ];

    let encoded = client.crear_lote_de(&documentos).expect("lote");
    let zip_bytes = Base64::decode_vec(&encoded).expect("base64");

    let cursor = std::io::Cursor::new(zip_bytes);
    let mut archive = zip::ZipArchive::new(cursor).expect("zip");
    assert_eq!(archive.len(), 1);
    let mut entry = archive.by_name("lote.xml").expect("lote.xml entry");
    let mut lote_xml = String::new();
    entry.read_to_string(&mut lote_xml).expect("read entry");

    assert!(lote_xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(lote_xml.contains("<rLoteDE><dVerFor>150</dVerFor>"));
    for documento in &documentos {
        assert!(lote_xml.contains(&format!("<DE Id=\"{}\">", documento.de.id)));
    }
    // Two rDE wrappers, one per document.
    assert_eq!(lote_xml.matches("<rDE>").count(), 2);
}

#[test]
fn lote_boundaries_are_enforced() {
    let client = SifenClient::new(offline_config()).expect("client");

    let err = client.crear_lote_de(&[]).unwrap_err();
    assert_eq!(err.code(), "BUS_001");

    let many: Vec<Rde> = (0..51)
        .map(|i| common::sample_factura(&format!("{:07}", i + 1)))
        .collect();
    let err = client.crear_lote_de(&many).unwrap_err();
    assert_eq!(err.code(), "BUS_002");

    let mut mixed = vec![
        common::sample_factura("0000001"),
        common::sample_factura("0000002"),
    ];
    mixed[1].de.g_timb.i_ti_de = Some(TipoDocumento::NotaRemisionElectronica);
    let err = client.crear_lote_de(&mixed).unwrap_err();
    assert_eq!(err.code(), "BUS_003");
}
