//! Event envelope (`rEnviEventoDe`) and per-kind event builders.
//!
//! Twelve lifecycle event kinds share one envelope; issuer events live under
//! `gGroupGesEve` and receiver events under `gGroupTiEvt`. The envelope is
//! signed by its `gEvento/@Id` exactly like a document. All required-field
//! checks happen in the builders, before any serialization or network I/O.
use chrono::NaiveDateTime;
use quick_xml::se::Serializer as QuickXmlSerializer;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;

use crate::de::xml::{XMLNS_XSI, XML_DECLARATION};
use crate::error::SifenError;
use crate::types::{
    Departamento, MotivoActualizacionTransporte, NaturalezaReceptor, TipoConformidad,
    TipoDocumento, TipoDocumentoReceptor,
};
use crate::util::{format_fecha_hora, now_fecha_hora};

/// Event envelope root (`rEnviEventoDe`).
#[derive(Debug, Clone, PartialEq)]
pub struct EventoEnvelope {
    pub d_id: i64,
    pub d_fec_firma: String,
    pub g_evento: GEvento,
}

impl EventoEnvelope {
    /// Serialize to the wire form, XML declaration included.
    pub fn to_xml(&self) -> Result<String, SifenError> {
        let mut buffer = String::with_capacity(1024);
        buffer.push_str(XML_DECLARATION);
        {
            let serializer = QuickXmlSerializer::new(&mut buffer);
            self.serialize(serializer).map_err(|e| {
                SifenError::internal(format!("no se pudo serializar el evento: {e}"))
            })?;
        }
        Ok(buffer)
    }
}

/// Main event group (`gEvento`); its `Id` attribute is the freshly generated
/// event identifier the signature references.
#[derive(Debug, Clone, PartialEq)]
pub struct GEvento {
    pub id: String,
    pub d_fec_firma: String,
    pub d_ver_for: i16,
    pub payload: EventoPayload,
}

/// One alternative per envelope; the variant selects the group and child
/// element emitted at serialization time.
#[derive(Debug, Clone, PartialEq)]
pub enum EventoPayload {
    Cancelacion(EvCancelacion),
    Inutilizacion(EvInutilizacion),
    Nominacion(EvNominacion),
    ActualizacionTransporte(EvActTransporte),
    Conformidad(EvConformidad),
    Disconformidad(EvDisconformidad),
    Desconocimiento(EvDesconocimiento),
    Notificacion(EvNotificacion),
}

impl EventoPayload {
    /// Issuer events go under `gGroupGesEve`, receiver events under
    /// `gGroupTiEvt`.
    pub fn is_issuer_event(&self) -> bool {
        matches!(
            self,
            EventoPayload::Cancelacion(_)
                | EventoPayload::Inutilizacion(_)
                | EventoPayload::Nominacion(_)
                | EventoPayload::ActualizacionTransporte(_)
        )
    }
}

impl Serialize for EventoEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut root = serializer.serialize_struct("rEnviEventoDe", 4)?;
        root.serialize_field("@xmlns:xsi", XMLNS_XSI)?;
        root.serialize_field("dId", &self.d_id)?;
        root.serialize_field("dFecFirma", &self.d_fec_firma)?;
        root.serialize_field("gEvento", &self.g_evento)?;
        root.end()
    }
}

impl Serialize for GEvento {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut group = serializer.serialize_struct("gEvento", 4)?;
        group.serialize_field("@Id", &self.id)?;
        group.serialize_field("dFecFirma", &self.d_fec_firma)?;
        group.serialize_field("dVerFor", &self.d_ver_for)?;
        if self.payload.is_issuer_event() {
            group.serialize_field("gGroupGesEve", &GGroupGesEveXml(&self.payload))?;
        } else {
            group.serialize_field("gGroupTiEvt", &GGroupTiEvtXml(&self.payload))?;
        }
        group.end()
    }
}

struct GGroupGesEveXml<'a>(&'a EventoPayload);

impl<'a> Serialize for GGroupGesEveXml<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut group = serializer.serialize_struct("gGroupGesEve", 1)?;
        match self.0 {
            EventoPayload::Cancelacion(ev) => group.serialize_field("rGeVeCan", ev)?,
            EventoPayload::Inutilizacion(ev) => group.serialize_field("rGeVeInu", ev)?,
            EventoPayload::Nominacion(ev) => group.serialize_field("rGeVeNom", ev)?,
            EventoPayload::ActualizacionTransporte(ev) => {
                group.serialize_field("rGeVeTra", ev)?
            }
            _ => {}
        }
        group.end()
    }
}

struct GGroupTiEvtXml<'a>(&'a EventoPayload);

impl<'a> Serialize for GGroupTiEvtXml<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut group = serializer.serialize_struct("gGroupTiEvt", 1)?;
        match self.0 {
            EventoPayload::Conformidad(ev) => group.serialize_field("rGeTrReConf", ev)?,
            EventoPayload::Disconformidad(ev) => group.serialize_field("rGeTrReDisc", ev)?,
            EventoPayload::Desconocimiento(ev) => group.serialize_field("rGeTrReDesc", ev)?,
            EventoPayload::Notificacion(ev) => group.serialize_field("rGeTrReNot", ev)?,
            _ => {}
        }
        group.end()
    }
}

/// Cancellation payload (`rGeVeCan`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct EvCancelacion {
    #[serde(rename = "dRucEmi")]
    pub d_ruc_emi: String,
    #[serde(rename = "dDVEmi")]
    pub d_dv_emi: String,
    #[serde(rename = "iTipEvt")]
    pub i_tip_evt: i16,
    #[serde(rename = "mMotEve")]
    pub m_mot_eve: String,
    #[serde(rename = "gCamEve")]
    pub g_cam_eve: GCamEveCdc,
}

/// CDC carrier used by cancellation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct GCamEveCdc {
    #[serde(rename = "dCDC")]
    pub d_cdc: String,
}

/// Inutilization payload (`rGeVeInu`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct EvInutilizacion {
    #[serde(rename = "dRucEmi")]
    pub d_ruc_emi: String,
    #[serde(rename = "dDVEmi")]
    pub d_dv_emi: String,
    #[serde(rename = "iTipEvt")]
    pub i_tip_evt: i16,
    #[serde(rename = "mMotEvInu")]
    pub m_mot_ev_inu: String,
    #[serde(rename = "gCamEve")]
    pub g_cam_eve: GCamEveInu,
}

/// Number range being voided.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct GCamEveInu {
    #[serde(rename = "iTiDE")]
    pub i_ti_de: TipoDocumento,
    #[serde(rename = "dDesTiDE")]
    pub d_des_ti_de: String,
    #[serde(rename = "dEst")]
    pub d_est: String,
    #[serde(rename = "dPunExp")]
    pub d_pun_exp: String,
    #[serde(rename = "dNumDocDesde")]
    pub d_num_doc_desde: i32,
    #[serde(rename = "dNumDocHasta")]
    pub d_num_doc_hasta: i32,
}

/// Nomination payload (`rGeVeNom`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct EvNominacion {
    #[serde(rename = "dRucEmi")]
    pub d_ruc_emi: String,
    #[serde(rename = "dDVEmi")]
    pub d_dv_emi: String,
    #[serde(rename = "iTipEvt")]
    pub i_tip_evt: i16,
    #[serde(rename = "dCDC")]
    pub d_cdc: String,
    #[serde(rename = "dRucNom")]
    pub d_ruc_nom: String,
    #[serde(rename = "dDVNom")]
    pub d_dv_nom: String,
    #[serde(rename = "dNomNom")]
    pub d_nom_nom: String,
    #[serde(rename = "dFecEmiNom")]
    pub d_fec_emi_nom: String,
}

/// Transport-update payload (`rGeVeTra`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct EvActTransporte {
    #[serde(rename = "dRucEmi")]
    pub d_ruc_emi: String,
    #[serde(rename = "dDVEmi")]
    pub d_dv_emi: String,
    #[serde(rename = "iTipEvt")]
    pub i_tip_evt: i16,
    #[serde(rename = "dCDC")]
    pub d_cdc: String,
    #[serde(rename = "dMotEv")]
    pub d_mot_ev: MotivoActualizacionTransporte,
    #[serde(rename = "dDesMotEv")]
    pub d_des_mot_ev: String,
    #[serde(rename = "dFecEmiEvt")]
    pub d_fec_emi_evt: String,
    #[serde(rename = "gCamLocEnt", skip_serializing_if = "Option::is_none")]
    pub g_cam_loc_ent: Option<CamLocEntrega>,
    #[serde(rename = "gCamChof", skip_serializing_if = "Option::is_none")]
    pub g_cam_chof: Option<CamChofer>,
    #[serde(rename = "gCamTrans", skip_serializing_if = "Option::is_none")]
    pub g_cam_trans: Option<CamTransportista>,
    #[serde(rename = "gCamVeh", skip_serializing_if = "Option::is_none")]
    pub g_cam_veh: Option<CamVehiculo>,
}

/// Delivery-place change group (`gCamLocEnt`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct CamLocEntrega {
    #[serde(rename = "dDirLocEnt")]
    pub d_dir_loc_ent: String,
    #[serde(rename = "cDepEnt")]
    pub c_dep_ent: Departamento,
    #[serde(rename = "dDesDepEnt")]
    pub d_des_dep_ent: String,
    #[serde(rename = "cDisEnt", skip_serializing_if = "Option::is_none")]
    pub c_dis_ent: Option<i16>,
    #[serde(rename = "dDesDisEnt", skip_serializing_if = "Option::is_none")]
    pub d_des_dis_ent: Option<String>,
    #[serde(rename = "cCiuEnt")]
    pub c_ciu_ent: i32,
    #[serde(rename = "dDesCiuEnt")]
    pub d_des_ciu_ent: String,
}

/// Driver change group (`gCamChof`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct CamChofer {
    #[serde(rename = "dNomChof")]
    pub d_nom_chof: String,
    #[serde(rename = "dNumIDChof")]
    pub d_num_id_chof: String,
}

/// Carrier change group (`gCamTrans`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct CamTransportista {
    #[serde(rename = "iNatTrans")]
    pub i_nat_trans: NaturalezaReceptor,
    #[serde(rename = "dNomTrans")]
    pub d_nom_trans: String,
    #[serde(rename = "dRucTrans", skip_serializing_if = "Option::is_none")]
    pub d_ruc_trans: Option<String>,
    #[serde(rename = "dDVTrans", skip_serializing_if = "Option::is_none")]
    pub d_dv_trans: Option<String>,
    #[serde(rename = "iTipIDTrans", skip_serializing_if = "Option::is_none")]
    pub i_tip_id_trans: Option<TipoDocumentoReceptor>,
    #[serde(rename = "dDTipIDTrans", skip_serializing_if = "Option::is_none")]
    pub d_d_tip_id_trans: Option<String>,
    #[serde(rename = "dNumIDTrans", skip_serializing_if = "Option::is_none")]
    pub d_num_id_trans: Option<String>,
}

/// Vehicle change group (`gCamVeh`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct CamVehiculo {
    #[serde(rename = "dTipVeh")]
    pub d_tip_veh: String,
    #[serde(rename = "dMarVeh", skip_serializing_if = "Option::is_none")]
    pub d_mar_veh: Option<String>,
    #[serde(rename = "dNumPlaca")]
    pub d_num_placa: String,
}

/// Conformity payload (`rGeTrReConf`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct EvConformidad {
    #[serde(rename = "dRucRec")]
    pub d_ruc_rec: String,
    #[serde(rename = "dDVRec")]
    pub d_dv_rec: String,
    #[serde(rename = "iTipEvt")]
    pub i_tip_evt: i16,
    #[serde(rename = "dCDC")]
    pub d_cdc: String,
    #[serde(rename = "iTiConf")]
    pub i_ti_conf: TipoConformidad,
    #[serde(rename = "dDesTiConf")]
    pub d_des_ti_conf: String,
    #[serde(rename = "dFecRecep")]
    pub d_fec_recep: String,
    #[serde(rename = "dFecEmiConf")]
    pub d_fec_emi_conf: String,
}

/// Non-conformity payload (`rGeTrReDisc`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct EvDisconformidad {
    #[serde(rename = "dRucRec")]
    pub d_ruc_rec: String,
    #[serde(rename = "dDVRec")]
    pub d_dv_rec: String,
    #[serde(rename = "iTipEvt")]
    pub i_tip_evt: i16,
    #[serde(rename = "dCDC")]
    pub d_cdc: String,
    #[serde(rename = "mMotDisc")]
    pub m_mot_disc: String,
    #[serde(rename = "dFecEmiDisc")]
    pub d_fec_emi_disc: String,
}

/// Ignorance payload (`rGeTrReDesc`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct EvDesconocimiento {
    #[serde(rename = "dRucRec", skip_serializing_if = "Option::is_none")]
    pub d_ruc_rec: Option<String>,
    #[serde(rename = "dDVRec", skip_serializing_if = "Option::is_none")]
    pub d_dv_rec: Option<String>,
    #[serde(rename = "iTipEvt")]
    pub i_tip_evt: i16,
    #[serde(rename = "dCDC")]
    pub d_cdc: String,
    #[serde(rename = "dFecEmi")]
    pub d_fec_emi: String,
    #[serde(rename = "dFecRecep")]
    pub d_fec_recep: String,
    #[serde(rename = "iTiRec")]
    pub i_ti_rec: NaturalezaReceptor,
    #[serde(rename = "dNomRec")]
    pub d_nom_rec: String,
    #[serde(rename = "dRucRecDes", skip_serializing_if = "Option::is_none")]
    pub d_ruc_rec_des: Option<String>,
    #[serde(rename = "iTipIDRec", skip_serializing_if = "Option::is_none")]
    pub i_tip_id_rec: Option<TipoDocumentoReceptor>,
    #[serde(rename = "dNumIDRec", skip_serializing_if = "Option::is_none")]
    pub d_num_id_rec: Option<String>,
    #[serde(rename = "mMotDesc")]
    pub m_mot_desc: String,
    #[serde(rename = "dFecEmiDesc")]
    pub d_fec_emi_desc: String,
}

/// Reception-notification payload (`rGeTrReNot`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct EvNotificacion {
    #[serde(rename = "dRucRec", skip_serializing_if = "Option::is_none")]
    pub d_ruc_rec: Option<String>,
    #[serde(rename = "dDVRec", skip_serializing_if = "Option::is_none")]
    pub d_dv_rec: Option<String>,
    #[serde(rename = "iTipEvt")]
    pub i_tip_evt: i16,
    #[serde(rename = "dCDC")]
    pub d_cdc: String,
    #[serde(rename = "dFecEmi")]
    pub d_fec_emi: String,
    #[serde(rename = "dFecRecep")]
    pub d_fec_recep: String,
    #[serde(rename = "iTiRec")]
    pub i_ti_rec: NaturalezaReceptor,
    #[serde(rename = "dNomRec")]
    pub d_nom_rec: String,
    #[serde(rename = "dRucRecNot", skip_serializing_if = "Option::is_none")]
    pub d_ruc_rec_not: Option<String>,
    #[serde(rename = "iTipIDRec", skip_serializing_if = "Option::is_none")]
    pub i_tip_id_rec: Option<TipoDocumentoReceptor>,
    #[serde(rename = "dNumIDRec", skip_serializing_if = "Option::is_none")]
    pub d_num_id_rec: Option<String>,
    #[serde(rename = "dTotPyg")]
    pub d_tot_pyg: f64,
    #[serde(rename = "dFecEmiNot")]
    pub d_fec_emi_not: String,
}

// ---------------------------------------------------------------------------
// Builder inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CancelacionData {
    pub cdc: String,
    pub motivo: String,
}

#[derive(Debug, Clone)]
pub struct InutilizacionData {
    pub tipo_documento: TipoDocumento,
    pub establecimiento: String,
    pub punto: String,
    pub desde: i32,
    pub hasta: i32,
    pub motivo: String,
}

#[derive(Debug, Clone)]
pub struct NominacionData {
    pub cdc: String,
    pub ruc_nominado: String,
    pub dv_nominado: String,
    pub nombre_nominado: String,
}

#[derive(Debug, Clone)]
pub struct ConformidadData {
    pub cdc: String,
    pub tipo_conformidad: TipoConformidad,
    pub fecha_recepcion: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct DisconformidadData {
    pub cdc: String,
    pub motivo: String,
}

#[derive(Debug, Clone, Default)]
pub struct DesconocimientoData {
    pub cdc: String,
    pub fecha_emision: Option<NaiveDateTime>,
    pub fecha_recepcion: Option<NaiveDateTime>,
    pub tipo_receptor: Option<NaturalezaReceptor>,
    pub nombre: String,
    pub ruc: Option<String>,
    pub tipo_documento: Option<TipoDocumentoReceptor>,
    pub numero_documento: Option<String>,
    pub motivo: String,
}

#[derive(Debug, Clone, Default)]
pub struct NotificacionData {
    pub cdc: String,
    pub fecha_emision: Option<NaiveDateTime>,
    pub fecha_recepcion: Option<NaiveDateTime>,
    pub tipo_receptor: Option<NaturalezaReceptor>,
    pub nombre: String,
    pub ruc: Option<String>,
    pub tipo_documento: Option<TipoDocumentoReceptor>,
    pub numero_documento: Option<String>,
    pub total_pyg: f64,
}

/// Flat input for the transport-update event; the motive selects which of
/// the optional groups is required.
#[derive(Debug, Clone)]
pub struct ActTransporteData {
    pub cdc: String,
    pub motivo: MotivoActualizacionTransporte,

    // Motivo 1: delivery-place change.
    pub nueva_direccion: Option<String>,
    pub nuevo_departamento: Option<Departamento>,
    pub nuevo_distrito: Option<i16>,
    pub nueva_ciudad: Option<i32>,
    pub desc_distrito: Option<String>,
    pub desc_ciudad: Option<String>,

    // Motivo 2: driver change.
    pub nombre_chofer: Option<String>,
    pub documento_chofer: Option<String>,

    // Motivo 3: carrier change.
    pub es_contribuyente: bool,
    pub ruc_transportista: Option<String>,
    pub dv_transportista: Option<String>,
    pub tipo_doc_transportista: Option<TipoDocumentoReceptor>,
    pub doc_transportista: Option<String>,
    pub nombre_transportista: Option<String>,

    // Motivo 4: vehicle change.
    pub tipo_vehiculo: Option<String>,
    pub marca_vehiculo: Option<String>,
    pub placa_vehiculo: Option<String>,
}

impl ActTransporteData {
    pub fn new(cdc: &str, motivo: MotivoActualizacionTransporte) -> ActTransporteData {
        ActTransporteData {
            cdc: cdc.to_string(),
            motivo,
            nueva_direccion: None,
            nuevo_departamento: None,
            nuevo_distrito: None,
            nueva_ciudad: None,
            desc_distrito: None,
            desc_ciudad: None,
            nombre_chofer: None,
            documento_chofer: None,
            es_contribuyente: false,
            ruc_transportista: None,
            dv_transportista: None,
            tipo_doc_transportista: None,
            doc_transportista: None,
            nombre_transportista: None,
            tipo_vehiculo: None,
            marca_vehiculo: None,
            placa_vehiculo: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Assembles event envelopes for one issuer.
pub struct EventBuilder {
    d_id: i64,
    version: i16,
    ruc_emisor: String,
    dv_emisor: String,
}

impl EventBuilder {
    pub fn new(request_id: i64, ruc_emisor: &str, dv_emisor: &str) -> EventBuilder {
        EventBuilder {
            d_id: request_id,
            version: 150,
            ruc_emisor: ruc_emisor.to_string(),
            dv_emisor: dv_emisor.to_string(),
        }
    }

    /// `<RUC><DV><monotonic-ns timestamp>`.
    fn generate_event_id(&self) -> String {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        format!("{}{}{}", self.ruc_emisor, self.dv_emisor, nanos)
    }

    fn envelope(&self, payload: EventoPayload) -> EventoEnvelope {
        let now = now_fecha_hora();
        EventoEnvelope {
            d_id: self.d_id,
            d_fec_firma: now.clone(),
            g_evento: GEvento {
                id: self.generate_event_id(),
                d_fec_firma: now,
                d_ver_for: self.version,
                payload,
            },
        }
    }

    pub fn build_cancelacion(&self, data: CancelacionData) -> Result<EventoEnvelope, SifenError> {
        if data.cdc.len() != 44 {
            return Err(SifenError::cdc_invalido());
        }
        if data.motivo.is_empty() {
            return Err(SifenError::motivo_requerido());
        }
        Ok(self.envelope(EventoPayload::Cancelacion(EvCancelacion {
            d_ruc_emi: self.ruc_emisor.clone(),
            d_dv_emi: self.dv_emisor.clone(),
            i_tip_evt: 1,
            m_mot_eve: data.motivo,
            g_cam_eve: GCamEveCdc { d_cdc: data.cdc },
        })))
    }

    pub fn build_inutilizacion(
        &self,
        data: InutilizacionData,
    ) -> Result<EventoEnvelope, SifenError> {
        if data.establecimiento.len() != 3 {
            return Err(SifenError::establecimiento_invalido());
        }
        if data.punto.len() != 3 {
            return Err(SifenError::punto_expedicion_invalido());
        }
        if data.desde > data.hasta {
            return Err(SifenError::validation(
                "VAL_015",
                "rango inválido: desde debe ser menor o igual a hasta",
            ));
        }
        if data.motivo.is_empty() {
            return Err(SifenError::motivo_requerido());
        }
        Ok(self.envelope(EventoPayload::Inutilizacion(EvInutilizacion {
            d_ruc_emi: self.ruc_emisor.clone(),
            d_dv_emi: self.dv_emisor.clone(),
            i_tip_evt: 2,
            m_mot_ev_inu: data.motivo,
            g_cam_eve: GCamEveInu {
                i_ti_de: data.tipo_documento,
                d_des_ti_de: data.tipo_documento.description().to_string(),
                d_est: data.establecimiento,
                d_pun_exp: data.punto,
                d_num_doc_desde: data.desde,
                d_num_doc_hasta: data.hasta,
            },
        })))
    }

    pub fn build_nominacion(&self, data: NominacionData) -> Result<EventoEnvelope, SifenError> {
        if data.cdc.len() != 44 {
            return Err(SifenError::cdc_invalido());
        }
        if data.ruc_nominado.is_empty() {
            return Err(SifenError::validation(
                "VAL_016",
                "RUC del nominado es requerido",
            ));
        }
        if data.nombre_nominado.is_empty() {
            return Err(SifenError::validation(
                "VAL_016",
                "nombre del nominado es requerido",
            ));
        }
        Ok(self.envelope(EventoPayload::Nominacion(EvNominacion {
            d_ruc_emi: self.ruc_emisor.clone(),
            d_dv_emi: self.dv_emisor.clone(),
            i_tip_evt: 20,
            d_cdc: data.cdc,
            d_ruc_nom: data.ruc_nominado,
            d_dv_nom: data.dv_nominado,
            d_nom_nom: data.nombre_nominado,
            d_fec_emi_nom: now_fecha_hora(),
        })))
    }

    pub fn build_actualizacion_transporte(
        &self,
        data: ActTransporteData,
    ) -> Result<EventoEnvelope, SifenError> {
        if data.cdc.len() != 44 {
            return Err(SifenError::cdc_invalido());
        }

        let mut evento = EvActTransporte {
            d_ruc_emi: self.ruc_emisor.clone(),
            d_dv_emi: self.dv_emisor.clone(),
            i_tip_evt: 21,
            d_cdc: data.cdc.clone(),
            d_mot_ev: data.motivo,
            d_des_mot_ev: data.motivo.description().to_string(),
            d_fec_emi_evt: now_fecha_hora(),
            g_cam_loc_ent: None,
            g_cam_chof: None,
            g_cam_trans: None,
            g_cam_veh: None,
        };

        match data.motivo {
            MotivoActualizacionTransporte::CambioLocalEntrega => {
                let direccion = required(data.nueva_direccion, "nueva dirección")?;
                let departamento = data.nuevo_departamento.ok_or_else(|| {
                    SifenError::validation("VAL_017", "nuevo departamento es requerido")
                })?;
                let ciudad = data.nueva_ciudad.ok_or_else(|| {
                    SifenError::validation("VAL_017", "nueva ciudad es requerida")
                })?;
                evento.g_cam_loc_ent = Some(CamLocEntrega {
                    d_dir_loc_ent: direccion,
                    c_dep_ent: departamento,
                    d_des_dep_ent: departamento.description().to_string(),
                    c_dis_ent: data.nuevo_distrito,
                    d_des_dis_ent: data.desc_distrito,
                    c_ciu_ent: ciudad,
                    d_des_ciu_ent: required(data.desc_ciudad, "descripción de la ciudad")?,
                });
            }
            MotivoActualizacionTransporte::CambioChofer => {
                evento.g_cam_chof = Some(CamChofer {
                    d_nom_chof: required(data.nombre_chofer, "nombre del chofer")?,
                    d_num_id_chof: required(data.documento_chofer, "documento del chofer")?,
                });
            }
            MotivoActualizacionTransporte::CambioTransportista => {
                let nombre = required(data.nombre_transportista, "nombre del transportista")?;
                let mut cam_trans = CamTransportista {
                    i_nat_trans: NaturalezaReceptor::NoContribuyente,
                    d_nom_trans: nombre,
                    d_ruc_trans: None,
                    d_dv_trans: None,
                    i_tip_id_trans: None,
                    d_d_tip_id_trans: None,
                    d_num_id_trans: None,
                };
                if data.es_contribuyente {
                    cam_trans.i_nat_trans = NaturalezaReceptor::Contribuyente;
                    cam_trans.d_ruc_trans =
                        Some(required(data.ruc_transportista, "RUC del transportista")?);
                    cam_trans.d_dv_trans =
                        Some(required(data.dv_transportista, "DV del transportista")?);
                } else {
                    let tipo = data.tipo_doc_transportista.ok_or_else(|| {
                        SifenError::validation(
                            "VAL_017",
                            "tipo de documento del transportista es requerido",
                        )
                    })?;
                    cam_trans.i_tip_id_trans = Some(tipo);
                    cam_trans.d_d_tip_id_trans = Some(tipo.description().to_string());
                    cam_trans.d_num_id_trans =
                        Some(required(data.doc_transportista, "documento del transportista")?);
                }
                evento.g_cam_trans = Some(cam_trans);
            }
            MotivoActualizacionTransporte::CambioVehiculo => {
                evento.g_cam_veh = Some(CamVehiculo {
                    d_tip_veh: required(data.tipo_vehiculo, "tipo de vehículo")?,
                    d_mar_veh: data.marca_vehiculo,
                    d_num_placa: required(data.placa_vehiculo, "placa del vehículo")?,
                });
            }
        }

        Ok(self.envelope(EventoPayload::ActualizacionTransporte(evento)))
    }

    pub fn build_conformidad(&self, data: ConformidadData) -> Result<EventoEnvelope, SifenError> {
        if data.cdc.len() != 44 {
            return Err(SifenError::cdc_invalido());
        }
        let recepcion = data
            .fecha_recepcion
            .map(format_fecha_hora)
            .unwrap_or_else(now_fecha_hora);
        Ok(self.envelope(EventoPayload::Conformidad(EvConformidad {
            d_ruc_rec: self.ruc_emisor.clone(),
            d_dv_rec: self.dv_emisor.clone(),
            i_tip_evt: 11,
            d_cdc: data.cdc,
            i_ti_conf: data.tipo_conformidad,
            d_des_ti_conf: data.tipo_conformidad.description().to_string(),
            d_fec_recep: recepcion,
            d_fec_emi_conf: now_fecha_hora(),
        })))
    }

    pub fn build_disconformidad(
        &self,
        data: DisconformidadData,
    ) -> Result<EventoEnvelope, SifenError> {
        if data.cdc.len() != 44 {
            return Err(SifenError::cdc_invalido());
        }
        if data.motivo.is_empty() {
            return Err(SifenError::motivo_requerido());
        }
        Ok(self.envelope(EventoPayload::Disconformidad(EvDisconformidad {
            d_ruc_rec: self.ruc_emisor.clone(),
            d_dv_rec: self.dv_emisor.clone(),
            i_tip_evt: 12,
            d_cdc: data.cdc,
            m_mot_disc: data.motivo,
            d_fec_emi_disc: now_fecha_hora(),
        })))
    }

    pub fn build_desconocimiento(
        &self,
        data: DesconocimientoData,
    ) -> Result<EventoEnvelope, SifenError> {
        if data.cdc.len() != 44 {
            return Err(SifenError::cdc_invalido());
        }
        if data.motivo.is_empty() {
            return Err(SifenError::motivo_requerido());
        }
        if data.nombre.is_empty() {
            return Err(SifenError::validation("VAL_018", "nombre es requerido"));
        }
        Ok(self.envelope(EventoPayload::Desconocimiento(EvDesconocimiento {
            d_ruc_rec: Some(self.ruc_emisor.clone()),
            d_dv_rec: Some(self.dv_emisor.clone()),
            i_tip_evt: 13,
            d_cdc: data.cdc,
            d_fec_emi: data
                .fecha_emision
                .map(format_fecha_hora)
                .unwrap_or_else(now_fecha_hora),
            d_fec_recep: data
                .fecha_recepcion
                .map(format_fecha_hora)
                .unwrap_or_else(now_fecha_hora),
            i_ti_rec: data
                .tipo_receptor
                .unwrap_or(NaturalezaReceptor::NoContribuyente),
            d_nom_rec: data.nombre,
            d_ruc_rec_des: data.ruc,
            i_tip_id_rec: data.tipo_documento,
            d_num_id_rec: data.numero_documento,
            m_mot_desc: data.motivo,
            d_fec_emi_desc: now_fecha_hora(),
        })))
    }

    pub fn build_notificacion(
        &self,
        data: NotificacionData,
    ) -> Result<EventoEnvelope, SifenError> {
        if data.cdc.len() != 44 {
            return Err(SifenError::cdc_invalido());
        }
        if data.nombre.is_empty() {
            return Err(SifenError::validation("VAL_018", "nombre es requerido"));
        }
        Ok(self.envelope(EventoPayload::Notificacion(EvNotificacion {
            d_ruc_rec: Some(self.ruc_emisor.clone()),
            d_dv_rec: Some(self.dv_emisor.clone()),
            i_tip_evt: 14,
            d_cdc: data.cdc,
            d_fec_emi: data
                .fecha_emision
                .map(format_fecha_hora)
                .unwrap_or_else(now_fecha_hora),
            d_fec_recep: data
                .fecha_recepcion
                .map(format_fecha_hora)
                .unwrap_or_else(now_fecha_hora),
            i_ti_rec: data
                .tipo_receptor
                .unwrap_or(NaturalezaReceptor::Contribuyente),
            d_nom_rec: data.nombre,
            d_ruc_rec_not: data.ruc,
            i_tip_id_rec: data.tipo_documento,
            d_num_id_rec: data.numero_documento,
            d_tot_pyg: data.total_pyg,
            d_fec_emi_not: now_fecha_hora(),
        })))
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, SifenError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(SifenError::validation(
            "VAL_017",
            format!("{field} es requerido"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CDC: &str = "01800695631001001000000121202401151234567890";

    fn builder() -> EventBuilder {
        EventBuilder::new(5, "80069563", "1")
    }

    #[test]
    fn cancelacion_requires_cdc_and_motivo() {
        let err = builder()
            .build_cancelacion(CancelacionData {
                cdc: "123".to_string(),
                motivo: "anulación".to_string(),
            })
            .unwrap_err();
        assert_eq!(err.code(), "VAL_001");

        let err = builder()
            .build_cancelacion(CancelacionData {
                cdc: CDC.to_string(),
                motivo: String::new(),
            })
            .unwrap_err();
        assert_eq!(err.code(), "VAL_010");
    }

    #[test]
    fn cancelacion_serializes_under_ges_eve_group() {
        let evento = builder()
            .build_cancelacion(CancelacionData {
                cdc: CDC.to_string(),
                motivo: "error de facturación".to_string(),
            })
            .unwrap();
        let xml = evento.to_xml().unwrap();
        assert!(xml.contains("<rEnviEventoDe xmlns:xsi="));
        assert!(xml.contains("<dId>5</dId>"));
        assert!(xml.contains("<gEvento Id=\"800695631"));
        assert!(xml.contains("<gGroupGesEve><rGeVeCan>"));
        assert!(xml.contains("<iTipEvt>1</iTipEvt>"));
        assert!(xml.contains(&format!("<dCDC>{CDC}</dCDC>")));
        assert!(!xml.contains("gGroupTiEvt"));
    }

    #[test]
    fn event_ids_embed_issuer_ruc_and_are_unique() {
        let b = builder();
        let id1 = b.generate_event_id();
        let id2 = b.generate_event_id();
        assert!(id1.starts_with("800695631"));
        assert_ne!(id1, id2);
    }

    #[test]
    fn inutilizacion_validates_range_and_widths() {
        let base = InutilizacionData {
            tipo_documento: TipoDocumento::FacturaElectronica,
            establecimiento: "001".to_string(),
            punto: "001".to_string(),
            desde: 100,
            hasta: 50,
            motivo: "salto de numeración".to_string(),
        };
        let err = builder().build_inutilizacion(base.clone()).unwrap_err();
        assert_eq!(err.code(), "VAL_015");

        let mut bad = base.clone();
        bad.establecimiento = "1".to_string();
        assert_eq!(
            builder().build_inutilizacion(bad).unwrap_err().code(),
            "VAL_007"
        );

        let mut ok = base;
        ok.hasta = 150;
        let evento = builder().build_inutilizacion(ok).unwrap();
        let xml = evento.to_xml().unwrap();
        assert!(xml.contains("<rGeVeInu>"));
        assert!(xml.contains("<dNumDocDesde>100</dNumDocDesde>"));
        assert!(xml.contains("<dNumDocHasta>150</dNumDocHasta>"));
    }

    #[test]
    fn conformidad_serializes_under_ti_evt_group() {
        let evento = builder()
            .build_conformidad(ConformidadData {
                cdc: CDC.to_string(),
                tipo_conformidad: TipoConformidad::Total,
                fecha_recepcion: None,
            })
            .unwrap();
        let xml = evento.to_xml().unwrap();
        assert!(xml.contains("<gGroupTiEvt><rGeTrReConf>"));
        assert!(xml.contains("<iTipEvt>11</iTipEvt>"));
        assert!(xml.contains("<iTiConf>1</iTiConf>"));
        assert!(!xml.contains("gGroupGesEve"));
    }

    #[test]
    fn transporte_motivo_chofer_requires_driver_document() {
        let mut data = ActTransporteData::new(CDC, MotivoActualizacionTransporte::CambioChofer);
        data.nombre_chofer = Some("Juan Benítez".to_string());
        let err = builder()
            .build_actualizacion_transporte(data.clone())
            .unwrap_err();
        assert_eq!(err.code(), "VAL_017");

        data.documento_chofer = Some("1234567".to_string());
        let evento = builder().build_actualizacion_transporte(data).unwrap();
        let xml = evento.to_xml().unwrap();
        assert!(xml.contains("<rGeVeTra>"));
        assert!(xml.contains("<gCamChof><dNomChof>Juan Benítez</dNomChof>"));
    }

    #[test]
    fn transporte_motivo_transportista_branches_on_contributor() {
        let mut data =
            ActTransporteData::new(CDC, MotivoActualizacionTransporte::CambioTransportista);
        data.nombre_transportista = Some("Transportes del Este".to_string());
        data.es_contribuyente = true;
        data.ruc_transportista = Some("50062360".to_string());
        data.dv_transportista = Some("0".to_string());
        let xml = builder()
            .build_actualizacion_transporte(data)
            .unwrap()
            .to_xml()
            .unwrap();
        assert!(xml.contains("<iNatTrans>1</iNatTrans>"));
        assert!(xml.contains("<dRucTrans>50062360</dRucTrans>"));
        assert!(!xml.contains("iTipIDTrans"));
    }

    #[test]
    fn transporte_motivo_vehiculo_requires_plate() {
        let mut data = ActTransporteData::new(CDC, MotivoActualizacionTransporte::CambioVehiculo);
        data.tipo_vehiculo = Some("Camión".to_string());
        let err = builder()
            .build_actualizacion_transporte(data.clone())
            .unwrap_err();
        assert_eq!(err.code(), "VAL_017");

        data.placa_vehiculo = Some("ABC123".to_string());
        let xml = builder()
            .build_actualizacion_transporte(data)
            .unwrap()
            .to_xml()
            .unwrap();
        assert!(xml.contains("<gCamVeh>"));
        assert!(xml.contains("<dNumPlaca>ABC123</dNumPlaca>"));
    }

    #[test]
    fn notificacion_carries_total_pyg() {
        let evento = builder()
            .build_notificacion(NotificacionData {
                cdc: CDC.to_string(),
                nombre: "Receptor SA".to_string(),
                total_pyg: 1_500_000.0,
                ..Default::default()
            })
            .unwrap();
        let xml = evento.to_xml().unwrap();
        assert!(xml.contains("<rGeTrReNot>"));
        assert!(xml.contains("<dTotPyg>1500000</dTotPyg>"));
        assert!(xml.contains("<iTipEvt>14</iTipEvt>"));
    }

    #[test]
    fn desconocimiento_requires_name_and_motive() {
        let err = builder()
            .build_desconocimiento(DesconocimientoData {
                cdc: CDC.to_string(),
                motivo: "no solicitado".to_string(),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.code(), "VAL_018");
    }
}
