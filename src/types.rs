//! Closed enumerations of the SIFEN v150 schema.
//!
//! Integer-coded sets serialize as their numeric wire code; currency and
//! country serialize as their three-letter ISO code. Every set also exposes
//! the human description used by the `dDes*` echo elements.

/// Defines an integer-coded closed set with its wire code and description.
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident = $code:literal => $desc:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant,)+
        }

        impl $name {
            /// Numeric wire code.
            pub fn code(self) -> i16 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// Description echoed in the matching `dDes*` element.
            pub fn description(self) -> &'static str {
                match self {
                    $(Self::$variant => $desc,)+
                }
            }
        }

        impl TryFrom<i16> for $name {
            type Error = crate::error::SifenError;

            fn try_from(code: i16) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok(Self::$variant),)+
                    other => Err(crate::error::SifenError::validation(
                        "VAL_020",
                        format!("código {} inválido para {}", other, stringify!($name)),
                    )),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.description())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_i16(self.code())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let code = i16::deserialize(deserializer)?;
                Self::try_from(code).map_err(serde::de::Error::custom)
            }
        }
    };
}

coded_enum! {
    /// Tipo de documento electrónico (`iTiDE`).
    pub enum TipoDocumento {
        FacturaElectronica = 1 => "Factura electrónica",
        FacturaElectronicaExportacion = 2 => "Factura electrónica de exportación",
        FacturaElectronicaImportacion = 3 => "Factura electrónica de importación",
        AutofacturaElectronica = 4 => "Autofactura electrónica",
        NotaCreditoElectronica = 5 => "Nota de crédito electrónica",
        NotaDebitoElectronica = 6 => "Nota de débito electrónica",
        NotaRemisionElectronica = 7 => "Nota de remisión electrónica",
        ComprobanteRetencionElectronico = 8 => "Comprobante de retención electrónico",
    }
}

coded_enum! {
    /// Tipo de emisión (`iTipEmi`).
    pub enum TipoEmision {
        Normal = 1 => "Normal",
        Contingencia = 2 => "Contingencia",
    }
}

coded_enum! {
    /// Tipo de transacción (`iTipTra`).
    pub enum TipoTransaccion {
        VentaMercaderia = 1 => "Venta de mercadería",
        PrestacionServicios = 2 => "Prestación de servicios",
        Mixto = 3 => "Mixto (Venta de mercadería y servicios)",
        VentaActivoFijo = 4 => "Venta de activo fijo",
        VentaDivisas = 5 => "Venta de divisas",
        CompraDivisas = 6 => "Compra de divisas",
        PromocionMuestras = 7 => "Promoción o entrega de muestras",
        Donacion = 8 => "Donación",
        Anticipo = 9 => "Anticipo",
        CompraProductos = 10 => "Compra de productos",
        CompraServicios = 11 => "Compra de servicios",
        VentaCreditoFiscal = 12 => "Venta de crédito fiscal",
        MuestrasMedicas = 13 => "Muestras médicas (Art. 3 RG 24/2014)",
    }
}

coded_enum! {
    /// Tipo de impuesto afectado (`iTImp`).
    pub enum TipoImpuesto {
        Iva = 1 => "IVA",
        Isc = 2 => "ISC",
        Renta = 3 => "Renta",
        Ninguno = 4 => "Ninguno",
        IvaRenta = 5 => "IVA - Renta",
    }
}

coded_enum! {
    /// Tipo de contribuyente (`iTipCont`).
    pub enum TipoContribuyente {
        PersonaFisica = 1 => "Persona Física",
        PersonaJuridica = 2 => "Persona Jurídica",
    }
}

coded_enum! {
    /// Naturaleza del receptor (`iNatRec`), also used for transportistas.
    pub enum NaturalezaReceptor {
        Contribuyente = 1 => "Contribuyente",
        NoContribuyente = 2 => "No Contribuyente",
    }
}

coded_enum! {
    /// Tipo de operación (`iTiOpe`).
    pub enum TipoOperacion {
        B2B = 1 => "B2B",
        B2C = 2 => "B2C",
        B2G = 3 => "B2G",
        B2F = 4 => "B2F",
    }
}

coded_enum! {
    /// Afectación tributaria del IVA (`iAfecIVA`).
    pub enum AfectacionIva {
        Gravado = 1 => "Gravado IVA",
        Exonerado = 2 => "Exonerado (Art. 83-Ley 125/91)",
        Exento = 3 => "Exento",
        GravadoParcial = 4 => "Gravado parcial (Grav-Exento)",
    }
}

coded_enum! {
    /// Indicador de presencia (`iIndPres`).
    pub enum IndicadorPresencia {
        Presencial = 1 => "Operación presencial",
        Electronica = 2 => "Operación electrónica",
        Telemarketing = 3 => "Operación telemarketing",
        VentaDomicilio = 4 => "Venta a domicilio",
        Bancaria = 5 => "Operación bancaria",
        Ciclica = 6 => "Operación cíclica",
        Otro = 9 => "Otro",
    }
}

coded_enum! {
    /// Condición de la operación (`iCondOpe`).
    pub enum CondicionOperacion {
        Contado = 1 => "Contado",
        Credito = 2 => "Crédito",
    }
}

coded_enum! {
    /// Condición del crédito (`iCondCred`).
    pub enum CondicionCredito {
        Plazo = 1 => "Plazo",
        Cuotas = 2 => "Cuotas",
    }
}

coded_enum! {
    /// Tipo de pago (`iTiPago`).
    pub enum TipoPago {
        Efectivo = 1 => "Efectivo",
        Cheque = 2 => "Cheque",
        TarjetaCredito = 3 => "Tarjeta de crédito",
        TarjetaDebito = 4 => "Tarjeta de débito",
        TransferenciaBancaria = 5 => "Transferencia bancaria",
        GirosBancarios = 6 => "Giros bancarios",
        BilleteraElectronica = 7 => "Billetera electrónica",
        TarjetaEmpresarial = 8 => "Tarjeta empresarial",
        Vales = 9 => "Vales",
        Retencion = 10 => "Retención",
        PagoAnticipo = 11 => "Pago por anticipo",
        ValorFiscal = 12 => "Valor fiscal",
        ValorComercial = 13 => "Valor comercial",
        Compensacion = 14 => "Compensación",
        Permuta = 15 => "Permuta",
        PagoBancario = 16 => "Pago bancario",
        PagoMovil = 17 => "Pago móvil",
        Donacion = 18 => "Donación",
        Promocion = 19 => "Promoción",
        Otro = 99 => "Otro",
    }
}

coded_enum! {
    /// Motivo de emisión de nota de crédito/débito (`iMotEmi`).
    pub enum MotivoEmisionNc {
        DevolucionAjuste = 1 => "Devolución y Ajuste de precios",
        Devolucion = 2 => "Devolución",
        Descuento = 3 => "Descuento",
        Bonificacion = 4 => "Bonificación",
        CreditoIncobrable = 5 => "Crédito incobrable",
        RecuperoCosto = 6 => "Recupero de costo",
        RecuperoGasto = 7 => "Recupero de gasto",
        AjustePrecio = 8 => "Ajuste de precio",
    }
}

coded_enum! {
    /// Motivo de emisión de nota de remisión (`iMotEmiNR`).
    pub enum MotivoEmisionNr {
        TrasladoVentas = 1 => "Traslado por ventas",
        TrasladoConsignacion = 2 => "Traslado por consignación",
        Exportacion = 3 => "Exportación",
        TrasladoCompra = 4 => "Traslado por compra",
        Importacion = 5 => "Importación",
        TrasladoDevolucion = 6 => "Traslado por devolución",
        TrasladoEntreLocales = 7 => "Traslado entre locales de la empresa",
        TrasladoTransformacion = 8 => "Traslado de bienes por transformación",
        TrasladoReparacion = 9 => "Traslado de bienes por reparación",
        TrasladoEmisorMovil = 10 => "Traslado por emisor móvil",
        ExhibicionDemostracion = 11 => "Exhibición o demostración",
        ParticipacionFerias = 12 => "Participación en ferias",
        TrasladoEncomienda = 13 => "Traslado de encomienda",
        Decomiso = 14 => "Decomiso",
        Otro = 99 => "Otro",
    }
}

coded_enum! {
    /// Responsable del flete / de la emisión de la NR (`iRespEmiNR`, `iTipRep`).
    pub enum ResponsableFlete {
        EmisorFactura = 1 => "Emisor de la factura",
        PoseedorFacturaBienes = 2 => "Poseedor de la factura y bienes",
        EmpresaTransportista = 3 => "Empresa transportista",
        DespachanteAduanas = 4 => "Despachante de Aduanas",
        AgenteTransporte = 5 => "Agente de transporte o intermediario",
    }
}

coded_enum! {
    /// Naturaleza del vendedor en autofactura (`iNatVen`).
    pub enum NaturalezaVendedor {
        NoContribuyente = 1 => "No contribuyente",
        Extranjero = 2 => "Extranjero",
    }
}

coded_enum! {
    /// Tipo de documento de identidad (`iTipIDRec` and relatives).
    pub enum TipoDocumentoReceptor {
        CedulaParaguaya = 1 => "Cédula paraguaya",
        Pasaporte = 2 => "Pasaporte",
        CedulaExtranjera = 3 => "Cédula extranjera",
        CarnetResidencia = 4 => "Carnet de residencia",
        Innominado = 5 => "Innominado",
        TarjetaDiplomatica = 6 => "Tarjeta Diplomática de exoneración fiscal",
        Otro = 9 => "Otro",
    }
}

coded_enum! {
    /// Departamentos del Paraguay (`cDepEmi`, `cDepRec`, ...).
    pub enum Departamento {
        Capital = 1 => "CAPITAL",
        Concepcion = 2 => "CONCEPCION",
        SanPedro = 3 => "SAN PEDRO",
        Cordillera = 4 => "CORDILLERA",
        Guaira = 5 => "GUAIRA",
        Caaguazu = 6 => "CAAGUAZU",
        Caazapa = 7 => "CAAZAPA",
        Itapua = 8 => "ITAPUA",
        Misiones = 9 => "MISIONES",
        Paraguari = 10 => "PARAGUARI",
        AltoParana = 11 => "ALTO PARANA",
        Central = 12 => "CENTRAL",
        Neembucu = 13 => "ÑEEMBUCU",
        Amambay = 14 => "AMAMBAY",
        Canindeyu = 15 => "CANINDEYU",
        PresidenteHayes = 16 => "PRESIDENTE HAYES",
        Boqueron = 17 => "BOQUERON",
        AltoParaguay = 18 => "ALTO PARAGUAY",
    }
}

coded_enum! {
    /// Unidad de medida (`cUniMed`).
    pub enum UnidadMedida {
        Unidad = 77 => "Unidad",
        Hora = 15 => "Hora",
        Kilogramo = 71 => "Kilogramo",
        Metros = 87 => "Metro",
        MetroCuadrado = 79 => "Metro cuadrado",
        MetroCubico = 80 => "Metro cúbico",
        Litro = 76 => "Litro",
        Par = 94 => "Par",
        Docena = 56 => "Docena",
        Pieza = 98 => "Pieza",
        Global = 66 => "Global",
        Dia = 54 => "Día",
        Mes = 88 => "Mes",
        Ano = 110 => "Año",
        Servicio = 117 => "Servicio",
    }
}

impl UnidadMedida {
    /// Printable abbreviation, used by the KuDE.
    pub fn abreviatura(self) -> &'static str {
        match self {
            UnidadMedida::Unidad => "UNI",
            UnidadMedida::Hora => "h",
            UnidadMedida::Kilogramo => "kg",
            UnidadMedida::Metros => "m",
            UnidadMedida::MetroCuadrado => "m²",
            UnidadMedida::MetroCubico => "m³",
            UnidadMedida::Litro => "L",
            UnidadMedida::Par => "PAR",
            UnidadMedida::Docena => "DOC",
            UnidadMedida::Pieza => "PZA",
            UnidadMedida::Global => "GLO",
            UnidadMedida::Dia => "DIA",
            UnidadMedida::Mes => "MES",
            UnidadMedida::Ano => "AÑO",
            UnidadMedida::Servicio => "SER",
        }
    }
}

coded_enum! {
    /// Característica de la carga (`iCarCarga`).
    pub enum CaracteristicaCarga {
        CadenaFrio = 1 => "Mercaderías con cadena de frío",
        CargaPeligrosa = 2 => "Carga peligrosa",
        Otras = 3 => "Otras",
    }
}

coded_enum! {
    /// Tipo de documento asociado (`iTipDocAso`).
    pub enum TipoDocumentoAsociado {
        Electronico = 1 => "Electrónico",
        Impreso = 2 => "Impreso",
        ConstanciaElectronica = 3 => "Constancia electrónica",
    }
}

coded_enum! {
    /// Tipo de documento impreso asociado (`iTipoDocAso`).
    pub enum TipoDocumentoImpreso {
        Factura = 1 => "Factura",
        NotaCredito = 2 => "Nota de crédito",
        NotaDebito = 3 => "Nota de débito",
        NotaRemision = 4 => "Nota de remisión",
        ComprobanteRetencion = 5 => "Comprobante de retención",
    }
}

coded_enum! {
    /// Tipo de constancia (`iTipCons`).
    pub enum TipoConstancia {
        NoRetencion = 1 => "Constancia de no retención",
        Microproductores = 2 => "Constancia de microproductores",
    }
}

coded_enum! {
    /// Tipo de evento (`iTipEvt`).
    pub enum TipoEvento {
        Cancelacion = 1 => "Cancelación",
        Inutilizacion = 2 => "Inutilización",
        Endoso = 3 => "Endoso",
        AcuseDe = 10 => "Acuse del DE",
        ConformidadDe = 11 => "Conformidad del DE",
        DisconformidadDe = 12 => "Disconformidad del DE",
        DesconocimientoDe = 13 => "Desconocimiento del DE",
        NotificacionRecepcion = 14 => "Notificación de recepción",
        Nominacion = 20 => "Nominación",
        ActualizacionTransporte = 21 => "Actualización de datos de transporte",
    }
}

coded_enum! {
    /// Tipo de transporte (`iTipTrans`).
    pub enum TipoTransporte {
        Propio = 1 => "Propio",
        Tercero = 2 => "Tercero",
    }
}

coded_enum! {
    /// Modalidad de transporte (`iModTrans`).
    pub enum ModalidadTransporte {
        Terrestre = 1 => "Terrestre",
        Fluvial = 2 => "Fluvial",
        Aereo = 3 => "Aéreo",
        Multimodal = 4 => "Multimodal",
    }
}

coded_enum! {
    /// Tipo de vehículo usado en eventos de transporte.
    pub enum TipoVehiculo {
        Camion = 1 => "Camión",
        Camioneta = 2 => "Camioneta",
        Furgoneta = 3 => "Furgoneta",
        Barco = 4 => "Barco",
        Avion = 5 => "Avión",
    }
}

coded_enum! {
    /// Tipo de combustible del sector automotor (`iTipComb`).
    pub enum TipoCombustible {
        Nafta = 1 => "Nafta",
        Diesel = 2 => "Diésel",
        Gas = 3 => "Gas",
        Electrico = 4 => "Eléctrico",
        Hibrido = 5 => "Híbrido",
        NaftaGas = 6 => "Nafta/Gas",
        DieselGas = 7 => "Diésel/Gas",
        Alcohol = 8 => "Alcohol",
        Vapor = 9 => "Vapor",
    }
}

coded_enum! {
    /// Tipo de régimen del emisor (`cTipReg`).
    pub enum TipoRegimen {
        Turismo = 1 => "Régimen de Turismo",
        Importador = 2 => "Importador",
        Exportador = 3 => "Exportador",
        Maquila = 4 => "Maquila",
        Ley60_90 = 5 => "Ley N° 60/90",
        PequenoProductor = 6 => "Régimen del Pequeño Productor",
        MedianoProductor = 7 => "Régimen del Mediano Productor",
        Contable = 8 => "Régimen Contable",
    }
}

coded_enum! {
    /// Tipo de conformidad del receptor (`iTiConf`).
    pub enum TipoConformidad {
        Total = 1 => "Conformidad total",
        Parcial = 2 => "Conformidad parcial",
    }
}

coded_enum! {
    /// Motivo de actualización de datos de transporte (`dMotEv`).
    pub enum MotivoActualizacionTransporte {
        CambioLocalEntrega = 1 => "Cambio del local de entrega",
        CambioChofer = 2 => "Cambio del chofer",
        CambioTransportista = 3 => "Cambio del transportista",
        CambioVehiculo = 4 => "Cambio de vehículo",
    }
}

/// Defines a three-letter-coded closed set (ISO currency / country codes).
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident = $code:literal => $desc:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant,)+
        }

        impl $name {
            /// Three-letter wire code.
            pub fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// Spanish display name.
            pub fn nombre(self) -> &'static str {
                match self {
                    $(Self::$variant => $desc,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::SifenError;

            fn from_str(code: &str) -> Result<Self, Self::Err> {
                match code {
                    $($code => Ok(Self::$variant),)+
                    other => Err(crate::error::SifenError::validation(
                        "VAL_021",
                        format!("código {} inválido para {}", other, stringify!($name)),
                    )),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.code())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.code())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let code = String::deserialize(deserializer)?;
                code.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

string_enum! {
    /// Moneda de la operación (`cMoneOpe`), ISO 4217.
    pub enum Moneda {
        Pyg = "PYG" => "Guaraní",
        Usd = "USD" => "Dólar estadounidense",
        Eur = "EUR" => "Euro",
        Brl = "BRL" => "Real brasileño",
        Ars = "ARS" => "Peso argentino",
        Uyu = "UYU" => "Peso uruguayo",
        Clp = "CLP" => "Peso chileno",
        Bob = "BOB" => "Boliviano",
        Pen = "PEN" => "Nuevo sol",
        Cop = "COP" => "Peso colombiano",
        Gbp = "GBP" => "Libra esterlina",
        Jpy = "JPY" => "Yen",
        Chf = "CHF" => "Franco suizo",
        Cad = "CAD" => "Dólar canadiense",
        Aud = "AUD" => "Dólar australiano",
        Cny = "CNY" => "Yuan renminbi",
    }
}

string_enum! {
    /// País (`cPaisRec`, `cPaisDest`, ...), ISO 3166-1 alpha-3.
    pub enum Pais {
        Pry = "PRY" => "Paraguay",
        Usa = "USA" => "Estados Unidos",
        Arg = "ARG" => "Argentina",
        Bra = "BRA" => "Brasil",
        Ury = "URY" => "Uruguay",
        Bol = "BOL" => "Bolivia",
        Chl = "CHL" => "Chile",
        Per = "PER" => "Perú",
        Col = "COL" => "Colombia",
        Ecu = "ECU" => "Ecuador",
        Ven = "VEN" => "Venezuela",
        Mex = "MEX" => "México",
        Esp = "ESP" => "España",
        Deu = "DEU" => "Alemania",
        Fra = "FRA" => "Francia",
        Ita = "ITA" => "Italia",
        Gbr = "GBR" => "Reino Unido",
        Chn = "CHN" => "China",
        Jpn = "JPN" => "Japón",
        Kor = "KOR" => "Corea del Sur",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coded_enum_round_trips_through_code() {
        assert_eq!(TipoDocumento::FacturaElectronica.code(), 1);
        assert_eq!(
            TipoDocumento::try_from(5).unwrap(),
            TipoDocumento::NotaCreditoElectronica
        );
        assert!(TipoDocumento::try_from(42).is_err());
    }

    #[test]
    fn descriptions_match_wire_echo_fields() {
        assert_eq!(TipoEmision::Normal.description(), "Normal");
        assert_eq!(
            TipoDocumento::NotaRemisionElectronica.description(),
            "Nota de remisión electrónica"
        );
        assert_eq!(Departamento::AltoParana.description(), "ALTO PARANA");
    }

    #[test]
    fn unidad_medida_has_abbreviations() {
        assert_eq!(UnidadMedida::Unidad.abreviatura(), "UNI");
        assert_eq!(UnidadMedida::Kilogramo.abreviatura(), "kg");
    }

    #[test]
    fn string_enums_parse_and_print_codes() {
        assert_eq!(Moneda::Pyg.code(), "PYG");
        assert_eq!("USD".parse::<Moneda>().unwrap(), Moneda::Usd);
        assert!("XXX".parse::<Moneda>().is_err());
        assert_eq!(Pais::Pry.nombre(), "Paraguay");
        assert_eq!("BRA".parse::<Pais>().unwrap(), Pais::Bra);
    }

    #[test]
    fn event_kinds_cover_issuer_and_receiver_sides() {
        assert_eq!(TipoEvento::Cancelacion.code(), 1);
        assert_eq!(TipoEvento::NotificacionRecepcion.code(), 14);
        assert_eq!(TipoEvento::ActualizacionTransporte.code(), 21);
    }
}
