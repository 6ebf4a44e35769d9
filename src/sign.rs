//! XML Digital Signature (XMLDSig) over `Id`-referenced elements.
//!
//! The flow follows the W3C enveloped-signature profile SIFEN requires:
//! locate the element by its `Id` attribute, canonicalize it under Exclusive
//! C14N, digest with SHA-256, build `SignedInfo`, canonicalize that, sign it
//! with RSA-PKCS#1 v1.5 and splice the resulting `<Signature>` back into the
//! located element. The digest is always taken before the signature is
//! inserted, so the signed byte sequence is never disturbed.
use base64ct::{Base64, Encoding};
use libxml::{
    parser::Parser,
    tree::{c14n, Document},
    xpath,
};
use rsa::pkcs8::DecodePrivateKey;
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha2::{Digest, Sha256};

use crate::error::SifenError;

pub const XMLDSIG_NS: &str = "http://www.w3.org/2000/09/xmldsig#";
pub const ALGO_EXC_C14N: &str = "http://www.w3.org/2001/10/xml-exc-c14n#";
pub const ALGO_RSA_SHA256: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha256";
pub const ALGO_ENVELOPED: &str = "http://www.w3.org/2000/09/xmldsig#enveloped-signature";
pub const ALGO_SHA256: &str = "http://www.w3.org/2001/04/xmlenc#sha256";

/// Signs serialized XML documents with an RSA key unwrapped from a PKCS#12
/// container.
#[derive(Debug)]
pub struct XmlSigner {
    key: RsaPrivateKey,
    cert_der: Vec<u8>,
}

impl XmlSigner {
    /// Unwrap key and leaf certificate from PKCS#12 DER bytes.
    ///
    /// Only RSA keys are accepted; any other key type is a cryptography
    /// error.
    pub fn from_pkcs12(pkcs12_der: &[u8], password: &str) -> Result<XmlSigner, SifenError> {
        let pfx = p12::PFX::parse(pkcs12_der).map_err(|e| {
            SifenError::crypto(
                "CRYPTO_001",
                format!("no se pudo leer el contenedor PKCS#12: {e:?}"),
            )
        })?;
        if !pfx.verify_mac(password) {
            return Err(SifenError::crypto(
                "CRYPTO_003",
                "Contraseña del certificado incorrecta",
            ));
        }

        let key_bags = pfx.key_bags(password).map_err(|e| {
            SifenError::crypto(
                "CRYPTO_001",
                format!("no se pudo extraer la clave privada: {e:?}"),
            )
        })?;
        let key_der = key_bags
            .first()
            .ok_or_else(|| SifenError::crypto("CRYPTO_001", "Certificado no encontrado"))?;
        let key = RsaPrivateKey::from_pkcs8_der(key_der)
            .map_err(|_| SifenError::crypto("CRYPTO_005", "Clave privada no es RSA"))?;

        let cert_bags = pfx.cert_x509_bags(password).map_err(|e| {
            SifenError::crypto(
                "CRYPTO_001",
                format!("no se pudo extraer el certificado: {e:?}"),
            )
        })?;
        let cert_der = cert_bags
            .first()
            .cloned()
            .ok_or_else(|| SifenError::crypto("CRYPTO_001", "Certificado no encontrado"))?;

        Ok(XmlSigner { key, cert_der })
    }

    /// Build a signer from a certificate and a PKCS#8 private key, both DER.
    pub fn from_der(cert_der: &[u8], key_pkcs8_der: &[u8]) -> Result<XmlSigner, SifenError> {
        let key = RsaPrivateKey::from_pkcs8_der(key_pkcs8_der)
            .map_err(|_| SifenError::crypto("CRYPTO_005", "Clave privada no es RSA"))?;
        Ok(XmlSigner {
            key,
            cert_der: cert_der.to_vec(),
        })
    }

    /// Leaf certificate embedded in `KeyInfo`, DER bytes.
    pub fn certificate_der(&self) -> &[u8] {
        &self.cert_der
    }

    /// Sign the element whose `Id` attribute equals `element_id` and return
    /// the document with the enveloped `<Signature>` spliced in.
    pub fn sign(&self, xml: &str, element_id: &str) -> Result<String, SifenError> {
        let doc = parse_document(xml)?;
        let node = locate_by_id(&doc, element_id)?;

        let digest = reference_digest(xml, element_id)?;
        let digest_b64 = Base64::encode_string(&digest);

        let signed_info = build_signed_info(element_id, &digest_b64);
        let si_digest = c14n_digest_str(&signed_info)?;
        let signature_bytes = self
            .key
            .sign(Pkcs1v15Sign::new::<Sha256>(), &si_digest)
            .map_err(|e| {
                SifenError::crypto_with(
                    "CRYPTO_004",
                    "Error al generar firma digital",
                    Box::new(e),
                )
            })?;
        let signature_b64 = Base64::encode_string(&signature_bytes);
        let cert_b64 = Base64::encode_string(&self.cert_der);

        let signature_xml = format!(
            "<Signature xmlns=\"{XMLDSIG_NS}\">{signed_info}\
             <SignatureValue>{signature_b64}</SignatureValue>\
             <KeyInfo><X509Data><X509Certificate>{cert_b64}</X509Certificate></X509Data></KeyInfo>\
             </Signature>"
        );

        // Splice into the original byte sequence so the digested bytes stay
        // untouched.
        let closing = format!("</{}>", node.get_name());
        let position = xml.rfind(&closing).ok_or_else(|| {
            SifenError::internal(format!(
                "no se encontró el cierre de {} para insertar la firma",
                node.get_name()
            ))
        })?;
        let mut signed = String::with_capacity(xml.len() + signature_xml.len());
        signed.push_str(&xml[..position]);
        signed.push_str(&signature_xml);
        signed.push_str(&xml[position..]);
        Ok(signed)
    }
}

/// SHA-256 over the Exclusive C14N form of the `Id`-referenced subtree with
/// any `Signature` descendants removed, as the enveloped-signature transform
/// prescribes. This is the `DigestValue` input on both the signing and the
/// verification side.
pub fn reference_digest(xml: &str, element_id: &str) -> Result<[u8; 32], SifenError> {
    let doc = parse_document(xml)?;
    let node = locate_by_id(&doc, element_id)?;
    let subtree = doc.node_to_string(&node);

    let sub_doc = parse_document(&subtree)?;
    let ctx = xpath_context(&sub_doc)?;
    let signatures = ctx
        .evaluate("//*[local-name()='Signature']")
        .map_err(|e| SifenError::internal(format!("error de XPath: {e:?}")))?
        .get_nodes_as_vec();
    for mut signature in signatures {
        signature.unlink();
    }

    c14n_digest_doc(&sub_doc)
}

/// Text content of the first element with the given local name, if any.
/// Used to pull `SignatureValue` and `DigestValue` back out of signed
/// documents.
pub fn extract_text(xml: &str, local_name: &str) -> Result<Option<String>, SifenError> {
    let doc = parse_document(xml)?;
    let ctx = xpath_context(&doc)?;
    let nodes = ctx
        .evaluate(&format!("//*[local-name()='{local_name}']"))
        .map_err(|e| SifenError::internal(format!("error de XPath: {e:?}")))?
        .get_nodes_as_vec();
    Ok(nodes.first().map(|node| node.get_content()))
}

/// Exclusive C14N + SHA-256 of the subtree serialization of the first
/// element with the given local name.
pub fn c14n_digest_of_element(xml: &str, local_name: &str) -> Result<[u8; 32], SifenError> {
    let doc = parse_document(xml)?;
    let ctx = xpath_context(&doc)?;
    let nodes = ctx
        .evaluate(&format!("//*[local-name()='{local_name}']"))
        .map_err(|e| SifenError::internal(format!("error de XPath: {e:?}")))?
        .get_nodes_as_vec();
    let node = nodes.first().ok_or_else(|| {
        SifenError::internal(format!("elemento {local_name} no encontrado"))
    })?;
    c14n_digest_str(&doc.node_to_string(node))
}

fn build_signed_info(element_id: &str, digest_b64: &str) -> String {
    format!(
        "<SignedInfo xmlns=\"{XMLDSIG_NS}\">\
         <CanonicalizationMethod Algorithm=\"{ALGO_EXC_C14N}\"></CanonicalizationMethod>\
         <SignatureMethod Algorithm=\"{ALGO_RSA_SHA256}\"></SignatureMethod>\
         <Reference URI=\"#{element_id}\">\
         <Transforms>\
         <Transform Algorithm=\"{ALGO_ENVELOPED}\"></Transform>\
         <Transform Algorithm=\"{ALGO_EXC_C14N}\"></Transform>\
         </Transforms>\
         <DigestMethod Algorithm=\"{ALGO_SHA256}\"></DigestMethod>\
         <DigestValue>{digest_b64}</DigestValue>\
         </Reference>\
         </SignedInfo>"
    )
}

fn parse_document(xml: &str) -> Result<Document, SifenError> {
    Parser::default()
        .parse_string(xml)
        .map_err(|e| SifenError::internal(format!("error al parsear XML: {e:?}")))
}

fn xpath_context(doc: &Document) -> Result<xpath::Context, SifenError> {
    xpath::Context::new(doc)
        .map_err(|e| SifenError::internal(format!("error de contexto XPath: {e:?}")))
}

/// Locate the element with the case-sensitive `Id` attribute. `id` and `ID`
/// do not match; this is the fiscal-authority convention.
fn locate_by_id(doc: &Document, element_id: &str) -> Result<libxml::tree::Node, SifenError> {
    let ctx = xpath_context(doc)?;
    let nodes = ctx
        .evaluate(&format!("//*[@Id='{element_id}']"))
        .map_err(|e| SifenError::internal(format!("error de XPath: {e:?}")))?
        .get_nodes_as_vec();
    nodes.into_iter().next().ok_or_else(|| {
        SifenError::crypto(
            "CRYPTO_004",
            format!("elemento con Id='{element_id}' no encontrado"),
        )
    })
}

fn c14n_digest_str(xml: &str) -> Result<[u8; 32], SifenError> {
    let doc = parse_document(xml)?;
    c14n_digest_doc(&doc)
}

fn c14n_digest_doc(doc: &Document) -> Result<[u8; 32], SifenError> {
    let options = c14n::CanonicalizationOptions {
        mode: c14n::CanonicalizationMode::ExclusiveCanonical1_0,
        inclusive_ns_prefixes: vec![],
        with_comments: false,
    };
    let canonical = doc
        .canonicalize(options, None)
        .map_err(|e| SifenError::internal(format!("error de canonicalización: {e:?}")))?;
    Ok(Sha256::digest(&canonical).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
        <rDE xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
        <dVerFor>150</dVerFor>\
        <DE Id=\"0180069563100100100000012120240115123456789\"><dDVId>9</dDVId></DE>\
        </rDE>";

    fn test_signer() -> XmlSigner {
        let mut rng = rand::thread_rng();
        let key = RsaPrivateKey::new(&mut rng, 2048).expect("rsa keygen");
        XmlSigner {
            key,
            cert_der: b"not-a-real-certificate".to_vec(),
        }
    }

    #[test]
    fn sign_splices_signature_inside_referenced_element() {
        let signer = test_signer();
        let id = "0180069563100100100000012120240115123456789";
        let signed = signer.sign(SAMPLE, id).unwrap();

        let sig_pos = signed.find("<Signature ").unwrap();
        let de_close = signed.find("</DE>").unwrap();
        assert!(sig_pos < de_close, "signature must be enveloped inside DE");
        assert!(signed.contains(&format!("<Reference URI=\"#{id}\">")));
        assert!(signed.contains("<X509Certificate>"));
    }

    #[test]
    fn digest_is_taken_before_signature_insertion() {
        let signer = test_signer();
        let id = "0180069563100100100000012120240115123456789";

        let before = reference_digest(SAMPLE, id).unwrap();
        let signed = signer.sign(SAMPLE, id).unwrap();
        // With the enveloped Signature stripped, the reference digest of the
        // signed document matches the pre-signing digest.
        let after = reference_digest(&signed, id).unwrap();
        assert_eq!(before, after);

        let embedded = extract_text(&signed, "DigestValue").unwrap().unwrap();
        assert_eq!(embedded, Base64::encode_string(&before));
    }

    #[test]
    fn unknown_id_is_an_error() {
        let signer = test_signer();
        let err = signer.sign(SAMPLE, "does-not-exist").unwrap_err();
        assert_eq!(err.code(), "CRYPTO_004");
    }

    #[test]
    fn id_lookup_is_case_sensitive() {
        let xml = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
            <root><child id=\"abc\">x</child></root>";
        let doc = parse_document(xml).unwrap();
        assert!(locate_by_id(&doc, "abc").is_err());
    }

    #[test]
    fn non_rsa_pkcs8_key_is_rejected() {
        let err = XmlSigner::from_der(b"cert", b"garbage").unwrap_err();
        assert_eq!(err.code(), "CRYPTO_005");
    }
}
