mod common;

use std::str::FromStr;
use std::time::Duration;

use base64ct::{Base64, Encoding};
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::{DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use sifen::sign::{c14n_digest_of_element, extract_text, reference_digest, XmlSigner};
use x509_cert::builder::{Builder, CertificateBuilder, Profile};
use x509_cert::der::{Decode, Encode};
use x509_cert::name::Name;
use x509_cert::serial_number::SerialNumber;
use x509_cert::spki::SubjectPublicKeyInfoOwned;
use x509_cert::time::Validity;
use x509_cert::Certificate;

fn build_signing_material() -> (RsaPrivateKey, Vec<u8>, Vec<u8>) {
    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("rsa keygen");
    let key_der = private_key
        .to_pkcs8_der()
        .expect("key der")
        .as_bytes()
        .to_vec();
    let cert_der = build_test_cert(&private_key);
    (private_key, key_der, cert_der)
}

fn build_test_cert(private_key: &RsaPrivateKey) -> Vec<u8> {
    let signing_key = SigningKey::<Sha256>::new(private_key.clone());
    let serial_number = SerialNumber::from(1u32);
    let validity = Validity::from_now(Duration::new(3600, 0)).expect("validity");
    let subject = Name::from_str("CN=Test,O=Sifen,C=PY").expect("subject");
    let spki_der = private_key
        .to_public_key()
        .to_public_key_der()
        .expect("public key der");
    let pub_key = SubjectPublicKeyInfoOwned::try_from(spki_der.as_bytes()).expect("spki");
    let builder = CertificateBuilder::new(
        Profile::Root,
        serial_number,
        validity,
        subject,
        pub_key,
        &signing_key,
    )
    .expect("builder");
    let cert = builder
        .build::<rsa::pkcs1v15::Signature>()
        .expect("certificate");
    cert.to_der().expect("cert der")
}

#[test]
fn sign_then_verify_against_leaf_certificate() {
    let (_private_key, key_der, cert_der) = build_signing_material();
    let signer = XmlSigner::from_der(&cert_der, &key_der).expect("signer");

    let documento = common::sample_factura("0000001");
    let cdc = documento.de.id.clone();
    let xml = documento.to_xml().expect("serialize");
    let signed = signer.sign(&xml, &cdc).expect("sign");

    assert!(signed.contains("<SignatureValue>"));
    assert!(signed.contains(&format!("<Reference URI=\"#{cdc}\">")));

    // Recover the public key from the embedded leaf certificate.
    let cert_b64 = extract_text(&signed, "X509Certificate")
        .expect("xpath")
        .expect("certificate present");
    let embedded_der = Base64::decode_vec(cert_b64.trim()).expect("cert base64");
    assert_eq!(embedded_der, cert_der);

    let certificate = Certificate::from_der(&embedded_der).expect("cert parse");
    let spki_der = certificate
        .tbs_certificate
        .subject_public_key_info
        .to_der()
        .expect("spki der");
    let public_key = RsaPublicKey::from_public_key_der(&spki_der).expect("public key");

    // The SignatureValue must verify against C14N(SignedInfo).
    let si_digest = c14n_digest_of_element(&signed, "SignedInfo").expect("signed info digest");
    let signature_b64 = extract_text(&signed, "SignatureValue")
        .expect("xpath")
        .expect("signature present");
    let signature = Base64::decode_vec(signature_b64.trim()).expect("signature base64");
    public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), &si_digest, &signature)
        .expect("signature verifies");
}

#[test]
fn digest_value_matches_c14n_of_de_without_signature() {
    let (_private_key, key_der, cert_der) = build_signing_material();
    let signer = XmlSigner::from_der(&cert_der, &key_der).expect("signer");

    let documento = common::sample_factura("0000002");
    let cdc = documento.de.id.clone();
    let xml = documento.to_xml().expect("serialize");

    let digest_before = reference_digest(&xml, &cdc).expect("digest before signing");
    let signed = signer.sign(&xml, &cdc).expect("sign");
    let digest_after = reference_digest(&signed, &cdc).expect("digest after signing");

    // Stripping the enveloped signature yields the same canonical bytes.
    assert_eq!(digest_before, digest_after);

    let embedded = extract_text(&signed, "DigestValue")
        .expect("xpath")
        .expect("digest present");
    assert_eq!(embedded.trim(), Base64::encode_string(&digest_before));
}

#[test]
fn signed_document_still_parses_as_xml() {
    let (_private_key, key_der, cert_der) = build_signing_material();
    let signer = XmlSigner::from_der(&cert_der, &key_der).expect("signer");

    let documento = common::sample_factura("0000003");
    let xml = documento.to_xml().expect("serialize");
    let signed = signer.sign(&xml, &documento.de.id).expect("sign");

    let parsed = libxml::parser::Parser::default()
        .parse_string(&signed)
        .expect("signed document parses");
    let root = parsed.get_root_element().expect("root");
    assert_eq!(root.get_name(), "rDE");
}

#[test]
fn signing_a_missing_id_fails() {
    let (_private_key, key_der, cert_der) = build_signing_material();
    let signer = XmlSigner::from_der(&cert_der, &key_der).expect("signer");

    let documento = common::sample_factura("0000004");
    let xml = documento.to_xml().expect("serialize");
    let err = signer.sign(&xml, "0".repeat(44).as_str()).unwrap_err();
    assert_eq!(err.code(), "CRYPTO_004");
}
