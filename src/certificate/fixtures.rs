// Self-signed certificates for unit tests, generated with rcgen.

use rcgen::{
    CertificateParams, CustomExtension, DistinguishedName, DnType, KeyPair, SanType, SerialNumber,
};

use super::Certificate;

fn params(common_name: Option<&str>, dns_names: &[&str]) -> CertificateParams {
    let names: Vec<String> = dns_names.iter().map(|name| name.to_string()).collect();
    let mut params = CertificateParams::new(names).expect("SAN list should be valid");
    let mut distinguished_name = DistinguishedName::new();
    if let Some(cn) = common_name {
        distinguished_name.push(DnType::CommonName, cn);
    }
    distinguished_name.push(DnType::OrganizationName, "Inspector Test");
    params.distinguished_name = distinguished_name;
    params
}

fn sign_der(params: CertificateParams) -> Vec<u8> {
    let key_pair = KeyPair::generate().expect("Failed to generate key pair");
    let cert = params
        .self_signed(&key_pair)
        .expect("Failed to create self-signed certificate");
    cert.der().to_vec()
}

fn sign(params: CertificateParams) -> Certificate {
    Certificate::from_der(sign_der(params)).expect("rcgen output should parse")
}

/// Certificate with an optional CN and the given SAN DNS names.
pub(crate) fn self_signed(common_name: Option<&str>, dns_names: &[&str]) -> Certificate {
    sign(params(common_name, dns_names))
}

/// Certificate with fixed serial and validity window, plus an IP SAN.
pub(crate) fn detailed(common_name: &str, dns_name: &str) -> Certificate {
    let mut params = params(Some(common_name), &[dns_name]);
    params
        .subject_alt_names
        .push(SanType::IpAddress("192.0.2.10".parse().expect("valid IP")));
    params.serial_number = Some(SerialNumber::from(vec![0x10, 0x92]));
    params.not_before = rcgen::date_time_ymd(2024, 1, 15);
    params.not_after = rcgen::date_time_ymd(2025, 1, 15);
    sign(params)
}

/// DER of a certificate whose SAN extension does not decode.
pub(crate) fn malformed_san_der(common_name: &str) -> Vec<u8> {
    let mut params = params(Some(common_name), &[]);
    params.custom_extensions.push(CustomExtension::from_oid_content(
        &[2, 5, 29, 17],
        vec![0x04, 0x02, 0xde, 0xad],
    ));
    sign_der(params)
}
