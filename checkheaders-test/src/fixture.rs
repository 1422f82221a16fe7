//! Reference configuration shared by the integration scenarios.

use checkheaders_configuration::Config;
use checkheaders_tower::HeaderMatch;
use http::Request;

/// Percent-encoded client certificate summary, as a TLS-terminating proxy
/// forwards it.
pub const TEST_CERT: &str = "Subject%3D%22C%3DNL%2CST%3DST-TEST%2CL%3DCity%2CO%3DOrganization%2CCN%3Dcommon-name%22%3BIssuer%3D%22DC%3Dnl%2CDC%3Ddomainpart1%2CDC%3Ddomainpart2%2CCN%3DSomeKindOfCa%22%3BNB%3D%221589744159%22%3BNA%3D%221765837153%22%3BSAN%3D%22somkindofdomain.domain.thing.test%22";

/// Nine rules covering every mode: exact, contains, regex, optional headers
/// and URL-decoded all-of matching.
pub const REFERENCE_YAML: &str = r#"
headers:
  - name: test1
    matchtype: one
    values: ["testvalue1"]
  - name: test2
    matchtype: one
    values: ["testvalue2"]
    required: true
  - name: test3
    matchtype: one
    values: ["testvalue3"]
    required: false
  - name: test4
    matchtype: one
    values: ["ue4"]
    required: true
    contains: true
  - name: X-Forwarded-Tls-Client-Cert-Info
    matchtype: all
    values:
      - "CN=common-name"
      - 'SAN="somkindofdomain.domain.thing.test"'
    required: true
    contains: true
    urldecode: true
  - name: testMultipleContainsValues
    matchtype: one
    values: ["value1", "or_value2"]
    required: true
    contains: true
    urldecode: true
  - name: testContainsNotRequired
    matchtype: one
    values: ["value_not_important", "value_not_important_2"]
    required: false
    contains: true
    urldecode: true
  - name: testNumberRegex
    matchtype: one
    values: ['\d{5}']
    regex: true
    required: true
  - name: testCountryCodeRegex
    matchtype: one
    values: ["^NL|GB|FR$"]
    regex: true
    required: true
"#;

/// Parsed reference configuration.
pub fn reference_config() -> Config {
    Config::from_yaml(REFERENCE_YAML).expect("reference configuration must parse")
}

/// Reference configuration with diagnostics enabled on every rule.
pub fn verbose_reference_config() -> Config {
    let mut config = reference_config();
    for header in &mut config.headers {
        header.debug = Some(true);
    }
    config
}

pub fn reference_layer() -> HeaderMatch {
    HeaderMatch::from_config(reference_config())
        .expect("reference configuration must be valid")
        .with_name("check-headers-test")
}

/// Builds a `GET /` request carrying `headers`.
pub fn request_with<B: Default>(headers: &[(&str, &str)]) -> Request<B> {
    let mut builder = Request::get("http://localhost/");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(B::default()).expect("valid test request")
}
