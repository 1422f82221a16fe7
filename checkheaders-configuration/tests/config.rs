use checkheaders_configuration::{Config, ConfigError, HeaderRule};
use checkheaders_core::{MatchMode, Quorum, RuleError, Verdict};
use pretty_assertions::assert_eq;

#[test]
fn test_yaml_deserialize() {
    let yaml = r#"
headers:
  - name: test1
    values: ["testvalue1"]
    matchtype: one
  - name: test3
    values: ["testvalue3"]
    matchtype: one
    required: false
  - name: X-Forwarded-Tls-Client-Cert-Info
    values:
      - "CN=common-name"
      - "SAN=\"somkindofdomain.domain.thing.test\""
    matchtype: all
    contains: true
    urldecode: true
  - name: testCountryCodeRegex
    values: ["^NL|GB|FR$"]
    matchtype: one
    regex: true
    debug: true
"#;

    let config = Config::from_yaml(yaml).expect("failed to deserialize");

    assert_eq!(config.headers.len(), 4);
    assert_eq!(
        config.headers[0],
        HeaderRule {
            name: "test1".to_string(),
            values: Some(vec!["testvalue1".to_string()]),
            match_type: Some("one".to_string()),
            ..Default::default()
        }
    );
    assert_eq!(config.headers[1].required, Some(false));
    assert_eq!(config.headers[2].contains, Some(true));
    assert_eq!(config.headers[2].url_decode, Some(true));
    assert_eq!(config.headers[3].regex, Some(true));
    assert_eq!(config.headers[3].debug, Some(true));

    let rules = config.into_rule_set().expect("valid configuration");
    let modes: Vec<_> = rules.rules().iter().map(|r| r.rule().mode()).collect();
    assert_eq!(
        modes,
        vec![
            MatchMode::Exact,
            MatchMode::Exact,
            MatchMode::Contains,
            MatchMode::Regex
        ]
    );
    assert_eq!(rules.rules()[2].rule().quorum_policy(), Quorum::All);
    assert_eq!(
        rules.rules()[2].header().as_str(),
        "x-forwarded-tls-client-cert-info"
    );
}

#[test]
fn test_json_deserialize() {
    let json = r#"{
        "Headers": [
            {"name": "test4", "values": ["ue4"], "matchtype": "one", "required": true, "contains": true},
            {"name": "testNumberRegex", "values": ["\\d{5}"], "matchtype": "one", "regex": true}
        ]
    }"#;

    let config = Config::from_json(json).expect("failed to deserialize");
    let rules = config.into_rule_set().expect("valid configuration");

    let request = http::Request::builder()
        .header("test4", "value4")
        .header("testNumberRegex", "12345")
        .body(())
        .unwrap();
    assert_eq!(rules.evaluate(&request), Verdict::Allow);
}

#[test]
fn test_serialize_roundtrip() {
    let config = Config {
        headers: vec![HeaderRule {
            name: "x-cert".to_string(),
            values: Some(vec!["CN=a".to_string(), "O=b".to_string()]),
            match_type: Some("all".to_string()),
            contains: Some(true),
            url_decode: Some(true),
            ..Default::default()
        }],
    };

    let yaml = serde_saphyr::to_string(&config).expect("failed to serialize");
    let deserialized = Config::from_yaml(&yaml).expect("failed to deserialize");
    assert_eq!(config, deserialized);
}

#[test]
fn test_missing_headers() {
    let error = Config::from_yaml("headers: []").unwrap().into_rule_set().unwrap_err();
    assert!(matches!(error, ConfigError::Rule(RuleError::MissingHeaders)));

    let error = Config::default().into_rule_set().unwrap_err();
    assert!(matches!(error, ConfigError::Rule(RuleError::MissingHeaders)));
}

#[test]
fn test_missing_header_name() {
    let yaml = r#"
headers:
  - values: ["testvalue1"]
    matchtype: one
"#;
    let error = Config::from_yaml(yaml).unwrap().into_rule_set().unwrap_err();
    assert!(matches!(error, ConfigError::Rule(RuleError::MissingName)));
}

#[test]
fn test_missing_values() {
    let yaml = r#"
headers:
  - name: test1
    values: []
    matchtype: one
"#;
    let error = Config::from_yaml(yaml).unwrap().into_rule_set().unwrap_err();
    assert!(matches!(error, ConfigError::Rule(RuleError::MissingValues(_))));

    let yaml = r#"
headers:
  - name: test1
    matchtype: one
"#;
    let error = Config::from_yaml(yaml).unwrap().into_rule_set().unwrap_err();
    assert!(matches!(error, ConfigError::Rule(RuleError::MissingValues(_))));
}

#[test]
fn test_empty_value() {
    let yaml = r#"
headers:
  - name: test1
    values: ["testvalue1", ""]
    matchtype: one
"#;
    let error = Config::from_yaml(yaml).unwrap().into_rule_set().unwrap_err();
    assert!(matches!(error, ConfigError::Rule(RuleError::EmptyValue(_))));
}

#[test]
fn test_match_all_requires_contains_or_regex() {
    let yaml = r#"
headers:
  - name: test1
    values: ["testvalue1"]
    matchtype: all
"#;
    let error = Config::from_yaml(yaml).unwrap().into_rule_set().unwrap_err();
    assert!(matches!(
        error,
        ConfigError::Rule(RuleError::QuorumAllWithExact(ref name)) if name == "test1"
    ));
}

#[test]
fn test_missing_match_type() {
    let yaml = r#"
headers:
  - name: test1
    values: ["testvalue1"]
"#;
    let error = Config::from_yaml(yaml).unwrap().into_rule_set().unwrap_err();
    assert!(matches!(error, ConfigError::MissingMatchType(ref name) if name == "test1"));
}

#[test]
fn test_first_invalid_rule_rejects_configuration() {
    let yaml = r#"
headers:
  - name: test1
    values: ["testvalue1"]
    matchtype: one
  - name: test2
    values: ["testvalue2"]
    matchtype: one
    contains: true
    regex: true
"#;
    let error = Config::from_yaml(yaml).unwrap().into_rule_set().unwrap_err();
    assert!(matches!(error, ConfigError::ConflictingMatchModes(ref name) if name == "test2"));
}

#[test]
fn test_error_messages() {
    let error = Config::from_yaml("headers: []").unwrap().into_rule_set().unwrap_err();
    assert_eq!(error.to_string(), "configuration incorrect, missing headers");
}

#[test]
fn test_invalid_yaml() {
    let error = Config::from_yaml("headers: [name: {").unwrap_err();
    assert!(matches!(error, ConfigError::Yaml(_)));
}

#[test]
fn test_unsupported_extension() {
    let error = Config::from_path("checkheaders.toml").unwrap_err();
    assert!(matches!(error, ConfigError::UnsupportedFormat(_)));
}

#[test]
fn test_missing_file() {
    let error = Config::from_path("does-not-exist.yaml").unwrap_err();
    assert!(matches!(error, ConfigError::Io { .. }));
}

#[test]
fn test_try_from_config() {
    let config = Config::from_yaml(
        r#"
headers:
  - name: test1
    value: testvalue1
"#,
    )
    .unwrap();
    let rules = checkheaders_core::RuleSet::try_from(config).expect("valid configuration");
    assert_eq!(rules.len(), 1);

    let error = checkheaders_core::RuleSet::try_from(Config::default()).unwrap_err();
    assert!(matches!(error, ConfigError::Rule(RuleError::MissingHeaders)));
}
