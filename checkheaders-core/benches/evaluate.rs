//! Benchmarks for rule set evaluation across match modes.

use std::hint::black_box;

use checkheaders_core::{Quorum, Rule, RuleSet};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use http::{HeaderMap, HeaderValue};

const CERT_INFO: &str = "Subject%3D%22C%3DNL%2CST%3DST-TEST%2CL%3DCity%2CO%3DOrganization%2CCN%3Dcommon-name%22%3BSAN%3D%22somkindofdomain.domain.thing.test%22";

fn rule_set() -> RuleSet {
    RuleSet::new(vec![
        Rule::exact("test1", ["testvalue1"]),
        Rule::exact("test3", ["testvalue3"]).optional(),
        Rule::contains("test4", ["ue4"]),
        Rule::contains(
            "x-forwarded-tls-client-cert-info",
            ["CN=common-name", "SAN=\"somkindofdomain.domain.thing.test\""],
        )
        .quorum(Quorum::All)
        .url_decode(),
        Rule::regex("testnumberregex", [r"\d{5}"]),
        Rule::regex("testcountrycoderegex", ["^NL|GB|FR$"]),
    ])
    .expect("benchmark rule set is valid")
}

fn headers(country: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("test1", HeaderValue::from_static("testvalue1"));
    headers.insert("test4", HeaderValue::from_static("value4"));
    headers.insert(
        "x-forwarded-tls-client-cert-info",
        HeaderValue::from_static(CERT_INFO),
    );
    headers.insert("testnumberregex", HeaderValue::from_static("12345"));
    headers.insert("testcountrycoderegex", HeaderValue::from_static(country));
    headers
}

fn evaluate_benchmark(c: &mut Criterion) {
    let rules = rule_set();
    let mut group = c.benchmark_group("evaluate");

    for (label, country) in [("allow", "NL"), ("deny_last_rule", "DE")] {
        let subject = headers(country);
        group.bench_with_input(BenchmarkId::from_parameter(label), &subject, |b, subject| {
            b.iter(|| rules.evaluate(black_box(subject)))
        });
    }

    let mut denied_early = headers("NL");
    denied_early.insert("test1", HeaderValue::from_static("wrongvalue1"));
    group.bench_function("deny_first_rule", |b| {
        b.iter(|| rules.evaluate(black_box(&denied_early)))
    });

    group.finish();
}

criterion_group!(benches, evaluate_benchmark);
criterion_main!(benches);
