use super::common::*;
use crate::evidence::{Evidence, Fact, FetchFailure, PRIMARY};
use crate::scoring::{
    evaluate, EvaluationContext, Field, Predicate, ReferenceYears, SignalKind, SignalRule,
    Weight,
};

fn rule(id: &'static str, predicate: Predicate, weight: Weight, note: &'static str) -> SignalRule {
    SignalRule {
        id,
        group: "test",
        kind: SignalKind::Signal,
        predicate,
        weight,
        note,
    }
}

fn context() -> EvaluationContext {
    EvaluationContext::new(ReferenceYears::new(YEAR))
}

#[test]
fn unmatched_rules_are_reported_with_zero_points() {
    let evidence = primary("https://acme.io", "<p>nothing here</p>");
    let rules = [rule(
        "hiring",
        Predicate::ContainsAny {
            page: PRIMARY,
            field: Field::Markup,
            needles: &["hiring"],
        },
        Weight::Fixed(20),
        "Active hiring detected",
    )];

    let matches = evaluate(&evidence, &rules, &context());

    assert_eq!(matches.len(), 1);
    assert!(!matches[0].matched);
    assert_eq!(matches[0].points, 0);
    assert!(matches[0].note.is_none());
}

#[test]
fn invalid_pattern_does_not_block_other_rules() {
    let evidence = primary("https://acme.io", "<p>careers at acme</p>");
    let rules = [
        rule(
            "broken",
            Predicate::PatternCount {
                page: PRIMARY,
                field: Field::Markup,
                pattern: r"(unclosed",
                min: 1,
            },
            Weight::Fixed(50),
            "never",
        ),
        rule(
            "broken_selector",
            Predicate::Element {
                page: PRIMARY,
                selectors: &["div[[["],
            },
            Weight::Fixed(50),
            "never",
        ),
        rule(
            "careers",
            Predicate::ContainsAny {
                page: PRIMARY,
                field: Field::Markup,
                needles: &["careers"],
            },
            Weight::Fixed(20),
            "Careers page linked",
        ),
    ];

    let matches = evaluate(&evidence, &rules, &context());

    assert!(!matches[0].matched);
    assert!(!matches[1].matched);
    assert!(matches[2].matched);
    assert_eq!(matches[2].points, 20);
}

#[test]
fn missing_page_is_unmatched_even_under_negation() {
    let evidence = primary("https://acme.io", "<p>hello</p>");
    let rules = [rule(
        "no_press",
        Predicate::Not(&Predicate::ContainsAny {
            page: "press",
            field: Field::Markup,
            needles: &["launch"],
        }),
        Weight::Fixed(5),
        "Press page silent",
    )];

    let matches = evaluate(&evidence, &rules, &context());

    assert!(!matches[0].matched);
}

#[test]
fn per_unit_weight_multiplies_the_observed_count() {
    let evidence = primary("https://acme.io", "").with_fact(
        "active_subdomains",
        Fact::Items(vec!["blog".into(), "app".into(), "docs".into()]),
    );
    let rules = [rule(
        "subdomains",
        Predicate::Measure {
            fact: "active_subdomains",
            above: 0.0,
            up_to: None,
        },
        Weight::PerUnit(5),
        "Found {count} active subdomains: {detail}",
    )];

    let matches = evaluate(&evidence, &rules, &context());

    assert_eq!(matches[0].points, 15);
    assert_eq!(
        matches[0].note.as_deref(),
        Some("Found 3 active subdomains: blog, app, docs")
    );
}

#[test]
fn measure_respects_half_open_ranges() {
    let evidence = primary("https://acme.io", "").with_fact("load_seconds", Fact::Number(5.0));
    let rules = [
        rule(
            "slow",
            Predicate::Measure {
                fact: "load_seconds",
                above: 5.0,
                up_to: None,
            },
            Weight::Fixed(15),
            "Slow load time ({value}s)",
        ),
        rule(
            "moderate",
            Predicate::Measure {
                fact: "load_seconds",
                above: 3.0,
                up_to: Some(5.0),
            },
            Weight::Fixed(5),
            "Moderate load time ({value}s)",
        ),
    ];

    let matches = evaluate(&evidence, &rules, &context());

    assert!(!matches[0].matched);
    assert!(matches[1].matched);
    assert_eq!(
        matches[1].note.as_deref(),
        Some("Moderate load time (5.0s)")
    );
}

#[test]
fn reference_years_come_from_configuration() {
    let evidence = primary("https://acme.io", "<footer>&copy; 2031 Acme</footer>");
    let rules = [rule(
        "recent",
        Predicate::MentionsReferenceYear {
            page: PRIMARY,
            field: Field::Markup,
        },
        Weight::Fixed(10),
        "Recent content detected ({years})",
    )];

    let stale = evaluate(&evidence, &rules, &context());
    assert!(!stale[0].matched);

    let current = evaluate(
        &evidence,
        &rules,
        &EvaluationContext::new(ReferenceYears::new(2032)),
    );
    assert!(current[0].matched);
    assert_eq!(
        current[0].note.as_deref(),
        Some("Recent content detected (2031-2032)")
    );
}

#[test]
fn visible_text_ignores_script_bodies() {
    let evidence = primary(
        "https://acme.io",
        "<script>var funding = 'series a';</script><p>Plain page</p>",
    );
    let markup = rule(
        "markup",
        Predicate::ContainsAny {
            page: PRIMARY,
            field: Field::Markup,
            needles: &["series a"],
        },
        Weight::Fixed(1),
        "seen in markup",
    );
    let text = rule(
        "text",
        Predicate::ContainsAny {
            page: PRIMARY,
            field: Field::Text,
            needles: &["series a"],
        },
        Weight::Fixed(1),
        "seen in text",
    );

    let matches = evaluate(&evidence, &[markup, text], &context());

    assert!(matches[0].matched);
    assert!(!matches[1].matched);
}

#[test]
fn subject_predicates_need_a_subject() {
    let evidence = primary("https://acme.io", "<p>Acme ads running</p>");
    let rules = [rule(
        "subject",
        Predicate::MentionsSubject {
            page: PRIMARY,
            field: Field::Markup,
        },
        Weight::Fixed(15),
        "mentions {detail}",
    )];

    assert!(!evaluate(&evidence, &rules, &context())[0].matched);

    let with_subject = context().with_subject("ACME");
    let matches = evaluate(&evidence, &rules, &with_subject);
    assert!(matches[0].matched);
    assert_eq!(matches[0].note.as_deref(), Some("mentions acme"));
}

#[test]
fn fetch_failures_are_matchable() {
    let evidence =
        Evidence::new(url("https://down.example")).with_failure(FetchFailure::Failed("boom".into()));
    let rules = [
        rule(
            "timeout",
            Predicate::FetchTimedOut,
            Weight::Fixed(30),
            "timed out",
        ),
        rule(
            "failed",
            Predicate::FetchFailed,
            Weight::Fixed(20),
            "Error loading site: {detail}",
        ),
    ];

    let matches = evaluate(&evidence, &rules, &context());

    assert!(!matches[0].matched);
    assert_eq!(matches[1].note.as_deref(), Some("Error loading site: boom"));
}
