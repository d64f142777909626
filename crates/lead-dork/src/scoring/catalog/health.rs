use super::LOAD_SECONDS;
use crate::evidence::PRIMARY;
use crate::scoring::{
    AggregationPolicy, Domain, DomainProfile, Field, Predicate, RecommendationPolicy,
    SignalKind, SignalRule, Weight,
};

const fn check(
    id: &'static str,
    kind: SignalKind,
    predicate: Predicate,
    penalty: u32,
    note: &'static str,
) -> SignalRule {
    SignalRule {
        id,
        group: match kind {
            SignalKind::Warning => "warnings",
            _ => "critical_issues",
        },
        kind,
        predicate,
        weight: Weight::Fixed(penalty),
        note,
    }
}

const OUTDATED: &[(&str, &str)] = &[
    ("jQuery 1.x (outdated)", r"jquery/1\.|jquery-1\."),
    ("Bootstrap 3 (outdated)", r"bootstrap/3\.|bootstrap-3\."),
    ("AngularJS (legacy)", r"angularjs|angular\.js"),
    (
        "Old WordPress version",
        r"(?s)/wp-content/.*wordpress [1-4]\.|wordpress [1-4]\..*/wp-content/",
    ),
];

pub const RULES: &[SignalRule] = &[
    check(
        "no_ssl",
        SignalKind::Issue,
        Predicate::InsecureScheme,
        25,
        "No SSL certificate - Security risk",
    ),
    check(
        "slow_load",
        SignalKind::Issue,
        Predicate::Measure {
            fact: LOAD_SECONDS,
            above: 5.0,
            up_to: None,
        },
        15,
        "Slow load time ({value}s) - Performance issue",
    ),
    check(
        "moderate_load",
        SignalKind::Warning,
        Predicate::Measure {
            fact: LOAD_SECONDS,
            above: 3.0,
            up_to: Some(5.0),
        },
        5,
        "Moderate load time ({value}s)",
    ),
    check(
        "no_viewport",
        SignalKind::Issue,
        Predicate::MissingElement {
            page: PRIMARY,
            selector: "meta[name=\"viewport\"]",
        },
        10,
        "No mobile viewport meta tag - Not mobile optimized",
    ),
    check(
        "empty_scripts",
        SignalKind::Warning,
        Predicate::PatternCount {
            page: PRIMARY,
            field: Field::Markup,
            pattern: r"<script[^>]*></script>",
            min: 6,
        },
        10,
        "{count} empty script tags detected",
    ),
    check(
        "outdated_frameworks",
        SignalKind::Issue,
        Predicate::Catalog {
            page: PRIMARY,
            field: Field::Markup,
            entries: OUTDATED,
        },
        20,
        "Outdated frameworks detected: {detail}",
    ),
    check(
        "missing_title",
        SignalKind::Warning,
        Predicate::MissingElement {
            page: PRIMARY,
            selector: "title",
        },
        5,
        "Missing page title",
    ),
    check(
        "missing_description",
        SignalKind::Warning,
        Predicate::MissingElement {
            page: PRIMARY,
            selector: "meta[name=\"description\"]",
        },
        5,
        "Missing meta description",
    ),
    check(
        "https_downgrade",
        SignalKind::Issue,
        Predicate::Downgraded { page: PRIMARY },
        15,
        "Redirected to HTTP - SSL not enforced",
    ),
    check(
        "timeout",
        SignalKind::Issue,
        Predicate::FetchTimedOut,
        30,
        "Extreme timeout - Site unreachable or very slow",
    ),
    check(
        "unreachable",
        SignalKind::Issue,
        Predicate::FetchFailed,
        20,
        "Error loading site: {detail}",
    ),
];

pub static PROFILE: DomainProfile = DomainProfile {
    domain: Domain::TechnicalHealth,
    rules: RULES,
    policy: AggregationPolicy::Decretive,
    tiers: &[
        (80, "Excellent", "Well maintained"),
        (60, "Good", "Minor improvements needed"),
        (40, "Fair", "Several issues detected"),
        (0, "Poor", "Major technical problems"),
    ],
    recommendations: RecommendationPolicy::ByScore(&[
        (80, "Well maintained"),
        (60, "Potential optimization services"),
        (0, "High priority for IT services"),
    ]),
};
