use super::{ACTIVE_SUBDOMAINS, CAREERS_PAGE, SITEMAP_URLS};
use crate::evidence::PRIMARY;
use crate::scoring::{
    AggregationPolicy, Domain, DomainProfile, Field, Predicate, RecommendationPolicy,
    SignalKind, SignalRule, Weight,
};

/// Subdomains probed with HEAD when looking for expansion.
pub const SUBDOMAINS: &[&str] = &[
    "blog", "app", "api", "dev", "staging", "docs", "support", "shop", "portal",
];

/// Careers paths probed with HEAD; the first 200 sets the careers flag.
pub const CAREERS_PATHS: &[&str] = &["/careers", "/jobs", "/join-us", "/about/careers"];

const HIRING: &[Predicate] = &[
    Predicate::Flag { fact: CAREERS_PAGE },
    Predicate::ContainsAny {
        page: PRIMARY,
        field: Field::Markup,
        needles: &["careers", "we're hiring"],
    },
];

pub const RULES: &[SignalRule] = &[
    SignalRule {
        id: "subdomains",
        group: "signals",
        kind: SignalKind::Signal,
        predicate: Predicate::Measure {
            fact: ACTIVE_SUBDOMAINS,
            above: 0.0,
            up_to: None,
        },
        weight: Weight::PerUnit(5),
        note: "Found {count} active subdomains: {detail}",
    },
    SignalRule {
        id: "https",
        group: "signals",
        kind: SignalKind::Signal,
        predicate: Predicate::SecureScheme,
        weight: Weight::Fixed(10),
        note: "SSL Certificate active (security priority)",
    },
    SignalRule {
        id: "content",
        group: "signals",
        kind: SignalKind::Signal,
        predicate: Predicate::ContainsAny {
            page: PRIMARY,
            field: Field::Markup,
            needles: &["blog", "news", "press", "updates", "announcements"],
        },
        weight: Weight::Fixed(15),
        note: "Active content publication (blog/news/press)",
    },
    SignalRule {
        id: "hiring",
        group: "signals",
        kind: SignalKind::Signal,
        predicate: Predicate::AnyOf(HIRING),
        weight: Weight::Fixed(20),
        note: "Active hiring detected (company expansion)",
    },
    SignalRule {
        id: "sitemap",
        group: "signals",
        kind: SignalKind::Signal,
        predicate: Predicate::Measure {
            fact: SITEMAP_URLS,
            above: 50.0,
            up_to: None,
        },
        weight: Weight::Fixed(10),
        note: "Large sitemap ({count} pages) - content-rich site",
    },
    SignalRule {
        id: "social",
        group: "signals",
        kind: SignalKind::Signal,
        predicate: Predicate::PatternCount {
            page: PRIMARY,
            field: Field::Markup,
            pattern: r"(linkedin|twitter|facebook|instagram|youtube)\.com",
            min: 3,
        },
        weight: Weight::Fixed(10),
        note: "Strong social media presence ({count} platforms)",
    },
    SignalRule {
        id: "recent_content",
        group: "signals",
        kind: SignalKind::Signal,
        predicate: Predicate::MentionsReferenceYear {
            page: PRIMARY,
            field: Field::Markup,
        },
        weight: Weight::Fixed(10),
        note: "Recent content detected ({years})",
    },
];

pub static PROFILE: DomainProfile = DomainProfile {
    domain: Domain::Growth,
    rules: RULES,
    policy: AggregationPolicy::Accretive,
    tiers: &[
        (60, "High Growth", "Scaling rapidly"),
        (30, "Moderate Growth", "Steady expansion"),
        (0, "Early Stage", "Building foundation"),
    ],
    recommendations: RecommendationPolicy::ByTier(&[
        ("High Growth", "Priority outreach"),
        ("Moderate Growth", "Monitor for changes"),
        ("Early Stage", "Early stage nurture"),
    ]),
};
