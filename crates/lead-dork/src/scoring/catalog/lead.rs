use crate::scoring::{
    AggregationPolicy, Domain, DomainProfile, Field, Predicate, RecommendationPolicy,
    SignalKind, SignalRule, Weight,
};
use crate::evidence::PRIMARY;

const fn signal(
    id: &'static str,
    predicate: Predicate,
    points: u32,
    note: &'static str,
) -> SignalRule {
    SignalRule {
        id,
        group: "signals",
        kind: SignalKind::Signal,
        predicate,
        weight: Weight::Fixed(points),
        note,
    }
}

const CONTACT: &[Predicate] = &[
    Predicate::Element {
        page: PRIMARY,
        selectors: &["form"],
    },
    Predicate::ContainsAny {
        page: PRIMARY,
        field: Field::Markup,
        needles: &["contact"],
    },
];

pub const RULES: &[SignalRule] = &[
    signal(
        "hiring",
        Predicate::ContainsAny {
            page: PRIMARY,
            field: Field::Markup,
            needles: &["careers", "jobs", "hiring", "join our team", "open positions"],
        },
        20,
        "Active hiring detected",
    ),
    signal(
        "content",
        Predicate::Element {
            page: PRIMARY,
            selectors: &["time", "span[class*=\"date\"]", "span[class*=\"time\"]"],
        },
        15,
        "Active blog/content",
    ),
    signal(
        "social",
        Predicate::PatternCount {
            page: PRIMARY,
            field: Field::Markup,
            pattern: r"(linkedin|twitter|facebook|instagram)\.com",
            min: 3,
        },
        10,
        "{count} social profiles found",
    ),
    signal(
        "contact",
        Predicate::AnyOf(CONTACT),
        10,
        "Contact form available",
    ),
    signal(
        "emails",
        Predicate::PatternCount {
            page: PRIMARY,
            field: Field::Markup,
            pattern: r"\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z|]{2,}\b",
            min: 3,
        },
        10,
        "{count} email addresses found",
    ),
    signal(
        "tech",
        Predicate::ContainsAtLeast {
            page: PRIMARY,
            field: Field::Markup,
            needles: &["react", "angular", "vue", "api", "integration", "platform"],
            min: 3,
        },
        15,
        "Advanced tech stack ({count} indicators)",
    ),
    signal(
        "premium",
        Predicate::ContainsAtLeast {
            page: PRIMARY,
            field: Field::Markup,
            needles: &["enterprise", "professional", "premium", "custom", "dedicated"],
            min: 2,
        },
        20,
        "Premium/enterprise positioning",
    ),
];

pub static PROFILE: DomainProfile = DomainProfile {
    domain: Domain::Lead,
    rules: RULES,
    policy: AggregationPolicy::Accretive,
    tiers: &[
        (70, "High", "Strong buying signals"),
        (40, "Medium", "Some engagement potential"),
        (0, "Low", "Early stage"),
    ],
    recommendations: RecommendationPolicy::ByTier(&[
        ("High", "Priority lead"),
        ("Medium", "Monitor"),
        ("Low", "Nurture"),
    ]),
};
