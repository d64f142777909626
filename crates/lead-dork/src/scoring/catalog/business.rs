use super::{AD_LIBRARY, LANDING, LANDING_SECONDS, PRESS, SEARCH, SITEMAP_LASTMOD};
use crate::scoring::{
    AggregationPolicy, Domain, DomainProfile, Field, Predicate, RecommendationPolicy,
    SignalKind, SignalRule, Weight,
};

pub const FUNDING: &str = "funding";
pub const PRODUCT_LAUNCHES: &str = "product_launches";
pub const AD_PRESENCE: &str = "ad_presence";

/// Press candidates; the first reachable one is evaluated.
pub const PRESS_PATHS: &[&str] = &["/press", "/news", "/newsroom", "/blog"];

const FUNDING_MENTIONS: Predicate = Predicate::ContainsAtLeast {
    page: SEARCH,
    field: Field::Text,
    needles: &[
        "raised",
        "funding",
        "investment",
        "series a",
        "series b",
        "seed round",
        "venture capital",
    ],
    min: 3,
};

const AD_HIT: Predicate = Predicate::AllOf(&[
    Predicate::ContainsAny {
        page: AD_LIBRARY,
        field: Field::Markup,
        needles: &["ad"],
    },
    Predicate::MentionsSubject {
        page: AD_LIBRARY,
        field: Field::Markup,
    },
]);

const TRACKING: Predicate = Predicate::ContainsAny {
    page: LANDING,
    field: Field::Markup,
    needles: &["google-analytics", "gtag", "facebook.com/tr"],
};

pub const RULES: &[SignalRule] = &[
    SignalRule {
        id: "funding",
        group: FUNDING,
        kind: SignalKind::Signal,
        predicate: FUNDING_MENTIONS,
        weight: Weight::Fixed(30),
        note: "Funding mentions detected ({count} keywords)",
    },
    SignalRule {
        id: "funding_amounts",
        group: FUNDING,
        kind: SignalKind::Signal,
        predicate: Predicate::AllOf(&[
            Predicate::PatternCount {
                page: SEARCH,
                field: Field::Text,
                pattern: r"\$[\d.]+[mbk]\b",
                min: 1,
            },
            FUNDING_MENTIONS,
        ]),
        weight: Weight::Fixed(0),
        note: "Amounts found: {detail}",
    },
    SignalRule {
        id: "launches",
        group: PRODUCT_LAUNCHES,
        kind: SignalKind::Signal,
        predicate: Predicate::ContainsAtLeast {
            page: PRESS,
            field: Field::Markup,
            needles: &[
                "launch",
                "announcement",
                "new product",
                "introducing",
                "released",
            ],
            min: 2,
        },
        weight: Weight::Fixed(20),
        note: "Press/news page with {count} launch mentions",
    },
    SignalRule {
        id: "recent_pages",
        group: PRODUCT_LAUNCHES,
        kind: SignalKind::Signal,
        predicate: Predicate::RecentItems {
            fact: SITEMAP_LASTMOD,
            min: 1,
        },
        weight: Weight::Fixed(10),
        note: "{count} pages updated recently",
    },
    SignalRule {
        id: "ads",
        group: AD_PRESENCE,
        kind: SignalKind::Signal,
        predicate: AD_HIT,
        weight: Weight::Fixed(15),
        note: "Facebook ads found",
    },
    SignalRule {
        id: "landing_slow",
        group: AD_PRESENCE,
        kind: SignalKind::Warning,
        predicate: Predicate::AllOf(&[
            Predicate::Measure {
                fact: LANDING_SECONDS,
                above: 4.0,
                up_to: None,
            },
            AD_HIT,
        ]),
        weight: Weight::Fixed(0),
        note: "Landing page slow ({value:1}s) - optimization needed",
    },
    SignalRule {
        id: "landing_untracked",
        group: AD_PRESENCE,
        kind: SignalKind::Warning,
        predicate: Predicate::AllOf(&[Predicate::Not(&TRACKING), AD_HIT]),
        weight: Weight::Fixed(0),
        note: "No tracking detected - analytics setup needed",
    },
];

pub static PROFILE: DomainProfile = DomainProfile {
    domain: Domain::Business,
    rules: RULES,
    policy: AggregationPolicy::Accretive,
    tiers: &[
        (50, "High Activity", "Strong growth signals"),
        (25, "Moderate Activity", "Some opportunities"),
        (0, "Low Activity", "Early stage or limited public presence"),
    ],
    recommendations: RecommendationPolicy::PerSignal(&[
        (
            "funding",
            "Pitch: Web/mobile app development, automation, cloud services",
        ),
        (
            "launches",
            "Pitch: App enhancements, maintenance, analytics dashboards",
        ),
        ("ads", "Pitch: Landing page optimization, CRO, tracking setup"),
    ]),
};
