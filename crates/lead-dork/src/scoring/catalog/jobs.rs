use super::CAREERS;
use crate::scoring::{
    AggregationPolicy, Domain, DomainProfile, Field, Predicate, RecommendationPolicy,
    SignalKind, SignalRule, Weight,
};

/// Careers paths tried in order before falling back to the home page.
pub const CAREERS_PATHS: &[&str] = &[
    "/careers",
    "/jobs",
    "/join-us",
    "/about/careers",
    "/company/careers",
];

/// Words counted to estimate the number of open positions.
pub const POSITION_WORDS: &[&str] = &["position", "opening", "opportunity", "role", "job"];

pub const ROLE_GROUP: &str = "tech_roles";
pub const SIGNAL_GROUP: &str = "hiring_signals";

const fn role(id: &'static str, label: &'static str, pattern: &'static str) -> SignalRule {
    SignalRule {
        id,
        group: ROLE_GROUP,
        kind: SignalKind::Signal,
        predicate: Predicate::PatternCount {
            page: CAREERS,
            field: Field::Markup,
            pattern,
            min: 1,
        },
        weight: Weight::Fixed(10),
        note: label,
    }
}

const fn hiring_signal(
    id: &'static str,
    needles: &'static [&'static str],
    points: u32,
    note: &'static str,
) -> SignalRule {
    SignalRule {
        id,
        group: SIGNAL_GROUP,
        kind: SignalKind::Signal,
        predicate: Predicate::ContainsAny {
            page: CAREERS,
            field: Field::Markup,
            needles,
        },
        weight: Weight::Fixed(points),
        note,
    }
}

pub const RULES: &[SignalRule] = &[
    role("full_stack", "Full Stack Developer", r"full[- ]?stack|fullstack"),
    role(
        "frontend",
        "Frontend Developer",
        r"front[- ]?end|react|vue|angular developer",
    ),
    role(
        "backend",
        "Backend Developer",
        r"back[- ]?end|node\.?js|python|java developer",
    ),
    role(
        "mobile",
        "Mobile Developer",
        r"mobile|ios|android|react native|flutter developer",
    ),
    role("devops", "DevOps Engineer", r"devops|site reliability|sre"),
    role(
        "design",
        "UI/UX Designer",
        r"ui/ux|user experience|product designer",
    ),
    role("qa", "QA Engineer", r"qa|quality assurance|test engineer"),
    role("data", "Data Engineer", r"data engineer|etl|data pipeline"),
    role(
        "machine_learning",
        "Machine Learning",
        r"ml engineer|machine learning|ai engineer",
    ),
    role("software", "Software Engineer", r"software engineer"),
    hiring_signal(
        "recruitment",
        &["we're hiring", "join our team"],
        15,
        "Active recruitment campaign",
    ),
    hiring_signal(
        "remote",
        &["remote", "work from home"],
        5,
        "Offers remote positions",
    ),
    hiring_signal(
        "growth_stage",
        &["startup", "fast-growing", "scaling"],
        10,
        "Growth-stage company",
    ),
];

pub static PROFILE: DomainProfile = DomainProfile {
    domain: Domain::JobOpportunity,
    rules: RULES,
    policy: AggregationPolicy::Accretive,
    tiers: &[
        (40, "High", "Active tech hiring"),
        (20, "Medium", "Some hiring activity"),
        (0, "Low", "Limited or no hiring"),
    ],
    recommendations: RecommendationPolicy::ByScore(&[
        (30, "Staff augmentation, dedicated teams, outsourcing"),
        (0, "Talent acquisition services"),
    ]),
};
