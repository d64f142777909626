use super::common::*;
use crate::evidence::{Evidence, Fact, FetchFailure, Page, PRIMARY};
use crate::scoring::catalog::{self, business, growth, health, jobs, lead};
use crate::scoring::{Domain, SignalKind};
use std::time::Duration;

#[test]
fn lead_page_with_every_signal_scores_high() {
    let evidence = primary("https://acme.io", lead_page());

    let card = engine().score(&lead::PROFILE, &evidence, None);

    assert_eq!(card.score, 100);
    assert_eq!(card.tier.label, "High");
    assert_eq!(card.recommendation(), Some("Priority lead"));
    assert!(card.matches.iter().all(|m| m.matched), "{:?}", card.matches);
    assert!(card
        .notes(SignalKind::Signal)
        .contains(&"3 email addresses found".to_string()));
}

#[test]
fn lead_scoring_is_deterministic() {
    let evidence = primary("https://acme.io", lead_page());
    let engine = engine();

    let first = engine.score(&lead::PROFILE, &evidence, None);
    let second = engine.score(&lead::PROFILE, &evidence, None);

    assert_eq!(first, second);
}

#[test]
fn insecure_page_without_viewport_or_title_is_good() {
    let body = r#"<html><head><meta name="description" content="Plumbing"></head>
        <body><p>Family plumbing since 1982.</p></body></html>"#;
    let evidence = primary("http://plumber.example", body)
        .with_fact(catalog::LOAD_SECONDS, Fact::Number(0.8));

    let card = engine().score(&health::PROFILE, &evidence, None);

    assert_eq!(card.score, 60);
    assert_eq!(card.tier.label, "Good");
    assert_eq!(card.recommendation(), Some("Potential optimization services"));
    assert_eq!(
        card.notes(SignalKind::Issue),
        vec![
            "No SSL certificate - Security risk".to_string(),
            "No mobile viewport meta tag - Not mobile optimized".to_string(),
        ]
    );
    assert_eq!(card.notes(SignalKind::Warning), vec!["Missing page title".to_string()]);
}

#[test]
fn health_penalizes_downgrade_and_outdated_frameworks() {
    let body = r#"<html><head><title>Shop</title>
        <meta name="viewport" content="width=device-width">
        <meta name="description" content="Shop">
        <script src="/js/jquery-1.12.4.min.js"></script></head><body></body></html>"#;
    let page = Page::new(url("https://shop.example"), 200, body)
        .with_final_url(url("http://shop.example/"));
    let evidence = Evidence::new(url("https://shop.example"))
        .with_page(PRIMARY, page)
        .with_fact(catalog::LOAD_SECONDS, Fact::Number(4.2));

    let card = engine().score(&health::PROFILE, &evidence, None);

    assert_eq!(card.score, 100 - 5 - 20 - 15);
    assert!(card.matched("https_downgrade"));
    assert!(card
        .notes(SignalKind::Issue)
        .contains(&"Outdated frameworks detected: jQuery 1.x (outdated)".to_string()));
    assert!(card
        .notes(SignalKind::Warning)
        .contains(&"Moderate load time (4.2s)".to_string()));
}

#[test]
fn health_timeout_costs_thirty_points_without_a_page() {
    let evidence = Evidence::new(url("https://slow.example")).with_failure(FetchFailure::TimedOut);

    let card = engine().score(&health::PROFILE, &evidence, None);

    assert_eq!(card.score, 70);
    assert_eq!(card.tier.label, "Good");
    assert_eq!(
        card.notes(SignalKind::Issue),
        vec!["Extreme timeout - Site unreachable or very slow".to_string()]
    );
}

#[test]
fn quiet_https_site_is_early_stage_growth() {
    let body = r#"<html><body><h1>Acme</h1>
        <a href="https://linkedin.com/company/acme">LinkedIn</a></body></html>"#;
    let evidence = primary("https://acme.io", body)
        .with_fact(catalog::ACTIVE_SUBDOMAINS, Fact::Items(Vec::new()))
        .with_fact(catalog::CAREERS_PAGE, Fact::Flag(false));

    let card = engine().score(&growth::PROFILE, &evidence, None);

    assert_eq!(card.score, 10);
    assert_eq!(card.tier.label, "Early Stage");
    assert_eq!(card.recommendation(), Some("Early stage nurture"));
    assert_eq!(
        card.notes(SignalKind::Signal),
        vec!["SSL Certificate active (security priority)".to_string()]
    );
}

#[test]
fn growth_counts_each_subdomain_and_large_sitemaps() {
    let evidence = primary("https://acme.io", "<p>Read the blog</p>")
        .with_fact(
            catalog::ACTIVE_SUBDOMAINS,
            Fact::Items(vec!["blog".into(), "docs".into()]),
        )
        .with_fact(catalog::CAREERS_PAGE, Fact::Flag(true))
        .with_fact(catalog::SITEMAP_URLS, Fact::Number(120.0));

    let card = engine().score(&growth::PROFILE, &evidence, None);

    assert_eq!(card.score, 10 + 10 + 15 + 20 + 10);
    assert_eq!(card.tier.label, "High Growth");
    assert!(card
        .notes(SignalKind::Signal)
        .contains(&"Large sitemap (120 pages) - content-rich site".to_string()));
}

#[test]
fn careers_page_with_roles_is_high_opportunity() {
    let body = "<h2>We're hiring!</h2><ul><li>Senior Backend engineer (Python)</li>\
        <li>DevOps lead</li><li>Software Engineer, remote</li></ul>";
    let evidence = Evidence::new(url("https://acme.io"))
        .with_page(catalog::CAREERS, page("https://acme.io/careers", body));

    let card = engine().score(&jobs::PROFILE, &evidence, None);

    let roles = card.group_notes(jobs::ROLE_GROUP);
    assert_eq!(
        roles,
        vec!["Backend Developer", "DevOps Engineer", "Software Engineer"]
    );
    assert_eq!(card.score, 30 + 15 + 5);
    assert_eq!(card.tier.label, "High");
    assert_eq!(
        card.recommendation(),
        Some("Staff augmentation, dedicated teams, outsourcing")
    );
}

#[test]
fn jobs_without_a_page_score_zero() {
    let card = engine().score(&jobs::PROFILE, &Evidence::new(url("https://acme.io")), None);

    assert_eq!(card.score, 0);
    assert_eq!(card.tier.label, "Low");
    assert_eq!(card.recommendation(), Some("Talent acquisition services"));
}

#[test]
fn business_signals_map_to_pitches() {
    let search = page(
        "https://www.google.com/search?q=acme",
        "<div>Acme raised $12m in a Series A funding round led by venture capital firms</div>",
    );
    let press = page(
        "https://acme.io/press",
        "<h1>Announcement</h1><p>Introducing our new product launch</p>",
    );
    let ads = page(
        "https://www.facebook.com/ads/library",
        "<div>Ad Library results for Acme</div>",
    );
    let landing = page("https://acme.io", "<html><body>No scripts</body></html>");
    let evidence = Evidence::new(url("https://acme.io"))
        .with_page(catalog::SEARCH, search)
        .with_page(catalog::PRESS, press)
        .with_page(catalog::AD_LIBRARY, ads)
        .with_page(catalog::LANDING, landing)
        .with_fact(catalog::LANDING_SECONDS, Fact::Number(0.4))
        .with_fact(
            catalog::SITEMAP_LASTMOD,
            Fact::Items(vec!["2025-02-01".into(), "2019-06-30".into()]),
        );

    let card = engine().score(&business::PROFILE, &evidence, Some("Acme"));

    assert_eq!(card.score, 30 + 20 + 10 + 15);
    assert_eq!(card.tier.label, "High Activity");
    assert_eq!(card.recommendations.len(), 3);
    assert_eq!(
        card.group_notes(business::FUNDING),
        vec![
            "Funding mentions detected (4 keywords)".to_string(),
            "Amounts found: $12m".to_string(),
        ]
    );
    assert_eq!(
        card.group_notes(business::AD_PRESENCE),
        vec![
            "Facebook ads found".to_string(),
            "No tracking detected - analytics setup needed".to_string(),
        ]
    );
    assert!(card
        .group_notes(business::PRODUCT_LAUNCHES)
        .contains(&"1 pages updated recently".to_string()));
}

#[test]
fn slow_landing_pages_report_tenths_of_a_second() {
    let ads = page(
        "https://www.facebook.com/ads/library",
        "<div>Ad Library results for Acme</div>",
    );
    let evidence = Evidence::new(url("https://acme.io"))
        .with_page(catalog::AD_LIBRARY, ads)
        .with_page(catalog::LANDING, page("https://acme.io", "<p>gtag</p>"))
        .with_fact(catalog::LANDING_SECONDS, Fact::Number(4.53));

    let card = engine().score(&business::PROFILE, &evidence, Some("Acme"));

    assert!(card
        .group_notes(business::AD_PRESENCE)
        .contains(&"Landing page slow (4.5s) - optimization needed".to_string()));
}

#[test]
fn tier_overrides_apply_without_changing_scores() {
    let config = crate::scoring::ScoringConfig::new(crate::scoring::ReferenceYears::new(YEAR))
        .with_tiers(
            Domain::Lead,
            crate::scoring::TierTable::parse("95=Hot:Call now,0=Cold:Wait").expect("valid"),
        );
    let engine = crate::scoring::SignalEngine::new(config);
    let evidence = primary("https://acme.io", lead_page());

    let card = engine.score(&lead::PROFILE, &evidence, None);

    assert_eq!(card.score, 100);
    assert_eq!(card.tier.label, "Hot");
    assert_eq!(card.recommendation(), Some("Hot - Call now"));
}

#[test]
fn loaded_page_elapsed_is_not_load_time_without_fact() {
    let evidence = Evidence::new(url("https://acme.io")).with_page(
        PRIMARY,
        page("https://acme.io", "<title>x</title>").with_elapsed(Duration::from_secs(9)),
    );

    let card = engine().score(&health::PROFILE, &evidence, None);

    assert!(!card.matched("slow_load"));
}
