//! Built-in rule tables, one module per domain.
//!
//! Page names referenced by the tables are the keys workflows use when they
//! assemble [`Evidence`](crate::evidence::Evidence).

pub mod business;
pub mod growth;
pub mod health;
pub mod jobs;
pub mod lead;

/// Page holding the careers listing (or the home page as a fallback).
pub const CAREERS: &str = "careers";
pub const PRESS: &str = "press";
pub const SEARCH: &str = "search";
pub const AD_LIBRARY: &str = "ad_library";
pub const LANDING: &str = "landing";

/// Fact names.
pub const ACTIVE_SUBDOMAINS: &str = "active_subdomains";
pub const CAREERS_PAGE: &str = "careers_page";
pub const SITEMAP_URLS: &str = "sitemap_urls";
pub const SITEMAP_LASTMOD: &str = "sitemap_lastmod";
pub const LOAD_SECONDS: &str = "load_seconds";
pub const LANDING_SECONDS: &str = "landing_seconds";
