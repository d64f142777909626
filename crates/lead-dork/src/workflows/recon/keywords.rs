use crate::evidence::html::{dedupe, visible_text};
use crate::workflows::request::{normalize_target, require, KeywordAnalysisRequest, KeywordRequest};
use crate::workflows::service::timeouts;
use crate::workflows::{IntelError, IntelService};
use scraper::Html;
use serde::Serialize;
use std::collections::BTreeMap;

const DEFAULT_KEYWORDS: [&str; 6] = ["automation", "AI", "CRM", "analytics", "enterprise", "SaaS"];

const EXPANSIONS: &[(&str, &[&str])] = &[
    ("crm", &["customer relationship management", "sales automation", "contact management", "pipeline", "salesforce", "hubspot", "zoho"]),
    ("ai", &["artificial intelligence", "machine learning", "deep learning", "neural network", "automation", "chatbot", "nlp", "computer vision"]),
    ("automation", &["workflow", "zapier", "integration", "api", "scripting", "orchestration", "rpa", "no-code"]),
    ("analytics", &["data analysis", "reporting", "dashboard", "bi", "business intelligence", "metrics", "kpi", "insights"]),
    ("saas", &["cloud software", "subscription", "web app", "platform", "multi-tenant", "b2b software"]),
    ("devops", &["ci/cd", "deployment", "docker", "kubernetes", "jenkins", "infrastructure", "cloud ops"]),
    ("mobile", &["app development", "ios", "android", "react native", "flutter", "mobile-first"]),
    ("web", &["website", "frontend", "backend", "full-stack", "responsive", "progressive web app"]),
    ("ecommerce", &["online store", "shopping cart", "payment gateway", "shopify", "woocommerce", "magento"]),
    ("marketing", &["digital marketing", "seo", "sem", "content marketing", "email marketing", "social media"]),
    ("cloud", &["aws", "azure", "google cloud", "cloud hosting", "serverless", "iaas", "paas"]),
    ("security", &["cybersecurity", "encryption", "firewall", "ssl", "authentication", "authorization"]),
    ("database", &["sql", "nosql", "mongodb", "postgresql", "mysql", "data warehouse"]),
    ("api", &["rest api", "graphql", "webhook", "integration", "endpoints", "microservices"]),
];

const TECH_JARGON: [&str; 5] = ["stack", "framework", "architecture", "scalable", "agile"];
const PRODUCT_JARGON: [&str; 5] = ["feature", "roadmap", "mvp", "iteration", "release"];
const BUSINESS_JARGON: [&str; 5] = ["roi", "kpi", "revenue", "growth", "conversion"];
const SALES_JARGON: [&str; 5] = ["lead", "prospect", "pipeline", "deal", "quota"];

const TECH_HINTS: [&str; 4] = ["tech", "dev", "software", "app"];
const SALES_HINTS: [&str; 3] = ["sales", "marketing", "crm"];

const MAX_RELATED_KEPT: usize = 20;
const MAX_RELATED_SHOWN: usize = 15;
const MAX_SYNONYMS: usize = 10;
const MAX_JARGON: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeywordDetail {
    pub count: usize,
    pub density: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordReport {
    pub url: String,
    pub keywords_found: Vec<String>,
    pub keyword_details: BTreeMap<String, KeywordDetail>,
    pub relevance_score: u8,
    pub total_words: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveryReport {
    pub input_keyword: String,
    pub related_keywords: Vec<String>,
    pub synonyms: Vec<String>,
    pub industry_jargon: Vec<String>,
    pub total_expanded: usize,
}

impl IntelService {
    pub async fn analyze_keywords(
        &self,
        request: KeywordAnalysisRequest,
    ) -> Result<KeywordReport, IntelError> {
        let target = normalize_target(&require(request.url.as_deref(), "url")?)?;
        let mut keywords: Vec<String> = request
            .keywords
            .into_iter()
            .map(|keyword| keyword.trim().to_string())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        if keywords.is_empty() {
            keywords = DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect();
        }

        let page = self
            .fetch_primary("Keyword analysis", &target, timeouts::KEYWORDS)
            .await?;

        let mut report = keyword_density(&page.body, &keywords);
        report.url = target.to_string();
        Ok(report)
    }

    /// Offline expansion of a seed keyword; performs no network access.
    pub fn discover_keywords(&self, request: KeywordRequest) -> Result<DiscoveryReport, IntelError> {
        let keyword = require(request.keyword.as_deref(), "keyword")?.to_lowercase();
        Ok(expand(&keyword))
    }
}

fn keyword_density(body: &str, keywords: &[String]) -> KeywordReport {
    let text = visible_text(&Html::parse_document(body)).to_lowercase();
    let total_words = text.split_whitespace().count();

    let mut keywords_found = Vec::new();
    let mut keyword_details = BTreeMap::new();
    for keyword in keywords {
        let count = text.matches(keyword.to_lowercase().as_str()).count();
        if count == 0 {
            continue;
        }
        let density = if total_words > 0 {
            (count as f64 / total_words as f64 * 100.0 * 100.0).round() / 100.0
        } else {
            0.0
        };
        keywords_found.push(keyword.clone());
        keyword_details.insert(keyword.clone(), KeywordDetail { count, density });
    }

    let mentions: usize = keyword_details.values().map(|detail| detail.count).sum();
    let relevance = (keywords_found.len() * 15 + mentions).min(100);

    KeywordReport {
        url: String::new(),
        keywords_found,
        keyword_details,
        relevance_score: relevance as u8,
        total_words,
    }
}

fn expand(keyword: &str) -> DiscoveryReport {
    let mut related = Vec::new();
    let mut synonyms = Vec::new();

    if let Some((_, values)) = EXPANSIONS.iter().find(|(key, _)| *key == keyword) {
        related.extend(values.iter().map(|v| v.to_string()));
    }
    for (key, values) in EXPANSIONS {
        if keyword.contains(key) || key.contains(keyword) {
            synonyms.push(key.to_string());
            related.extend(values.iter().map(|v| v.to_string()));
        }
    }

    let mut related = dedupe(related);
    related.truncate(MAX_RELATED_KEPT);
    let mut synonyms = dedupe(synonyms);
    synonyms.truncate(MAX_SYNONYMS);

    let jargon: Vec<&str> = if TECH_HINTS.iter().any(|hint| keyword.contains(hint)) {
        TECH_JARGON.iter().chain(&PRODUCT_JARGON).copied().collect()
    } else if SALES_HINTS.iter().any(|hint| keyword.contains(hint)) {
        BUSINESS_JARGON.iter().chain(&SALES_JARGON).copied().collect()
    } else {
        Vec::new()
    };
    let mut jargon = dedupe(jargon.into_iter().map(String::from));
    jargon.truncate(MAX_JARGON);

    let total_expanded = related.len() + synonyms.len() + jargon.len();
    related.truncate(MAX_RELATED_SHOWN);

    DiscoveryReport {
        input_keyword: keyword.to_string(),
        related_keywords: related,
        synonyms,
        industry_jargon: jargon,
        total_expanded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_counts_visible_text_only() {
        let body = "<html><head><script>automation automation</script></head>\
                    <body><p>Automation for the enterprise</p><p>More automation</p></body></html>";
        let keywords = vec!["automation".to_string(), "CRM".to_string()];

        let report = keyword_density(body, &keywords);

        assert_eq!(report.total_words, 6);
        assert_eq!(report.keywords_found, vec!["automation"]);
        let detail = report.keyword_details["automation"];
        assert_eq!(detail.count, 2);
        assert_eq!(detail.density, 33.33);
        assert_eq!(report.relevance_score, 17);
        assert!(!report.keyword_details.contains_key("CRM"));
    }

    #[test]
    fn relevance_is_capped() {
        let body = format!("<p>{}</p>", "crm ".repeat(200));
        let report = keyword_density(&body, &["crm".to_string()]);
        assert_eq!(report.relevance_score, 100);
    }

    #[test]
    fn direct_match_expands_with_sales_jargon() {
        let report = expand("crm");
        assert_eq!(report.synonyms, vec!["crm"]);
        assert_eq!(report.related_keywords.len(), 7);
        assert_eq!(report.related_keywords[0], "customer relationship management");
        assert_eq!(report.industry_jargon.len(), 10);
        assert!(report.industry_jargon.contains(&"quota".to_string()));
        assert_eq!(report.total_expanded, 7 + 1 + 10);
    }

    #[test]
    fn partial_matches_merge_several_entries() {
        // "web app" contains "web"; "app" selects tech jargon.
        let report = expand("web app");
        assert_eq!(report.synonyms, vec!["web"]);
        assert!(report.industry_jargon.contains(&"roadmap".to_string()));

        let report = expand("ai automation");
        assert_eq!(report.synonyms, vec!["ai", "automation"]);
        assert_eq!(report.related_keywords.len(), MAX_RELATED_SHOWN);
        assert!(report.industry_jargon.is_empty());
        assert_eq!(report.total_expanded, 16 + 2);
    }

    #[test]
    fn unknown_keywords_expand_to_nothing() {
        let report = expand("zzz");
        assert!(report.related_keywords.is_empty());
        assert!(report.synonyms.is_empty());
        assert_eq!(report.total_expanded, 0);
    }

    #[test]
    fn expansion_is_deterministic() {
        assert_eq!(expand("automation"), expand("automation"));
    }
}
