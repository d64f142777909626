use crate::evidence::Page;
use crate::workflows::request::{normalize_target, require, TargetRequest};
use crate::workflows::service::timeouts;
use crate::workflows::{IntelError, IntelService};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Framework,
    Cms,
    Analytics,
    Library,
}

/// `(category, technology, markers)`; any marker in the lowercased markup counts.
const FINGERPRINTS: &[(Category, &str, &[&str])] = &[
    (Category::Framework, "React", &["react"]),
    (Category::Framework, "Vue.js", &["vue"]),
    (Category::Framework, "Angular", &["angular", "ng-"]),
    (Category::Framework, "Next.js", &["next", "_next"]),
    (Category::Cms, "WordPress", &["wp-content", "wordpress"]),
    (Category::Cms, "Shopify", &["shopify"]),
    (Category::Cms, "Wix", &["wix.com"]),
    (Category::Cms, "Squarespace", &["squarespace"]),
    (Category::Analytics, "Google Analytics", &["google-analytics", "gtag"]),
    (Category::Analytics, "Hotjar", &["hotjar"]),
    (Category::Library, "jQuery", &["jquery"]),
    (Category::Library, "Bootstrap", &["bootstrap"]),
    (Category::Library, "Tailwind CSS", &["tailwind"]),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TechStack {
    pub frameworks: Vec<&'static str>,
    pub cms: Vec<&'static str>,
    pub analytics: Vec<&'static str>,
    pub hosting: Vec<String>,
    pub libraries: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechReport {
    pub url: String,
    pub technologies: TechStack,
}

impl IntelService {
    pub async fn detect_tech(&self, request: TargetRequest) -> Result<TechReport, IntelError> {
        let target = normalize_target(&require(request.url.as_deref(), "url")?)?;
        let page = self
            .fetch_primary("Tech detection", &target, timeouts::TECH)
            .await?;

        Ok(TechReport {
            url: target.to_string(),
            technologies: fingerprint(&page),
        })
    }
}

fn fingerprint(page: &Page) -> TechStack {
    let markup = page.body.to_lowercase();
    let mut stack = TechStack::default();

    for &(category, name, markers) in FINGERPRINTS {
        if !markers.iter().any(|marker| markup.contains(marker)) {
            continue;
        }
        let bucket = match category {
            Category::Framework => &mut stack.frameworks,
            Category::Cms => &mut stack.cms,
            Category::Analytics => &mut stack.analytics,
            Category::Library => &mut stack.libraries,
        };
        bucket.push(name);
    }

    if let Some(server) = page.header("server").filter(|s| !s.is_empty()) {
        stack.hosting.push(server.to_string());
    }
    stack
}
