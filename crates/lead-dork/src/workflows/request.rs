//! Request bodies and input normalization shared by every analysis endpoint.

use super::IntelError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

/// Body carrying a single target URL.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TargetRequest {
    pub url: Option<String>,
}

impl TargetRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DomainRequest {
    pub domain: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KeywordAnalysisRequest {
    pub url: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KeywordRequest {
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QueryRequest {
    pub query: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompanyRequest {
    pub company: Option<String>,
}

/// Decode a JSON body; an empty or `null` body is the default request.
pub fn parse_body<T>(body: &[u8]) -> Result<T, IntelError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|err| IntelError::InvalidBody(err.to_string()))?;
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value).map_err(|err| IntelError::InvalidBody(err.to_string()))
}

/// Trimmed, non-blank value of a required field.
pub fn require(value: Option<&str>, field: &'static str) -> Result<String, IntelError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(IntelError::MissingField(field))
}

/// Treat scheme-less input as https.
pub fn normalize_target(raw: &str) -> Result<Url, IntelError> {
    let raw = raw.trim();
    let lower = raw.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    let url = Url::parse(&candidate).map_err(|_| IntelError::InvalidTarget(raw.to_string()))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(IntelError::InvalidTarget(raw.to_string()));
    }
    Ok(url)
}

/// Host part of a domain-ish input: scheme and path removed.
pub fn bare_domain(raw: &str) -> String {
    let raw = raw.trim();
    let without_scheme = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .unwrap_or(raw);
    without_scheme
        .split('/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// `scheme://host[:port]` of a target, without trailing slash.
pub fn origin(url: &Url) -> Url {
    let mut origin = url.clone();
    origin.set_path("/");
    origin.set_query(None);
    origin.set_fragment(None);
    origin
}

/// Join absolute paths onto the target's origin.
pub fn candidates(base: &Url, paths: &[&str]) -> Vec<Url> {
    let origin = origin(base);
    paths
        .iter()
        .filter_map(|path| origin.join(path).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_the_default_request() {
        let request: TargetRequest = parse_body(b"").expect("empty body");
        assert!(request.url.is_none());
        let request: TargetRequest = parse_body(b"null").expect("null body");
        assert!(request.url.is_none());
    }

    #[test]
    fn malformed_body_is_a_client_error() {
        let err = parse_body::<TargetRequest>(b"{\"url\": 42}").expect_err("wrong type");
        assert!(matches!(err, IntelError::InvalidBody(_)));
    }

    #[test]
    fn blank_required_fields_are_missing() {
        let err = require(Some("   "), "url").expect_err("blank");
        assert_eq!(err.to_string(), "url is required");
        assert_eq!(require(Some(" acme.io "), "url").unwrap(), "acme.io");
    }

    #[test]
    fn scheme_less_targets_default_to_https() {
        let url = normalize_target("acme.io/pricing").expect("valid");
        assert_eq!(url.as_str(), "https://acme.io/pricing");
        let url = normalize_target("http://acme.io").expect("valid");
        assert_eq!(url.scheme(), "http");
        assert!(normalize_target("https://").is_err());
    }

    #[test]
    fn candidates_are_rooted_at_the_origin() {
        let base = Url::parse("https://acme.io/about/team?x=1").unwrap();
        let urls = candidates(&base, &["/careers", "/jobs"]);
        assert_eq!(urls[0].as_str(), "https://acme.io/careers");
        assert_eq!(urls[1].as_str(), "https://acme.io/jobs");
    }

    #[test]
    fn bare_domain_strips_scheme_and_path() {
        assert_eq!(bare_domain("https://Acme.io/about"), "acme.io");
        assert_eq!(bare_domain("acme.io"), "acme.io");
    }
}
