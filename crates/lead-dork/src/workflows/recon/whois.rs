use crate::workflows::request::{bare_domain, require, DomainRequest};
use crate::workflows::service::timeouts;
use crate::workflows::{IntelError, IntelService};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

const WHOIS_API: &str = "https://www.whoisxmlapi.com/whoisserver/WhoisService";
const NOT_FOUND: &str = "Not found";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhoisReport {
    pub domain: String,
    pub ip_address: String,
    pub whois_data: Value,
    pub note: &'static str,
}

impl IntelService {
    /// DNS resolution plus, when an API key is configured, the WHOIS record.
    pub async fn whois_lookup(&self, request: DomainRequest) -> Result<WhoisReport, IntelError> {
        let domain = bare_domain(&require(request.domain.as_deref(), "domain")?);

        let ip_address = resolve(&domain).await;

        let (whois_data, note) = match self.endpoints.whois_api_key.as_deref() {
            Some(key) => match self.whois_record(key, &domain).await {
                Some(record) => (record, "WHOIS data retrieved from API"),
                None => (json!({}), "WHOIS API returned no data"),
            },
            None => (json!({}), "Full WHOIS data requires API key"),
        };

        Ok(WhoisReport {
            domain,
            ip_address,
            whois_data,
            note,
        })
    }

    async fn whois_record(&self, key: &str, domain: &str) -> Option<Value> {
        let url = Url::parse_with_params(
            WHOIS_API,
            &[("apiKey", key), ("domainName", domain), ("outputFormat", "JSON")],
        )
        .ok()?;

        match self.fetcher.get_json(&url, timeouts::WHOIS).await {
            Ok(record) => record,
            Err(err) => {
                debug!(domain, error = %err, "whois api unavailable");
                None
            }
        }
    }
}

/// First resolved address, IPv4 preferred.
async fn resolve(domain: &str) -> String {
    let host = domain.split(':').next().unwrap_or(domain);
    match tokio::net::lookup_host((host, 80)).await {
        Ok(addrs) => {
            let addrs: Vec<_> = addrs.map(|addr| addr.ip()).collect();
            addrs
                .iter()
                .find(|ip| ip.is_ipv4())
                .or_else(|| addrs.first())
                .map_or_else(|| NOT_FOUND.to_string(), ToString::to_string)
        }
        Err(err) => {
            debug!(domain, error = %err, "dns resolution failed");
            NOT_FOUND.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn literal_addresses_resolve_to_themselves() {
        assert_eq!(resolve("127.0.0.1").await, "127.0.0.1");
        assert_eq!(resolve("127.0.0.1:8080").await, "127.0.0.1");
    }

    #[tokio::test]
    async fn unresolvable_names_are_reported_not_found() {
        assert_eq!(resolve("no-such-host.invalid").await, NOT_FOUND);
    }
}
