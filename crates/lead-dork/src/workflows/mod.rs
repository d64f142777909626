//! Request-level analyses: evidence collection, scoring and OSINT lookups,
//! plus the HTTP router that exposes them.

mod error;
mod recon;
pub mod request;
mod router;
mod scored;
mod service;

#[cfg(test)]
mod tests;

pub use error::IntelError;
pub use recon::*;
pub use request::{
    CompanyRequest, DomainRequest, KeywordAnalysisRequest, KeywordRequest, QueryRequest,
    TargetRequest,
};
pub use router::intel_router;
pub use scored::{
    BusinessReport, GrowthReport, HealthReport, JobsReport, LeadReport, SignalGroup,
};
pub use service::IntelService;
