use clap::{Args, ValueEnum};
use lead_dork::config::AppConfig;
use lead_dork::error::AppError;
use lead_dork::scoring::{Domain, ScoreCard, SignalKind};
use lead_dork::telemetry;
use lead_dork::workflows::IntelService;
use std::fmt::Write as _;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Which score to compute
    #[arg(value_enum)]
    pub(crate) domain: AnalyzeDomain,
    /// Target website (scheme optional)
    pub(crate) url: String,
    /// Print the full score card as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum AnalyzeDomain {
    Lead,
    Growth,
    Health,
    Jobs,
    Business,
}

impl From<AnalyzeDomain> for Domain {
    fn from(value: AnalyzeDomain) -> Self {
        match value {
            AnalyzeDomain::Lead => Domain::Lead,
            AnalyzeDomain::Growth => Domain::Growth,
            AnalyzeDomain::Health => Domain::TechnicalHealth,
            AnalyzeDomain::Jobs => Domain::JobOpportunity,
            AnalyzeDomain::Business => Domain::Business,
        }
    }
}

pub(crate) async fn run_analysis(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let service = IntelService::new(&config.fetch, config.scoring.clone())?;
    let card = service.scorecard(args.domain.into(), &args.url).await?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&card)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
        println!("{rendered}");
    } else {
        print!("{}", render_card(&args.url, &card));
    }
    Ok(())
}

pub(crate) fn render_card(target: &str, card: &ScoreCard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} for {target}", card.domain.label());
    let _ = writeln!(out, "Score: {}/100", card.score);
    if card.tier.detail.is_empty() {
        let _ = writeln!(out, "Tier: {}", card.tier.label);
    } else {
        let _ = writeln!(out, "Tier: {} ({})", card.tier.label, card.tier.detail);
    }

    for (heading, kind) in [
        ("Signals", SignalKind::Signal),
        ("Issues", SignalKind::Issue),
        ("Warnings", SignalKind::Warning),
    ] {
        let notes = card.notes(kind);
        if notes.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{heading}:");
        for note in notes {
            let _ = writeln!(out, "  - {note}");
        }
    }

    if !card.recommendations.is_empty() {
        let _ = writeln!(out, "Recommendations:");
        for recommendation in &card.recommendations {
            let _ = writeln!(out, "  - {recommendation}");
        }
    }
    out
}
