use super::config::EvaluationContext;
use crate::evidence::html::visible_text;
use crate::evidence::{Evidence, Fact, FetchFailure, Page};
use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;
use std::cell::OnceCell;
use std::collections::{BTreeMap, HashMap};
use std::sync::{LazyLock, Mutex};
use tracing::{debug, warn};

/// Whether a rule contributes evidence or flags a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Signal,
    Issue,
    Warning,
}

/// Points awarded when a rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Fixed(u32),
    /// Multiplied by the observed count.
    PerUnit(u32),
}

impl Weight {
    fn points(self, observation: &Observation) -> u32 {
        match self {
            Weight::Fixed(points) => points,
            Weight::PerUnit(points) => points.saturating_mul(observation.count as u32),
        }
    }
}

/// Which rendition of a page a text predicate reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Raw response body, lowercased.
    Markup,
    /// Text nodes outside scripts and styles, lowercased.
    Text,
}

/// Tagged predicate over an evidence bundle.
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    ContainsAny {
        page: &'static str,
        field: Field,
        needles: &'static [&'static str],
    },
    /// At least `min` distinct needles are present.
    ContainsAtLeast {
        page: &'static str,
        field: Field,
        needles: &'static [&'static str],
        min: usize,
    },
    /// The pattern occurs at least `min` times.
    PatternCount {
        page: &'static str,
        field: Field,
        pattern: &'static str,
        min: usize,
    },
    Element {
        page: &'static str,
        selectors: &'static [&'static str],
    },
    MissingElement {
        page: &'static str,
        selector: &'static str,
    },
    /// Labelled patterns; matches when any label's pattern is found.
    Catalog {
        page: &'static str,
        field: Field,
        entries: &'static [(&'static str, &'static str)],
    },
    SecureScheme,
    InsecureScheme,
    /// Requested over https, landed on http.
    Downgraded {
        page: &'static str,
    },
    /// `above < value <= up_to`; list facts measure their length.
    Measure {
        fact: &'static str,
        above: f64,
        up_to: Option<f64>,
    },
    Flag {
        fact: &'static str,
    },
    /// List items mentioning the current or previous reference year.
    RecentItems {
        fact: &'static str,
        min: usize,
    },
    MentionsReferenceYear {
        page: &'static str,
        field: Field,
    },
    MentionsSubject {
        page: &'static str,
        field: Field,
    },
    FetchTimedOut,
    FetchFailed,
    AnyOf(&'static [Predicate]),
    AllOf(&'static [Predicate]),
    Not(&'static Predicate),
}

/// One entry of a domain rule set.
#[derive(Debug, Clone, Copy)]
pub struct SignalRule {
    pub id: &'static str,
    pub group: &'static str,
    pub kind: SignalKind,
    pub predicate: Predicate,
    pub weight: Weight,
    /// Supports `{count}`, `{value}` (or `{value:N}` places), `{detail}` and `{years}`.
    pub note: &'static str,
}

/// Result of applying one rule to one evidence bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalMatch {
    pub rule: &'static str,
    pub group: &'static str,
    pub kind: SignalKind,
    pub matched: bool,
    pub points: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Observation {
    count: usize,
    value: Option<f64>,
    detail: Option<String>,
}

impl Observation {
    fn counted(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    fn detailed(count: usize, detail: String) -> Self {
        Self {
            count,
            value: None,
            detail: Some(detail),
        }
    }
}

/// Reasons a predicate could not be evaluated. Always treated as a non-match.
#[derive(Debug, thiserror::Error)]
enum Unevaluable {
    #[error("page '{0}' was not fetched")]
    MissingPage(&'static str),
    #[error("fact '{0}' is not available")]
    MissingFact(&'static str),
    #[error("fact '{0}' has the wrong shape")]
    FactShape(&'static str),
    #[error("invalid pattern '{pattern}': {message}")]
    Pattern {
        pattern: &'static str,
        message: String,
    },
    #[error("invalid selector '{0}'")]
    Selector(&'static str),
    #[error("no subject supplied")]
    MissingSubject,
}

impl Unevaluable {
    fn is_definition_error(&self) -> bool {
        matches!(self, Unevaluable::Pattern { .. } | Unevaluable::Selector(_))
    }
}

type Observed = Result<Option<Observation>, Unevaluable>;

/// Lazily derived renditions of one page.
struct PageView<'a> {
    page: &'a Page,
    markup: OnceCell<String>,
    text: OnceCell<String>,
    document: OnceCell<Html>,
}

impl<'a> PageView<'a> {
    fn new(page: &'a Page) -> Self {
        Self {
            page,
            markup: OnceCell::new(),
            text: OnceCell::new(),
            document: OnceCell::new(),
        }
    }

    fn document(&self) -> &Html {
        self.document
            .get_or_init(|| Html::parse_document(&self.page.body))
    }

    fn field(&self, field: Field) -> &str {
        match field {
            Field::Markup => self.markup.get_or_init(|| self.page.body.to_lowercase()),
            Field::Text => self
                .text
                .get_or_init(|| visible_text(self.document()).to_lowercase()),
        }
    }
}

struct Scope<'a> {
    evidence: &'a Evidence,
    context: &'a EvaluationContext,
    views: BTreeMap<&'static str, PageView<'a>>,
}

impl<'a> Scope<'a> {
    fn new(evidence: &'a Evidence, context: &'a EvaluationContext) -> Self {
        let views = evidence
            .pages()
            .map(|(name, page)| (name, PageView::new(page)))
            .collect();
        Self {
            evidence,
            context,
            views,
        }
    }

    fn view(&self, page: &'static str) -> Result<&PageView<'a>, Unevaluable> {
        self.views.get(page).ok_or(Unevaluable::MissingPage(page))
    }

    fn fact(&self, fact: &'static str) -> Result<&Fact, Unevaluable> {
        self.evidence
            .fact(fact)
            .ok_or(Unevaluable::MissingFact(fact))
    }
}

/// Apply every rule to the evidence, preserving rule order.
pub fn evaluate(
    evidence: &Evidence,
    rules: &[SignalRule],
    context: &EvaluationContext,
) -> Vec<SignalMatch> {
    let scope = Scope::new(evidence, context);

    rules
        .iter()
        .map(|rule| match observe(&rule.predicate, &scope) {
            Ok(Some(observation)) => SignalMatch {
                rule: rule.id,
                group: rule.group,
                kind: rule.kind,
                matched: true,
                points: rule.weight.points(&observation),
                note: Some(render_note(rule.note, &observation, context)),
            },
            Ok(None) => unmatched(rule),
            Err(reason) => {
                if reason.is_definition_error() {
                    warn!(rule = rule.id, %reason, "rule predicate could not be evaluated");
                } else {
                    debug!(rule = rule.id, %reason, "rule skipped for missing evidence");
                }
                unmatched(rule)
            }
        })
        .collect()
}

fn unmatched(rule: &SignalRule) -> SignalMatch {
    SignalMatch {
        rule: rule.id,
        group: rule.group,
        kind: rule.kind,
        matched: false,
        points: 0,
        note: None,
    }
}

fn observe(predicate: &Predicate, scope: &Scope<'_>) -> Observed {
    match *predicate {
        Predicate::ContainsAny {
            page,
            field,
            needles,
        } => {
            let haystack = scope.view(page)?.field(field);
            let found = needles.iter().filter(|n| haystack.contains(*n)).count();
            Ok((found > 0).then(|| Observation::counted(found)))
        }
        Predicate::ContainsAtLeast {
            page,
            field,
            needles,
            min,
        } => {
            let haystack = scope.view(page)?.field(field);
            let found: Vec<&str> = needles
                .iter()
                .copied()
                .filter(|n| haystack.contains(n))
                .collect();
            Ok((found.len() >= min).then(|| Observation::detailed(found.len(), found.join(", "))))
        }
        Predicate::PatternCount {
            page,
            field,
            pattern,
            min,
        } => {
            let regex = compile(pattern)?;
            let haystack = scope.view(page)?.field(field);
            let hits: Vec<&str> = regex.find_iter(haystack).map(|m| m.as_str()).collect();
            if hits.len() < min {
                return Ok(None);
            }
            let mut sample: Vec<&str> = Vec::new();
            for hit in &hits {
                if sample.len() == 3 {
                    break;
                }
                if !sample.contains(hit) {
                    sample.push(hit);
                }
            }
            Ok(Some(Observation::detailed(hits.len(), sample.join(", "))))
        }
        Predicate::Element { page, selectors } => {
            let document = scope.view(page)?.document();
            let mut found = 0;
            for css in selectors.iter().copied() {
                let selector = Selector::parse(css).map_err(|_| Unevaluable::Selector(css))?;
                found += document.select(&selector).count();
            }
            Ok((found > 0).then(|| Observation::counted(found)))
        }
        Predicate::MissingElement { page, selector } => {
            let document = scope.view(page)?.document();
            let selector =
                Selector::parse(selector).map_err(|_| Unevaluable::Selector(selector))?;
            let present = document.select(&selector).next().is_some();
            Ok((!present).then(|| Observation::counted(1)))
        }
        Predicate::Catalog {
            page,
            field,
            entries,
        } => {
            let haystack = scope.view(page)?.field(field);
            let mut labels = Vec::new();
            for &(label, pattern) in entries {
                if compile(pattern)?.is_match(haystack) {
                    labels.push(label);
                }
            }
            Ok((!labels.is_empty())
                .then(|| Observation::detailed(labels.len(), labels.join(", "))))
        }
        Predicate::SecureScheme => {
            Ok((scope.evidence.target().scheme() == "https").then(|| Observation::counted(1)))
        }
        Predicate::InsecureScheme => {
            Ok((scope.evidence.target().scheme() != "https").then(|| Observation::counted(1)))
        }
        Predicate::Downgraded { page } => {
            let page = scope.view(page)?.page;
            let downgraded =
                page.requested_url.scheme() == "https" && page.final_url.scheme() == "http";
            Ok(downgraded.then(|| Observation::counted(1)))
        }
        Predicate::Measure { fact, above, up_to } => {
            let (value, detail) = match scope.fact(fact)? {
                Fact::Number(value) => (*value, None),
                Fact::Items(items) => (
                    items.len() as f64,
                    Some(items.iter().take(5).cloned().collect::<Vec<_>>().join(", ")),
                ),
                Fact::Flag(_) => return Err(Unevaluable::FactShape(fact)),
            };
            let within = value > above && up_to.map_or(true, |limit| value <= limit);
            Ok(within.then(|| Observation {
                count: value.max(0.0) as usize,
                value: Some(value),
                detail,
            }))
        }
        Predicate::Flag { fact } => match scope.fact(fact)? {
            Fact::Flag(set) => Ok(set.then(|| Observation::counted(1))),
            _ => Err(Unevaluable::FactShape(fact)),
        },
        Predicate::RecentItems { fact, min } => {
            let Fact::Items(items) = scope.fact(fact)? else {
                return Err(Unevaluable::FactShape(fact));
            };
            let years = scope.context.years.labels();
            let recent = items
                .iter()
                .filter(|item| years.iter().any(|year| item.contains(year.as_str())))
                .count();
            Ok((recent >= min && recent > 0).then(|| Observation::counted(recent)))
        }
        Predicate::MentionsReferenceYear { page, field } => {
            let haystack = scope.view(page)?.field(field);
            let years = scope.context.years.labels();
            let found: Vec<&str> = years
                .iter()
                .map(String::as_str)
                .filter(|year| haystack.contains(year))
                .collect();
            Ok((!found.is_empty()).then(|| Observation::detailed(found.len(), found.join(", "))))
        }
        Predicate::MentionsSubject { page, field } => {
            let subject = scope
                .context
                .subject
                .as_deref()
                .map(str::trim)
                .filter(|subject| !subject.is_empty())
                .ok_or(Unevaluable::MissingSubject)?
                .to_lowercase();
            let haystack = scope.view(page)?.field(field);
            Ok(haystack
                .contains(&subject)
                .then(|| Observation::detailed(1, subject)))
        }
        Predicate::FetchTimedOut => Ok(matches!(
            scope.evidence.failure(),
            Some(FetchFailure::TimedOut)
        )
        .then(|| Observation::counted(1))),
        Predicate::FetchFailed => Ok(match scope.evidence.failure() {
            Some(FetchFailure::Failed(message)) => {
                Some(Observation::detailed(1, message.clone()))
            }
            _ => None,
        }),
        Predicate::AnyOf(children) => {
            let mut evaluated = false;
            let mut last_error = None;
            for child in children {
                match observe(child, scope) {
                    Ok(Some(observation)) => return Ok(Some(observation)),
                    Ok(None) => evaluated = true,
                    Err(reason) => last_error = Some(reason),
                }
            }
            match last_error {
                Some(reason) if !evaluated => Err(reason),
                _ => Ok(None),
            }
        }
        Predicate::AllOf(children) => {
            let mut first = None;
            for child in children {
                match observe(child, scope)? {
                    Some(observation) => {
                        first.get_or_insert(observation);
                    }
                    None => return Ok(None),
                }
            }
            Ok(first)
        }
        Predicate::Not(inner) => {
            Ok(observe(inner, scope)?.map_or_else(|| Some(Observation::counted(1)), |_| None))
        }
    }
}

/// Catalog patterns are `'static`, so each is compiled once per process.
static COMPILED: LazyLock<Mutex<HashMap<&'static str, Regex>>> = LazyLock::new(Default::default);

fn compile(pattern: &'static str) -> Result<Regex, Unevaluable> {
    if let Some(regex) = COMPILED
        .lock()
        .ok()
        .and_then(|cache| cache.get(pattern).cloned())
    {
        return Ok(regex);
    }

    let regex = Regex::new(pattern).map_err(|err| Unevaluable::Pattern {
        pattern,
        message: err.to_string(),
    })?;
    if let Ok(mut cache) = COMPILED.lock() {
        cache.insert(pattern, regex.clone());
    }
    Ok(regex)
}

const DEFAULT_PLACES: usize = 2;

fn render_note(template: &str, observation: &Observation, context: &EvaluationContext) -> String {
    let mut note = template
        .replace("{count}", &observation.count.to_string())
        .replace("{detail}", observation.detail.as_deref().unwrap_or_default())
        .replace("{years}", &context.years.span());

    // `{value:N}` rounds to N places; plain `{value}` to two.
    for places in 0..=9 {
        let placeholder = format!("{{value:{places}}}");
        if note.contains(&placeholder) {
            note = note.replace(&placeholder, &render_value(observation, places));
        }
    }
    if note.contains("{value}") {
        note = note.replace("{value}", &render_value(observation, DEFAULT_PLACES));
    }
    note
}

fn render_value(observation: &Observation, places: usize) -> String {
    match observation.value {
        Some(value) => rounded(value, places),
        None => observation.count.to_string(),
    }
}

/// Rounded without trailing zeros, keeping one decimal: 4.20 → "4.2", 5 → "5.0".
fn rounded(value: f64, places: usize) -> String {
    let mut text = format!("{value:.places$}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').len();
        text.truncate(trimmed);
        if text.ends_with('.') {
            text.push('0');
        }
    } else {
        text.push_str(".0");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_are_compiled_once() {
        let pattern = r"\bseries [a-d]\b";
        let first = compile(pattern).expect("valid pattern");
        let second = compile(pattern).expect("valid pattern");

        assert_eq!(first.as_str(), second.as_str());
        let cache = COMPILED.lock().expect("cache lock");
        assert!(cache.contains_key(pattern));
    }

    #[test]
    fn broken_patterns_are_not_cached() {
        let pattern = "([never closed";
        assert!(compile(pattern).is_err());
        let cache = COMPILED.lock().expect("cache lock");
        assert!(!cache.contains_key(pattern));
    }

    #[test]
    fn values_drop_trailing_zeros() {
        assert_eq!(rounded(4.2, 2), "4.2");
        assert_eq!(rounded(4.567, 2), "4.57");
        assert_eq!(rounded(4.53, 1), "4.5");
        assert_eq!(rounded(5.0, 2), "5.0");
        assert_eq!(rounded(7.0, 0), "7.0");
    }
}
