use std::collections::BTreeMap;

use chrono::{Local, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::answers::AnswerSet;
use crate::spec::QuestionId;

/// Suggestion used when no template matches the answers.
pub const NO_MATCH_SUGGESTION: &str =
    "Nenhum template correspondente encontrado. Configure templates na aba Configuração.";

pub const DEFAULT_CODE_PREFIX: &str = "CHK";
pub const DEFAULT_CODE_FORMAT: &str = "{prefix}_{status}_{timestamp}";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const APPROVED_VALUE: &str = "Sim";

/// A named condition set plus the code and comment emitted when it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Template {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub conditions: BTreeMap<String, String>,
    pub code: String,
    #[serde(default)]
    pub comment: String,
}

impl Template {
    /// True when every condition equals the stored answer exactly.
    ///
    /// A template without conditions matches any answer set.
    pub fn matches(&self, answers: &AnswerSet) -> bool {
        self.conditions
            .iter()
            .all(|(key, expected)| answers.get(key) == Some(expected.as_str()))
    }
}

/// Result of running the templates against an answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MatchOutcome {
    pub code: String,
    pub suggestion: String,
    pub matched: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

/// Shape of the code generated when nothing matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackCode {
    pub prefix: String,
    /// Supports the `{prefix}`, `{status}` and `{timestamp}` placeholders.
    pub format: String,
}

impl Default for FallbackCode {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_CODE_PREFIX.into(),
            format: DEFAULT_CODE_FORMAT.into(),
        }
    }
}

impl FallbackCode {
    pub fn new(prefix: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            format: format.into(),
        }
    }

    pub fn render(&self, answers: &AnswerSet, now: NaiveDateTime) -> String {
        let status = if answers.question(QuestionId::CardAprovado) == Some(APPROVED_VALUE) {
            "APR"
        } else {
            "REJ"
        };
        let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
        self.format
            .replace("{prefix}", &self.prefix)
            .replace("{status}", status)
            .replace("{timestamp}", &timestamp)
    }
}

/// Matches against the current local time with the default fallback code.
pub fn match_template(answers: &AnswerSet, templates: &[Template]) -> MatchOutcome {
    match_template_at(answers, templates, Local::now().naive_local())
}

pub fn match_template_at(
    answers: &AnswerSet,
    templates: &[Template],
    now: NaiveDateTime,
) -> MatchOutcome {
    match_with_fallback(answers, templates, &FallbackCode::default(), now)
}

/// First template whose conditions all hold wins; later templates are never
/// consulted once one matches.
pub fn match_with_fallback(
    answers: &AnswerSet,
    templates: &[Template],
    fallback: &FallbackCode,
    now: NaiveDateTime,
) -> MatchOutcome {
    if let Some(template) = templates.iter().find(|template| template.matches(answers)) {
        debug!(template = %template.id, code = %template.code, "template matched");
        return MatchOutcome {
            code: template.code.clone(),
            suggestion: template.comment.clone(),
            matched: true,
            template_id: Some(template.id.clone()),
        };
    }

    let code = fallback.render(answers, now);
    debug!(templates = templates.len(), %code, "no template matched; using fallback code");
    MatchOutcome {
        code,
        suggestion: NO_MATCH_SUGGESTION.into(),
        matched: false,
        template_id: None,
    }
}
