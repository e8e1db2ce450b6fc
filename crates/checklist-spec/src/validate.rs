use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::answers::AnswerSet;
use crate::spec::{QuestionId, QuestionSpec, checklist_questions};

/// Visual state of one answered (or unanswered) field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    /// Required and unanswered.
    Error,
    /// Optional and unanswered.
    Neutral,
    /// Answered with a value that needs attention.
    Warning,
    Success,
}

/// Answers that are valid but flag the tratativa for attention.
const WARNING_ANSWERS: &[(QuestionId, &str)] = &[
    (QuestionId::ConcorrenteListaNaoContato, "Sim"),
    (QuestionId::CardAprovado, "Não"),
    (QuestionId::NovaTentativa, "Sim, sem retorno"),
];

pub fn field_status(question: &QuestionSpec, answers: &AnswerSet) -> FieldStatus {
    let Some(value) = answers.answered(question.id.as_str()) else {
        return if question.required {
            FieldStatus::Error
        } else {
            FieldStatus::Neutral
        };
    };

    if WARNING_ANSWERS
        .iter()
        .any(|(id, flagged)| *id == question.id && value == *flagged)
    {
        FieldStatus::Warning
    } else {
        FieldStatus::Success
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationResult {
    pub valid: bool,
    pub missing_required: Vec<String>,
    pub warnings: Vec<String>,
    pub unknown_fields: Vec<String>,
    pub progress: Progress,
}

/// Checks an answer set against the checklist catalog.
///
/// Valid means every required question is answered and no unknown keys are
/// present; warnings never make the result invalid.
pub fn validate(answers: &AnswerSet) -> ValidationResult {
    let questions = checklist_questions();

    let mut missing_required = Vec::new();
    let mut warnings = Vec::new();
    let mut answered = 0;

    for question in &questions {
        match field_status(question, answers) {
            FieldStatus::Error => missing_required.push(question.id.to_string()),
            FieldStatus::Warning => {
                warnings.push(question.id.to_string());
                answered += 1;
            }
            FieldStatus::Success => answered += 1,
            FieldStatus::Neutral => {}
        }
    }

    let known: BTreeSet<&str> = questions.iter().map(|question| question.id.as_str()).collect();
    let unknown_fields: Vec<String> = answers
        .keys()
        .filter(|key| !known.contains(key))
        .map(str::to_string)
        .collect();

    let total = questions.len();
    let percentage = if total == 0 {
        0.0
    } else {
        answered as f64 / total as f64 * 100.0
    };

    ValidationResult {
        valid: missing_required.is_empty() && unknown_fields.is_empty(),
        missing_required,
        warnings,
        unknown_fields,
        progress: Progress {
            answered,
            total,
            percentage,
        },
    }
}

/// Option matching the typed input exactly, ignoring case.
pub fn resolve_option(question: &QuestionSpec, input: &str) -> Option<String> {
    let needle = input.to_lowercase();
    question
        .options
        .iter()
        .find(|option| option.to_lowercase() == needle)
        .cloned()
}

/// Options containing the typed input, ignoring case.
pub fn suggest_options<'a>(question: &'a QuestionSpec, input: &str) -> Vec<&'a str> {
    let needle = input.to_lowercase();
    question
        .options
        .iter()
        .filter(|option| option.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: QuestionId) -> QuestionSpec {
        checklist_questions()
            .into_iter()
            .find(|question| question.id == id)
            .expect("catalog question")
    }

    #[test]
    fn unanswered_status_depends_on_required() {
        let answers = AnswerSet::new();
        assert_eq!(
            field_status(&question(QuestionId::Fase), &answers),
            FieldStatus::Error
        );
        assert_eq!(
            field_status(&question(QuestionId::QualEtiqueta), &answers),
            FieldStatus::Neutral
        );
    }

    #[test]
    fn flagged_answers_warn() {
        let answers = AnswerSet::new()
            .with("card_aprovado", "Não")
            .with("nova_tentativa", "Sim, sem retorno")
            .with("concorrente_lista_nao_contato", "Sim")
            .with("temos_hotline", "Não");
        for id in [
            QuestionId::CardAprovado,
            QuestionId::NovaTentativa,
            QuestionId::ConcorrenteListaNaoContato,
        ] {
            assert_eq!(field_status(&question(id), &answers), FieldStatus::Warning);
        }
        assert_eq!(
            field_status(&question(QuestionId::TemosHotline), &answers),
            FieldStatus::Success
        );
    }

    #[test]
    fn validation_reports_missing_and_unknown() {
        let answers = AnswerSet::new().with("fase", "Hotline").with("extra", "x");
        let result = validate(&answers);
        assert!(!result.valid);
        assert!(!result.missing_required.contains(&"fase".to_string()));
        assert!(result.missing_required.contains(&"card_aprovado".to_string()));
        assert_eq!(result.unknown_fields, vec!["extra"]);
        assert_eq!(result.progress.answered, 1);
        assert_eq!(result.progress.total, 14);
    }

    #[test]
    fn complete_required_answers_are_valid() {
        let mut answers = AnswerSet::new();
        for question in checklist_questions().iter().filter(|q| q.required) {
            answers.set(question.id.as_str(), question.options[0].clone());
        }
        let result = validate(&answers);
        assert!(result.valid, "{:?}", result);
        assert_eq!(result.progress.answered, 12);
    }

    #[test]
    fn option_lookup_ignores_case() {
        let fase = question(QuestionId::Fase);
        assert_eq!(resolve_option(&fase, "hotline"), Some("Hotline".into()));
        assert_eq!(resolve_option(&fase, "hot"), None);
        assert_eq!(
            suggest_options(&fase, "tentativa"),
            vec!["1ª Tentativa", "2ª Tentativa", "3ª Tentativa", "Última Tentativa"]
        );
    }
}
