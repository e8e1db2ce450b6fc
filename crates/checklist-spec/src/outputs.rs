use chrono::{Local, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::answers::AnswerSet;
use crate::config::ChecklistConfig;
use crate::contacts::{Contact, extract_contacts, join_emails};
use crate::matcher::{FallbackCode, Template, match_with_fallback};
use crate::report::format_report_on;

/// Snapshot returned for one set of inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GeneratedOutputs {
    pub code: String,
    pub suggestion: String,
    pub comment: String,
    pub contacts: Vec<Contact>,
    /// Id of the template that produced `code`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_template: Option<String>,
}

impl GeneratedOutputs {
    pub fn matched(&self) -> bool {
        self.matched_template.is_some()
    }

    /// Contact emails joined with `"; "`.
    pub fn emails(&self) -> String {
        join_emails(&self.contacts)
    }
}

/// Inputs of one engine run.
#[derive(Debug, Clone)]
pub struct OutputRequest<'a> {
    pub answers: &'a AnswerSet,
    pub raw_contact_text: &'a str,
    pub templates: &'a [Template],
    pub responsible_name: &'a str,
    pub fallback: FallbackCode,
}

impl<'a> OutputRequest<'a> {
    pub fn new(
        answers: &'a AnswerSet,
        raw_contact_text: &'a str,
        templates: &'a [Template],
        responsible_name: &'a str,
    ) -> Self {
        Self {
            answers,
            raw_contact_text,
            templates,
            responsible_name,
            fallback: FallbackCode::default(),
        }
    }

    pub fn from_config(
        config: &'a ChecklistConfig,
        answers: &'a AnswerSet,
        raw_contact_text: &'a str,
    ) -> Self {
        Self {
            answers,
            raw_contact_text,
            templates: &config.templates,
            responsible_name: config.responsible_name(),
            fallback: config.fallback_code(),
        }
    }

    pub fn with_fallback(mut self, fallback: FallbackCode) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn generate(&self) -> GeneratedOutputs {
        self.generate_at(Local::now().naive_local())
    }

    /// Runs extraction, matching and formatting against a fixed clock.
    pub fn generate_at(&self, now: NaiveDateTime) -> GeneratedOutputs {
        let contacts = extract_contacts(self.raw_contact_text);
        let outcome = match_with_fallback(self.answers, self.templates, &self.fallback, now);
        let comment = format_report_on(self.answers, &contacts, self.responsible_name, now.date());
        debug!(
            contacts = contacts.len(),
            matched = outcome.matched,
            "generated checklist outputs"
        );

        GeneratedOutputs {
            code: outcome.code,
            suggestion: outcome.suggestion,
            comment,
            contacts,
            matched_template: outcome.template_id,
        }
    }
}

/// Extracts contacts, matches templates and renders the report in one call.
pub fn generate_outputs(
    answers: &AnswerSet,
    raw_contact_text: &str,
    templates: &[Template],
    responsible_name: &str,
) -> GeneratedOutputs {
    OutputRequest::new(answers, raw_contact_text, templates, responsible_name).generate()
}

pub fn generate_outputs_at(
    answers: &AnswerSet,
    raw_contact_text: &str,
    templates: &[Template],
    responsible_name: &str,
    now: NaiveDateTime,
) -> GeneratedOutputs {
    OutputRequest::new(answers, raw_contact_text, templates, responsible_name).generate_at(now)
}
