#![allow(missing_docs)]

pub mod answers;
pub mod cliente;
pub mod config;
pub mod contacts;
pub mod error;
pub mod matcher;
pub mod outputs;
pub mod report;
pub mod spec;
pub mod store;
pub mod template;
pub mod validate;

pub use answers::AnswerSet;
pub use cliente::ClienteTratativa;
pub use config::{
    ChecklistConfig, ChecklistSettings, OutputSettings, TemplateDraft, UserSettings,
};
pub use contacts::{
    Contact, ContactRow, ContactSummary, RowStatus, contact_lines, extract_contacts, join_emails,
    parse_contact_rows,
};
pub use error::{ConfigError, TemplateError};
pub use matcher::{FallbackCode, MatchOutcome, Template, match_template, match_template_at};
pub use outputs::{GeneratedOutputs, OutputRequest, generate_outputs, generate_outputs_at};
pub use report::{format_answer, format_report, format_report_on};
pub use spec::{QuestionId, QuestionSpec, Section, checklist_questions};
pub use store::{ConfigStore, SubscriptionId};
pub use template::TemplateEngine;
pub use validate::{
    FieldStatus, Progress, ValidationResult, field_status, resolve_option, suggest_options,
    validate,
};
