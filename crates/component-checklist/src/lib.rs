use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::warn;

use checklist_spec::{
    AnswerSet, ChecklistConfig, ClienteTratativa, ConfigError, ContactSummary, TemplateError,
    checklist_questions, parse_contact_rows, validate,
};

#[derive(Debug, Error)]
enum ComponentError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("failed to parse {0}: {1}")]
    InputParse(&'static str, #[source] serde_json::Error),
    #[error("json encode error: {0}")]
    JsonEncode(#[source] serde_json::Error),
    #[error("{0}")]
    Template(#[from] TemplateError),
}

fn load_config(config_json: &str) -> Result<ChecklistConfig, ComponentError> {
    Ok(ChecklistConfig::from_json(config_json)?)
}

fn parse_answers(answers_json: &str) -> AnswerSet {
    match serde_json::from_str::<Value>(answers_json) {
        Ok(value) => AnswerSet::from_value(&value),
        Err(error) => {
            if !answers_json.trim().is_empty() {
                warn!(%error, "answers are not valid JSON; treating as empty");
            }
            AnswerSet::new()
        }
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Value, ComponentError> {
    serde_json::to_value(value).map_err(ComponentError::JsonEncode)
}

fn respond(result: Result<Value, ComponentError>) -> String {
    match result {
        Ok(value) => serde_json::to_string(&value).unwrap_or_else(|error| {
            json!({"error": format!("json encode: {}", error)}).to_string()
        }),
        Err(err) => json!({ "error": err.to_string() }).to_string(),
    }
}

fn respond_string(result: Result<String, ComponentError>) -> String {
    match result {
        Ok(value) => value,
        Err(err) => json!({ "error": err.to_string() }).to_string(),
    }
}

/// Runs the whole engine: contacts, code, suggestion and comment.
///
/// A blank `config_json` uses the default configuration; unparsable answers
/// are treated as an empty answer set.
pub fn generate_outputs(answers_json: &str, raw_contact_text: &str, config_json: &str) -> String {
    respond(load_config(config_json).and_then(|config| {
        let answers = parse_answers(answers_json);
        let outputs = config.generate(&answers, raw_contact_text);
        let mut value = encode(&outputs)?;
        value["emails"] = Value::String(outputs.emails());
        Ok(value)
    }))
}

pub fn extract_contacts(raw_contact_text: &str) -> String {
    respond(encode(&checklist_spec::extract_contacts(raw_contact_text)))
}

#[derive(Serialize)]
struct ContactTable {
    rows: Vec<TableRow>,
    summary: ContactSummary,
}

#[derive(Serialize)]
struct TableRow {
    columns: Vec<String>,
    status: &'static str,
    name: String,
    email: String,
}

/// Row-by-row view of the pasted text with valid/ignored counters.
pub fn contact_table(raw_contact_text: &str) -> String {
    let rows = parse_contact_rows(raw_contact_text);
    let summary = ContactSummary::from_rows(&rows);
    let rows = rows
        .into_iter()
        .map(|row| TableRow {
            status: row.status().as_str(),
            columns: row.columns,
            name: row.name,
            email: row.email,
        })
        .collect();
    respond(encode(&ContactTable { rows, summary }))
}

pub fn validate_answers(answers_json: &str) -> String {
    respond(encode(&validate(&parse_answers(answers_json))))
}

pub fn describe_questions() -> String {
    respond(encode(&checklist_questions()))
}

pub fn default_config() -> String {
    respond(encode(&ChecklistConfig::default()))
}

#[derive(Debug, Deserialize, Default)]
struct ClienteRequest {
    #[serde(flatten)]
    tratativa: ClienteTratativa,
    #[serde(default)]
    template: Option<String>,
}

fn cliente_text(tratativa_json: &str, with_link: bool) -> Result<String, ComponentError> {
    let request: ClienteRequest = if tratativa_json.trim().is_empty() {
        ClienteRequest::default()
    } else {
        serde_json::from_str(tratativa_json)
            .map_err(|error| ComponentError::InputParse("tratativa", error))?
    };
    let text = match (&request.template, with_link) {
        (Some(template), _) => request.tratativa.render_with(template)?,
        (None, true) => request.tratativa.comment_with_link()?,
        (None, false) => request.tratativa.formatted_text()?,
    };
    Ok(text)
}

/// Renders the cliente x cliente text; an optional `template` field in the
/// request overrides the built-in layout.
pub fn render_cliente(tratativa_json: &str, with_link: bool) -> String {
    respond_string(cliente_text(tratativa_json, with_link))
}
