use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::answers::AnswerSet;
use crate::error::ConfigError;
use crate::matcher::{DEFAULT_CODE_FORMAT, DEFAULT_CODE_PREFIX, FallbackCode, Template};
use crate::outputs::{GeneratedOutputs, OutputRequest};

/// Settings of the agent filling the checklist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// Responsible name stamped on the report header.
    #[serde(default)]
    pub nome: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ChecklistSettings {
    pub auto_save: bool,
    pub show_progress: bool,
    pub require_all_fields: bool,
    pub enable_keyboard_nav: bool,
}

impl Default for ChecklistSettings {
    fn default() -> Self {
        Self {
            auto_save: true,
            show_progress: true,
            require_all_fields: false,
            enable_keyboard_nav: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputSettings {
    pub code_prefix: String,
    pub code_format: String,
    pub default_comment: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            code_prefix: DEFAULT_CODE_PREFIX.into(),
            code_format: DEFAULT_CODE_FORMAT.into(),
            default_comment: "Checklist concluído".into(),
        }
    }
}

fn default_templates() -> Vec<Template> {
    vec![Template {
        id: "1".into(),
        name: "Hotline Aprovado".into(),
        conditions: BTreeMap::from([
            ("fase".to_string(), "Hotline".to_string()),
            ("card_aprovado".to_string(), "Sim".to_string()),
            ("temos_hotline".to_string(), "Sim".to_string()),
        ]),
        code: "HTSPT1".into(),
        comment: "Enviar ciclo 1 de hotline".into(),
    }]
}

/// The exported configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistConfig {
    #[serde(default)]
    pub user_settings: UserSettings,
    #[serde(default)]
    pub checklist_settings: ChecklistSettings,
    #[serde(default)]
    pub output_settings: OutputSettings,
    /// Ordered; the first matching template wins.
    #[serde(default = "default_templates")]
    pub templates: Vec<Template>,
}

impl Default for ChecklistConfig {
    fn default() -> Self {
        Self {
            user_settings: UserSettings::default(),
            checklist_settings: ChecklistSettings::default(),
            output_settings: OutputSettings::default(),
            templates: default_templates(),
        }
    }
}

/// A template being composed before it is added or saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TemplateDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub conditions: BTreeMap<String, String>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub comment: String,
}

impl TemplateDraft {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn with_condition(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.insert(field.into(), value.into());
        self
    }

    pub fn without_condition(mut self, field: &str) -> Self {
        self.conditions.remove(field);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

fn require_name_and_code(name: &str, code: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::MissingField("name"));
    }
    if code.is_empty() {
        return Err(ConfigError::MissingField("code"));
    }
    Ok(())
}

impl ChecklistConfig {
    /// Parses an exported document; blank input yields the defaults and
    /// missing sections fall back to their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(text).map_err(ConfigError::Parse)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Encode)
    }

    /// File name used when exporting the configuration on `date`.
    pub fn export_file_name(date: NaiveDate) -> String {
        format!("checklist-config-{}.json", date.format("%Y-%m-%d"))
    }

    pub fn responsible_name(&self) -> &str {
        &self.user_settings.nome
    }

    pub fn fallback_code(&self) -> FallbackCode {
        FallbackCode::new(
            self.output_settings.code_prefix.clone(),
            self.output_settings.code_format.clone(),
        )
    }

    pub fn template(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|template| template.id == id)
    }

    /// Appends a template built from `draft` and returns it.
    pub fn add_template(&mut self, draft: TemplateDraft) -> Result<&Template, ConfigError> {
        require_name_and_code(&draft.name, &draft.code)?;

        let mut stamp = Utc::now().timestamp_millis();
        while self.template(&stamp.to_string()).is_some() {
            stamp += 1;
        }

        let template = Template {
            id: stamp.to_string(),
            name: draft.name,
            conditions: draft.conditions,
            code: draft.code,
            comment: draft.comment,
        };
        info!(id = %template.id, code = %template.code, "template added");
        self.templates.push(template);
        let index = self.templates.len() - 1;
        Ok(&self.templates[index])
    }

    /// Replaces the template with the same id, keeping its position.
    pub fn update_template(&mut self, template: Template) -> Result<(), ConfigError> {
        require_name_and_code(&template.name, &template.code)?;
        let slot = self
            .templates
            .iter_mut()
            .find(|existing| existing.id == template.id)
            .ok_or_else(|| ConfigError::UnknownTemplate(template.id.clone()))?;
        info!(id = %template.id, "template updated");
        *slot = template;
        Ok(())
    }

    pub fn remove_template(&mut self, id: &str) -> bool {
        let before = self.templates.len();
        self.templates.retain(|template| template.id != id);
        let removed = self.templates.len() != before;
        if removed {
            info!(id, "template removed");
        }
        removed
    }

    /// Runs the engine with this configuration's templates, responsible name
    /// and fallback code.
    pub fn generate(&self, answers: &AnswerSet, raw_contact_text: &str) -> GeneratedOutputs {
        OutputRequest::from_config(self, answers, raw_contact_text).generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_json_yields_defaults() {
        let config = ChecklistConfig::from_json("  ").expect("defaults");
        assert_eq!(config, ChecklistConfig::default());
        assert_eq!(config.templates[0].code, "HTSPT1");
        assert_eq!(config.output_settings.code_prefix, "CHK");
    }

    #[test]
    fn partial_document_merges_with_defaults() {
        let config = ChecklistConfig::from_json(
            r#"{"userSettings":{"nome":"Ana"},"outputSettings":{"codePrefix":"N1"}}"#,
        )
        .expect("parse");
        assert_eq!(config.responsible_name(), "Ana");
        assert_eq!(config.output_settings.code_prefix, "N1");
        assert_eq!(config.output_settings.code_format, DEFAULT_CODE_FORMAT);
        assert!(config.checklist_settings.auto_save);
        assert_eq!(config.templates.len(), 1);
    }

    #[test]
    fn explicit_empty_templates_are_kept() {
        let config = ChecklistConfig::from_json(r#"{"templates":[]}"#).expect("parse");
        assert!(config.templates.is_empty());
    }

    #[test]
    fn imported_template_without_id_keeps_the_document() {
        let config = ChecklistConfig::from_json(
            r#"{"templates":[{"code":"A1"},{"id":"2","name":"Dois","code":"B2"}]}"#,
        )
        .expect("parse");
        assert_eq!(config.templates.len(), 2);
        assert_eq!(config.templates[0].code, "A1");
        assert_eq!(config.templates[0].id, "");
        assert_eq!(config.template("2").map(|t| t.name.as_str()), Some("Dois"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            ChecklistConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn export_round_trips() {
        let config = ChecklistConfig::default();
        let json = config.to_json_pretty().expect("encode");
        assert!(json.contains("\"userSettings\""));
        assert!(json.contains("\"codeFormat\""));
        assert_eq!(ChecklistConfig::from_json(&json).expect("parse"), config);
    }

    #[test]
    fn export_file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).expect("date");
        assert_eq!(
            ChecklistConfig::export_file_name(date),
            "checklist-config-2024-03-05.json"
        );
    }

    #[test]
    fn add_template_requires_name_and_code() {
        let mut config = ChecklistConfig::default();
        assert!(matches!(
            config.add_template(TemplateDraft::new("", "X")),
            Err(ConfigError::MissingField("name"))
        ));
        assert!(matches!(
            config.add_template(TemplateDraft::new("X", "")),
            Err(ConfigError::MissingField("code"))
        ));
        assert_eq!(config.templates.len(), 1);
    }

    #[test]
    fn added_templates_get_unique_ids_and_append() {
        let mut config = ChecklistConfig::default();
        let first = config
            .add_template(
                TemplateDraft::new("Rejeitado", "REJ1")
                    .with_condition("card_aprovado", "Não")
                    .with_condition("fase", "Hotline")
                    .without_condition("fase"),
            )
            .expect("add")
            .id
            .clone();
        let second = config
            .add_template(TemplateDraft::new("Outro", "OUT1"))
            .expect("add")
            .id
            .clone();
        assert_ne!(first, second);
        assert_eq!(config.templates.len(), 3);
        assert_eq!(config.templates[1].code, "REJ1");
        assert_eq!(config.templates[1].conditions.len(), 1);
        assert_eq!(config.templates[1].comment, "");
    }

    #[test]
    fn update_and_remove_templates() {
        let mut config = ChecklistConfig::default();
        let mut edited = config.templates[0].clone();
        edited.code = "HTSPT2".into();
        config.update_template(edited).expect("update");
        assert_eq!(config.templates[0].code, "HTSPT2");

        let mut unknown = config.templates[0].clone();
        unknown.id = "missing".into();
        assert!(matches!(
            config.update_template(unknown),
            Err(ConfigError::UnknownTemplate(_))
        ));

        assert!(config.remove_template("1"));
        assert!(!config.remove_template("1"));
        assert!(config.templates.is_empty());
    }
}
