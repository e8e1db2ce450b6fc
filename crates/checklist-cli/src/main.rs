mod logging;

use checklist_spec::{
    AnswerSet, ChecklistConfig, ContactSummary, GeneratedOutputs, ValidationResult,
    parse_contact_rows, validate,
};
use clap::{Parser, Subcommand, ValueEnum};
use component_checklist::{describe_questions, render_cliente};
use logging::{LogConfig, init_logging};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "N1 checklist helper",
    long_about = "Generates tratativa codes, comments and contact lists from checklist answers and pasted contact tables"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ContactFormat {
    Text,
    Json,
    Table,
}

#[derive(Subcommand)]
enum Command {
    /// Generate code, suggestion, comment and contacts from answers.
    Generate {
        /// JSON object of question id -> answer.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
        /// Pasted contact table; `-` reads stdin.
        #[arg(long, value_name = "CONTACTS")]
        contacts: Option<PathBuf>,
        /// Exported configuration JSON (defaults when omitted).
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,
        /// Overrides the responsible name from the configuration.
        #[arg(long, value_name = "NAME")]
        responsible: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Extract contacts from a pasted table.
    Contacts {
        /// Pasted contact table; `-` reads stdin.
        #[arg(long, value_name = "INPUT")]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = ContactFormat::Text)]
        format: ContactFormat,
    },
    /// Check answers against the checklist questions.
    Validate {
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
    /// Print the checklist questions as JSON.
    Questions,
    /// Inspect configuration documents.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Render the cliente x cliente tratativa text.
    Cliente {
        /// JSON with the tratativa fields (camelCase).
        #[arg(long, value_name = "INPUT")]
        input: PathBuf,
        /// Append the card link.
        #[arg(long)]
        with_link: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the default configuration.
    Default,
    /// Print the JSON schema of the configuration document.
    Schema,
    /// Parse a configuration file and summarise its templates.
    Check {
        #[arg(value_name = "CONFIG")]
        path: PathBuf,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose));

    match cli.command {
        Command::Generate {
            answers,
            contacts,
            config,
            responsible,
            format,
        } => run_generate(&answers, contacts.as_deref(), config.as_deref(), responsible, format),
        Command::Contacts { input, format } => run_contacts(&input, format),
        Command::Validate { answers } => run_validate(&answers),
        Command::Questions => {
            println!("{}", pretty(&describe_questions())?);
            Ok(())
        }
        Command::Config { action } => run_config(action),
        Command::Cliente { input, with_link } => run_cliente(&input, with_link),
    }
}

fn read_input(path: &Path) -> CliResult<String> {
    if path.as_os_str() == "-" {
        debug!("reading input from stdin");
        Ok(io::read_to_string(io::stdin())?)
    } else {
        debug!(path = %path.display(), "reading input file");
        Ok(fs::read_to_string(path)?)
    }
}

fn read_answers(path: &Path) -> CliResult<AnswerSet> {
    let value: Value = serde_json::from_str(&read_input(path)?)?;
    if !value.is_object() {
        return Err("answers must be a JSON object of question id -> value".into());
    }
    Ok(AnswerSet::from_value(&value))
}

fn load_config(path: Option<&Path>) -> CliResult<ChecklistConfig> {
    match path {
        Some(path) => Ok(ChecklistConfig::from_json(&read_input(path)?)?),
        None => Ok(ChecklistConfig::default()),
    }
}

fn pretty(json: &str) -> CliResult<String> {
    let value: Value = serde_json::from_str(json)?;
    if let Some(error) = value.get("error").and_then(Value::as_str) {
        return Err(error.to_string().into());
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

fn run_generate(
    answers_path: &Path,
    contacts_path: Option<&Path>,
    config_path: Option<&Path>,
    responsible: Option<String>,
    format: OutputFormat,
) -> CliResult<()> {
    let answers = read_answers(answers_path)?;
    let raw_contacts = match contacts_path {
        Some(path) => read_input(path)?,
        None => String::new(),
    };
    let mut config = load_config(config_path)?;
    if let Some(name) = responsible {
        config.user_settings.nome = name;
    }

    let outputs = config.generate(&answers, &raw_contacts);
    info!(
        code = %outputs.code,
        contacts = outputs.contacts.len(),
        "outputs generated"
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outputs)?),
        OutputFormat::Text => print_outputs(&outputs),
    }
    Ok(())
}

fn print_outputs(outputs: &GeneratedOutputs) {
    println!("Code: {}", outputs.code);
    println!("Suggestion: {}", outputs.suggestion);
    if outputs.contacts.is_empty() {
        println!("Emails: Nenhum contato extraído");
    } else {
        println!("Emails: {}", outputs.emails());
    }
    println!("Comment:");
    print!("{}", outputs.comment);
}

fn run_contacts(input: &Path, format: ContactFormat) -> CliResult<()> {
    let raw = read_input(input)?;
    match format {
        ContactFormat::Json => println!("{}", pretty(&component_checklist::extract_contacts(&raw))?),
        ContactFormat::Text => {
            for contact in checklist_spec::extract_contacts(&raw) {
                println!("{} - {}", contact.name, contact.email);
            }
        }
        ContactFormat::Table => {
            let rows = parse_contact_rows(&raw);
            for row in &rows {
                println!("{}\t{}", row.status().as_str(), row.columns.join("\t"));
            }
            let summary = ContactSummary::from_rows(&rows);
            println!(
                "{} valid, {} ignored, {} rows",
                summary.valid, summary.ignored, summary.total
            );
        }
    }
    Ok(())
}

fn run_validate(answers_path: &Path) -> CliResult<()> {
    let answers = read_answers(answers_path)?;
    let result = validate(&answers);
    println!(
        "Validation result: {}",
        if result.valid { "valid" } else { "invalid" }
    );
    describe_validation(&result);

    if result.valid {
        Ok(())
    } else {
        Err("validation failed".into())
    }
}

fn describe_validation(result: &ValidationResult) {
    println!(
        "Progress: {}/{} ({:.0}%)",
        result.progress.answered, result.progress.total, result.progress.percentage
    );
    if !result.missing_required.is_empty() {
        println!(
            "Missing required answers: {}",
            result.missing_required.join(", ")
        );
    }
    if !result.warnings.is_empty() {
        println!("Answers needing attention: {}", result.warnings.join(", "));
    }
    if !result.unknown_fields.is_empty() {
        println!(
            "Unknown answer fields: {}",
            result.unknown_fields.join(", ")
        );
    }
}

fn run_config(action: ConfigAction) -> CliResult<()> {
    match action {
        ConfigAction::Default => println!("{}", ChecklistConfig::default().to_json_pretty()?),
        ConfigAction::Schema => {
            let schema = schemars::schema_for!(ChecklistConfig);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        ConfigAction::Check { path } => {
            let config = load_config(Some(&path))?;
            println!("Configuration OK: {} template(s)", config.templates.len());
            for (index, template) in config.templates.iter().enumerate() {
                let conditions = if template.conditions.is_empty() {
                    "(any answers)".to_string()
                } else {
                    template
                        .conditions
                        .iter()
                        .map(|(key, value)| format!("{}={}", key, value))
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                println!(
                    "  {}. {} [{}] -> {}",
                    index + 1,
                    template.name,
                    conditions,
                    template.code
                );
            }
        }
    }
    Ok(())
}

fn run_cliente(input: &Path, with_link: bool) -> CliResult<()> {
    let request = read_input(input)?;
    let text = render_cliente(&request, with_link);
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&text)
        && let Some(error) = map.get("error").and_then(Value::as_str)
    {
        return Err(error.to_string().into());
    }
    println!("{}", text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn read_answers_rejects_non_objects() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("answers.json");
        fs::write(&path, "[1, 2]").expect("write");
        assert!(read_answers(&path).is_err());

        fs::write(&path, r#"{"fase":"Hotline"}"#).expect("write");
        let answers = read_answers(&path).expect("answers");
        assert_eq!(answers.get("fase"), Some("Hotline"));
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        let config = load_config(None).expect("defaults");
        assert_eq!(config, ChecklistConfig::default());
    }

    #[test]
    fn pretty_surfaces_component_errors() {
        assert!(pretty(r#"{"error":"boom"}"#).is_err());
        assert!(pretty(r#"[1]"#).is_ok());
    }
}
