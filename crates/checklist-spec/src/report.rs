use chrono::{Local, NaiveDate};

use crate::answers::AnswerSet;
use crate::contacts::Contact;
use crate::spec::QuestionId;

pub const UNANSWERED: &str = "**[Não respondido]**";
pub const RESPONSIBLE_PLACEHOLDER: &str = "[Nome do responsavel]";
pub const PHASE_PLACEHOLDER: &str = "[Fase]";
pub const CONTACT_PLACEHOLDER: &str = "[Nome do contato] | | [E-mail do contato]";
const DATE_FORMAT: &str = "%d/%m/%Y";

struct ReportSection {
    header: &'static str,
    lines: &'static [(&'static str, QuestionId)],
}

// Fixed checklist order of the pasted comment; independent of the form catalog.
const REPORT_SECTIONS: &[ReportSection] = &[
    ReportSection {
        header: "**Checklist N1:**",
        lines: &[
            ("Card foi aprovado pelo cliente?", QuestionId::CardAprovado),
            (
                "É uma nova tentativa? Se sim, tivemos retorno no e-mail?",
                QuestionId::NovaTentativa,
            ),
            (
                "Existe outro card desse concorrente em fluxo?",
                QuestionId::OutroCard,
            ),
            (
                "Possui etiqueta de Prioridade, Concorrente não quer contato, Tratativa Atendimento ou NE Branddi?",
                QuestionId::PossuiEtiqueta,
            ),
            ("Se sim, qual?", QuestionId::QualEtiqueta),
            ("Temos hotline?", QuestionId::TemosHotline),
        ],
    },
    ReportSection {
        header: "**Checagens no site de OPEC:**",
        lines: &[
            (
                "O site do concorrente ou o garimpo remetem a algum cliente?",
                QuestionId::SiteRemeteCliente,
            ),
            (
                "Conferido na Lista de Clientes da Planilha",
                QuestionId::ConferidoLista,
            ),
            (
                "Se tiver relação, a liderança liberou a tratativa?",
                QuestionId::LiderancaLiberou,
            ),
            (
                "Concorrente está na lista de ❌ Concorrentes para não entrar em contato?",
                QuestionId::ConcorrenteListaNaoContato,
            ),
            (
                "Concorrente está na lista de Agencias Parceiras?",
                QuestionId::AgenciasParceiras,
            ),
        ],
    },
];

/// Bolds an answer, or renders the unanswered placeholder.
pub fn format_answer(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => format!("**{}**", text),
        _ => UNANSWERED.to_string(),
    }
}

/// Renders the report stamped with today's local date.
pub fn format_report(answers: &AnswerSet, contacts: &[Contact], responsible_name: &str) -> String {
    format_report_on(
        answers,
        contacts,
        responsible_name,
        Local::now().date_naive(),
    )
}

pub fn format_report_on(
    answers: &AnswerSet,
    contacts: &[Contact],
    responsible_name: &str,
    date: NaiveDate,
) -> String {
    let responsible = if responsible_name.is_empty() {
        RESPONSIBLE_PLACEHOLDER
    } else {
        responsible_name
    };
    let phase = answers
        .answered(QuestionId::Fase.as_str())
        .unwrap_or(PHASE_PLACEHOLDER);

    let mut lines = vec![
        format!(
            "{} | X tentativa {} enviada em {}",
            responsible,
            phase,
            date.format(DATE_FORMAT)
        ),
        String::new(),
    ];

    for section in REPORT_SECTIONS {
        lines.push(section.header.to_string());
        for (label, id) in section.lines {
            lines.push(format!("{} {}", label, format_answer(answers.question(*id))));
        }
        lines.push(String::new());
    }

    lines.push("**Tratativas**".to_string());
    if contacts.is_empty() {
        lines.push(CONTACT_PLACEHOLDER.to_string());
    } else {
        lines.extend(
            contacts
                .iter()
                .map(|contact| format!("{} | | {}", contact.name, contact.email)),
        );
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}
