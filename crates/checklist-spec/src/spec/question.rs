use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stable identifiers of the checklist questions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum QuestionId {
    Fase,
    CardAprovado,
    NovaTentativa,
    OutroCard,
    PossuiEtiqueta,
    QualEtiqueta,
    TemosHotline,
    SiteRemeteCliente,
    ConferidoLista,
    LiderancaLiberou,
    ConcorrenteListaNaoContato,
    AgenciasParceiras,
    PossuiPrint,
    Idioma,
}

impl QuestionId {
    pub const ALL: [QuestionId; 14] = [
        QuestionId::Fase,
        QuestionId::CardAprovado,
        QuestionId::NovaTentativa,
        QuestionId::OutroCard,
        QuestionId::PossuiEtiqueta,
        QuestionId::QualEtiqueta,
        QuestionId::TemosHotline,
        QuestionId::SiteRemeteCliente,
        QuestionId::ConferidoLista,
        QuestionId::LiderancaLiberou,
        QuestionId::ConcorrenteListaNaoContato,
        QuestionId::AgenciasParceiras,
        QuestionId::PossuiPrint,
        QuestionId::Idioma,
    ];

    /// Answer-set key for this question.
    pub const fn as_str(&self) -> &'static str {
        match self {
            QuestionId::Fase => "fase",
            QuestionId::CardAprovado => "card_aprovado",
            QuestionId::NovaTentativa => "nova_tentativa",
            QuestionId::OutroCard => "outro_card",
            QuestionId::PossuiEtiqueta => "possui_etiqueta",
            QuestionId::QualEtiqueta => "qual_etiqueta",
            QuestionId::TemosHotline => "temos_hotline",
            QuestionId::SiteRemeteCliente => "site_remete_cliente",
            QuestionId::ConferidoLista => "conferido_lista",
            QuestionId::LiderancaLiberou => "lideranca_liberou",
            QuestionId::ConcorrenteListaNaoContato => "concorrente_lista_nao_contato",
            QuestionId::AgenciasParceiras => "agencias_parceiras",
            QuestionId::PossuiPrint => "possui_print",
            QuestionId::Idioma => "idioma",
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionId {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        QuestionId::ALL
            .into_iter()
            .find(|id| id.as_str() == raw)
            .ok_or_else(|| format!("unknown question id '{}'", raw))
    }
}

/// Form sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Section {
    Fase,
    N1,
    #[serde(rename = "OPEC")]
    Opec,
    Linguagem,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Fase => "Fase",
            Section::N1 => "Checklist N1",
            Section::Opec => "Checagens no site de OPEC",
            Section::Linguagem => "Linguagem",
        }
    }
}

/// One checklist question as shown by the form layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionSpec {
    pub id: QuestionId,
    pub question: String,
    /// Short name used when picking template conditions.
    pub label: String,
    pub options: Vec<String>,
    pub section: Section,
    #[serde(default)]
    pub required: bool,
}

impl QuestionSpec {
    fn new(
        id: QuestionId,
        question: &str,
        label: &str,
        options: &[&str],
        section: Section,
        required: bool,
    ) -> Self {
        Self {
            id,
            question: question.into(),
            label: label.into(),
            options: options.iter().map(|option| option.to_string()).collect(),
            section,
            required,
        }
    }
}

const SIM_NAO: &[&str] = &["Sim", "Não"];

/// The checklist catalog in display order.
pub fn checklist_questions() -> Vec<QuestionSpec> {
    use QuestionId as Q;
    use Section as S;

    vec![
        QuestionSpec::new(
            Q::Fase,
            "Fase",
            "Fase",
            &[
                "Hotline",
                "1ª Tentativa",
                "2ª Tentativa",
                "3ª Tentativa",
                "Última Tentativa",
                "Prioridade",
                "Mediação",
                "Notificação Extrajudicial",
                "Tratativas Especiais",
                "Gerenciamento de Parceiros",
            ],
            S::Fase,
            true,
        ),
        QuestionSpec::new(
            Q::CardAprovado,
            "Card foi aprovado pelo cliente?",
            "Card foi aprovado pelo cliente?",
            SIM_NAO,
            S::N1,
            true,
        ),
        QuestionSpec::new(
            Q::NovaTentativa,
            "É uma nova tentativa? Se sim, tivemos retorno no e-mail?",
            "É uma nova tentativa?",
            &["Sim, com retorno", "Não", "Sim, sem retorno"],
            S::N1,
            true,
        ),
        QuestionSpec::new(
            Q::OutroCard,
            "Existe outro card desse concorrente em fluxo?",
            "Existe outro card desse concorrente em fluxo?",
            SIM_NAO,
            S::N1,
            true,
        ),
        QuestionSpec::new(
            Q::PossuiEtiqueta,
            "Possui etiqueta de Prioridade, Concorrente não quer contato, Tratativa Atendimento ou NE Branddi?",
            "Possui etiqueta especial?",
            SIM_NAO,
            S::N1,
            true,
        ),
        QuestionSpec::new(
            Q::QualEtiqueta,
            "Se sim, qual?",
            "Qual etiqueta?",
            &[
                "Prioridade",
                "Concorrente não quer contato",
                "Tratativa Atendimento",
                "NE Branddi",
                "N/A",
            ],
            S::N1,
            false,
        ),
        QuestionSpec::new(
            Q::TemosHotline,
            "Temos hotline?",
            "Temos hotline?",
            SIM_NAO,
            S::N1,
            true,
        ),
        QuestionSpec::new(
            Q::SiteRemeteCliente,
            "O site do concorrente ou o garimpo remetem a algum cliente?",
            "Site remete a algum cliente?",
            SIM_NAO,
            S::Opec,
            true,
        ),
        QuestionSpec::new(
            Q::ConferidoLista,
            "Conferido na Lista de Clientes da Planilha",
            "Conferido na Lista de Clientes?",
            SIM_NAO,
            S::Opec,
            true,
        ),
        QuestionSpec::new(
            Q::LiderancaLiberou,
            "Se tiver relação, a liderança liberou a tratativa?",
            "Liderança liberou a tratativa?",
            &["Sim", "Não", "N/A"],
            S::Opec,
            false,
        ),
        QuestionSpec::new(
            Q::ConcorrenteListaNaoContato,
            "Concorrente está na lista de ❌ Concorrentes para não entrar em contato?",
            "Concorrente na lista de não contato?",
            SIM_NAO,
            S::Opec,
            true,
        ),
        QuestionSpec::new(
            Q::AgenciasParceiras,
            "Concorrente está na lista de Agencias Parceiras?",
            "Concorrente na lista de Agências Parceiras?",
            SIM_NAO,
            S::Opec,
            true,
        ),
        QuestionSpec::new(
            Q::PossuiPrint,
            "Possui print?",
            "Possui print?",
            SIM_NAO,
            S::Linguagem,
            true,
        ),
        QuestionSpec::new(
            Q::Idioma,
            "Idioma",
            "Idioma",
            &["🇧🇷 Português", "🇺🇸 Inglês", "🇪🇸 Espanhol"],
            S::Linguagem,
            true,
        ),
    ]
}
