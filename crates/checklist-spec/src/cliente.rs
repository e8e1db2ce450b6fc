use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::TemplateError;
use crate::template::TemplateEngine;

pub const PRINT_NOT_PROVIDED: &str = "Não fornecido";
pub const PRINT_ATTACHED: &str = "Anexado";
pub const CARD_LINK_BASE: &str = "https://app.pipefy.com/open-cards/";

/// Default body of the cliente x cliente tratativa.
pub const CLIENTE_TEMPLATE: &str = "Tratativa Cliente x Cliente

Cliente que solicita a negativação: {{fallback clienteSolicitante \"[A]\"}}
Ex-Cliente que precisa negativar: {{fallback exClienteNegativar \"[B]\"}}
Plataforma: {{fallback plataforma \"[plataforma de ocorrência]\"}}
Print de Boa fé: {{printBoaFe}}

Descrição da solicitação
Solicitar ao ex-cliente {{fallback exClienteNegativar \"[B]\"}} que negative os termos do cliente {{fallback clienteSolicitante \"[A]\"}}
E tambem, realize a Exclusão da marca {{fallback marcaExcluir \"[C]\"}} das campanhas ativas na plataforma mencionada.

Detalhamento:
{{fallback detalhamento \"[Aguardando detalhamento]\"}}

Código do form: {{fallback codigoForm \"[Código não informado]\"}}";

const LINK_TEMPLATE: &str = "\n\nLink do card: {{base}}{{fallback codigoForm \"[CÓDIGO]\"}}";

fn default_print() -> String {
    PRINT_NOT_PROVIDED.into()
}

/// Fields of a client-versus-former-client negativation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClienteTratativa {
    /// Client asking for the negativation (A).
    #[serde(default)]
    pub cliente_solicitante: String,
    /// Former client that must negativate (B).
    #[serde(default)]
    pub ex_cliente_negativar: String,
    #[serde(default)]
    pub plataforma: String,
    #[serde(default = "default_print")]
    pub print_boa_fe: String,
    /// Brand to exclude from active campaigns (C).
    #[serde(default)]
    pub marca_excluir: String,
    #[serde(default)]
    pub detalhamento: String,
    #[serde(default)]
    pub codigo_form: String,
}

impl Default for ClienteTratativa {
    fn default() -> Self {
        Self {
            cliente_solicitante: String::new(),
            ex_cliente_negativar: String::new(),
            plataforma: String::new(),
            print_boa_fe: default_print(),
            marca_excluir: String::new(),
            detalhamento: String::new(),
            codigo_form: String::new(),
        }
    }
}

#[derive(Serialize)]
struct LinkContext<'a> {
    base: &'static str,
    #[serde(rename = "codigoForm")]
    codigo_form: &'a str,
}

impl ClienteTratativa {
    /// Renders the default tratativa text.
    pub fn formatted_text(&self) -> Result<String, TemplateError> {
        self.render_with(CLIENTE_TEMPLATE)
    }

    /// Renders the default text followed by the card link.
    pub fn comment_with_link(&self) -> Result<String, TemplateError> {
        let engine = TemplateEngine::new();
        let mut text = engine.render_source(CLIENTE_TEMPLATE, self)?;
        text.push_str(&engine.render_source(
            LINK_TEMPLATE,
            &LinkContext {
                base: CARD_LINK_BASE,
                codigo_form: &self.codigo_form,
            },
        )?);
        Ok(text)
    }

    /// Renders a caller-supplied template against the camelCase fields.
    pub fn render_with(&self, template: &str) -> Result<String, TemplateError> {
        TemplateEngine::new().render_source(template, self)
    }
}
