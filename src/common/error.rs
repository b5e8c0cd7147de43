// src/common/error.rs

use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    // Validação local: bloqueia o envio e nunca chega na rede
    #[error("{0}")]
    Validation(String),

    #[error("Erro de validação")]
    ValidationErrors(#[from] validator::ValidationErrors),

    // O backend respondeu com status != 2xx
    #[error("Erro do servidor (HTTP {status})")]
    Backend {
        status: u16,
        message: Option<String>,
    },

    #[error("Falha de comunicação com o servidor: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Resposta inválida do servidor: {0}")]
    Serialization(#[from] serde_json::Error),

    // Falha "suave": consulta sem resultados (ex: holerite sem viagens)
    #[error("{0}")]
    NoData(String),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro ao gerar PDF: {0}")]
    Pdf(String),

    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Mensagem enviada pelo backend (`response.data.message`), se houver.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            AppError::Backend { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Frase exibida ao usuário: a mensagem do backend quando existe, o próprio
    /// texto para erros locais e, no resto, o fallback da ação.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Backend { message: Some(msg), .. } if !msg.trim().is_empty() => msg.clone(),
            AppError::Validation(msg) | AppError::NoData(msg) => msg.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Violação de chave estrangeira (registro ainda referenciado por um orçamento).
    pub fn is_foreign_key_violation(&self) -> bool {
        self.backend_message()
            .map(|msg| msg.to_lowercase().contains("foreign key"))
            .unwrap_or(false)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Backend { status: 401, .. })
    }
}
