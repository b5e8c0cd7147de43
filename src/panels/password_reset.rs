// src/panels/password_reset.rs

use crate::{
    api::auth_repo::AuthRepository,
    common::{feedback::AlertSlot, validation::is_valid_email},
    routes::{Route, parse_reset_query},
};

#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    Navigate(Route),
    /// Bloqueado localmente, sem requisição.
    Invalid(String),
    Failed(String),
}

// --- Tela 1: pedir o código ---

#[derive(Debug, Default)]
pub struct ForgotPasswordForm {
    pub email: String,
    error: Option<String>,
    submitting: bool,
    alert: AlertSlot,
}

impl ForgotPasswordForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn alert(&self) -> &AlertSlot {
        &self.alert
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub async fn submit(&mut self, auth: &AuthRepository) -> FlowOutcome {
        let email = self.email.trim().to_string();
        if !is_valid_email(&email) {
            let message = "Digite um email válido.".to_string();
            self.error = Some(message.clone());
            return FlowOutcome::Invalid(message);
        }
        self.error = None;

        self.submitting = true;
        let result = auth.request_password_reset(&email).await;
        self.submitting = false;

        match result {
            Ok(()) => FlowOutcome::Navigate(Route::ResetPassword { email }),
            Err(e) => {
                let message = e.user_message("Ocorreu algum erro!");
                self.alert.error(message.clone());
                FlowOutcome::Failed(message)
            }
        }
    }
}

// --- Tela 2: código + nova senha ---

#[derive(Debug, Default)]
pub struct ResetPasswordForm {
    pub email: String,
    pub code: String,
    pub new_password: String,
    error: Option<String>,
    submitting: bool,
}

impl ResetPasswordForm {
    /// Preenche o email a partir de `?email=...`.
    pub fn from_query(query: &str) -> Self {
        Self { email: parse_reset_query(query).unwrap_or_default(), ..Self::default() }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub async fn submit(&mut self, auth: &AuthRepository) -> FlowOutcome {
        if [&self.email, &self.code, &self.new_password].iter().any(|v| v.trim().is_empty()) {
            let message = "Preencha todos os campos.".to_string();
            self.error = Some(message.clone());
            return FlowOutcome::Invalid(message);
        }

        self.submitting = true;
        let result = auth.reset_password(self.email.trim(), self.code.trim(), &self.new_password).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                self.error = None;
                FlowOutcome::Navigate(Route::Login)
            }
            Err(e) => {
                tracing::warn!("🔑 Redefinição de senha recusada: {}", e);
                let message = "Código inválido ou expirado.".to_string();
                self.error = Some(message.clone());
                FlowOutcome::Failed(message)
            }
        }
    }
}
