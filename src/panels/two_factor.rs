// src/panels/two_factor.rs

use std::time::Duration;

use crate::{
    api::auth_repo::AuthRepository,
    common::{error::AppError, feedback::AlertSlot},
};

/// Tempo para o aviso de sucesso aparecer antes de sair do modal.
pub const SUCCESS_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TwoFactorState {
    #[default]
    Idle,
    Verifying,
    Done,
}

#[derive(Debug)]
pub struct TwoFactorModal {
    email: String,
    code: String,
    state: TwoFactorState,
    alert: AlertSlot,
}

impl TwoFactorModal {
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into(), code: String::new(), state: TwoFactorState::Idle, alert: AlertSlot::default() }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn state(&self) -> TwoFactorState {
        self.state
    }

    pub fn alert(&self) -> &AlertSlot {
        &self.alert
    }

    pub fn set_code(&mut self, raw: &str) {
        self.code = raw.trim().to_uppercase();
    }

    /// Verifica o código; no sucesso espera `SUCCESS_DELAY` e chama `on_success`.
    /// Erros não bloqueiam novas tentativas.
    pub async fn verify<F: FnOnce()>(&mut self, auth: &AuthRepository, on_success: F) -> Result<(), AppError> {
        if self.state != TwoFactorState::Idle {
            return Ok(());
        }
        if self.code.is_empty() {
            self.alert.error("Digite o código");
            return Err(AppError::Validation("Digite o código".to_string()));
        }

        self.state = TwoFactorState::Verifying;
        match auth.verify_two_factor(&self.email, &self.code).await {
            Ok(()) => {
                self.state = TwoFactorState::Done;
                self.alert.success("Código verificado!");
                tokio::time::sleep(SUCCESS_DELAY).await;
                on_success();
                Ok(())
            }
            Err(e) => {
                self.state = TwoFactorState::Idle;
                self.alert.error(e.user_message("Código incorreto"));
                Err(e)
            }
        }
    }
}
