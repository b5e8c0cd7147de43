// src/panels/login.rs

use std::collections::BTreeMap;

use validator::{Validate, ValidationErrors};

use crate::{
    api::{auth_repo::AuthRepository, resource::{Entity, Resource}},
    common::feedback::AlertSlot,
    models::{
        NewUser, User,
        auth::{LoginCredentials, SignupFields},
    },
};

pub const LOGIN_FAILED: &str = "Email ou senha inválidos.";

#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// Algum campo não passou na validação local.
    Invalid,
    LoggedIn(Option<User>),
    TwoFactorRequired { email: String },
    Failed(String),
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub credentials: LoginCredentials,
    errors: BTreeMap<String, String>,
    submitting: bool,
    alert: AlertSlot,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: LoginCredentials { email: email.into(), password: password.into() },
            ..Self::default()
        }
    }

    pub fn alert(&self) -> &AlertSlot {
        &self.alert
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Mensagem do campo (`email` ou `password`), se houver.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Editar um campo apaga o erro dele.
    pub fn clear_error(&mut self, field: &str) {
        self.errors.remove(field);
    }

    fn validate(&mut self) -> bool {
        self.errors = field_messages(self.credentials.validate());
        self.errors.is_empty()
    }

    pub async fn submit(&mut self, auth: &AuthRepository, recaptcha_token: &str) -> LoginOutcome {
        if !self.validate() {
            return LoginOutcome::Invalid;
        }

        self.submitting = true;
        let result = auth
            .signin(&self.credentials.email, &self.credentials.password, recaptcha_token)
            .await;
        self.submitting = false;

        match result {
            Ok(response) if response.two_factor_required => LoginOutcome::TwoFactorRequired {
                email: response.email.unwrap_or_else(|| self.credentials.email.clone()),
            },
            Ok(response) => LoginOutcome::LoggedIn(response.user),
            Err(e) => {
                let message = e.user_message(LOGIN_FAILED);
                self.alert.error(message.clone());
                LoginOutcome::Failed(message)
            }
        }
    }
}

/// Primeira mensagem de cada campo inválido.
fn field_messages(result: Result<(), ValidationErrors>) -> BTreeMap<String, String> {
    let mut messages = BTreeMap::new();
    if let Err(errors) = result {
        for (field, field_errors) in errors.field_errors() {
            if let Some(message) = field_errors.first().and_then(|e| e.message.as_ref()) {
                messages.insert(field.to_string(), message.to_string());
            }
        }
    }
    messages
}

// --- Cadastro de conta ---

#[derive(Debug, Clone, PartialEq)]
pub enum SignupOutcome {
    Invalid,
    /// Conta criada; a tela volta para o login.
    Created(User),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct SignupForm {
    pub fields: SignupFields,
    errors: BTreeMap<String, String>,
    submitting: bool,
    alert: AlertSlot,
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alert(&self) -> &AlertSlot {
        &self.alert
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn clear_error(&mut self, field: &str) {
        self.errors.remove(field);
    }

    pub async fn submit<R>(&mut self, users: &R, recaptcha_token: &str) -> SignupOutcome
    where
        R: Resource<User> + ?Sized,
    {
        self.errors = field_messages(self.fields.validate());
        if !self.errors.is_empty() {
            return SignupOutcome::Invalid;
        }

        let payload = NewUser {
            email: self.fields.email.trim().to_string(),
            username: self.fields.username.trim().to_string(),
            password: self.fields.password.clone(),
            recaptcha_token: recaptcha_token.to_string(),
        };

        self.submitting = true;
        let result = users.create(&payload).await;
        self.submitting = false;

        match result {
            Ok(user) => {
                self.fields = SignupFields::default();
                self.alert.success(User::LABELS.created);
                SignupOutcome::Created(user)
            }
            Err(e) => {
                tracing::warn!("❌ Cadastro de conta falhou: {}", e);
                let message = e.user_message(User::LABELS.create_failed);
                self.alert.error(message.clone());
                SignupOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_field_messages() {
        let mut form = LoginForm::new("ana@", "123");
        assert!(!form.validate());
        assert_eq!(form.field_error("email"), Some("Email inválido"));
        assert_eq!(form.field_error("password"), Some("Senha deve ter pelo menos 6 caracteres"));

        form.clear_error("email");
        assert_eq!(form.field_error("email"), None);

        let mut form = LoginForm::new("", "");
        assert!(!form.validate());
        assert_eq!(form.field_error("email"), Some("Email é obrigatório"));
        assert_eq!(form.field_error("password"), Some("Senha é obrigatória"));
    }

    #[test]
    fn valid_credentials_pass() {
        let mut form = LoginForm::new("ana@vanguard.com", "segredo");
        assert!(form.validate());
    }

    #[test]
    fn signup_requires_username() {
        let fields = SignupFields { email: "ana@vanguard.com".into(), username: "an".into(), password: "segredo".into() };
        let errors = field_messages(fields.validate());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["username"], "Username deve ter pelo menos 3 caracteres");
    }
}
