// src/api/auth_repo.rs

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    api::http::ApiClient,
    common::{
        error::AppError,
        store::{QueryCache, QueryKey},
    },
    models::{
        User,
        auth::{ForgotPasswordRequest, ResetPasswordRequest, SigninRequest, SigninResponse, TwoFactorRequest},
    },
};

/// "Quem sou eu?", usado pelo guarda de sessão. Qualquer resposta de sucesso
/// vale como sessão ativa; o usuário só vem quando o corpo tem o formato esperado.
#[async_trait]
pub trait WhoAmI: Send + Sync {
    async fn me(&self) -> Result<Option<User>, AppError>;
}

pub const CURRENT_USER_KEY: &str = "currentUser";

// O repositório de autenticação: login, 2FA, sessão e recuperação de senha
#[derive(Clone)]
pub struct AuthRepository {
    api: ApiClient,
    cache: Arc<dyn QueryCache>,
}

impl AuthRepository {
    pub fn new(api: ApiClient, cache: Arc<dyn QueryCache>) -> Self {
        Self { api, cache }
    }

    pub async fn signin(&self, email: &str, password: &str, recaptcha_token: &str) -> Result<SigninResponse, AppError> {
        let body = SigninRequest {
            email: email.to_string(),
            password: password.to_string(),
            recaptcha_token: recaptcha_token.to_string(),
        };
        let response: SigninResponse = self.api.post("/auth/signin", &body).await?;
        if response.two_factor_required {
            tracing::info!("🔐 Login de {} aguardando código 2FA", email);
        } else {
            tracing::info!("✅ Login realizado: {}", email);
        }
        Ok(response)
    }

    pub async fn verify_two_factor(&self, email: &str, code: &str) -> Result<(), AppError> {
        let body = TwoFactorRequest { email: email.to_string(), code: code.to_string() };
        let _: Value = self.api.post("/auth/2fa/verify", &body).await?;
        tracing::info!("✅ Código 2FA verificado para {}", email);
        Ok(())
    }

    /// Encerra a sessão. O cache é limpo mesmo se o backend falhar: nada do
    /// usuário anterior pode sobrar.
    pub async fn logout(&self) -> Result<(), AppError> {
        let result = self.api.post::<Value, _>("/auth/logout", &Value::Null).await;
        self.cache.clear();
        result?;
        tracing::info!("👋 Sessão encerrada");
        Ok(())
    }

    /// Usuário logado, lido de `["currentUser"]` ou buscado em `/auth/me`.
    pub async fn current_user(&self) -> Result<Option<User>, AppError> {
        let key = QueryKey::new(CURRENT_USER_KEY);
        if let Some(user) = self.cache.read(&key).and_then(|v| serde_json::from_value(v).ok()) {
            return Ok(Some(user));
        }
        let user = self.me().await?;
        if let Some(user) = &user {
            self.cache.write(key, serde_json::to_value(user)?);
        }
        Ok(user)
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let body = ForgotPasswordRequest { email: email.to_string() };
        let _: Value = self.api.post("/users/forgot-password", &body).await?;
        Ok(())
    }

    pub async fn reset_password(&self, email: &str, code: &str, new_password: &str) -> Result<(), AppError> {
        let body = ResetPasswordRequest {
            email: email.to_string(),
            code: code.to_string(),
            new_password: new_password.to_string(),
        };
        let _: Value = self.api.post("/users/reset-password", &body).await?;
        Ok(())
    }
}

#[async_trait]
impl WhoAmI for AuthRepository {
    async fn me(&self) -> Result<Option<User>, AppError> {
        let raw: Value = self.api.get("/auth/me").await?;
        let user = serde_json::from_value(raw).ok();
        if user.is_none() {
            tracing::debug!("/auth/me respondeu sem um usuário reconhecível");
        }
        Ok(user)
    }
}
