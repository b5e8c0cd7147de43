// src/models/auth.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::User;

// Dados digitados na tela de login (validados antes de qualquer requisição)
#[derive(Debug, Clone, Default, Validate)]
pub struct LoginCredentials {
    #[validate(custom(function = "crate::common::validation::validate_login_email"))]
    pub email: String,
    #[validate(custom(function = "crate::common::validation::validate_login_password"))]
    pub password: String,
}

// Tela de cadastro: as mesmas regras do login mais o username
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct SignupFields {
    #[validate(custom(function = "crate::common::validation::validate_login_email"))]
    pub email: String,
    #[validate(custom(function = "crate::common::validation::validate_username"))]
    pub username: String,
    #[validate(custom(function = "crate::common::validation::validate_login_password"))]
    pub password: String,
}

// Corpo do POST /auth/signin
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
    pub recaptcha_token: String,
}

// Resposta do login: ou a sessão já foi criada, ou o backend pede o código 2FA
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SigninResponse {
    pub two_factor_required: bool,
    pub email: Option<String>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TwoFactorRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
}
