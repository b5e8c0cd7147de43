// src/common/validation.rs

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;
use validator::ValidationError;

use crate::common::error::AppError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("regex de e-mail válida")
});

fn only_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Reformata o CPF a cada tecla: tira o que não é dígito, corta em 11 e
/// recoloca os separadores (`000.000.000-00`).
pub fn format_cpf(value: &str) -> String {
    let digits: String = only_digits(value).chars().take(11).collect();
    let mut out = String::with_capacity(14);
    for (i, c) in digits.chars().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }
    out
}

pub fn is_valid_cpf(cpf: &str) -> bool {
    only_digits(cpf).len() == 11
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Só os dígitos do telefone (para o link do WhatsApp).
pub fn phone_digits(phone: &str) -> String {
    only_digits(phone)
}

/// Campo obrigatório: falha com a mensagem do campo se estiver vazio.
pub fn require(value: &str, message: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(())
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

// --- Validadores customizados para `#[derive(Validate)]` ---

pub fn validate_login_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(field_error("required", "Email é obrigatório"));
    }
    if !is_valid_email(email) {
        return Err(field_error("email", "Email inválido"));
    }
    Ok(())
}

pub fn validate_login_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(field_error("required", "Senha é obrigatória"));
    }
    if password.chars().count() < 6 {
        return Err(field_error("length", "Senha deve ter pelo menos 6 caracteres"));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(field_error("required", "Username é obrigatório"));
    }
    if username.trim().chars().count() < 3 {
        return Err(field_error("length", "Username deve ter pelo menos 3 caracteres"));
    }
    Ok(())
}
