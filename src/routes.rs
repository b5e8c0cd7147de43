// src/routes.rs

use reqwest::Url;

/// Telas do painel alcançáveis por navegação.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    ForgotPassword,
    ResetPassword { email: String },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Home => "/".to_string(),
            Route::ForgotPassword => "/forgot-password".to_string(),
            Route::ResetPassword { email } => {
                format!("/reset-password?email={}", urlencoding::encode(email))
            }
        }
    }
}

/// Lê `email` da query string da tela de redefinição (`?email=...`).
pub fn parse_reset_query(query: &str) -> Option<String> {
    let mut url = Url::parse("http://painel.local/reset-password").ok()?;
    url.set_query(Some(query.trim_start_matches('?')));
    url.query_pairs()
        .find(|(key, _)| key == "email")
        .map(|(_, value)| value.into_owned())
        .filter(|email| !email.is_empty())
}
