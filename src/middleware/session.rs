// src/middleware/session.rs

use crate::{api::auth_repo::WhoAmI, models::User, routes::Route};

pub const LOADING_PLACEHOLDER: &str = "Carregando...";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Loading,
    // Sessão válida; o usuário pode não ter vindo no corpo
    Authenticated(Option<User>),
    Unauthenticated,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    Placeholder(&'static str),
    Render(Option<User>),
    Redirect(Route),
}

/// Guarda das telas protegidas: pergunta ao backend quem é o usuário uma vez
/// e decide entre placeholder, conteúdo ou redirecionamento para o login.
#[derive(Debug, Default)]
pub struct SessionGate {
    state: SessionState,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub async fn check<W: WhoAmI + ?Sized>(&mut self, who: &W) -> GateDecision {
        if self.state == SessionState::Loading {
            self.state = match who.me().await {
                Ok(user) => {
                    match &user {
                        Some(user) => tracing::info!("🔑 Sessão ativa: {}", user.email),
                        None => tracing::info!("🔑 Sessão ativa"),
                    }
                    SessionState::Authenticated(user)
                }
                Err(e) => {
                    tracing::warn!("🔒 Sem sessão válida: {}", e);
                    SessionState::Unauthenticated
                }
            };
        }
        self.decision()
    }

    pub fn decision(&self) -> GateDecision {
        match &self.state {
            SessionState::Loading => GateDecision::Placeholder(LOADING_PLACEHOLDER),
            SessionState::Authenticated(user) => GateDecision::Render(user.clone()),
            SessionState::Unauthenticated => GateDecision::Redirect(Route::Login),
        }
    }

    /// Volta a `Loading` (ex.: depois de um login) para checar de novo.
    pub fn reset(&mut self) {
        self.state = SessionState::Loading;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::AppError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeWho {
        user: Option<Option<User>>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WhoAmI for FakeWho {
        async fn me(&self) -> Result<Option<User>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.user
                .clone()
                .ok_or(AppError::Backend { status: 401, message: Some("Unauthorized".into()) })
        }
    }

    fn user() -> User {
        User { id: "u1".into(), username: "ana".into(), email: "ana@vanguard.com".into() }
    }

    #[tokio::test]
    async fn renders_for_authenticated_user_and_checks_once() {
        let who = FakeWho { user: Some(Some(user())), calls: AtomicUsize::new(0) };
        let mut gate = SessionGate::new();
        assert_eq!(gate.decision(), GateDecision::Placeholder("Carregando..."));

        assert_eq!(gate.check(&who).await, GateDecision::Render(Some(user())));
        assert_eq!(gate.check(&who).await, GateDecision::Render(Some(user())));
        assert_eq!(who.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn any_successful_check_is_a_session() {
        let who = FakeWho { user: Some(None), calls: AtomicUsize::new(0) };
        let mut gate = SessionGate::new();
        assert_eq!(gate.check(&who).await, GateDecision::Render(None));
        assert_eq!(gate.state(), &SessionState::Authenticated(None));
    }

    #[tokio::test]
    async fn redirects_to_login_without_session() {
        let who = FakeWho { user: None, calls: AtomicUsize::new(0) };
        let mut gate = SessionGate::new();
        assert_eq!(gate.check(&who).await, GateDecision::Redirect(Route::Login));
        assert_eq!(gate.state(), &SessionState::Unauthenticated);

        gate.reset();
        assert_eq!(gate.decision(), GateDecision::Placeholder(LOADING_PLACEHOLDER));
    }
}
