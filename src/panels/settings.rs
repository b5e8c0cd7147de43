// src/panels/settings.rs

use crate::{
    api::{auth_repo::AuthRepository, resource::Resource},
    common::{error::AppError, feedback::AlertSlot},
    models::{User, UserPatch},
    routes::Route,
};

pub const PROFILE_UPDATED: &str = "Perfil atualizado";
pub const PROFILE_UPDATE_FAILED: &str = "Não foi possível atualizar o perfil.";
pub const SIGNING_OUT: &str = "Saindo do sistema";

// ---
// Tela de configurações: perfil do usuário logado e saída do sistema
// ---
#[derive(Debug, Default)]
pub struct ProfileSettings {
    user: Option<User>,
    pub username: String,
    pub email: String,
    saving: bool,
    alert: AlertSlot,
}

impl ProfileSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alert(alert: AlertSlot) -> Self {
        Self { alert, ..Self::default() }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn alert(&self) -> &AlertSlot {
        &self.alert
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Carrega o usuário logado e preenche os campos com os dados dele.
    pub async fn load(&mut self, auth: &AuthRepository) -> Result<(), AppError> {
        self.user = auth.current_user().await?;
        if let Some(user) = &self.user {
            self.username = user.username.clone();
            self.email = user.email.clone();
        }
        Ok(())
    }

    /// `PUT /users/:id` com nome e email. Sem usuário carregado não faz nada.
    pub async fn save<R>(&mut self, users: &R, auth: &AuthRepository) -> Result<(), AppError>
    where
        R: Resource<User> + ?Sized,
    {
        let Some(id) = self.user.as_ref().map(|u| u.id.clone()) else {
            return Ok(());
        };
        let patch = UserPatch {
            username: Some(self.username.trim().to_string()),
            email: Some(self.email.trim().to_string()),
        };

        self.saving = true;
        let result = users.update(&id, &patch).await;
        self.saving = false;

        match result {
            Ok(_) => {
                self.alert.success(PROFILE_UPDATED);
                // `currentUser` foi invalidado junto com `users`
                if let Err(e) = self.load(auth).await {
                    tracing::warn!("⚠️ Falha ao recarregar o perfil: {}", e);
                }
                Ok(())
            }
            Err(e) => {
                self.alert.error(e.user_message(PROFILE_UPDATE_FAILED));
                Err(e)
            }
        }
    }

    /// Encerra a sessão e manda para o login, mesmo se o backend falhar.
    pub async fn logout(&mut self, auth: &AuthRepository) -> Route {
        self.alert.success(SIGNING_OUT);
        if let Err(e) = auth.logout().await {
            tracing::warn!("⚠️ Logout falhou no servidor: {}", e);
        }
        self.user = None;
        self.username.clear();
        self.email.clear();
        Route::Login
    }
}
