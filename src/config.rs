// src/config.rs

use std::{env, path::PathBuf, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;

use crate::{
    api::{ApiClient, AuthRepository, RestResource},
    common::store::{MemoryQueryStore, QueryCache},
    middleware::connectivity::{ConnectivityHandle, ConnectivityMonitor, HttpProbe},
    models::{Budget, Car, Client, Driver, User},
    services::DocumentService,
};

// Configuração lida do ambiente (.env)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub probe_url: String,
    pub probe_interval: Duration,
    pub probe_timeout: Duration,
    pub fonts_dir: PathBuf,
    pub font_name: String,
    pub output_dir: PathBuf,
    // Login do binário (opcional)
    pub email: Option<String>,
    pub password: Option<String>,
    pub recaptcha_token: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://vanguardsystem.com.br".to_string(),
            probe_url: "https://www.google.com/generate_204".to_string(),
            probe_interval: Duration::from_secs(5),
            probe_timeout: Duration::from_secs(3),
            fonts_dir: PathBuf::from("./fonts"),
            font_name: "Roboto".to_string(),
            output_dir: PathBuf::from("."),
            email: None,
            password: None,
            recaptcha_token: String::new(),
        }
    }
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(name: &str) -> anyhow::Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var(name)
        .map(|v| v.trim().parse::<T>().with_context(|| format!("{name} inválida: {v}")))
        .transpose()
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Ok(Self {
            api_base_url: var("API_BASE_URL").unwrap_or(defaults.api_base_url),
            probe_url: var("PROBE_URL").unwrap_or(defaults.probe_url),
            probe_interval: parse_var::<u64>("PROBE_INTERVAL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.probe_interval),
            probe_timeout: parse_var::<u64>("PROBE_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.probe_timeout),
            fonts_dir: var("FONTS_DIR").map(PathBuf::from).unwrap_or(defaults.fonts_dir),
            font_name: var("FONT_NAME").unwrap_or(defaults.font_name),
            output_dir: var("OUTPUT_DIR").map(PathBuf::from).unwrap_or(defaults.output_dir),
            email: var("PAINEL_EMAIL"),
            password: var("PAINEL_PASSWORD"),
            recaptcha_token: var("RECAPTCHA_TOKEN").unwrap_or_default(),
        })
    }
}

// O estado compartilhado do painel: cliente HTTP, cache e recursos
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub api: ApiClient,
    pub cache: Arc<dyn QueryCache>,
    pub cars: RestResource<Car>,
    pub drivers: RestResource<Driver>,
    pub clients: RestResource<Client>,
    pub budgets: RestResource<Budget>,
    pub users: RestResource<User>,
    pub auth: AuthRepository,
    pub documents: DocumentService,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let api = ApiClient::new(config.api_base_url.clone())?;
        let cache: Arc<dyn QueryCache> = Arc::new(MemoryQueryStore::new());

        // --- Monta o gráfico de dependências ---
        let state = Self {
            cars: RestResource::new(api.clone(), cache.clone()),
            drivers: RestResource::new(api.clone(), cache.clone()),
            clients: RestResource::new(api.clone(), cache.clone()),
            budgets: RestResource::new(api.clone(), cache.clone()),
            users: RestResource::new(api.clone(), cache.clone()),
            auth: AuthRepository::new(api.clone(), cache.clone()),
            documents: DocumentService::new(config.fonts_dir.clone(), config.font_name.clone()),
            api,
            cache,
            config,
        };

        tracing::info!("✅ Painel configurado para {}", state.api.base_url());
        Ok(state)
    }

    /// Sobe o monitor de conectividade com a sonda HTTP configurada.
    pub fn spawn_connectivity_monitor(&self) -> anyhow::Result<ConnectivityHandle> {
        let probe = HttpProbe::new(self.config.probe_url.clone(), self.config.probe_timeout)?;
        Ok(ConnectivityMonitor::spawn(Arc::new(probe), self.config.probe_interval))
    }
}
