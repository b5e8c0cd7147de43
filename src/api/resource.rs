// src/api/resource.rs

use std::{marker::PhantomData, sync::Arc};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    api::{auth_repo::CURRENT_USER_KEY, http::ApiClient},
    common::{
        error::AppError,
        store::{QueryCache, QueryKey},
    },
    models::{
        Budget, BudgetStatus, BudgetUpdate, Car, CarPayload, Client, ClientPayload, Driver,
        DriverPayload, NewBudget, NewUser, Remuneration, StatusUpdate, TripFields, TripView, User,
        UserPatch,
    },
};

/// Frases de feedback de cada entidade (grids e formulários).
#[derive(Debug, Clone, Copy)]
pub struct EntityLabels {
    pub created: &'static str,
    pub create_failed: &'static str,
    pub updated: &'static str,
    pub update_failed: &'static str,
    pub deleted: &'static str,
    pub delete_failed: &'static str,
    // Exclusão barrada por chave estrangeira
    pub linked: &'static str,
}

/// Um recurso REST do backend (`/car`, `/driver`, ...).
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    const PATH: &'static str;
    const KEY: &'static str;
    const LABELS: EntityLabels;
    /// Outras consultas derivadas desta lista, invalidadas junto com ela.
    const DERIVED_KEYS: &'static [&'static str] = &[];

    type Draft: Serialize + Send + Sync;
    type Patch: Serialize + Send + Sync;

    fn id(&self) -> &str;

    /// Snapshot do formulário de edição -> corpo do PUT.
    fn to_patch(&self) -> Self::Patch;
}

/// O que uma tela enxerga de uma consulta: `{data, isLoading}`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<Vec<T>>,
    pub is_loading: bool,
}

#[async_trait]
pub trait Resource<T: Entity>: Send + Sync {
    fn snapshot(&self) -> QueryState<T>;
    async fn list(&self) -> Result<Vec<T>, AppError>;
    async fn create(&self, input: &T::Draft) -> Result<T, AppError>;
    async fn update(&self, id: &str, patch: &T::Patch) -> Result<T, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

// ---
// Implementação única sobre o ApiClient + cache
// ---
pub struct RestResource<T> {
    api: ApiClient,
    cache: Arc<dyn QueryCache>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for RestResource<T> {
    fn clone(&self) -> Self {
        Self { api: self.api.clone(), cache: Arc::clone(&self.cache), _entity: PhantomData }
    }
}

impl<T: Entity> RestResource<T> {
    pub fn new(api: ApiClient, cache: Arc<dyn QueryCache>) -> Self {
        Self { api, cache, _entity: PhantomData }
    }

    pub fn key() -> QueryKey {
        QueryKey::new(T::KEY)
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", T::PATH, urlencoding::encode(id))
    }

    fn invalidate(&self) {
        self.cache.invalidate(&Self::key());
        for key in T::DERIVED_KEYS {
            self.cache.invalidate(&QueryKey::new(key));
        }
    }

    /// Ignora o cache e busca a lista de novo.
    pub async fn refetch(&self) -> Result<Vec<T>, AppError> {
        let raw: Value = self.api.get(T::PATH).await?;
        let items: Vec<T> = serde_json::from_value(raw.clone())?;
        self.cache.write(Self::key(), raw);
        Ok(items)
    }
}

#[async_trait]
impl<T: Entity> Resource<T> for RestResource<T> {
    fn snapshot(&self) -> QueryState<T> {
        match self.cache.read(&Self::key()).map(serde_json::from_value::<Vec<T>>) {
            Some(Ok(items)) => QueryState { data: Some(items), is_loading: false },
            _ => QueryState { data: None, is_loading: true },
        }
    }

    async fn list(&self) -> Result<Vec<T>, AppError> {
        if let Some(cached) = self.cache.read(&Self::key()) {
            if let Ok(items) = serde_json::from_value(cached) {
                return Ok(items);
            }
        }
        self.refetch().await
    }

    async fn create(&self, input: &T::Draft) -> Result<T, AppError> {
        let created: T = self.api.post(T::PATH, input).await?;
        tracing::info!("✅ {} criado: {}", T::KEY, created.id());
        self.invalidate();
        Ok(created)
    }

    async fn update(&self, id: &str, patch: &T::Patch) -> Result<T, AppError> {
        let updated: T = self.api.put(&Self::item_path(id), patch).await?;
        tracing::info!("✏️ {} atualizado: {}", T::KEY, id);
        self.invalidate();
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.api.delete(&Self::item_path(id)).await?;
        tracing::info!("🗑️ {} excluído: {}", T::KEY, id);
        self.invalidate();
        Ok(())
    }
}

// --- Endpoints específicos ---

impl RestResource<Budget> {
    /// Só o status (`PATCH /budget/:id/status`); os outros campos não são tocados.
    pub async fn update_status(&self, id: &str, status: BudgetStatus) -> Result<(), AppError> {
        let path = format!("{}/status", Self::item_path(id));
        let _: Value = self.api.patch(&path, &StatusUpdate { status }).await?;
        tracing::info!("🔁 Status do orçamento {} -> {}", id, status);
        self.invalidate();
        Ok(())
    }

    pub async fn trips(&self) -> Result<Vec<TripView>, AppError> {
        let key = QueryKey::new("budgetTrips");
        if let Some(cached) = self.cache.read(&key) {
            if let Ok(trips) = serde_json::from_value(cached) {
                return Ok(trips);
            }
        }
        let raw: Value = self.api.get("/budget/trips").await?;
        let trips = serde_json::from_value(raw.clone())?;
        self.cache.write(key, raw);
        Ok(trips)
    }
}

impl RestResource<Driver> {
    pub async fn remuneration(&self, driver_id: &str, month: u32, year: i32) -> Result<Remuneration, AppError> {
        let path = format!("{}/remuneration", Self::item_path(driver_id));
        let raw: Value = self
            .api
            .get_query(&path, &[("month", month.to_string()), ("year", year.to_string())])
            .await?;
        let remuneration = serde_json::from_value(raw.clone())?;
        self.cache.write(
            QueryKey::new("driverRemuneration").with(driver_id).with(month).with(year),
            raw,
        );
        Ok(remuneration)
    }
}

// --- Entidades ---

impl Entity for Car {
    const PATH: &'static str = "/car";
    const KEY: &'static str = "car";
    const LABELS: EntityLabels = EntityLabels {
        created: "Carro cadastrado com sucesso",
        create_failed: "Falha ao cadastrar carro",
        updated: "Carro atualizado com sucesso",
        update_failed: "Falha ao atualizar carro",
        deleted: "Carro deletado com sucesso",
        delete_failed: "Falha ao deletar carro",
        linked: "Não é possível excluir: este carro está vinculado a um orçamento.",
    };

    type Draft = CarPayload;
    type Patch = CarPayload;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_patch(&self) -> CarPayload {
        CarPayload {
            model: self.model.clone(),
            plate: self.plate.clone(),
            consumption: self.consumption,
            fixed_cost: self.fixed_cost,
        }
    }
}

impl Entity for Driver {
    const PATH: &'static str = "/driver";
    const KEY: &'static str = "driver";
    const LABELS: EntityLabels = EntityLabels {
        created: "Motorista cadastrado com sucesso",
        create_failed: "Falha ao cadastrar motorista",
        updated: "Motorista atualizado com sucesso",
        update_failed: "Falha ao atualizar motorista",
        deleted: "Motorista deletado com sucesso",
        delete_failed: "Falha ao deletar motorista",
        linked: "Não é possível excluir: este motorista está vinculado a um orçamento.",
    };

    type Draft = DriverPayload;
    type Patch = DriverPayload;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_patch(&self) -> DriverPayload {
        DriverPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            cpf: self.cpf.clone(),
            driver_cost: self.driver_cost,
            daily_price_driver: self.daily_price_driver,
        }
    }
}

impl Entity for Client {
    const PATH: &'static str = "/client";
    const KEY: &'static str = "client";
    const LABELS: EntityLabels = EntityLabels {
        created: "Cliente cadastrado com sucesso",
        create_failed: "Falha ao cadastrar cliente",
        updated: "Cliente atualizado com sucesso",
        update_failed: "Falha ao atualizar cliente",
        deleted: "Cliente deletado com sucesso",
        delete_failed: "Falha ao deletar cliente",
        linked: "Não é possível excluir: este cliente está vinculado a um orçamento.",
    };

    type Draft = ClientPayload;
    type Patch = ClientPayload;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_patch(&self) -> ClientPayload {
        ClientPayload {
            name: self.name.clone(),
            telephone: self.telephone.clone(),
            email: self.email.clone(),
        }
    }
}

impl Entity for Budget {
    const PATH: &'static str = "/budget";
    const KEY: &'static str = "budget";
    const DERIVED_KEYS: &'static [&'static str] = &["budgetTrips"];
    const LABELS: EntityLabels = EntityLabels {
        created: "Orçamento criado com sucesso!",
        create_failed: "Erro ao criar orçamento.",
        updated: "Orçamento atualizado com sucesso!",
        update_failed: "Erro ao salvar o orçamento.",
        deleted: "Orçamento deletado com sucesso",
        delete_failed: "Falha ao deletar orçamento",
        linked: "Não é possível excluir: este orçamento está vinculado a outros registros.",
    };

    type Draft = NewBudget;
    type Patch = BudgetUpdate;

    fn id(&self) -> &str {
        &self.id
    }

    // Sem preço: o snapshot não sabe se o usuário mexeu nele
    fn to_patch(&self) -> BudgetUpdate {
        BudgetUpdate::new(
            TripFields {
                origem: self.origem.clone(),
                destino: self.destino.clone(),
                data_hora_viagem: self.data_hora_viagem.clone(),
                data_hora_viagem_retorno: self.data_hora_viagem_retorno.clone().unwrap_or_default(),
                pedagio: self.pedagio,
                lucro_desejado: self.lucro_desejado,
                imposto_percent: self.imposto_percent,
                custo_extra: self.custo_extra,
            },
            self.cliente_id.clone(),
            self.car_id.clone(),
            self.driver_id.clone(),
            self.status,
            None,
        )
    }
}

impl Entity for User {
    const PATH: &'static str = "/users";
    const KEY: &'static str = "users";
    const DERIVED_KEYS: &'static [&'static str] = &[CURRENT_USER_KEY];
    const LABELS: EntityLabels = EntityLabels {
        created: "Usuário cadastrado com sucesso",
        create_failed: "Falha ao cadastrar usuário",
        updated: "Usuário atualizado com sucesso",
        update_failed: "Falha ao atualizar usuário",
        deleted: "Usuário deletado com sucesso",
        delete_failed: "Falha ao deletar usuário",
        linked: "Não é possível excluir: este usuário está vinculado a outros registros.",
    };

    type Draft = NewUser;
    type Patch = UserPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_patch(&self) -> UserPatch {
        UserPatch {
            username: Some(self.username.clone()),
            email: Some(self.email.clone()),
        }
    }
}
