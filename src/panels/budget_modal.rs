// src/panels/budget_modal.rs

use crate::{
    api::resource::{Entity, Resource},
    common::{error::AppError, feedback::AlertSlot, formatting::parse_decimal},
    models::{Budget, NewBudget, TripFields},
    panels::registration::SubmitOutcome,
    services::budget_service::{normalize_trip, toggle},
};

/// Lista suspensa que fecha ao clicar fora dela.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dropdown {
    open: bool,
}

impl Dropdown {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Clique no documento: `inside` diz se caiu dentro do container da lista.
    pub fn pointer_down(&mut self, inside: bool) {
        if !inside {
            self.open = false;
        }
    }
}

// Campos do modal de novo orçamento (valores como digitados)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetForm {
    pub cliente_id: String,
    pub car_id: String,
    driver_id: Vec<String>,
    num_motoristas: usize,
    pub origem: String,
    pub destino: String,
    pub data_hora_viagem: String,
    pub data_hora_viagem_retorno: String,
    pub pedagio: String,
    pub lucro_desejado: String,
    pub imposto_percent: String,
    pub custo_extra: String,
}

impl BudgetForm {
    pub fn driver_id(&self) -> &[String] {
        &self.driver_id
    }

    pub fn num_motoristas(&self) -> usize {
        self.num_motoristas
    }

    pub fn toggle_driver(&mut self, id: &str) {
        toggle(&mut self.driver_id, id);
        self.num_motoristas = self.driver_id.len();
    }

    pub fn set_drivers(&mut self, ids: Vec<String>) {
        self.driver_id = ids;
        self.num_motoristas = self.driver_id.len();
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let checks = [
            (self.cliente_id.trim().is_empty(), "cliente"),
            (self.driver_id.is_empty(), "motorista(s)"),
            (self.car_id.trim().is_empty(), "carro"),
            (self.origem.trim().is_empty(), "origem"),
            (self.destino.trim().is_empty(), "destino"),
            (self.data_hora_viagem.trim().is_empty(), "data e hora da ida"),
        ];
        checks.into_iter().filter_map(|(missing, name)| missing.then_some(name)).collect()
    }

    /// Valida tudo de uma vez e monta o `POST /budget`.
    pub fn to_payload(&self) -> Result<NewBudget, AppError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Preencha os campos obrigatórios: {}.",
                missing.join(", ")
            )));
        }

        let number = |value: &str, field: &str| {
            parse_decimal(value).ok_or_else(|| AppError::Validation(format!("Valor inválido em {field}.")))
        };

        let trip = normalize_trip(TripFields {
            origem: self.origem.trim().to_string(),
            destino: self.destino.trim().to_string(),
            data_hora_viagem: self.data_hora_viagem.clone(),
            data_hora_viagem_retorno: self.data_hora_viagem_retorno.clone(),
            pedagio: number(&self.pedagio, "pedágio")?,
            lucro_desejado: number(&self.lucro_desejado, "lucro desejado")?,
            imposto_percent: number(&self.imposto_percent, "imposto")?,
            custo_extra: number(&self.custo_extra, "custo extra")?,
        });

        Ok(NewBudget::new(trip, self.cliente_id.clone(), self.car_id.clone(), self.driver_id.clone()))
    }
}

// ---
// Modal
// ---
#[derive(Debug, Default)]
pub struct BudgetModal {
    open: bool,
    pub form: BudgetForm,
    pub drivers_dropdown: Dropdown,
    pub cars_dropdown: Dropdown,
    submitting: bool,
    alert: AlertSlot,
}

impl BudgetModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alert(alert: AlertSlot) -> Self {
        Self { alert, ..Self::default() }
    }

    pub fn alert(&self) -> &AlertSlot {
        &self.alert
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.drivers_dropdown.close();
        self.cars_dropdown.close();
    }

    pub fn toggle_driver(&mut self, id: &str) {
        self.form.toggle_driver(id);
    }

    pub fn set_drivers(&mut self, ids: Vec<String>) {
        self.form.set_drivers(ids);
    }

    pub fn select_car(&mut self, id: &str) {
        self.form.car_id = id.to_string();
        self.cars_dropdown.close();
    }

    pub async fn submit<R>(&mut self, budgets: &R) -> SubmitOutcome<Budget>
    where
        R: Resource<Budget> + ?Sized,
    {
        let payload = match self.form.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                let message = e.to_string();
                self.alert.error(message.clone());
                return SubmitOutcome::Invalid(message);
            }
        };

        self.submitting = true;
        let result = budgets.create(&payload).await;
        self.submitting = false;

        match result {
            Ok(created) => {
                self.close();
                self.form = BudgetForm::default();
                self.alert.success(Budget::LABELS.created);
                SubmitOutcome::Created(created)
            }
            Err(e) => {
                // O modal continua aberto para o usuário corrigir
                let message = e.user_message(Budget::LABELS.create_failed);
                self.alert.error(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}
