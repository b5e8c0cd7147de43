// src/services/budget_service.rs

use rust_decimal::Decimal;

use crate::{
    common::{
        error::AppError,
        formatting::{fix_local_datetime, format_brl, format_datetime_pt_br},
        validation::phone_digits,
    },
    models::{Budget, BudgetStatus, BudgetUpdate, TripFields},
};

/// Telefone usado no link do WhatsApp quando o cliente não tem um.
pub const PLACEHOLDER_PHONE: &str = "5500000000000";
const COUNTRY_CODE: &str = "55";

pub const MISSING_LINKS: &str = "Selecione carro, motorista(s) e cliente antes de salvar.";
pub const CANCELLED_IS_FINAL: &str = "Orçamento cancelado não pode ter o status alterado.";
pub const STATUS_NOT_SETTABLE: &str = "Esse status não pode ser definido pelo painel.";

// ---
// Snapshot de edição do card
// ---
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetDraft {
    pub origem: String,
    pub destino: String,
    pub car_id: String,
    pub driver_id: Vec<String>,
    pub cliente_id: String,
    pub data_hora_viagem: String,
    pub data_hora_viagem_retorno: String,
    pub preco_viagem: Decimal,
    pub lucro_desejado: Decimal,
    pub pedagio: Decimal,
    pub imposto_percent: Decimal,
    pub custo_extra: Decimal,
    pub status: BudgetStatus,
}

impl BudgetDraft {
    pub fn from_budget(budget: &Budget) -> Self {
        Self {
            origem: budget.origem.clone(),
            destino: budget.destino.clone(),
            car_id: budget.car_id.clone(),
            driver_id: budget.driver_id.clone(),
            cliente_id: budget.cliente_id.clone(),
            data_hora_viagem: input_datetime(&budget.data_hora_viagem),
            data_hora_viagem_retorno: budget
                .data_hora_viagem_retorno
                .as_deref()
                .map(input_datetime)
                .unwrap_or_default(),
            preco_viagem: budget.preco_viagem,
            lucro_desejado: budget.lucro_desejado,
            pedagio: budget.pedagio,
            imposto_percent: budget.imposto_percent,
            custo_extra: budget.custo_extra,
            status: budget.status,
        }
    }

    pub fn toggle_driver(&mut self, driver_id: &str) {
        toggle(&mut self.driver_id, driver_id);
    }

    pub fn num_motoristas(&self) -> usize {
        self.driver_id.len()
    }

    /// Monta o `PUT /budget/:id`. O preço só vai se mudou em relação ao
    /// orçamento original; sem ele o backend recalcula.
    pub fn to_update(&self, original: &Budget) -> Result<BudgetUpdate, AppError> {
        if self.car_id.is_empty() || self.driver_id.is_empty() || self.cliente_id.is_empty() {
            return Err(AppError::Validation(MISSING_LINKS.to_string()));
        }

        let preco = (self.preco_viagem != original.preco_viagem).then_some(self.preco_viagem);
        let trip = normalize_trip(TripFields {
            origem: self.origem.clone(),
            destino: self.destino.clone(),
            data_hora_viagem: self.data_hora_viagem.clone(),
            data_hora_viagem_retorno: self.data_hora_viagem_retorno.clone(),
            pedagio: self.pedagio,
            lucro_desejado: self.lucro_desejado,
            imposto_percent: self.imposto_percent,
            custo_extra: self.custo_extra,
        });

        Ok(BudgetUpdate::new(
            trip,
            self.cliente_id.clone(),
            self.car_id.clone(),
            self.driver_id.clone(),
            self.status,
            preco,
        ))
    }
}

fn input_datetime(value: &str) -> String {
    fix_local_datetime(value).unwrap_or_else(|| value.to_string())
}

/// Datas no formato local `YYYY-MM-DDTHH:mm`; retorno vazio continua vazio.
pub fn normalize_trip(mut trip: TripFields) -> TripFields {
    trip.data_hora_viagem = input_datetime(&trip.data_hora_viagem);
    trip.data_hora_viagem_retorno = input_datetime(&trip.data_hora_viagem_retorno);
    trip
}

/// Liga/desliga um id na seleção múltipla de motoristas.
pub fn toggle(selection: &mut Vec<String>, id: &str) {
    if let Some(pos) = selection.iter().position(|d| d == id) {
        selection.remove(pos);
    } else {
        selection.push(id.to_string());
    }
}

// --- Status ---

pub fn check_status_change(current: BudgetStatus, next: BudgetStatus) -> Result<(), AppError> {
    if current == BudgetStatus::Cancelada {
        return Err(AppError::Validation(CANCELLED_IS_FINAL.to_string()));
    }
    if !next.is_editable() {
        return Err(AppError::Validation(STATUS_NOT_SETTABLE.to_string()));
    }
    Ok(())
}

// --- WhatsApp ---

pub struct WhatsappSummary<'a> {
    pub cliente: &'a str,
    pub carro: &'a str,
    pub motoristas: &'a [String],
}

pub fn whatsapp_message(budget: &Budget, summary: &WhatsappSummary<'_>) -> String {
    let motoristas = if summary.motoristas.is_empty() {
        "-".to_string()
    } else {
        summary.motoristas.join(", ")
    };

    format!(
        "Olá, {}! Segue o orçamento da sua viagem:\n\
         Origem: {}\n\
         Destino: {}\n\
         Carro: {}\n\
         Motorista(s): {}\n\
         Data/Hora: {}\n\
         Valor: {}",
        summary.cliente,
        budget.origem,
        budget.destino,
        summary.carro,
        motoristas,
        format_datetime_pt_br(&budget.data_hora_viagem),
        format_brl(&budget.preco_viagem),
    )
}

/// Número no formato do wa.me: só dígitos, com DDI 55 quando faltar.
pub fn whatsapp_phone(telephone: Option<&str>) -> String {
    let digits = telephone.map(phone_digits).unwrap_or_default();
    match digits.len() {
        0 => PLACEHOLDER_PHONE.to_string(),
        10 | 11 => format!("{COUNTRY_CODE}{digits}"),
        _ => digits,
    }
}

pub fn whatsapp_link(telephone: Option<&str>, message: &str) -> String {
    format!("https://wa.me/{}?text={}", whatsapp_phone(telephone), urlencoding::encode(message))
}
