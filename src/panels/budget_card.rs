// src/panels/budget_card.rs

use std::path::{Path, PathBuf};

use crate::{
    api::resource::{Entity, Resource, RestResource},
    common::{error::AppError, feedback::AlertSlot},
    models::{Budget, BudgetStatus, Car, Client, Driver},
    services::{
        budget_service::{self, BudgetDraft, WhatsappSummary},
        document_service::{DocumentService, TripReceipt},
    },
};

pub const STATUS_UPDATE_FAILED: &str = "Falha ao atualizar status!";

/// Edição completa e edição de status nunca ficam abertas juntas.
#[derive(Debug, Clone, PartialEq)]
pub enum CardMode {
    View,
    Editing(BudgetDraft),
    EditingStatus,
}

#[derive(Debug)]
pub struct BudgetCard {
    original: Budget,
    mode: CardMode,
    pending_delete: bool,
    alert: AlertSlot,
}

impl BudgetCard {
    pub fn new(budget: Budget) -> Self {
        Self::with_alert(budget, AlertSlot::default())
    }

    pub fn with_alert(budget: Budget, alert: AlertSlot) -> Self {
        Self { original: budget, mode: CardMode::View, pending_delete: false, alert }
    }

    pub fn budget(&self) -> &Budget {
        &self.original
    }

    pub fn mode(&self) -> &CardMode {
        &self.mode
    }

    pub fn alert(&self) -> &AlertSlot {
        &self.alert
    }

    /// Dados de uma recarga da lista. Ignorado enquanto a edição completa
    /// estiver aberta, para não apagar o que o usuário digitou.
    pub fn sync(&mut self, budget: Budget) {
        if !matches!(self.mode, CardMode::Editing(_)) {
            self.original = budget;
        }
    }

    // --- Edição completa ---

    pub fn start_edit(&mut self) {
        self.mode = CardMode::Editing(BudgetDraft::from_budget(&self.original));
    }

    pub fn draft_mut(&mut self) -> Option<&mut BudgetDraft> {
        match &mut self.mode {
            CardMode::Editing(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.mode, CardMode::Editing(_)) {
            self.mode = CardMode::View;
        }
    }

    pub async fn save(&mut self, budgets: &RestResource<Budget>) -> Result<(), AppError> {
        let CardMode::Editing(draft) = &self.mode else {
            return Ok(());
        };

        let update = match draft.to_update(&self.original) {
            Ok(update) => update,
            Err(e) => {
                self.alert.error(e.to_string());
                return Err(e);
            }
        };

        match budgets.update(&self.original.id, &update).await {
            Ok(_) => {
                self.mode = CardMode::View;
                self.alert.success(Budget::LABELS.updated);
                self.reload(budgets).await;
                Ok(())
            }
            Err(e) => {
                self.alert.error(e.user_message(Budget::LABELS.update_failed));
                Err(e)
            }
        }
    }

    /// Relê o orçamento da lista (o cache já foi invalidado pela mutação).
    async fn reload(&mut self, budgets: &RestResource<Budget>) {
        match budgets.list().await {
            Ok(list) => {
                if let Some(fresh) = list.into_iter().find(|b| b.id == self.original.id) {
                    self.sync(fresh);
                }
            }
            Err(e) => tracing::warn!("⚠️ Falha ao recarregar orçamento {}: {}", self.original.id, e),
        }
    }

    // --- Status ---

    pub fn open_status_selector(&mut self) -> bool {
        if self.mode != CardMode::View || self.original.status == BudgetStatus::Cancelada {
            return false;
        }
        self.mode = CardMode::EditingStatus;
        true
    }

    pub fn close_status_selector(&mut self) {
        if self.mode == CardMode::EditingStatus {
            self.mode = CardMode::View;
        }
    }

    /// Só chama o endpoint de status; os outros campos ficam como estão.
    pub async fn change_status(
        &mut self,
        budgets: &RestResource<Budget>,
        status: BudgetStatus,
    ) -> Result<(), AppError> {
        if self.mode != CardMode::EditingStatus {
            return Ok(());
        }
        if let Err(e) = budget_service::check_status_change(self.original.status, status) {
            self.alert.error(e.to_string());
            return Err(e);
        }

        match budgets.update_status(&self.original.id, status).await {
            Ok(()) => {
                self.mode = CardMode::View;
                self.reload(budgets).await;
                Ok(())
            }
            Err(e) => {
                self.alert.error(STATUS_UPDATE_FAILED);
                Err(e)
            }
        }
    }

    // --- Exclusão ---

    pub fn request_delete(&mut self) {
        self.pending_delete = true;
    }

    pub fn is_delete_pending(&self) -> bool {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = false;
    }

    pub async fn confirm_delete(&mut self, budgets: &RestResource<Budget>) -> Result<(), AppError> {
        if !std::mem::take(&mut self.pending_delete) {
            return Ok(());
        }
        match budgets.delete(&self.original.id).await {
            Ok(()) => {
                self.alert.success(Budget::LABELS.deleted);
                Ok(())
            }
            Err(e) => {
                let message = if e.is_foreign_key_violation() {
                    Budget::LABELS.linked
                } else {
                    Budget::LABELS.delete_failed
                };
                self.alert.error(message);
                Err(e)
            }
        }
    }

    // --- Documentos e WhatsApp ---

    /// O orçamento como aparece agora no card, incluindo a edição em curso.
    pub fn current(&self) -> Budget {
        let mut budget = self.original.clone();
        if let CardMode::Editing(draft) = &self.mode {
            budget.origem = draft.origem.clone();
            budget.destino = draft.destino.clone();
            budget.car_id = draft.car_id.clone();
            budget.driver_id = draft.driver_id.clone();
            budget.cliente_id = draft.cliente_id.clone();
            budget.data_hora_viagem = draft.data_hora_viagem.clone();
            budget.data_hora_viagem_retorno =
                Some(draft.data_hora_viagem_retorno.clone()).filter(|v| !v.is_empty());
            budget.preco_viagem = draft.preco_viagem;
            budget.lucro_desejado = draft.lucro_desejado;
            budget.pedagio = draft.pedagio;
            budget.imposto_percent = draft.imposto_percent;
            budget.custo_extra = draft.custo_extra;
        }
        budget
    }

    pub fn trip_receipt(&self, clients: &[Client]) -> TripReceipt {
        let budget = self.current();
        let client = clients.iter().find(|c| c.id == budget.cliente_id);
        TripReceipt::from_budget(&budget, client.map(|c| c.name.as_str()))
    }

    pub async fn download_trip_receipt(
        &self,
        clients: &[Client],
        documents: &DocumentService,
        out_dir: &Path,
    ) -> Result<PathBuf, AppError> {
        let receipt = self.trip_receipt(clients);
        let result = match documents.render_trip_receipt(&receipt) {
            Ok(bytes) => documents.save(out_dir, &receipt.file_name(), &bytes).await,
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            self.alert.error(e.user_message("Falha ao gerar comprovante"));
        }
        result
    }

    pub fn whatsapp_link(&self, clients: &[Client], cars: &[Car], drivers: &[Driver]) -> String {
        let budget = self.current();
        let client = clients.iter().find(|c| c.id == budget.cliente_id);
        let car = cars
            .iter()
            .find(|c| c.id == budget.car_id)
            .map(Car::label)
            .unwrap_or_else(|| "Carro não encontrado".to_string());
        let motoristas: Vec<String> = budget
            .driver_id
            .iter()
            .map(|id| {
                drivers
                    .iter()
                    .find(|d| &d.id == id)
                    .map(|d| d.name.clone())
                    .unwrap_or_else(|| "Motorista não encontrado".to_string())
            })
            .collect();

        let message = budget_service::whatsapp_message(
            &budget,
            &WhatsappSummary {
                cliente: client.map(|c| c.name.as_str()).unwrap_or("cliente"),
                carro: &car,
                motoristas: &motoristas,
            },
        );
        budget_service::whatsapp_link(client.map(|c| c.telephone.as_str()), &message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn budget(status: &str) -> Budget {
        serde_json::from_value(json!({
            "id": "b1", "origem": "São Paulo", "destino": "Campinas",
            "data_hora_viagem": "2025-08-10T08:00",
            "cliente_id": "c1", "driver_id": ["d1"], "car_id": "car1",
            "preco_viagem": 500, "status": status
        }))
        .unwrap()
    }

    #[test]
    fn full_edit_and_status_edit_exclude_each_other() {
        let mut card = BudgetCard::new(budget("Pendente"));
        card.start_edit();
        assert!(!card.open_status_selector());
        card.cancel_edit();
        assert!(card.open_status_selector());
        assert_eq!(card.mode(), &CardMode::EditingStatus);
        card.close_status_selector();
        assert_eq!(card.mode(), &CardMode::View);
    }

    #[test]
    fn cancelled_budget_has_no_status_selector() {
        let mut card = BudgetCard::new(budget("Cancelada"));
        assert!(!card.open_status_selector());
    }

    #[test]
    fn sync_waits_for_open_edit() {
        let mut card = BudgetCard::new(budget("Pendente"));
        card.start_edit();
        card.draft_mut().unwrap().origem = "Santos".into();
        card.sync(budget("Aprovada"));
        assert_eq!(card.budget().status, BudgetStatus::Pendente);
        assert_eq!(card.current().origem, "Santos");

        card.cancel_edit();
        card.sync(budget("Aprovada"));
        assert_eq!(card.budget().status, BudgetStatus::Aprovada);
    }

    #[test]
    fn whatsapp_link_for_client_phone() {
        let card = BudgetCard::new(budget("Pendente"));
        let clients = vec![Client {
            id: "c1".into(),
            name: "Maria".into(),
            telephone: "5511999999999".into(),
            email: "maria@email.com".into(),
        }];
        let cars = vec![Car {
            id: "car1".into(),
            model: "Sprinter".into(),
            plate: "ABC1D23".into(),
            consumption: Decimal::from(9),
            fixed_cost: Decimal::ZERO,
        }];
        let link = card.whatsapp_link(&clients, &cars, &[]);
        assert!(link.starts_with("https://wa.me/5511999999999?text="));
        assert!(link.contains("Sprinter"));
    }

    #[test]
    fn receipt_uses_current_snapshot() {
        let mut card = BudgetCard::new(budget("Pendente"));
        card.start_edit();
        card.draft_mut().unwrap().preco_viagem = Decimal::from(720);
        let receipt = card.trip_receipt(&[]);
        assert_eq!(receipt.preco, Decimal::from(720));
        assert_eq!(receipt.cliente, "c1");
        assert_eq!(receipt.file_name(), "ticket-c1-10082025.pdf");
    }
}
