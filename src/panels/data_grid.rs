// src/panels/data_grid.rs

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

use crate::{
    api::resource::{Entity, QueryState, Resource, RestResource},
    common::{error::AppError, feedback::AlertSlot, pagination::Paginator},
    models::Driver,
    services::document_service::{DocumentService, PayrollReceipt},
};

/// Estado da (única) linha em edição.
#[derive(Debug, Clone, PartialEq)]
pub enum RowState<T> {
    View,
    Editing { id: String, snapshot: T },
    Saving { id: String, snapshot: T },
    Error { id: String, snapshot: T, message: String },
}

impl<T> RowState<T> {
    pub fn id(&self) -> Option<&str> {
        match self {
            RowState::View => None,
            RowState::Editing { id, .. } | RowState::Saving { id, .. } | RowState::Error { id, .. } => Some(id),
        }
    }
}

// ---
// Grid de cadastros (carros, motoristas, clientes, usuários)
// ---
pub struct DataGrid<T, R> {
    resource: R,
    rows: Vec<T>,
    pager: Paginator,
    row: RowState<T>,
    pending_delete: Option<String>,
    alert: AlertSlot,
}

impl<T: Entity, R: Resource<T>> DataGrid<T, R> {
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            rows: Vec::new(),
            pager: Paginator::default(),
            row: RowState::View,
            pending_delete: None,
            alert: AlertSlot::default(),
        }
    }

    pub fn with_alert(mut self, alert: AlertSlot) -> Self {
        self.alert = alert;
        self
    }

    pub fn alert(&self) -> &AlertSlot {
        &self.alert
    }

    pub fn snapshot(&self) -> QueryState<T> {
        self.resource.snapshot()
    }

    /// Busca a lista inteira; a paginação é feita só aqui no cliente.
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        self.rows = self.resource.list().await?;
        self.pager.clamp(self.rows.len());
        Ok(())
    }

    async fn refresh_after_mutation(&mut self) {
        if let Err(e) = self.refresh().await {
            tracing::warn!("⚠️ Falha ao recarregar {}: {}", T::KEY, e);
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn visible_rows(&self) -> &[T] {
        self.pager.slice(&self.rows)
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages(self.rows.len())
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.pager.go_to(page, self.rows.len())
    }

    // --- Edição ---

    pub fn row_state(&self) -> &RowState<T> {
        &self.row
    }

    /// Começa a editar `id`. Uma edição aberta em outra linha é descartada.
    pub fn start_edit(&mut self, id: &str) -> bool {
        let Some(row) = self.rows.iter().find(|r| r.id() == id) else {
            return false;
        };
        self.row = RowState::Editing { id: id.to_string(), snapshot: row.clone() };
        true
    }

    pub fn edit_snapshot(&mut self) -> Option<&mut T> {
        match &mut self.row {
            RowState::Editing { snapshot, .. } | RowState::Error { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.row = RowState::View;
    }

    pub async fn save(&mut self) -> Result<(), AppError> {
        let (id, snapshot) = match std::mem::replace(&mut self.row, RowState::View) {
            RowState::Editing { id, snapshot } | RowState::Error { id, snapshot, .. } => (id, snapshot),
            other => {
                self.row = other;
                return Ok(());
            }
        };

        let patch = snapshot.to_patch();
        self.row = RowState::Saving { id: id.clone(), snapshot };

        match self.resource.update(&id, &patch).await {
            Ok(_) => {
                self.row = RowState::View;
                self.alert.success(T::LABELS.updated);
                self.refresh_after_mutation().await;
                Ok(())
            }
            Err(e) => {
                let message = T::LABELS.update_failed.to_string();
                self.alert.error(message.clone());
                if let RowState::Saving { id, snapshot } = std::mem::replace(&mut self.row, RowState::View) {
                    self.row = RowState::Error { id, snapshot, message };
                }
                Err(e)
            }
        }
    }

    // --- Exclusão em dois passos ---

    pub fn request_delete(&mut self, id: &str) {
        self.pending_delete = Some(id.to_string());
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) -> Result<(), AppError> {
        // O alvo é liberado aconteça o que acontecer
        let Some(id) = self.pending_delete.take() else {
            return Ok(());
        };

        match self.resource.delete(&id).await {
            Ok(()) => {
                self.alert.success(T::LABELS.deleted);
                if self.row.id() == Some(id.as_str()) {
                    self.row = RowState::View;
                }
                self.refresh_after_mutation().await;
                Ok(())
            }
            Err(e) => {
                if e.is_foreign_key_violation() {
                    self.alert.error(T::LABELS.linked);
                } else {
                    self.alert.error(T::LABELS.delete_failed);
                }
                Err(e)
            }
        }
    }
}

// --- Holerite (só no grid de motoristas) ---

impl DataGrid<Driver, RestResource<Driver>> {
    /// Gera o holerite do mês de `today` e grava o PDF em `out_dir`.
    pub async fn generate_payroll(
        &self,
        driver_id: &str,
        today: NaiveDate,
        documents: &DocumentService,
        out_dir: &Path,
    ) -> Result<PathBuf, AppError> {
        let result = self.build_payroll(driver_id, today, documents, out_dir).await;
        if let Err(e) = &result {
            tracing::warn!("⚠️ Holerite de {} não gerado: {}", driver_id, e);
            self.alert.error(e.user_message("Falha ao gerar holerite"));
        }
        result
    }

    async fn build_payroll(
        &self,
        driver_id: &str,
        today: NaiveDate,
        documents: &DocumentService,
        out_dir: &Path,
    ) -> Result<PathBuf, AppError> {
        let name = self
            .rows
            .iter()
            .find(|d| d.id == driver_id)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| driver_id.to_string());

        let remuneration = self.resource.remuneration(driver_id, today.month(), today.year()).await?;
        let receipt = PayrollReceipt::from_remuneration(&remuneration, &name)?;
        let bytes = documents.render_payroll_receipt(&receipt)?;
        documents.save(out_dir, &receipt.file_name(), &bytes).await
    }
}
