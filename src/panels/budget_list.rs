// src/panels/budget_list.rs

use crate::{
    api::resource::{Resource, RestResource},
    common::{error::AppError, feedback::AlertSlot, pagination::Paginator},
    models::Budget,
    panels::budget_card::BudgetCard,
};

/// Lista de orçamentos: um card por orçamento, paginada de 5 em 5.
#[derive(Debug, Default)]
pub struct BudgetList {
    cards: Vec<BudgetCard>,
    pager: Paginator,
    alert: AlertSlot,
}

impl BudgetList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alert(&self) -> &AlertSlot {
        &self.alert
    }

    /// Recarrega a lista. Cards existentes são sincronizados (e mantêm a
    /// edição aberta); orçamentos novos ganham card, os removidos perdem.
    pub async fn refresh(&mut self, budgets: &RestResource<Budget>) -> Result<(), AppError> {
        let fresh = budgets.list().await?;

        let mut previous = std::mem::take(&mut self.cards);
        for budget in fresh {
            match previous.iter().position(|c| c.budget().id == budget.id) {
                Some(pos) => {
                    let mut card = previous.swap_remove(pos);
                    card.sync(budget);
                    self.cards.push(card);
                }
                None => self.cards.push(BudgetCard::with_alert(budget, self.alert.clone())),
            }
        }
        self.pager.clamp(self.cards.len());
        Ok(())
    }

    pub fn cards(&self) -> &[BudgetCard] {
        &self.cards
    }

    pub fn card_mut(&mut self, id: &str) -> Option<&mut BudgetCard> {
        self.cards.iter_mut().find(|c| c.budget().id == id)
    }

    pub fn visible_cards(&self) -> &[BudgetCard] {
        self.pager.slice(&self.cards)
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages(self.cards.len())
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.pager.go_to(page, self.cards.len())
    }
}
