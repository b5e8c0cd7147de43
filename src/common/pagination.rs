// src/common/pagination.rs

pub const PAGE_SIZE: usize = 5;

/// Paginação local: a lista inteira já está em memória, trocar de página só
/// muda o recorte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self { page: 1, page_size: page_size.max(1) }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size)
    }

    /// Fora de `[1, total_pages]` não faz nada. Retorna se a página mudou.
    pub fn go_to(&mut self, page: usize, total_items: usize) -> bool {
        if page < 1 || page > self.total_pages(total_items) {
            return false;
        }
        self.page = page;
        true
    }

    pub fn next(&mut self, total_items: usize) -> bool {
        self.go_to(self.page + 1, total_items)
    }

    pub fn previous(&mut self, total_items: usize) -> bool {
        self.go_to(self.page.saturating_sub(1), total_items)
    }

    /// Depois de uma exclusão a página atual pode ter deixado de existir.
    pub fn clamp(&mut self, total_items: usize) {
        let last = self.total_pages(total_items).max(1);
        self.page = self.page.clamp(1, last);
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = ((self.page - 1) * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}
