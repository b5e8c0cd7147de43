// src/common/store.rs

use std::{
    collections::HashMap,
    sync::RwLock,
};

use serde_json::Value;

// ---
// Cache de consultas do painel
// ---
// Guarda a última resposta de cada consulta. Mutações nunca escrevem aqui
// diretamente: só invalidam, e a próxima leitura busca de novo no backend.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new(root: &str) -> Self {
        Self(vec![root.to_string()])
    }

    pub fn with(mut self, segment: impl ToString) -> Self {
        self.0.push(segment.to_string());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// `["budget"]` cobre `["budget"]` e `["budget", ...]`.
    pub fn covers(&self, other: &QueryKey) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl From<&str> for QueryKey {
    fn from(root: &str) -> Self {
        QueryKey::new(root)
    }
}

/// Capacidade de cache passada para quem precisa dela (nada de singleton).
pub trait QueryCache: Send + Sync {
    fn read(&self, key: &QueryKey) -> Option<Value>;
    fn write(&self, key: QueryKey, value: Value);
    fn invalidate(&self, key: &QueryKey);
    fn clear(&self);
}

#[derive(Default)]
pub struct MemoryQueryStore {
    entries: RwLock<HashMap<QueryKey, Value>>,
}

impl MemoryQueryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QueryCache for MemoryQueryStore {
    fn read(&self, key: &QueryKey) -> Option<Value> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn write(&self, key: QueryKey, value: Value) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key, value);
        }
    }

    fn invalidate(&self, key: &QueryKey) {
        if let Ok(mut entries) = self.entries.write() {
            let before = entries.len();
            entries.retain(|cached, _| !key.covers(cached));
            tracing::debug!(
                "🧹 Cache invalidado para {:?} ({} entrada(s))",
                key.segments(),
                before - entries.len()
            );
        }
    }

    fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invalidation_matches_by_prefix() {
        let store = MemoryQueryStore::new();
        store.write("budget".into(), json!([1]));
        store.write(QueryKey::new("budget").with("42"), json!({"id": "42"}));
        store.write("budgetTrips".into(), json!([]));
        store.write("car".into(), json!([]));

        store.invalidate(&"budget".into());

        assert!(store.read(&"budget".into()).is_none());
        assert!(store.read(&QueryKey::new("budget").with("42")).is_none());
        // Chave diferente, mesmo que comece com as mesmas letras
        assert!(store.read(&"budgetTrips".into()).is_some());
        assert!(store.read(&"car".into()).is_some());
    }

    #[test]
    fn narrower_key_leaves_parent_alone() {
        let store = MemoryQueryStore::new();
        store.write("driverRemuneration".into(), json!(null));
        store.write(
            QueryKey::new("driverRemuneration").with("d1").with(8).with(2025),
            json!({}),
        );

        store.invalidate(&QueryKey::new("driverRemuneration").with("d1"));

        assert_eq!(store.len(), 1);
        store.clear();
        assert!(store.is_empty());
    }
}
