// src/common/feedback.rs

use std::{
    sync::{Arc, Mutex, Weak},
    time::Duration,
};

use tokio::task::JoinHandle;

/// Tempo até o aviso sumir sozinho.
pub const ALERT_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub status: AlertStatus,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self { status: AlertStatus::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { status: AlertStatus::Error, message: message.into() }
    }
}

#[derive(Default)]
struct SlotState {
    current: Option<Alert>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl Drop for SlotState {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

// ---
// Aviso de feedback (o "banner" de sucesso/erro)
// ---
// Só existe um aviso por vez. Um aviso novo substitui o anterior e cancela o
// timer dele, então nunca há dois timers disputando o mesmo slot.
#[derive(Clone)]
pub struct AlertSlot {
    inner: Arc<Mutex<SlotState>>,
    ttl: Duration,
}

impl Default for AlertSlot {
    fn default() -> Self {
        Self::new(ALERT_TTL)
    }
}

impl std::fmt::Debug for AlertSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertSlot").field("current", &self.current()).finish()
    }
}

impl AlertSlot {
    pub fn new(ttl: Duration) -> Self {
        Self { inner: Arc::new(Mutex::new(SlotState::default())), ttl }
    }

    pub fn show(&self, alert: Alert) {
        let Ok(mut state) = self.inner.lock() else { return };

        state.generation += 1;
        if let Some(previous) = state.timer.take() {
            previous.abort();
        }
        state.current = Some(alert);

        // Fora de um runtime tokio o aviso fica até o próximo `dismiss`
        let Ok(handle) = tokio::runtime::Handle::try_current() else { return };

        let generation = state.generation;
        let weak: Weak<Mutex<SlotState>> = Arc::downgrade(&self.inner);
        let ttl = self.ttl;
        state.timer = Some(handle.spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(inner) = weak.upgrade() {
                if let Ok(mut state) = inner.lock() {
                    if state.generation == generation {
                        state.current = None;
                        state.timer = None;
                    }
                }
            }
        }));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(Alert::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(Alert::error(message));
    }

    pub fn current(&self) -> Option<Alert> {
        self.inner.lock().ok().and_then(|state| state.current.clone())
    }

    pub fn dismiss(&self) {
        if let Ok(mut state) = self.inner.lock() {
            state.generation += 1;
            state.current = None;
            if let Some(timer) = state.timer.take() {
                timer.abort();
            }
        }
    }
}
