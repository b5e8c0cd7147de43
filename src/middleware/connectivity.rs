// src/middleware/connectivity.rs

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::MissedTickBehavior,
};

use crate::common::error::AppError;

pub const OFFLINE_BANNER: &str = "❌ Você está sem conexão com a internet";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    #[default]
    Online,
    Offline,
}

/// Aviso vindo do sistema operacional / navegador.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkEvent {
    Online,
    Offline,
}

#[async_trait]
pub trait LivenessProbe: Send + Sync {
    /// `true` se qualquer resposta chegou dentro do prazo.
    async fn probe(&self) -> bool;
}

// --- Sonda HTTP ---

pub struct HttpProbe {
    http: reqwest::Client,
    url: String,
}

impl HttpProbe {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, url: url.into() })
    }
}

#[async_trait]
impl LivenessProbe for HttpProbe {
    async fn probe(&self) -> bool {
        // Qualquer status serve; só a falha de transporte conta como offline
        match self.http.get(&self.url).send().await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Sonda de conectividade falhou: {}", e);
                false
            }
        }
    }
}

// ---
// Monitor
// ---
pub struct ConnectivityMonitor;

impl ConnectivityMonitor {
    pub fn spawn(probe: Arc<dyn LivenessProbe>, interval: Duration) -> ConnectivityHandle {
        let (state_tx, state_rx) = watch::channel(Connectivity::Online);
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                let next = tokio::select! {
                    _ = ticker.tick() => probe_state(probe.as_ref()).await,
                    event = events_rx.recv() => match event {
                        Some(NetworkEvent::Offline) => Connectivity::Offline,
                        Some(NetworkEvent::Online) => probe_state(probe.as_ref()).await,
                        None => break,
                    },
                };
                publish(&state_tx, next);
            }
        });

        ConnectivityHandle { state: state_rx, events: events_tx, task }
    }
}

async fn probe_state(probe: &dyn LivenessProbe) -> Connectivity {
    if probe.probe().await { Connectivity::Online } else { Connectivity::Offline }
}

fn publish(tx: &watch::Sender<Connectivity>, next: Connectivity) {
    let changed = tx.send_if_modified(|current| {
        if *current == next {
            return false;
        }
        *current = next;
        true
    });
    if changed {
        match next {
            Connectivity::Offline => tracing::warn!("📡 Sem conexão com a internet"),
            Connectivity::Online => tracing::info!("📡 Conexão restabelecida"),
        }
    }
}

/// Dono da tarefa do monitor; ao ser descartado, a tarefa é abortada.
pub struct ConnectivityHandle {
    state: watch::Receiver<Connectivity>,
    events: mpsc::UnboundedSender<NetworkEvent>,
    task: JoinHandle<()>,
}

impl ConnectivityHandle {
    pub fn current(&self) -> Connectivity {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Connectivity> {
        self.state.clone()
    }

    pub fn notify(&self, event: NetworkEvent) {
        let _ = self.events.send(event);
    }

    pub fn banner(&self) -> Option<&'static str> {
        banner(self.current())
    }
}

impl Drop for ConnectivityHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub fn banner(state: Connectivity) -> Option<&'static str> {
    match state {
        Connectivity::Offline => Some(OFFLINE_BANNER),
        Connectivity::Online => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct FakeProbe {
        up: AtomicBool,
        calls: AtomicUsize,
    }

    impl FakeProbe {
        fn new(up: bool) -> Arc<Self> {
            Arc::new(Self { up: AtomicBool::new(up), calls: AtomicUsize::new(0) })
        }
    }

    #[async_trait]
    impl LivenessProbe for FakeProbe {
        async fn probe(&self) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.up.load(Ordering::SeqCst)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn failed_probe_turns_offline_and_recovers() {
        let probe = FakeProbe::new(true);
        let handle = ConnectivityMonitor::spawn(probe.clone(), Duration::from_secs(5));
        let mut rx = handle.subscribe();
        assert_eq!(handle.current(), Connectivity::Online);
        assert_eq!(handle.banner(), None);

        probe.up.store(false, Ordering::SeqCst);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Connectivity::Offline);
        assert_eq!(handle.banner(), Some(OFFLINE_BANNER));

        probe.up.store(true, Ordering::SeqCst);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Connectivity::Online);
    }

    #[tokio::test(start_paused = true)]
    async fn offline_event_applies_immediately() {
        let probe = FakeProbe::new(true);
        let handle = ConnectivityMonitor::spawn(probe.clone(), Duration::from_secs(5));
        let mut rx = handle.subscribe();

        handle.notify(NetworkEvent::Offline);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Connectivity::Offline);

        // "online" do sistema não basta: o monitor confirma com a sonda
        let before = probe.calls.load(Ordering::SeqCst);
        handle.notify(NetworkEvent::Online);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Connectivity::Online);
        assert!(probe.calls.load(Ordering::SeqCst) > before);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_probing() {
        let probe = FakeProbe::new(true);
        let handle = ConnectivityMonitor::spawn(probe.clone(), Duration::from_secs(5));
        tokio::time::sleep(Duration::from_secs(11)).await;
        drop(handle);

        let calls = probe.calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(probe.calls.load(Ordering::SeqCst), calls);
    }

    #[test]
    fn banner_only_when_offline() {
        assert_eq!(banner(Connectivity::Online), None);
        assert!(banner(Connectivity::Offline).unwrap().contains("sem conexão"));
    }
}
