use std::sync::mpsc::{Receiver, Sender, channel};

use eframe::egui::Context;
use serde::de::DeserializeOwned;

use crate::data::client;

/// What a completed request delivers back to the UI thread: the id it was
/// issued under, and either the parsed rows or a display-ready error.
pub type FetchOutcome<T> = (u64, Result<Vec<T>, String>);

/// Per-view fetch hook: one request per parameter-set change, exposing
/// `{data, is_loading, error}` to the frame loop.
///
/// Requests are tagged with an increasing id and only the most recent id's
/// response is accepted, so a slow superseded response can never overwrite
/// a newer one. On failure the previous data stays on screen
/// (stale-but-valid beats blanking).
pub struct FetchState<T> {
    data: Vec<T>,
    error: Option<String>,
    latest_id: u64,
    generation: u64,
    rx: Option<Receiver<FetchOutcome<T>>>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            error: None,
            latest_id: 0,
            generation: 0,
            rx: None,
        }
    }
}

impl<T> FetchState<T> {
    /// Start tracking a new request; returns its id and the sender the
    /// eventual outcome must arrive on. `request` wires this to the HTTP
    /// layer; tests drive the sender directly.
    pub fn begin(&mut self) -> (u64, Sender<FetchOutcome<T>>) {
        self.latest_id += 1;
        let (tx, rx) = channel();
        self.rx = Some(rx);
        (self.latest_id, tx)
    }

    /// Drain the completion channel. Called once per frame by the view.
    pub fn poll(&mut self) {
        let Some(rx) = &self.rx else { return };
        if let Ok((id, outcome)) = rx.try_recv() {
            self.accept(id, outcome);
        }
    }

    fn accept(&mut self, id: u64, outcome: Result<Vec<T>, String>) {
        if id != self.latest_id {
            // Superseded request; ignore whatever it resolved to.
            return;
        }
        self.rx = None;
        match outcome {
            Ok(data) => {
                self.data = data;
                self.error = None;
                self.generation += 1;
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn is_loading(&self) -> bool {
        self.rx.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Bumped on every accepted response; views compare it to know when to
    /// rebuild derived series.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl<T: DeserializeOwned + Send + 'static> FetchState<T> {
    /// Issue a GET for `url`, superseding any in-flight request.
    pub fn request(&mut self, ctx: &Context, url: String) {
        let (id, tx) = self.begin();
        spawn_request(id, url, tx, ctx.clone());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_request<T: DeserializeOwned + Send + 'static>(
    id: u64,
    url: String,
    tx: Sender<FetchOutcome<T>>,
    ctx: Context,
) {
    std::thread::spawn(move || {
        let outcome = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt
                .block_on(client::get_json::<T>(&url))
                .map_err(|e| format!("{e:#}")),
            Err(e) => Err(format!("failed to create runtime: {e}")),
        };
        if let Err(message) = &outcome {
            log::error!("fetch failed for {url}: {message}");
        }
        // Receiver may be gone if the view was torn down; that's fine.
        let _ = tx.send((id, outcome));
        ctx.request_repaint();
    });
}

#[cfg(target_arch = "wasm32")]
fn spawn_request<T: DeserializeOwned + Send + 'static>(
    id: u64,
    url: String,
    tx: Sender<FetchOutcome<T>>,
    ctx: Context,
) {
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = client::get_json::<T>(&url)
            .await
            .map_err(|e| format!("{e:#}"));
        if let Err(message) = &outcome {
            log::error!("fetch failed for {url}: {message}");
        }
        let _ = tx.send((id, outcome));
        ctx.request_repaint();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_keeps_previous_data_and_sets_error() {
        let mut state: FetchState<i32> = FetchState::default();

        let (id, tx) = state.begin();
        assert!(state.is_loading());
        tx.send((id, Ok(vec![1, 2, 3]))).unwrap();
        state.poll();
        assert_eq!(state.data(), &[1, 2, 3]);
        assert!(state.error().is_none());

        let (id, tx) = state.begin();
        tx.send((id, Err("API request failed with status 500".into())))
            .unwrap();
        state.poll();
        assert_eq!(state.data(), &[1, 2, 3]); // untouched
        assert_eq!(state.error(), Some("API request failed with status 500"));
        assert!(!state.is_loading());
    }

    #[test]
    fn failure_on_first_load_leaves_data_empty() {
        let mut state: FetchState<i32> = FetchState::default();
        let (id, tx) = state.begin();
        tx.send((id, Err("network failure".into()))).unwrap();
        state.poll();
        assert!(state.data().is_empty());
        assert!(state.error().is_some());
    }

    #[test]
    fn superseded_response_is_ignored() {
        let mut state: FetchState<i32> = FetchState::default();

        let (stale_id, stale_tx) = state.begin();
        let (live_id, live_tx) = state.begin();

        // The newer request resolves first.
        live_tx.send((live_id, Ok(vec![42]))).unwrap();
        state.poll();
        assert_eq!(state.data(), &[42]);

        // The stale one lands afterwards; its channel was replaced, and even
        // a direct delivery under the old id must be dropped.
        let _ = stale_tx.send((stale_id, Ok(vec![1])));
        state.poll();
        assert_eq!(state.data(), &[42]);
    }

    #[test]
    fn generation_bumps_only_on_success() {
        let mut state: FetchState<i32> = FetchState::default();
        assert_eq!(state.generation(), 0);

        let (id, tx) = state.begin();
        tx.send((id, Ok(vec![7]))).unwrap();
        state.poll();
        assert_eq!(state.generation(), 1);

        let (id, tx) = state.begin();
        tx.send((id, Err("boom".into()))).unwrap();
        state.poll();
        assert_eq!(state.generation(), 1);
    }
}
