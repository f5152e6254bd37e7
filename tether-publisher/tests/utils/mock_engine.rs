use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tether_core::IceCandidate;
use tether_publisher::{EngineFactory, EngineState, PeerConnectionEngine, TrackHandle};

/// Everything the mock engines were asked to do, keyed by engine number.
#[derive(Debug, Default)]
pub struct EngineLog {
    pub created: usize,
    pub closed: Vec<usize>,
    pub tracks: Vec<usize>,
    pub remote: Vec<(usize, String)>,
    pub candidates: Vec<(usize, String)>,
    pub states: Vec<Arc<Mutex<EngineState>>>,
}

/// Hands out [`MockEngine`]s that record into a shared [`EngineLog`].
#[derive(Default)]
pub struct MockEngineFactory {
    log: Arc<Mutex<EngineLog>>,
    fail_create: AtomicBool,
    hang_gathering: AtomicBool,
    lose_connection_on_answer: AtomicBool,
}

impl MockEngineFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn hang_gathering(&self, hang: bool) {
        self.hang_gathering.store(hang, Ordering::SeqCst);
    }

    pub fn lose_connection_on_answer(&self, lose: bool) {
        self.lose_connection_on_answer.store(lose, Ordering::SeqCst);
    }

    pub fn created(&self) -> usize {
        self.log.lock().unwrap().created
    }

    pub fn closed(&self) -> Vec<usize> {
        self.log.lock().unwrap().closed.clone()
    }

    pub fn live(&self) -> usize {
        let log = self.log.lock().unwrap();
        log.created - log.closed.len()
    }

    pub fn remote(&self) -> Vec<(usize, String)> {
        self.log.lock().unwrap().remote.clone()
    }

    pub fn candidates(&self) -> Vec<(usize, String)> {
        self.log.lock().unwrap().candidates.clone()
    }

    pub fn tracks(&self) -> Vec<usize> {
        self.log.lock().unwrap().tracks.clone()
    }

    pub fn set_state(&self, engine: usize, state: EngineState) {
        let log = self.log.lock().unwrap();
        *log.states[engine].lock().unwrap() = state;
    }
}

#[async_trait]
impl EngineFactory for MockEngineFactory {
    async fn create(&self) -> Result<Box<dyn PeerConnectionEngine>> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(anyhow!("engine construction refused"));
        }

        let mut log = self.log.lock().unwrap();
        let id = log.created;
        log.created += 1;
        let state = Arc::new(Mutex::new(EngineState::New));
        log.states.push(state.clone());

        Ok(Box::new(MockEngine {
            id,
            log: self.log.clone(),
            state,
            local: Mutex::new(None),
            hang_gathering: self.hang_gathering.load(Ordering::SeqCst),
            lose_connection_on_answer: self.lose_connection_on_answer.load(Ordering::SeqCst),
        }))
    }
}

/// Offers are `offer-{id}`; the local description appends `+candidates`.
/// Remote descriptions starting with `bad` and candidates with foundation
/// `bad` are rejected.
pub struct MockEngine {
    id: usize,
    log: Arc<Mutex<EngineLog>>,
    state: Arc<Mutex<EngineState>>,
    local: Mutex<Option<String>>,
    hang_gathering: bool,
    lose_connection_on_answer: bool,
}

#[async_trait]
impl PeerConnectionEngine for MockEngine {
    async fn add_track(&self, _track: TrackHandle) -> Result<()> {
        self.log.lock().unwrap().tracks.push(self.id);
        Ok(())
    }

    async fn create_offer(&self) -> Result<String> {
        Ok(format!("offer-{}", self.id))
    }

    async fn set_local_description(&self, sdp: String) -> Result<()> {
        *self.local.lock().unwrap() = Some(sdp);
        Ok(())
    }

    async fn gathering_complete(&self) {
        if self.hang_gathering {
            std::future::pending::<()>().await;
        }
    }

    async fn local_description(&self) -> Option<String> {
        let local = self.local.lock().unwrap().clone();
        local.map(|sdp| format!("{sdp}+candidates"))
    }

    async fn set_remote_description(&self, sdp: String) -> Result<()> {
        if sdp.starts_with("bad") {
            return Err(anyhow!("unparseable answer"));
        }
        self.log.lock().unwrap().remote.push((self.id, sdp));
        if self.lose_connection_on_answer {
            *self.state.lock().unwrap() = EngineState::Failed;
        } else {
            *self.state.lock().unwrap() = EngineState::Connected;
        }
        Ok(())
    }

    async fn add_ice_candidate(&self, candidate: &IceCandidate) -> Result<()> {
        let line = candidate.sdp_line();
        if line.starts_with("candidate:bad") {
            return Err(anyhow!("candidate rejected"));
        }
        self.log.lock().unwrap().candidates.push((self.id, line));
        Ok(())
    }

    fn connection_state(&self) -> EngineState {
        *self.state.lock().unwrap()
    }

    fn ice_connection_state(&self) -> EngineState {
        *self.state.lock().unwrap()
    }

    async fn close(&self) -> Result<()> {
        *self.state.lock().unwrap() = EngineState::Closed;
        self.log.lock().unwrap().closed.push(self.id);
        Ok(())
    }
}
