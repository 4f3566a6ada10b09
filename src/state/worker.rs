use crate::state::messages::{StoreRequest, StoreResponse};
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use wiffle_league::service::{LeagueService, ServiceError, ServiceResult};

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Serializes every store interaction onto one task. Each mutation is a
/// validate-write-reload cycle: the service enforces the write boundary, and
/// the response carries a freshly re-read snapshot for the next render pass.
pub struct StoreWorker {
    service: LeagueService,
    requests: mpsc::Receiver<StoreRequest>,
    responses: mpsc::Sender<StoreResponse>,
    is_loading: Arc<AtomicBool>,
}

impl StoreWorker {
    pub fn new(
        service: LeagueService,
        requests: mpsc::Receiver<StoreRequest>,
        responses: mpsc::Sender<StoreResponse>,
    ) -> Self {
        Self {
            service,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = self.handle(request);

            debug!("store request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = match result {
                Ok(response) => response,
                Err(ServiceError::Rejected(message)) => StoreResponse::Rejected { message },
                Err(err) => StoreResponse::Error { message: err.to_string() },
            };

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send store response: {e}");
                break;
            }
        }
    }

    fn handle(&mut self, request: StoreRequest) -> ServiceResult<StoreResponse> {
        match request {
            StoreRequest::LoadSnapshot => {
                debug!("loading league snapshot");
                Ok(StoreResponse::SnapshotLoaded { snapshot: self.service.snapshot()? })
            }
            StoreRequest::AddPlayer { name } => {
                let player = self.service.add_player(&name)?;
                self.applied(format!("Player '{}' added.", player.name))
            }
            StoreRequest::StartGame { date, team1, team2 } => {
                let game = self.service.start_game(date, team1, team2)?;
                self.applied(format!("{} started.", game.game_id))
            }
            StoreRequest::RecordAtBat { entry, end_inning } => {
                let atbat = self.service.record_at_bat(entry, end_inning)?;
                let message = if end_inning {
                    format!("At-bat recorded; {} ended and locked.", atbat.inning)
                } else {
                    "At-bat recorded.".to_string()
                };
                self.applied(message)
            }
            StoreRequest::UndoLastAtBat { game_id } => {
                let removed = self.service.undo_last_atbat(&game_id)?;
                self.applied(format!(
                    "Removed last at-bat: {} vs {} ({}).",
                    removed.batter, removed.pitcher, removed.outcome
                ))
            }
            StoreRequest::EndGame { game_id, team1_score, team2_score } => {
                let game = self.service.end_game(&game_id, team1_score, team2_score)?;
                self.applied(format!("{} marked as completed.", game.game_id))
            }
            StoreRequest::ResetAll { password } => {
                self.service.reset_all(&password)?;
                self.applied("All league data has been reset.".to_string())
            }
        }
    }

    fn applied(&self, message: String) -> ServiceResult<StoreResponse> {
        Ok(StoreResponse::MutationApplied { message, snapshot: self.service.snapshot()? })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(StoreResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(StoreResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(StoreResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
