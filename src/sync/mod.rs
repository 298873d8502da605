//! Keeps the local store in step with the upstream API.
//!
//! Public operations return `Ok(None)` when the store fails: the failure is
//! logged, the open transaction is dropped (rolled back) and the caller
//! renders whatever it already has. Upstream failures are returned as is.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::error;

use crate::db::Repository;
use crate::error::AppError;
use crate::riot::RiotClient;

mod backfill;
mod history;
mod lookup;
mod throttle;

pub use backfill::MatchDetail;
pub use lookup::select_highest_rank;
pub use throttle::FetchThrottle;

const DEFAULT_HISTORY_END_INDEX: u32 = 50;
const DEFAULT_BURST: u32 = 7;
const DEFAULT_PAUSE: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
pub struct Syncer {
    db: Repository,
    riot: RiotClient,
    history_end_index: u32,
    throttle: Arc<Mutex<FetchThrottle>>,
}

impl Syncer {
    pub fn new(db: Repository, riot: RiotClient) -> Self {
        Self {
            db,
            riot,
            history_end_index: DEFAULT_HISTORY_END_INDEX,
            throttle: Arc::new(Mutex::new(FetchThrottle::new(DEFAULT_BURST, DEFAULT_PAUSE))),
        }
    }

    /// How many entries a history fetch asks for.
    pub fn with_history_end_index(mut self, end_index: u32) -> Self {
        self.history_end_index = end_index;
        self
    }

    pub fn with_throttle(mut self, burst: u32, pause: Duration) -> Self {
        self.throttle = Arc::new(Mutex::new(FetchThrottle::new(burst, pause)));
        self
    }

    pub fn db(&self) -> &Repository {
        &self.db
    }

    pub fn riot(&self) -> &RiotClient {
        &self.riot
    }
}

pub(crate) fn absorb_storage_error<T>(
    result: Result<T, AppError>,
) -> Result<Option<T>, AppError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_database() => {
            error!(error = ?e, "🗄️ ❌ Storage failed, operation aborted");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
