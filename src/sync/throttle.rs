use std::time::Duration;

use tokio::time::sleep;
use tracing::info;

/// Fixed pause after every `burst` remote fetches.
#[derive(Debug)]
pub struct FetchThrottle {
    burst: u32,
    pause: Duration,
    count: u32,
}

impl FetchThrottle {
    pub fn new(burst: u32, pause: Duration) -> Self {
        Self {
            burst: burst.max(1),
            pause,
            count: 0,
        }
    }

    /// Records one completed fetch, sleeping once the burst is used up.
    pub async fn record_fetch(&mut self) {
        self.count += 1;
        if self.count >= self.burst {
            info!(pause_secs = self.pause.as_secs(), "⏳ Fetch burst reached, pausing");
            sleep(self.pause).await;
            self.count = 0;
        }
    }
}
