use crate::mail::Mailer;
use crate::sync::Syncer;

pub struct AppState {
    pub syncer: Syncer,
    pub mailer: Mailer,
    pub posts_per_page: u32,
}

impl AppState {
    pub fn new(syncer: Syncer, mailer: Mailer, posts_per_page: u32) -> Self {
        Self {
            syncer,
            mailer,
            posts_per_page: posts_per_page.max(1),
        }
    }
}
