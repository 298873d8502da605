mod contact;
mod home;
mod leaderboard;
mod summoner;

pub use contact::contact;
pub use home::home;
pub use leaderboard::leaderboard;
pub use summoner::{masteries, refresh, summoner};
