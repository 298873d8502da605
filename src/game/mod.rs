//! Static game data: champion and spell tables, queues, rank weights.

mod champions;
mod queue;
mod rank;
mod spells;

pub use champions::{champion_id, champion_name};
pub use queue::{RANKED_QUEUES, is_leaderboard_queue, queue_id, queue_name};
pub use rank::{UNRANKED, division_weight, rank_weight, tier_weight};
pub use spells::spell_name;

pub const BLUE_SIDE: i32 = 100;
pub const RED_SIDE: i32 = 200;
