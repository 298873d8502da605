mod client;
mod endpoints;
mod region;
mod types;

pub use client::RiotClient;
pub use endpoints::match_v4::MatchListQuery;
pub use region::Platform;
pub use types::*;
