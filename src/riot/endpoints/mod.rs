mod league;
mod mastery;
pub mod match_v4;
mod summoner;
