//! ogpp: The Old Games & Player Profiles League Database.
//!
//! Summoner profiles served from a local SQLite store that is filled on
//! demand from the Riot API.

pub mod config;
pub mod db;
pub mod error;
pub mod game;
pub mod logging;
pub mod mail;
pub mod riot;
pub mod stats;
pub mod sync;
pub mod web;
