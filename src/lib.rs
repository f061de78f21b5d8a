//! Multi-session Wordle.
//!
//! A server keeps any number of concurrent games in memory and exposes them
//! over HTTP; display clients poll a game to stay in sync with guesses made by
//! other actors on the same session.

pub mod api;
pub mod client;
pub mod config;
pub mod game;
pub mod models;
pub mod play;
pub mod service;
pub mod store;
pub mod words;
