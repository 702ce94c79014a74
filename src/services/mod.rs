pub mod chat;
pub mod closet;
pub mod config;
pub mod core;
pub mod matcher;
pub mod ranking;
pub mod tagger;
