// src/services/mod.rs

pub mod score_service;

pub use score_service::ScoreService;
