// src/models/mod.rs

pub mod account;
pub mod envelope;
pub mod ranking;
pub mod submission;
