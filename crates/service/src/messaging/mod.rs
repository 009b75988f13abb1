//! Direct messages and the conversation list derived from them.

pub mod domain;
pub mod repository;
pub mod service;
