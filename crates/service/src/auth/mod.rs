//! Registration, login and bearer-token handling.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod token;
