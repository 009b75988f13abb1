//! Service listings published by providers.

pub mod domain;
pub mod repository;
pub mod service;
