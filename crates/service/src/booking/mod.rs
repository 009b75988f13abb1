//! Booking lifecycle: `pending → confirmed → completed`, or `pending → cancelled`.

pub mod domain;
pub mod repository;
pub mod service;
