//! API layer - REST handlers and in-process client

pub mod native;
pub mod rest;
