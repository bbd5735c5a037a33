//! API handlers for Darkroom REST endpoints

pub mod health;
pub mod openapi;
pub mod tasks;
