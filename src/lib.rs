/*
 * Responsibility
 * - crate module tree
 * - shared by the server binary and the token-gen tool
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
