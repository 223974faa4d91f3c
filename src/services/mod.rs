/*
 * Responsibility
 * - domain services that do not depend on axum (token verification / issuing)
 */
pub mod auth;
