/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - hand the authenticated context (AuthCtx) to handlers
 * - axum plumbing stays in core; the type lives in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::AuthCtx;
