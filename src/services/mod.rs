/*
 * Responsibility
 * - process-level services injected through AppState
 * - auth: token issue/verify + role authorization
 * - payment: payment-intent provider
 */
pub mod auth;
pub mod payment;
