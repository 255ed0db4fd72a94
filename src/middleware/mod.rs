/*
 * Responsibility
 * - public entry points of the middleware layer
 * - auth: bearer-token gate; cors / http: cross-cutting transport concerns
 */
pub mod auth;
pub mod cors;
pub mod http;
