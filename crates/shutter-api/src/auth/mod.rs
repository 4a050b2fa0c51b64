//! Optional bearer-JWT request authentication.
//!
//! Disabled by default. When AUTH_ENABLED=true, every API route requires a
//! valid bearer token validated against the configured issuer's JWKS;
//! health, liveness, and docs stay public, and CORS preflight is always
//! permitted because the CORS layer sits outside the auth layer.

pub mod jwt_rs256;
pub mod middleware;
pub mod models;
