//! # RPC Tweak HTTP Runtime
//!
//! This crate provides the HTTP surface for the RPC Tweak simulator: an
//! Axum-based server exposing the simulated legacy RPC endpoint, the admin
//! settings API that reads and writes the configured response mode, and the
//! ambient middleware (request ids, tracing, CORS).
//!
//! The decision logic itself lives in `rpctweak-core`; this crate only
//! wires it into a request pipeline at its three extension points.

pub mod runtime;

pub use runtime::*;
