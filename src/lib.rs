// Library target for benchmarks and integration tests.
// The binary entry point is main.rs; this file re-declares the module tree so
// harnesses can import types via `typefast::engine::*` / `typefast::generator::*`.
// Some helpers are only reached through one of the two targets.
#![allow(dead_code)]

pub mod app;
pub mod config;
pub mod engine;
pub mod generator;
pub mod session;
pub mod store;
