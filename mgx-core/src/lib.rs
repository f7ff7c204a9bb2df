#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

/// Core domain models for the energy exchange.
///
/// The models in this module are data structures with minimal business
/// logic, following the principles of the hexagonal architecture to
/// separate domain entities from their persistence and processing
/// implementations.
pub mod models;

/// Interface traits for the energy exchange.
///
/// This module contains the "ports" in the hexagonal architecture pattern.
/// These traits define the contract between the domain logic and external
/// adapters (databases, HTTP servers, schedulers) without specifying
/// implementation details, which keeps the clearing engine testable in
/// isolation and lets infrastructure be swapped without touching the core.
pub mod ports;
