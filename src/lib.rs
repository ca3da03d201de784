#![cfg_attr(not(test), deny(clippy::panic))]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_excessive_bools,
    clippy::too_many_arguments,
    clippy::too_many_lines,
    clippy::similar_names
)]

//! # Werwolf Server
//!
//! An authoritative, in-memory session engine for a host-moderated
//! Werewolf/Mafia social deduction game. Hosts drive a finite phase
//! machine (lobby, night roles, reveal, day voting) over a small HTTP
//! command surface; the server holds all hidden state and projects each
//! participant a role-masked view.
//!
//! No database, no cloud services — sessions live for the process
//! lifetime and are reaped after a configurable idle timeout.

/// Server configuration and environment variables
pub mod config;

/// Game rules: role assignment, night resolution, win evaluation, voting,
/// and the role-masked view projector
pub mod engine;

/// Core domain types: session/participant aggregates, phases, roles, errors
pub mod domain;

/// HTTP and WebSocket surface
pub mod http;

/// Structured logging configuration
pub mod logging;

/// Metrics collection and reporting
pub mod metrics;

/// Realtime "changed" signal fan-out
pub mod realtime;

/// Command dispatch and authorization
pub mod server;

/// Session storage
pub mod store;
