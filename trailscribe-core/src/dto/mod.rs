//! Data Transfer Objects for the platform API
//!
//! This module contains the request and response bodies exchanged with the
//! remote platform API. DTOs carry the wire field names (camelCase) and stay
//! free of client behavior.

pub mod generation;
