//! Core domain types
//!
//! This module contains the domain structures shared by every consumer of the
//! platform API: the generation job lifecycle states and the status payload
//! reported for a job while it runs server-side.

pub mod generation;
