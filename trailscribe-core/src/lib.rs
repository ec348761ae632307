//! Trailscribe Core
//!
//! Core types for the Trailscribe travel-content platform client.
//!
//! This crate contains:
//! - Domain types: Generation job states and status payloads
//! - DTOs: Request/response bodies for the platform API

pub mod domain;
pub mod dto;
