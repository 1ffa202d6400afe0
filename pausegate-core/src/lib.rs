//! Pausegate Core
//!
//! Core types shared by the pausegate services.
//!
//! This crate contains:
//! - Domain types: pause events and the pipeline system registry
//! - DTOs: request/response bodies exchanged with the pausegate server

pub mod domain;
pub mod dto;
