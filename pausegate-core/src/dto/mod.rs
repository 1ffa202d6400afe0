//! Data Transfer Objects for the pausegate HTTP API

pub mod pause;
