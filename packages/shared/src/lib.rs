//! Shared utilities for the Rakugaki server and client.

pub mod logger;
pub mod time;
