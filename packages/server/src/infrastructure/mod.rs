//! Infrastructure layer for the relay server.

pub mod repository;
