//! CLI command implementations

pub mod battle;
pub mod contest;
pub mod debate;
pub mod info;
pub mod models;
pub mod tools;
pub mod youtube;
