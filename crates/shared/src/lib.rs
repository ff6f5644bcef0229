//! Types shared by the maze engine, the level/score service and the front ends.

pub mod domain;
pub mod error;
pub mod protocol;
