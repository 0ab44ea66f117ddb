//! ECS Components
//!
//! Entity components for agent identity, users, tweets and grid placement.

pub mod agent;
pub mod grid;
pub mod tweet;
pub mod user;

pub use agent::*;
pub use grid::*;
pub use tweet::*;
pub use user::*;
