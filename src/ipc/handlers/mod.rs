pub mod actions;
pub mod core;
pub mod entities;
pub mod session;
pub mod stats;
pub mod students;
pub mod teachers;
