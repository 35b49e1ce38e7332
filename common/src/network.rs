pub mod candidate;
pub mod target;
