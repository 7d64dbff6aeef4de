pub mod answers;
pub mod candidate;
