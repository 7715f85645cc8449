pub mod check;
pub mod diff;
pub mod enforce;
