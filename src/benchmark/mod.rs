pub mod benchmark;
pub mod timer;
