//! Games the engine can drive
pub mod tap;
