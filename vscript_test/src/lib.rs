//! Contains helpers shared by the property based tests of the VScript crates.

pub mod input;
