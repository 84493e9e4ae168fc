//! Rigid4 - transform chain benchmark
//!
//! Composes one reference sequence of rotations and translations as a matrix
//! chain, a quaternion plus translation vector, and a dual quaternion, checks
//! that all three agree, then times each.

pub mod bench;
pub mod chains;
pub mod config;
