//! Unit test suite mirroring the crate module tree

mod algorithm;
mod constraints;
mod math;
mod model;
mod spatial;
