//! Pool allocation and persistence.

pub mod allocator;
pub mod service;
