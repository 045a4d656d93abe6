//! 应用层

pub mod cafe;
