//! Match officials registry.

pub mod pool;

pub use pool::OfficialPool;
