//! Takeover analysis core
//!
//! Pure logic over the outbound ports: the dependency walk, the namespace policy
//! and the dangling-domain check. No I/O happens here directly.

pub mod domain;
pub mod policies;
pub mod services;
