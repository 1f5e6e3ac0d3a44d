/// Crate-wide Result alias.
///
/// Typed failures are `TakeoverError` values wrapped in `anyhow::Error`, so callers
/// can attach context with `?` and the binary can still downcast when it needs to.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
