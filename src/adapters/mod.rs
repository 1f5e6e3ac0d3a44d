/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports:
/// registry and WHOIS clients, manifest readers, file output and the console.
pub mod outbound;
