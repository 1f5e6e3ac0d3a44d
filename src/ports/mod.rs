/// Ports module defining interfaces for hexagonal architecture
///
/// The use case drives the domain directly; these are the driven ports
/// (infrastructure interfaces) that adapters implement.
pub mod outbound;
