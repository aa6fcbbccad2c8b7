//! Device capabilities consumed by the dashboard.
//!
//! The barcode scanner is an injectable [`Scanner`]; real decoders live
//! outside this workspace. With the `simulation` feature the crate also
//! provides seeded random doubles (a scanner and a GPS jitter source) so tests
//! and demos are reproducible.

pub mod scanner;

#[cfg(feature = "simulation")]
pub mod jitter;
#[cfg(feature = "simulation")]
pub mod simulated;

pub use scanner::{Frame, ScanOutcome, ScannedCode, Scanner, Symbology, resolve_scan};

#[cfg(feature = "simulation")]
pub use jitter::{GeoPoint, PositionJitter};
#[cfg(feature = "simulation")]
pub use simulated::SimulatedScanner;
