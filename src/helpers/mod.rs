pub(crate) mod combine;
pub(crate) mod concat;
#[cfg(feature = "io-csv")]
pub(crate) mod csv;
pub(crate) mod joins;
#[cfg(feature = "io-jsonl")]
pub(crate) mod jsonl;
pub(crate) mod sort;
pub(crate) mod stdlib;

// Only re-export files with top-level functions
#[cfg(feature = "io-csv")]
pub use csv::*;
#[cfg(feature = "io-jsonl")]
pub use jsonl::*;
pub use sort::SortKind;
pub use stdlib::*;
