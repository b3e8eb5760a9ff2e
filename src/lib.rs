//! Type-safe packet value container for timestamp-ordered stream processing.
//!
//! Packline provides the [`Packet`] type: an immutable, type-erased value
//! container tagged with a microsecond creation timestamp, the data unit that
//! stream-processing engines thread between stages.
//!
//! # Features
//!
//! - **Typed construction**: one constructor per supported payload type, each
//!   with a timestamped `_at` variant
//! - **Typed extraction**: tag-checked extractors that fail distinctly on a
//!   payload type mismatch, plus validation-only checks that skip decoding
//! - **Move semantics**: buffer payloads (images, frames, GPU handles)
//!   transfer ownership into the packet at construction
//! - **Deterministic disposal**: owning and referencing packets share storage
//!   via `Arc`; release happens exactly once, with no garbage collector in
//!   the loop
//!
//! Every failure is a recoverable [`PacketError`]; nothing aborts the
//! process. (Some native packet engines abort on internal faults on certain
//! platforms; this implementation does not carry that behavior.)
//!
//! # Quick Start
//!
//! ```rust
//! use packline::{Packet, PayloadKind};
//!
//! let packet = Packet::create_float_vector_at(vec![0.5, 0.7], 16_000);
//!
//! assert!(packet.validate_as_float_vector().is_ok());
//! assert_eq!(packet.get_float_vector()?, vec![0.5, 0.7]);
//! assert_eq!(packet.timestamp_microseconds(), 16_000);
//! assert!(packet.get_bool().is_err()); // wrong type, distinct error
//! # Ok::<(), packline::PacketError>(())
//! ```

mod error;
mod packet;
pub mod types;

// Core exports
pub use error::{PacketError, Result, StatusCode};
pub use packet::Packet;
pub use types::{GpuBuffer, Image, ImageFormat, ImageFrame, PayloadKind, Timestamp};
