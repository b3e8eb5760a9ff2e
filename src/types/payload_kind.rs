//! Payload type tag definitions

use serde::{Deserialize, Serialize};

/// Type tag identifying what a packet's payload holds.
///
/// The tag is fixed when the packet is constructed and never changes; every
/// typed extractor and validator checks it before touching the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayloadKind {
    /// Placeholder packet carrying no payload
    Empty,
    /// Boolean scalar
    Bool,
    /// Boolean sequence
    BoolVector,
    /// 32-bit signed integer scalar
    Int,
    /// 32-bit floating point scalar
    Float,
    /// 64-bit floating point scalar
    Double,
    /// Fixed-length 32-bit float array
    FloatArray,
    /// Growable 32-bit float sequence
    FloatVector,
    /// Byte sequence (also backs string packets)
    Bytes,
    /// Opaque image buffer
    Image,
    /// Sequence of opaque image buffers
    ImageVector,
    /// Opaque image-frame buffer with row stride
    ImageFrame,
    /// Opaque GPU texture handle
    GpuBuffer,
    /// Serialized structured message
    Proto,
    /// Sequence of serialized structured messages
    ProtoVector,
}

impl PayloadKind {
    /// Returns a stable lowercase tag name for diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            PayloadKind::Empty => "empty",
            PayloadKind::Bool => "bool",
            PayloadKind::BoolVector => "bool_vector",
            PayloadKind::Int => "int",
            PayloadKind::Float => "float",
            PayloadKind::Double => "double",
            PayloadKind::FloatArray => "float_array",
            PayloadKind::FloatVector => "float_vector",
            PayloadKind::Bytes => "bytes",
            PayloadKind::Image => "image",
            PayloadKind::ImageVector => "image_vector",
            PayloadKind::ImageFrame => "image_frame",
            PayloadKind::GpuBuffer => "gpu_buffer",
            PayloadKind::Proto => "proto",
            PayloadKind::ProtoVector => "proto_vector",
        }
    }

    /// Whether this kind is a sequence payload with an element count.
    pub const fn is_sequence(&self) -> bool {
        matches!(
            self,
            PayloadKind::BoolVector
                | PayloadKind::FloatArray
                | PayloadKind::FloatVector
                | PayloadKind::Bytes
                | PayloadKind::ImageVector
                | PayloadKind::ProtoVector
        )
    }
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
