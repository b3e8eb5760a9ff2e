//! Type-erased payload storage

use crate::packet::proto::ProtoBytes;
use crate::types::{GpuBuffer, Image, ImageFrame, PayloadKind};

/// Type-erased packet contents.
///
/// The variant is fixed when the packet is constructed and never mutated;
/// `Packet` checks [`Payload::kind`] before every typed access.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Payload {
    Empty,
    Bool(bool),
    BoolVector(Vec<bool>),
    Int(i32),
    Float(f32),
    Double(f64),
    FloatArray(Box<[f32]>),
    FloatVector(Vec<f32>),
    Bytes(Vec<u8>),
    Image(Image),
    ImageVector(Vec<Image>),
    ImageFrame(ImageFrame),
    GpuBuffer(GpuBuffer),
    Proto(ProtoBytes),
    ProtoVector(Vec<ProtoBytes>),
}

impl Payload {
    pub(crate) fn kind(&self) -> PayloadKind {
        match self {
            Payload::Empty => PayloadKind::Empty,
            Payload::Bool(_) => PayloadKind::Bool,
            Payload::BoolVector(_) => PayloadKind::BoolVector,
            Payload::Int(_) => PayloadKind::Int,
            Payload::Float(_) => PayloadKind::Float,
            Payload::Double(_) => PayloadKind::Double,
            Payload::FloatArray(_) => PayloadKind::FloatArray,
            Payload::FloatVector(_) => PayloadKind::FloatVector,
            Payload::Bytes(_) => PayloadKind::Bytes,
            Payload::Image(_) => PayloadKind::Image,
            Payload::ImageVector(_) => PayloadKind::ImageVector,
            Payload::ImageFrame(_) => PayloadKind::ImageFrame,
            Payload::GpuBuffer(_) => PayloadKind::GpuBuffer,
            Payload::Proto(_) => PayloadKind::Proto,
            Payload::ProtoVector(_) => PayloadKind::ProtoVector,
        }
    }

    /// Element count for sequence payloads, byte count for byte payloads.
    pub(crate) fn len(&self) -> Option<usize> {
        match self {
            Payload::BoolVector(v) => Some(v.len()),
            Payload::FloatArray(v) => Some(v.len()),
            Payload::FloatVector(v) => Some(v.len()),
            Payload::Bytes(v) => Some(v.len()),
            Payload::ImageVector(v) => Some(v.len()),
            Payload::ProtoVector(v) => Some(v.len()),
            _ => None,
        }
    }
}
