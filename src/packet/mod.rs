//! The typed packet value container.
//!
//! A [`Packet`] is an immutable, type-erased value tagged with a creation
//! [`Timestamp`]. Construction fixes the payload type; extraction validates
//! the tag before touching the payload and fails with a distinguishable
//! type-mismatch error when it differs. Validation-only checks mirror every
//! extractor for call sites that branch on type without paying decode cost.
//!
//! Payloads are shared via `Arc`: an owning packet and any non-owning
//! references produced by [`Packet::as_reference`] read the same underlying
//! storage, and the storage is released exactly once when the last owner
//! drops. Constructors for the opaque buffer types ([`Image`], [`ImageFrame`],
//! [`GpuBuffer`]) consume their argument; ownership transfers into the packet
//! and the source value is gone, not copied.

use std::fmt;
use std::sync::Arc;

use prost::{Message, Name};
use tracing::warn;

use crate::error::{PacketError, Result};
use crate::types::{GpuBuffer, Image, ImageFrame, PayloadKind, Timestamp};

mod payload;
mod proto;

use payload::Payload;
use proto::ProtoBytes;

struct PacketInner {
    payload: Payload,
    timestamp: Timestamp,
}

/// An immutable, type-erased, timestamped value container.
pub struct Packet {
    inner: Arc<PacketInner>,
    owner: bool,
}

impl Packet {
    fn owning(payload: Payload, timestamp: Timestamp) -> Self {
        Self { inner: Arc::new(PacketInner { payload, timestamp }), owner: true }
    }

    /// Create a placeholder packet holding no payload.
    pub fn empty() -> Self {
        Self::owning(Payload::Empty, Timestamp::UNSET)
    }

    /// Create a non-owning reference to this packet's payload.
    ///
    /// The reference reads the same underlying storage. Dropping it never
    /// releases that storage; release happens exactly once when the last
    /// owning packet drops.
    pub fn as_reference(&self) -> Packet {
        Packet { inner: Arc::clone(&self.inner), owner: false }
    }

    /// Whether this packet is responsible for releasing the payload storage.
    pub fn is_owner(&self) -> bool {
        self.owner
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a bool packet.
    pub fn create_bool(value: bool) -> Self {
        Self::owning(Payload::Bool(value), Timestamp::UNSET)
    }

    /// Create a bool packet with a timestamp.
    pub fn create_bool_at(value: bool, timestamp_micros: i64) -> Self {
        Self::owning(Payload::Bool(value), Timestamp::from_micros(timestamp_micros))
    }

    /// Create a bool vector packet.
    pub fn create_bool_vector(value: Vec<bool>) -> Self {
        Self::owning(Payload::BoolVector(value), Timestamp::UNSET)
    }

    /// Create a bool vector packet with a timestamp.
    pub fn create_bool_vector_at(value: Vec<bool>, timestamp_micros: i64) -> Self {
        Self::owning(Payload::BoolVector(value), Timestamp::from_micros(timestamp_micros))
    }

    /// Create an int packet.
    pub fn create_int(value: i32) -> Self {
        Self::owning(Payload::Int(value), Timestamp::UNSET)
    }

    /// Create an int packet with a timestamp.
    pub fn create_int_at(value: i32, timestamp_micros: i64) -> Self {
        Self::owning(Payload::Int(value), Timestamp::from_micros(timestamp_micros))
    }

    /// Create a float packet.
    pub fn create_float(value: f32) -> Self {
        Self::owning(Payload::Float(value), Timestamp::UNSET)
    }

    /// Create a float packet with a timestamp.
    pub fn create_float_at(value: f32, timestamp_micros: i64) -> Self {
        Self::owning(Payload::Float(value), Timestamp::from_micros(timestamp_micros))
    }

    /// Create a double packet.
    pub fn create_double(value: f64) -> Self {
        Self::owning(Payload::Double(value), Timestamp::UNSET)
    }

    /// Create a double packet with a timestamp.
    pub fn create_double_at(value: f64, timestamp_micros: i64) -> Self {
        Self::owning(Payload::Double(value), Timestamp::from_micros(timestamp_micros))
    }

    /// Create a fixed-length float array packet.
    pub fn create_float_array(value: Vec<f32>) -> Self {
        Self::owning(Payload::FloatArray(value.into_boxed_slice()), Timestamp::UNSET)
    }

    /// Create a fixed-length float array packet with a timestamp.
    pub fn create_float_array_at(value: Vec<f32>, timestamp_micros: i64) -> Self {
        Self::owning(
            Payload::FloatArray(value.into_boxed_slice()),
            Timestamp::from_micros(timestamp_micros),
        )
    }

    /// Create a float vector packet.
    pub fn create_float_vector(value: Vec<f32>) -> Self {
        Self::owning(Payload::FloatVector(value), Timestamp::UNSET)
    }

    /// Create a float vector packet with a timestamp.
    pub fn create_float_vector_at(value: Vec<f32>, timestamp_micros: i64) -> Self {
        Self::owning(Payload::FloatVector(value), Timestamp::from_micros(timestamp_micros))
    }

    /// Create a string packet.
    pub fn create_string(value: impl Into<String>) -> Self {
        Self::owning(Payload::Bytes(value.into().into_bytes()), Timestamp::UNSET)
    }

    /// Create a string packet with a timestamp.
    pub fn create_string_at(value: impl Into<String>, timestamp_micros: i64) -> Self {
        Self::owning(
            Payload::Bytes(value.into().into_bytes()),
            Timestamp::from_micros(timestamp_micros),
        )
    }

    /// Create a byte-sequence packet. Shares the tag with string packets;
    /// [`Packet::get_string`] additionally requires valid UTF-8.
    pub fn create_bytes(value: Vec<u8>) -> Self {
        Self::owning(Payload::Bytes(value), Timestamp::UNSET)
    }

    /// Create a byte-sequence packet with a timestamp.
    pub fn create_bytes_at(value: Vec<u8>, timestamp_micros: i64) -> Self {
        Self::owning(Payload::Bytes(value), Timestamp::from_micros(timestamp_micros))
    }

    /// Create an image packet. Takes ownership of `value`.
    pub fn create_image(value: Image) -> Self {
        Self::owning(Payload::Image(value), Timestamp::UNSET)
    }

    /// Create an image packet with a timestamp. Takes ownership of `value`.
    pub fn create_image_at(value: Image, timestamp_micros: i64) -> Self {
        Self::owning(Payload::Image(value), Timestamp::from_micros(timestamp_micros))
    }

    /// Create an image vector packet. Takes ownership of the images.
    pub fn create_image_vector(value: Vec<Image>) -> Self {
        Self::owning(Payload::ImageVector(value), Timestamp::UNSET)
    }

    /// Create an image vector packet with a timestamp.
    pub fn create_image_vector_at(value: Vec<Image>, timestamp_micros: i64) -> Self {
        Self::owning(Payload::ImageVector(value), Timestamp::from_micros(timestamp_micros))
    }

    /// Create an image-frame packet. Takes ownership of `value`.
    pub fn create_image_frame(value: ImageFrame) -> Self {
        Self::owning(Payload::ImageFrame(value), Timestamp::UNSET)
    }

    /// Create an image-frame packet with a timestamp. Takes ownership of `value`.
    pub fn create_image_frame_at(value: ImageFrame, timestamp_micros: i64) -> Self {
        Self::owning(Payload::ImageFrame(value), Timestamp::from_micros(timestamp_micros))
    }

    /// Create a GPU buffer packet. Takes ownership of the handle.
    pub fn create_gpu_buffer(value: GpuBuffer) -> Self {
        Self::owning(Payload::GpuBuffer(value), Timestamp::UNSET)
    }

    /// Create a GPU buffer packet with a timestamp.
    pub fn create_gpu_buffer_at(value: GpuBuffer, timestamp_micros: i64) -> Self {
        Self::owning(Payload::GpuBuffer(value), Timestamp::from_micros(timestamp_micros))
    }

    /// Create a structured-message packet.
    ///
    /// Serialization failure is a construction error; a packet is only
    /// produced from a well-formed serialization.
    pub fn create_proto<T: Message + Name>(value: &T) -> Result<Self> {
        Ok(Self::owning(Payload::Proto(ProtoBytes::encode(value)?), Timestamp::UNSET))
    }

    /// Create a structured-message packet with a timestamp.
    pub fn create_proto_at<T: Message + Name>(value: &T, timestamp_micros: i64) -> Result<Self> {
        Ok(Self::owning(
            Payload::Proto(ProtoBytes::encode(value)?),
            Timestamp::from_micros(timestamp_micros),
        ))
    }

    /// Create a structured-message packet from a type name and pre-serialized
    /// wire bytes, validating the framing.
    pub fn create_proto_serialized(type_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        Ok(Self::owning(Payload::Proto(ProtoBytes::new(type_name, bytes)?), Timestamp::UNSET))
    }

    /// Create a structured-message packet from pre-serialized bytes with a
    /// timestamp.
    pub fn create_proto_serialized_at(
        type_name: impl Into<String>,
        bytes: Vec<u8>,
        timestamp_micros: i64,
    ) -> Result<Self> {
        Ok(Self::owning(
            Payload::Proto(ProtoBytes::new(type_name, bytes)?),
            Timestamp::from_micros(timestamp_micros),
        ))
    }

    /// Create a packet holding a sequence of structured messages.
    pub fn create_proto_vector<T: Message + Name>(values: &[T]) -> Result<Self> {
        let encoded = values.iter().map(ProtoBytes::encode).collect::<Result<Vec<_>>>()?;
        Ok(Self::owning(Payload::ProtoVector(encoded), Timestamp::UNSET))
    }

    /// Create a structured-message sequence packet with a timestamp.
    pub fn create_proto_vector_at<T: Message + Name>(
        values: &[T],
        timestamp_micros: i64,
    ) -> Result<Self> {
        let encoded = values.iter().map(ProtoBytes::encode).collect::<Result<Vec<_>>>()?;
        Ok(Self::owning(Payload::ProtoVector(encoded), Timestamp::from_micros(timestamp_micros)))
    }

    // ------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------

    /// Payload type tag, fixed at construction.
    pub fn kind(&self) -> PayloadKind {
        self.inner.payload.kind()
    }

    /// Whether this packet holds no payload.
    pub fn is_empty(&self) -> bool {
        matches!(self.inner.payload, Payload::Empty)
    }

    /// Creation timestamp. [`Timestamp::UNSET`] when none was provided.
    pub fn timestamp(&self) -> Timestamp {
        self.inner.timestamp
    }

    /// Creation timestamp as a microsecond count.
    pub fn timestamp_microseconds(&self) -> i64 {
        self.inner.timestamp.micros()
    }

    fn payload(&self) -> &Payload {
        &self.inner.payload
    }

    fn mismatch(&self, expected: PayloadKind) -> PacketError {
        PacketError::mismatch(expected, self.kind())
    }

    // ------------------------------------------------------------------
    // Extraction
    // ------------------------------------------------------------------

    /// Get the content as a bool.
    pub fn get_bool(&self) -> Result<bool> {
        match self.payload() {
            Payload::Bool(v) => Ok(*v),
            _ => Err(self.mismatch(PayloadKind::Bool)),
        }
    }

    /// Get the content of a bool vector packet.
    pub fn get_bool_vector(&self) -> Result<Vec<bool>> {
        match self.payload() {
            Payload::BoolVector(v) => Ok(v.clone()),
            _ => Err(self.mismatch(PayloadKind::BoolVector)),
        }
    }

    /// Fill `dest` with the content of a bool vector packet.
    ///
    /// Clears `dest` first. Returns the number of elements written.
    pub fn get_bool_vector_into(&self, dest: &mut Vec<bool>) -> Result<usize> {
        let src = match self.payload() {
            Payload::BoolVector(v) => v,
            _ => return Err(self.mismatch(PayloadKind::BoolVector)),
        };
        dest.clear();
        dest.extend_from_slice(src);
        Ok(src.len())
    }

    /// Get the content as an int.
    pub fn get_int(&self) -> Result<i32> {
        match self.payload() {
            Payload::Int(v) => Ok(*v),
            _ => Err(self.mismatch(PayloadKind::Int)),
        }
    }

    /// Get the content as a float.
    pub fn get_float(&self) -> Result<f32> {
        match self.payload() {
            Payload::Float(v) => Ok(*v),
            _ => Err(self.mismatch(PayloadKind::Float)),
        }
    }

    /// Get the content as a double.
    pub fn get_double(&self) -> Result<f64> {
        match self.payload() {
            Payload::Double(v) => Ok(*v),
            _ => Err(self.mismatch(PayloadKind::Double)),
        }
    }

    /// Get the content of a float array packet.
    pub fn get_float_array(&self) -> Result<Vec<f32>> {
        match self.payload() {
            Payload::FloatArray(v) => Ok(v.to_vec()),
            _ => Err(self.mismatch(PayloadKind::FloatArray)),
        }
    }

    /// Fill `dest` from a float array packet.
    ///
    /// Copies `min(dest.len(), payload len)` elements, leaving any excess in
    /// `dest` untouched. Returns the number of elements written.
    pub fn get_float_array_into(&self, dest: &mut [f32]) -> Result<usize> {
        let src = match self.payload() {
            Payload::FloatArray(v) => &v[..],
            _ => return Err(self.mismatch(PayloadKind::FloatArray)),
        };
        Ok(copy_truncating(src, dest, "float array"))
    }

    /// Get the content of a float vector packet.
    pub fn get_float_vector(&self) -> Result<Vec<f32>> {
        match self.payload() {
            Payload::FloatVector(v) => Ok(v.clone()),
            _ => Err(self.mismatch(PayloadKind::FloatVector)),
        }
    }

    /// Fill `dest` with the content of a float vector packet.
    ///
    /// Clears `dest` first. Returns the number of elements written.
    pub fn get_float_vector_into(&self, dest: &mut Vec<f32>) -> Result<usize> {
        let src = match self.payload() {
            Payload::FloatVector(v) => v,
            _ => return Err(self.mismatch(PayloadKind::FloatVector)),
        };
        dest.clear();
        dest.extend_from_slice(src);
        Ok(src.len())
    }

    /// Get the content of a byte-sequence (or string) packet.
    pub fn get_bytes(&self) -> Result<Vec<u8>> {
        match self.payload() {
            Payload::Bytes(v) => Ok(v.clone()),
            _ => Err(self.mismatch(PayloadKind::Bytes)),
        }
    }

    /// Fill `dest` from a byte-sequence packet.
    ///
    /// Copies `min(dest.len(), payload len)` bytes, leaving any excess in
    /// `dest` untouched. Returns the number of bytes written.
    pub fn get_bytes_into(&self, dest: &mut [u8]) -> Result<usize> {
        let src = match self.payload() {
            Payload::Bytes(v) => &v[..],
            _ => return Err(self.mismatch(PayloadKind::Bytes)),
        };
        Ok(copy_truncating(src, dest, "byte string"))
    }

    /// Get the content as a UTF-8 string.
    ///
    /// Byte payloads that are not valid UTF-8 fail with an
    /// `INVALID_ARGUMENT` status error.
    pub fn get_string(&self) -> Result<String> {
        match self.payload() {
            Payload::Bytes(v) => {
                let s = std::str::from_utf8(v)?;
                Ok(s.to_owned())
            }
            _ => Err(self.mismatch(PayloadKind::Bytes)),
        }
    }

    /// Get a view of the image payload. The packet retains ownership.
    pub fn get_image(&self) -> Result<&Image> {
        match self.payload() {
            Payload::Image(v) => Ok(v),
            _ => Err(self.mismatch(PayloadKind::Image)),
        }
    }

    /// Get a view of the image vector payload.
    pub fn get_image_vector(&self) -> Result<&[Image]> {
        match self.payload() {
            Payload::ImageVector(v) => Ok(v),
            _ => Err(self.mismatch(PayloadKind::ImageVector)),
        }
    }

    /// Fill `dest` with views of the image vector payload.
    ///
    /// Clears `dest` first. The clones share pixel data with the packet.
    /// Returns the number of elements written.
    pub fn get_image_vector_into(&self, dest: &mut Vec<Image>) -> Result<usize> {
        let src = match self.payload() {
            Payload::ImageVector(v) => v,
            _ => return Err(self.mismatch(PayloadKind::ImageVector)),
        };
        dest.clear();
        dest.extend(src.iter().cloned());
        Ok(src.len())
    }

    /// Get a view of the image-frame payload. The packet retains ownership.
    pub fn get_image_frame(&self) -> Result<&ImageFrame> {
        match self.payload() {
            Payload::ImageFrame(v) => Ok(v),
            _ => Err(self.mismatch(PayloadKind::ImageFrame)),
        }
    }

    /// Get a view of the GPU buffer handle. The packet retains ownership.
    pub fn get_gpu_buffer(&self) -> Result<&GpuBuffer> {
        match self.payload() {
            Payload::GpuBuffer(v) => Ok(v),
            _ => Err(self.mismatch(PayloadKind::GpuBuffer)),
        }
    }

    /// Decode the structured-message payload as `T`.
    ///
    /// The recorded type name must match `T`; a different recorded type fails
    /// with a `NOT_FOUND` status naming it, and a decode failure with
    /// `INVALID_ARGUMENT`.
    pub fn get_proto<T: Message + Default + Name>(&self) -> Result<T> {
        match self.payload() {
            Payload::Proto(p) => p.decode(),
            _ => Err(self.mismatch(PayloadKind::Proto)),
        }
    }

    /// Recorded full type name of the structured-message payload.
    pub fn proto_type_name(&self) -> Result<&str> {
        match self.payload() {
            Payload::Proto(p) => Ok(p.type_name()),
            _ => Err(self.mismatch(PayloadKind::Proto)),
        }
    }

    /// Decode a structured-message sequence payload as `Vec<T>`.
    pub fn get_proto_vector<T: Message + Default + Name>(&self) -> Result<Vec<T>> {
        match self.payload() {
            Payload::ProtoVector(v) => v.iter().map(ProtoBytes::decode).collect(),
            _ => Err(self.mismatch(PayloadKind::ProtoVector)),
        }
    }

    /// Fill `dest` by decoding a structured-message sequence payload.
    ///
    /// Decodes every element before touching `dest`; on failure `dest` is
    /// left as it was. Returns the number of elements written.
    pub fn get_proto_vector_into<T: Message + Default + Name>(
        &self,
        dest: &mut Vec<T>,
    ) -> Result<usize> {
        let decoded = self.get_proto_vector()?;
        let count = decoded.len();
        *dest = decoded;
        Ok(count)
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Check the payload tag without decoding the payload.
    pub fn validate_as(&self, expected: PayloadKind) -> Result<()> {
        if self.kind() == expected { Ok(()) } else { Err(self.mismatch(expected)) }
    }

    /// Validate that the content is a bool.
    pub fn validate_as_bool(&self) -> Result<()> {
        self.validate_as(PayloadKind::Bool)
    }

    /// Validate that the content is a bool vector.
    pub fn validate_as_bool_vector(&self) -> Result<()> {
        self.validate_as(PayloadKind::BoolVector)
    }

    /// Validate that the content is an int.
    pub fn validate_as_int(&self) -> Result<()> {
        self.validate_as(PayloadKind::Int)
    }

    /// Validate that the content is a float.
    pub fn validate_as_float(&self) -> Result<()> {
        self.validate_as(PayloadKind::Float)
    }

    /// Validate that the content is a double.
    pub fn validate_as_double(&self) -> Result<()> {
        self.validate_as(PayloadKind::Double)
    }

    /// Validate that the content is a float array.
    pub fn validate_as_float_array(&self) -> Result<()> {
        self.validate_as(PayloadKind::FloatArray)
    }

    /// Validate that the content is a float vector.
    pub fn validate_as_float_vector(&self) -> Result<()> {
        self.validate_as(PayloadKind::FloatVector)
    }

    /// Validate that the content is a byte sequence or string.
    pub fn validate_as_string(&self) -> Result<()> {
        self.validate_as(PayloadKind::Bytes)
    }

    /// Validate that the content is an image.
    pub fn validate_as_image(&self) -> Result<()> {
        self.validate_as(PayloadKind::Image)
    }

    /// Validate that the content is an image vector.
    pub fn validate_as_image_vector(&self) -> Result<()> {
        self.validate_as(PayloadKind::ImageVector)
    }

    /// Validate that the content is an image frame.
    pub fn validate_as_image_frame(&self) -> Result<()> {
        self.validate_as(PayloadKind::ImageFrame)
    }

    /// Validate that the content is a GPU buffer.
    pub fn validate_as_gpu_buffer(&self) -> Result<()> {
        self.validate_as(PayloadKind::GpuBuffer)
    }

    /// Validate that the content is a structured message.
    pub fn validate_as_proto(&self) -> Result<()> {
        self.validate_as(PayloadKind::Proto)
    }

    /// Validate that the content is a structured-message sequence.
    pub fn validate_as_proto_vector(&self) -> Result<()> {
        self.validate_as(PayloadKind::ProtoVector)
    }
}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packet")
            .field("kind", &self.kind())
            .field("timestamp", &self.timestamp())
            .field("owner", &self.owner)
            .field("len", &self.inner.payload.len())
            .finish()
    }
}

/// Copy `min(src.len(), dest.len())` elements into `dest`, reporting the
/// count written. Logs when the destination truncates the payload.
fn copy_truncating<T: Copy>(src: &[T], dest: &mut [T], what: &str) -> usize {
    let written = src.len().min(dest.len());
    dest[..written].copy_from_slice(&src[..written]);
    if written < src.len() {
        warn!(payload_len = src.len(), dest_len = dest.len(), "{what} fill truncated");
    }
    written
}
