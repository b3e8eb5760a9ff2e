//! Core types for packet payload representation.
//!
//! This module provides the value types that packets carry and the metadata
//! attached to them:
//! - [`PayloadKind`] tags what a packet holds, with a stable diagnostic name
//! - [`Timestamp`] is the microsecond creation timestamp with an unset sentinel
//! - [`Image`], [`ImageFrame`] and [`GpuBuffer`] are the opaque buffer payloads
//!   whose packet constructors take ownership of the source value
//!
//! Buffer types share their pixel data via `Arc`, so extraction hands out
//! cheap views instead of copies and disposal is deterministic.

mod gpu_buffer;
mod image;
mod image_frame;
mod payload_kind;
mod timestamp;

pub use gpu_buffer::GpuBuffer;
pub use image::{Image, ImageFormat};
pub use image_frame::ImageFrame;
pub use payload_kind::PayloadKind;
pub use timestamp::Timestamp;

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn arb_kind() -> impl Strategy<Value = PayloadKind> {
        prop::sample::select(vec![
            PayloadKind::Empty,
            PayloadKind::Bool,
            PayloadKind::BoolVector,
            PayloadKind::Int,
            PayloadKind::Float,
            PayloadKind::Double,
            PayloadKind::FloatArray,
            PayloadKind::FloatVector,
            PayloadKind::Bytes,
            PayloadKind::Image,
            PayloadKind::ImageVector,
            PayloadKind::ImageFrame,
            PayloadKind::GpuBuffer,
            PayloadKind::Proto,
            PayloadKind::ProtoVector,
        ])
    }

    fn arb_sized_format() -> impl Strategy<Value = ImageFormat> {
        prop::sample::select(vec![
            ImageFormat::Srgb,
            ImageFormat::Srgba,
            ImageFormat::Gray8,
            ImageFormat::Vec32F1,
        ])
    }

    proptest! {
        #[test]
        fn prop_kind_names_are_stable_and_nonempty(kind in arb_kind()) {
            let name = kind.name();
            prop_assert!(!name.is_empty());
            prop_assert_eq!(kind.to_string(), name);
            prop_assert!(name.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }

        #[test]
        fn prop_timestamp_roundtrips_micros(micros in any::<i64>()) {
            let ts = Timestamp::from_micros(micros);
            prop_assert_eq!(ts.micros(), micros);
            prop_assert_eq!(Timestamp::from(micros), ts);
            prop_assert_eq!(ts.is_unset(), micros == i64::MIN);
        }

        #[test]
        fn prop_timestamp_ordering_matches_micros(a in any::<i64>(), b in any::<i64>()) {
            let (ta, tb) = (Timestamp::from_micros(a), Timestamp::from_micros(b));
            prop_assert_eq!(ta.cmp(&tb), a.cmp(&b));
        }

        #[test]
        fn prop_image_accepts_exact_buffer_only(
            format in arb_sized_format(),
            width in 1usize..32,
            height in 1usize..32,
            excess in 1usize..8,
        ) {
            let bpp = format.bytes_per_pixel().unwrap();
            let exact = width * height * bpp;
            prop_assert!(Image::new(format, width, height, vec![0; exact]).is_ok());
            prop_assert!(Image::new(format, width, height, vec![0; exact + excess]).is_err());
        }

        #[test]
        fn prop_image_frame_stride_covers_rows(
            format in arb_sized_format(),
            width in 1usize..16,
            height in 1usize..16,
            padding in 0usize..8,
        ) {
            let bpp = format.bytes_per_pixel().unwrap();
            let step = width * bpp + padding;
            let frame = ImageFrame::new(format, width, height, step, vec![0; step * height]);
            prop_assert!(frame.is_ok());
        }
    }

    #[test]
    fn kind_names_are_unique() {
        let kinds = [
            PayloadKind::Empty,
            PayloadKind::Bool,
            PayloadKind::BoolVector,
            PayloadKind::Int,
            PayloadKind::Float,
            PayloadKind::Double,
            PayloadKind::FloatArray,
            PayloadKind::FloatVector,
            PayloadKind::Bytes,
            PayloadKind::Image,
            PayloadKind::ImageVector,
            PayloadKind::ImageFrame,
            PayloadKind::GpuBuffer,
            PayloadKind::Proto,
            PayloadKind::ProtoVector,
        ];
        let names: std::collections::HashSet<_> = kinds.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), kinds.len());
    }

    #[test]
    fn unset_sentinel_displays_as_unset() {
        assert_eq!(Timestamp::UNSET.to_string(), "unset");
        assert_eq!(Timestamp::from_micros(1500).to_string(), "1500us");
    }

    #[test]
    fn sequence_classification() {
        assert!(PayloadKind::FloatVector.is_sequence());
        assert!(PayloadKind::Bytes.is_sequence());
        assert!(!PayloadKind::Float.is_sequence());
        assert!(!PayloadKind::Empty.is_sequence());
        assert!(!PayloadKind::Image.is_sequence());
    }
}
