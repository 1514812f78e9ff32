//! Utility helpers: blob codecs, JSON/file serializers and loose value checks.
pub mod serialization;
pub mod value;

pub use serialization::{
    codec_for, BlobCodec, CodecError, FileSerializer, FileUtils, JsonSerializer, PhpSerializer,
    Serializer,
};
pub use value::{is_set, is_truthy, scalar_to_string};
