use crate::core::types::BlobFormat;
use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;

pub mod php;

pub use php::PhpSerializer;

pub trait Serializer {
    fn serialize<T: serde::Serialize>(&self, data: &T) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize<T: serde::Serialize>(&self, data: &T) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(data).map_err(Into::into)
    }
}

/// Failure decoding or encoding an opaque row blob.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("{message} at byte {offset}")]
    Syntax { offset: usize, message: String },

    #[error("unsupported {0}")]
    Unsupported(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Text codec for the serialized blobs carried inside row fields.
pub trait BlobCodec: Send + Sync {
    fn name(&self) -> &'static str;
    fn decode(&self, blob: &str) -> std::result::Result<Value, CodecError>;
    fn encode(&self, value: &Value) -> std::result::Result<String, CodecError>;
}

impl BlobCodec for JsonSerializer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn decode(&self, blob: &str) -> std::result::Result<Value, CodecError> {
        serde_json::from_str(blob).map_err(Into::into)
    }

    fn encode(&self, value: &Value) -> std::result::Result<String, CodecError> {
        serde_json::to_string(value).map_err(Into::into)
    }
}

/// Codec matching the configured blob format.
pub fn codec_for(format: BlobFormat) -> Box<dyn BlobCodec> {
    match format {
        BlobFormat::Php => Box::new(PhpSerializer),
        BlobFormat::Json => Box::new(JsonSerializer),
    }
}

pub trait FileSerializer {
    fn save_to_file<T, S: Serializer>(&self, path: &Path, data: &T, serializer: &S) -> Result<()>
    where
        T: Serialize;
}

pub struct FileUtils;

impl FileSerializer for FileUtils {
    fn save_to_file<T, S: Serializer>(&self, path: &Path, data: &T, serializer: &S) -> Result<()>
    where
        T: serde::Serialize,
    {
        let content = serializer.serialize(data)?;
        let mut file = fs::File::create(path)?;
        file.write_all(&content)?;
        Ok(())
    }
}
