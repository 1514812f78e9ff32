use serde::{Deserialize, Serialize};

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    ValidationError,
    SettingsError,
    SerializationError,
    RowFormatError,
    IoError,
    InternalError,
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error severity enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Error,
    Warning,
    Info,
    Debug,
}

/// Which of the two Drupal file schemes a path rewrite applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileScheme {
    Public,
    Private,
}

impl FileScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileScheme::Public => "public",
            FileScheme::Private => "private",
        }
    }
}

impl std::fmt::Display for FileScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoding used by the opaque `data` blobs carried on field rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlobFormat {
    #[default]
    Php,
    Json,
}

impl std::str::FromStr for BlobFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "php" => Ok(BlobFormat::Php),
            "json" => Ok(BlobFormat::Json),
            other => Err(format!(
                "invalid blob format '{}'; supported values are php, json",
                other
            )),
        }
    }
}
