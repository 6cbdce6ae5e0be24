use std::io;
use std::path::Path;

use bytes::Bytes;
use futures::stream::{self, BoxStream};

/// One uploaded audio file. The filename only contributes its extension.
pub struct ConversionRequest<'a> {
    pub filename: String,
    pub stream: BoxStream<'a, Result<Bytes, io::Error>>,
}

impl<'a> ConversionRequest<'a> {
    pub fn new(filename: impl Into<String>, stream: BoxStream<'a, Result<Bytes, io::Error>>) -> Self {
        Self {
            filename: filename.into(),
            stream,
        }
    }

    /// Extension of the original filename, if it is a plain alphanumeric one.
    ///
    /// Anything else is dropped so the staged name can be embedded in a shell command unharmed.
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
    }
}

impl ConversionRequest<'static> {
    pub fn from_bytes(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let chunks: Vec<Result<Bytes, io::Error>> = vec![Ok(data.into())];
        Self::new(filename, Box::pin(stream::iter(chunks)))
    }
}
