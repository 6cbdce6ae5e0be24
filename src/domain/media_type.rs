#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Midi,
    Wav,
    Mpeg,
    Flac,
    Ogg,
    Json,
    Text,
    Binary,
}

impl MediaType {
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "mid" | "midi" => Self::Midi,
            "wav" => Self::Wav,
            "mp3" => Self::Mpeg,
            "flac" => Self::Flac,
            "ogg" => Self::Ogg,
            "json" => Self::Json,
            "txt" => Self::Text,
            _ => Self::Binary,
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Midi => "audio/midi",
            Self::Wav => "audio/wav",
            Self::Mpeg => "audio/mpeg",
            Self::Flac => "audio/flac",
            Self::Ogg => "audio/ogg",
            Self::Json => "application/json",
            Self::Text => "text/plain",
            Self::Binary => "application/octet-stream",
        }
    }
}
