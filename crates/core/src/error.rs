use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to open {path}: {source}")]
    DeviceOpenFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{request} failed: {source}")]
    QueryFailed {
        request: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Audio device check failed: {0}")]
    NoAudioDevices(String),

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("No audio device is open")]
    NotOpen,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),
}
