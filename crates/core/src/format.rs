use serde::{Deserialize, Serialize};

/// Sample formats a host may request when opening an output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleFormat {
    U8,
    S8,
    S16Le,
    S16Be,
    U16Le,
    U16Be,
    /// 24-bit samples in 32-bit containers
    S24Le,
    S24Be,
    S32Le,
    S32Be,
    Float,
}

impl SampleFormat {
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            Self::U8 | Self::S8 => 1,
            Self::S16Le | Self::S16Be | Self::U16Le | Self::U16Be => 2,
            Self::S24Le | Self::S24Be | Self::S32Le | Self::S32Be | Self::Float => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::U8 => "U8",
            Self::S8 => "S8",
            Self::S16Le => "S16_LE",
            Self::S16Be => "S16_BE",
            Self::U16Le => "U16_LE",
            Self::U16Be => "U16_BE",
            Self::S24Le => "S24_LE",
            Self::S24Be => "S24_BE",
            Self::S32Le => "S32_LE",
            Self::S32Be => "S32_BE",
            Self::Float => "FLOAT",
        }
    }
}

impl std::fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-channel output volume in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StereoVolume {
    pub left: u8,
    pub right: u8,
}

impl StereoVolume {
    pub const MAX: u8 = 100;

    /// Build a volume, clamping both channels to 0..=100
    pub fn new(left: u8, right: u8) -> Self {
        Self {
            left: left.min(Self::MAX),
            right: right.min(Self::MAX),
        }
    }
}

impl Default for StereoVolume {
    fn default() -> Self {
        Self::new(50, 50)
    }
}
