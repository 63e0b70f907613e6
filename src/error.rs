use std::fmt;

/// Which of the two display device endpoints an operation touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Control endpoint accepting the single-byte `C`/`P` commands
    Command,
    /// Raster endpoint accepting the packed bitmap
    Image,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Command => write!(f, "command"),
            Channel::Image => write!(f, "image"),
        }
    }
}

/// Error types for decoding receiver output and driving the display
#[derive(Debug)]
pub enum ShowktsError {
    /// I/O errors
    Io(std::io::Error),
    /// Errors from the CSV record reader
    Csv(csv::Error),
    /// Record tag is not `$GPRMC`
    InvalidSentenceType(String),
    /// GPRMC record without exactly 13 fields
    InvalidFieldCount(usize),
    /// A display channel could not be opened; nothing was written
    DeviceUnavailable {
        channel: Channel,
        source: std::io::Error,
    },
    /// A write to an already opened display channel failed
    DeviceWrite {
        channel: Channel,
        source: std::io::Error,
    },
    /// Text could not be rasterized into a frame
    Render(String),
    /// Invalid configuration
    Config(String),
    /// Serial line speed with no termios equivalent
    UnsupportedBaudRate(u32),
}

impl fmt::Display for ShowktsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShowktsError::Io(err) => write!(f, "I/O error: {}", err),
            ShowktsError::Csv(err) => write!(f, "Record read error: {}", err),
            ShowktsError::InvalidSentenceType(tag) => {
                write!(f, "Record is not a GPRMC record: {:?}", tag)
            }
            ShowktsError::InvalidFieldCount(count) => {
                write!(f, "Record does not have 13 fields (found {})", count)
            }
            ShowktsError::DeviceUnavailable { channel, source } => {
                write!(f, "Display {} channel unavailable: {}", channel, source)
            }
            ShowktsError::DeviceWrite { channel, source } => {
                write!(f, "Write to display {} channel failed: {}", channel, source)
            }
            ShowktsError::Render(msg) => write!(f, "Render error: {}", msg),
            ShowktsError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ShowktsError::UnsupportedBaudRate(baud) => {
                write!(f, "Unsupported baud rate: {}", baud)
            }
        }
    }
}

impl std::error::Error for ShowktsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShowktsError::Io(err) => Some(err),
            ShowktsError::Csv(err) => Some(err),
            ShowktsError::DeviceUnavailable { source, .. } => Some(source),
            ShowktsError::DeviceWrite { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ShowktsError {
    fn from(err: std::io::Error) -> Self {
        ShowktsError::Io(err)
    }
}

impl From<csv::Error> for ShowktsError {
    fn from(err: csv::Error) -> Self {
        ShowktsError::Csv(err)
    }
}

pub type Result<T> = std::result::Result<T, ShowktsError>;
