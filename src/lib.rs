//! showkts Library
//!
//! Reads NMEA 0183 output from a serial GPS receiver, decodes the speed over
//! ground from `$GPRMC` sentences and shows it on a 264x176 e-paper display
//! driven through two device files.
//!
//! # Features
//!
//! - **`cli`** (default): Build the `showkts` command-line binary
//! - **`serialize`**: Derive `Serialize`/`Deserialize` for decoded fixes
//! - **`json`**: Print decoded fixes as JSON from the binary
//!
//! # Quick Start
//!
//! Decode one sentence:
//! ```rust
//! use showkts::SentenceDecoder;
//!
//! let line = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W,A*6A";
//! let fields: Vec<&str> = line.split(',').collect();
//! let fix = SentenceDecoder::new().decode(&fields).unwrap();
//! assert_eq!(fix.speed_knots, 22.4);
//! ```
//!
//! Show a reading on the display:
//! ```rust,no_run
//! use showkts::{render_reading, DeviceFiles, DisplayFramer};
//!
//! let frame = render_reading("Speed", "6.3").unwrap();
//! DisplayFramer::new()
//!     .write(&frame, &mut DeviceFiles::default())
//!     .unwrap();
//! ```
//!
//! # Public API
//!
//! ## Decoding
//! - [`decode_coordinate`] - Degree-minute text to signed decimal degrees
//! - [`decode_timestamp`] - NMEA time and date fields to a UTC timestamp
//! - [`SentenceDecoder`] - GPRMC record to [`Fix`]
//! - [`SentenceStream`] - Scan a receiver byte stream for the next fix
//!
//! ## Display
//! - [`render_reading`] - Draw a label and value into a [`RenderedFrame`]
//! - [`DisplayFramer`] - Push a frame through the `C`/image/`P` handshake
//! - [`DeviceFiles`] - Device-file backed [`DisplayDevice`]
//!
//! ## Running
//! - [`Config`] - TOML settings
//! - [`SerialPort`] - Receiver tty with line settings applied
//! - [`Poller`] - One read-decode-render-write cycle per tick

pub mod config;
pub mod conversion;
pub mod display;
pub mod error;
pub mod parser;
pub mod poller;
pub mod serial;
pub mod types;

pub use config::*;
pub use conversion::*;
pub use display::*;
pub use error::*;
pub use parser::*;
pub use poller::*;
pub use serial::*;
pub use types::*;
