//! Receiver serial line setup
//!
//! The receiver talks NMEA at 4800 baud, 8N1. The port is switched to raw
//! mode so line discipline does not mangle sentences.

use crate::error::{Result, ShowktsError};
use nix::sys::termios::{
    self, BaudRate, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg,
    SpecialCharacterIndices,
};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_SERIAL_DEVICE: &str = "/dev/ttyUSB0";
pub const DEFAULT_BAUD_RATE: u32 = 4800;

/// Something that yields a fresh byte stream of NMEA sentences per cycle
pub trait SerialSource {
    type Reader: io::Read;

    fn open(&mut self) -> Result<Self::Reader>;
}

/// A tty device configured on every open
#[derive(Debug, Clone)]
pub struct SerialPort {
    path: PathBuf,
    baud: u32,
}

impl SerialPort {
    pub fn new(path: impl Into<PathBuf>, baud: u32) -> Result<Self> {
        baud_rate(baud)?;
        Ok(Self {
            path: path.into(),
            baud,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SerialSource for SerialPort {
    type Reader = File;

    fn open(&mut self) -> Result<File> {
        let file = OpenOptions::new().read(true).open(&self.path)?;
        configure(&file, self.baud)?;
        Ok(file)
    }
}

/// Map a numeric line speed to its termios constant
pub fn baud_rate(baud: u32) -> Result<BaudRate> {
    Ok(match baud {
        1200 => BaudRate::B1200,
        2400 => BaudRate::B2400,
        4800 => BaudRate::B4800,
        9600 => BaudRate::B9600,
        19200 => BaudRate::B19200,
        38400 => BaudRate::B38400,
        57600 => BaudRate::B57600,
        115200 => BaudRate::B115200,
        other => return Err(ShowktsError::UnsupportedBaudRate(other)),
    })
}

/// Raw 8N1 at `baud`, receiver on, modem control ignored
pub fn configure(file: &File, baud: u32) -> Result<()> {
    let speed = baud_rate(baud)?;
    let mut t = termios::tcgetattr(file).map_err(io::Error::from)?;

    t.local_flags &= !(LocalFlags::ICANON | LocalFlags::ECHO | LocalFlags::ECHOE | LocalFlags::ISIG);
    t.output_flags &= !OutputFlags::OPOST;
    t.input_flags &= !(InputFlags::IXON
        | InputFlags::IXOFF
        | InputFlags::IXANY
        | InputFlags::ISTRIP
        | InputFlags::INPCK);
    t.control_flags &= !(ControlFlags::CSIZE | ControlFlags::CSTOPB | ControlFlags::PARENB);
    t.control_flags |= ControlFlags::CS8 | ControlFlags::CREAD | ControlFlags::CLOCAL;

    // Block until at least one byte arrives
    t.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
    t.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;

    termios::cfsetispeed(&mut t, speed).map_err(io::Error::from)?;
    termios::cfsetospeed(&mut t, speed).map_err(io::Error::from)?;
    termios::tcsetattr(file, SetArg::TCSANOW, &t).map_err(io::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_baud_rates() {
        assert_eq!(baud_rate(4800).unwrap(), BaudRate::B4800);
        assert_eq!(baud_rate(115200).unwrap(), BaudRate::B115200);
    }

    #[test]
    fn test_unsupported_baud_rate() {
        assert!(matches!(
            baud_rate(4801),
            Err(ShowktsError::UnsupportedBaudRate(4801))
        ));
        assert!(SerialPort::new(DEFAULT_SERIAL_DEVICE, 31250).is_err());
    }

    #[test]
    fn test_regular_file_is_not_a_tty() {
        let file = tempfile::tempfile().unwrap();
        assert!(configure(&file, DEFAULT_BAUD_RATE).is_err());
    }

    #[test]
    fn test_missing_device() {
        let mut port = SerialPort::new("/nonexistent/ttyUSB9", DEFAULT_BAUD_RATE).unwrap();
        assert!(matches!(port.open(), Err(ShowktsError::Io(_))));
    }
}
