//! E-paper device write protocol
//!
//! The display driver exposes two endpoints: a command channel taking single
//! ASCII control bytes and an image channel taking the packed raster. Every
//! update is the same handshake:
//!
//! 1. `C` on the command channel (clear/prepare)
//! 2. the raster on the image channel
//! 3. `P` on the command channel (present)
//!
//! then the image channel is closed, followed by the command channel.

use crate::error::{Channel, Result, ShowktsError};
use crate::types::RenderedFrame;
use log::debug;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const COMMAND_CLEAR: u8 = b'C';
pub const COMMAND_PRESENT: u8 = b'P';

pub const DEFAULT_COMMAND_PATH: &str = "/dev/epd/command";
pub const DEFAULT_IMAGE_PATH: &str = "/dev/epd/LE/display";

/// Opens the two display endpoints
///
/// Dropping a returned channel closes it.
pub trait DisplayDevice {
    type Command: Write;
    type Image: Write;

    fn open_command(&mut self) -> Result<Self::Command>;
    fn open_image(&mut self) -> Result<Self::Image>;
}

/// Display endpoints exposed as device files
#[derive(Debug, Clone)]
pub struct DeviceFiles {
    command: PathBuf,
    image: PathBuf,
}

impl Default for DeviceFiles {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_PATH, DEFAULT_IMAGE_PATH)
    }
}

impl DeviceFiles {
    pub fn new(command: impl Into<PathBuf>, image: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            image: image.into(),
        }
    }

    fn open(path: &Path, channel: Channel) -> Result<File> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| ShowktsError::DeviceUnavailable { channel, source })
    }
}

impl DisplayDevice for DeviceFiles {
    type Command = File;
    type Image = File;

    fn open_command(&mut self) -> Result<File> {
        Self::open(&self.command, Channel::Command)
    }

    fn open_image(&mut self) -> Result<File> {
        Self::open(&self.image, Channel::Image)
    }
}

/// Serializes frames onto a [`DisplayDevice`]
///
/// Holds no state between updates; writing the same frame twice produces the
/// same byte sequence twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayFramer;

impl DisplayFramer {
    pub fn new() -> Self {
        Self
    }

    /// Push one frame to the display
    ///
    /// Both channels are opened before anything is written, so an
    /// unavailable device leaves the display untouched. Both channels are
    /// released on every path out of this function.
    pub fn write<D: DisplayDevice>(&self, frame: &RenderedFrame, device: &mut D) -> Result<()> {
        let mut command = device.open_command()?;
        let mut image = device.open_image()?;

        let result = handshake(frame, &mut command, &mut image);

        drop(image);
        drop(command);
        result
    }
}

fn handshake<C: Write, I: Write>(frame: &RenderedFrame, command: &mut C, image: &mut I) -> Result<()> {
    send(command, Channel::Command, &[COMMAND_CLEAR])?;
    send(image, Channel::Image, frame.raster())?;
    send(command, Channel::Command, &[COMMAND_PRESENT])?;
    debug!("Presented {} byte frame", frame.raster().len());
    Ok(())
}

fn send<W: Write>(writer: &mut W, channel: Channel, bytes: &[u8]) -> Result<()> {
    writer
        .write_all(bytes)
        .and_then(|_| writer.flush())
        .map_err(|source| ShowktsError::DeviceWrite { channel, source })
}
