use crate::error::Result;
use crate::parser::sentence::{SentenceDecoder, GPRMC_TAG};
use crate::parser::timestamp::Clock;
use crate::types::Fix;
use csv::{ReaderBuilder, StringRecord};
use log::{debug, warn};
use std::io::Read;

/// Line source of comma-separated NMEA records
///
/// Lines have a variable number of fields and no header row. Lines that are
/// not valid UTF-8 (line noise while the receiver syncs) are skipped.
pub struct SentenceStream<R: Read> {
    reader: csv::Reader<R>,
    record: StringRecord,
}

impl<R: Read> SentenceStream<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_reader(source),
            record: StringRecord::new(),
        }
    }

    /// Read the next record, `None` once the source is exhausted
    pub fn next_record(&mut self) -> Result<Option<&StringRecord>> {
        loop {
            match self.reader.read_record(&mut self.record) {
                Ok(true) => return Ok(Some(&self.record)),
                Ok(false) => return Ok(None),
                Err(err) if matches!(err.kind(), csv::ErrorKind::Utf8 { .. }) => {
                    warn!("Skipping unreadable record: {}", err);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Consume records until one GPRMC record decodes
    ///
    /// GPRMC records that fail to decode are logged and skipped. Returns
    /// `None` when the source runs out first.
    pub fn next_fix<C: Clock>(&mut self, decoder: &SentenceDecoder<C>) -> Result<Option<Fix>> {
        while let Some(record) = self.next_record()? {
            debug!("Read: {:?}", record);

            if record.get(0) != Some(GPRMC_TAG) {
                continue;
            }

            let fields: Vec<&str> = record.iter().collect();
            match decoder.decode(&fields) {
                Ok(fix) => {
                    if !fix.position.is_defined() {
                        debug!("GPRMC record without a usable position");
                    }
                    return Ok(Some(fix));
                }
                Err(err) => warn!("Skipping GPRMC record: {}", err),
            }
        }

        Ok(None)
    }
}
