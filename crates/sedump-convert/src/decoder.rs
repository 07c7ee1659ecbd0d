//! Streaming decoder for dump XML
//!
//! Walks the document one event at a time and yields a [`Record`] for each
//! `row` element. Memory use is bounded by the size of one element, so
//! multi-gigabyte dumps decode in constant space.
//!
//! A `row` that cannot be mapped onto the table's record shape is logged and
//! skipped. A document that stops being well-formed ends decoding with
//! [`ConvertError::Xml`](crate::error::ConvertError::Xml).

use crate::error::Result;
use crate::record::{Record, RecordError, RowAttributes};
use quick_xml::events::Event;
use quick_xml::Reader;
use sedump_common::types::Entity;
use std::io::BufRead;
use tracing::{debug, error};

const ROW: &[u8] = b"row";

/// Iterator of records decoded from one dump file.
///
/// Yields `Ok` for each decodable row in document order. The first XML
/// error is yielded as `Err` and ends the iteration.
pub struct RowDecoder<R: BufRead> {
    reader: Reader<R>,
    entity: Entity,
    buf: Vec<u8>,
    skip_buf: Vec<u8>,
    decoded: u64,
    skipped: u64,
    finished: bool,
}

impl<R: BufRead> RowDecoder<R> {
    pub fn new(input: R, entity: Entity) -> Self {
        Self {
            reader: Reader::from_reader(input),
            entity,
            buf: Vec::with_capacity(4096),
            skip_buf: Vec::new(),
            decoded: 0,
            skipped: 0,
            finished: false,
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Rows decoded so far
    pub fn decoded(&self) -> u64 {
        self.decoded
    }

    /// Rows skipped so far because they did not fit the record shape
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    fn next_record(&mut self) -> Result<Option<Record>> {
        loop {
            self.buf.clear();
            let (attrs, body_end) = match self.reader.read_event_into(&mut self.buf)? {
                Event::Empty(element) if element.local_name().as_ref() == ROW => {
                    (RowAttributes::from_element(&element), None)
                },
                Event::Start(element) if element.local_name().as_ref() == ROW => (
                    RowAttributes::from_element(&element),
                    Some(element.to_end().into_owned()),
                ),
                Event::Eof => return Ok(None),
                _ => continue,
            };

            // Rows normally carry no content; anything inside is ignored
            if let Some(end) = body_end {
                self.skip_buf.clear();
                self.reader.read_to_end_into(end.name(), &mut self.skip_buf)?;
            }

            let entity = self.entity;
            match attrs.and_then(|attrs| Record::from_attributes(entity, &attrs)) {
                Ok(record) => {
                    self.decoded += 1;
                    return Ok(Some(record));
                },
                Err(err) => self.skip_row(err),
            }
        }
    }

    fn skip_row(&mut self, err: RecordError) {
        self.skipped += 1;
        error!(
            entity = %self.entity,
            position = self.reader.buffer_position(),
            error = %err,
            "Skipping row that does not match the record shape"
        );
    }
}

impl<R: BufRead> Iterator for RowDecoder<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                debug!(
                    entity = %self.entity,
                    decoded = self.decoded,
                    skipped = self.skipped,
                    "Reached end of document"
                );
                None
            },
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            },
        }
    }
}
