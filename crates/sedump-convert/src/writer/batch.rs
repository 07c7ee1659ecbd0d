use crate::error::{ConvertError, Result};
use std::io::Write;

/// Buffers rendered rows and writes them to a CSV sink a batch at a time.
///
/// The header row goes out as soon as the writer is created, so every sink
/// starts with exactly one header before any data row.
pub struct BatchWriter<W: Write> {
    csv: csv::Writer<W>,
    batch: Vec<Vec<String>>,
    capacity: usize,
    written: u64,
}

impl<W: Write> BatchWriter<W> {
    pub fn new(sink: W, headers: &[&str], capacity: usize) -> Result<Self> {
        let capacity = capacity.max(1);
        let mut csv = csv::Writer::from_writer(sink);
        csv.write_record(headers)?;

        Ok(Self {
            csv,
            batch: Vec::with_capacity(capacity),
            capacity,
            written: 0,
        })
    }

    /// Buffer one row, writing the whole batch out once it is full
    pub fn push(&mut self, row: Vec<String>) -> Result<()> {
        self.batch.push(row);
        if self.batch.len() >= self.capacity {
            self.write_batch()?;
        }
        Ok(())
    }

    /// Write out whatever is buffered, even a partial batch
    pub fn write_batch(&mut self) -> Result<()> {
        let rows = self.batch.len() as u64;
        for row in self.batch.drain(..) {
            self.csv.write_record(&row)?;
        }
        self.written += rows;
        Ok(())
    }

    /// Rows buffered but not yet written
    pub fn pending(&self) -> usize {
        self.batch.len()
    }

    /// Data rows written to the sink so far, excluding the header
    pub fn rows_written(&self) -> u64 {
        self.written
    }

    /// Write the partial batch, flush, and hand back the sink
    pub fn finish(mut self) -> Result<W> {
        self.write_batch()?;
        self.csv.flush()?;
        self.csv
            .into_inner()
            .map_err(|err| ConvertError::Io(err.into_error()))
    }
}
