//! CSV output: row batching and chunk file rotation

mod batch;
mod chunk;

pub use batch::BatchWriter;
pub use chunk::{chunk_path, ChunkRotator};
