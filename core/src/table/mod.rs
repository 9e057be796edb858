mod writer;

pub use writer::{header, TableWriter, WriteOutcome, WrittenTable, DEFAULT_TABLE_EXTENSION};
