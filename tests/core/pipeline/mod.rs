//! Ingestion pipeline tests

mod test_end_to_end;
mod test_store;
