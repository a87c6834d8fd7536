use crate::domain::ports::OrderSnapshot;
use crate::error::{GatewayError, Result};
use std::io::Read;

/// Reads order snapshots (`order_id,amount,status`) from a CSV source.
///
/// Rows come back one at a time, so a bad row is reported on its own and
/// the rest of the export still loads. Fields are trimmed.
pub struct OrderReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OrderReader<R> {
    /// Creates a new `OrderReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes orders.
    pub fn orders(self) -> impl Iterator<Item = Result<OrderSnapshot>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(GatewayError::from))
    }
}
