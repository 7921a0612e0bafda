use serde::de::DeserializeOwned;
use std::io::Read;

/// Deserialize every row of a headered CSV table, trimming fields; empty cells become `None`.
pub(crate) fn parse_rows<T, R>(reader: R) -> Result<Vec<T>, csv::Error>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<T>().collect()
}
