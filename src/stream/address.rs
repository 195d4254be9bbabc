use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use crate::{Address, Error, StreetTypes};

type Row = HashMap<String, String>;

///
/// Stream Addresses out of a delimited file with a header row
///
/// Each row is read as a column => value map, the address is taken from
/// `addr_column` and the identifier from `id_column`
///
pub struct AddressStream<'a> {
    rows: csv::DeserializeRecordsIntoIter<Box<dyn Read>, Row>,
    id_column: String,
    addr_column: String,
    street_types: &'a StreetTypes
}

impl<'a> AddressStream<'a> {
    ///
    /// Read from the given file or from stdin if the input is None or `-`
    ///
    pub fn new(input: Option<String>, delimiter: u8, id_column: &str, addr_column: &str, street_types: &'a StreetTypes) -> Result<Self, Error> {
        match input {
            Some(ref inpath) if inpath != "-" => {
                AddressStream::from_path(inpath, delimiter, id_column, addr_column, street_types)
            },
            _ => {
                AddressStream::from_reader(io::stdin(), delimiter, id_column, addr_column, street_types)
            }
        }
    }

    pub fn from_path(path: impl AsRef<Path>, delimiter: u8, id_column: &str, addr_column: &str, street_types: &'a StreetTypes) -> Result<Self, Error> {
        let file = File::open(path)?;

        AddressStream::from_reader(BufReader::new(file), delimiter, id_column, addr_column, street_types)
    }

    pub fn from_reader(input: impl Read + 'static, delimiter: u8, id_column: &str, addr_column: &str, street_types: &'a StreetTypes) -> Result<Self, Error> {
        let input: Box<dyn Read> = Box::new(input);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(input);

        let headers = reader.headers()?;

        if !headers.iter().any(|header| header == addr_column) {
            return Err(Error::MissingColumn {
                column: addr_column.to_string()
            });
        }

        if !headers.iter().any(|header| header == id_column) {
            warn!("id column {} not found, addresses will have no id", id_column);
        }

        Ok(AddressStream {
            rows: reader.into_deserialize(),
            id_column: id_column.to_string(),
            addr_column: addr_column.to_string(),
            street_types: street_types
        })
    }
}

impl<'a> Iterator for AddressStream<'a> {
    type Item = Result<Address, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.rows.next()? {
            Ok(row) => row,
            Err(err) => {
                return Some(Err(Error::from(err)));
            }
        };

        let address = Address::from_record(&row, &self.id_column, &self.addr_column, self.street_types);

        if address.tokens.is_empty() && !address.has_type() && !address.has_number() {
            warn!("empty address in row {:?}", address.unique_id);
        }

        Some(Ok(address))
    }
}
