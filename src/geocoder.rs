use std::path::Path;
use crate::stream::AddressStream;
use crate::text::QGramCache;
use crate::{Address, Error, MatchResult, StreetTypes};

///
/// Matches query addresses against a reference collection
///
/// The reference collection is never mutated while matching and the q-gram
/// cache only memoizes pure values, a Geocoder can be reused for any number
/// of queries.
///
#[derive(Debug)]
pub struct Geocoder {
    reference: Vec<Address>,
    qgrams: QGramCache
}

impl Geocoder {
    pub fn new(reference: Vec<Address>) -> Self {
        Geocoder {
            reference: reference,
            qgrams: QGramCache::new()
        }
    }

    ///
    /// Load a reference collection from a delimited file
    ///
    pub fn from_csv(path: impl AsRef<Path>, delimiter: u8, id_column: &str, addr_column: &str, street_types: &StreetTypes) -> Result<Self, Error> {
        let reference = AddressStream::from_path(path, delimiter, id_column, addr_column, street_types)?
            .collect::<Result<Vec<Address>, Error>>()?;

        Ok(Geocoder::new(reference))
    }

    pub fn reference(&self) -> &[Address] {
        &self.reference
    }

    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    ///
    /// Scan the whole reference collection and return the reference address
    /// with the strongest match for the query
    ///
    /// The first reference seen wins ties. Fails if the reference collection is empty.
    ///
    pub fn localize(&self, query: &Address) -> Result<(&Address, MatchResult), Error> {
        let scored = self.reference
            .iter()
            .map(|reference| (reference, query.compare_with(reference, &self.qgrams)));

        MatchResult::best(scored).ok_or(Error::EmptyReference)
    }
}
