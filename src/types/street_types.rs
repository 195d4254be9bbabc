use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use regex::Regex;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use crate::Error;

///
/// Street type vocabulary: canonical label => recognition pattern
///
/// Labels are kept in lexicographic order and tried in that order when
/// identifying the type of an address, the first matching label wins.
/// A vocabulary is built once and never mutated while matching.
///
#[derive(Debug, Clone, Default)]
pub struct StreetTypes {
    types: Vec<StreetType>
}

#[derive(Debug, Clone)]
struct StreetType {
    label: String,
    pattern: Regex
}

impl StreetTypes {
    pub fn new(patterns: BTreeMap<String, String>) -> Result<Self, Error> {
        let mut types: Vec<StreetType> = Vec::with_capacity(patterns.len());

        for (label, pattern) in patterns {
            if let Some(existing) = types.iter().find(|t| t.pattern.as_str() == pattern) {
                return Err(Error::AmbiguousStreetTypes {
                    first: existing.label.clone(),
                    second: label
                });
            }

            let pattern = match Regex::new(&pattern) {
                Ok(pattern) => pattern,
                Err(source) => {
                    return Err(Error::Pattern { label, source });
                }
            };

            types.push(StreetType {
                label: label,
                pattern: pattern
            });
        }

        Ok(StreetTypes {
            types: types
        })
    }

    ///
    /// Parse a vocabulary from a JSON object of `label: pattern` pairs
    ///
    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        let patterns: Patterns = serde_json::from_reader(reader)?;

        StreetTypes::new(patterns.0)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = File::open(path)?;

        StreetTypes::from_reader(BufReader::new(file))
    }

    ///
    /// Return the label of the first street type whose pattern matches the token
    ///
    pub fn identify(&self, token: &str) -> Option<&str> {
        self.types
            .iter()
            .find(|t| t.pattern.is_match(token))
            .map(|t| t.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

///
/// serde_json silently keeps the last value of a duplicated key, the
/// vocabulary must reject them instead
///
struct Patterns(BTreeMap<String, String>);

impl<'de> Deserialize<'de> for Patterns {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: Deserializer<'de>
    {
        struct PatternsVisitor;

        impl<'de> Visitor<'de> for PatternsVisitor {
            type Value = Patterns;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object of street type label to pattern")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
                where M: MapAccess<'de>
            {
                let mut map = BTreeMap::new();

                while let Some((label, pattern)) = access.next_entry::<String, String>()? {
                    if map.contains_key(&label) {
                        return Err(de::Error::custom(format!("duplicate street type: {}", label)));
                    }
                    map.insert(label, pattern);
                }

                Ok(Patterns(map))
            }
        }

        deserializer.deserialize_map(PatternsVisitor)
    }
}
