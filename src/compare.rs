use std::path::PathBuf;
use crate::{Address, Error, MatchResult, StreetTypes};

#[derive(Debug, clap::Args)]
pub struct CompareArgs {
    /// Address to localize
    pub query: String,

    /// Address to compare against
    pub reference: String,

    /// JSON object of street type label => pattern, no street types are recognized if omitted
    #[arg(long)]
    pub street_types: Option<PathBuf>
}

pub fn main(args: &CompareArgs) -> Result<MatchResult, Error> {
    let street_types = match args.street_types {
        Some(ref path) => StreetTypes::from_file(path)?,
        None => StreetTypes::default()
    };

    let (query, reference, result) = compare(&args.query, &args.reference, &street_types);

    println!("{}", query);
    println!("{}", reference);
    println!("{}", result);

    Ok(result)
}

///
/// Parse and compare two raw addresses, returning the parsed forms alongside the result
///
pub fn compare(query: &str, reference: &str, street_types: &StreetTypes) -> (Address, Address, MatchResult) {
    let query = Address::new(None, query, street_types);
    let reference = Address::new(None, reference, street_types);
    let result = query.compare(&reference);

    (query, reference, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatchTier;

    #[test]
    fn test_compare() {
        let street_types = StreetTypes::from_reader(r#"{ "via": "^via$" }"#.as_bytes()).unwrap();

        let (query, reference, result) = compare("via roma, 012", "Via Roma 12", &street_types);
        assert_eq!(query.to_string(), String::from("via roma 12"));
        assert_eq!(reference.to_string(), String::from("via roma 12"));
        assert_eq!(result, MatchResult::exact(MatchTier::A1));

        let (_, _, result) = compare("Piazza Dante", "Dante Piazza", &StreetTypes::default());
        assert_eq!(result, MatchResult::exact(MatchTier::A4));
    }

    #[test]
    fn test_main() {
        let args = CompareArgs {
            query: String::from("Via A. Volta 3"),
            reference: String::from("Via Volta Alessandro 3"),
            street_types: None
        };

        assert_eq!(main(&args).unwrap(), MatchResult::exact(MatchTier::A2));
    }
}
