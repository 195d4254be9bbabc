use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use indicatif::{ProgressBar, ProgressStyle};
use crate::stream::AddressStream;
use crate::{Address, Error, Geocoder, MatchTier, StreetTypes};

/// Output columns, in order
pub const HEADER: [&str; 6] = [
    "indirizzo_stradario",
    "id_stradario",
    "indirizzo_input",
    "id_input",
    "livello_confidenza",
    "percentuale"
];

#[derive(Debug, clap::Args)]
pub struct GeocodeArgs {
    /// JSON object of street type label => pattern
    #[arg(long, default_value = "street_types.json")]
    pub street_types: PathBuf,

    /// Reference addresses to match against
    #[arg(long, default_value = "stradario.csv")]
    pub reference: PathBuf,

    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub reference_delimiter: u8,

    #[arg(long, default_value = "gid")]
    pub reference_id: String,

    #[arg(long, default_value = "fumetto")]
    pub reference_address: String,

    /// Addresses to localize, `-` to read from stdin
    #[arg(long, default_value = "indirizzi_con_id.csv")]
    pub input: String,

    #[arg(long, default_value = ";", value_parser = parse_delimiter)]
    pub input_delimiter: u8,

    #[arg(long, default_value = "id")]
    pub input_id: String,

    #[arg(long, default_value = "my_indirizzo")]
    pub input_address: String,

    #[arg(long, default_value = "output.csv")]
    pub output: PathBuf,

    /// Draw a progress spinner on stderr
    #[arg(long)]
    pub progress: bool
}

///
/// A delimiter must be a single ASCII character
///
pub fn parse_delimiter(delimiter: &str) -> Result<u8, String> {
    let mut chars = delimiter.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(format!("delimiter must be a single ASCII character, got {:?}", delimiter))
    }
}

#[derive(Debug, Serialize)]
struct Row<'a> {
    reference: String,
    reference_id: Option<&'a str>,
    query: String,
    query_id: Option<&'a str>,
    tier: MatchTier,
    quality: f64
}

pub fn main(args: &GeocodeArgs) -> Result<usize, Error> {
    let street_types = StreetTypes::from_file(&args.street_types)?;
    info!("ok - loaded {} street types", street_types.len());

    let geocoder = Geocoder::from_csv(
        &args.reference,
        args.reference_delimiter,
        &args.reference_id,
        &args.reference_address,
        &street_types
    )?;

    if geocoder.is_empty() {
        return Err(Error::EmptyReference);
    }
    info!("ok - loaded {} reference addresses", geocoder.len());

    let queries = AddressStream::new(
        Some(args.input.clone()),
        args.input_delimiter,
        &args.input_id,
        &args.input_address,
        &street_types
    )?;

    let output = File::create(&args.output)?;

    let written = geocode(&geocoder, queries, output, args.progress)?;
    info!("ok - wrote {} rows to {}", written, args.output.display());

    Ok(written)
}

///
/// Localize every query against the geocoder, writing one row per query
/// Every row is flushed as soon as it is written
///
/// Returns the number of rows written
///
pub fn geocode<I, W>(geocoder: &Geocoder, queries: I, output: W, progress: bool) -> Result<usize, Error>
    where
        I: IntoIterator<Item = Result<Address, Error>>,
        W: Write
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    writer.write_record(&HEADER)?;
    writer.flush()?;

    let pb = if progress { ProgressBar::new_spinner() } else { ProgressBar::hidden() };
    match ProgressStyle::default_spinner().template("{spinner} {pos} addresses localized [{elapsed}]") {
        Ok(style) => pb.set_style(style),
        Err(err) => warn!("invalid progress template: {}", err)
    };

    let mut written = 0;
    for query in queries {
        let query = query?;
        let (reference, result) = geocoder.localize(&query)?;

        debug!("{} => {} ({})", query, reference, result);

        writer.serialize(Row {
            reference: reference.to_string(),
            reference_id: reference.unique_id.as_ref().map(String::as_str),
            query: query.to_string(),
            query_id: query.unique_id.as_ref().map(String::as_str),
            tier: result.tier,
            quality: result.quality
        })?;
        writer.flush()?;

        written += 1;
        pb.inc(1);
    }

    pb.finish_and_clear();

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn street_types() -> StreetTypes {
        let mut patterns = BTreeMap::new();
        patterns.insert(String::from("via"), String::from(r"^via$"));
        patterns.insert(String::from("corso"), String::from(r"^corso$"));

        StreetTypes::new(patterns).unwrap()
    }

    fn geocoder(types: &StreetTypes) -> Geocoder {
        Geocoder::new(vec![
            Address::new(Some(String::from("1")), "Via Roma 12", types),
            Address::new(Some(String::from("2")), "Corso Garibaldi 5", types),
        ])
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("\t"), Ok(b'\t'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(",;").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn test_geocode() {
        let types = street_types();
        let queries = vec![
            Address::new(Some(String::from("a")), "via roma, 012", &types),
            Address::new(Some(String::from("b")), "Via Garibaldi 5", &types),
            Address::new(None, "Garibaldi Corso", &types),
        ];

        let mut output: Vec<u8> = Vec::new();
        let written = geocode(&geocoder(&types), queries.into_iter().map(Ok::<Address, Error>), &mut output, false).unwrap();
        assert_eq!(written, 3);

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[..3].to_vec(), vec![
            "indirizzo_stradario,id_stradario,indirizzo_input,id_input,livello_confidenza,percentuale",
            "via roma 12,1,via roma 12,a,A1,1.0",
            "corso garibaldi 5,2,via garibaldi 5,b,B1,0.9",
        ]);
        assert!(lines[3].starts_with("corso garibaldi 5,2,garibaldi corso,,B2,0.6444"));
    }

    #[test]
    fn test_geocode_no_queries() {
        let types = street_types();

        let mut output: Vec<u8> = Vec::new();
        let written = geocode(&geocoder(&types), Vec::<Result<Address, Error>>::new(), &mut output, false).unwrap();

        assert_eq!(written, 0);
        assert_eq!(String::from_utf8(output).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_geocode_empty_reference() {
        let types = street_types();
        let queries: Vec<Result<Address, Error>> = vec![Ok(Address::new(None, "via roma", &types))];

        match geocode(&Geocoder::new(Vec::new()), queries, Vec::<u8>::new(), false) {
            Err(Error::EmptyReference) => (),
            other => panic!("expected empty reference error, got {:?}", other)
        };
    }

    #[test]
    fn test_main() {
        let dir = tempfile::tempdir().unwrap();

        let street_types = dir.path().join("street_types.json");
        std::fs::write(&street_types, r#"{ "via": "^via$", "piazza": "^p(iazza|\\.zza)$" }"#).unwrap();

        let reference = dir.path().join("stradario.csv");
        std::fs::write(&reference, "gid,fumetto\n10,Via Roma 12\n11,Piazza Dante\n").unwrap();

        let input = dir.path().join("indirizzi.csv");
        std::fs::write(&input, "id;my_indirizzo\n1;P.zza Dante\n2;via roma 12\n").unwrap();

        let output = dir.path().join("output.csv");

        let args = GeocodeArgs {
            street_types: street_types,
            reference: reference,
            reference_delimiter: b',',
            reference_id: String::from("gid"),
            reference_address: String::from("fumetto"),
            input: input.to_string_lossy().to_string(),
            input_delimiter: b';',
            input_id: String::from("id"),
            input_address: String::from("my_indirizzo"),
            output: output.clone(),
            progress: false
        };

        assert_eq!(main(&args).unwrap(), 2);

        let written = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[1], "piazza dante,11,piazza dante,1,A3,1.0");
        assert_eq!(lines[2], "via roma 12,10,via roma 12,2,A1,1.0");
    }

    #[test]
    fn test_main_empty_reference() {
        let dir = tempfile::tempdir().unwrap();

        let street_types = dir.path().join("street_types.json");
        std::fs::write(&street_types, "{}").unwrap();

        let reference = dir.path().join("stradario.csv");
        std::fs::write(&reference, "gid,fumetto\n").unwrap();

        let args = GeocodeArgs {
            street_types: street_types,
            reference: reference,
            reference_delimiter: b',',
            reference_id: String::from("gid"),
            reference_address: String::from("fumetto"),
            input: String::from("-"),
            input_delimiter: b';',
            input_id: String::from("id"),
            input_address: String::from("my_indirizzo"),
            output: dir.path().join("output.csv"),
            progress: false
        };

        match main(&args) {
            Err(Error::EmptyReference) => (),
            other => panic!("expected empty reference error, got {:?}", other)
        };
    }
}
