#[macro_use] extern crate lazy_static;
#[macro_use] extern crate serde_derive;
#[macro_use] extern crate log;
pub mod geocode;
pub mod compare;

pub use error::Error;
pub use geocoder::Geocoder;
pub use stream::AddressStream;
pub use text::{QGram, QGramCache};
pub use types::{Address, Family, MatchResult, MatchTier, StreetTypes};

mod error;
mod geocoder;
mod stream;
mod text;
mod types;
