pub mod address;
pub mod match_result;
pub mod street_types;

pub use self::address::Address;
pub use self::match_result::{Family, MatchResult, MatchTier};
pub use self::street_types::StreetTypes;
