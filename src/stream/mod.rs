pub mod address;

pub use self::address::AddressStream;
