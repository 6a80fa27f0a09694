mod error;
mod decode;

pub use error::*;
pub use decode::*;

pub type BdecodeResult<T> = std::result::Result<T, BdecodeError>;
