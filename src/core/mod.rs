pub mod path;
pub mod value;
pub mod store;
pub mod errors;
pub mod accessor;
pub mod codec;


pub use path::Path;
pub use value::{Document, Value};
pub use store::{Pairs, Store};
pub use codec::{Codec, CodecKind};
pub use errors::{Result, StoreError};
