extern crate pest;
#[macro_use]
extern crate pest_derive;

pub mod driver;
pub mod error;
pub mod kinds;
pub mod nil;
pub mod nullable;
pub mod schema;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod tag;

pub use driver::{DriverValue, ValueType};
pub use error::{NihilError, SchemaError};
pub use kinds::Primitive;
pub use nil::{
  Nil, NilBool, NilByte, NilFloat64, NilInt16, NilInt32, NilInt64, NilString, NilTime,
};
pub use nullable::{marshal, unmarshal, Nullable, NULL_LITERAL};
pub use schema::{ColumnSchema, DataType, Dialect, TableSchema};
pub use tag::TagSettings;
