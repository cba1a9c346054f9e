//! Translation layer between a host query API and the native engine.
//!
//! Filter conditions, literal values and column specifications come in as
//! host-side structures and leave as the tagged structures in [`ir`].

pub mod error;
pub mod ir;
pub mod literal;
pub mod options;
pub mod result;
pub mod schema;
pub mod sql;
pub mod translate;
pub mod validate;
pub mod value;
pub mod wire;

pub use error::{ErrorKind, TranslateError, TranslateResult};
pub use literal::encode_constant;
pub use options::{extract_filter, SearchOptions};
pub use result::{build_table, HostScalarType, ResultSource, Table};
pub use schema::{build_column, build_columns, load_table_spec, ColumnSpec, TableSpec};
pub use translate::{parse_expr, translate_condition};
pub use validate::{check_valid_name, check_valid_name_value, NameKind};
pub use value::Value;
