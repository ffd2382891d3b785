//! Runtime object-to-object mapping engine.
//!
//! Converts values between independently-defined struct types (domain
//! models, transport DTOs, persistence models) without hand-written glue
//! per field. Consumers register type pairs once at startup, then call
//! [`Mapper::map`] at request time:
//!
//! ```
//! use mapper::{reflect_struct, Mapper};
//!
//! #[derive(Debug, Default, Clone)]
//! struct Product {
//!     id: i64,
//!     name: String,
//! }
//!
//! #[derive(Debug, Default, Clone, PartialEq)]
//! struct ProductDto {
//!     id: i64,
//!     name: String,
//! }
//!
//! reflect_struct!(Product { id: i64, name: String });
//! reflect_struct!(ProductDto { id: i64, name: String });
//!
//! # fn main() -> mapper::MapResult<()> {
//! let mapper = Mapper::new();
//! mapper.create_map::<Product, ProductDto>()?;
//!
//! let product = Product { id: 7, name: "widget".into() };
//! let dto: ProductDto = mapper.map(&product)?;
//! assert_eq!(dto, ProductDto { id: 7, name: "widget".into() });
//! # Ok(())
//! # }
//! ```
//!
//! Field correspondence is computed once per registered pair, by field
//! name and mapping tag; conversion then walks structs, lists, maps, and
//! optionals recursively. A custom function
//! registered through [`Mapper::create_custom_map`] replaces the engine
//! entirely for its exact pair.

mod engine;
pub mod error;
mod macros;
mod profile;
pub mod reflect;
mod registry;
pub mod value;

pub use error::{MapResult, MapperError};
pub use reflect::{FieldShape, Reflect, ScalarKind, Shape, StructShape};
pub use registry::{MapMode, Mapper};
pub use value::{StructValue, Value};
