//! Model Mapper - Registry of conversion functions between model types
//!
//! Register a conversion between two model keys once, then convert values
//! anywhere by naming the keys:
//!
//! - **ModelKey**: Identity of a model, either a Rust type or an opaque token
//! - **Transformation**: A source key, a destination key and the function between them
//! - **Mapper**: Stores at most one transformation per key pair and runs it on demand
//! - **global**: Forwarding functions over a lazily created process-wide mapper
//!
//! ```
//! use model_mapper::{global, ModelKey, Transformation};
//!
//! struct UserRow { first: String, last: String }
//! struct UserDto { display_name: String }
//!
//! global::register(Transformation::between(|row: UserRow| UserDto {
//!     display_name: format!("{} {}", row.first, row.last),
//! }))
//! .unwrap();
//!
//! let dto: UserDto = global::map(
//!     &ModelKey::of::<UserRow>(),
//!     &ModelKey::of::<UserDto>(),
//!     UserRow { first: "Ada".into(), last: "Lovelace".into() },
//! )
//! .unwrap();
//! assert_eq!(dto.display_name, "Ada Lovelace");
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod config;
pub mod error;
pub mod global;
pub mod key;
pub mod mapper;
pub mod transformation;

// Re-exports
pub use config::{BatchPolicy, MapperConfig};
pub use error::{MapperError, Result};
pub use key::{ModelKey, Token};
pub use mapper::Mapper;
pub use transformation::{MapFunction, MappingInfo, Transformation};
