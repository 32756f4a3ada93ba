//! Form binding subsystem.
//!
//! # Data Flow
//! ```text
//! request query + urlencoded body
//!     → values.rs (decode pairs, body first)
//!     → FormSchema<T> (one Field<T> per bound struct field)
//!         → Rule::check (regex, configured message)
//!         → scan.rs (string → scalar)
//!     → populated T
//! ```
//!
//! # Design Decisions
//! - No runtime reflection: each bindable type owns an explicit descriptor list
//! - Schemas are built once per type and reused by every request
//! - The first failing field aborts the bind

pub mod field;
pub mod scan;
pub mod values;

pub use field::{BindError, BindForm, Field, FormSchema, Rule};
pub use scan::{FromFormValue, ScanError};
pub use values::{FormError, FormValues};
