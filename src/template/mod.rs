//! Template filling for deployment job scripts
//!
//! Templates are plain text files with `$name` / `${name}` placeholders
//! (`$$` for a literal dollar sign). Filling merges per-call arguments over
//! ambient bindings, substitutes every placeholder, and writes the result to
//! `<output_dir>/<name>.sh`.
//!
//! # Example
//!
//! ```rust
//! use flowsetup::template::{substitute, Bindings};
//!
//! let mut bindings = Bindings::new();
//! bindings.insert("name".to_string(), "world".to_string());
//! assert_eq!(substitute("Hello $name", &bindings).unwrap(), "Hello world");
//! ```

mod error;
mod filler;
pub mod lexer;
mod substitute;

pub use error::TemplateError;
pub use filler::{RenderedScript, TemplateFiller, OUTPUT_NAME_KEY, SCRIPT_EXTENSION};
pub use lexer::Span;
pub use substitute::{placeholders, substitute, Bindings};
