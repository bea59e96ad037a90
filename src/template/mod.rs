//! Naming templates.
//!
//! A template is plain text with `{...}` groups. Inside a group, words naming a
//! placeholder (`sn`, `pn`, `st`, `en`, `et`) are substituted; `&` separates
//! tokens without emitting anything, whitespace is kept, `\&` emits `&` and
//! text after `|` is the default. If any placeholder in a group is absent the
//! group renders as its default instead. `{{...}}` emits its contents verbatim.
//!
//! ```text
//! {S&sn|}{P&pn|}{{ - }}{st|}   ->  "S01P02 - Title" or "S01 - Title"
//! ```

mod context;
mod parser;
mod render;
mod types;

pub use context::{RenderContext, Value};
pub use parser::parse_template;
pub use render::sanitize_name;
pub use types::*;
