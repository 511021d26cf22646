//! URL-safe slugs from human-readable text, Vietnamese diacritics included.
//!
//! ```
//! assert_eq!(vnslug::slugify("Đà Nẵng"), "da-nang");
//! ```

pub mod batch;
pub mod error;
pub mod logging;
pub mod output;
pub mod slug;
pub mod utils;

pub use error::{Result, SlugError};
pub use slug::{is_valid_slug, Fallback, Slug, SlugOptions};
pub use utils::string::slugify;
