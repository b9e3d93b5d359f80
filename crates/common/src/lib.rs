pub mod color;
pub mod error;
pub mod style;

pub use color::is_hex_color;
pub use error::{Error, Result};
pub use style::{FeedbackType, FillStyle, KolamStyle, LineThickness, SymmetryType};
