//! Result accounting: the `border` / `ylow` / `yup` lists and the search space.

mod error;
#[cfg(feature = "serde")]
mod io;
mod set;

pub use error::ResultSetError;
#[cfg(feature = "serde")]
pub use io::{read_rectangles, write_rectangles};
pub use set::ResultSet;
