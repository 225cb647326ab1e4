pub use crate::grid::*;
pub use crate::map::*;
pub use crate::rotation::*;
pub use crate::settings::*;
pub use crate::symmetrizer::*;
pub use crate::v;
pub use crate::vec2::*;
