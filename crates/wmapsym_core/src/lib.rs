//! Turns a terrain map into a four players map with rotational symmetry.
//!
//! The text is parsed into a [`map::Map`], its top-left quadrant is replicated by
//! [`symmetrizer::symmetrize`] and the result is written back with the same format.

pub mod prelude;

pub mod grid;
pub mod map;
pub mod rotation;
pub mod settings;
pub mod symmetrizer;
pub mod vec2;

#[cfg(test)]
mod test;
