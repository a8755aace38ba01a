//! Heightfield data layer: the altitude grid, edit notifications and
//! project persistence.

pub mod editor;
pub mod events;
pub mod grid;
pub mod project;
