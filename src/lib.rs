//! # Legacy Schematic Writer
//!
//! This library turns plain-text block placement lists into the legacy
//! `.schematic` format read by MCEdit-era world editors.
//!
//! ## Disclaimer
//!
//! - This library is **write-only**: it never parses schematic files.
//! - Output is uncompressed. Most editors accept the raw tag stream, some
//!   expect it gzipped.
//! - Block ids follow the pre-flattening numeric scheme and are limited to
//!   one byte of id and one byte of data.
//!
//! ## Purpose
//!
//! - [`VoxelVolume`] is sparse block storage that grows with every placement.
//! - [`io::nbt::WriteNbt`] encodes named binary tags onto any `Write`.
//! - [`io::WriteSchematic`] serializes a volume as a schematic.
//! - [`scdef`] and [`definitions`] turn `x y z name` lines into placements.
//!
//! ## Example
//! ```rust
//! use legacy_schem::{io::WriteSchematic, scdef, VoxelVolume};
//!
//! let mut volume = VoxelVolume::new();
//! scdef::read_placements("0 0 0 stone\n0 1 0 glass\n".as_bytes(), &mut volume).unwrap();
//!
//! let mut buffer: Vec<u8> = Vec::new();
//! buffer.write_schematic(&volume).unwrap();
//! ```

pub mod definitions;
pub mod io;
pub mod scdef;
pub mod volume;

pub use volume::{Voxel, VoxelVolume};
