use std::io::{self as stdio, Write};

pub mod nbt;

use log::info;
use thiserror::Error;

use crate::volume::{Voxel, VoxelVolume};
use nbt::{Tag, WriteNbt};

pub type Result<T> = std::result::Result<T, Error>;

/// Palette name stored in the `Materials` tag.
pub const MATERIALS: &str = "Alpha";

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] stdio::Error),
    #[error("{axis} of {value} does not fit a schematic Short (max {max})", max = i16::MAX)]
    DimensionTooLarge {
        axis: &'static str,
        value: usize,
    },
    #[error("{voxels} voxels do not fit a schematic byte array (max {max})", max = i32::MAX)]
    VolumeTooLarge {
        voxels: usize,
    },
}

/// Header values of a volume, checked against the field widths of the format.
struct Header {
    width: i16,
    height: i16,
    length: i16,
    voxels: i32,
}

impl Header {
    fn new(volume: &VoxelVolume) -> Result<Self> {
        let dimension = |axis: &'static str, value: usize| {
            i16::try_from(value).map_err(|_| Error::DimensionTooLarge { axis, value })
        };
        let width = dimension("Width", volume.width())?;
        let height = dimension("Height", volume.height())?;
        let length = dimension("Length", volume.length())?;

        let voxels = volume
            .width()
            .checked_mul(volume.height())
            .and_then(|v| v.checked_mul(volume.length()))
            .unwrap_or(usize::MAX);
        let voxels = i32::try_from(voxels).map_err(|_| Error::VolumeTooLarge { voxels })?;

        Ok(Header { width, height, length, voxels })
    }
}

/// Trait for writing a [`VoxelVolume`] to a stream as a legacy schematic.
///
/// The output is one root compound named `Schematic` holding, in this order,
/// the Shorts `Width`, `Height` and `Length`, the String `Materials`, and the
/// byte arrays `Blocks` and `Data`. Both arrays are laid out y-major, then z,
/// then x.
///
/// # Example
/// ```rust
/// use legacy_schem::{io::WriteSchematic, VoxelVolume};
///
/// let mut volume = VoxelVolume::new();
/// volume.set(0, 0, 0, 1, 0);
///
/// let mut buffer: Vec<u8> = Vec::new();
/// buffer.write_schematic(&volume).unwrap();
/// ```
///
/// # Errors
/// - Returns an error if a dimension or the voxel count overflows its field.
///   This is detected before anything is written.
/// - Returns an error if writing fails at any point.
///
/// # Partial Writes
/// A write failure stops serialization immediately. Bytes already accepted
/// by the stream stay there and do not form a valid schematic.
pub trait WriteSchematic: Write {
    fn write_schematic(&mut self, volume: &VoxelVolume) -> Result<()> {
        let header = Header::new(volume)?;

        self.start_named_tag(Tag::Compound, "Schematic")?;

        self.start_named_tag(Tag::Short, "Width")?;
        self.write_short(header.width)?;
        self.start_named_tag(Tag::Short, "Height")?;
        self.write_short(header.height)?;
        self.start_named_tag(Tag::Short, "Length")?;
        self.write_short(header.length)?;

        self.start_named_tag(Tag::String, "Materials")?;
        self.write_string(MATERIALS)?;

        self.start_named_tag(Tag::ByteArray, "Blocks")?;
        self.start_byte_array(header.voxels)?;
        write_voxel_bytes(self, volume, |v| v.id)?;

        self.start_named_tag(Tag::ByteArray, "Data")?;
        self.start_byte_array(header.voxels)?;
        write_voxel_bytes(self, volume, |v| v.data)?;

        self.write_end()?;

        info!(
            "wrote {}x{}x{} schematic ({} voxels, {} regions)",
            header.width,
            header.height,
            header.length,
            header.voxels,
            volume.region_count()
        );
        Ok(())
    }
}

impl<W: Write + ?Sized> WriteSchematic for W {}

/// Emits one byte per voxel, y outer, z middle, x inner. Each x row is
/// collected first and handed to the stream in one call.
fn write_voxel_bytes<W: Write + ?Sized>(
    w: &mut W,
    volume: &VoxelVolume,
    field: impl Fn(Voxel) -> u8,
) -> stdio::Result<()> {
    let mut row: Vec<u8> = Vec::with_capacity(volume.width());
    for y in 0..volume.height() {
        for z in 0..volume.length() {
            row.clear();
            row.extend((0..volume.width()).map(|x| field(volume.get(x, y, z))));
            w.write_all(&row)?;
        }
    }
    Ok(())
}
