//! Sparse storage for the blocks of a schematic.
//!
//! A [`VoxelVolume`] accepts placements at any non-negative coordinate and
//! only allocates storage for the 16³ regions that actually contain one.

use indexmap::IndexMap;

/// Edge length of a [`Region`].
pub const REGION_SIZE: usize = 16;

/// Number of voxels stored by one [`Region`].
pub const REGION_VOLUME: usize = REGION_SIZE * REGION_SIZE * REGION_SIZE;

/// A single block: legacy numeric id plus its legacy data value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Voxel {
    pub id: u8,
    pub data: u8,
}

impl Voxel {
    pub const fn new(id: u8, data: u8) -> Self {
        Voxel { id, data }
    }
}

/// Region coordinate, i.e. the absolute coordinate divided by [`REGION_SIZE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegionKey {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl RegionKey {
    /// Splits an absolute coordinate into its region key and the offset
    /// inside that region.
    #[inline]
    pub const fn locate(x: usize, y: usize, z: usize) -> (Self, usize) {
        let key = RegionKey {
            x: x / REGION_SIZE,
            y: y / REGION_SIZE,
            z: z / REGION_SIZE,
        };
        (key, Region::offset(x % REGION_SIZE, y % REGION_SIZE, z % REGION_SIZE))
    }
}

/// A lazily allocated 16³ cube of voxels.
///
/// Ids and data values live in two separate flat arrays, indexed y-major,
/// then z, then x.
#[derive(Clone, Debug)]
pub struct Region {
    ids: Box<[u8; REGION_VOLUME]>,
    data: Box<[u8; REGION_VOLUME]>,
}

impl Default for Region {
    fn default() -> Self {
        Region {
            ids: Box::new([0; REGION_VOLUME]),
            data: Box::new([0; REGION_VOLUME]),
        }
    }
}

impl Region {
    /// Flat index of a region-local coordinate.
    #[inline]
    pub const fn offset(x: usize, y: usize, z: usize) -> usize {
        (y * REGION_SIZE + z) * REGION_SIZE + x
    }

    #[inline]
    pub fn get(&self, offset: usize) -> Voxel {
        Voxel::new(self.ids[offset], self.data[offset])
    }

    #[inline]
    pub fn set(&mut self, offset: usize, voxel: Voxel) {
        self.ids[offset] = voxel.id;
        self.data[offset] = voxel.data;
    }
}

/// Unbounded, sparsely allocated block volume.
///
/// Dimensions track the exclusive upper bound of every coordinate written so
/// far and start at `1×1×1`. Reading a coordinate that was never written
/// yields [`Voxel::default`], whether or not its region exists.
///
/// Coordinates must be below `usize::MAX`; [`crate::scdef`] rejects larger
/// ones before they reach [`set`](Self::set).
#[derive(Clone, Debug)]
pub struct VoxelVolume {
    width: usize,
    height: usize,
    length: usize,

    /// Regions in creation order. Never shrinks.
    regions: IndexMap<RegionKey, Region>,
}

impl Default for VoxelVolume {
    fn default() -> Self {
        Self::new()
    }
}

impl VoxelVolume {
    pub fn new() -> Self {
        VoxelVolume {
            width: 1,
            height: 1,
            length: 1,
            regions: IndexMap::new(),
        }
    }

    /// Exclusive upper bound along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Exclusive upper bound along y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Exclusive upper bound along z.
    pub fn length(&self) -> usize {
        self.length
    }

    /// `[width, height, length]`
    pub fn dimensions(&self) -> [usize; 3] {
        [self.width, self.height, self.length]
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// True if no voxel has ever been written.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Returns the region stored under `key`, if one was ever written to.
    pub fn region(&self, key: RegionKey) -> Option<&Region> {
        self.regions.get(&key)
    }

    /// Returns the region stored under `key`, appending a zeroed one first
    /// if it does not exist yet.
    pub fn find_or_create_region(&mut self, key: RegionKey) -> &mut Region {
        self.regions.entry(key).or_default()
    }

    /// Stores `id`/`data` at the given coordinate and grows the dimensions to
    /// include it. Later writes to the same coordinate replace earlier ones.
    pub fn set(&mut self, x: usize, y: usize, z: usize, id: u8, data: u8) {
        let (key, offset) = RegionKey::locate(x, y, z);
        self.find_or_create_region(key).set(offset, Voxel::new(id, data));

        self.width = self.width.max(x + 1);
        self.height = self.height.max(y + 1);
        self.length = self.length.max(z + 1);
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> Voxel {
        let (key, offset) = RegionKey::locate(x, y, z);
        self.region(key)
            .map(|region| region.get(offset))
            .unwrap_or_default()
    }

    pub fn id(&self, x: usize, y: usize, z: usize) -> u8 {
        self.get(x, y, z).id
    }

    pub fn data(&self, x: usize, y: usize, z: usize) -> u8 {
        self.get(x, y, z).data
    }
}
