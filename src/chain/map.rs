//! The mapping facade - contiguous views over byte and region ranges.
//!
//! Mapping exposes an arbitrary logical range of a [`Chain`] as one
//! contiguous span, transparently collapsing multiple regions into a
//! synthetic merged region when the range crosses a boundary. A mapping is
//! scoped: the [`ChainMap`] owns the backing region handle and releases it
//! on drop, which is the single "unmap".

use std::ops::RangeBounds;

use crate::error::BufferError;
use crate::region::{Access, Region, RegionMut, RegionRef};

use super::{resolve_index_range, Chain};

/// A contiguous mapping of a chain byte or region range.
///
/// Obtained from [`Chain::map_regions`] or [`Chain::map_bytes`]. The mapped
/// bytes are reached through [`ChainMap::bytes`] / [`ChainMap::bytes_mut`];
/// dropping the map releases the backing region reference.
///
/// When the mapped range spanned more than one region, the backing region
/// is a fresh merged copy. The chain persists that collapse only when it is
/// fully writable, so writes through a multi-region `Write` mapping reach
/// the chain exactly when [`Chain::is_all_writable`] was true at map time.
#[derive(Debug)]
pub struct ChainMap {
    region: Region,
    start: usize,
    len: usize,
    access: Access,
}

impl ChainMap {
    fn empty(access: Access) -> Self {
        Self {
            region: Region::from(Vec::new()),
            start: 0,
            len: 0,
            access,
        }
    }

    /// The mapped length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The access mode the mapping was obtained with.
    pub fn access(&self) -> Access {
        self.access
    }

    /// The mapped bytes, for reading.
    pub fn bytes(&self) -> Result<RegionRef<'_>, BufferError> {
        self.region.map_slice(self.start, self.len)
    }

    /// The mapped bytes, for writing.
    ///
    /// Fails with [`BufferError::NotWritable`] unless the mapping was
    /// obtained with [`Access::Write`].
    pub fn bytes_mut(&mut self) -> Result<RegionMut<'_>, BufferError> {
        if !self.access.is_write() {
            return Err(BufferError::NotWritable);
        }
        self.region.map_slice_mut(self.start, self.len)
    }
}

impl Chain {
    /// Maps a range of regions (region-index space) as one contiguous span.
    ///
    /// An unbounded end means "to the last region". An empty range yields a
    /// valid empty mapping. A single-region range maps that region directly,
    /// zero-copy. A multi-region range builds a synthetic region holding the
    /// concatenated content; if the whole chain is currently writable, the
    /// collapse is additionally persisted into the chain (replacing the
    /// spanned regions) so future maps of the same span are single-region -
    /// a cache refresh whose outcome does not affect the returned mapping.
    ///
    /// Fails with [`BufferError::NotWritable`] when [`Access::Write`] is
    /// requested and any region in the span is read-only, and with
    /// [`BufferError::OutOfMemory`] when the synthetic region cannot be
    /// built.
    pub fn map_regions(
        &mut self,
        range: impl RangeBounds<usize>,
        access: Access,
    ) -> Result<ChainMap, BufferError> {
        let (start, end) = resolve_index_range(&range, self.regions.len())?;
        if start == end {
            return Ok(ChainMap::empty(access));
        }
        if access.is_write() && !self.regions[start..end].iter().all(Region::is_writable) {
            return Err(BufferError::NotWritable);
        }

        let region = if end - start == 1 {
            self.regions[start].clone()
        } else {
            let merged = Region::merge(&self.regions[start..end])?;
            if self.is_all_writable() {
                // Cache refresh only; the mapping below uses the merged
                // region whether or not this sticks.
                let _ = self.replace_range(start..end, merged.clone());
            }
            merged
        };

        let len = region.len();
        Ok(ChainMap {
            region,
            start: 0,
            len,
            access,
        })
    }

    /// Maps a logical byte range as one contiguous span.
    ///
    /// An unbounded end means "to the end of the content". Resolves the
    /// covering region span via [`Chain::locate`], maps it with
    /// [`Chain::map_regions`], then narrows the mapping to the requested
    /// bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use segbuf::{Access, Chain, Region};
    ///
    /// let mut chain = Chain::new();
    /// chain.append(Region::from(vec![0xaau8; 256]))?;
    /// chain.append(Region::from(vec![0xbbu8; 256]))?;
    ///
    /// let map = chain.map_bytes(128..384, Access::Read)?;
    /// let bytes = map.bytes()?;
    /// assert_eq!(bytes.len(), 256);
    /// assert!(bytes[..128].iter().all(|&b| b == 0xaa));
    /// assert!(bytes[128..].iter().all(|&b| b == 0xbb));
    /// # Ok::<(), segbuf::BufferError>(())
    /// ```
    pub fn map_bytes(
        &mut self,
        range: impl RangeBounds<usize>,
        access: Access,
    ) -> Result<ChainMap, BufferError> {
        let (offset, size) = super::resolve_byte_range(&range, self.len())?;
        let span = self.locate(offset, size)?;
        let mut map = self.map_regions(span.index..span.index + span.count, access)?;
        map.start = span.offset;
        map.len = size;
        Ok(map)
    }
}
