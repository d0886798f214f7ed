//! Composition - moving and sharing content between chains.
//!
//! The compositor prefers zero-copy views over duplication: content coming
//! from another chain is appended as views of the source regions, falling
//! back to a content copy only for regions whose storage kind forbids
//! sharing.

use std::ops::RangeBounds;

use crate::error::BufferError;
use crate::region::Region;

use super::{resolve_byte_range, Chain, MAX_REGIONS};

impl Chain {
    /// Appends every region of `src`, in order, as zero-copy views (or
    /// content copies where the region forbids views).
    ///
    /// A failure partway leaves the regions appended so far in place; the
    /// source is never modified.
    pub fn append_all_from(&mut self, src: &Chain) -> Result<(), BufferError> {
        for region in &src.regions {
            let shared = match region.view(..) {
                Some(view) => view,
                None => region.copy(..)?,
            };
            self.append(shared)?;
        }
        Ok(())
    }

    /// Appends a byte range of `src` as zero-copy views (or content copies
    /// where a region forbids views), clipping the first and last touched
    /// regions to the requested window.
    ///
    /// An unbounded end means "to the end of `src`"; an empty resolved
    /// range appends nothing.
    pub fn append_range_from(
        &mut self,
        src: &Chain,
        range: impl RangeBounds<usize>,
    ) -> Result<(), BufferError> {
        let (offset, size) = resolve_byte_range(&range, src.len())?;
        if size == 0 {
            return Ok(());
        }

        let span = src.locate(offset, size)?;
        let mut local = span.offset;
        let mut remaining = size;
        for region in &src.regions[span.index..span.index + span.count] {
            let take = (region.len() - local).min(remaining);
            if take > 0 {
                let shared = match region.view(local..local + take) {
                    Some(view) => view,
                    None => region.copy(local..local + take)?,
                };
                self.append(shared)?;
            }
            remaining -= take;
            local = 0;
        }
        debug_assert_eq!(remaining, 0);
        Ok(())
    }

    /// Moves all regions out of each source chain into this chain,
    /// emptying the sources.
    ///
    /// While the combined region count stays within [`MAX_REGIONS`] this is
    /// a plain splice of the region lists; beyond that, every region
    /// (this chain's included) is consolidated into a single region to keep
    /// the chain within bound. On failure this chain is left unchanged.
    pub fn merge_consuming(
        &mut self,
        sources: impl IntoIterator<Item = Chain>,
    ) -> Result<(), BufferError> {
        let mut moved: Vec<Region> = Vec::new();
        for mut src in sources {
            moved.append(&mut src.regions);
        }

        if self.regions.len() + moved.len() <= MAX_REGIONS {
            self.regions.append(&mut moved);
            return Ok(());
        }

        let mut all: Vec<Region> = Vec::with_capacity(self.regions.len() + moved.len());
        all.extend(self.regions.iter().cloned());
        all.append(&mut moved);
        let merged = Region::take_ownership(all)?;
        self.regions.clear();
        self.regions.push(merged);
        Ok(())
    }

    /// Creates a new chain viewing a byte range of this one, zero-copy
    /// where the regions allow it.
    pub fn view(&self, range: impl RangeBounds<usize>) -> Result<Chain, BufferError> {
        let mut out = Chain::new();
        out.append_range_from(self, range)?;
        Ok(out)
    }

    /// Creates a new single-region chain holding a writable deep copy of a
    /// byte range of this one.
    pub fn copy_range(&self, range: impl RangeBounds<usize>) -> Result<Chain, BufferError> {
        let (offset, size) = resolve_byte_range(&range, self.len())?;
        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|_| BufferError::OutOfMemory { requested: size })?;
        data.resize(size, 0);
        if self.extract(offset, &mut data) != size {
            // The range was validated; coming up short means a region could
            // not be mapped.
            return Err(BufferError::Busy);
        }
        Ok(Chain::from(data))
    }

    /// Creates a new chain equal to this one with `range` replaced by the
    /// content of `from`: views of the prefix, then `from`'s regions, then
    /// views of the suffix.
    pub fn replace_byte_range(
        &self,
        range: impl RangeBounds<usize>,
        from: &Chain,
    ) -> Result<Chain, BufferError> {
        let (offset, size) = resolve_byte_range(&range, self.len())?;
        let mut out = Chain::new();
        out.append_range_from(self, ..offset)?;
        out.append_all_from(from)?;
        out.append_range_from(self, offset + size..)?;
        Ok(out)
    }
}
