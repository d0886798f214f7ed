//! Byte-addressed operations - fill, extract, set, compare.
//!
//! These walk the chain region by region, mapping one region at a time and
//! processing `min(remaining, window - local)` bytes per step. They are
//! partial-result tolerant: a chain shorter than the request is not an
//! error, the returned count just falls short of the request. Callers that
//! need exactness compare the returned count against the requested one.

use std::cmp::Ordering;

use bytes::Bytes;

use super::Chain;

impl Chain {
    /// Finds the region containing logical byte `offset`, returning its
    /// index and the offset within its window.
    fn skip_to(&self, mut offset: usize) -> Option<(usize, usize)> {
        for (index, region) in self.regions.iter().enumerate() {
            if offset < region.len() {
                return Some((index, offset));
            }
            offset -= region.len();
        }
        None
    }

    /// Copies `src` into the chain starting at logical byte `offset`.
    ///
    /// Returns the number of bytes actually written: fewer than `src.len()`
    /// when the chain ends early or a region cannot be mapped for writing.
    pub fn fill(&mut self, offset: usize, src: &[u8]) -> usize {
        if src.is_empty() {
            return 0;
        }
        let Some((first, mut local)) = self.skip_to(offset) else {
            return 0;
        };

        let mut done = 0;
        for region in &self.regions[first..] {
            if done == src.len() {
                break;
            }
            let Ok(mut mapped) = region.map_mut() else {
                break;
            };
            let take = (region.len() - local).min(src.len() - done);
            mapped[local..local + take].copy_from_slice(&src[done..done + take]);
            done += take;
            local = 0;
        }
        done
    }

    /// Copies bytes out of the chain into `dst`, starting at logical byte
    /// `offset`.
    ///
    /// Returns the number of bytes actually read.
    pub fn extract(&self, offset: usize, dst: &mut [u8]) -> usize {
        if dst.is_empty() {
            return 0;
        }
        let Some((first, mut local)) = self.skip_to(offset) else {
            return 0;
        };

        let mut done = 0;
        for region in &self.regions[first..] {
            if done == dst.len() {
                break;
            }
            let Ok(mapped) = region.map() else {
                break;
            };
            let take = (region.len() - local).min(dst.len() - done);
            dst[done..done + take].copy_from_slice(&mapped[local..local + take]);
            done += take;
            local = 0;
        }
        done
    }

    /// Copies up to `size` bytes starting at `offset` into a fresh buffer
    /// holding exactly the bytes obtained.
    pub fn extract_owned(&self, offset: usize, size: usize) -> Bytes {
        let available = self.len().saturating_sub(offset).min(size);
        let mut data = vec![0u8; available];
        let done = self.extract(offset, &mut data);
        data.truncate(done);
        Bytes::from(data)
    }

    /// Writes `size` repetitions of `value` starting at logical byte
    /// `offset`.
    ///
    /// Returns the number of bytes actually written.
    pub fn set_bytes(&mut self, offset: usize, value: u8, size: usize) -> usize {
        if size == 0 {
            return 0;
        }
        let Some((first, mut local)) = self.skip_to(offset) else {
            return 0;
        };

        let mut done = 0;
        for region in &self.regions[first..] {
            if done == size {
                break;
            }
            let Ok(mut mapped) = region.map_mut() else {
                break;
            };
            let take = (region.len() - local).min(size - done);
            mapped[local..local + take].fill(value);
            done += take;
            local = 0;
        }
        done
    }

    /// Compares the chain's bytes from `offset` against `other`.
    ///
    /// Returns [`Ordering::Equal`] only when every compared byte matches
    /// *and* the chain held at least `other.len()` bytes from `offset`;
    /// running out of chain first yields [`Ordering::Greater`]. Mismatches
    /// return the lexicographic ordering of the chain's bytes against
    /// `other`.
    pub fn compare(&self, offset: usize, other: &[u8]) -> Ordering {
        let Some((first, mut local)) = self.skip_to(offset) else {
            return Ordering::Greater;
        };

        let mut done = 0;
        for region in &self.regions[first..] {
            if done == other.len() {
                break;
            }
            let Ok(mapped) = region.map() else {
                return Ordering::Greater;
            };
            let take = (region.len() - local).min(other.len() - done);
            match mapped[local..local + take].cmp(&other[done..done + take]) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
            done += take;
            local = 0;
        }

        if done == other.len() {
            Ordering::Equal
        } else {
            Ordering::Greater
        }
    }

    /// Compares `size` bytes of this chain from `offset` against `size`
    /// bytes of `other` from `other_offset`.
    ///
    /// Each side is clipped to the bytes it actually holds; an equal prefix
    /// is resolved by comparing the clipped lengths (the longer operand
    /// wins).
    pub fn cmp_range(
        &self,
        offset: usize,
        other: &Chain,
        other_offset: usize,
        size: usize,
    ) -> Ordering {
        let ours = self.len().saturating_sub(offset).min(size);
        let theirs = other.len().saturating_sub(other_offset).min(size);
        let common = ours.min(theirs);

        if common > 0 {
            // skip_to cannot fail here: common > 0 implies offset < len.
            let Some((first, mut local)) = self.skip_to(offset) else {
                return Ordering::Greater;
            };
            let mut done = 0;
            for region in &self.regions[first..] {
                if done == common {
                    break;
                }
                let Ok(mapped) = region.map() else {
                    return Ordering::Greater;
                };
                let take = (region.len() - local).min(common - done);
                // `other.compare` orders other against our slice; reverse
                // to order us against other.
                match other
                    .compare(other_offset + done, &mapped[local..local + take])
                    .reverse()
                {
                    Ordering::Equal => {}
                    unequal => return unequal,
                }
                done += take;
                local = 0;
            }
        }

        ours.cmp(&theirs)
    }
}
