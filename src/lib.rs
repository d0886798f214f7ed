//! segbuf
//!
//! Scatter-gather byte buffers for Rust.
//!
//! `segbuf` models a logical, contiguous-looking byte sequence as an
//! ordered, bounded list of independently reference-counted memory regions.
//! It is designed as a small, composable primitive for:
//!
//! - binary-format parsers that interpret headers in place
//! - protocol encoders that prepend fixed headers to variable bodies
//! - serializers that assemble output without copying encoded pieces
//!
//! The crate intentionally:
//! - does NOT perform I/O
//! - does NOT persist or compress anything
//! - does NOT synchronize concurrent mutation of one chain
//!
//! It only does one thing: **manage in-memory byte regions as one buffer**.
//!
//! # Building and sharing
//!
//! ```
//! use segbuf::{Chain, Region};
//!
//! let mut chain = Chain::new();
//! chain.append(Region::from(vec![0u8; 256]))?;
//! chain.append(Region::from_static(b"trailer"))?;
//!
//! assert_eq!(chain.len(), 263);
//! assert_eq!(chain.region_count(), 2);
//!
//! // Sharing content between chains is zero-copy where possible.
//! let mut other = Chain::new();
//! other.append_range_from(&chain, 128..)?;
//! assert_eq!(other.len(), 135);
//! # Ok::<(), segbuf::BufferError>(())
//! ```
//!
//! # Mapping
//!
//! A mapping exposes any logical byte range as one contiguous slice, even
//! when it crosses region boundaries:
//!
//! ```
//! use segbuf::{Access, Chain, Region};
//!
//! let mut chain = Chain::new();
//! chain.append(Region::from(vec![0xaau8; 128]))?;
//! chain.append(Region::from(vec![0xbbu8; 128]))?;
//!
//! let map = chain.map_bytes(64..192, Access::Read)?;
//! let bytes = map.bytes()?;
//! assert!(bytes[..64].iter().all(|&b| b == 0xaa));
//! assert!(bytes[64..].iter().all(|&b| b == 0xbb));
//! # Ok::<(), segbuf::BufferError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chain;
mod error;
mod region;

//
// Public surface (intentionally tiny)
//

pub use chain::{Chain, ChainMap, Span, MAX_REGIONS};
pub use error::BufferError;
pub use region::{Access, AllocParams, Region, RegionFlags, RegionMut, RegionRef};
