//! UVMAC - unconditionally secure message authentication
//!
//! This library computes Message Authentication Codes by composing the
//! three-layer VHASH universal hash family with one-time-pad encryption of
//! the hash output. Because the outer encryption is a true one-time pad, the
//! forgery bound (about 2^-61 per 64-bit tag) is information-theoretic: no
//! computational hardness assumption is involved.
//!
//! The sender and receiver share two kinds of key material:
//!
//! - a long-lived **hash key** that selects one function from an
//!   almost-delta-universal family (reusable indefinitely), and
//! - a **pad key**, a stream of fresh uniform 64-bit words of which one word
//!   (two for 128-bit tags) is consumed per tag and must never be reused.
//!
//! # Quick Start
//!
//! ```rust
//! use uvmac::{authenticate, PadKeyStream, Vhash};
//!
//! // 160 bytes of hash key select the hash function (reusable).
//! let hash_key = [0x42u8; uvmac::HASH_KEY_BYTES];
//! let mut ctx = Vhash::new(&hash_key)?;
//!
//! // Fresh pad-key words encrypt each tag (use each word once!).
//! let pad_key = [0x07u8; 64];
//! let mut pad = PadKeyStream::new(&pad_key);
//!
//! let tag = authenticate(&mut ctx, b"attack at dawn", &mut pad)?;
//! println!("{tag}");
//! # Ok::<(), uvmac::Error>(())
//! ```
//!
//! # Features
//!
//! - **`tag-128`** - 128-bit tags (two VHASH halves, two pad words per tag)
//! - **`big-endian`** - interpret message words big-endian on the wire
//!
//! Both settings change the MAC; interoperating peers must build alike.
//!
//! # Security contract
//!
//! The caller owns the pad-key stream and its cursor. Any (stream, position)
//! pair must authenticate at most one message; the library does not and
//! cannot detect reuse. Distinct [`Vhash`] contexts are independent and may
//! be used from parallel threads; a single context must not be shared.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod error;

pub mod hash;
pub mod mac;

pub use error::{Error, Result};
pub use hash::{
    HASH_KEY_BYTES, HASH_KEY_WORDS, NH_BLOCK_BYTES, TAG_BITS, TAG_BYTES, TAG_WORDS, Vhash,
};
pub use mac::{authenticate, PadKeyStream, Tag};
