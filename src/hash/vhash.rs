//! The VHASH context: key schedule and streaming state machine.

use tracing::{debug, trace};

use super::{
    add128, l3hash, load_key64, nh, poly_step, L3_KEY_WORDS, M62, MPOLY, NH_BLOCK_BYTES,
    NH_BLOCK_WORDS, NH_KEY_WORDS, P64, POLY_KEY_WORDS, TAG_WORDS,
};
use crate::error::{Error, Result};

/// Sequential big-endian word reader over the user key, mirroring the
/// consumable-key discipline of the pad stream.
struct KeyReader<'a> {
    bytes: &'a [u8],
    words: usize,
    position: usize,
}

impl<'a> KeyReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            words: bytes.len() / 8,
            position: 0,
        }
    }

    fn next_word(&mut self) -> Result<u64> {
        if self.position >= self.words {
            return Err(Error::InsufficientKeyMaterial {
                consumed: self.words,
                needed: NH_KEY_WORDS + POLY_KEY_WORDS + L3_KEY_WORDS,
            });
        }
        let word = load_key64(&self.bytes[8 * self.position..]);
        self.position += 1;
        Ok(word)
    }
}

/// Long-lived per-key VHASH state.
///
/// A context owns the expanded key tables and the running polynomial
/// accumulator(s). It is created from user key bytes by [`Vhash::new`], fed
/// whole blocks with [`Vhash::update`], and consumed-and-reset by
/// [`Vhash::finalize`]. Contexts are plain values: independent instances
/// need no coordination, but a single instance must not be used
/// concurrently.
#[derive(Debug, Clone)]
pub struct Vhash {
    nhkey: [u64; NH_KEY_WORDS],
    polykey: [u64; POLY_KEY_WORDS],
    l3key: [u64; L3_KEY_WORDS],
    polytmp: [u64; POLY_KEY_WORDS],
    first_block_processed: bool,
}

impl Vhash {
    /// Expand user key bytes into a ready context.
    ///
    /// The key is consumed as sequential big-endian 64-bit words (a trailing
    /// partial word is ignored): first the NH table, then the polynomial key
    /// pair(s) under the 29-bit-lane mask, then the l3 key pair(s) by
    /// rejection sampling below 2^64 - 257. Because rejection can re-draw,
    /// supply [`HASH_KEY_BYTES`](crate::HASH_KEY_BYTES) of key material;
    /// exhaustion fails with [`Error::InsufficientKeyMaterial`].
    pub fn new(user_key: &[u8]) -> Result<Self> {
        validate_build_parameters()?;

        let mut reader = KeyReader::new(user_key);

        let mut nhkey = [0u64; NH_KEY_WORDS];
        for word in &mut nhkey {
            *word = reader.next_word()?;
        }

        let mut polykey = [0u64; POLY_KEY_WORDS];
        for word in &mut polykey {
            *word = reader.next_word()? & MPOLY;
        }

        let mut l3key = [0u64; L3_KEY_WORDS];
        let mut rejected = 0u32;
        for word in &mut l3key {
            *word = loop {
                let candidate = reader.next_word()?;
                if candidate < P64 {
                    break candidate;
                }
                rejected += 1;
            };
        }

        debug!(
            words_consumed = reader.position,
            l3_rejections = rejected,
            "vhash key schedule complete"
        );

        Ok(Self {
            nhkey,
            polykey,
            l3key,
            polytmp: polykey,
            first_block_processed: false,
        })
    }

    /// Absorb a prefix of the message.
    ///
    /// The length must be a positive multiple of
    /// [`NH_BLOCK_BYTES`](crate::NH_BLOCK_BYTES); anything shorter belongs
    /// in the final [`Vhash::finalize`] call.
    pub fn update(&mut self, message: &[u8]) -> Result<()> {
        if message.is_empty() || message.len() % NH_BLOCK_BYTES != 0 {
            return Err(Error::InvalidUpdateLength {
                length: message.len(),
                block: NH_BLOCK_BYTES,
            });
        }
        for block in message.chunks_exact(NH_BLOCK_BYTES) {
            self.absorb_block(block);
        }
        trace!(
            bytes = message.len(),
            blocks = message.len() / NH_BLOCK_BYTES,
            "absorbed message prefix"
        );
        Ok(())
    }

    /// Hash the remainder of the message and reset the context.
    ///
    /// `message` may be any length: contained full blocks go through the
    /// streaming path and the tail (zero-padded internally to a 16-byte
    /// boundary) is folded in last. Returns one 64-bit digest per tag half;
    /// the context is left ready for the next message.
    pub fn finalize(&mut self, message: &[u8]) -> [u64; TAG_WORDS] {
        let tail_len = message.len() % NH_BLOCK_BYTES;
        let full_len = message.len() - tail_len;
        for block in message[..full_len].chunks_exact(NH_BLOCK_BYTES) {
            self.absorb_block(block);
        }

        let mut tail = [0u8; NH_BLOCK_BYTES];
        let padded_len = 16 * tail_len.div_ceil(16);
        tail[..tail_len].copy_from_slice(&message[full_len..]);

        let mut digest = [0u64; TAG_WORDS];
        for (half, out) in digest.iter_mut().enumerate() {
            let window = &self.nhkey[2 * half..];
            let state = (self.polytmp[2 * half], self.polytmp[2 * half + 1]);
            let key = (self.polykey[2 * half], self.polykey[2 * half + 1]);

            let (ch, cl) = if tail_len > 0 {
                let (mut rh, rl) = nh(&tail[..padded_len], window);
                rh &= M62;
                if self.first_block_processed {
                    poly_step(state, key, (rh, rl))
                } else {
                    // A short lone message enters as the constant term.
                    add128(key.0, key.1, rh, rl)
                }
            } else if self.first_block_processed {
                state
            } else {
                // Empty string: the digest of the bare polynomial key.
                key
            };

            // The length encoding is the tail in bits, not the total.
            *out = l3hash(
                ch,
                cl,
                self.l3key[2 * half],
                self.l3key[2 * half + 1],
                (8 * tail_len) as u64,
            );
        }

        trace!(tail_bytes = tail_len, "vhash finalized");
        self.abort();
        digest
    }

    /// Abandon the message in progress.
    ///
    /// Restores the accumulator(s) to the polynomial key and clears the
    /// first-block flag, exactly the reset [`Vhash::finalize`] performs.
    pub fn abort(&mut self) {
        self.polytmp = self.polykey;
        self.first_block_processed = false;
    }

    /// One full block: the first enters the polynomial as its constant term
    /// (an addition to the key), every later block as a polynomial step.
    fn absorb_block(&mut self, block: &[u8]) {
        let first = !self.first_block_processed;
        self.first_block_processed = true;

        for half in 0..TAG_WORDS {
            let window = &self.nhkey[2 * half..2 * half + NH_BLOCK_WORDS];
            let (mut rh, rl) = nh(block, window);
            rh &= M62;

            let state = (self.polytmp[2 * half], self.polytmp[2 * half + 1]);
            let (ch, cl) = if first {
                add128(state.0, state.1, rh, rl)
            } else {
                let key = (self.polykey[2 * half], self.polykey[2 * half + 1]);
                poly_step(state, key, (rh, rl))
            };
            self.polytmp[2 * half] = ch;
            self.polytmp[2 * half + 1] = cl;
        }
    }
}

fn validate_build_parameters() -> Result<()> {
    if !NH_BLOCK_BYTES.is_power_of_two() || !(16..=4096).contains(&NH_BLOCK_BYTES) {
        return Err(Error::InvalidConfiguration {
            reason: "NH_BLOCK_BYTES must be a power of two in [16, 4096]",
        });
    }
    if TAG_WORDS != 1 && TAG_WORDS != 2 {
        return Err(Error::InvalidConfiguration {
            reason: "tag length must be 64 or 128 bits",
        });
    }
    Ok(())
}
