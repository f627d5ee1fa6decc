//! UVMAC: one-time-pad encryption of the VHASH output.
//!
//! The tag is `vhash(message) + pad` with the addition taken per 64-bit
//! half in the ring Z/2^64. Because the pad words are fresh uniform
//! randomness used exactly once, a forger learns nothing about the hash
//! output from the tag, which is what makes the bound unconditional.

mod pad;
mod tag;

pub use pad::PadKeyStream;
pub use tag::Tag;

use tracing::trace;

use crate::error::{Error, Result};
use crate::hash::{Vhash, TAG_WORDS};

/// Compute the tag for a message and consume the pad words it costs.
///
/// `message` is the whole message, or its remainder after earlier
/// [`Vhash::update`] calls on the same context. One pad word is drawn per
/// tag half, the first word pairing with the high half.
///
/// Fails with [`Error::PadKeyExhausted`] before touching either the context
/// or the cursor, so a failed call can be retried with a fresh stream.
pub fn authenticate(
    ctx: &mut Vhash,
    message: &[u8],
    pad: &mut PadKeyStream<'_>,
) -> Result<Tag> {
    if pad.remaining_words() < TAG_WORDS as u64 {
        return Err(Error::PadKeyExhausted {
            position: pad.position(),
            length: pad.length(),
            needed: TAG_WORDS as u64,
        });
    }

    let digest = ctx.finalize(message);
    let mut words = [0u64; TAG_WORDS];
    for (word, half) in words.iter_mut().zip(digest) {
        *word = half.wrapping_add(pad.take_word()?);
    }

    trace!(position = pad.position(), "tag generated");
    Ok(Tag::from_words(words))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::NH_BLOCK_BYTES;

    fn test_ctx() -> Vhash {
        Vhash::new(&b"abcdefgh".repeat(crate::HASH_KEY_WORDS)).unwrap()
    }

    #[test]
    fn exhausted_pad_leaves_context_and_cursor_alone() {
        let mut ctx = test_ctx();
        let pad_bytes = [0u8; 8 * TAG_WORDS];
        let mut pad = PadKeyStream::new(&pad_bytes);
        authenticate(&mut ctx, b"first", &mut pad).unwrap();

        let position = pad.position();
        let err = authenticate(&mut ctx, b"second", &mut pad).unwrap_err();
        assert!(matches!(err, Error::PadKeyExhausted { .. }));
        assert_eq!(pad.position(), position);

        // The context was not finalized by the failed call: a fresh pad
        // produces the same tag a fresh context would.
        let mut fresh_pad = PadKeyStream::new(&pad_bytes);
        let mut retry_pad = PadKeyStream::new(&pad_bytes);
        let retried = authenticate(&mut ctx, b"second", &mut retry_pad).unwrap();
        let expected = authenticate(&mut test_ctx(), b"second", &mut fresh_pad).unwrap();
        assert_eq!(retried, expected);
    }

    #[test]
    fn pad_difference_shows_up_verbatim_in_the_tag() {
        // One-time-pad linearity: same message, pads p and p', tags differ
        // by exactly the wrapping word difference per half.
        let p: Vec<u8> = (0..8 * TAG_WORDS as u8).collect();
        let q: Vec<u8> = (0..8 * TAG_WORDS as u8).map(|b| b.wrapping_mul(17)).collect();

        let tag_p = authenticate(&mut test_ctx(), b"linear", &mut PadKeyStream::new(&p)).unwrap();
        let tag_q = authenticate(&mut test_ctx(), b"linear", &mut PadKeyStream::new(&q)).unwrap();

        let mut pad_p = PadKeyStream::new(&p);
        let mut pad_q = PadKeyStream::new(&q);
        for half in 0..TAG_WORDS {
            let delta = pad_p.take_word().unwrap().wrapping_sub(pad_q.take_word().unwrap());
            assert_eq!(
                tag_p.words()[half].wrapping_sub(tag_q.words()[half]),
                delta
            );
        }
    }

    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Streaming over any block-aligned split equals the one-shot MAC.
            #[test]
            fn streaming_split_is_transparent(
                message in prop::collection::vec(any::<u8>(), 0..=4 * NH_BLOCK_BYTES),
                split_blocks in 0usize..=4,
            ) {
                let pad_bytes = b"abcdefgh".repeat(2 * TAG_WORDS);

                let mut one_shot = test_ctx();
                let mut pad = PadKeyStream::new(&pad_bytes);
                let whole = authenticate(&mut one_shot, &message, &mut pad).unwrap();

                let cut = (split_blocks * NH_BLOCK_BYTES).min(
                    message.len() / NH_BLOCK_BYTES * NH_BLOCK_BYTES,
                );
                let mut streamed = test_ctx();
                if cut > 0 {
                    streamed.update(&message[..cut]).unwrap();
                }
                let mut pad = PadKeyStream::new(&pad_bytes);
                let split = authenticate(&mut streamed, &message[cut..], &mut pad).unwrap();

                prop_assert_eq!(whole, split);
            }

            /// Tail padding is internal: bytes past the message in the
            /// caller's storage can never reach the hash.
            #[test]
            fn caller_storage_past_the_tail_is_ignored(
                tail in prop::collection::vec(any::<u8>(), 1..NH_BLOCK_BYTES),
                noise in any::<u8>(),
            ) {
                let mut padded = tail.clone();
                padded.resize(NH_BLOCK_BYTES, noise);

                let a = test_ctx().finalize(&tail);
                let b = test_ctx().finalize(&padded[..tail.len()]);
                prop_assert_eq!(a, b);
            }
        }
    }
}
