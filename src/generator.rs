use crate::alphabet::Alphabet;
use anyhow::{Result, bail};
use sha2::{Digest, Sha512};
use zeroize::Zeroizing;

pub const DIGEST_LEN: usize = 64;

/// Derive a password of exactly `length` bytes from an identifier and a
/// secret salt, every byte drawn from `alphabet`.
///
/// The digest stream is `SHA-512(SHA-512(salt) || identifier)`. Its 64
/// bytes are walked cyclically from position 0: bytes inside the
/// alphabet are appended, the rest are skipped. Bytes repeat once the
/// requested length outruns the matching positions in the digest; the
/// output is a recovery handle, not fresh entropy, so the repetition is
/// accepted.
///
/// Identifier and salt are hashed as raw bytes. Same inputs always give
/// the same output, across processes and platforms.
pub fn derive(
    identifier: &[u8],
    salt: &[u8],
    length: usize,
    alphabet: &Alphabet,
) -> Result<Zeroizing<String>> {
    if length == 0 {
        bail!("Password length must be at least 1");
    }
    if alphabet.is_empty() {
        bail!("No valid characters available: the alphabet is empty");
    }

    let mut salt_hash = Zeroizing::new([0u8; DIGEST_LEN]);
    salt_hash.copy_from_slice(&Sha512::digest(salt));

    let mut hasher = Sha512::new();
    hasher.update(&*salt_hash);
    hasher.update(identifier);
    let mut stream = Zeroizing::new([0u8; DIGEST_LEN]);
    stream.copy_from_slice(&hasher.finalize());

    let mut output = Zeroizing::new(Vec::with_capacity(length));
    let mut position = 0usize;
    let mut misses = 0usize;

    while output.len() < length {
        let byte = stream[position % DIGEST_LEN];
        if alphabet.contains(byte) {
            output.push(byte);
            misses = 0;
        } else {
            misses += 1;
            // A full cycle with no match means the digest holds no
            // acceptable byte and the scan would spin forever.
            if misses > DIGEST_LEN {
                bail!(
                    "No valid characters available: no byte of the digest falls in the allowed alphabet"
                );
            }
        }
        position += 1;
    }

    let password = String::from_utf8(output.to_vec())
        .map_err(|_| anyhow::anyhow!("Derived password is not valid UTF-8"))?;

    Ok(Zeroizing::new(password))
}
