use core::fmt;
use sha2::Digest;
use zeroize::Zeroizing;

pub trait Hasher<const N: usize> {
    fn new() -> Self;
    fn update(&mut self, bytes: &[u8]);
    fn finalize<H: Hash<N>>(&mut self) -> H;
}

pub trait Hash<const N: usize> {
    fn new(v: [u8; N]) -> Self;
}

impl<const N: usize> Hash<N> for [u8; N] {
    fn new(v: [u8; N]) -> Self {
        v
    }
}

impl<const N: usize, H: Hash<N> + zeroize::Zeroize> Hash<N> for Zeroizing<H> {
    fn new(v: [u8; N]) -> Self {
        Zeroizing::new(H::new(v))
    }
}

#[derive(Clone, Copy)]
pub struct HexHash<const N: usize>(pub [u8; N]);

impl<const N: usize> Hash<N> for HexHash<N> {
    fn new(v: [u8; N]) -> Self {
        HexHash(v)
    }
}

impl<const N: usize> fmt::Display for HexHash<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::crypto_helpers::common::HexSlice(&self.0))
    }
}

/// Hash rendered in base58, the way NEAR explorers show transaction hashes.
#[derive(Clone, Copy)]
pub struct Base58Hash<const N: usize>(pub [u8; N]);

impl<const N: usize> Hash<N> for Base58Hash<N> {
    fn new(v: [u8; N]) -> Self {
        Base58Hash(v)
    }
}

impl<const N: usize> fmt::Display for Base58Hash<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Large enough for hashes of up to 64 bytes
        let mut buf = [0u8; 96];
        let bytes_written = bs58::encode(&self.0[..])
            .onto(&mut buf[..])
            .or(Err(fmt::Error))?;
        let str = core::str::from_utf8(&buf[0..bytes_written]).or(Err(fmt::Error))?;
        write!(f, "{}", str)
    }
}


#[derive(Clone, Default)]
pub struct Sha256(sha2::Sha256);

impl Hasher<32> for Sha256 {
    fn new() -> Self {
        Self(sha2::Sha256::new())
    }

    fn update(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    fn finalize<H: Hash<32>>(&mut self) -> H {
        let digest = self.0.finalize_reset();
        let mut rv = [0u8; 32];
        rv.copy_from_slice(&digest);
        H::new(rv)
    }
}
