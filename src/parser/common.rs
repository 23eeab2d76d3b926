use core::fmt;

// ========== WIRE CONSTANTS ==========

/// Largest transaction the signing buffer can hold, path excluded.
pub const MAX_DATA_SIZE: usize = 650;

pub const BIP32_PATH_LENGTH: usize = 5;
pub const BIP32_PATH_SIZE: usize = BIP32_PATH_LENGTH * 4;

pub const PUBLIC_KEY_SIZE: usize = 32;
pub const SIGNATURE_SIZE: usize = 64;
pub const HASH_SIZE: usize = 32;

/// Key type byte followed by the 32 byte key
pub const TX_PUBLIC_KEY_SIZE: usize = 33;
pub const BLOCK_HASH_SIZE: usize = 32;
pub const BALANCE_SIZE: usize = 16;

/// yoctoNEAR per NEAR, as a power of ten
pub const NEAR_NOMINATION: usize = 24;

// Display capacities, terminator included
pub const LINE1_SIZE: usize = 45;
pub const LINE2_SIZE: usize = 65;
pub const LINE3_SIZE: usize = 65;
pub const LINE5_SIZE: usize = 45;
pub const AMOUNT_SIZE: usize = 45;
pub const LONG_LINE_SIZE: usize = 250;

// ========== KEY PATH ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bip32Path(pub [u32; BIP32_PATH_LENGTH]);

impl Bip32Path {
    /// Splits a big-endian encoded path off the front of `data`.
    pub fn split(data: &[u8]) -> Option<(Self, &[u8])> {
        if data.len() < BIP32_PATH_SIZE {
            return None;
        }
        let (path_bytes, rest) = data.split_at(BIP32_PATH_SIZE);
        let mut path = [0u32; BIP32_PATH_LENGTH];
        for (element, bytes) in path.iter_mut().zip(path_bytes.chunks_exact(4)) {
            *element = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        Some((Bip32Path(path), rest))
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

// ========== DISPLAY ==========

fn sanitize(byte: u8) -> u8 {
    if (0x20..0x7f).contains(&byte) {
        byte
    } else {
        b'?'
    }
}

/// Copies `src` into `dst` as a NUL terminated string.
///
/// When `src` does not fit together with its terminator, the copy is cut to
/// the capacity and the last bytes are replaced with dots, so that a reader
/// always sees the string was shortened. Returns the number of bytes before
/// the terminator.
pub fn copy_ellipsis(dst: &mut [u8], src: &[u8]) -> usize {
    let cap = dst.len();
    if cap == 0 {
        return 0;
    }
    if src.len() + 1 > cap {
        for (d, s) in dst.iter_mut().zip(src) {
            *d = sanitize(*s);
        }
        for d in dst[cap.saturating_sub(4)..].iter_mut() {
            *d = b'.';
        }
        dst[cap - 1] = 0;
        cap - 1
    } else {
        for (d, s) in dst.iter_mut().zip(src) {
            *d = sanitize(*s);
        }
        dst[src.len()] = 0;
        src.len()
    }
}

/// One bounded display field. `N` counts the terminator, matching the
/// layout the review screens were sized for.
#[derive(Clone)]
pub struct DisplayLine<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> Default for DisplayLine<N> {
    fn default() -> Self {
        Self {
            buf: [0; N],
            len: 0,
        }
    }
}

impl<const N: usize> DisplayLine<N> {
    /// Fills the line from untrusted bytes, shortening with an ellipsis.
    pub fn set(&mut self, src: &[u8]) {
        self.len = copy_ellipsis(&mut self.buf, src);
    }

    /// Fills the line with a value that must be shown whole, such as an
    /// amount. Fails rather than shortening it.
    pub fn set_exact(&mut self, src: &str) -> Result<(), arrayvec::CapacityError> {
        if src.len() + 1 > N {
            return Err(arrayvec::CapacityError::new(()));
        }
        self.set(src.as_bytes());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.buf = [0; N];
        self.len = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn as_str(&self) -> &str {
        // Only printable ASCII is ever stored
        core::str::from_utf8(self.as_bytes()).unwrap_or("")
    }
}

impl<const N: usize> fmt::Display for DisplayLine<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> fmt::Debug for DisplayLine<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl<const N: usize> PartialEq<&str> for DisplayLine<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

/// Everything the review screens show for one transaction.
#[derive(Clone, Default, Debug)]
pub struct DisplayContext {
    /// Action label, or the called method name
    pub line1: DisplayLine<LINE1_SIZE>,
    /// Receiver, permission receiver, or the blind hash
    pub line2: DisplayLine<LINE2_SIZE>,
    /// Signer
    pub line3: DisplayLine<LINE3_SIZE>,
    /// Deposit, allowance, or permission
    pub line5: DisplayLine<LINE5_SIZE>,
    /// Transfer amount
    pub amount: DisplayLine<AMOUNT_SIZE>,
    /// JSON arguments of a function call
    pub long_line: DisplayLine<LONG_LINE_SIZE>,
}

impl DisplayContext {
    pub fn clear(&mut self) {
        self.line1.clear();
        self.line2.clear();
        self.line3.clear();
        self.line5.clear();
        self.amount.clear();
        self.long_line.clear();
    }
}
