use crate::parser::common::{Bip32Path, DisplayContext, MAX_DATA_SIZE, PUBLIC_KEY_SIZE};
use crate::parser::tx::SignFlow;

use zeroize::Zeroize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkError {
    /// First chunk too short to carry the key path
    Underflow,
    /// Transaction larger than the signing buffer
    Overflow,
}

/// Transaction bytes received so far, and the key they will be signed with.
pub struct SigningContext {
    path: Option<Bip32Path>,
    buffer: [u8; MAX_DATA_SIZE],
    used: usize,
    network_byte: u8,
}

impl Default for SigningContext {
    fn default() -> Self {
        Self {
            path: None,
            buffer: [0; MAX_DATA_SIZE],
            used: 0,
            network_byte: 0,
        }
    }
}

impl SigningContext {
    /// Appends one chunk. The first chunk of a request starts with the key
    /// path, which is kept apart from the transaction bytes.
    pub fn add_chunk(&mut self, chunk: &[u8]) -> Result<(), ChunkError> {
        let (path, data) = match self.path {
            Some(path) => (path, chunk),
            None => Bip32Path::split(chunk).ok_or(ChunkError::Underflow)?,
        };
        if data.len() > MAX_DATA_SIZE - self.used {
            return Err(ChunkError::Overflow);
        }
        self.buffer[self.used..self.used + data.len()].copy_from_slice(data);
        self.used += data.len();
        self.path = Some(path);
        Ok(())
    }

    pub fn path(&self) -> Option<&Bip32Path> {
        self.path.as_ref()
    }

    pub fn data(&self) -> &[u8] {
        &self.buffer[..self.used]
    }

    pub fn network_byte(&self) -> u8 {
        self.network_byte
    }

    pub fn set_network_byte(&mut self, network_byte: u8) {
        self.network_byte = network_byte;
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_none()
    }
}

impl Zeroize for SigningContext {
    fn zeroize(&mut self) {
        self.buffer.zeroize();
        self.used = 0;
        self.path = None;
        self.network_byte = 0;
    }
}

impl Drop for SigningContext {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Idle,
    /// Chunks are arriving, more are expected
    Accumulating,
    AwaitingSignApproval(SignFlow),
    AwaitingBlindApproval,
    AwaitingAddressApproval([u8; PUBLIC_KEY_SIZE]),
    AwaitingWalletIdApproval([u8; PUBLIC_KEY_SIZE]),
}

/// All state of the running app. One transaction at a time.
#[derive(Default)]
pub struct RunCtx {
    pub(crate) state: State,
    pub(crate) signing: SigningContext,
    pub(crate) display: DisplayContext,
}

impl RunCtx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn display(&self) -> &DisplayContext {
        &self.display
    }

    pub fn signing(&self) -> &SigningContext {
        &self.signing
    }

    /// Drops any transaction in progress and wipes its bytes.
    pub fn reset(&mut self) {
        self.signing.zeroize();
        self.display.clear();
        self.state = State::Idle;
    }
}
