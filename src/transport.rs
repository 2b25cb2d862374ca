//! The IPC transport seam.
//!
//! The actual inter-core channel (shared-memory ring, hardware mailbox,
//! socket in a simulator) is owned by the platform; this crate only consumes
//! it through [`IpcTransport`]. Implement the trait once per platform and
//! hand the implementation to [`EndpointSession::new`](crate::EndpointSession::new).

use std::sync::Arc;
use thiserror::Error;

/// Errors reported by an [`IpcTransport`] implementation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The shared instance was already opened by an earlier caller.
    ///
    /// Sessions treat this as success: several drivers can share one
    /// instance, and only the first open performs real work.
    #[error("Transport instance already open")]
    AlreadyOpen,
    /// The transport has no buffer space for the frame right now.
    #[error("Transport busy, no buffer space for the frame")]
    Busy,
    /// Any other backend failure, carried as an errno-style code.
    #[error("Transport backend error (code {code})")]
    Backend {
        /// Raw error code from the platform layer.
        code: i32,
    },
}

/// Opaque identifier a transport assigns to a registered endpoint.
///
/// Only meaningful to the transport that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointId(u32);

impl EndpointId {
    /// Wraps a raw endpoint slot index.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw slot index.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Callbacks a registered endpoint receives from the transport.
///
/// The transport may invoke these from any execution context (another
/// thread, an interrupt bottom half), concurrently with API calls on the
/// session. Implementations must not block.
pub trait EndpointHooks: Send + Sync {
    /// The peer acknowledged the endpoint registration; sends may begin.
    fn bound(&self);

    /// An inbound payload arrived from the peer.
    ///
    /// May be called with any payload shape or size, at any point in the
    /// endpoint lifecycle, including before [`bound`](Self::bound).
    fn received(&self, payload: &[u8]);
}

/// Asynchronous message transport between the two cores.
///
/// All methods take `&self` and the trait requires `Send + Sync`, so one
/// transport instance can back every endpoint and be called from any thread.
/// Message boundaries are preserved: each [`send`](Self::send) delivers one
/// frame, never a byte stream the peer has to re-frame.
pub trait IpcTransport: Send + Sync {
    /// Opens the shared transport instance.
    ///
    /// Returns [`TransportError::AlreadyOpen`] if a previous caller already
    /// opened it; sessions treat that as success.
    fn open_instance(&self) -> Result<(), TransportError>;

    /// Registers an endpoint and its callbacks on the open instance.
    ///
    /// The returned id addresses this endpoint in [`send`](Self::send). The
    /// transport starts the binding handshake with the peer; `hooks.bound()`
    /// fires once the peer acknowledges.
    fn register_endpoint(
        &self,
        hooks: Arc<dyn EndpointHooks>,
    ) -> Result<EndpointId, TransportError>;

    /// Sends one frame on a registered endpoint, fire-and-forget.
    ///
    /// Returns the number of bytes the transport accepted. Acceptance means
    /// the frame was queued locally, not that the peer received or processed
    /// it.
    fn send(&self, endpoint: EndpointId, frame: &[u8]) -> Result<usize, TransportError>;
}

/// A transport that binds immediately and discards every frame.
///
/// Stand-in for doc examples, demos and tests that exercise the command
/// channel without a peer core. `open_instance` always succeeds, endpoint
/// registration fires `bound` synchronously, and `send` accepts any frame.
#[derive(Debug, Default)]
pub struct NullTransport;

impl NullTransport {
    /// Creates a null transport.
    pub fn new() -> Self {
        Self
    }
}

impl IpcTransport for NullTransport {
    fn open_instance(&self) -> Result<(), TransportError> {
        Ok(())
    }

    fn register_endpoint(
        &self,
        hooks: Arc<dyn EndpointHooks>,
    ) -> Result<EndpointId, TransportError> {
        hooks.bound();
        Ok(EndpointId::new(0))
    }

    fn send(&self, _endpoint: EndpointId, frame: &[u8]) -> Result<usize, TransportError> {
        Ok(frame.len())
    }
}
