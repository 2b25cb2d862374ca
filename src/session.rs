//! Endpoint lifecycle on the shared IPC transport instance.

use std::fmt;
use std::sync::{Arc, Condvar, Mutex, PoisonError};

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::transport::{EndpointHooks, EndpointId, IpcTransport, TransportError};

/// One-shot binding signal shared with the transport callbacks.
///
/// Set exactly once when the peer acknowledges the registration; never
/// cleared, because the protocol has no unbind.
#[derive(Debug, Default)]
struct EndpointState {
    bound: Mutex<bool>,
    bound_cv: Condvar,
}

impl EndpointState {
    fn is_bound(&self) -> bool {
        *self.bound.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait_bound(&self) {
        let mut bound = self.bound.lock().unwrap_or_else(PoisonError::into_inner);
        while !*bound {
            bound = self
                .bound_cv
                .wait(bound)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

impl EndpointHooks for EndpointState {
    fn bound(&self) {
        debug!("Peer confirmed endpoint binding");
        let mut bound = self.bound.lock().unwrap_or_else(PoisonError::into_inner);
        *bound = true;
        self.bound_cv.notify_all();
    }

    fn received(&self, payload: &[u8]) {
        // Placeholder sink: the peer sends nothing we act on today. Inbound
        // payloads of any shape are accepted and dropped so future
        // acknowledgement or event traffic cannot break the channel.
        trace!("Discarding {} inbound bytes from peer", payload.len());
    }
}

/// A registered, bindable communication endpoint on the shared transport.
///
/// Create one per channel during driver init, [`open`](Self::open) it once,
/// then share it (via `Arc`) between every [`PortDevice`](crate::PortDevice)
/// that multiplexes commands over it. All methods take `&self` and the
/// session is safe to use from multiple threads.
pub struct EndpointSession {
    transport: Arc<dyn IpcTransport>,
    state: Arc<EndpointState>,
    endpoint: Mutex<Option<EndpointId>>,
}

impl EndpointSession {
    /// Creates an unopened session on the platform-owned transport.
    ///
    /// No transport calls happen here; registration and the binding
    /// handshake run in [`open`](Self::open).
    pub fn new(transport: Arc<dyn IpcTransport>) -> Self {
        Self {
            transport,
            state: Arc::new(EndpointState::default()),
            endpoint: Mutex::new(None),
        }
    }

    /// Opens the shared instance, registers this endpoint and blocks until
    /// the peer confirms the binding.
    ///
    /// An "already open" report from the transport counts as success:
    /// several drivers share one instance and only the first open performs
    /// real work. Any other open or registration failure aborts init and
    /// propagates unchanged.
    ///
    /// **This call has no timeout.** The protocol models no failure path for
    /// the handshake, so if the peer never acknowledges, `open` blocks
    /// forever. A supervisor that needs visibility can poll
    /// [`is_bound`](Self::is_bound) from another thread.
    ///
    /// Calling `open` again after a successful return reports success
    /// without registering a second endpoint.
    pub fn open(&self) -> Result<()> {
        {
            let mut endpoint = self.endpoint.lock().unwrap_or_else(PoisonError::into_inner);
            if endpoint.is_none() {
                match self.transport.open_instance() {
                    Ok(()) => debug!("Opened IPC transport instance"),
                    Err(TransportError::AlreadyOpen) => {
                        debug!("IPC transport instance already open, reusing it");
                    }
                    Err(e) => return Err(e.into()),
                }
                let hooks: Arc<dyn EndpointHooks> = self.state.clone();
                *endpoint = Some(self.transport.register_endpoint(hooks)?);
                debug!("Registered endpoint, waiting for peer bind");
            }
        }
        // Lock released above: the bound callback may need a transport
        // context that a blocked open must not starve.
        self.state.wait_bound();
        Ok(())
    }

    /// True once the peer's binding confirmation has been observed.
    pub fn is_bound(&self) -> bool {
        self.state.is_bound()
    }

    /// Sends one frame on the bound endpoint, fire-and-forget.
    ///
    /// Returns the byte count the transport accepted, which means the frame
    /// was queued locally; there is no peer acknowledgement. Fails with
    /// [`Error::NotBound`] until [`open`](Self::open) has completed.
    pub fn send(&self, frame: &[u8]) -> Result<usize> {
        let endpoint = self
            .endpoint
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .ok_or(Error::NotBound)?;
        if !self.state.is_bound() {
            return Err(Error::NotBound);
        }
        trace!("Sending {} bytes on endpoint {}", frame.len(), endpoint.raw());
        Ok(self.transport.send(endpoint, frame)?)
    }
}

impl fmt::Debug for EndpointSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointSession")
            .field(
                "endpoint",
                &*self.endpoint.lock().unwrap_or_else(PoisonError::into_inner),
            )
            .field("bound", &self.is_bound())
            .finish_non_exhaustive()
    }
}
