//! Shared test support: an in-memory transport double.
//!
//! Records every frame in send order, lets tests drive the binding handshake
//! by hand and inject failures into specific calls, so the command channel
//! can be exercised end to end without a peer core.

#![allow(dead_code)] // Not every test binary uses every helper.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use remote_gpio::transport::{EndpointHooks, EndpointId, IpcTransport, TransportError};
use remote_gpio::CommandPacket;

#[derive(Default)]
struct Inner {
    open_calls: usize,
    register_calls: usize,
    send_attempts: usize,
    sends: Vec<(EndpointId, Vec<u8>)>,
    hooks: Option<Arc<dyn EndpointHooks>>,
    open_error: Option<TransportError>,
    register_error: Option<TransportError>,
    send_failures: HashMap<usize, TransportError>,
    bind_on_register: bool,
}

pub struct RecordingTransport {
    inner: Mutex<Inner>,
}

impl RecordingTransport {
    /// A transport that completes the binding handshake synchronously during
    /// registration; the common case.
    pub fn new() -> Arc<Self> {
        Self::with_bind_on_register(true)
    }

    /// A transport that leaves the handshake to the test; complete it with
    /// [`bind`](Self::bind).
    pub fn unbound() -> Arc<Self> {
        Self::with_bind_on_register(false)
    }

    fn with_bind_on_register(bind_on_register: bool) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(Inner {
                bind_on_register,
                ..Inner::default()
            }),
        })
    }

    /// Makes every `open_instance` call report `err`.
    pub fn fail_open(&self, err: TransportError) {
        self.inner.lock().unwrap().open_error = Some(err);
    }

    /// Makes every `register_endpoint` call report `err`.
    pub fn fail_register(&self, err: TransportError) {
        self.inner.lock().unwrap().register_error = Some(err);
    }

    /// Fails the `attempt`-th send (1-based); other sends succeed.
    pub fn fail_send(&self, attempt: usize, err: TransportError) {
        self.inner.lock().unwrap().send_failures.insert(attempt, err);
    }

    /// Completes the binding handshake, as the peer would.
    pub fn bind(&self) {
        let hooks = self.inner.lock().unwrap().hooks.clone();
        hooks.expect("no endpoint registered").bound();
    }

    /// Delivers an inbound payload through the endpoint's receive callback.
    pub fn deliver(&self, payload: &[u8]) {
        let hooks = self.inner.lock().unwrap().hooks.clone();
        hooks.expect("no endpoint registered").received(payload);
    }

    pub fn has_endpoint(&self) -> bool {
        self.inner.lock().unwrap().hooks.is_some()
    }

    pub fn open_calls(&self) -> usize {
        self.inner.lock().unwrap().open_calls
    }

    pub fn register_calls(&self) -> usize {
        self.inner.lock().unwrap().register_calls
    }

    /// Sends that reached the transport, including failed ones.
    pub fn send_attempts(&self) -> usize {
        self.inner.lock().unwrap().send_attempts
    }

    /// Successfully accepted frames, in send order.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.inner
            .lock()
            .unwrap()
            .sends
            .iter()
            .map(|(_, frame)| frame.clone())
            .collect()
    }

    /// Endpoint ids the accepted frames were sent on, in send order.
    pub fn endpoints_used(&self) -> Vec<EndpointId> {
        self.inner
            .lock()
            .unwrap()
            .sends
            .iter()
            .map(|(endpoint, _)| *endpoint)
            .collect()
    }

    /// Accepted frames decoded as command packets, in send order.
    pub fn packets(&self) -> Vec<CommandPacket> {
        self.frames()
            .iter()
            .map(|frame| CommandPacket::from_wire(frame).expect("sent frame must decode"))
            .collect()
    }
}

impl IpcTransport for RecordingTransport {
    fn open_instance(&self) -> Result<(), TransportError> {
        let mut inner = self.inner.lock().unwrap();
        inner.open_calls += 1;
        match inner.open_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn register_endpoint(
        &self,
        hooks: Arc<dyn EndpointHooks>,
    ) -> Result<EndpointId, TransportError> {
        let fire_bound = {
            let mut inner = self.inner.lock().unwrap();
            inner.register_calls += 1;
            if let Some(err) = inner.register_error {
                return Err(err);
            }
            inner.hooks = Some(hooks.clone());
            inner.bind_on_register
        };
        // Fired outside the lock, as a real transport would from its own
        // execution context.
        if fire_bound {
            hooks.bound();
        }
        Ok(EndpointId::new(7))
    }

    fn send(&self, endpoint: EndpointId, frame: &[u8]) -> Result<usize, TransportError> {
        let mut inner = self.inner.lock().unwrap();
        inner.send_attempts += 1;
        let attempt = inner.send_attempts;
        if let Some(err) = inner.send_failures.remove(&attempt) {
            return Err(err);
        }
        inner.sends.push((endpoint, frame.to_vec()));
        Ok(frame.len())
    }
}
