//! Lifecycle tests for the endpoint session.
//!
//! Covers the binding handshake (blocking open, shared-instance tolerance,
//! error propagation), the send gate, and the inbound no-op sink.

mod common;

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use common::RecordingTransport;
use remote_gpio::transport::TransportError;
use remote_gpio::{EndpointSession, Error};

fn session_on(transport: &Arc<RecordingTransport>) -> Arc<EndpointSession> {
    Arc::new(EndpointSession::new(transport.clone() as Arc<_>))
}

#[test]
fn open_blocks_until_the_bound_signal_arrives() {
    let transport = RecordingTransport::unbound();
    let session = session_on(&transport);

    let (done_tx, done_rx) = mpsc::channel();
    let opener = thread::spawn({
        let session = Arc::clone(&session);
        move || {
            let result = session.open();
            done_tx.send(()).unwrap();
            result
        }
    });

    // Wait for the opener to get as far as registering its endpoint.
    while !transport.has_endpoint() {
        thread::sleep(Duration::from_millis(1));
    }

    // The endpoint is registered but the peer has not answered: open must
    // still be blocked.
    assert!(
        done_rx.recv_timeout(Duration::from_millis(100)).is_err(),
        "open returned before the bound signal"
    );
    assert!(!session.is_bound());

    // The peer answers; open must now complete.
    transport.bind();
    done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("open did not return after the bound signal");
    opener.join().unwrap().unwrap();
    assert!(session.is_bound());
}

#[test]
fn open_treats_already_open_instance_as_success() {
    let transport = RecordingTransport::new();
    transport.fail_open(TransportError::AlreadyOpen);
    let session = session_on(&transport);

    session
        .open()
        .expect("a shared instance opened by an earlier driver is not an error");
    assert!(session.is_bound());
    assert_eq!(transport.register_calls(), 1);
}

#[test]
fn open_propagates_real_open_failures() {
    let transport = RecordingTransport::new();
    transport.fail_open(TransportError::Backend { code: -19 });
    let session = session_on(&transport);

    let err = session.open().unwrap_err();
    assert!(matches!(
        err,
        Error::Transport(TransportError::Backend { code: -19 })
    ));
    // Registration must not be attempted after a failed open.
    assert_eq!(transport.register_calls(), 0);
}

#[test]
fn open_propagates_register_failures() {
    let transport = RecordingTransport::new();
    transport.fail_register(TransportError::Busy);
    let session = session_on(&transport);

    let err = session.open().unwrap_err();
    assert!(matches!(err, Error::Transport(TransportError::Busy)));
    assert!(!session.is_bound());
}

#[test]
fn reopen_after_success_is_a_no_op() {
    let transport = RecordingTransport::new();
    let session = session_on(&transport);

    session.open().unwrap();
    session.open().unwrap();
    session.open().unwrap();

    // The instance is opened and the endpoint registered exactly once.
    assert_eq!(transport.open_calls(), 1);
    assert_eq!(transport.register_calls(), 1);
}

#[test]
fn send_before_open_fails_with_not_bound() {
    let transport = RecordingTransport::new();
    let session = session_on(&transport);

    let err = session.send(&[1, 2, 3]).unwrap_err();
    assert!(matches!(err, Error::NotBound));
    assert_eq!(transport.send_attempts(), 0, "nothing may reach the transport");
}

#[test]
fn send_returns_the_accepted_byte_count() {
    let transport = RecordingTransport::new();
    let session = session_on(&transport);
    session.open().unwrap();

    let accepted = session.send(&[0; 10]).unwrap();
    assert_eq!(accepted, 10);
    assert_eq!(transport.frames(), vec![vec![0; 10]]);
}

#[test]
fn send_propagates_transport_errors_verbatim() {
    let transport = RecordingTransport::new();
    let session = session_on(&transport);
    session.open().unwrap();

    transport.fail_send(1, TransportError::Backend { code: -105 });
    let err = session.send(&[7; 10]).unwrap_err();
    assert!(matches!(
        err,
        Error::Transport(TransportError::Backend { code: -105 })
    ));
}

#[test]
fn inbound_payloads_are_safe_before_the_bind() {
    let transport = RecordingTransport::unbound();
    let session = session_on(&transport);

    let opener = thread::spawn({
        let session = Arc::clone(&session);
        move || session.open()
    });
    while !transport.has_endpoint() {
        thread::sleep(Duration::from_millis(1));
    }

    // The peer may talk before it acknowledges the binding; the sink must
    // absorb anything without panicking or affecting the handshake.
    transport.deliver(&[]);
    transport.deliver(&[0xFF]);
    transport.deliver(&[0u8; 512]);
    assert!(!session.is_bound());

    transport.bind();
    opener.join().unwrap().unwrap();
}

#[test]
fn inbound_payloads_are_discarded_after_the_bind() {
    let transport = RecordingTransport::new();
    let session = session_on(&transport);
    session.open().unwrap();

    // Arbitrary shapes, including something that parses as a packet and
    // something that does not; none of it is surfaced or answered.
    transport.deliver(&[2, 1, 0, 0, 0, 0, 0, 0, 0, 0]);
    transport.deliver(b"unexpected");
    assert!(session.is_bound());
    assert_eq!(transport.send_attempts(), 0);
}
