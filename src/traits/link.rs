//! Wireless link abstraction.
//!
//! The transport (BLE GATT on the robot, a console on desktop) is an opaque
//! bidirectional byte-message channel. Outbound it exposes [`LinkTransport`];
//! inbound it delivers [`LinkEvent`]s to the main loop.
//!
//! ```text
//! transport context            main loop
//! ─────────────────            ─────────
//! peer connected     ──┐
//! bytes written      ──┼──►  LinkEvent  ──►  LinkSession  ──►  CommandRouter
//! peer disconnected  ──┘
//! ```
//!
//! One received blob is one command string; the core assumes nothing else
//! about framing.

extern crate alloc;
use alloc::vec::Vec;

/// Outbound half of the wireless transport.
///
/// # Implementation Notes
///
/// - `send` is fire-and-forget; the core drops failed sends and never
///   retries. Any retry lives in the transport.
/// - `start_advertising` makes the device discoverable again after a
///   disconnect.
pub trait LinkTransport {
    /// Error type for transport operations.
    type Error;

    /// Sends one message to the connected peer.
    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Restarts discoverability broadcasting.
    fn start_advertising(&mut self) -> Result<(), Self::Error>;
}

/// Signal delivered by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkEvent {
    /// A peer connected.
    PeerConnected,
    /// The peer disconnected.
    PeerDisconnected,
    /// The peer wrote one message.
    BytesReceived(Vec<u8>),
}

impl LinkEvent {
    /// Convenience constructor for text messages.
    ///
    /// ```
    /// use mecanum_drive::LinkEvent;
    ///
    /// assert_eq!(
    ///     LinkEvent::text("forward"),
    ///     LinkEvent::BytesReceived(b"forward".to_vec())
    /// );
    /// ```
    pub fn text(message: &str) -> Self {
        LinkEvent::BytesReceived(message.as_bytes().to_vec())
    }
}
