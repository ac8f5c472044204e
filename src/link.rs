//! Wireless link session: connection state, gating, echo, re-advertise.
//!
//! ```text
//!                 PeerConnected
//!   Disconnected ───────────────► Connected
//!        ▲                            │
//!        └────────────────────────────┘
//!              PeerDisconnected
//!         (re-advertise after settle)
//! ```
//!
//! Inbound bytes reach the router only while connected. Every forwarded
//! message is echoed back as `Received: <message>`. After a disconnect the
//! session re-advertises exactly once, `settle_ms` later, unless a peer
//! reconnects first.
//!
//! The settle delay is a deadline checked by [`LinkSession::poll`], so the
//! main loop never blocks on it.

extern crate alloc;
use alloc::format;
use alloc::string::String;
use core::fmt::Debug;

use crate::config::LinkConfig;
use crate::router::{CommandRouter, Dispatch};
use crate::traits::{Actuator, LinkTransport, StatusSink};

/// Prefix of the reply sent for every forwarded message.
pub const ECHO_PREFIX: &str = "Received: ";

/// Link connection state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConnectionState {
    /// No peer; bytes are dropped.
    #[default]
    Disconnected,
    /// A peer is attached; bytes are dispatched and echoed.
    Connected,
}

/// Connection state machine over a [`LinkTransport`].
///
/// # Type Parameter
///
/// - `T`: The transport ([`LinkTransport`] trait)
///
/// # Example
///
/// ```rust
/// use mecanum_drive::{CommandRouter, DriveEngine, EncoderCounterBank, LinkSession};
/// use mecanum_drive::config::LinkConfig;
/// use mecanum_drive::hal::{MockActuator, MockSink, MockTransport};
///
/// let encoders = EncoderCounterBank::new();
/// let mut router =
///     CommandRouter::new(DriveEngine::new(MockActuator::new()), &encoders, MockSink::new());
/// let mut link = LinkSession::new(MockTransport::new(), LinkConfig::default());
///
/// link.on_peer_connected(&mut router);
/// link.on_bytes_received(b"forward", &mut router);
/// link.on_peer_disconnected(&mut router, 1_000);
///
/// link.poll(1_499);
/// assert_eq!(link.readvertise_count(), 0);
/// link.poll(1_500);
/// assert_eq!(link.readvertise_count(), 1);
///
/// assert_eq!(
///     link.transport().sent_text(),
///     vec!["Connected to Mecanum Robot", "Received: forward"]
/// );
/// ```
pub struct LinkSession<T: LinkTransport> {
    transport: T,
    config: LinkConfig,
    state: ConnectionState,
    disconnected_at: Option<u64>,
    readvertise_count: u32,
}

impl<T> LinkSession<T>
where
    T: LinkTransport,
    T::Error: Debug,
{
    /// Creates a session in [`ConnectionState::Disconnected`].
    pub fn new(transport: T, config: LinkConfig) -> Self {
        Self {
            transport,
            config,
            state: ConnectionState::Disconnected,
            disconnected_at: None,
            readvertise_count: 0,
        }
    }

    /// Starts the first advertisement at boot.
    ///
    /// Not counted in [`readvertise_count`](Self::readvertise_count).
    pub fn start(&mut self) -> Result<(), T::Error> {
        self.transport.start_advertising()?;
        tracing::info!(name = self.config.device_name.as_str(), "waiting for a peer");
        Ok(())
    }

    /// Handles a peer connecting.
    ///
    /// Sends the greeting and refreshes the status display. The wheels are
    /// not touched. Cancels a pending re-advertisement.
    pub fn on_peer_connected<A, S>(&mut self, router: &mut CommandRouter<'_, A, S>)
    where
        A: Actuator,
        A::Error: Debug,
        S: StatusSink,
    {
        if self.state == ConnectionState::Connected {
            tracing::debug!("duplicate connect ignored");
            return;
        }

        self.state = ConnectionState::Connected;
        if self.disconnected_at.take().is_some() {
            tracing::debug!("pending re-advertise cancelled by reconnect");
        }
        tracing::info!("peer connected");

        let greeting = self.config.greeting.clone();
        self.send(greeting.as_bytes());
        router.sink_mut().connection_changed(true);
        router.refresh_status();
    }

    /// Handles the peer disconnecting.
    ///
    /// Schedules one re-advertisement `settle_ms` after `now_ms`. A
    /// disconnect while already disconnected is ignored.
    pub fn on_peer_disconnected<A, S>(&mut self, router: &mut CommandRouter<'_, A, S>, now_ms: u64)
    where
        A: Actuator,
        A::Error: Debug,
        S: StatusSink,
    {
        if self.state == ConnectionState::Disconnected {
            tracing::debug!("duplicate disconnect ignored");
            return;
        }

        self.state = ConnectionState::Disconnected;
        self.disconnected_at = Some(now_ms);
        tracing::info!(settle_ms = self.config.settle_ms, "peer disconnected");

        router.sink_mut().connection_changed(false);
        if self.config.stop_on_disconnect {
            router.stop();
        }

        self.poll(now_ms);
    }

    /// Handles one inbound message.
    ///
    /// Returns what the router did, or `None` if the message was dropped
    /// (not connected, or empty).
    pub fn on_bytes_received<A, S>(
        &mut self,
        bytes: &[u8],
        router: &mut CommandRouter<'_, A, S>,
    ) -> Option<Dispatch>
    where
        A: Actuator,
        A::Error: Debug,
        S: StatusSink,
    {
        if self.state != ConnectionState::Connected {
            tracing::debug!(len = bytes.len(), "bytes dropped while disconnected");
            return None;
        }
        if bytes.is_empty() {
            return None;
        }

        let message = String::from_utf8_lossy(bytes);
        tracing::info!(text = %message, "link received");

        let dispatch = router.dispatch(&message);
        let echo = format!("{ECHO_PREFIX}{message}");
        self.send(echo.as_bytes());
        Some(dispatch)
    }

    /// Fires the pending re-advertisement once the settle delay has elapsed.
    ///
    /// Returns true if advertising was restarted by this call.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let Some(since) = self.disconnected_at else {
            return false;
        };
        if now_ms.wrapping_sub(since) < u64::from(self.config.settle_ms) {
            return false;
        }

        self.disconnected_at = None;
        self.readvertise_count = self.readvertise_count.wrapping_add(1);
        match self.transport.start_advertising() {
            Ok(()) => tracing::info!("advertising restarted"),
            Err(err) => tracing::warn!(?err, "re-advertise failed"),
        }
        true
    }

    /// Sends one message to the peer. No-op while disconnected; failures
    /// are logged and dropped.
    pub fn send(&mut self, bytes: &[u8]) {
        if self.state != ConnectionState::Connected {
            tracing::debug!("send skipped, not connected");
            return;
        }
        if let Err(err) = self.transport.send(bytes) {
            tracing::warn!(?err, "link send failed");
        }
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// True while a peer is attached.
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// True while a re-advertisement is waiting for its settle delay.
    pub fn readvertise_pending(&self) -> bool {
        self.disconnected_at.is_some()
    }

    /// Re-advertisements issued since creation.
    pub fn readvertise_count(&self) -> u32 {
        self.readvertise_count
    }

    /// Link configuration.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Exclusive access to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
