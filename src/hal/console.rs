//! Line-oriented console link for desktop runs and serial bring-up.
//!
//! Each stdin line becomes one [`LinkEvent`]. Two lines are control
//! directives instead of messages:
//!
//! | Line | Event |
//! |------|-------|
//! | `/connect` | [`LinkEvent::PeerConnected`] |
//! | `/disconnect` | [`LinkEvent::PeerDisconnected`] |
//! | anything else | [`LinkEvent::BytesReceived`] |
//!
//! End of input is reported as a disconnect. Outbound messages are written
//! to stdout, one per line.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use crate::traits::{LinkEvent, LinkTransport};

/// Directive that simulates a peer connecting.
pub const CONNECT_DIRECTIVE: &str = "/connect";

/// Directive that simulates the peer leaving.
pub const DISCONNECT_DIRECTIVE: &str = "/disconnect";

/// Maps one input line to its event.
///
/// ```
/// use mecanum_drive::hal::console::line_event;
/// use mecanum_drive::LinkEvent;
///
/// assert_eq!(line_event("/connect"), LinkEvent::PeerConnected);
/// assert_eq!(line_event("speed:40"), LinkEvent::text("speed:40"));
/// ```
pub fn line_event(line: &str) -> LinkEvent {
    match line.trim_end_matches(['\r', '\n']) {
        CONNECT_DIRECTIVE => LinkEvent::PeerConnected,
        DISCONNECT_DIRECTIVE => LinkEvent::PeerDisconnected,
        text => LinkEvent::text(text),
    }
}

/// Outbound half of the console link.
pub struct ConsoleTransport<W: Write> {
    out: W,
    name: String,
}

impl ConsoleTransport<io::Stdout> {
    /// Writes to stdout, advertising as `name`.
    pub fn stdout(name: &str) -> Self {
        Self::new(io::stdout(), name)
    }
}

impl<W: Write> ConsoleTransport<W> {
    /// Writes to any sink.
    pub fn new(out: W, name: &str) -> Self {
        Self {
            out,
            name: name.to_owned(),
        }
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> LinkTransport for ConsoleTransport<W> {
    type Error = io::Error;

    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.out.write_all(bytes)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }

    fn start_advertising(&mut self) -> io::Result<()> {
        tracing::info!(name = %self.name, "advertising, type {CONNECT_DIRECTIVE} to attach");
        Ok(())
    }
}

/// Reads `input` line by line on a new thread, forwarding events to `tx`.
///
/// The thread exits at end of input (after sending a disconnect) or when the
/// receiver is dropped.
pub fn spawn_reader<R>(input: R, tx: Sender<LinkEvent>) -> io::Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    thread::Builder::new()
        .name("console-link".into())
        .spawn(move || {
            for line in input.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        tracing::warn!(%err, "console read failed");
                        break;
                    }
                };
                if tx.send(line_event(&line)).is_err() {
                    return;
                }
            }
            let _ = tx.send(LinkEvent::PeerDisconnected);
        })
}

/// [`spawn_reader`] over the process's stdin.
pub fn spawn_stdin_reader(tx: Sender<LinkEvent>) -> io::Result<JoinHandle<()>> {
    spawn_reader(io::BufReader::new(io::stdin()), tx)
}
