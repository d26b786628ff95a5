//! UDP vehicle link
//!
//! [`UdpLink`] owns at most one datagram channel to the vehicle plus the
//! two periodic threads that serve it: a send loop pushing the current
//! control snapshot out every cycle interval, and a receive loop decoding
//! telemetry datagrams into the telemetry snapshot. The wire is
//! fire-and-forget; there is no acknowledgment, retry or handshake.
//!
//! `connect` is reentrant-safe: it always tears the previous session down
//! before opening a new socket, so two live channels can never coexist.
//! Configuration edits apply on the next connect only.

mod tasks;

use crate::config::LinkConfig;
use crate::error::{Error, Result};
use crate::protocol::{ControlCommand, TelemetryFrame};
use crate::snapshot::Snapshot;
use parking_lot::Mutex;
use std::net::{IpAddr, SocketAddr, UdpSocket};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

/// One open channel: socket plus its two periodic threads
struct LinkSession {
    socket: Arc<UdpSocket>,
    running: Arc<AtomicBool>,
    send_handle: Option<JoinHandle<()>>,
    recv_handle: Option<JoinHandle<()>>,
}

/// Connection lifecycle guard around one UDP channel
pub struct UdpLink {
    config: Mutex<LinkConfig>,
    control: Arc<Snapshot<ControlCommand>>,
    telemetry: Arc<Snapshot<TelemetryFrame>>,
    session: Mutex<Option<LinkSession>>,
}

impl UdpLink {
    /// Create a disconnected link around the shared snapshots
    pub fn new(
        config: LinkConfig,
        control: Arc<Snapshot<ControlCommand>>,
        telemetry: Arc<Snapshot<TelemetryFrame>>,
    ) -> Self {
        Self {
            config: Mutex::new(config),
            control,
            telemetry,
            session: Mutex::new(None),
        }
    }

    /// Update the peer address; takes effect on next connect
    pub fn set_address(&self, address: impl Into<String>) {
        self.config.lock().address = address.into();
    }

    /// Update the peer port; takes effect on next connect
    pub fn set_port(&self, port: u16) {
        self.config.lock().port = port;
    }

    /// Update the send cycle interval; takes effect on next connect
    pub fn set_cycle_interval(&self, seconds: f64) {
        self.config.lock().cycle_interval = seconds;
    }

    /// Current control snapshot (what the send thread transmits)
    pub fn current_control(&self) -> ControlCommand {
        self.control.load()
    }

    /// Latest decoded telemetry frame
    pub fn latest_telemetry(&self) -> TelemetryFrame {
        self.telemetry.load()
    }

    /// True while a channel is open
    pub fn is_connected(&self) -> bool {
        self.session.lock().is_some()
    }

    /// Local address of the open socket, if connected
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.session
            .lock()
            .as_ref()
            .and_then(|s| s.socket.local_addr().ok())
    }

    /// Open the channel and start the send/receive threads
    ///
    /// Always closes any previous channel first. A peer address that does
    /// not parse fails the connect and leaves the link disconnected; the
    /// pipeline keeps running without it. A non-positive cycle interval is
    /// coerced to the documented default with a warning.
    pub fn connect(&self) -> Result<()> {
        self.disconnect();

        let config = self.config.lock().clone();

        let ip: IpAddr = config
            .address
            .parse()
            .map_err(|_| Error::InvalidAddress(config.address.clone()))?;
        let peer = SocketAddr::new(ip, config.port);
        let interval = config.validated_cycle_interval();

        let socket = UdpSocket::bind(("0.0.0.0", 0))?;
        socket.set_nonblocking(true)?;
        let socket = Arc::new(socket);

        let running = Arc::new(AtomicBool::new(true));

        let send_handle = tasks::spawn_send_thread(
            Arc::clone(&socket),
            peer,
            interval,
            Arc::clone(&self.control),
            Arc::clone(&running),
        )?;
        let recv_handle = tasks::spawn_receive_thread(
            Arc::clone(&socket),
            Arc::clone(&self.telemetry),
            Arc::clone(&running),
        )?;

        log::info!(
            "link: connected to {} ({:?} send cycle)",
            peer,
            interval
        );

        *self.session.lock() = Some(LinkSession {
            socket,
            running,
            send_handle: Some(send_handle),
            recv_handle: Some(recv_handle),
        });

        Ok(())
    }

    /// Stop both threads and close the channel
    ///
    /// Both threads are joined before the socket is dropped, so nothing
    /// can touch a closed channel. A no-op when already disconnected.
    pub fn disconnect(&self) {
        let session = self.session.lock().take();
        let Some(mut session) = session else {
            return;
        };

        session.running.store(false, Ordering::Relaxed);
        if let Some(handle) = session.send_handle.take() {
            let _ = handle.join();
        }
        if let Some(handle) = session.recv_handle.take() {
            let _ = handle.join();
        }
        log::info!("link: disconnected");
    }
}

impl Drop for UdpLink {
    fn drop(&mut self) {
        self.disconnect();
    }
}
