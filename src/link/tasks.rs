//! Periodic send/receive threads for the UDP link
//!
//! Two independently scheduled loops per open channel:
//! - SEND thread: transmits the current control snapshot every cycle
//!   interval, fire and forget
//! - RECEIVE thread: polls the socket without blocking, decoding exact-size
//!   telemetry frames into the shared snapshot
//!
//! Both loops watch a shared running flag and exit deterministically when
//! it drops; the link joins them before closing the socket. Nothing either
//! loop hits at runtime is fatal: send errors and malformed datagrams are
//! logged and the next cycle proceeds.

use crate::protocol::{ControlCommand, TelemetryFrame};
use crate::snapshot::Snapshot;
use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Receive poll interval when the socket is empty
const RECEIVE_POLL: Duration = Duration::from_millis(2);

/// Granularity of the send loop's cancellable sleep
const SLEEP_SLICE: Duration = Duration::from_millis(20);

/// Largest datagram worth reading; real frames are 34 bytes
const RECV_BUFFER_SIZE: usize = 64;

/// Sleep for `duration` in slices, returning early once `running` drops
fn sleep_while_running(running: &AtomicBool, duration: Duration) {
    let deadline = Instant::now() + duration;
    while running.load(Ordering::Relaxed) {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::sleep((deadline - now).min(SLEEP_SLICE));
    }
}

/// Spawn the SEND thread
///
/// Each cycle encodes whatever control value is current at send time; no
/// cross-cycle atomicity with the pipeline is promised, only that the value
/// read is never torn.
pub(super) fn spawn_send_thread(
    socket: Arc<UdpSocket>,
    peer: SocketAddr,
    interval: Duration,
    control: Arc<Snapshot<ControlCommand>>,
    running: Arc<AtomicBool>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("link-send".to_string())
        .spawn(move || {
            log::debug!("link: send thread started ({:?} cycle)", interval);

            while running.load(Ordering::Relaxed) {
                let cycle_start = Instant::now();

                let packet = control.load().encode();
                if let Err(e) = socket.send_to(&packet, peer) {
                    // Transient network errors are not fatal to the link
                    log::warn!("link: send error to {}: {}", peer, e);
                }

                let elapsed = cycle_start.elapsed();
                if elapsed < interval {
                    sleep_while_running(&running, interval - elapsed);
                } else {
                    log::warn!(
                        "link: send cycle overrun: {:?} (target {:?})",
                        elapsed,
                        interval
                    );
                }
            }

            log::debug!("link: send thread stopped");
        })
}

/// Spawn the RECEIVE thread
///
/// The socket is non-blocking; an empty socket yields briefly instead of
/// stalling. A datagram is accepted as telemetry iff its length equals the
/// exact frame size, otherwise it is discarded and the snapshot stays
/// untouched.
pub(super) fn spawn_receive_thread(
    socket: Arc<UdpSocket>,
    telemetry: Arc<Snapshot<TelemetryFrame>>,
    running: Arc<AtomicBool>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("link-recv".to_string())
        .spawn(move || {
            log::debug!("link: receive thread started");
            let mut buf = [0u8; RECV_BUFFER_SIZE];

            while running.load(Ordering::Relaxed) {
                match socket.recv_from(&mut buf) {
                    Ok((n, from)) => match TelemetryFrame::decode(&buf[..n]) {
                        Ok(frame) => {
                            telemetry.store(frame);
                            log::trace!("link: telemetry frame from {}", from);
                        }
                        Err(e) => {
                            log::debug!("link: dropping {}-byte datagram from {}: {}", n, from, e);
                        }
                    },
                    Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(RECEIVE_POLL);
                    }
                    Err(e) => {
                        log::warn!("link: receive error: {}", e);
                        thread::sleep(RECEIVE_POLL);
                    }
                }
            }

            log::debug!("link: receive thread stopped");
        })
}
