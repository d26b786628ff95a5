//! Transport link's seat in the pipeline

use crate::link::UdpLink;
use crate::pipeline::{DroneContext, DroneModule};
use std::sync::Arc;

/// Holds the UDP link's place in the tick order
///
/// Actual I/O runs on the link's own periodic threads; this module keeps
/// the transport visible to the pipeline (state transitions are logged at
/// tick granularity) and releases the channel at teardown.
pub struct LinkModule {
    link: Arc<UdpLink>,
    was_connected: bool,
}

impl LinkModule {
    pub fn new(link: Arc<UdpLink>) -> Self {
        Self {
            link,
            was_connected: false,
        }
    }
}

impl DroneModule for LinkModule {
    fn name(&self) -> &'static str {
        "link"
    }

    fn init(&mut self, _ctx: &DroneContext) {
        self.was_connected = self.link.is_connected();
    }

    fn tick(&mut self, _ctx: &DroneContext) {
        let connected = self.link.is_connected();
        if connected != self.was_connected {
            if connected {
                log::info!("link module: channel up");
            } else {
                log::warn!("link module: channel down");
            }
            self.was_connected = connected;
        }
    }

    fn shutdown(&mut self) {
        // Teardown must never leak the channel
        self.link.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinkConfig;
    use crate::snapshot::Snapshot;
    use std::net::UdpSocket;

    #[test]
    fn test_shutdown_releases_channel() {
        let vehicle = UdpSocket::bind(("127.0.0.1", 0)).unwrap();
        let port = vehicle.local_addr().unwrap().port();

        let link = Arc::new(UdpLink::new(
            LinkConfig {
                address: "127.0.0.1".to_string(),
                port,
                cycle_interval: 0.01,
            },
            Arc::new(Snapshot::new()),
            Arc::new(Snapshot::new()),
        ));
        link.connect().unwrap();

        let ctx = DroneContext::new();
        let mut module = LinkModule::new(Arc::clone(&link));
        module.init(&ctx);
        module.tick(&ctx);

        module.shutdown();
        assert!(!link.is_connected());
    }
}
