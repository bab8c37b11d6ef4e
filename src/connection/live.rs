//! Live connection over a bound UDP listener

use std::net::SocketAddr;
use std::sync::Arc;

use futures::Stream;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::TuioConfig;
use crate::decoder::BundleDecoder;
use crate::driver::Driver;
use crate::sources::UdpSource;
use crate::types::{CursorFrame, UpdateRate};
use crate::Result;

/// Live connection to a TUIO source over UDP.
///
/// Binding succeeds even when no source is transmitting yet; frames start
/// flowing as soon as bundles arrive on the socket.
pub struct LiveConnection {
    /// Frame watch receiver
    frames: watch::Receiver<Option<Arc<CursorFrame>>>,

    /// Address the listener is bound to
    local_addr: SocketAddr,

    /// Configuration the connection was built with
    config: TuioConfig,

    /// Cancellation token for stopping the driver task
    cancel: CancellationToken,
}

impl LiveConnection {
    /// Bind a UDP listener and start decoding cursor traffic.
    ///
    /// Bind errors surface here immediately; everything after that is
    /// handled by the driver task.
    pub async fn bind(config: TuioConfig) -> Result<Self> {
        config.validate()?;

        let source = UdpSource::bind(config.bind_addr, config.profile.clone()).await?;
        let local_addr = source.local_addr()?;

        let decoder = BundleDecoder::new(config.max_cursors, config.orphan_set_policy);
        let channels = Driver::spawn(source, decoder);

        info!(addr = %local_addr, max_cursors = config.max_cursors, "live connection ready");

        Ok(Self { frames: channels.frames, local_addr, config, cancel: channels.cancel })
    }

    /// Subscribe to published cursor frames.
    pub fn subscribe(&self, rate: UpdateRate) -> impl Stream<Item = Arc<CursorFrame>> + 'static {
        super::subscribe_frames(self.frames.clone(), rate)
    }

    /// Latest published frame, if any bundle has completed yet.
    ///
    /// Repeated calls between publications return the identical frame; the
    /// read never mutates anything.
    pub fn current(&self) -> Option<Arc<CursorFrame>> {
        self.frames.borrow().clone()
    }

    /// Address the UDP listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Configuration this connection was built with.
    pub fn config(&self) -> &TuioConfig {
        &self.config
    }
}

impl Drop for LiveConnection {
    fn drop(&mut self) {
        debug!("dropping live connection");
        self.cancel.cancel();
    }
}
