use crate::err::{AppliesTo, IoErrorExt};
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};

const LISTENER_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Accept the next connection. Never fails: errors are logged and accepting resumes.
pub async fn accept(listener: &TcpListener) -> TcpStream {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                if let Err(e) = stream.set_nodelay(true) {
                    log::debug!("Failed to set nodelay for {}: {}", addr, e);
                }
                log::trace!("Accepted connection from {}", addr);
                return stream;
            }
            Err(e) => match e.applies_to() {
                AppliesTo::Connection => log::debug!("Aborted connection dropped: {}", e),
                AppliesTo::Listener => {
                    // e.g. out of file descriptors, give in-flight connections a chance to finish
                    log::error!("Error accepting connection: {}", e);
                    tokio::time::sleep(LISTENER_ERROR_BACKOFF).await;
                }
            },
        }
    }
}
