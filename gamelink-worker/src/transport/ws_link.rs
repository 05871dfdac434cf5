use crate::config::WorkerConfig;
use crate::link::Link;
use anyhow::{Context, Result};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use gamelink_core::Packet;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, error, info, warn};

pub type CoordinatorSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Opens the worker's WebSocket connection to the coordinator.
pub async fn connect(config: &WorkerConfig) -> Result<CoordinatorSocket> {
    let url = config.coordinator_url();
    info!("Connecting to coordinator at {}", url);

    let (socket, _) = connect_async(url.as_str())
        .await
        .with_context(|| format!("Failed to connect to coordinator at {}", url))?;
    Ok(socket)
}

/// Runs `link` over an open coordinator socket.
///
/// Inbound text frames are decoded into packets and fed to the link in order;
/// `outbox_rx` is drained into the socket by a dedicated writer task. Returns
/// once the link has stopped and every queued packet was flushed.
pub async fn serve<S>(socket: WebSocketStream<S>, link: Link, outbox_rx: mpsc::Receiver<Packet>)
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (sender, receiver) = socket.split();
    let (inbound_tx, inbound_rx) = mpsc::channel(256);

    let send_task = tokio::spawn(drain_outbox(sender, outbox_rx));
    let recv_task = tokio::spawn(read_packets(receiver, inbound_tx));

    // Ends when the reader drops `inbound_tx` or on shutdown.
    link.run(inbound_rx).await;
    recv_task.abort();

    // The link owned the last outbox sender, so the writer finishes once flushed.
    if let Err(e) = send_task.await {
        error!("Outbox writer task failed: {}", e);
    }
    info!("Coordinator link disconnected");
}

async fn drain_outbox<S>(
    mut sender: SplitSink<WebSocketStream<S>, Message>,
    mut outbox_rx: mpsc::Receiver<Packet>,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    while let Some(packet) = outbox_rx.recv().await {
        let json = match serde_json::to_string(&packet) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize {}: {}", packet.t, e);
                continue;
            }
        };
        if let Err(e) = sender.send(Message::Text(json.into())).await {
            warn!("Failed to write {} to coordinator: {}", packet.t, e);
            break;
        }
    }
    if let Err(e) = sender.close().await {
        debug!("Coordinator socket close failed: {}", e);
    }
}

async fn read_packets<S>(mut receiver: SplitStream<WebSocketStream<S>>, inbound_tx: mpsc::Sender<Packet>)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    while let Some(msg) = receiver.next().await {
        let decoded = match msg {
            Ok(Message::Text(text)) => serde_json::from_str::<Packet>(text.as_str()),
            Ok(Message::Binary(data)) => serde_json::from_slice::<Packet>(&data),
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                warn!("Coordinator socket error: {}", e);
                break;
            }
        };

        match decoded {
            Ok(packet) => {
                if inbound_tx.send(packet).await.is_err() {
                    break;
                }
            }
            Err(e) => warn!("Invalid packet from coordinator: {}", e),
        }
    }
}
