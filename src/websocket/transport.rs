//! Realtime transport for live notification pushes
//!
//! One subscription at a time, scoped to a role namespace. The reader
//! runs as its own task and only ever forwards normalized notifications
//! through the sink channel; all state mutation stays on the panel task.

use crate::error::Result;
use crate::models::Notification;
use crate::websocket::messages::LiveFrame;
use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::AUTHORIZATION;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::debug;

/// Seam between the panel and the realtime server.
#[async_trait]
pub trait LiveTransport: Send + Sync {
    /// Open a connection scoped to `namespace` and forward incoming
    /// notifications into `sink` until disconnected.
    async fn subscribe(
        &self,
        namespace: &str,
        token: &str,
        sink: mpsc::UnboundedSender<Notification>,
    ) -> Result<LiveSubscription>;
}

/// Handle to one live connection.
///
/// Dropping the handle (or calling [`disconnect`](Self::disconnect))
/// aborts the reader task and with it the connection; the panel relies
/// on this for teardown on close and on role change.
pub struct LiveSubscription {
    namespace: String,
    reader: JoinHandle<()>,
}

impl LiveSubscription {
    pub fn new(namespace: impl Into<String>, reader: JoinHandle<()>) -> Self {
        Self {
            namespace: namespace.into(),
            reader,
        }
    }

    /// Namespace this subscription is scoped to
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn disconnect(self) {
        // Drop does the work
    }
}

impl Drop for LiveSubscription {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

/// Production transport over tokio-tungstenite
pub struct WsLiveTransport {
    base_url: String,
}

impl WsLiveTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LiveTransport for WsLiveTransport {
    async fn subscribe(
        &self,
        namespace: &str,
        token: &str,
        sink: mpsc::UnboundedSender<Notification>,
    ) -> Result<LiveSubscription> {
        let url = format!("{}{}", self.base_url, namespace);
        let mut request = url.into_client_request()?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(tungstenite::http::Error::from)
            .map_err(tungstenite::Error::from)?;
        request.headers_mut().insert(AUTHORIZATION, bearer);

        let (mut stream, _response) = connect_async(request).await?;
        debug!(namespace, "live feed connected");

        let task_namespace = namespace.to_string();
        let reader = tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        if let Some(raw) = LiveFrame::parse_notification(&text) {
                            if sink.send(raw.normalize()).is_err() {
                                // Panel gone, nothing to deliver to
                                break;
                            }
                        }
                    }
                    Ok(Message::Close(_)) => {
                        debug!(namespace = %task_namespace, "live feed closed by server");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        debug!(namespace = %task_namespace, "live feed read error: {e}");
                        break;
                    }
                }
            }
        });

        Ok(LiveSubscription::new(namespace, reader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_subscription_drop_aborts_reader() {
        let dropped = Arc::new(AtomicBool::new(false));
        let flag = DropFlag(dropped.clone());
        let reader = tokio::spawn(async move {
            let _flag = flag;
            futures_util::future::pending::<()>().await;
        });
        let sub = LiveSubscription::new("/warden", reader);
        assert_eq!(sub.namespace(), "/warden");

        drop(sub);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_disconnect_aborts_reader() {
        let dropped = Arc::new(AtomicBool::new(false));
        let flag = DropFlag(dropped.clone());
        let reader = tokio::spawn(async move {
            let _flag = flag;
            futures_util::future::pending::<()>().await;
        });
        LiveSubscription::new("/student", reader).disconnect();

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    #[ignore] // Requires a running realtime server: NOTIFY_WS_URL + SESSION_TOKEN
    async fn test_connect_against_live_server() {
        let base = std::env::var("NOTIFY_WS_URL").unwrap_or_else(|_| "ws://localhost:5000".into());
        let token = std::env::var("SESSION_TOKEN").unwrap_or_default();
        let (tx, _rx) = mpsc::unbounded_channel();
        let transport = WsLiveTransport::new(&base);
        let sub = transport.subscribe("/warden", &token, tx).await.unwrap();
        assert_eq!(sub.namespace(), "/warden");
    }
}
