//! Notification panel state and lifecycle
//!
//! One task owns all panel state. Opening the panel fetches the current
//! list and attaches the role-scoped live feed; closing (or changing
//! role) tears the feed down. Every mutation happens on the panel task,
//! so fetch completions and live arrivals simply interleave
//! last-write-wins, with no locking.

pub mod render;

use crate::badge::UnreadBadge;
use crate::models::{Notification, RawNotification, Role};
use crate::services::NotificationsApi;
use crate::session::TokenSource;
use crate::websocket::{LiveSubscription, LiveTransport};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::debug;

/// Commands accepted by the panel event loop
pub enum PanelCommand {
    Open,
    Close,
    SetRole(Role),
    ClearAll,
    /// Render the panel to text and reply on the channel
    Render(oneshot::Sender<String>),
    Quit,
}

pub struct NotificationCenter {
    api: Arc<dyn NotificationsApi>,
    transport: Arc<dyn LiveTransport>,
    tokens: Arc<dyn TokenSource>,
    badge: UnreadBadge,
    role: Role,
    open: bool,
    notifications: Vec<Notification>,
    live: Option<LiveSubscription>,
    live_tx: mpsc::UnboundedSender<Notification>,
    live_rx: Option<mpsc::UnboundedReceiver<Notification>>,
}

impl NotificationCenter {
    pub fn new(
        api: Arc<dyn NotificationsApi>,
        transport: Arc<dyn LiveTransport>,
        tokens: Arc<dyn TokenSource>,
        role: Role,
    ) -> Self {
        let (live_tx, live_rx) = mpsc::unbounded_channel();
        Self {
            api,
            transport,
            tokens,
            badge: UnreadBadge::new(),
            role,
            open: false,
            notifications: Vec::new(),
            live: None,
            live_tx,
            live_rx: Some(live_rx),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// True while a live subscription is attached
    pub fn live_attached(&self) -> bool {
        self.live.is_some()
    }

    /// Subscribe to unread-count changes (the badge bus)
    pub fn watch_unread(&self) -> watch::Receiver<u64> {
        self.badge.watch()
    }

    /// Open the panel: fetch the list and attach the live feed
    pub async fn open(&mut self) {
        self.open = true;
        self.refresh().await;
        self.attach_live().await;
    }

    /// Close the panel, releasing the live connection
    pub fn close(&mut self) {
        self.open = false;
        self.detach_live();
    }

    /// Switch role; while open this refetches and rescopes the live feed
    pub async fn set_role(&mut self, role: Role) {
        if self.role == role {
            return;
        }
        self.role = role;
        if self.open {
            self.refresh().await;
            self.attach_live().await;
        }
    }

    /// Fetch the notification list, replace local state wholesale and
    /// publish the unread count. Best-effort: any failure keeps the
    /// previous state.
    pub async fn refresh(&mut self) {
        let Some(token) = self.tokens.token() else {
            debug!("no session token, skipping fetch");
            return;
        };
        let page = match self.api.fetch(&token).await {
            Ok(page) => page,
            Err(e) => {
                debug!("notification fetch failed: {e}");
                return;
            }
        };
        let count = page.unread_count.unwrap_or(0);
        self.notifications = page
            .records()
            .into_iter()
            .map(RawNotification::normalize)
            .collect();
        self.badge.publish(count);
    }

    /// Mark everything read server-side; on success zero the badge and
    /// close. On failure the panel stays open with what it has.
    pub async fn clear_all(&mut self) {
        let Some(token) = self.tokens.token() else {
            return;
        };
        match self.api.mark_all_read(&token).await {
            Ok(()) => {
                self.badge.publish(0);
                self.close();
            }
            Err(e) => debug!("mark-all-read failed: {e}"),
        }
    }

    /// Insert a live event at the top of the list.
    ///
    /// Events whose id is already present (a fetch completed after the
    /// push was sent) are dropped instead of shown twice.
    pub fn apply_live(&mut self, notification: Notification) {
        if self
            .notifications
            .iter()
            .any(|existing| existing.id == notification.id)
        {
            debug!(id = %notification.id, "dropping duplicate live notification");
            return;
        }
        self.notifications.insert(0, notification);
    }

    /// Plain-text rendering of the panel
    pub fn render(&self) -> String {
        render::render_panel(&self.notifications, self.badge.current())
    }

    async fn attach_live(&mut self) {
        self.detach_live();
        let Some(token) = self.tokens.token() else {
            debug!("no session token, live feed not attached");
            return;
        };
        let namespace = self.role.namespace();
        match self
            .transport
            .subscribe(namespace, &token, self.live_tx.clone())
            .await
        {
            Ok(subscription) => {
                debug!(namespace, "live feed attached");
                self.live = Some(subscription);
            }
            Err(e) => debug!(namespace, "live feed unavailable: {e}"),
        }
    }

    fn detach_live(&mut self) {
        if let Some(subscription) = self.live.take() {
            debug!(namespace = subscription.namespace(), "live feed detached");
            subscription.disconnect();
        }
    }

    /// Drive the panel from a command channel until `Quit` (or all
    /// senders dropped). Live events are applied between commands.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<PanelCommand>) {
        let Some(mut live_rx) = self.live_rx.take() else {
            return;
        };
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(PanelCommand::Open) => self.open().await,
                    Some(PanelCommand::Close) => self.close(),
                    Some(PanelCommand::SetRole(role)) => self.set_role(role).await,
                    Some(PanelCommand::ClearAll) => self.clear_all().await,
                    Some(PanelCommand::Render(reply)) => {
                        let _ = reply.send(self.render());
                    }
                    Some(PanelCommand::Quit) | None => break,
                },
                Some(notification) = live_rx.recv() => {
                    if self.open {
                        self.apply_live(notification);
                    }
                }
            }
        }
        self.close();
    }
}
