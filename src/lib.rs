pub mod badge;
pub mod config;
pub mod error;
pub mod models;
pub mod panel;
pub mod services;
pub mod session;
pub mod websocket;

pub use badge::UnreadBadge;
pub use config::Config;
pub use error::{PanelError, Result};
pub use models::{Notification, NotificationPage, RawNotification, Role};
pub use panel::{NotificationCenter, PanelCommand};
pub use services::{HttpNotificationsApi, NotificationsApi};
pub use session::{StaticToken, TokenSource};
pub use websocket::{LiveFrame, LiveSubscription, LiveTransport, WsLiveTransport};
