pub mod messages;
pub mod transport;

pub use messages::{LiveFrame, NOTIFICATION_EVENT};
pub use transport::{LiveSubscription, LiveTransport, WsLiveTransport};
