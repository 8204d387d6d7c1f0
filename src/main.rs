use notification_center::{
    Config, HttpNotificationsApi, NotificationCenter, PanelCommand, Role, StaticToken,
    WsLiveTransport,
};
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tokio::sync::{mpsc, oneshot};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(
        role = config.role.as_str(),
        api = %config.api_base_url,
        "starting notification center"
    );
    if config.session_token.is_none() {
        tracing::warn!("no SESSION_TOKEN set; panel will stay offline");
    }

    let api = Arc::new(HttpNotificationsApi::new(&config.api_base_url));
    let transport = Arc::new(WsLiveTransport::new(&config.ws_base_url));
    let tokens = Arc::new(StaticToken::new(config.session_token.clone()));
    let center = NotificationCenter::new(api, transport, tokens, config.role);

    // Log badge updates the way a badge icon would consume them
    let mut unread = center.watch_unread();
    tokio::spawn(async move {
        while unread.changed().await.is_ok() {
            let count = *unread.borrow();
            tracing::info!(count, "unread badge updated");
        }
    });

    let (commands, command_rx) = mpsc::unbounded_channel();
    let panel = tokio::spawn(center.run(command_rx));

    println!("commands: open | close | clear | role <name> | show | quit");
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "open" => {
                commands.send(PanelCommand::Open)?;
                let (reply, rendered) = oneshot::channel();
                commands.send(PanelCommand::Render(reply))?;
                println!("{}", rendered.await?);
            }
            "close" => commands.send(PanelCommand::Close)?,
            "clear" => commands.send(PanelCommand::ClearAll)?,
            "show" => {
                let (reply, rendered) = oneshot::channel();
                commands.send(PanelCommand::Render(reply))?;
                println!("{}", rendered.await?);
            }
            "quit" | "exit" => break,
            "" => {}
            other => {
                if let Some(role) = other.strip_prefix("role ") {
                    commands.send(PanelCommand::SetRole(Role::parse(role.trim())))?;
                } else {
                    println!("unknown command: {other}");
                }
            }
        }
    }

    commands.send(PanelCommand::Quit).ok();
    panel.await?;
    Ok(())
}
