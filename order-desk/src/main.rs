use anyhow::Context;
use order_desk::shell::{self, Command, HELP};
use order_desk::{FileExporter, OrderDesk, StaticCatalog, setup_environment};
use shared::notification::{NotificationEvent, NotificationId};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 日志) 并加载配置
    let config = setup_environment();
    tracing::info!("Order desk starting...");

    // 2. 加载商品目录
    let catalog = StaticCatalog::load(&config.catalog_path)
        .with_context(|| format!("failed to load catalog from {}", config.catalog_path))?
        .with_search_limit(config.search_limit);

    // 3. 初始化订单台
    let exporter = Arc::new(FileExporter::for_format(
        &config.export_dir,
        config.export_format,
    ));
    let desk = OrderDesk::new(Arc::new(catalog), exporter, &config);

    // 4. 通知监听
    let mut events = desk.notifications().subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(NotificationEvent::Posted { notification }) => {
                    println!(
                        "  [{}] {} ({})",
                        notification.severity, notification.message, notification.id
                    );
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Notification listener lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match shell::parse(&line) {
            Ok(command) => command,
            Err(shell::ShellError::Empty) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        run(&desk, command).await;
    }

    tracing::info!("Order desk stopped");
    Ok(())
}

async fn run(desk: &OrderDesk, command: Command) {
    match command {
        Command::Search(term) => {
            let results = desk.search(&term);
            if results.is_empty() {
                println!("No matches");
            }
            for item in results {
                if item.discount > 0.0 {
                    println!("  {:>6}  {} ({}% off)", item.id, item.name, item.discount_percent());
                } else {
                    println!("  {:>6}  {}", item.id, item.name);
                }
            }
        }
        Command::Add(id) => {
            // Errors are already reported as notifications
            let _ = desk.add_to_cart(&id);
        }
        Command::Adjust { id, delta } => desk.update_quantity(&id, delta),
        Command::Remove(id) => desk.remove_from_cart(&id),
        Command::Clear => desk.clear_cart(),
        Command::ShowCart => {
            let lines = desk.cart_snapshot();
            if lines.is_empty() {
                println!("Cart is empty");
            }
            for line in lines {
                println!(
                    "  {:>6}  {} x{}  {}",
                    line.id,
                    line.name,
                    line.quantity,
                    line.discount_label()
                );
            }
            println!("Total items: {}", desk.total_quantity());
        }
        Command::Submit => {
            if let Ok(placed) = desk.submit_order().await {
                println!("Order {}", placed.record.order_id());
                if let Some(path) = placed.artifact.and_then(|a| a.location) {
                    println!("  saved: {}", path.display());
                }
                if let Some(url) = placed.relay_url {
                    println!("  relay: {}", url);
                }
            }
        }
        Command::ShowHistory => {
            let history = desk.history();
            if history.is_empty() {
                println!("No orders yet");
            }
            for record in history {
                println!(
                    "  {}  {} line(s), {} item(s)",
                    record.order_id(),
                    record.items().len(),
                    record.total_quantity()
                );
            }
        }
        Command::Export(order_id) => {
            let result = match order_id {
                Some(id) => desk.export_order(&id).await,
                None => desk.download_history().await,
            };
            if let Ok(Some(path)) = result.map(|a| a.location) {
                println!("  saved: {}", path.display());
            }
        }
        Command::ShowNotifications => {
            for notification in desk.active_notifications() {
                println!(
                    "  {}  [{}] {}",
                    notification.id, notification.severity, notification.message
                );
            }
        }
        Command::Dismiss(id) => {
            if !desk.dismiss(&NotificationId::new(id)) {
                println!("Nothing to dismiss");
            }
        }
        Command::Reset => desk.reset_session(),
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
}
