// Scripted walk through recording and undoing tray edits
// Run with: cargo run -- [path/to/history.ron]

use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use traystack::{HistoryConfig, HistoryManager, MountedView, RenderBridge, Tray};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "traystack=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => HistoryConfig::load(&path)?,
        None => HistoryConfig::default(),
    };
    tracing::info!(capacity = config.capacity, codec = ?config.codec, "Starting history session");

    let mut history = HistoryManager::from_config(&config)?;
    let mut view = MountedView::new();

    // Before anything is mounted there is nothing to record
    history.record(None, &view)?;

    let mut root = Tray::new("Workspace");
    let inbox = Tray::new("Inbox");
    let inbox_id = inbox.id().clone();
    root.add_child(inbox)?;
    view.mount(root);
    history.record(None, &view)?;

    view.edit(|root| {
        if let Some(inbox) = root.find_mut(&inbox_id) {
            inbox.add_child(Tray::new("Call the plumber"))
        } else {
            Ok(())
        }
    })
    .transpose()?;
    history.record(None, &view)?;

    view.edit(|root| {
        root.name = "Renamed workspace".to_string();
        root.is_folded = true;
    });
    history.record(None, &view)?;

    print_tree(&view);

    while history.can_undo() {
        history.undo(&mut view)?;
        print_tree(&view);
    }

    tracing::info!(
        remaining = history.len(),
        renders = view.render_count(),
        "Undo history exhausted"
    );
    Ok(())
}

fn print_tree(view: &MountedView) {
    fn print_node(tray: &Tray, depth: usize) {
        let marker = if tray.is_folded { "+" } else { "-" };
        println!("{}{} {}", "  ".repeat(depth), marker, tray.name);
        for child in tray.children() {
            print_node(child, depth + 1);
        }
    }

    match view.active_root() {
        Some(root) => print_node(root, 0),
        None => println!("(nothing mounted)"),
    }
    println!();
}
