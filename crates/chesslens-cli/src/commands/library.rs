use crate::app::App;
use anyhow::Result;
use chesslens_application::LibraryStore;
use chesslens_core::board::{BoardId, BoardRecord, display_category};
use chesslens_core::filter::CategoryFilter;
use colored::Colorize;

fn print_row(board: &BoardRecord) {
    println!(
        "{:>6}  {:<13}  {}  {}",
        board.id.to_string().bold(),
        display_category(board),
        board.created_at.format("%Y-%m-%d"),
        board.fen
    );
}

pub async fn list(app: &App, filter: CategoryFilter) -> Result<()> {
    let store = LibraryStore::new(app.client.clone(), app.session.clone());
    store.load().await?;

    let boards = store.filtered(filter);
    if boards.is_empty() {
        println!("No boards in {}", filter.label());
        return Ok(());
    }

    println!("{} ({})", filter.label().bold(), boards.len());
    for board in &boards {
        print_row(board);
    }
    Ok(())
}

pub async fn delete(app: &App, id: &BoardId) -> Result<()> {
    let store = LibraryStore::new(app.client.clone(), app.session.clone());
    store.load().await?;

    if store.get(id).is_none() {
        anyhow::bail!("Board {id} is not in your library");
    }

    store.remove(id).await?;
    println!(
        "{}",
        format!("Deleted board {id}, {} left", store.boards().len()).green()
    );
    Ok(())
}
