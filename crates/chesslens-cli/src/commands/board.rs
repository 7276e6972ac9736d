use crate::app::App;
use anyhow::Result;
use chesslens_application::{EditSession, PositionEditor};
use chesslens_core::board::BoardId;
use chesslens_core::fen::Side;
use colored::Colorize;

/// Field changes requested on the command line.
pub struct Changes {
    pub fen: Option<String>,
    pub turn: Option<Side>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

impl Changes {
    /// Applies the changes in order: FEN first, so `turn` edits the new FEN.
    fn apply(self, session: &mut EditSession) {
        if let Some(fen) = self.fen {
            session.set_fen(fen);
        }
        if let Some(side) = self.turn {
            session.set_side_to_move(side);
        }
        if let Some(category) = self.category {
            session.set_category(category);
        }
        if let Some(notes) = self.notes {
            session.set_notes(notes);
        }
    }
}

fn print_session(app: &App, session: &EditSession) {
    println!("{} {}", "Board".bold(), session.id());
    println!("  FEN:      {}", session.fen());
    println!("  To move:  {}", session.side_to_move());
    println!("  Category: {}", session.category());
    if !session.notes().is_empty() {
        println!("  Notes:    {}", session.notes());
    }
    if let Some(image) = session.image_location() {
        println!("  Image:    {image}");
    }
    println!("  Analysis: {}", app.config.analysis_url(session.fen()));
}

pub async fn show(app: &App, id: &BoardId) -> Result<()> {
    let editor = PositionEditor::new(app.client.clone(), app.session.clone());
    let session = editor.open(id).await?;
    print_session(app, &session);
    Ok(())
}

pub async fn edit(app: &App, id: &BoardId, changes: Changes) -> Result<()> {
    let editor = PositionEditor::new(app.client.clone(), app.session.clone());
    let mut session = editor.open(id).await?;
    changes.apply(&mut session);

    let record = editor.commit(&session).await?;
    println!("{}", format!("Saved board {}", record.id).green());
    print_session(app, &EditSession::from_record(&record));
    Ok(())
}
