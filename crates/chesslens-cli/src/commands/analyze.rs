use crate::app::{App, ConsoleNavigator};
use anyhow::Result;
use chesslens_application::{CaptureOutcome, CaptureWorkflow};
use chesslens_core::capture::AnalysisLauncher;
use chesslens_infrastructure::image::load_image;
use chesslens_infrastructure::{BrowserLauncher, NoopLauncher};
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;

pub async fn run(app: &App, image: &Path, no_browser: bool) -> Result<()> {
    let upload = load_image(image).await?;

    let launcher: Arc<dyn AnalysisLauncher> = if no_browser {
        Arc::new(NoopLauncher)
    } else {
        Arc::new(BrowserLauncher)
    };
    let workflow = CaptureWorkflow::new(
        app.client.clone(),
        app.client.clone(),
        launcher,
        Arc::new(ConsoleNavigator),
        app.session.clone(),
    );

    println!("Analyzing {}...", upload.file_name);
    let outcome = workflow.analyze(&upload).await?;

    let prediction = outcome.prediction();
    println!("{} {}", "FEN:".bold(), prediction.fen);
    println!("{} {}", "Analysis:".bold(), prediction.external_analysis_url);

    match &outcome {
        CaptureOutcome::Saved { record, .. } => {
            println!("{}", format!("Saved as board {}", record.id).green());
        }
        CaptureOutcome::Unsaved { .. } => {
            println!("{}", "Not signed in, board was not saved.".yellow());
        }
        CaptureOutcome::SaveFailed { error, .. } => {
            eprintln!("{}", format!("Failed to save board: {error}").red());
        }
    }
    Ok(())
}
