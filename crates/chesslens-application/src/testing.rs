//! In-memory collaborators shared by the use case tests.

use async_trait::async_trait;
use chesslens_core::board::{BoardId, BoardRecord, BoardUpdate, LibraryService};
use chesslens_core::capture::{AnalysisLauncher, ImageUpload, Prediction, PredictionService};
use chesslens_core::navigation::{Navigator, Route};
use chesslens_core::{LensError, Result};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use tokio::sync::Notify;

pub fn board(id: i64, fen: &str, category: Option<&str>) -> BoardRecord {
    BoardRecord {
        id: BoardId::from(id),
        fen: fen.to_string(),
        image_location: Some(format!("https://images.test/{id}.png")),
        category: category.map(str::to_string),
        notes: None,
        created_at: Utc::now(),
    }
}

pub fn png() -> ImageUpload {
    ImageUpload::new("board.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47])
}

/// Library service backed by a vector, with switches to make each call fail.
#[derive(Default)]
pub struct InMemoryLibrary {
    pub boards: Mutex<Vec<BoardRecord>>,
    pub updates: Mutex<Vec<(BoardId, BoardUpdate)>>,
    pub deletes: Mutex<Vec<BoardId>>,
    pub creates: Mutex<Vec<String>>,
    pub fail_list: AtomicBool,
    pub fail_get: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_delete: AtomicBool,
    /// When set, deletes wait for a `notify_one` before settling
    pub delete_gate: Option<Notify>,
    /// Per-board gates, released independently with `release_delete_of`
    delete_gates: Mutex<HashMap<BoardId, Arc<Notify>>>,
    next_id: AtomicI64,
}

impl InMemoryLibrary {
    pub fn with_boards(boards: Vec<BoardRecord>) -> Self {
        Self {
            boards: Mutex::new(boards),
            ..Default::default()
        }
    }

    pub fn gated(mut self) -> Self {
        self.delete_gate = Some(Notify::new());
        self
    }

    pub fn release_delete(&self) {
        if let Some(gate) = &self.delete_gate {
            gate.notify_one();
        }
    }

    /// Holds deletes of `ids` until each is released by id.
    pub fn gated_by_id(self, ids: &[i64]) -> Self {
        {
            let mut gates = self.delete_gates.lock().unwrap();
            for id in ids {
                gates.insert(BoardId::from(*id), Arc::new(Notify::new()));
            }
        }
        self
    }

    pub fn release_delete_of(&self, id: i64) {
        if let Some(gate) = self.delete_gates.lock().unwrap().get(&BoardId::from(id)) {
            gate.notify_one();
        }
    }

    pub fn set_next_id(&self, id: i64) {
        self.next_id.store(id, Ordering::SeqCst);
    }
}

#[async_trait]
impl LibraryService for InMemoryLibrary {
    async fn create_board(&self, image: &ImageUpload, fen: &str) -> Result<BoardRecord> {
        self.creates.lock().unwrap().push(fen.to_string());
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(LensError::save("upload rejected"));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut record = board(id, fen, None);
        record.image_location = Some(format!("https://images.test/{}", image.file_name));
        self.boards.lock().unwrap().insert(0, record.clone());
        Ok(record)
    }

    async fn list_boards(&self) -> Result<Vec<BoardRecord>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(LensError::fetch("connection refused"));
        }
        Ok(self.boards.lock().unwrap().clone())
    }

    async fn get_board(&self, id: &BoardId) -> Result<BoardRecord> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(LensError::fetch("connection refused"));
        }
        self.boards
            .lock()
            .unwrap()
            .iter()
            .find(|b| &b.id == id)
            .cloned()
            .ok_or_else(|| LensError::not_found("board", id.as_str()))
    }

    async fn update_board(&self, id: &BoardId, update: &BoardUpdate) -> Result<BoardRecord> {
        self.updates
            .lock()
            .unwrap()
            .push((id.clone(), update.clone()));
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(LensError::save("database locked"));
        }
        let mut boards = self.boards.lock().unwrap();
        let record = boards
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| LensError::save("Position not found"))?;
        if let Some(fen) = &update.fen {
            record.fen = fen.clone();
        }
        if let Some(category) = &update.category {
            record.category = Some(category.clone());
        }
        if let Some(notes) = &update.notes {
            record.notes = Some(notes.clone());
        }
        Ok(record.clone())
    }

    async fn delete_board(&self, id: &BoardId) -> Result<()> {
        self.deletes.lock().unwrap().push(id.clone());
        if let Some(gate) = &self.delete_gate {
            gate.notified().await;
        }
        let keyed = self.delete_gates.lock().unwrap().get(id).cloned();
        if let Some(gate) = keyed {
            gate.notified().await;
        }
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(LensError::delete("server unavailable"));
        }
        self.boards.lock().unwrap().retain(|b| &b.id != id);
        Ok(())
    }
}

pub struct FakePredictor {
    pub result: Result<Prediction>,
    pub calls: Mutex<u32>,
    /// When set, predictions wait for a `notify_one` before settling
    pub gate: Option<Notify>,
}

impl FakePredictor {
    pub fn returning(fen: &str) -> Self {
        Self {
            result: Ok(Prediction {
                fen: fen.to_string(),
                external_analysis_url: format!(
                    "https://lichess.org/editor/{}",
                    fen.replace(' ', "_")
                ),
            }),
            calls: Mutex::new(0),
            gate: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            result: Err(LensError::prediction("model not ready")),
            calls: Mutex::new(0),
            gate: None,
        }
    }

    pub fn gated(mut self) -> Self {
        self.gate = Some(Notify::new());
        self
    }
}

#[async_trait]
impl PredictionService for FakePredictor {
    async fn predict(&self, _image: &ImageUpload) -> Result<Prediction> {
        *self.calls.lock().unwrap() += 1;
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.result.clone()
    }
}

#[derive(Default)]
pub struct RecordingLauncher {
    pub launched: Mutex<Vec<String>>,
}

impl AnalysisLauncher for RecordingLauncher {
    fn launch(&self, url: &str) {
        self.launched.lock().unwrap().push(url.to_string());
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<Route>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}
