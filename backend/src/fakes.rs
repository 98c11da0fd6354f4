//! In-memory collaborators for tests and local experiments.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use common::model::user::User;
use image::RgbaImage;

use crate::error::{OrderError, OrderResult};
use crate::services::assets::AssetStore;
use crate::services::roster::template::TemplateSource;
use crate::services::sheets::{RangeUpdate, SheetProperties, SpreadsheetService};
use crate::services::users::UserDirectory;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Spreadsheet holding fixed tabs; updates are recorded.
pub struct FakeSheets {
    sheets: Vec<(SheetProperties, Vec<Vec<String>>)>,
    accept_updates: bool,
    updates: Mutex<Vec<RangeUpdate>>,
    reads: AtomicUsize,
}

impl Default for FakeSheets {
    fn default() -> Self {
        Self {
            sheets: Vec::new(),
            accept_updates: true,
            updates: Mutex::new(Vec::new()),
            reads: AtomicUsize::new(0),
        }
    }
}

impl FakeSheets {
    pub fn with_sheet(mut self, sheet_id: i64, title: &str, columns: Vec<Vec<String>>) -> Self {
        self.sheets.push((
            SheetProperties {
                sheet_id,
                title: title.to_string(),
            },
            columns,
        ));
        self
    }

    pub fn rejecting_updates(mut self) -> Self {
        self.accept_updates = false;
        self
    }

    pub fn updates(&self) -> Vec<RangeUpdate> {
        lock(&self.updates).clone()
    }

    /// Number of grids served so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SpreadsheetService for FakeSheets {
    async fn list_sheets(&self) -> OrderResult<Vec<SheetProperties>> {
        Ok(self.sheets.iter().map(|(props, _)| props.clone()).collect())
    }

    async fn batch_get(&self, sheet_id: i64, start_column: usize) -> OrderResult<Vec<Vec<String>>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        let (_, columns) = self
            .sheets
            .iter()
            .find(|(props, _)| props.sheet_id == sheet_id)
            .ok_or_else(|| OrderError::MalformedResponse(format!("unknown sheet {sheet_id}")))?;
        // Stored columns already start at the first grid column.
        if start_column != crate::services::sheets::FIRST_GRID_COLUMN {
            return Err(OrderError::MalformedResponse(format!(
                "unexpected start column {start_column}"
            )));
        }
        Ok(columns.clone())
    }

    async fn batch_update(&self, update: &RangeUpdate) -> OrderResult<bool> {
        lock(&self.updates).push(update.clone());
        Ok(self.accept_updates)
    }
}

/// Asset store answering `https://assets.test/{folder}/{n}.png`.
#[derive(Default)]
pub struct FakeAssets {
    fail_at: Option<usize>,
    attempts: AtomicUsize,
    uploads: Mutex<Vec<(String, String)>>,
}

impl FakeAssets {
    /// Store whose `attempt`-th upload (1-based) fails.
    pub fn failing_at(attempt: usize) -> Self {
        Self {
            fail_at: Some(attempt),
            ..Self::default()
        }
    }

    /// Successful uploads as `(folder, base64 payload)`.
    pub fn uploads(&self) -> Vec<(String, String)> {
        lock(&self.uploads).clone()
    }
}

#[async_trait]
impl AssetStore for FakeAssets {
    async fn upload(&self, base64_png: &str, folder: &str) -> OrderResult<String> {
        let attempt = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;
        if self.fail_at == Some(attempt) {
            return Err(OrderError::MalformedResponse("upload rejected".to_string()));
        }
        lock(&self.uploads).push((folder.to_string(), base64_png.to_string()));
        Ok(format!("https://assets.test/{folder}/{attempt}.png"))
    }
}

pub struct FakeUsers {
    users: Vec<User>,
}

impl FakeUsers {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }
}

impl UserDirectory for FakeUsers {
    fn users(&self) -> OrderResult<Vec<User>> {
        Ok(self.users.clone())
    }
}

/// Template served from memory.
pub struct StaticTemplate(pub RgbaImage);

#[async_trait]
impl TemplateSource for StaticTemplate {
    async fn fetch(&self) -> OrderResult<RgbaImage> {
        Ok(self.0.clone())
    }
}
