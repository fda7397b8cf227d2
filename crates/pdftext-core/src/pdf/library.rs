//! Library-wide engine lifecycle.

use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::{PdfEngine, Source};
use crate::extract::{self, ExtractOptions};
use crate::models::result::ExtractionResult;
use crate::Result;

/// A started document engine.
///
/// [`Library::start`] runs the engine's one-time setup and dropping the
/// library runs its teardown, so extraction is only reachable between the
/// two. Calls through one library are serialized: engines are not required
/// to support concurrent documents.
pub struct Library<E: PdfEngine> {
    engine: E,
    gate: Mutex<()>,
}

impl<E: PdfEngine> Library<E> {
    /// Initialize the engine.
    pub fn start(engine: E) -> Self {
        engine.initialize();
        debug!("PDF engine initialized");
        Self {
            engine,
            gate: Mutex::new(()),
        }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Extract text and metadata from `source`. See [`extract::extract`].
    pub fn extract<'src>(
        &self,
        source: impl Into<Source<'src>>,
        options: &ExtractOptions,
    ) -> Result<ExtractionResult> {
        // engine state is per-document, so a poisoned gate is still usable
        let _active = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        extract::extract(&self.engine, source.into(), options)
    }
}

impl<E: PdfEngine> Drop for Library<E> {
    fn drop(&mut self) {
        self.engine.shutdown();
        debug!("PDF engine shut down");
    }
}
