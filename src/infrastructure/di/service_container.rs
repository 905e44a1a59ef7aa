//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{CaseCatalog, OutlineService};
use crate::config::Settings;
use crate::domain::Renderer;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub catalog: Arc<CaseCatalog>,

    pub outline: OutlineService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let catalog = Arc::new(CaseCatalog::new(Arc::clone(&fs)));
        let outline = OutlineService::new(Arc::clone(&catalog), Renderer::new(settings.marker));

        Self {
            settings,
            fs,
            catalog,
            outline,
        }
    }
}
