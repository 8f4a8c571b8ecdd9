//! Session: the context object one or more script runs share.
//!
//! A session owns the operation catalog, the handler registry and the
//! world. Occupancy persists between runs until `clear_all` or
//! [`Session::reset`].

use codescape_core::{transpile, Catalog, Diagnostic};
use serde::Serialize;

use crate::config::SessionConfig;
use crate::engine::{execute, ExecutionResult};
use crate::grid::ValidityMask;
use crate::registry::Registry;
use crate::world::World;

pub struct Session {
    catalog: Catalog,
    registry: Registry,
    world: World,
}

/// Everything a caller gets back from one script run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub normalized_code: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub results: Vec<ExecutionResult>,
    pub success_count: usize,
}

impl RunReport {
    pub fn failure_count(&self) -> usize {
        self.results.len() - self.success_count
    }

    /// True when no line was diagnosed and every call succeeded.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.failure_count() == 0
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        #[derive(Serialize)]
        struct Report<'a> {
            normalized_code: &'a [String],
            diagnostics: Vec<serde_json::Value>,
            results: Vec<serde_json::Value>,
            success_count: usize,
        }
        serde_json::to_value(Report {
            normalized_code: &self.normalized_code,
            diagnostics: self.diagnostics.iter().map(Diagnostic::to_json_value).collect(),
            results: self.results.iter().map(ExecutionResult::to_json_value).collect(),
            success_count: self.success_count,
        })
        .unwrap_or(serde_json::Value::Null)
    }
}

impl Session {
    pub fn new(mask: ValidityMask, config: &SessionConfig) -> Self {
        Session {
            catalog: Catalog::builtin(),
            registry: Registry::builtin(),
            world: World::new(mask, config),
        }
    }

    /// All-land grid sized by `config.grid_size`.
    pub fn with_config(config: &SessionConfig) -> Self {
        Session::new(ValidityMask::all_land(config.grid_size), config)
    }

    /// Swap in a custom catalog and registry, e.g. to add operations.
    pub fn with_operations(mut self, catalog: Catalog, registry: Registry) -> Self {
        self.catalog = catalog;
        self.registry = registry;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Transpile `source`, then execute every resulting call in order.
    pub fn run(&mut self, source: &str) -> RunReport {
        let transpiled = transpile(source, &self.catalog);
        let (results, success_count) = execute(&transpiled.calls, &self.registry, &mut self.world);
        RunReport {
            normalized_code: transpiled.normalized_code,
            diagnostics: transpiled.diagnostics,
            results,
            success_count,
        }
    }

    /// Drop all placements; returns how many were removed.
    pub fn reset(&mut self) -> usize {
        self.world.clear()
    }

    pub fn render_map(&self) -> String {
        self.world.render_map()
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::with_config(&SessionConfig::default())
    }
}
