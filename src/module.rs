//! Contract with the external simulation module.
//!
//! The simulation engine is a black box reached through [`SimulationModule`].
//! A [`ModuleLoader`] acquires an instance; the sequencer then calls
//! [`SimulationModule::init`] once before any other entry point becomes
//! callable through the [`crate::ModuleHandle`].

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Entry points exposed by a loaded simulation module.
///
/// Implementations must be `Send + Sync` so a ready module can be shared with
/// background workers that run simulations off the UI thread.
pub trait SimulationModule: Send + Sync {
    /// Establishes the module's internal readiness. Called exactly once.
    fn init(&mut self) -> anyhow::Result<()>;

    /// Returns the module's greeting.
    fn greet(&self) -> String;

    /// Runs a simulation for the given request.
    fn execute_simulation(&self, request: &SimulationRequest) -> anyhow::Result<SimulationReport>;
}

/// Acquires a simulation module instance.
///
/// `load` runs on a background thread and may block for as long as it needs.
pub trait ModuleLoader: Send + Sync {
    fn load(&self) -> anyhow::Result<Box<dyn SimulationModule>>;

    /// Human-readable description used in logs.
    fn describe(&self) -> String {
        "simulation module".to_string()
    }
}

/// Loader backed by a constructor closure.
pub struct FnLoader<F> {
    name: String,
    constructor: F,
}

impl<F> FnLoader<F>
where
    F: Fn() -> anyhow::Result<Box<dyn SimulationModule>> + Send + Sync,
{
    pub fn new(name: impl Into<String>, constructor: F) -> Self {
        Self {
            name: name.into(),
            constructor,
        }
    }
}

impl<F> ModuleLoader for FnLoader<F>
where
    F: Fn() -> anyhow::Result<Box<dyn SimulationModule>> + Send + Sync,
{
    fn load(&self) -> anyhow::Result<Box<dyn SimulationModule>> {
        (self.constructor)()
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Input of a simulation run.
///
/// `options` carries engine flags such as `RUNE_DARK_HARVEST_STACKS = "0"`;
/// their meaning is defined by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationRequest {
    pub options: BTreeMap<String, String>,
    pub item_ids: Vec<u64>,
    pub max_results: usize,
}

impl Default for SimulationRequest {
    fn default() -> Self {
        Self {
            options: BTreeMap::new(),
            item_ids: Vec::new(),
            max_results: 10,
        }
    }
}

impl SimulationRequest {
    /// Parses an option value as a boolean flag (`TRUE`/`FALSE`, case-insensitive).
    pub fn parse_flag(value: &str) -> Option<bool> {
        if value.eq_ignore_ascii_case("TRUE") {
            Some(true)
        } else if value.eq_ignore_ascii_case("FALSE") {
            Some(false)
        } else {
            None
        }
    }

    /// Option value written for a boolean flag.
    pub fn flag_text(value: bool) -> &'static str {
        if value {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    /// Interprets an option as a boolean flag.
    pub fn flag(&self, key: &str) -> Option<bool> {
        Self::parse_flag(self.options.get(key)?)
    }

    pub fn set_flag(&mut self, key: &str, value: bool) {
        self.options
            .insert(key.to_string(), Self::flag_text(value).to_string());
    }
}

/// Tabular result of a simulation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl SimulationReport {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Routes panics to `tracing` before the default hook prints them.
fn set_panic_hook() {
    PANIC_HOOK.get_or_init(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(panic = %info, "Simulation module panicked");
            default_hook(info);
        }));
    });
}

/// Built-in stand-in used when no engine is linked into the shell.
///
/// It reflects the request back as a table so the result views can be
/// exercised end to end.
#[derive(Debug, Default)]
pub struct EchoModule {
    initialized: AtomicBool,
}

impl EchoModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader producing a fresh `EchoModule`.
    pub fn loader() -> impl ModuleLoader {
        FnLoader::new("built-in echo module", || {
            Ok(Box::new(EchoModule::new()) as Box<dyn SimulationModule>)
        })
    }
}

impl SimulationModule for EchoModule {
    fn init(&mut self) -> anyhow::Result<()> {
        set_panic_hook();
        self.initialized.store(true, Ordering::Release);
        Ok(())
    }

    fn greet(&self) -> String {
        "Hello, league-sim!".to_string()
    }

    fn execute_simulation(&self, request: &SimulationRequest) -> anyhow::Result<SimulationReport> {
        anyhow::ensure!(
            self.initialized.load(Ordering::Acquire),
            "execute_simulation called before init"
        );

        let mut report = SimulationReport::new(vec![
            "Kind".to_string(),
            "Key".to_string(),
            "Value".to_string(),
        ]);
        let options = request
            .options
            .iter()
            .map(|(key, value)| vec![Value::from("option"), Value::from(key.as_str()), Value::from(value.as_str())]);
        let items = request
            .item_ids
            .iter()
            .enumerate()
            .map(|(slot, id)| vec![Value::from("item"), Value::from(slot), Value::from(*id)]);

        for row in options.chain(items).take(request.max_results) {
            report.push_row(row);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> SimulationRequest {
        let mut request = SimulationRequest::default();
        request.set_flag("CHAMPION_KHAZIX_Q_EVOLVED", true);
        request.item_ids = vec![3158, 3142, 6701];
        request
    }

    #[test]
    fn test_echo_requires_init() {
        let module = EchoModule::new();
        assert!(module.execute_simulation(&sample_request()).is_err());
    }

    #[test]
    fn test_echo_reports_request() -> anyhow::Result<()> {
        let mut module = EchoModule::new();
        module.init()?;
        let report = module.execute_simulation(&sample_request())?;
        assert_eq!(report.columns.len(), 3);
        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.rows[0][1], serde_json::json!("CHAMPION_KHAZIX_Q_EVOLVED"));
        assert_eq!(report.rows[3][2], serde_json::json!(6701));
        Ok(())
    }

    #[test]
    fn test_echo_respects_max_results() -> anyhow::Result<()> {
        let mut module = EchoModule::new();
        module.init()?;
        let mut request = sample_request();
        request.max_results = 2;
        assert_eq!(module.execute_simulation(&request)?.rows.len(), 2);
        Ok(())
    }

    #[test]
    fn test_request_flags() {
        let mut request = SimulationRequest::default();
        request.options.insert("A".to_string(), "true".to_string());
        request.options.insert("B".to_string(), "0".to_string());
        assert_eq!(request.flag("A"), Some(true));
        assert_eq!(request.flag("B"), None);
        assert_eq!(request.flag("missing"), None);
    }

    #[test]
    fn test_parse_flag_values() {
        assert_eq!(SimulationRequest::parse_flag("TRUE"), Some(true));
        assert_eq!(SimulationRequest::parse_flag("False"), Some(false));
        assert_eq!(SimulationRequest::parse_flag("0"), None);
        assert_eq!(SimulationRequest::parse_flag(""), None);
        assert_eq!(
            SimulationRequest::parse_flag(SimulationRequest::flag_text(true)),
            Some(true)
        );
    }

    #[test]
    fn test_fn_loader() -> anyhow::Result<()> {
        let loader = EchoModule::loader();
        let module = loader.load()?;
        assert_eq!(module.greet(), "Hello, league-sim!");
        assert_eq!(loader.describe(), "built-in echo module");
        Ok(())
    }
}
