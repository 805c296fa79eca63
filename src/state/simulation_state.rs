//! Simulation request and result state.
//!
//! Holds the request being edited in the setup tab, the last report returned
//! by the module and any message produced by a module call.

use lsim::{SimulationReport, SimulationRequest};

/// Items offered in the "add item" dropdown, as (id, name).
pub const ITEM_CATALOG: &[(u64, &str)] = &[
    (3158, "Ionian Boots of Lucidity"),
    (3006, "Berserker's Greaves"),
    (3142, "Youmuu's Ghostblade"),
    (6701, "Opportunity"),
    (3814, "Edge of Night"),
    (6694, "Serylda's Grudge"),
    (6698, "Profane Hydra"),
    (6692, "Eclipse"),
    (3156, "Maw of Malmortius"),
    (3179, "Umbral Glaive"),
    (6697, "Hubris"),
    (6333, "Death's Dance"),
    (3036, "Lord Dominik's Regards"),
    (3033, "Mortal Reminder"),
    (3071, "Black Cleaver"),
    (6676, "The Collector"),
    (3072, "Bloodthirster"),
    (3026, "Guardian Angel"),
    (3074, "Ravenous Hydra"),
    (3153, "Blade of the Ruined King"),
];

/// Looks up an item's display name.
pub fn item_name(id: u64) -> Option<&'static str> {
    ITEM_CATALOG
        .iter()
        .find(|(item_id, _)| *item_id == id)
        .map(|(_, name)| *name)
}

/// Request the setup tab starts with when nothing was persisted.
pub fn default_request() -> SimulationRequest {
    let mut request = SimulationRequest::default();
    request.set_flag("CHAMPION_KHAZIX_ISOLATED_TARGET", true);
    request.set_flag("CHAMPION_KHAZIX_Q_EVOLVED", true);
    request.set_flag("CHAMPION_KHAZIX_R_EVOLVED", false);
    request.set_flag("ITEM_HUBRIS_EMINENCE_ACTIVE", false);
    request.set_flag("ITEM_OPPORTUNITY_PREPARATION_READY", true);
    request
        .options
        .insert("RUNE_DARK_HARVEST_STACKS".to_string(), "0".to_string());
    request.item_ids = vec![3158, 3142, 6701, 3814];
    request
}

/// State of the simulation form and its results.
#[derive(Debug)]
pub struct SimulationState {
    request: SimulationRequest,
    /// Index into `ITEM_CATALOG` selected in the add-item dropdown
    catalog_selection: usize,
    report: Option<SimulationReport>,
    greeting: Option<String>,
    run_error: Option<String>,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationState {
    pub fn new() -> Self {
        Self::with_request(default_request())
    }

    pub fn with_request(request: SimulationRequest) -> Self {
        Self {
            request,
            catalog_selection: 0,
            report: None,
            greeting: None,
            run_error: None,
        }
    }

    // ===== Queries =====

    pub fn request(&self) -> &SimulationRequest {
        &self.request
    }

    pub fn report(&self) -> Option<&SimulationReport> {
        self.report.as_ref()
    }

    pub fn greeting(&self) -> Option<&str> {
        self.greeting.as_deref()
    }

    pub fn run_error(&self) -> Option<&str> {
        self.run_error.as_deref()
    }

    // ===== Mutations =====

    pub fn request_mut(&mut self) -> &mut SimulationRequest {
        &mut self.request
    }

    pub fn replace_request(&mut self, request: SimulationRequest) {
        self.request = request;
    }

    pub fn catalog_selection_mut(&mut self) -> &mut usize {
        &mut self.catalog_selection
    }

    /// Adds an item unless it is already part of the build.
    pub fn add_item(&mut self, id: u64) -> bool {
        if self.request.item_ids.contains(&id) {
            return false;
        }
        self.request.item_ids.push(id);
        true
    }

    pub fn remove_item(&mut self, index: usize) {
        if index < self.request.item_ids.len() {
            self.request.item_ids.remove(index);
        }
    }

    pub fn set_report(&mut self, report: SimulationReport) {
        self.report = Some(report);
        self.run_error = None;
    }

    pub fn set_run_error(&mut self, message: String) {
        self.run_error = Some(message);
    }

    pub fn set_greeting(&mut self, greeting: String) {
        self.greeting = Some(greeting);
    }
}
