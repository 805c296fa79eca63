use lsim::{
    BootstrapError, Capability, CapabilityTable, ConfigurationError, EchoModule, FnLoader,
    LoadOptions, ModuleCallError, ModuleLoadError, ModuleLoader, ModulePhase, MountError,
    MountTarget, Registrar, RootView, Sequencer, ShellHost, ShellProfile, SimulationModule,
    SimulationRequest, ThemeConfiguration, ThemeOptions, ThemePreset, ThemeSelection, UiHost,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);

/// Host that records every call made on it.
#[derive(Default)]
struct RecordingHost {
    calls: Arc<Mutex<Vec<String>>>,
    mounted: Arc<AtomicBool>,
    capabilities: CapabilityTable,
}

impl RecordingHost {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl UiHost for RecordingHost {
    fn apply_theme(&mut self, theme: &ThemeConfiguration) {
        self.calls.lock().unwrap().push(format!("theme:{}", theme.preset()));
    }

    fn register_capability(&mut self, name: &str, capability: Capability) {
        self.calls.lock().unwrap().push(format!("register:{}", name));
        self.capabilities.register(name, capability);
    }

    fn mount(&mut self, root: &dyn RootView, target: &MountTarget) -> Result<(), MountError> {
        self.calls.lock().unwrap().push(format!("mount:{}@{}", root.name(), target));
        self.mounted.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn capabilities(&self) -> &CapabilityTable {
        &self.capabilities
    }

    fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }
}

struct ResultsView;

impl RootView for ResultsView {
    fn name(&self) -> &str {
        "ResultsView"
    }

    fn required_capabilities(&self) -> Vec<Capability> {
        vec![Capability::Button, Capability::DataTable]
    }
}

fn aura() -> ThemeSelection {
    ThemeSelection::new("Aura", ThemeOptions::default())
}

fn failing_loader(message: &'static str) -> Arc<dyn ModuleLoader> {
    Arc::new(FnLoader::new("offline module", move || -> anyhow::Result<Box<dyn SimulationModule>> {
        anyhow::bail!(message)
    }))
}

#[test]
fn test_aura_with_button_and_table_reaches_ready() {
    let mut host = ShellHost::new();
    let config = Registrar::configure(&mut host, &aura(), &["Button", "DataTable"]).unwrap();
    assert_eq!(config.theme().preset(), ThemePreset::Aura);
    assert_eq!(config.capabilities().len(), 2);
    assert_eq!(host.capabilities().len(), 2);

    let mut sequencer = Sequencer::new(host);
    sequencer
        .start(&ResultsView, &MountTarget::default(), Arc::new(EchoModule::loader()), LoadOptions::default())
        .unwrap();
    assert!(sequencer.host().is_mounted());

    assert_eq!(sequencer.wait_for_module(WAIT), ModulePhase::Ready);
    let handle = sequencer.handle();
    assert_eq!(handle.invoke(|m| m.greet()).unwrap(), "Hello, league-sim!");

    let mut request = SimulationRequest::default();
    request.item_ids = vec![3089, 3157];
    let report = handle
        .module()
        .unwrap()
        .execute_simulation(&request)
        .unwrap();
    assert_eq!(report.rows.len(), 2);
}

#[test]
fn test_unknown_preset_leaves_host_untouched() {
    let mut host = RecordingHost::default();
    let err = Registrar::configure(&mut host, &ThemeSelection::new("Neon", ThemeOptions::default()), &["Button"])
        .unwrap_err();
    assert_eq!(err, ConfigurationError::UnknownPreset("Neon".to_string()));
    assert!(host.calls().is_empty());
    assert!(host.capabilities().is_empty());
}

#[test]
fn test_unknown_capability_leaves_host_untouched() {
    let mut host = RecordingHost::default();
    let err = Registrar::configure(&mut host, &aura(), &["Button", "Carousel"]).unwrap_err();
    assert_eq!(err, ConfigurationError::UnknownCapability("Carousel".to_string()));
    assert!(host.calls().is_empty());
}

#[test]
fn test_configure_is_idempotent() {
    let mut once = ShellHost::new();
    let first = Registrar::configure(&mut once, &aura(), &["Button", "DataTable", "Tooltip"]).unwrap();

    let mut twice = ShellHost::new();
    Registrar::configure(&mut twice, &aura(), &["Button", "DataTable", "Tooltip"]).unwrap();
    let second = Registrar::configure(&mut twice, &aura(), &["Button", "DataTable", "Tooltip"]).unwrap();

    assert_eq!(first, second);
    assert_eq!(once.capabilities(), twice.capabilities());
    assert_eq!(once.theme(), twice.theme());
}

#[test]
fn test_module_load_failure_keeps_shell_mounted() {
    let mut host = ShellHost::new();
    Registrar::configure(&mut host, &aura(), &["Button", "DataTable"]).unwrap();
    let mut sequencer = Sequencer::new(host);
    sequencer
        .start(
            &ResultsView,
            &MountTarget::default(),
            failing_loader("network failure fetching module"),
            LoadOptions::default(),
        )
        .unwrap();

    assert_eq!(sequencer.wait_for_module(WAIT), ModulePhase::Failed);
    assert!(sequencer.host().is_mounted());
    assert_eq!(sequencer.host().mounted().map(|(name, _)| name), Some("ResultsView"));

    let handle = sequencer.handle();
    match handle.error() {
        Some(ModuleLoadError::LoaderFailed(detail)) => {
            assert!(detail.contains("network failure fetching module"), "{detail}")
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(
        handle.invoke(|m| m.greet()),
        Err(ModuleCallError::LoadFailed(_))
    ));
}

#[test]
fn test_mount_happens_before_module_load() {
    let mut host = RecordingHost::default();
    Registrar::configure(&mut host, &aura(), &["Button", "DataTable"]).unwrap();
    let calls = host.calls.clone();
    let mounted = host.mounted.clone();

    let loader = Arc::new(FnLoader::new("ordering probe", move || {
        anyhow::ensure!(mounted.load(Ordering::SeqCst), "module loaded before mount");
        Ok(Box::new(EchoModule::new()) as Box<dyn SimulationModule>)
    }));

    let mut sequencer = Sequencer::new(host);
    sequencer
        .start(&ResultsView, &MountTarget::default(), loader, LoadOptions::default())
        .unwrap();
    assert_eq!(sequencer.wait_for_module(WAIT), ModulePhase::Ready);

    let calls = calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![
            "theme:Aura".to_string(),
            "register:Button".to_string(),
            "register:DataTable".to_string(),
            "mount:ResultsView@#app".to_string(),
        ]
    );
}

#[test]
fn test_load_without_mount_is_rejected() {
    let mut host = RecordingHost::default();
    Registrar::configure(&mut host, &aura(), &["Button"]).unwrap();
    let mut sequencer = Sequencer::new(host);
    let err = sequencer
        .load_module(Arc::new(EchoModule::loader()), LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, BootstrapError::NotMounted));
    assert_eq!(sequencer.handle().phase(), ModulePhase::Unloaded);
}

#[test]
fn test_missing_capability_blocks_mount() {
    let mut host = RecordingHost::default();
    Registrar::configure(&mut host, &aura(), &["Button"]).unwrap();
    let mut sequencer = Sequencer::new(host);
    let err = sequencer.bootstrap(&ResultsView, &MountTarget::default()).unwrap_err();
    assert!(matches!(
        err,
        BootstrapError::Configuration(ConfigurationError::MissingCapability { .. })
    ));
    assert!(!sequencer.host().is_mounted());
}

#[test]
fn test_lifecycle_history_only_contains_legal_transitions() {
    for loader in [Arc::new(EchoModule::loader()) as Arc<dyn ModuleLoader>, failing_loader("boom")] {
        let mut host = ShellHost::new();
        Registrar::configure(&mut host, &aura(), &["Button", "DataTable"]).unwrap();
        let mut sequencer = Sequencer::new(host);
        sequencer
            .start(&ResultsView, &MountTarget::default(), loader, LoadOptions::default())
            .unwrap();
        let phase = sequencer.wait_for_module(WAIT);
        assert!(phase.is_terminal());

        let history = sequencer.handle().history();
        assert_eq!(history.first(), Some(&ModulePhase::Unloaded));
        for pair in history.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
        }
        assert_eq!(history.last(), Some(&phase));
        assert!(sequencer.handle().load_duration().is_some());
    }
}

#[test]
fn test_slow_module_times_out() {
    let mut host = ShellHost::new();
    Registrar::configure(&mut host, &aura(), &["Button", "DataTable"]).unwrap();
    let loader = Arc::new(FnLoader::new("slow module", || {
        thread::sleep(Duration::from_secs(2));
        Ok(Box::new(EchoModule::new()) as Box<dyn SimulationModule>)
    }));

    let mut sequencer = Sequencer::new(host);
    sequencer
        .start(
            &ResultsView,
            &MountTarget::default(),
            loader,
            LoadOptions::default().with_timeout(Some(Duration::from_millis(50))),
        )
        .unwrap();

    assert_eq!(sequencer.wait_for_module(WAIT), ModulePhase::Failed);
    assert_eq!(
        sequencer.handle().error(),
        Some(ModuleLoadError::TimedOut(Duration::from_millis(50)))
    );
    // The shell stays usable.
    assert!(sequencer.host().is_mounted());
}

#[test]
fn test_default_profile_boots() {
    let profile = ShellProfile::default();
    let mut host = ShellHost::new();
    let config = Registrar::configure(&mut host, &profile.theme, &profile.capabilities).unwrap();
    assert_eq!(config.capabilities().len(), Capability::ALL.len());

    let mut sequencer = Sequencer::new(host);
    sequencer
        .start(
            &ResultsView,
            &profile.mount_target(),
            Arc::new(EchoModule::loader()),
            LoadOptions::default().with_timeout(profile.module.load_timeout()),
        )
        .unwrap();
    assert_eq!(sequencer.wait_for_module(WAIT), ModulePhase::Ready);
}

#[test]
fn test_second_bootstrap_is_rejected() {
    let mut host = ShellHost::new();
    Registrar::configure(&mut host, &aura(), &["Button", "DataTable"]).unwrap();
    let mut sequencer = Sequencer::new(host);
    sequencer.bootstrap(&ResultsView, &MountTarget::default()).unwrap();

    let err = sequencer
        .bootstrap(&ResultsView, &MountTarget::new("#other"))
        .unwrap_err();
    assert!(matches!(
        err,
        BootstrapError::Mount(MountError::AlreadyMounted { .. })
    ));
}

/// Module whose `init` either rejects or panics.
struct BrokenInitModule {
    panics: bool,
}

impl SimulationModule for BrokenInitModule {
    fn init(&mut self) -> anyhow::Result<()> {
        if self.panics {
            panic!("init blew up");
        }
        anyhow::bail!("init refused")
    }

    fn greet(&self) -> String {
        "unreachable".to_string()
    }

    fn execute_simulation(&self, _request: &SimulationRequest) -> anyhow::Result<lsim::SimulationReport> {
        anyhow::bail!("not initialized")
    }
}

fn start_with_broken_init(panics: bool) -> Sequencer<ShellHost> {
    let mut host = ShellHost::new();
    Registrar::configure(&mut host, &aura(), &["Button", "DataTable"]).unwrap();
    let loader = Arc::new(FnLoader::new("broken init", move || {
        Ok(Box::new(BrokenInitModule { panics }) as Box<dyn SimulationModule>)
    }));
    let mut sequencer = Sequencer::new(host);
    sequencer
        .start(&ResultsView, &MountTarget::default(), loader, LoadOptions::default())
        .unwrap();
    sequencer
}

#[test]
fn test_rejected_init_fails_module() {
    let mut sequencer = start_with_broken_init(false);
    assert_eq!(sequencer.wait_for_module(WAIT), ModulePhase::Failed);

    let handle = sequencer.handle();
    assert_eq!(
        handle.error(),
        Some(ModuleLoadError::InitRejected("init refused".to_string()))
    );
    assert_eq!(
        handle.history(),
        vec![ModulePhase::Unloaded, ModulePhase::Loading, ModulePhase::Failed]
    );
    assert!(matches!(
        handle.invoke(|m| m.greet()),
        Err(ModuleCallError::LoadFailed(ModuleLoadError::InitRejected(_)))
    ));
    assert!(sequencer.host().is_mounted());
}

#[test]
fn test_panicking_init_fails_module() {
    let mut sequencer = start_with_broken_init(true);
    assert_eq!(sequencer.wait_for_module(WAIT), ModulePhase::Failed);
    assert_eq!(
        sequencer.handle().error(),
        Some(ModuleLoadError::Panicked("init blew up".to_string()))
    );
    assert_eq!(
        sequencer.handle().history(),
        vec![ModulePhase::Unloaded, ModulePhase::Loading, ModulePhase::Failed]
    );
}
