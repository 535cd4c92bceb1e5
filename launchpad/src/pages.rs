use crate::catalog::{NodeId, ScenarioCatalog, ScenarioTree};
use crate::config::LaunchpadConfig;
use log::debug;

/// Opaque handle to the render surface a page draws into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

/// The fixed pages of the launch dialog, in logical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Scenario,
    Parameters,
    Visual,
    Modules,
    Video,
    Joystick,
    Extra,
    About,
}

impl PageId {
    pub const COUNT: usize = 8;

    pub fn display_name(&self) -> &'static str {
        match self {
            PageId::Scenario => "Scenarios",
            PageId::Parameters => "Parameters",
            PageId::Visual => "Visual effects",
            PageId::Modules => "Modules",
            PageId::Video => "Video",
            PageId::Joystick => "Joystick",
            PageId::Extra => "Extra",
            PageId::About => "About",
        }
    }

    pub fn all() -> Vec<PageId> {
        vec![
            PageId::Scenario,
            PageId::Parameters,
            PageId::Visual,
            PageId::Modules,
            PageId::Video,
            PageId::Joystick,
            PageId::Extra,
            PageId::About,
        ]
    }

    /// Logical index of the page
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    /// Pages whose menu buttons are locked while the dialog runs unattended
    pub fn locked_in_demo() -> Vec<PageId> {
        vec![
            PageId::Parameters,
            PageId::Visual,
            PageId::Modules,
            PageId::Video,
            PageId::Joystick,
            PageId::Extra,
        ]
    }
}

/// A settings page hosted by the launch dialog.
///
/// The dialog never looks at page content. It only drives the lifecycle
/// `create -> load_config -> show/hide -> save_config -> destroy` and sizes the
/// page's surface.
pub trait Page {
    fn create(&mut self);
    fn load_config(&mut self, config: &LaunchpadConfig);
    fn save_config(&self, config: &mut LaunchpadConfig);
    fn show(&mut self);
    fn hide(&mut self);

    /// Surface to size during layout. `None` until the page is created.
    fn surface(&self) -> Option<SurfaceHandle>;

    fn open_help(&mut self) {}

    fn destroy(&mut self) {}

    /// The scenario page exposes selection and its catalog through this
    fn as_scenario(&mut self) -> Option<&mut dyn ScenarioPage> {
        None
    }
}

/// Extra surface of the scenario page
pub trait ScenarioPage {
    /// Path of the selected scenario, if a scenario (not a folder) is selected
    fn selected_scenario(&self) -> Option<String>;

    /// Select a scenario by path; returns false if it does not exist
    fn select_scenario(&mut self, name: &str) -> bool;

    fn catalog_mut(&mut self) -> &mut dyn ScenarioCatalog;
}

/// Headless scenario page backed by an in-memory scenario tree
pub struct ScenarioListPage {
    tree: ScenarioTree,
    surface: SurfaceHandle,
    created: bool,
    visible: bool,
}

impl ScenarioListPage {
    pub fn new(tree: ScenarioTree, surface: SurfaceHandle) -> Self {
        Self {
            tree,
            surface,
            created: false,
            visible: false,
        }
    }

    pub fn tree(&self) -> &ScenarioTree {
        &self.tree
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Page for ScenarioListPage {
    fn create(&mut self) {
        self.created = true;
    }

    fn load_config(&mut self, config: &LaunchpadConfig) {
        if let Some(ref name) = config.scenario {
            if !self.select_scenario(name) {
                debug!("Last scenario '{}' is no longer available", name);
            }
        }
    }

    fn save_config(&self, config: &mut LaunchpadConfig) {
        config.scenario = self.selected_scenario();
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn surface(&self) -> Option<SurfaceHandle> {
        self.created.then_some(self.surface)
    }

    fn as_scenario(&mut self) -> Option<&mut dyn ScenarioPage> {
        Some(self)
    }
}

impl ScenarioPage for ScenarioListPage {
    fn selected_scenario(&self) -> Option<String> {
        self.tree
            .selected()
            .filter(|&node| self.tree.is_leaf(node))
            .map(|node| self.tree.path(node))
    }

    fn select_scenario(&mut self, name: &str) -> bool {
        match self.tree.find_path(name) {
            Some(node) => self.tree.select(node),
            None => false,
        }
    }

    fn catalog_mut(&mut self) -> &mut dyn ScenarioCatalog {
        &mut self.tree
    }
}

/// Look up a node by path in a catalog, for callers holding only the trait
pub fn find_root_scenario(catalog: &dyn ScenarioCatalog, name: &str) -> Option<NodeId> {
    catalog
        .roots()
        .into_iter()
        .find(|&node| catalog.is_leaf(node) && catalog.name(node).eq_ignore_ascii_case(name))
}
