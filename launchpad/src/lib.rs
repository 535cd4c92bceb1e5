// launchpad library
// Page management, resize layout and demo mode for the simulator launch dialog

pub mod catalog;
pub mod config;
pub mod dialog;
pub mod error;
pub mod geometry;
pub mod idle;
pub mod layout;
pub mod page_table;
pub mod pages;
pub mod window;

pub use catalog::{select_demo_scenario, NodeId, ScenarioCatalog, ScenarioTree};
pub use config::{ConfigManager, DemoConfig, LaunchpadConfig};
pub use dialog::{Command, DialogEvent, Launchpad, Launcher, Outcome, StartOptions};
pub use error::LaunchpadError;
pub use geometry::Rect;
pub use idle::{IdleController, IdleState};
pub use layout::{Layout, ReferenceGeometry, SizeMode};
pub use page_table::{PageEntry, PageTable};
pub use pages::{Page, PageId, ScenarioListPage, ScenarioPage, SurfaceHandle};
pub use window::{ControlId, DialogWindow};
