use crate::config::LaunchpadConfig;
use crate::error::LaunchpadError;
use crate::idle::IdleController;
use crate::layout::{ReferenceGeometry, SizeMode};
use crate::page_table::PageTable;
use crate::pages::{find_root_scenario, Page, PageId};
use crate::window::{ControlId, DialogWindow};
use log::{debug, info, warn};
use std::time::Instant;

/// Starts the simulation with a scenario
pub trait Launcher {
    fn launch(&mut self, scenario: &str) -> anyhow::Result<()>;
}

/// Dialog buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Launch,
    Exit,
    Help,
    /// Menu button of the page with this logical index
    SelectPage(usize),
}

/// Events delivered to the dialog, all on the UI thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    Command(Command),
    Resize { width: i32, height: i32, mode: SizeMode },
    /// Dialog shown (true) or hidden (false)
    Shown(bool),
    MouseMove,
    KeyDown,
    /// Idle check timer
    Timer,
    Close,
    Destroy,
}

/// What an event led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Launched(String),
    LaunchFailed(String),
    /// Close swallowed because exit is blocked in demo mode
    CloseRefused,
    Closed,
}

/// Startup options not stored in the config file
#[derive(Debug, Clone, Copy, Default)]
pub struct StartOptions {
    /// Open with the video page visible and selected
    pub start_on_video: bool,
    /// Seed for demo scenario picks
    pub seed: u64,
}

/// Progress bookkeeping while the wait page is up
#[derive(Debug, Clone, Copy)]
struct WaitProgress {
    /// Committed memory to release, in thousandths
    step: u64,
    start_usage: u64,
}

/// The launch dialog: owns the pages, their menu order, the reference
/// geometry and the demo-mode timer.
pub struct Launchpad<W: DialogWindow, L: Launcher> {
    window: W,
    launcher: L,
    config: LaunchpadConfig,
    pages: Vec<Box<dyn Page>>,
    table: PageTable,
    reference: ReferenceGeometry,
    active: usize,
    idle: IdleController,
    wait: Option<WaitProgress>,
}

impl<W: DialogWindow, L: Launcher> Launchpad<W, L> {
    /// Build the dialog and bring it on screen.
    ///
    /// `pages` are registered in logical order. The reference geometry and menu
    /// button spacing are captured from the window as it is when this is
    /// called.
    pub fn new(
        window: W,
        launcher: L,
        mut pages: Vec<Box<dyn Page>>,
        config: LaunchpadConfig,
        options: StartOptions,
        now: Instant,
    ) -> Result<Self, LaunchpadError> {
        if pages.is_empty() {
            return Err(LaunchpadError::NoPages);
        }

        for page in pages.iter_mut() {
            page.create();
            page.load_config(&config);
        }

        let reference = capture_reference(&window, pages[0].as_ref())?;
        let buttons = (0..pages.len())
            .map(|i| window.control_rect(ControlId::MenuButton(i)))
            .collect();
        let table = PageTable::new(buttons);
        let idle = IdleController::from_config(&config.demo, options.seed, now);

        let mut dialog = Self {
            window,
            launcher,
            config,
            pages,
            table,
            reference,
            active: 0,
            idle,
            wait: None,
        };

        dialog.select_page(0)?;

        if dialog.idle.is_enabled() {
            dialog.enter_demo_mode();
            if dialog.idle.arm(now) {
                dialog.window.start_timer(IdleController::TICK_PERIOD);
            }
        }

        let (width, height) = (dialog.reference.width, dialog.reference.height);
        dialog.resize(width, height, SizeMode::Restored);

        if !dialog.config.pages.show_video && dialog.has_page(PageId::Video) {
            dialog.hide_page(PageId::Video.index())?;
        }

        dialog.restore_placement();
        dialog
            .window
            .set_control_text(ControlId::Version, concat!("Launchpad ", env!("CARGO_PKG_VERSION")));
        dialog.window.show();

        if options.start_on_video && dialog.has_page(PageId::Video) {
            dialog.unhide_page(PageId::Video.index(), PageId::Video.display_name())?;
            dialog.select_page(PageId::Video.index())?;
        }

        info!("Launchpad ready with {} pages", dialog.pages.len());
        Ok(dialog)
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn config(&self) -> &LaunchpadConfig {
        &self.config
    }

    pub fn table(&self) -> &PageTable {
        &self.table
    }

    pub fn reference(&self) -> &ReferenceGeometry {
        &self.reference
    }

    pub fn idle(&self) -> &IdleController {
        &self.idle
    }

    /// Logical index of the page currently shown
    pub fn active_page(&self) -> usize {
        self.active
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn has_page(&self, id: PageId) -> bool {
        id.index() < self.pages.len()
    }

    /// Dispatch one event
    pub fn handle(&mut self, event: DialogEvent, now: Instant) -> Outcome {
        match event {
            DialogEvent::Command(command) => self.command(command),
            DialogEvent::Resize { width, height, mode } => {
                self.resize(width, height, mode);
                Outcome::Continue
            }
            DialogEvent::Shown(true) => {
                if self.idle.arm(now) {
                    self.window.start_timer(IdleController::TICK_PERIOD);
                }
                Outcome::Continue
            }
            DialogEvent::Shown(false) => {
                if self.idle.disarm() {
                    self.window.stop_timer();
                }
                Outcome::Continue
            }
            DialogEvent::MouseMove | DialogEvent::KeyDown => {
                self.idle.note_input(now);
                Outcome::Continue
            }
            DialogEvent::Timer => self.idle_tick(now),
            DialogEvent::Close => self.close(),
            DialogEvent::Destroy => {
                if self.idle.disarm() {
                    self.window.stop_timer();
                }
                Outcome::Closed
            }
        }
    }

    fn command(&mut self, command: Command) -> Outcome {
        match command {
            Command::Launch => self.launch_selected(),
            Command::Exit => self.close(),
            Command::Help => {
                if let Some(page) = self.pages.get_mut(self.active) {
                    page.open_help();
                }
                Outcome::Continue
            }
            Command::SelectPage(index) => {
                if let Err(e) = self.select_page(index) {
                    warn!("Ignoring menu selection: {}", e);
                }
                Outcome::Continue
            }
        }
    }

    fn idle_tick(&mut self, now: Instant) -> Outcome {
        let Some(scenarios) = self.pages.get_mut(0).and_then(|p| p.as_scenario()) else {
            return Outcome::Continue;
        };

        match self.idle.tick(now, scenarios.catalog_mut()) {
            Some(_) => self.launch_selected(),
            None => Outcome::Continue,
        }
    }

    /// Launch whatever the scenario page has selected
    fn launch_selected(&mut self) -> Outcome {
        let selected = self
            .pages
            .get_mut(0)
            .and_then(|p| p.as_scenario())
            .and_then(|s| s.selected_scenario());

        let Some(scenario) = selected else {
            debug!("Launch requested with no scenario selected");
            return Outcome::Continue;
        };

        self.update_config();
        info!("Launching scenario '{}'", scenario);
        match self.launcher.launch(&scenario) {
            Ok(()) => Outcome::Launched(scenario),
            Err(e) => {
                warn!("Failed to launch '{}': {:#}", scenario, e);
                Outcome::LaunchFailed(scenario)
            }
        }
    }

    fn close(&mut self) -> Outcome {
        if self.config.demo.block_exit {
            debug!("Close refused, exit is blocked in demo mode");
            return Outcome::CloseRefused;
        }

        self.update_config();
        self.window.destroy();
        if self.idle.disarm() {
            self.window.stop_timer();
        }
        Outcome::Closed
    }

    /// Collect page settings and the window placement into the config
    pub fn update_config(&mut self) {
        for page in self.pages.iter() {
            page.save_config(&mut self.config);
        }

        if !self.window.is_minimized() {
            self.config.window = Some(self.window.window_rect());
        }
    }

    /// Show one page and hide all others. Pages removed from the menu cannot
    /// be selected.
    pub fn select_page(&mut self, index: usize) -> Result<(), LaunchpadError> {
        if index >= self.pages.len() {
            return Err(LaunchpadError::UnknownPage(index));
        }
        if !self.table.is_visible(index) {
            return Err(LaunchpadError::HiddenPage(index));
        }

        for (i, page) in self.pages.iter_mut().enumerate() {
            if i != index {
                page.hide();
            }
        }
        self.pages[index].show();
        self.active = index;
        debug!("Switched to page {}", index);
        Ok(())
    }

    /// Remove a page from the menu. If it was the active page, the first page
    /// still in the menu takes over.
    pub fn hide_page(&mut self, index: usize) -> Result<(), LaunchpadError> {
        if !self.table.hide(index)? {
            return Ok(());
        }

        self.window.set_control_visible(ControlId::MenuButton(index), false);
        self.sync_buttons();
        self.window.invalidate();

        if self.active == index {
            match self.table.page_at(0) {
                Some(first) => self.select_page(first)?,
                None => warn!("Every page is hidden, page {} stays active", index),
            }
        }
        Ok(())
    }

    /// Put a page back into the menu in logical order
    pub fn unhide_page(&mut self, index: usize, label: &str) -> Result<(), LaunchpadError> {
        if !self.table.unhide(index, label)? {
            return Ok(());
        }

        self.sync_buttons();
        self.window.set_control_visible(ControlId::MenuButton(index), true);
        Ok(())
    }

    fn sync_buttons(&mut self) {
        for entry in self.table.entries() {
            if entry.is_visible() {
                self.window
                    .set_control_rect(ControlId::MenuButton(entry.logical), entry.button);
            }
        }
    }

    /// Lay the dialog out for a new client size
    pub fn resize(&mut self, width: i32, height: i32, mode: SizeMode) {
        let Some(layout) = self.reference.layout(width, height, mode) else {
            return;
        };

        let w = &mut self.window;
        w.set_control_rect(ControlId::CopyrightBox, layout.copyright);
        w.set_control_rect(ControlId::Shadow, layout.shadow);
        w.set_control_rect(ControlId::Launch, layout.launch);
        w.set_control_rect(ControlId::Help, layout.help);
        w.set_control_rect(ControlId::Exit, layout.exit);
        w.set_control_rect(ControlId::WaitPage, layout.wait);
        w.set_control_rect(ControlId::Version, layout.version);

        for page in self.pages.iter() {
            if let Some(surface) = page.surface() {
                w.set_control_rect(ControlId::Surface(surface), layout.page_area);
            }
        }
    }

    /// Lock everything but scenario selection and the about page
    fn enter_demo_mode(&mut self) {
        for id in PageId::locked_in_demo() {
            if self.has_page(id) {
                self.window
                    .set_control_enabled(ControlId::MenuButton(id.index()), false);
            }
        }
        if self.config.demo.block_exit {
            self.window.set_control_enabled(ControlId::Exit, false);
        }
        info!("Demo mode on, idle threshold {:?}", self.idle.threshold());
    }

    fn restore_placement(&mut self) {
        let Some(saved) = self.config.window else {
            return;
        };

        if let Some(rect) = saved.clamp_into(&self.window.desktop_rect()) {
            self.window.set_window_rect(rect);
        }
    }

    pub fn enable_launch_button(&mut self, enable: bool) {
        self.window.set_control_enabled(ControlId::Launch, enable);
    }

    /// Select a top-level scenario by name
    pub fn select_root_scenario(&mut self, name: &str) -> bool {
        let Some(scenarios) = self.pages.get_mut(0).and_then(|p| p.as_scenario()) else {
            return false;
        };

        match find_root_scenario(scenarios.catalog_mut(), name) {
            Some(node) => scenarios.catalog_mut().select(node),
            None => false,
        }
    }

    /// Swap the pages and buttons for the wait page while the simulation
    /// loads, or bring them back.
    ///
    /// `committed` is the memory expected to be released during the wait and
    /// `usage` the current heap usage, in the same unit.
    pub fn show_wait_page(&mut self, show: bool, committed: u64, usage: u64) {
        if show {
            for page in self.pages.iter_mut() {
                page.hide();
            }
            let step = committed / 1000;
            self.wait = Some(WaitProgress {
                step,
                start_usage: usage,
            });
            self.window
                .set_wait_progress(if step > 0 { Some(0) } else { None });
            self.window.set_control_visible(ControlId::WaitPage, true);
        } else {
            self.wait = None;
            self.window.set_control_visible(ControlId::WaitPage, false);
            let first = self.table.page_at(0).unwrap_or(0);
            if let Err(e) = self.select_page(first) {
                warn!("Could not restore first page: {}", e);
            }
        }

        for id in [ControlId::Launch, ControlId::Help, ControlId::Exit] {
            self.window.set_control_visible(id, !show);
        }
        for logical in self.table.visible_pages() {
            self.window
                .set_control_visible(ControlId::MenuButton(logical), !show);
        }
    }

    /// Advance the wait page progress bar. Returns the per-mille value shown.
    pub fn update_wait_progress(&mut self, usage: u64) -> Option<u32> {
        let wait = self.wait?;
        if wait.step == 0 {
            return None;
        }

        let released = wait.start_usage.saturating_sub(usage);
        let permille = (released / wait.step).min(1000) as u32;
        self.window.set_wait_progress(Some(permille));
        Some(permille)
    }
}

impl<W: DialogWindow, L: Launcher> Drop for Launchpad<W, L> {
    fn drop(&mut self) {
        for page in self.pages.iter_mut() {
            page.destroy();
        }
    }
}

fn capture_reference<W: DialogWindow>(
    window: &W,
    first_page: &dyn Page,
) -> Result<ReferenceGeometry, LaunchpadError> {
    let surface = first_page.surface().ok_or(LaunchpadError::MissingSurface(0))?;
    let (width, height) = window.client_size();

    Ok(ReferenceGeometry {
        width,
        height,
        copyright: window.control_rect(ControlId::CopyrightBox),
        shadow_height: window.control_rect(ControlId::Shadow).height(),
        launch: window.control_rect(ControlId::Launch),
        help: window.control_rect(ControlId::Help),
        exit: window.control_rect(ControlId::Exit),
        wait: window.control_rect(ControlId::WaitPage),
        page_area: window.control_rect(ControlId::Surface(surface)),
        version: window.control_rect(ControlId::Version),
    })
}
