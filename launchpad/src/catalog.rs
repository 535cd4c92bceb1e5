use crate::error::LaunchpadError;
use log::{debug, info};
use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Name of the top-level folder that holds unattended-mode scenarios
pub const DEMO_GROUP: &str = "Demo";

/// File extension of scenario files
pub const SCENARIO_EXT: &str = "scn";

/// Handle to a node in a scenario catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Read-only tree traversal over the scenario list, plus selection
pub trait ScenarioCatalog {
    /// Top-level nodes in display order
    fn roots(&self) -> Vec<NodeId>;
    /// Direct children in display order
    fn children(&self, node: NodeId) -> Vec<NodeId>;
    fn name(&self, node: NodeId) -> &str;
    fn is_leaf(&self, node: NodeId) -> bool;
    /// Mark a node selected; returns false if the node is unknown
    fn select(&mut self, node: NodeId) -> bool;
}

/// Pick a random scenario from the "Demo" group and select it.
///
/// Only direct children without children of their own are candidates. Returns
/// the selected node's name, or `None` if there is no demo group or it holds no
/// scenarios.
pub fn select_demo_scenario<C, R>(catalog: &mut C, rng: &mut R) -> Option<String>
where
    C: ScenarioCatalog + ?Sized,
    R: Rng + ?Sized,
{
    let demo = catalog
        .roots()
        .into_iter()
        .find(|&node| catalog.name(node).eq_ignore_ascii_case(DEMO_GROUP))?;

    let candidates: Vec<NodeId> = catalog
        .children(demo)
        .into_iter()
        .filter(|&node| catalog.is_leaf(node))
        .collect();

    if candidates.is_empty() {
        debug!("Demo group has no scenarios");
        return None;
    }

    let pick = candidates[rng.random_range(0..candidates.len())];
    if !catalog.select(pick) {
        return None;
    }

    let name = catalog.name(pick).to_string();
    info!("Picked demo scenario '{}' ({} candidates)", name, candidates.len());
    Some(name)
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Groups are never launchable, even when empty
    folder: bool,
}

/// In-memory scenario catalog
#[derive(Debug, Clone, Default)]
pub struct ScenarioTree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    selected: Option<NodeId>,
}

impl ScenarioTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level scenario
    pub fn add_root(&mut self, name: &str) -> NodeId {
        self.insert(None, name, false)
    }

    /// Add a top-level group
    pub fn add_root_group(&mut self, name: &str) -> NodeId {
        self.insert(None, name, true)
    }

    /// Add a scenario under `parent`. A scenario given children this way
    /// becomes a group.
    pub fn add_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.insert(Some(parent), name, false)
    }

    /// Add a group under `parent`
    pub fn add_group(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.insert(Some(parent), name, true)
    }

    fn insert(&mut self, parent: Option<NodeId>, name: &str, folder: bool) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            folder,
        });

        match parent {
            Some(parent) => {
                let node = &mut self.nodes[parent.0];
                node.folder = true;
                node.children.push(id);
            }
            None => self.roots.push(id),
        }
        id
    }

    /// Build the catalog from a scenario folder.
    ///
    /// Sub-folders become groups and `*.scn` files become scenarios named after
    /// their file stem. Within a folder, sub-folders come first, then files, each
    /// sorted by name.
    pub fn scan(dir: &Path) -> Result<Self, LaunchpadError> {
        let mut tree = Self::new();
        let mut folders: HashMap<PathBuf, NodeId> = HashMap::new();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .sort_by(|a, b| folders_first(a, b));

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            let is_dir = entry.file_type().is_dir();
            let name = if is_dir {
                entry.file_name().to_string_lossy().to_string()
            } else if path.extension().is_some_and(|ext| ext == SCENARIO_EXT) {
                match path.file_stem() {
                    Some(stem) => stem.to_string_lossy().to_string(),
                    None => continue,
                }
            } else {
                continue;
            };

            let parent = path.parent().and_then(|p| folders.get(p)).copied();
            let id = tree.insert(parent, &name, is_dir);

            if is_dir {
                folders.insert(path.to_path_buf(), id);
            }
        }

        info!("Scanned {} scenario entries from {:?}", tree.len(), dir);
        Ok(tree)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Slash-separated path from the top level down to `node`
    pub fn path(&self, node: NodeId) -> String {
        let mut parts = Vec::new();
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            let n = &self.nodes[id.0];
            parts.push(n.name.as_str());
            cursor = n.parent;
        }
        parts.reverse();
        parts.join("/")
    }

    /// Resolve a slash-separated path, matching names case-insensitively.
    ///
    /// A group and a scenario may share a name (`Orbit/` next to
    /// `Orbit.scn`). Inner components resolve to groups, the last one to the
    /// scenario if there is one.
    pub fn find_path(&self, path: &str) -> Option<NodeId> {
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        let (last, inner) = parts.split_last()?;

        let mut level = self.roots.as_slice();
        for part in inner {
            let group = self.find_in(level, part, true)?;
            level = &self.nodes[group.0].children;
        }

        self.find_in(level, last, false)
            .or_else(|| self.find_in(level, last, true))
    }

    fn find_in(&self, level: &[NodeId], name: &str, folder: bool) -> Option<NodeId> {
        level.iter().copied().find(|id| {
            let node = &self.nodes[id.0];
            node.folder == folder && node.name.eq_ignore_ascii_case(name)
        })
    }
}

fn folders_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_dir = a.file_type().is_dir();
    let b_dir = b.file_type().is_dir();
    b_dir.cmp(&a_dir).then_with(|| a.file_name().cmp(b.file_name()))
}

impl ScenarioCatalog for ScenarioTree {
    fn roots(&self) -> Vec<NodeId> {
        self.roots.clone()
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node.0)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn name(&self, node: NodeId) -> &str {
        self.nodes.get(node.0).map(|n| n.name.as_str()).unwrap_or("")
    }

    fn is_leaf(&self, node: NodeId) -> bool {
        self.nodes.get(node.0).is_some_and(|n| !n.folder)
    }

    fn select(&mut self, node: NodeId) -> bool {
        if node.0 >= self.nodes.len() {
            return false;
        }
        self.selected = Some(node);
        true
    }
}
