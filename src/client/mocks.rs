//! In-memory [`Page`] for driving the client components in tests.
//!
//! Events are delivered from spawned tasks, so a tokio runtime is required
//! whenever a script or iframe is inserted. Pair with
//! `#[tokio::test(start_paused = true)]` to make timeouts instant.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::client::page::{IframeSpec, LoadEvent, LoadListener, NodeId, Page};

/// How an inserted script or iframe reacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeBehavior {
    Load,
    Error,
    /// Never signals.
    Hang,
    /// Signals `event` after the given delay.
    Delayed(Duration, LoadEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Script(String),
    Iframe { container_id: String, spec: IframeSpec },
    Bait,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    behavior: NodeBehavior,
    /// Markup written into a container when the node loads.
    renders: Option<(String, String)>,
}

#[derive(Default)]
struct MockState {
    containers: HashMap<String, String>,
    nodes: HashMap<NodeId, NodeKind>,
    next_node: NodeId,
    scripts: HashMap<String, VecDeque<Rule>>,
    iframes: HashMap<String, NodeBehavior>,
    script_attempts: HashMap<String, u32>,
    bait_hidden: bool,
    baits_removed: u32,
    builtin_blocker: bool,
    overlays: Vec<(String, String)>,
    overlay_ids: HashSet<String>,
    scroll_locked: bool,
    /// Listeners of hanging nodes, kept alive so they can never fire.
    hanging: Vec<LoadListener>,
}

/// Scriptable fake document.
///
/// Unknown scripts and iframes load successfully. A script configured with
/// a sequence uses one entry per attempt and repeats the last one.
#[derive(Clone, Default)]
pub struct MockPage {
    state: Arc<Mutex<MockState>>,
}

impl fmt::Debug for MockPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("MockPage")
            .field("containers", &state.containers)
            .field("nodes", &state.nodes.len())
            .field("overlays", &state.overlays.len())
            .finish_non_exhaustive()
    }
}

impl MockPage {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_container(self, id: &str, html: &str) -> Self {
        self.state()
            .containers
            .insert(id.to_string(), html.to_string());
        self
    }

    pub fn with_script(self, url: &str, behavior: NodeBehavior) -> Self {
        self.with_script_sequence(url, [behavior])
    }

    pub fn with_script_sequence(
        self,
        url: &str,
        behaviors: impl IntoIterator<Item = NodeBehavior>,
    ) -> Self {
        let rules = behaviors
            .into_iter()
            .map(|behavior| Rule {
                behavior,
                renders: None,
            })
            .collect();
        self.state().scripts.insert(url.to_string(), rules);
        self
    }

    /// Script that loads and then writes `html` into `container_id`.
    pub fn with_rendering_script(self, url: &str, container_id: &str, html: &str) -> Self {
        let rule = Rule {
            behavior: NodeBehavior::Load,
            renders: Some((container_id.to_string(), html.to_string())),
        };
        self.state()
            .scripts
            .insert(url.to_string(), VecDeque::from([rule]));
        self
    }

    pub fn with_iframe(self, src: &str, behavior: NodeBehavior) -> Self {
        self.state().iframes.insert(src.to_string(), behavior);
        self
    }

    /// Makes bait elements render with zero size.
    pub fn with_hidden_bait(self) -> Self {
        self.state().bait_hidden = true;
        self
    }

    pub fn with_builtin_blocker(self) -> Self {
        self.state().builtin_blocker = true;
        self
    }

    pub fn script_attempts(&self, url: &str) -> u32 {
        self.state().script_attempts.get(url).copied().unwrap_or(0)
    }

    /// Scripts currently attached to the document.
    pub fn attached_scripts(&self) -> usize {
        self.state()
            .nodes
            .values()
            .filter(|kind| matches!(kind, NodeKind::Script(_)))
            .count()
    }

    pub fn container(&self, id: &str) -> Option<String> {
        self.state().containers.get(id).cloned()
    }

    pub fn iframes_in(&self, container_id: &str) -> Vec<IframeSpec> {
        let state = self.state();
        let mut nodes: Vec<_> = state
            .nodes
            .iter()
            .filter_map(|(id, kind)| match kind {
                NodeKind::Iframe {
                    container_id: c,
                    spec,
                } if c == container_id => Some((*id, spec.clone())),
                _ => None,
            })
            .collect();
        nodes.sort_by_key(|(id, _)| *id);
        nodes.into_iter().map(|(_, spec)| spec).collect()
    }

    pub fn overlays(&self) -> Vec<(String, String)> {
        self.state().overlays.clone()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.state().scroll_locked
    }

    pub fn baits_attached(&self) -> usize {
        self.state()
            .nodes
            .values()
            .filter(|kind| matches!(kind, NodeKind::Bait))
            .count()
    }

    pub fn baits_removed(&self) -> u32 {
        self.state().baits_removed
    }

    fn insert_node(&self, kind: NodeKind) -> NodeId {
        let mut state = self.state();
        state.next_node += 1;
        let id = state.next_node;
        state.nodes.insert(id, kind);
        id
    }

    fn deliver(&self, rule: Rule, listener: LoadListener) {
        let event = match rule.behavior {
            NodeBehavior::Hang => {
                self.state().hanging.push(listener);
                return;
            }
            NodeBehavior::Load => (Duration::ZERO, LoadEvent::Load),
            NodeBehavior::Error => (Duration::ZERO, LoadEvent::Error),
            NodeBehavior::Delayed(delay, event) => (delay, event),
        };

        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let (delay, event) = event;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if event == LoadEvent::Load
                && let Some((container_id, html)) = rule.renders
            {
                state
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .containers
                    .insert(container_id, html);
            }
            listener(event);
        });
    }
}

impl Page for MockPage {
    fn has_container(&self, container_id: &str) -> bool {
        self.state().containers.contains_key(container_id)
    }

    fn container_html(&self, container_id: &str) -> Option<String> {
        self.container(container_id)
    }

    fn set_container_html(&self, container_id: &str, html: &str) -> bool {
        let mut state = self.state();
        let Some(slot) = state.containers.get_mut(container_id) else {
            return false;
        };
        *slot = html.to_string();

        // Replacing markup detaches the frames inside
        state.nodes.retain(|_, kind| {
            !matches!(kind, NodeKind::Iframe { container_id: c, .. } if c == container_id)
        });
        true
    }

    fn append_script(&self, src: &str, _is_async: bool, listener: LoadListener) -> NodeId {
        let rule = {
            let mut state = self.state();
            *state.script_attempts.entry(src.to_string()).or_default() += 1;

            match state.scripts.get_mut(src) {
                Some(rules) if rules.len() > 1 => rules.pop_front(),
                Some(rules) => rules.front().cloned(),
                None => None,
            }
        }
        .unwrap_or(Rule {
            behavior: NodeBehavior::Load,
            renders: None,
        });

        let id = self.insert_node(NodeKind::Script(src.to_string()));
        self.deliver(rule, listener);
        id
    }

    fn insert_iframe(
        &self,
        container_id: &str,
        spec: &IframeSpec,
        listener: LoadListener,
    ) -> Option<NodeId> {
        if !self.has_container(container_id) {
            return None;
        }

        let behavior = self
            .state()
            .iframes
            .get(&spec.src)
            .copied()
            .unwrap_or(NodeBehavior::Load);

        let id = self.insert_node(NodeKind::Iframe {
            container_id: container_id.to_string(),
            spec: spec.clone(),
        });
        self.deliver(
            Rule {
                behavior,
                renders: None,
            },
            listener,
        );
        Some(id)
    }

    fn remove_node(&self, node: NodeId) {
        let mut state = self.state();
        if let Some(NodeKind::Bait) = state.nodes.remove(&node) {
            state.baits_removed += 1;
        }
    }

    fn insert_bait(&self, _class_names: &str, _style: &str) -> NodeId {
        self.insert_node(NodeKind::Bait)
    }

    fn rendered_size(&self, node: NodeId) -> Option<(u32, u32)> {
        let state = self.state();
        match state.nodes.get(&node) {
            Some(NodeKind::Bait) if state.bait_hidden => Some((0, 0)),
            Some(_) => Some((1, 1)),
            None => None,
        }
    }

    fn has_builtin_blocker(&self) -> bool {
        self.state().builtin_blocker
    }

    fn show_overlay(&self, id: &str, html: &str) -> bool {
        let mut state = self.state();
        if !state.overlay_ids.insert(id.to_string()) {
            return false;
        }
        state.overlays.push((id.to_string(), html.to_string()));
        true
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.state().scroll_locked = locked;
    }
}
