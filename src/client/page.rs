//! Port for the document the client components run in.
//!
//! Ad loading and blocker detection only touch the page through this trait.
//! Load and error notifications are delivered through a one-shot
//! [`LoadListener`] registered when the node is inserted.

use std::fmt::Debug;

/// Handle of a node inserted through the page.
pub type NodeId = u64;

/// Outcome signalled by an inserted script or iframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadEvent {
    Load,
    Error,
}

/// Called at most once with the node's first load or error event.
pub type LoadListener = Box<dyn FnOnce(LoadEvent) + Send + 'static>;

/// Frame inserted into an ad container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IframeSpec {
    pub src: String,
    pub width: u32,
    pub height: u32,
}

/// Port for DOM access.
///
/// Implementations must deliver listener calls after the inserting method
/// has returned or synchronously from within it; both are handled.
pub trait Page: Send + Sync + Debug {
    fn has_container(&self, container_id: &str) -> bool;

    /// Current markup of a container, or `None` if it does not exist.
    fn container_html(&self, container_id: &str) -> Option<String>;

    /// Replaces the markup of a container. Returns `false` if it does not exist.
    fn set_container_html(&self, container_id: &str, html: &str) -> bool;

    /// Appends a `<script>` to the document head.
    fn append_script(&self, src: &str, is_async: bool, listener: LoadListener) -> NodeId;

    /// Appends an iframe to an (already cleared) container.
    ///
    /// Returns `None` and drops the listener if the container does not exist.
    fn insert_iframe(
        &self,
        container_id: &str,
        spec: &IframeSpec,
        listener: LoadListener,
    ) -> Option<NodeId>;

    /// Detaches a node. Removing an unknown node is a no-op.
    fn remove_node(&self, node: NodeId);

    /// Appends an element with the given classes and inline style to the body.
    fn insert_bait(&self, class_names: &str, style: &str) -> NodeId;

    /// Rendered `(width, height)` of a node, `None` when detached or not rendered.
    fn rendered_size(&self, node: NodeId) -> Option<(u32, u32)>;

    /// Whether the browser advertises built-in ad blocking.
    fn has_builtin_blocker(&self) -> bool;

    /// Appends a full-screen overlay unless an element with `id` already
    /// exists. Returns `true` if the overlay was added.
    fn show_overlay(&self, id: &str, html: &str) -> bool;

    fn set_scroll_locked(&self, locked: bool);
}
