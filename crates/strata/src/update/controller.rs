//! The update controller.

use std::fmt;
use std::sync::Arc;

use strata_core::logging::{span_names, targets};
use strata_core::{
    Checks, EngineConfig, Mailbox, PerfSpan, Signal, Size, ThreadAffinity, Violation,
};

use super::diff::{DiffEngine, EditScript, KeyedDiff};
use super::handle::ControllerHandle;
use super::host::{
    Edge, ItemMoved, ListHost, ScrollPosition, ScrollRequest, ScrollTarget, SnapshotApplied, Transition,
    TransitionAttributes, TransitionCompletion, TransitionCustomizer,
};
use super::queue::{Action, ActionQueue, Completion, InFlight, UpdateState};
use crate::model::{IndexPath, ItemModel, Section, Snapshot};
use crate::render::{BindMode, RendererRegistry};
use crate::sizing::{
    snapshot_axis, FillerResolution, FillerSizing, RelativeFallback, SectionLayout, SizeController,
    SizeDelegate, Supplementary,
};

/// Owns the applied snapshot and serializes every change to it.
///
/// Operations run immediately while the controller is idle. While a
/// transition is in flight they wait in a FIFO queue and replay one at a
/// time, each strictly after the previous operation's completion callback.
///
/// The controller is pinned to the thread that created it. Other threads
/// reach it through a [`ControllerHandle`], whose calls run when the owner
/// calls [`process_posted`](Self::process_posted).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use strata::model::{identical_by_eq, ItemModel, IndexPath, Section};
/// use strata::render::{AnyRenderer, RendererRegistry};
/// use strata::update::{ListHost, ScrollRequest, Transition, TransitionCompletion, UpdateController};
/// use strata_core::EngineConfig;
///
/// #[derive(Debug, PartialEq)]
/// struct Row(&'static str);
///
/// impl ItemModel for Row {
///     fn identifier(&self) -> &str { self.0 }
///     fn identical(&self, other: &dyn ItemModel) -> bool { identical_by_eq(self, other) }
/// }
///
/// #[derive(Default)]
/// struct Host { applied: usize }
///
/// impl ListHost for Host {
///     fn perform_updates(&mut self, _t: &Transition) -> TransitionCompletion {
///         self.applied += 1;
///         TransitionCompletion::Immediate
///     }
///     fn perform_reload(&mut self) -> TransitionCompletion { TransitionCompletion::Immediate }
///     fn scroll_to(&mut self, _request: &ScrollRequest) {}
///     fn visible_renderers(&mut self, _visit: &mut dyn FnMut(IndexPath, &mut dyn AnyRenderer)) {}
///     fn invalidate_layout(&mut self) {}
/// }
///
/// let mut controller = UpdateController::new(
///     Host::default(),
///     Arc::new(RendererRegistry::new()),
///     EngineConfig::default(),
/// );
/// controller.update_snapshot(vec![Section::new("s").with_item(Row("a"))], false, None);
/// assert_eq!(controller.snapshot().item_count(), 1);
/// assert_eq!(controller.host().applied, 1);
/// ```
pub struct UpdateController<H: ListHost> {
    host: H,
    snapshot: Snapshot,
    state: UpdateState,
    in_flight: Option<InFlight>,
    queue: ActionQueue,
    draining: bool,
    sizes: SizeController,
    diff: Box<dyn DiffEngine>,
    customizer: Option<Box<dyn TransitionCustomizer>>,
    fillers: Option<FillerResolution>,
    config: EngineConfig,
    mailbox: Mailbox<Self>,
    item_moved: Signal<ItemMoved>,
    snapshot_applied: Signal<SnapshotApplied>,
    affinity: ThreadAffinity,
}

impl<H: ListHost> UpdateController<H> {
    /// Create a controller driving `host`, measuring with renderers from
    /// `registry`. Starts with an empty snapshot and the [`KeyedDiff`]
    /// engine.
    pub fn new(host: H, registry: Arc<RendererRegistry>, config: EngineConfig) -> Self {
        let checks = Checks::new(config.checks);
        let sizes = SizeController::with_checks(registry, &config, checks);

        tracing::debug!(
            target: targets::UPDATE,
            checks = ?config.checks,
            filler_sizing = config.filler_sizing,
            "update controller created"
        );

        Self {
            host,
            snapshot: Snapshot::default(),
            state: UpdateState::Idle,
            in_flight: None,
            queue: ActionQueue::default(),
            draining: false,
            sizes,
            diff: Box::new(KeyedDiff),
            customizer: None,
            fillers: None,
            config,
            mailbox: Mailbox::new(),
            item_moved: Signal::new(),
            snapshot_applied: Signal::new(),
            affinity: ThreadAffinity::current(),
        }
    }

    /// Use `engine` to compute edit scripts.
    pub fn with_diff_engine(mut self, engine: impl DiffEngine + 'static) -> Self {
        self.diff = Box::new(engine);
        self
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Replace the snapshot with `sections`.
    ///
    /// Identifiers are validated when checks are enabled; the host receives
    /// the edit script from the current snapshot and `completion` runs after
    /// the new snapshot is installed.
    pub fn update_snapshot(
        &mut self,
        sections: impl Into<Snapshot>,
        animated: bool,
        completion: Option<Completion>,
    ) {
        self.submit(Action::UpdateSnapshot {
            snapshot: sections.into(),
            animated,
            completion,
        });
    }

    /// Re-measure and rebind everything on screen, then ask the host to
    /// reload.
    pub fn reload(&mut self, completion: Option<Completion>) {
        self.submit(Action::Reload { completion });
    }

    /// Remove the item at `at`, dropping its section if it becomes empty.
    ///
    /// `animated` defaults to the configured `animate_removals`. A location
    /// outside the snapshot is reported and `completion` runs without any
    /// change.
    pub fn remove_item(&mut self, at: IndexPath, animated: Option<bool>, completion: Option<Completion>) {
        let animated = animated.unwrap_or(self.config.animate_removals);
        self.submit(Action::RemoveItem {
            at,
            animated,
            completion,
        });
    }

    /// Scroll to an item or an edge.
    pub fn scroll_to(&mut self, target: impl Into<ScrollTarget>, animated: bool) {
        self.submit(Action::ScrollTo {
            target: target.into(),
            animated,
        });
    }

    /// Tell every visible renderer it is about to be displayed.
    pub fn will_display(&mut self) {
        self.submit(Action::WillDisplay);
    }

    /// Tell every visible renderer it left the screen.
    pub fn did_end_displaying(&mut self) {
        self.submit(Action::DidEndDisplaying);
    }

    /// Drop cached sizes and ask the host for a new layout pass.
    pub fn invalidate_layout(&mut self) {
        self.submit(Action::InvalidateLayout);
    }

    /// Record a reorder the user performed in the view.
    ///
    /// `to` is the item's final position. The snapshot is rebuilt without a
    /// host transition and [`item_moved`](Self::item_moved) fires.
    pub fn move_item(&mut self, from: IndexPath, to: IndexPath) {
        self.submit(Action::MoveItem { from, to });
    }

    /// Complete the transition in flight.
    ///
    /// Hosts that answered [`TransitionCompletion::Deferred`] call this when
    /// their animation ends. The pending snapshot is installed, the
    /// operation's completion runs, then queued operations resume.
    pub fn finish_transition(&mut self) {
        self.affinity.debug_assert_same_thread();
        let Some(in_flight) = self.in_flight.take() else {
            tracing::warn!(target: targets::UPDATE, "finish_transition called with nothing in flight");
            return;
        };

        if let Some(next) = in_flight.pending {
            self.install(next);
        }
        self.state = UpdateState::Idle;
        tracing::trace!(target: targets::UPDATE, queued = self.queue.len(), "transition finished");

        if let Some(completion) = in_flight.completion {
            completion();
        }
        self.drain();
    }

    /// A `Send` handle for reaching this controller from other threads.
    pub fn handle(&self) -> ControllerHandle<H>
    where
        H: 'static,
    {
        ControllerHandle::new(self.mailbox.poster())
    }

    /// Run everything posted through handles, in posting order.
    ///
    /// Returns the number of invocations run.
    pub fn process_posted(&mut self) -> usize {
        self.affinity.debug_assert_same_thread();
        let pending = self.mailbox.take_pending();
        let count = pending.len();
        for invocation in pending {
            invocation.execute(self);
        }
        count
    }

    // =========================================================================
    // Sizing queries
    // =========================================================================

    /// Size of the item at `at` inside `container`.
    ///
    /// While a transition is in flight this answers for the incoming
    /// snapshot. Relative items without a delegate answer take a filler share
    /// when filler sizing is enabled.
    pub fn size_for_item(&mut self, at: IndexPath, container: Size) -> Size {
        self.affinity.debug_assert_same_thread();
        let fallback = self.relative_fallback(container);
        let snapshot = sizing_snapshot(&self.in_flight, &self.snapshot);
        match snapshot.section(at.section) {
            Some(section) => self.sizes.size_of_item_with(section, at, container, fallback),
            None => {
                self.sizes.checks().report(Violation::MissingLocation {
                    section: at.section,
                    item: at.item,
                });
                Size::new(self.sizes.minimum_dimension(), self.sizes.minimum_dimension())
            }
        }
    }

    /// Size of the header of section `section`, if it has one.
    pub fn size_for_header(&mut self, section: usize, container: Size) -> Option<Size> {
        self.supplementary_size(section, Supplementary::Header, container)
    }

    /// Size of the footer of section `section`, if it has one.
    pub fn size_for_footer(&mut self, section: usize, container: Size) -> Option<Size> {
        self.supplementary_size(section, Supplementary::Footer, container)
    }

    fn supplementary_size(&mut self, section: usize, kind: Supplementary, container: Size) -> Option<Size> {
        self.affinity.debug_assert_same_thread();
        let snapshot = sizing_snapshot(&self.in_flight, &self.snapshot);
        let section = snapshot.section(section)?;
        self.sizes.size_of_supplementary(section, kind, container)
    }

    /// Total size of the content: the container cross length by the summed
    /// section lengths.
    pub fn content_size(&mut self, container: Size) -> Size {
        self.affinity.debug_assert_same_thread();
        let fallback = self.relative_fallback(container);
        let snapshot = sizing_snapshot(&self.in_flight, &self.snapshot);
        let axis = snapshot_axis(snapshot);

        let along: f32 = snapshot
            .sections()
            .iter()
            .enumerate()
            .map(|(index, section)| {
                axis.along_of(self.sizes.size_of_section_with(section, index, container, fallback))
            })
            .sum();
        axis.size(axis.cross_of(container), along)
    }

    /// Frames of every section, stacked along the scroll axis.
    pub fn layout(&mut self, container: Size) -> Vec<SectionLayout> {
        self.affinity.debug_assert_same_thread();
        let fallback = self.relative_fallback(container);
        let snapshot = sizing_snapshot(&self.in_flight, &self.snapshot);
        let axis = snapshot_axis(snapshot);

        let mut offset = 0.0;
        let mut layouts = Vec::with_capacity(snapshot.len());
        for (index, section) in snapshot.sections().iter().enumerate() {
            let layout = self
                .sizes
                .layout_section_with(section, index, container, fallback)
                .translated(axis, offset);
            offset += axis.along_of(layout.size);
            layouts.push(layout);
        }
        layouts
    }

    /// The filler share for `container`, cached until the snapshot, the
    /// delegate or the layout changes.
    pub fn filler_resolution(&mut self, container: Size) -> FillerResolution {
        self.affinity.debug_assert_same_thread();
        if let Some(cached) = self.fillers.filter(|f| f.container == container) {
            return cached;
        }
        let snapshot = sizing_snapshot(&self.in_flight, &self.snapshot);
        let resolution = FillerSizing::resolve(&mut self.sizes, snapshot, container);
        self.fillers = Some(resolution);
        resolution
    }

    fn relative_fallback(&mut self, container: Size) -> RelativeFallback {
        if self.config.filler_sizing {
            RelativeFallback::Fixed(self.filler_resolution(container).size)
        } else {
            RelativeFallback::Template
        }
    }

    // =========================================================================
    // Configuration & accessors
    // =========================================================================

    /// Install or remove the size delegate for relative items.
    pub fn set_size_delegate(&mut self, delegate: Option<Box<dyn SizeDelegate>>) {
        self.sizes.set_size_delegate(delegate);
        self.fillers = None;
    }

    /// Install or remove per-item transition attributes.
    pub fn set_transition_customizer(&mut self, customizer: Option<Box<dyn TransitionCustomizer>>) {
        self.affinity.debug_assert_same_thread();
        self.customizer = customizer;
    }

    /// The installed snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// The snapshot waiting for its transition to finish.
    pub fn pending_snapshot(&self) -> Option<&Snapshot> {
        self.in_flight.as_ref().and_then(|f| f.pending.as_ref())
    }

    /// Whether a transition is in flight.
    pub fn is_updating(&self) -> bool {
        self.state == UpdateState::Updating
    }

    /// The queue state.
    pub fn state(&self) -> UpdateState {
        self.state
    }

    /// Number of operations waiting behind the one in flight.
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The size controller.
    pub fn sizes(&self) -> &SizeController {
        &self.sizes
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The violation reporter shared with the size controller.
    pub fn checks(&self) -> &Checks {
        self.sizes.checks()
    }

    /// Emitted for every reported violation.
    pub fn violation_reported(&self) -> &Signal<Violation> {
        self.sizes.checks().violations()
    }

    /// Emitted after a user reorder is recorded.
    pub fn item_moved(&self) -> &Signal<ItemMoved> {
        &self.item_moved
    }

    /// Emitted after a snapshot is installed.
    pub fn snapshot_applied(&self) -> &Signal<SnapshotApplied> {
        &self.snapshot_applied
    }

    // =========================================================================
    // Queue
    // =========================================================================

    fn submit(&mut self, action: Action) {
        self.affinity.debug_assert_same_thread();
        self.queue.push(action);
        self.drain();
    }

    fn drain(&mut self) {
        if self.draining {
            return;
        }
        self.draining = true;
        while self.state == UpdateState::Idle {
            let Some(action) = self.queue.pop() else {
                break;
            };
            tracing::trace!(target: targets::UPDATE, action = action.name(), "running action");
            self.run(action);
        }
        self.draining = false;
    }

    fn run(&mut self, action: Action) {
        match action {
            Action::UpdateSnapshot {
                snapshot,
                animated,
                completion,
            } => self.begin_update(snapshot, animated, completion),
            Action::Reload { completion } => self.begin_reload(completion),
            Action::RemoveItem {
                at,
                animated,
                completion,
            } => match self.snapshot.without_item(at) {
                Some(next) => self.begin_update(next, animated, completion),
                None => {
                    self.sizes.checks().report(Violation::MissingLocation {
                        section: at.section,
                        item: at.item,
                    });
                    if let Some(completion) = completion {
                        completion();
                    }
                }
            },
            Action::ScrollTo { target, animated } => self.apply_scroll(&target, animated),
            Action::WillDisplay => self
                .host
                .visible_renderers(&mut |_, renderer| renderer.will_display()),
            Action::DidEndDisplaying => self
                .host
                .visible_renderers(&mut |_, renderer| renderer.did_end_displaying()),
            Action::InvalidateLayout => {
                self.sizes.clear_cache();
                self.fillers = None;
                self.host.invalidate_layout();
            }
            Action::MoveItem { from, to } => self.apply_move(from, to),
        }
    }

    fn begin_update(&mut self, next: Snapshot, animated: bool, completion: Option<Completion>) {
        let _span = PerfSpan::new(span_names::APPLY_SNAPSHOT);
        next.validate(self.sizes.checks());

        let script = self.diff.diff(self.snapshot.sections(), next.sections());
        let (entering, exiting) = self.customize(&next, &script);
        tracing::debug!(
            target: targets::UPDATE,
            sections = next.len(),
            items = next.item_count(),
            changes = script.change_count(),
            animated,
            "applying snapshot"
        );

        let transition = Transition {
            old: self.snapshot.clone(),
            new: next.clone(),
            script,
            animated,
            entering,
            exiting,
        };

        self.state = UpdateState::Updating;
        self.in_flight = Some(InFlight {
            pending: Some(next),
            completion,
        });
        match self.host.perform_updates(&transition) {
            TransitionCompletion::Immediate => self.finish_transition(),
            TransitionCompletion::Deferred => {
                tracing::trace!(target: targets::UPDATE, "host deferred transition");
            }
        }
    }

    fn begin_reload(&mut self, completion: Option<Completion>) {
        self.fillers = None;
        self.sizes.clear_measurements();

        let snapshot = &self.snapshot;
        let mut rebound = 0usize;
        self.host.visible_renderers(&mut |at, renderer| {
            let Some(item) = snapshot.item(at) else {
                return;
            };
            if renderer.bind_item(item.as_ref(), BindMode::Display) {
                rebound += 1;
            } else {
                tracing::warn!(
                    target: targets::UPDATE,
                    identifier = item.identifier(),
                    renderer = renderer.item_kind().name(),
                    "visible renderer does not match item kind"
                );
            }
        });
        tracing::debug!(target: targets::UPDATE, rebound, "reloading");

        self.state = UpdateState::Updating;
        self.in_flight = Some(InFlight {
            pending: None,
            completion,
        });
        match self.host.perform_reload() {
            TransitionCompletion::Immediate => self.finish_transition(),
            TransitionCompletion::Deferred => {
                tracing::trace!(target: targets::UPDATE, "host deferred reload");
            }
        }
    }

    fn install(&mut self, next: Snapshot) {
        self.sizes.retain_measurements(&next);
        self.fillers = None;
        self.snapshot = next;
        self.snapshot_applied.emit(SnapshotApplied {
            sections: self.snapshot.len(),
            items: self.snapshot.item_count(),
        });
    }

    fn apply_scroll(&mut self, target: &ScrollTarget, animated: bool) {
        let position = match target {
            ScrollTarget::Item(identifier) => match self.snapshot.index_path_of(identifier) {
                Some(at) => ScrollPosition::Item(at),
                None => {
                    self.sizes.checks().report(Violation::UnknownItem {
                        identifier: identifier.clone(),
                    });
                    return;
                }
            },
            ScrollTarget::IndexPath(at) => {
                if self.snapshot.item(*at).is_none() {
                    self.sizes.checks().report(Violation::MissingLocation {
                        section: at.section,
                        item: at.item,
                    });
                    return;
                }
                ScrollPosition::Item(*at)
            }
            ScrollTarget::Edge(Edge::Top) => ScrollPosition::Top,
            ScrollTarget::Edge(Edge::Bottom) => ScrollPosition::Bottom,
        };
        self.host.scroll_to(&ScrollRequest { position, animated });
    }

    fn apply_move(&mut self, from: IndexPath, to: IndexPath) {
        let Some(identifier) = self.snapshot.item(from).map(|item| item.identifier().to_owned()) else {
            self.sizes.checks().report(Violation::MissingLocation {
                section: from.section,
                item: from.item,
            });
            return;
        };
        let Some(next) = self.snapshot.moving_item(from, to) else {
            self.sizes.checks().report(Violation::MissingLocation {
                section: to.section,
                item: to.item,
            });
            return;
        };

        tracing::debug!(target: targets::UPDATE, %identifier, %from, %to, "item moved");
        self.snapshot = next;
        self.fillers = None;
        self.item_moved.emit(ItemMoved { identifier, from, to });
    }

    fn customize(
        &self,
        next: &Snapshot,
        script: &EditScript,
    ) -> (Vec<(IndexPath, TransitionAttributes)>, Vec<(IndexPath, TransitionAttributes)>) {
        let Some(customizer) = self.customizer.as_deref() else {
            return (Vec::new(), Vec::new());
        };

        let entering = script
            .item_inserts
            .iter()
            .copied()
            .chain(items_of_sections(next, &script.section_inserts))
            .filter_map(|at| {
                let item = next.item(at)?;
                customizer.entering(item, at).map(|attributes| (at, attributes))
            })
            .collect();

        let exiting = script
            .item_removes
            .iter()
            .copied()
            .chain(items_of_sections(&self.snapshot, &script.section_removes))
            .filter_map(|at| {
                let item = self.snapshot.item(at)?;
                customizer.exiting(item, at).map(|attributes| (at, attributes))
            })
            .collect();

        (entering, exiting)
    }
}

/// The snapshot sizing queries answer for: the incoming one while a
/// transition is in flight.
fn sizing_snapshot<'a>(in_flight: &'a Option<InFlight>, current: &'a Snapshot) -> &'a Snapshot {
    in_flight
        .as_ref()
        .and_then(|f| f.pending.as_ref())
        .unwrap_or(current)
}

fn items_of_sections<'a>(snapshot: &'a Snapshot, sections: &'a [usize]) -> impl Iterator<Item = IndexPath> + 'a {
    sections.iter().flat_map(move |&section| {
        let len = snapshot.section(section).map_or(0, Section::len);
        (0..len).map(move |item| IndexPath::new(section, item))
    })
}

impl<H: ListHost> fmt::Debug for UpdateController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateController")
            .field("state", &self.state)
            .field("sections", &self.snapshot.len())
            .field("items", &self.snapshot.item_count())
            .field("queued", &self.queue.len())
            .field("sizes", &self.sizes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::identical_by_eq;
    use crate::render::AnyRenderer;
    use parking_lot::Mutex;
    use strata_core::CheckMode;

    #[derive(Debug, PartialEq)]
    struct Row(&'static str);

    impl ItemModel for Row {
        fn identifier(&self) -> &str {
            self.0
        }

        fn identical(&self, other: &dyn ItemModel) -> bool {
            identical_by_eq(self, other)
        }
    }

    #[derive(Default)]
    struct ScriptedHost {
        defer: bool,
        transitions: Vec<Transition>,
        scrolls: Vec<ScrollRequest>,
        reloads: usize,
        invalidations: usize,
    }

    impl ListHost for ScriptedHost {
        fn perform_updates(&mut self, transition: &Transition) -> TransitionCompletion {
            self.transitions.push(transition.clone());
            if self.defer {
                TransitionCompletion::Deferred
            } else {
                TransitionCompletion::Immediate
            }
        }

        fn perform_reload(&mut self) -> TransitionCompletion {
            self.reloads += 1;
            TransitionCompletion::Immediate
        }

        fn scroll_to(&mut self, request: &ScrollRequest) {
            self.scrolls.push(*request);
        }

        fn visible_renderers(&mut self, _visit: &mut dyn FnMut(IndexPath, &mut dyn AnyRenderer)) {}

        fn invalidate_layout(&mut self) {
            self.invalidations += 1;
        }
    }

    fn controller(defer: bool) -> UpdateController<ScriptedHost> {
        let host = ScriptedHost {
            defer,
            ..ScriptedHost::default()
        };
        let config = EngineConfig::default().with_checks(CheckMode::Log);
        UpdateController::new(host, Arc::new(RendererRegistry::new()), config)
    }

    fn sections() -> Vec<Section> {
        vec![
            Section::new("a").with_item(Row("a1")).with_item(Row("a2")),
            Section::new("b").with_item(Row("b1")),
        ]
    }

    #[test]
    fn test_immediate_update_installs() {
        let mut controller = controller(false);
        let applied = Arc::new(Mutex::new(Vec::new()));
        let sink = applied.clone();
        controller.snapshot_applied().connect(move |a| sink.lock().push(*a));

        controller.update_snapshot(sections(), true, None);
        assert!(!controller.is_updating());
        assert_eq!(controller.snapshot().item_count(), 3);
        assert_eq!(*applied.lock(), vec![SnapshotApplied { sections: 2, items: 3 }]);

        let transition = &controller.host().transitions[0];
        assert!(transition.animated);
        assert_eq!(transition.script.section_inserts, vec![0, 1]);
    }

    #[test]
    fn test_deferred_update_queues_followers() {
        let mut controller = controller(true);
        controller.update_snapshot(sections(), true, None);
        assert!(controller.is_updating());
        assert!(controller.snapshot().is_empty());
        assert_eq!(controller.pending_snapshot().map(Snapshot::len), Some(2));

        controller.scroll_to(ScrollTarget::item("b1"), false);
        assert_eq!(controller.queued_len(), 1);
        assert!(controller.host().scrolls.is_empty());

        controller.finish_transition();
        assert_eq!(controller.state(), UpdateState::Idle);
        assert_eq!(
            controller.host().scrolls,
            vec![ScrollRequest {
                position: ScrollPosition::Item(IndexPath::new(1, 0)),
                animated: false,
            }]
        );
    }

    #[test]
    fn test_finish_without_transition_is_ignored() {
        let mut controller = controller(false);
        controller.finish_transition();
        assert!(!controller.is_updating());
    }

    #[test]
    fn test_scroll_resolution() {
        let mut controller = controller(false);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        controller.violation_reported().connect(move |v| sink.lock().push(v.clone()));

        controller.update_snapshot(sections(), false, None);
        controller.scroll_to(Edge::Bottom, true);
        controller.scroll_to(ScrollTarget::item("nope"), true);
        controller.scroll_to(IndexPath::new(4, 0), true);

        assert_eq!(controller.host().scrolls.len(), 1);
        assert_eq!(controller.host().scrolls[0].position, ScrollPosition::Bottom);
        assert_eq!(
            *seen.lock(),
            vec![
                Violation::UnknownItem { identifier: "nope".into() },
                Violation::MissingLocation { section: 4, item: 0 },
            ]
        );
    }

    #[test]
    fn test_invalidate_layout_clears_and_notifies() {
        let mut controller = controller(false);
        controller.invalidate_layout();
        assert_eq!(controller.host().invalidations, 1);
    }

    #[test]
    fn test_remove_missing_location_runs_completion() {
        let mut controller = controller(false);
        controller.update_snapshot(sections(), false, None);

        let done = Arc::new(Mutex::new(false));
        let flag = done.clone();
        controller.remove_item(IndexPath::new(0, 9), None, Some(Box::new(move || *flag.lock() = true)));

        assert!(*done.lock());
        assert_eq!(controller.host().transitions.len(), 1);
        assert_eq!(controller.snapshot().item_count(), 3);
    }
}
