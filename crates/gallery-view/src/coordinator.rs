//! `GalleryCoordinator` - owns the gallery's derived state and recomputes it
//! whenever an input changes.
//!
//! # Signals
//!
//! | Signal | Page selection | Grid layout |
//! |--------|----------------|-------------|
//! | `RosterChanged` | re-fetch roster + local user, recompute | - |
//! | `DimensionChanged` | - | recompute |
//! | `PaginationChanged` | recompute | recompute if the effective page size changed |
//!
//! Every recomputation starts from the current snapshots; nothing is patched
//! incrementally. After each one the full [`GalleryFrame`] is forwarded to
//! the render driver, including when the result is empty.
//!
//! Roster listeners never recompute inline. They enqueue a signal on the
//! coordinator's mailbox, and the coordinator handles one signal to
//! completion before taking the next, either via [`GalleryCoordinator::process_pending`]
//! or the async [`GalleryCoordinator::run`] loop.

use crate::config::GalleryConfig;
use crate::driver::{GalleryFrame, RenderDriver, SubscriptionDelta};
use crate::errors::GalleryError;
use crate::grid::{compute_grid, max_viewport_cells, CellLayout, Dimension, GridOptions};
use crate::observability::metrics;
use crate::pagination::Pagination;
use crate::participant::Participant;
use crate::roster::{ListenerId, RosterEvent, RosterListener, RosterProvider};
use crate::selector::{select_page, PageSelection};

use common::types::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, trace, warn};

/// Inputs that trigger a recomputation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GallerySignal {
    /// The roster provider reported a change.
    RosterChanged(RosterEvent),
    /// The viewport was resized.
    DimensionChanged(Dimension),
    /// The application moved to another page or changed the page geometry.
    PaginationChanged(Pagination),
}

/// Cloneable handle for delivering signals to a coordinator.
#[derive(Debug, Clone)]
pub struct GallerySignalSender {
    sender: mpsc::UnboundedSender<GallerySignal>,
}

impl GallerySignalSender {
    /// Enqueue a signal.
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::MailboxClosed` if the coordinator is gone.
    pub fn send(&self, signal: GallerySignal) -> Result<(), GalleryError> {
        self.sender
            .send(signal)
            .map_err(|_| GalleryError::MailboxClosed)
    }

    /// Enqueue a viewport resize.
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::MailboxClosed` if the coordinator is gone.
    pub fn dimension_changed(&self, dimension: Dimension) -> Result<(), GalleryError> {
        self.send(GallerySignal::DimensionChanged(dimension))
    }

    /// Enqueue a pagination change.
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::MailboxClosed` if the coordinator is gone.
    pub fn pagination_changed(&self, pagination: Pagination) -> Result<(), GalleryError> {
        self.send(GallerySignal::PaginationChanged(pagination))
    }
}

/// The current page as exposed to the surrounding application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryView {
    pub visible_participants: Vec<Participant>,
    pub layout: Vec<CellLayout>,
}

/// Orchestrates page selection and grid layout for one gallery.
pub struct GalleryCoordinator {
    provider: Arc<dyn RosterProvider>,
    driver: Box<dyn RenderDriver>,
    grid_options: GridOptions,
    max_page_size: usize,
    dimension: Dimension,
    pagination: Pagination,
    /// Cached roster snapshot, replaced wholesale on every roster signal.
    roster: Vec<Participant>,
    local_user: Option<Participant>,
    selection: PageSelection,
    layout: Vec<CellLayout>,
    /// Subscriptions in the last frame handed to the driver.
    rendered_subscriptions: BTreeSet<UserId>,
    generation: u64,
    mailbox_tx: mpsc::UnboundedSender<GallerySignal>,
    mailbox_rx: mpsc::UnboundedReceiver<GallerySignal>,
    registrations: Vec<(RosterEvent, ListenerId)>,
}

impl GalleryCoordinator {
    /// Create a coordinator, subscribe to roster changes, load the initial
    /// snapshot and forward the first frame.
    pub fn new(
        provider: Arc<dyn RosterProvider>,
        driver: Box<dyn RenderDriver>,
        config: &GalleryConfig,
        dimension: Dimension,
        pagination: Pagination,
    ) -> Self {
        let (mailbox_tx, mailbox_rx) = mpsc::unbounded_channel();

        let mut coordinator = Self {
            provider,
            driver,
            grid_options: config.grid_options(),
            max_page_size: config.max_page_size,
            dimension,
            pagination,
            roster: Vec::new(),
            local_user: None,
            selection: PageSelection::default(),
            layout: Vec::new(),
            rendered_subscriptions: BTreeSet::new(),
            generation: 0,
            mailbox_tx,
            mailbox_rx,
            registrations: Vec::new(),
        };

        coordinator.attach();
        coordinator.load_snapshot();
        coordinator.recompute(true, true);
        coordinator
    }

    /// Subscribe to every roster event. No-op while already attached.
    pub fn attach(&mut self) {
        if self.is_attached() {
            return;
        }

        for event in RosterEvent::ALL {
            let sender = self.mailbox_tx.clone();
            let listener: RosterListener = Arc::new(move |event: RosterEvent| {
                if sender.send(GallerySignal::RosterChanged(event)).is_err() {
                    warn!(
                        target: "gallery.coordinator",
                        event = %event,
                        "Roster notification dropped, gallery mailbox closed"
                    );
                }
            });
            let id = self.provider.subscribe(event, listener);
            self.registrations.push((event, id));
        }

        info!(
            target: "gallery.coordinator",
            listeners = self.registrations.len(),
            "Gallery attached to roster"
        );
    }

    /// Remove exactly the listeners registered by [`attach`](Self::attach).
    ///
    /// Idempotent. After detaching, roster notifications no longer reach
    /// this coordinator.
    pub fn detach(&mut self) {
        if self.registrations.is_empty() {
            return;
        }

        let mut removed = 0;
        for (event, id) in self.registrations.drain(..) {
            if self.provider.unsubscribe(event, id) {
                removed += 1;
            }
        }

        info!(
            target: "gallery.coordinator",
            removed,
            "Gallery detached from roster"
        );
    }

    /// Whether roster listeners are currently registered.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.registrations.is_empty()
    }

    /// Handle for delivering signals from elsewhere in the application.
    #[must_use]
    pub fn signal_sender(&self) -> GallerySignalSender {
        GallerySignalSender {
            sender: self.mailbox_tx.clone(),
        }
    }

    /// Handle one signal to completion.
    ///
    /// Returns whether anything was recomputed.
    #[instrument(skip_all, name = "gallery.coordinator.signal")]
    pub fn handle_signal(&mut self, signal: GallerySignal) -> bool {
        trace!(target: "gallery.coordinator", ?signal, "Handling signal");

        match signal {
            GallerySignal::RosterChanged(event) => {
                metrics::record_roster_signal(event.as_str());
                self.refresh_roster();
                true
            }
            GallerySignal::DimensionChanged(dimension) => self.set_dimension(dimension),
            GallerySignal::PaginationChanged(pagination) => self.set_pagination(pagination),
        }
    }

    /// Handle every queued signal in arrival order. Returns how many were handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(signal) = self.mailbox_rx.try_recv() {
            self.handle_signal(signal);
            handled += 1;
        }
        handled
    }

    /// Process signals until `cancel_token` fires, then detach.
    #[instrument(skip_all, name = "gallery.coordinator.run")]
    pub async fn run(mut self, cancel_token: CancellationToken) {
        info!(target: "gallery.coordinator", "Gallery coordinator running");

        loop {
            tokio::select! {
                () = cancel_token.cancelled() => {
                    info!(
                        target: "gallery.coordinator",
                        generation = self.generation,
                        "Gallery coordinator received cancellation signal"
                    );
                    break;
                }

                signal = self.mailbox_rx.recv() => {
                    let Some(signal) = signal else {
                        break;
                    };
                    self.handle_signal(signal);
                }
            }
        }

        self.detach();
    }

    /// Re-fetch the roster and local user, then recompute the page selection.
    #[instrument(skip_all, name = "gallery.coordinator.roster")]
    pub fn refresh_roster(&mut self) {
        self.load_snapshot();
        self.recompute(true, false);
    }

    /// Apply a viewport size. Returns `false` if it is unchanged.
    #[instrument(skip_all, name = "gallery.coordinator.dimension")]
    pub fn set_dimension(&mut self, dimension: Dimension) -> bool {
        if dimension.same_extent(&self.dimension) {
            return false;
        }

        self.dimension = dimension;
        self.recompute(false, true);
        true
    }

    /// Apply new pagination. Returns `false` if it is unchanged.
    #[instrument(skip_all, name = "gallery.coordinator.pagination")]
    pub fn set_pagination(&mut self, pagination: Pagination) -> bool {
        if pagination == self.pagination {
            return false;
        }

        let layout_changed =
            pagination.effective_page_size() != self.pagination.effective_page_size();
        self.pagination = pagination;
        self.recompute(true, layout_changed);
        true
    }

    /// Current visible participants and layout.
    #[must_use]
    pub fn view(&self) -> GalleryView {
        GalleryView {
            visible_participants: self.selection.visible_participants.clone(),
            layout: self.layout.clone(),
        }
    }

    #[must_use]
    pub fn visible_participants(&self) -> &[Participant] {
        &self.selection.visible_participants
    }

    #[must_use]
    pub fn layout(&self) -> &[CellLayout] {
        &self.layout
    }

    #[must_use]
    pub fn subscriptions(&self) -> &BTreeSet<UserId> {
        &self.selection.subscriptions
    }

    #[must_use]
    pub fn selection(&self) -> &PageSelection {
        &self.selection
    }

    #[must_use]
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    #[must_use]
    pub fn local_user(&self) -> Option<&Participant> {
        self.local_user.as_ref()
    }

    /// Page size that fits the current viewport, capped at the configured
    /// maximum. Callers derive their `Pagination` from it.
    #[must_use]
    pub fn recommended_page_size(&self) -> usize {
        max_viewport_cells(&self.dimension, &self.grid_options, self.max_page_size)
    }

    /// Number of frames forwarded to the driver so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn load_snapshot(&mut self) {
        self.roster = self.provider.all_participants();
        self.local_user = self.provider.local_user();
    }

    fn recompute(&mut self, page: bool, layout: bool) {
        let started = Instant::now();

        if page {
            self.selection = select_page(&self.roster, self.local_user.as_ref(), &self.pagination);
            metrics::record_recompute("page");
        }
        if layout {
            self.layout = compute_grid(
                &self.dimension,
                self.pagination.effective_page_size(),
                &self.grid_options,
            );
            metrics::record_recompute("layout");
        }

        metrics::record_recompute_duration(started.elapsed());
        self.forward_frame();
    }

    fn forward_frame(&mut self) {
        self.generation += 1;

        let frame = GalleryFrame {
            generation: self.generation,
            layout: self.layout.clone(),
            visible_participants: self.selection.visible_participants.clone(),
            subscriptions: self.selection.subscriptions.clone(),
            local_user_id: self.local_user.as_ref().map(|p| p.user_id),
            delta: SubscriptionDelta::between(
                &self.rendered_subscriptions,
                &self.selection.subscriptions,
            ),
        };

        debug!(
            target: "gallery.coordinator",
            generation = frame.generation,
            visible = frame.visible_participants.len(),
            cells = frame.layout.len(),
            subscribed = frame.subscriptions.len(),
            added = frame.delta.added.len(),
            removed = frame.delta.removed.len(),
            "Forwarding gallery frame"
        );

        self.driver.render(&frame);
        self.rendered_subscriptions = frame.subscriptions;

        metrics::set_visible_participants(self.selection.visible_participants.len());
        metrics::set_video_subscriptions(self.selection.subscriptions.len());
        metrics::record_frame_rendered();
    }
}

impl Drop for GalleryCoordinator {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::roster::ListenerRegistry;
    use std::sync::Mutex;

    struct StaticRoster {
        participants: Mutex<Vec<Participant>>,
        local: Option<Participant>,
        registry: ListenerRegistry,
    }

    impl StaticRoster {
        fn new(participants: Vec<Participant>, local: Option<Participant>) -> Arc<Self> {
            Arc::new(Self {
                participants: Mutex::new(participants),
                local,
                registry: ListenerRegistry::new(),
            })
        }
    }

    impl RosterProvider for StaticRoster {
        fn all_participants(&self) -> Vec<Participant> {
            self.participants.lock().unwrap().clone()
        }

        fn local_user(&self) -> Option<Participant> {
            self.local.clone()
        }

        fn subscribe(&self, event: RosterEvent, listener: RosterListener) -> ListenerId {
            self.registry.subscribe(event, listener)
        }

        fn unsubscribe(&self, event: RosterEvent, id: ListenerId) -> bool {
            self.registry.unsubscribe(event, id)
        }
    }

    #[derive(Clone, Default)]
    struct FrameSink(Arc<Mutex<Vec<GalleryFrame>>>);

    impl RenderDriver for FrameSink {
        fn render(&mut self, frame: &GalleryFrame) {
            self.0.lock().unwrap().push(frame.clone());
        }
    }

    fn p(id: u32, video_on: bool) -> Participant {
        Participant::new(id, video_on, format!("user-{id}"))
    }

    fn viewport() -> Dimension {
        Dimension::new(1280.0, 720.0).unwrap()
    }

    fn coordinator_with(
        roster: &Arc<StaticRoster>,
        pagination: Pagination,
    ) -> (GalleryCoordinator, FrameSink) {
        let sink = FrameSink::default();
        let provider: Arc<dyn RosterProvider> = roster.clone();
        let coordinator = GalleryCoordinator::new(
            provider,
            Box::new(sink.clone()),
            &GalleryConfig::default(),
            viewport(),
            pagination,
        );
        (coordinator, sink)
    }

    #[test]
    fn test_new_forwards_initial_frame() {
        let me = p(1, true);
        let roster = StaticRoster::new(vec![p(2, true), me.clone()], Some(me));
        let (coordinator, sink) = coordinator_with(&roster, Pagination::for_roster(4, 2, 0));

        let frames = sink.0.lock().unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].generation, 1);
        assert_eq!(frames[0].local_user_id, Some(UserId(1)));
        assert_eq!(frames[0].layout.len(), 2);
        assert_eq!(frames[0].delta.added, vec![UserId(1), UserId(2)]);
        assert_eq!(coordinator.visible_participants().len(), 2);
        assert!(coordinator.is_attached());
    }

    #[test]
    fn test_absent_local_user_forwards_empty_state() {
        let roster = StaticRoster::new(vec![p(2, true)], None);
        let (coordinator, sink) = coordinator_with(&roster, Pagination::for_roster(4, 1, 0));

        let frames = sink.0.lock().unwrap();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].visible_participants.is_empty());
        assert!(frames[0].subscriptions.is_empty());
        assert_eq!(frames[0].local_user_id, None);
        assert!(coordinator.subscriptions().is_empty());
    }

    #[test]
    fn test_unchanged_inputs_do_not_recompute() {
        let me = p(1, false);
        let roster = StaticRoster::new(vec![me.clone()], Some(me));
        let pagination = Pagination::for_roster(4, 1, 0);
        let (mut coordinator, sink) = coordinator_with(&roster, pagination);

        assert!(!coordinator.set_dimension(viewport()));
        assert!(!coordinator.set_pagination(pagination));
        assert_eq!(sink.0.lock().unwrap().len(), 1);
        assert_eq!(coordinator.generation(), 1);
    }

    #[test]
    fn test_nan_dimension_repeat_is_noop() {
        let me = p(1, false);
        let roster = StaticRoster::new(vec![me.clone()], Some(me));
        let (mut coordinator, sink) = coordinator_with(&roster, Pagination::for_roster(4, 1, 0));
        let broken = Dimension {
            width: f64::NAN,
            height: 720.0,
        };

        assert!(coordinator.set_dimension(broken));
        assert!(!coordinator.set_dimension(broken));
        assert_eq!(sink.0.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_recommended_page_size_follows_config_and_viewport() {
        let me = p(1, false);
        let roster = StaticRoster::new(vec![me.clone()], Some(me));
        let config = GalleryConfig {
            max_page_size: 4,
            ..GalleryConfig::default()
        };
        let provider: Arc<dyn RosterProvider> = roster.clone();
        let mut coordinator = GalleryCoordinator::new(
            provider,
            Box::new(FrameSink::default()),
            &config,
            viewport(),
            Pagination::for_roster(4, 1, 0),
        );
        assert_eq!(coordinator.recommended_page_size(), 4);

        coordinator.set_dimension(Dimension::new(300.0, 200.0).unwrap());
        assert_eq!(coordinator.recommended_page_size(), 1);
    }

    #[test]
    fn test_pagination_with_same_effective_size_keeps_layout() {
        let me = p(1, false);
        let participants: Vec<Participant> = (1..=8).map(|id| p(id, false)).collect();
        let roster = StaticRoster::new(participants, Some(me));
        let (mut coordinator, _sink) = coordinator_with(&roster, Pagination::for_roster(4, 8, 0));
        let layout_before = coordinator.layout().to_vec();

        assert!(coordinator.set_pagination(Pagination::for_roster(4, 8, 1)));
        assert_eq!(coordinator.layout(), layout_before.as_slice());
        assert_eq!(coordinator.visible_participants().len(), 4);
    }

    #[test]
    fn test_signal_sender_reports_closed_mailbox() {
        let me = p(1, false);
        let roster = StaticRoster::new(vec![me.clone()], Some(me));
        let (coordinator, _sink) = coordinator_with(&roster, Pagination::for_roster(4, 1, 0));
        let sender = coordinator.signal_sender();

        assert!(sender.dimension_changed(viewport()).is_ok());
        drop(coordinator);

        assert!(matches!(
            sender.pagination_changed(Pagination::for_roster(4, 1, 0)),
            Err(GalleryError::MailboxClosed)
        ));
        assert_eq!(roster.registry.listener_count(), 0);
    }
}
