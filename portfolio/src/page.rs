//! Wiring between the page's sections and the appear animation engine.

use appear::{AppearOptions, ElementId, SchedulerOptions, TickSummary, Viewport};
use appear_adapter::Controller;

/// Hands out element ids in document order and forwards platform events to
/// the appear controller.
///
/// Sections register in the order they are populated (profile header, meta
/// line, project cards, form fields), and because ids are allocated in
/// document order, the id ordering doubles as the scheduler's tie-breaker for
/// elements sharing a top edge.
#[derive(Clone, Debug)]
pub struct PageSession {
    controller: Controller<ElementId>,
    next_id: ElementId,
}

impl PageSession {
    /// A session for a platform with an intersection observer.
    pub fn new(options: SchedulerOptions<ElementId>) -> Self {
        Self::from_controller(Controller::new(options))
    }

    /// A session for a platform without one; visibility comes from
    /// scroll/resize polling instead.
    pub fn polling(options: SchedulerOptions<ElementId>) -> Self {
        Self::from_controller(Controller::polling(options))
    }

    pub fn from_controller(controller: Controller<ElementId>) -> Self {
        Self {
            controller,
            next_id: 0,
        }
    }

    pub fn controller(&self) -> &Controller<ElementId> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<ElementId> {
        &mut self.controller
    }

    /// Reserves ids for `count` elements about to be attached, in document
    /// order.
    pub fn allocate_ids(&mut self, count: usize) -> core::ops::Range<ElementId> {
        let start = self.next_id;
        self.next_id += count as ElementId;
        start..self.next_id
    }

    /// Registers attached elements with default animation options; returns
    /// the keys the platform should start observing.
    pub fn register(&mut self, ids: impl IntoIterator<Item = ElementId>) -> Vec<ElementId> {
        self.controller.register(ids)
    }

    /// Registers attached elements with custom animation options.
    pub fn register_with(
        &mut self,
        ids: impl IntoIterator<Item = ElementId>,
        options: AppearOptions,
    ) -> Vec<ElementId> {
        self.controller.register_with(ids, options)
    }

    pub fn on_intersection(&mut self) {
        self.controller.on_intersection();
    }

    pub fn on_scroll(&mut self) {
        self.controller.on_scroll();
    }

    pub fn on_resize(&mut self, viewport: Viewport) {
        self.controller.on_resize(viewport);
    }

    pub fn tick(&mut self, now_ms: u64) -> TickSummary {
        self.controller.tick(now_ms)
    }

    pub fn drain_unobserve(&mut self) -> Vec<ElementId> {
        self.controller.drain_unobserve()
    }
}
