use alloc::sync::Arc;
use core::fmt;

/// Callback used to ask the host for one deferred tick (microtask, animation frame, timer...).
pub type FrameRequester = Arc<dyn Fn() + Send + Sync>;

/// A set of reasons a frame is needed. Everything but [`Invalidation::VISIBLE_RANGE`] calls
/// for a reflow.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Invalidation(u8);

impl Invalidation {
    pub const NONE: Self = Self(0);
    pub const ITEMS: Self = Self(1 << 0);
    pub const TOTAL_ITEMS: Self = Self(1 << 1);
    pub const SCROLL: Self = Self(1 << 2);
    pub const VIEWPORT: Self = Self(1 << 3);
    pub const MEASUREMENT: Self = Self(1 << 4);
    pub const SCROLL_TO_INDEX: Self = Self(1 << 5);
    pub const RESET: Self = Self(1 << 6);
    /// Only the visible sub-range moved; the window still covers the viewport, so no reflow.
    pub const VISIBLE_RANGE: Self = Self(1 << 7);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether any reason other than [`Self::VISIBLE_RANGE`] is set.
    pub const fn needs_reflow(self) -> bool {
        self.0 & !Self::VISIBLE_RANGE.0 != 0
    }
}

impl core::ops::BitOr for Invalidation {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl core::ops::BitOrAssign for Invalidation {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for Invalidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Invalidation, &str); 8] = [
            (Invalidation::ITEMS, "ITEMS"),
            (Invalidation::TOTAL_ITEMS, "TOTAL_ITEMS"),
            (Invalidation::SCROLL, "SCROLL"),
            (Invalidation::VIEWPORT, "VIEWPORT"),
            (Invalidation::MEASUREMENT, "MEASUREMENT"),
            (Invalidation::SCROLL_TO_INDEX, "SCROLL_TO_INDEX"),
            (Invalidation::RESET, "RESET"),
            (Invalidation::VISIBLE_RANGE, "VISIBLE_RANGE"),
        ];
        let mut set = f.debug_set();
        for (flag, name) in NAMES {
            if self.contains(flag) {
                set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SchedulerState {
    #[default]
    Idle,
    Pending,
}

/// Coalesces invalidations into a single reflow per tick.
///
/// The first invalidation while idle requests exactly one frame from the host. Everything that
/// arrives before that frame fires is merged into the same pass.
#[derive(Clone, Default)]
pub struct ReflowScheduler {
    state: SchedulerState,
    pending: Invalidation,
    requester: Option<FrameRequester>,
    frames_requested: u64,
}

impl ReflowScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame_requester(mut self, requester: impl Fn() + Send + Sync + 'static) -> Self {
        self.requester = Some(Arc::new(requester));
        self
    }

    pub fn set_frame_requester(&mut self, requester: Option<FrameRequester>) {
        self.requester = requester;
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == SchedulerState::Pending
    }

    /// Reasons accumulated since the last pass.
    pub fn pending(&self) -> Invalidation {
        self.pending
    }

    /// How many frames this scheduler has asked the host for.
    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }

    /// Marks the layout dirty.
    ///
    /// Returns `true` when this call moved the scheduler from idle to pending (and thus
    /// requested a frame).
    pub fn invalidate(&mut self, reason: Invalidation) -> bool {
        if reason.is_empty() {
            return false;
        }
        self.pending |= reason;
        if self.state == SchedulerState::Pending {
            vtrace!(reason = reason.bits(), "invalidate: coalesced");
            return false;
        }
        self.state = SchedulerState::Pending;
        self.frames_requested = self.frames_requested.saturating_add(1);
        vtrace!(reason = reason.bits(), "invalidate: frame requested");
        if let Some(request) = &self.requester {
            request();
        }
        true
    }

    /// Called when the requested frame fires: returns to idle and hands back the coalesced
    /// reasons, or `None` if nothing was pending.
    pub fn begin_pass(&mut self) -> Option<Invalidation> {
        if self.state == SchedulerState::Idle {
            return None;
        }
        self.state = SchedulerState::Idle;
        Some(core::mem::take(&mut self.pending))
    }
}

impl fmt::Debug for ReflowScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReflowScheduler")
            .field("state", &self.state)
            .field("pending", &self.pending)
            .field("frames_requested", &self.frames_requested)
            .finish_non_exhaustive()
    }
}
