//! Periodic tick scheduler
//!
//! A hardware timebase calls [`TickScheduler::on_tick`] once per tick. The
//! scheduler holds at most one hook and fires it every `interval` ticks.
//! An interval of 0 means the hook is never invoked.

/// Callback fired by the tick scheduler
pub trait TickHook {
    fn fire(&mut self);
}

impl<F: FnMut()> TickHook for F {
    fn fire(&mut self) {
        self()
    }
}

/// Single-slot "fire every N ticks" scheduler
///
/// `on_tick` takes `&mut self`, so the hook can never be re-entered while
/// it runs.
pub struct TickScheduler<H> {
    hook: Option<H>,
    /// Ticks between invocations, 0 = disabled
    interval: u32,
    /// Ticks left before the next invocation
    countdown: u32,
}

impl<H> core::fmt::Debug for TickScheduler<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TickScheduler")
            .field("registered", &self.hook.is_some())
            .field("interval", &self.interval)
            .field("countdown", &self.countdown)
            .finish()
    }
}

impl<H> Default for TickScheduler<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> TickScheduler<H> {
    /// Create a scheduler with nothing registered
    pub const fn new() -> Self {
        Self {
            hook: None,
            interval: 0,
            countdown: 0,
        }
    }

    /// Register `hook` to fire every `interval` ticks
    ///
    /// Replaces any previous registration and returns the old hook. The
    /// first invocation happens on the `interval`th tick after this call.
    pub fn register_periodic(&mut self, hook: H, interval: u32) -> Option<H> {
        let previous = self.hook.replace(hook);
        self.set_interval(interval);
        previous
    }

    /// Change the interval of the registered hook, restarting its countdown
    pub fn set_interval(&mut self, interval: u32) {
        self.interval = interval;
        self.countdown = interval.saturating_sub(1);
    }

    /// Stop invoking the hook without dropping it
    pub fn disable(&mut self) {
        self.set_interval(0);
    }

    /// Remove the registered hook
    pub fn unregister(&mut self) -> Option<H> {
        self.disable();
        self.hook.take()
    }

    /// Current interval in ticks (0 = disabled)
    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn is_enabled(&self) -> bool {
        self.interval != 0 && self.hook.is_some()
    }

    pub fn hook(&self) -> Option<&H> {
        self.hook.as_ref()
    }

    pub fn hook_mut(&mut self) -> Option<&mut H> {
        self.hook.as_mut()
    }
}

impl<H: TickHook> TickScheduler<H> {
    /// Advance one tick, firing the hook when its countdown expires
    ///
    /// Returns true if the hook ran.
    pub fn on_tick(&mut self) -> bool {
        if self.interval == 0 {
            return false;
        }

        if self.countdown > 0 {
            self.countdown -= 1;
            return false;
        }

        self.countdown = self.interval - 1;
        match self.hook.as_mut() {
            Some(hook) => {
                hook.fire();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct Counter(u32);

    impl TickHook for Counter {
        fn fire(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_empty_scheduler_never_fires() {
        let mut sched: TickScheduler<Counter> = TickScheduler::new();
        for _ in 0..100 {
            assert!(!sched.on_tick());
        }
        assert!(!sched.is_enabled());
    }

    #[test]
    fn test_every_tick() {
        let mut sched = TickScheduler::new();
        sched.register_periodic(Counter(0), 1);
        for _ in 0..10 {
            assert!(sched.on_tick());
        }
        assert_eq!(sched.hook().map(|c| c.0), Some(10));
    }

    #[test]
    fn test_every_third_tick() {
        let mut sched = TickScheduler::new();
        sched.register_periodic(Counter(0), 3);

        let fired: heapless::Vec<bool, 9> = (0..9).map(|_| sched.on_tick()).collect();
        assert_eq!(
            fired.as_slice(),
            &[false, false, true, false, false, true, false, false, true]
        );
        assert_eq!(sched.hook().map(|c| c.0), Some(3));
    }

    #[test]
    fn test_zero_interval_disables() {
        let mut sched = TickScheduler::new();
        sched.register_periodic(Counter(0), 0);
        for _ in 0..1000 {
            sched.on_tick();
        }
        assert_eq!(sched.hook().map(|c| c.0), Some(0));
    }

    #[test]
    fn test_reregistration_replaces_hook() {
        let mut sched = TickScheduler::new();
        assert!(sched.register_periodic(Counter(0), 1).is_none());
        sched.on_tick();

        let old = sched.register_periodic(Counter(100), 2);
        assert_eq!(old.map(|c| c.0), Some(1));

        sched.on_tick();
        sched.on_tick();
        assert_eq!(sched.hook().map(|c| c.0), Some(101));
        assert_eq!(sched.interval(), 2);
    }

    #[test]
    fn test_disable_then_reenable() {
        let mut sched = TickScheduler::new();
        sched.register_periodic(Counter(0), 1);
        sched.disable();
        sched.on_tick();
        assert_eq!(sched.hook().map(|c| c.0), Some(0));

        sched.set_interval(1);
        sched.on_tick();
        assert_eq!(sched.hook().map(|c| c.0), Some(1));

        let hook = sched.unregister();
        assert_eq!(hook.map(|c| c.0), Some(1));
        assert!(!sched.on_tick());
    }

    #[test]
    fn test_closure_hook() {
        let calls = Cell::new(0u32);
        let mut sched = TickScheduler::new();
        sched.register_periodic(|| calls.set(calls.get() + 1), 4);
        for _ in 0..16 {
            sched.on_tick();
        }
        assert_eq!(calls.get(), 4);
    }
}
