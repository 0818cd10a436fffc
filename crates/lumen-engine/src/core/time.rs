/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

#[derive(Debug, Clone)]
struct Pending<T> {
    remaining: f32,
    item: T,
}

/// Fire-and-forget delayed actions, advanced by the fixed timestep.
///
/// There is no cancellation: once scheduled, an item is returned by
/// exactly one call to [`DelayQueue::tick`].
#[derive(Debug, Clone)]
pub struct DelayQueue<T> {
    pending: Vec<Pending<T>>,
}

impl<T> DelayQueue<T> {
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    /// Schedule `item` to come due after `delay` seconds.
    pub fn schedule(&mut self, delay: f32, item: T) {
        self.pending.push(Pending {
            remaining: delay.max(0.0),
            item,
        });
    }

    /// Advance time and return every item that came due, in schedule order.
    pub fn tick(&mut self, dt: f32) -> Vec<T> {
        let mut due = Vec::new();
        let mut waiting = Vec::with_capacity(self.pending.len());
        for mut p in self.pending.drain(..) {
            p.remaining -= dt;
            if p.remaining <= 0.0 {
                due.push(p.item);
            } else {
                waiting.push(p);
            }
        }
        self.pending = waiting;
        due
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

impl<T> Default for DelayQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0 / 60.0);
        assert_eq!(steps, 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(0.008); // half a frame
        assert_eq!(steps, 0);
        let steps = ts.accumulate(0.010); // over one frame total
        assert_eq!(steps, 1);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0);
        assert_eq!(steps, 10);
    }

    #[test]
    fn negative_frame_time_is_ignored() {
        let mut ts = FixedTimestep::new(0.5);
        assert_eq!(ts.accumulate(-3.0), 0);
        assert_eq!(ts.accumulate(0.5), 1);
    }

    #[test]
    fn delay_fires_once_after_deadline() {
        let mut q = DelayQueue::new();
        q.schedule(1.0, "cue");
        assert!(q.tick(0.5).is_empty());
        assert_eq!(q.tick(0.5), vec!["cue"]);
        assert!(q.is_empty());
        assert!(q.tick(10.0).is_empty());
    }

    #[test]
    fn due_items_keep_schedule_order() {
        let mut q = DelayQueue::new();
        q.schedule(0.2, 1);
        q.schedule(0.1, 2);
        q.schedule(5.0, 3);
        assert_eq!(q.tick(0.25), vec![1, 2]);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn zero_delay_fires_on_next_tick() {
        let mut q = DelayQueue::new();
        q.schedule(0.0, ());
        assert_eq!(q.tick(0.0).len(), 1);
    }
}
