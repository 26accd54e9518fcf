//! Animation clock: advances the single bound mixer by wall-clock delta.
use std::time::Duration;

/// Something that plays an animation clip forward in time.
pub trait Mixer {
    /// Advance playback by `seconds`.
    fn advance(&mut self, seconds: f32);
}

/// Holds at most one mixer and feeds it elapsed time every frame.
#[derive(Debug)]
pub struct AnimationClock<M> {
    mixer: Option<M>,
    last_tick: Option<Duration>,
}

impl<M> Default for AnimationClock<M> {
    fn default() -> Self {
        Self { mixer: None, last_tick: None }
    }
}

impl<M: Mixer> AnimationClock<M> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the bound mixer. The previous one is dropped and never advanced again.
    pub fn bind(&mut self, mixer: M) {
        self.mixer = Some(mixer);
    }

    /// Drop the bound mixer, leaving the clock idle.
    pub fn unbind(&mut self) -> Option<M> {
        self.mixer.take()
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.mixer.is_some()
    }

    #[must_use]
    pub fn mixer(&self) -> Option<&M> {
        self.mixer.as_ref()
    }

    /// Advance the bound mixer by the time since the previous tick.
    ///
    /// The first tick only records `now`. Returns the delta in seconds.
    pub fn tick(&mut self, now: Duration) -> f32 {
        let delta = self
            .last_tick
            .map_or(0.0, |prev| now.saturating_sub(prev).as_secs_f32());
        self.last_tick = Some(now);
        if let Some(mixer) = self.mixer.as_mut() {
            mixer.advance(delta);
        }
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Counter(f32);

    impl Mixer for Counter {
        fn advance(&mut self, seconds: f32) {
            self.0 += seconds;
        }
    }

    #[test]
    fn unbound_clock_is_a_no_op() {
        let mut clock: AnimationClock<Counter> = AnimationClock::new();
        clock.tick(Duration::from_millis(0));
        let delta = clock.tick(Duration::from_millis(16));
        assert!((delta - 0.016).abs() < 1e-6);
        assert!(!clock.is_bound());
    }

    #[test]
    fn bound_mixer_receives_deltas() {
        let mut clock = AnimationClock::new();
        clock.tick(Duration::from_millis(100));
        clock.bind(Counter::default());
        clock.tick(Duration::from_millis(150));
        clock.tick(Duration::from_millis(250));
        let m = clock.mixer().unwrap();
        assert!((m.0 - 0.15).abs() < 1e-6);
    }

    #[test]
    fn rebinding_discards_the_stale_mixer() {
        let mut clock = AnimationClock::new();
        clock.bind(Counter(5.0));
        clock.tick(Duration::ZERO);
        clock.bind(Counter::default());
        clock.tick(Duration::from_millis(10));
        assert!((clock.mixer().unwrap().0 - 0.01).abs() < 1e-6);
        assert!(clock.unbind().is_some());
        assert!(clock.mixer().is_none());
    }
}
