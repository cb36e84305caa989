//! Rotation state for the hero slider, kept free of DOM types.

/// Classes a slide can carry; cleared before each repaint.
pub const POSITION_CLASSES: [&str; 3] = ["active", "prev", "next"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlidePosition {
    Active,
    Prev,
    Next,
    Hidden,
}

impl SlidePosition {
    pub fn class(self) -> Option<&'static str> {
        match self {
            SlidePosition::Active => Some("active"),
            SlidePosition::Prev => Some("prev"),
            SlidePosition::Next => Some("next"),
            SlidePosition::Hidden => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Current slide plus the transition lock.
///
/// `next`/`prev` take the lock and the owner releases it with `unlock` once
/// the transition window has passed. `go_to` jumps without taking it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderState {
    current: usize,
    slide_count: usize,
    transitioning: bool,
}

impl SliderState {
    /// An empty set is treated as a single slide; callers never mount a
    /// slider without slides.
    pub fn new(slide_count: usize) -> Self {
        Self {
            current: 0,
            slide_count: slide_count.max(1),
            transitioning: false,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Returns whether the slider moved.
    pub fn step(&mut self, direction: Direction) -> bool {
        if self.transitioning {
            return false;
        }
        self.transitioning = true;
        self.current = match direction {
            Direction::Forward => (self.current + 1) % self.slide_count,
            Direction::Backward => (self.current + self.slide_count - 1) % self.slide_count,
        };
        true
    }

    pub fn next(&mut self) -> bool {
        self.step(Direction::Forward)
    }

    pub fn prev(&mut self) -> bool {
        self.step(Direction::Backward)
    }

    /// Jumps straight to `index`. Ignored while a transition holds the lock,
    /// when already there, or when `index` is out of range.
    pub fn go_to(&mut self, index: usize) -> bool {
        if self.transitioning || index == self.current || index >= self.slide_count {
            return false;
        }
        self.current = index;
        true
    }

    pub fn unlock(&mut self) {
        self.transitioning = false;
    }

    pub fn dot_is_active(&self, index: usize) -> bool {
        index == self.current
    }

    pub fn position_of(&self, index: usize) -> SlidePosition {
        let count = self.slide_count;
        if index == self.current {
            SlidePosition::Active
        } else if index == (self.current + count - 1) % count {
            SlidePosition::Prev
        } else if index == (self.current + 1) % count {
            SlidePosition::Next
        } else {
            SlidePosition::Hidden
        }
    }
}

/// Holds the running autoplay timer, if any. Pausing drops it and resuming
/// swaps in a fresh one, so at most one timer runs at a time.
#[derive(Debug)]
pub struct AutoplaySlot<T> {
    timer: Option<T>,
}

impl<T> AutoplaySlot<T> {
    pub fn running(timer: T) -> Self {
        Self { timer: Some(timer) }
    }

    /// Returns whether a timer was running.
    pub fn pause(&mut self) -> bool {
        self.timer.take().is_some()
    }

    /// Returns whether an already running timer was replaced.
    pub fn resume(&mut self, timer: T) -> bool {
        self.timer.replace(timer).is_some()
    }
}

/// Turns a touch start/end pair into a slide direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    threshold: f64,
    start_x: f64,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: 0.0,
        }
    }

    pub fn start(&mut self, x: f64) {
        self.start_x = x;
    }

    /// Travel up to the threshold is a tap. Dragging left advances and
    /// dragging right goes back.
    pub fn end(&self, x: f64) -> Option<Direction> {
        let travel = self.start_x - x;
        if travel.abs() <= self.threshold {
            None
        } else if travel > 0.0 {
            Some(Direction::Forward)
        } else {
            Some(Direction::Backward)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn active_count(state: &SliderState) -> usize {
        (0..state.slide_count())
            .filter(|&index| state.position_of(index) == SlidePosition::Active)
            .count()
    }

    fn active_dots(state: &SliderState) -> Vec<usize> {
        (0..state.slide_count())
            .filter(|&index| state.dot_is_active(index))
            .collect()
    }

    #[test]
    fn full_cycle_of_next_returns_to_start() {
        for count in 1..=7 {
            let mut state = SliderState::new(count);
            for _ in 0..count {
                assert!(state.next());
                state.unlock();
            }
            assert_eq!(state.current(), 0, "{} slides", count);
        }
    }

    #[test]
    fn prev_wraps_to_last_slide() {
        let mut state = SliderState::new(4);
        assert!(state.prev());
        assert_eq!(state.current(), 3);
    }

    #[test]
    fn lock_blocks_rotation_until_unlocked() {
        let mut state = SliderState::new(3);
        assert!(state.next());
        assert!(state.is_transitioning());

        assert!(!state.next());
        assert!(!state.prev());
        assert_eq!(state.current(), 1);

        state.unlock();
        assert!(state.prev());
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn go_to_current_index_is_a_no_op() {
        let mut state = SliderState::new(3);
        assert!(!state.go_to(0));
        assert_eq!(state, SliderState::new(3));
    }

    #[test]
    fn go_to_jumps_without_taking_the_lock() {
        let mut state = SliderState::new(5);
        assert!(state.go_to(3));
        assert_eq!(state.current(), 3);
        assert!(!state.is_transitioning());

        assert!(state.go_to(1));
        assert_eq!(state.current(), 1);
    }

    #[test]
    fn go_to_is_ignored_while_transitioning() {
        let mut state = SliderState::new(5);
        state.next();
        assert!(!state.go_to(4));
        assert_eq!(state.current(), 1);
    }

    #[test]
    fn go_to_out_of_range_is_ignored() {
        let mut state = SliderState::new(3);
        assert!(!state.go_to(3));
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn positions_mark_cyclic_neighbours() {
        let state = SliderState::new(5);
        assert_eq!(state.position_of(0), SlidePosition::Active);
        assert_eq!(state.position_of(4), SlidePosition::Prev);
        assert_eq!(state.position_of(1), SlidePosition::Next);
        assert_eq!(state.position_of(2), SlidePosition::Hidden);
        assert_eq!(state.position_of(3), SlidePosition::Hidden);
    }

    #[test]
    fn two_slides_mark_the_neighbour_as_prev() {
        let mut state = SliderState::new(2);
        assert_eq!(state.position_of(1), SlidePosition::Prev);
        state.next();
        assert_eq!(state.position_of(0), SlidePosition::Prev);
        assert_eq!(state.position_of(1), SlidePosition::Active);
    }

    #[test]
    fn single_slide_stays_active() {
        let mut state = SliderState::new(1);
        assert!(state.next());
        assert_eq!(state.current(), 0);
        assert_eq!(state.position_of(0), SlidePosition::Active);
    }

    #[test]
    fn exactly_one_active_after_mixed_operations() {
        let mut state = SliderState::new(6);
        let ops: [fn(&mut SliderState) -> bool; 6] = [
            SliderState::next,
            SliderState::prev,
            |s| s.go_to(4),
            SliderState::next,
            |s| s.go_to(0),
            SliderState::prev,
        ];
        for (round, op) in ops.iter().cycle().take(30).enumerate() {
            op(&mut state);
            if round % 2 == 0 {
                state.unlock();
            }
            assert_eq!(active_count(&state), 1);
            assert_eq!(active_dots(&state), vec![state.current()]);
        }
    }

    #[test]
    fn dot_follows_go_to() {
        let mut state = SliderState::new(4);
        state.go_to(2);
        assert_eq!(active_dots(&state), vec![2]);
        assert_eq!(state.position_of(2), SlidePosition::Active);
    }

    struct CountedTimer(Rc<Cell<usize>>);

    impl CountedTimer {
        fn start(live: &Rc<Cell<usize>>) -> Self {
            live.set(live.get() + 1);
            Self(Rc::clone(live))
        }
    }

    impl Drop for CountedTimer {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    #[test]
    fn pause_clears_the_running_timer() {
        let live = Rc::new(Cell::new(0));
        let mut autoplay = AutoplaySlot::running(CountedTimer::start(&live));
        assert_eq!(live.get(), 1);

        assert!(autoplay.pause());
        assert_eq!(live.get(), 0);
        assert!(!autoplay.pause());
    }

    #[test]
    fn repeated_resume_keeps_a_single_timer() {
        let live = Rc::new(Cell::new(0));
        let mut autoplay = AutoplaySlot::running(CountedTimer::start(&live));
        autoplay.pause();

        assert!(!autoplay.resume(CountedTimer::start(&live)));
        assert!(autoplay.resume(CountedTimer::start(&live)));
        assert_eq!(live.get(), 1);
        assert!(autoplay.pause());
    }

    #[test]
    fn hidden_slides_carry_no_class() {
        assert_eq!(SlidePosition::Hidden.class(), None);
        for position in [SlidePosition::Active, SlidePosition::Prev, SlidePosition::Next] {
            let class = position.class().unwrap();
            assert!(POSITION_CLASSES.contains(&class));
        }
    }

    #[test]
    fn short_swipes_are_taps() {
        let mut swipe = SwipeTracker::new(50.0);
        swipe.start(200.0);
        assert_eq!(swipe.end(200.0), None);
        assert_eq!(swipe.end(150.0), None);
        assert_eq!(swipe.end(250.0), None);
    }

    #[test]
    fn long_swipes_pick_a_direction() {
        let mut swipe = SwipeTracker::new(50.0);
        swipe.start(200.0);
        assert_eq!(swipe.end(149.0), Some(Direction::Forward));
        assert_eq!(swipe.end(251.0), Some(Direction::Backward));
    }

    #[test]
    fn swipe_changes_slide_exactly_once() {
        let mut state = SliderState::new(4);
        let mut swipe = SwipeTracker::new(50.0);
        swipe.start(300.0);
        if let Some(direction) = swipe.end(100.0) {
            state.step(direction);
        }
        assert_eq!(state.current(), 1);
    }
}
