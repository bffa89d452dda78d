//! A single explicit scheduler for everything that runs while a game is being played.
//!
//! Work is described by tagged [`Task`]s rather than handler objects: periodic ticks
//! fire a [`Job`] every `interval`, input handlers fire a [`Job`] for each matching
//! input event. The session decides what each job does.

use std::{collections::VecDeque, time::Duration};

use super::input::InputEvent;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Job {
    MoveSnake,
    CheckApple,
    SteerSnake,
    SteerCamera,
    ToggleMorph,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum InputKind {
    Key,
    Tap,
}

impl InputKind {
    pub fn of(event: &InputEvent) -> InputKind {
        match event {
            InputEvent::Key(_) => InputKind::Key,
            InputEvent::Tap(_) => InputKind::Tap,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Task {
    PeriodicTick {
        interval: Duration,
        next_due: Duration,
        job: Job,
    },
    InputHandler {
        kind: InputKind,
        job: Job,
    },
}

#[derive(Default, Debug)]
pub struct Scheduler {
    now: Duration,
    tasks: Vec<Task>,
    pending_input: VecDeque<InputEvent>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// First firing is one full interval from now.
    pub fn every(&mut self, interval: Duration, job: Job) {
        // A zero interval would fire forever inside one `advance`.
        let interval = interval.max(Duration::from_millis(1));
        self.tasks.push(Task::PeriodicTick {
            interval,
            next_due: self.now + interval,
            job,
        });
    }

    pub fn on_input(&mut self, kind: InputKind, job: Job) {
        self.tasks.push(Task::InputHandler { kind, job });
    }

    /// Unregister every task and drop queued input.
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.pending_input.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.pending_input.push_back(event);
    }

    pub fn pending_input(&self) -> usize {
        self.pending_input.len()
    }

    /// Pop the next queued input together with the jobs subscribed to it, in
    /// registration order. Input nobody handles is consumed and yields no jobs.
    pub fn next_input(&mut self) -> Option<(InputEvent, Vec<Job>)> {
        let event = self.pending_input.pop_front()?;
        let kind = InputKind::of(&event);
        let jobs = self
            .tasks
            .iter()
            .filter_map(|task| match task {
                Task::InputHandler { kind: k, job } if *k == kind => Some(*job),
                _ => None,
            })
            .collect();
        Some((event, jobs))
    }

    /// Move the clock forward by `dt` and return every periodic job that came due, in
    /// time order. Jobs due at the same instant keep registration order.
    pub fn advance(&mut self, dt: Duration) -> Vec<Job> {
        let target = self.now + dt;
        let mut fired = Vec::new();
        loop {
            let mut earliest: Option<(usize, Duration)> = None;
            for (i, task) in self.tasks.iter().enumerate() {
                if let Task::PeriodicTick { next_due, .. } = task {
                    if *next_due <= target && earliest.map_or(true, |(_, due)| *next_due < due) {
                        earliest = Some((i, *next_due));
                    }
                }
            }
            let Some((i, _)) = earliest else { break };
            if let Task::PeriodicTick { interval, next_due, job } = &mut self.tasks[i] {
                fired.push(*job);
                *next_due += *interval;
            }
        }
        self.now = target;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake_game::input::{GameKey, TapTarget};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_cadences() {
        let mut scheduler = Scheduler::new();
        scheduler.every(ms(20), Job::MoveSnake);
        scheduler.every(ms(100), Job::CheckApple);
        let fired = scheduler.advance(ms(1000));
        assert_eq!(fired.iter().filter(|j| **j == Job::MoveSnake).count(), 50);
        assert_eq!(fired.iter().filter(|j| **j == Job::CheckApple).count(), 10);
    }

    #[test]
    fn test_move_runs_before_check_at_same_instant() {
        let mut scheduler = Scheduler::new();
        scheduler.every(ms(20), Job::MoveSnake);
        scheduler.every(ms(100), Job::CheckApple);
        let fired = scheduler.advance(ms(100));
        assert_eq!(
            fired,
            vec![
                Job::MoveSnake,
                Job::MoveSnake,
                Job::MoveSnake,
                Job::MoveSnake,
                Job::MoveSnake,
                Job::CheckApple,
            ]
        );
    }

    #[test]
    fn test_partial_frames_accumulate() {
        let mut scheduler = Scheduler::new();
        scheduler.every(ms(20), Job::MoveSnake);
        assert!(scheduler.advance(ms(16)).is_empty());
        assert_eq!(scheduler.advance(ms(16)), vec![Job::MoveSnake]);
        assert!(scheduler.advance(ms(7)).is_empty());
        assert_eq!(scheduler.advance(ms(1)), vec![Job::MoveSnake]);
    }

    #[test]
    fn test_input_routing() {
        let mut scheduler = Scheduler::new();
        scheduler.on_input(InputKind::Key, Job::SteerSnake);
        scheduler.on_input(InputKind::Key, Job::SteerCamera);
        scheduler.on_input(InputKind::Tap, Job::ToggleMorph);
        scheduler.push_input(InputEvent::Key(GameKey::TurnLeft));
        scheduler.push_input(InputEvent::Tap(TapTarget::Apple));

        let (event, jobs) = scheduler.next_input().unwrap();
        assert_eq!(event, InputEvent::Key(GameKey::TurnLeft));
        assert_eq!(jobs, vec![Job::SteerSnake, Job::SteerCamera]);
        let (_, jobs) = scheduler.next_input().unwrap();
        assert_eq!(jobs, vec![Job::ToggleMorph]);
        assert!(scheduler.next_input().is_none());
    }

    #[test]
    fn test_clear_cancels_everything() {
        let mut scheduler = Scheduler::new();
        scheduler.every(ms(20), Job::MoveSnake);
        scheduler.on_input(InputKind::Key, Job::SteerSnake);
        scheduler.push_input(InputEvent::Key(GameKey::TurnRight));
        scheduler.clear();
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.pending_input(), 0);
        assert!(scheduler.advance(ms(500)).is_empty());
    }
}
