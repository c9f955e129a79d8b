//! Cooperative timers driven by the frame clock
//!
//! Recurring lines are keyed by their task value: `set_interval` always
//! replaces an existing line for the same task, so a line can never run
//! twice concurrently. One-shot timeouts are either global or bound to the
//! current session; `invalidate_session` drops every session-bound timeout
//! still pending.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeoutId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    Global,
    Session,
}

#[derive(Debug)]
struct Interval<T> {
    task: T,
    period: f64,
    due: f64,
    seq: u64,
}

#[derive(Debug)]
struct Timeout<T> {
    id: TimeoutId,
    task: T,
    due: f64,
    seq: u64,
    generation: Option<u64>,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    intervals: Vec<Interval<T>>,
    timeouts: Vec<Timeout<T>>,
    seq: u64,
    generation: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            intervals: Vec::new(),
            timeouts: Vec::new(),
            seq: 0,
            generation: 0,
        }
    }
}

impl<T: Clone + PartialEq> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Clears any line running `task`, then starts a new one whose first
    /// firing is `period_ms` after `now`.
    pub fn set_interval(&mut self, task: T, period_ms: f64, now: f64) {
        self.clear_interval(&task);
        let period = period_ms.max(1.0);
        let seq = self.next_seq();
        self.intervals.push(Interval {
            task,
            period,
            due: now + period,
            seq,
        });
    }

    pub fn clear_interval(&mut self, task: &T) {
        self.intervals.retain(|i| &i.task != task);
    }

    pub fn has_interval(&self, task: &T) -> bool {
        self.intervals.iter().any(|i| &i.task == task)
    }

    pub fn set_timeout(&mut self, task: T, delay_ms: f64, now: f64, scope: Scope) -> TimeoutId {
        let seq = self.next_seq();
        let id = TimeoutId(seq);
        let generation = match scope {
            Scope::Global => None,
            Scope::Session => Some(self.generation),
        };
        self.timeouts.push(Timeout {
            id,
            task,
            due: now + delay_ms.max(0.0),
            seq,
            generation,
        });
        id
    }

    pub fn cancel(&mut self, id: TimeoutId) -> bool {
        let before = self.timeouts.len();
        self.timeouts.retain(|t| t.id != id);
        before != self.timeouts.len()
    }

    /// Starts a new session. Pending session-bound timeouts never fire.
    pub fn invalidate_session(&mut self) -> usize {
        self.generation += 1;
        let generation = self.generation;
        let before = self.timeouts.len();
        self.timeouts
            .retain(|t| t.generation.map_or(true, |g| g == generation));
        let dropped = before - self.timeouts.len();
        if dropped > 0 {
            log::debug!("dropped {dropped} stale staged continuations");
        }
        dropped
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending_timeouts(&self) -> usize {
        self.timeouts.len()
    }

    /// Removes and returns the earliest task due at or before `now`.
    ///
    /// Callers drain in a loop so that handlers which reschedule lines are
    /// observed before the next task is picked. A line that fell several
    /// periods behind fires once and resumes on its original phase.
    pub fn pop_due(&mut self, now: f64) -> Option<T> {
        let timeout = self
            .timeouts
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(i, t)| (i, t.due, t.seq));

        let interval = self
            .intervals
            .iter()
            .enumerate()
            .filter(|(_, i)| i.due <= now)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(i, line)| (i, line.due, line.seq));

        let take_interval = match (timeout, interval) {
            (None, None) => return None,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (Some((_, t_due, t_seq)), Some((_, i_due, i_seq))) => {
                (i_due, i_seq) < (t_due, t_seq)
            }
        };

        if take_interval {
            let (index, _, _) = interval?;
            let line = &mut self.intervals[index];
            while line.due <= now {
                line.due += line.period;
            }
            Some(line.task.clone())
        } else {
            let (index, _, _) = timeout?;
            Some(self.timeouts.swap_remove(index).task)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler<&'static str>, now: f64) -> Vec<&'static str> {
        std::iter::from_fn(|| s.pop_due(now)).collect()
    }

    #[test]
    fn interval_replaces_existing_line() {
        let mut s = Scheduler::new();
        s.set_interval("tick", 1000.0, 0.0);
        s.set_interval("tick", 1000.0, 500.0);
        assert!(drain(&mut s, 1000.0).is_empty());
        assert_eq!(drain(&mut s, 1500.0), vec!["tick"]);
    }

    #[test]
    fn interval_coalesces_missed_periods() {
        let mut s = Scheduler::new();
        s.set_interval("tick", 1000.0, 0.0);
        assert_eq!(drain(&mut s, 5500.0), vec!["tick"]);
        assert!(drain(&mut s, 5999.0).is_empty());
        assert_eq!(drain(&mut s, 6000.0), vec!["tick"]);
    }

    #[test]
    fn timeouts_fire_in_due_order() {
        let mut s = Scheduler::new();
        s.set_timeout("late", 300.0, 0.0, Scope::Global);
        s.set_timeout("early", 100.0, 0.0, Scope::Global);
        s.set_timeout("tie", 100.0, 0.0, Scope::Global);
        assert_eq!(drain(&mut s, 400.0), vec!["early", "tie", "late"]);
        assert_eq!(s.pending_timeouts(), 0);
    }

    #[test]
    fn cancel_removes_pending_timeout() {
        let mut s = Scheduler::new();
        let id = s.set_timeout("gone", 100.0, 0.0, Scope::Global);
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(drain(&mut s, 1000.0).is_empty());
    }

    #[test]
    fn invalidate_session_drops_only_session_timeouts() {
        let mut s = Scheduler::new();
        s.set_timeout("stale", 100.0, 0.0, Scope::Session);
        s.set_timeout("kept", 100.0, 0.0, Scope::Global);
        let before = s.generation();
        assert_eq!(s.invalidate_session(), 1);
        assert_eq!(s.generation(), before + 1);
        s.set_timeout("fresh", 100.0, 0.0, Scope::Session);
        assert_eq!(drain(&mut s, 200.0), vec!["kept", "fresh"]);
    }

    #[test]
    fn rescheduling_during_drain_is_observed() {
        let mut s = Scheduler::new();
        s.set_interval("advance", 10_000.0, 0.0);
        s.set_interval("countdown", 1_000.0, 0.0);
        assert_eq!(drain(&mut s, 9_000.0), vec!["countdown"]);

        let mut fired = Vec::new();
        while let Some(task) = s.pop_due(10_000.0) {
            if task == "advance" {
                s.set_interval("countdown", 1_000.0, 10_000.0);
            }
            fired.push(task);
        }
        assert_eq!(fired, vec!["advance"]);
    }
}
