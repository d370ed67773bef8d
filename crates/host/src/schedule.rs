use crate::ctx::Ctx;
use std::collections::BTreeMap;

/// A scheduled unit of work, run against the host context on its due tick.
pub type Task = Box<dyn FnMut(&mut Ctx)>;

struct Entry {
    task: Task,
    repeat_every: Option<u64>,
}

/// Tick-keyed task scheduler driven by the run loop.
///
/// Due tasks execute at the start of their tick, before plugin `on_tick`
/// hooks. Repeating tasks re-enqueue themselves after each run.
#[derive(Default)]
pub struct Scheduler {
    due: BTreeMap<u64, Vec<Entry>>,
    now: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once, `delay` ticks from the current tick. A delay of 0
    /// runs it on the next processed tick.
    pub fn run_later(&mut self, task: Task, delay: u64) {
        self.due.entry(self.now + delay.max(1)).or_default().push(Entry {
            task,
            repeat_every: None,
        });
    }

    /// Run `task` on the next tick.
    pub fn run_next_tick(&mut self, task: Task) {
        self.run_later(task, 1);
    }

    /// Run `task` every `every` ticks, starting `every` ticks from now.
    pub fn run_repeating(&mut self, task: Task, every: u64) {
        let every = every.max(1);
        self.due.entry(self.now + every).or_default().push(Entry {
            task,
            repeat_every: Some(every),
        });
    }

    /// Number of pending schedule slots (repeating tasks count once).
    pub fn pending(&self) -> usize {
        self.due.values().map(|v| v.len()).sum()
    }

    /// Execute everything due at or before `tick`. Called by the game
    /// loop once per tick.
    pub(crate) fn run_due(&mut self, tick: u64, ctx: &mut Ctx) {
        self.now = tick;
        loop {
            let due_key = match self.due.first_key_value() {
                Some((&k, _)) if k <= tick => k,
                _ => break,
            };
            let entries = self.due.remove(&due_key).unwrap_or_default();
            for mut entry in entries {
                (entry.task)(ctx);
                if let Some(every) = entry.repeat_every {
                    self.due.entry(tick + every).or_default().push(entry);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn counter_task(counter: &Rc<RefCell<Vec<u64>>>) -> Task {
        let counter = Rc::clone(counter);
        Box::new(move |ctx: &mut Ctx| counter.borrow_mut().push(ctx.tick()))
    }

    fn drive(scheduler: &mut Scheduler, ctx: &mut Ctx, ticks: u64) {
        for _ in 0..ticks {
            ctx.advance_tick();
            scheduler.run_due(ctx.tick(), ctx);
        }
    }

    #[test]
    fn run_later_fires_at_delay() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Ctx::new();
        let runs = Rc::new(RefCell::new(Vec::new()));
        scheduler.run_later(counter_task(&runs), 3);

        drive(&mut scheduler, &mut ctx, 5);
        assert_eq!(*runs.borrow(), vec![3]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn run_next_tick_fires_once_immediately() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Ctx::new();
        let runs = Rc::new(RefCell::new(Vec::new()));
        scheduler.run_next_tick(counter_task(&runs));

        drive(&mut scheduler, &mut ctx, 3);
        assert_eq!(*runs.borrow(), vec![1]);
    }

    #[test]
    fn repeating_task_reenqueues() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Ctx::new();
        let runs = Rc::new(RefCell::new(Vec::new()));
        scheduler.run_repeating(counter_task(&runs), 2);

        drive(&mut scheduler, &mut ctx, 7);
        assert_eq!(*runs.borrow(), vec![2, 4, 6]);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn tasks_mutate_context() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Ctx::new();
        scheduler.run_next_tick(Box::new(|ctx: &mut Ctx| ctx.request_stop()));

        drive(&mut scheduler, &mut ctx, 1);
        assert!(ctx.stop_requested());
    }

    #[test]
    fn zero_delay_still_waits_one_tick() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Ctx::new();
        let runs = Rc::new(RefCell::new(Vec::new()));
        scheduler.run_later(counter_task(&runs), 0);

        assert_eq!(scheduler.pending(), 1);
        drive(&mut scheduler, &mut ctx, 1);
        assert_eq!(*runs.borrow(), vec![1]);
    }
}
