//! Guarded finite state machine
//!
//! Transitions are predicates over a caller-supplied context. At most one
//! transition fires per `update`; global transitions are checked first and
//! never re-enter the state already current.

use std::collections::HashMap;
use std::hash::Hash;

/// A state in the state machine
pub trait State: Copy + Eq + Hash {}

type Guard<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

struct Edge<S, C> {
    to: S,
    guard: Guard<C>,
}

impl<S: State, C> Edge<S, C> {
    fn fires(&self, context: &C) -> bool {
        (self.guard)(context)
    }
}

pub struct StateMachine<S: State, C> {
    current: S,
    previous: Option<S>,
    edges: HashMap<S, Vec<Edge<S, C>>>,
    global: Vec<Edge<S, C>>,
}

impl<S: State, C> StateMachine<S, C> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            previous: None,
            edges: HashMap::new(),
            global: Vec::new(),
        }
    }

    /// Edges from one state are tried in insertion order
    pub fn add_transition<F>(&mut self, from: S, to: S, guard: F)
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.edges.entry(from).or_default().push(Edge {
            to,
            guard: Box::new(guard),
        });
    }

    /// Transition that can fire from any state
    pub fn add_global_transition<F>(&mut self, to: S, guard: F)
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.global.push(Edge {
            to,
            guard: Box::new(guard),
        });
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn previous(&self) -> Option<S> {
        self.previous
    }

    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Evaluate guards; returns `(from, to)` when a transition fired
    pub fn update(&mut self, context: &C) -> Option<(S, S)> {
        let from = self.current;

        let to = self
            .global
            .iter()
            .find(|edge| edge.to != from && edge.fires(context))
            .or_else(|| self.edges.get(&from)?.iter().find(|edge| edge.fires(context)))
            .map(|edge| edge.to)?;

        self.previous = Some(from);
        self.current = to;
        Some((from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Door {
        Closed,
        Open,
        Locked,
    }

    impl State for Door {}

    struct Keys {
        pushed: bool,
        key: bool,
        alarm: bool,
    }

    fn door() -> StateMachine<Door, Keys> {
        let mut fsm = StateMachine::new(Door::Closed);
        fsm.add_transition(Door::Closed, Door::Open, |k: &Keys| k.pushed);
        fsm.add_transition(Door::Open, Door::Closed, |k: &Keys| !k.pushed);
        fsm.add_transition(Door::Locked, Door::Closed, |k: &Keys| k.key);
        fsm.add_global_transition(Door::Locked, |k: &Keys| k.alarm);
        fsm
    }

    #[test]
    fn test_guarded_edges() {
        let mut fsm = door();
        let mut keys = Keys {
            pushed: false,
            key: false,
            alarm: false,
        };

        assert_eq!(fsm.update(&keys), None);
        keys.pushed = true;
        assert_eq!(fsm.update(&keys), Some((Door::Closed, Door::Open)));
        keys.pushed = false;
        assert_eq!(fsm.update(&keys), Some((Door::Open, Door::Closed)));
        assert_eq!(fsm.previous(), Some(Door::Open));
    }

    #[test]
    fn test_global_wins_and_does_not_reenter() {
        let mut fsm = door();
        let keys = Keys {
            pushed: true,
            key: false,
            alarm: true,
        };

        assert_eq!(fsm.update(&keys), Some((Door::Closed, Door::Locked)));
        assert_eq!(fsm.update(&keys), None);
        assert!(fsm.is_in(Door::Locked));
    }

    #[test]
    fn test_one_transition_per_update() {
        let mut fsm = door();
        let keys = Keys {
            pushed: true,
            key: true,
            alarm: false,
        };

        fsm.update(&keys);
        assert!(fsm.is_in(Door::Open));
        fsm.update(&keys);
        assert!(fsm.is_in(Door::Open));
    }
}
