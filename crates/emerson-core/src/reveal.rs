//! Scroll-triggered entrance animations
//!
//! Eligible elements start hidden (`animate-on-scroll`) and are revealed
//! (`visible`) the first time a quarter of them is on screen. Revealing is
//! one-shot: the element leaves the watch set and is unobserved.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::RevealConfig;
use crate::controller::RoutineStatus;
use crate::host::PageHost;

/// Elements still waiting to be revealed.
#[derive(Debug, Clone)]
pub struct RevealSet<N> {
    pending: Vec<N>,
    total: usize,
}

impl<N: PartialEq> RevealSet<N> {
    pub fn new(nodes: Vec<N>) -> Self {
        let total = nodes.len();
        Self {
            pending: nodes,
            total,
        }
    }

    pub fn is_pending(&self, node: &N) -> bool {
        self.pending.contains(node)
    }

    /// Remove `node` from the set. Returns `false` if it was already drained
    /// or never watched.
    pub fn drain(&mut self, node: &N) -> bool {
        match self.pending.iter().position(|pending| pending == node) {
            Some(index) => {
                self.pending.swap_remove(index);
                true
            }
            None => false,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn revealed_count(&self) -> usize {
        self.total - self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// `animation-delay` value for the `index`-th member of a stagger group.
///
/// Rounded to the millisecond so `3 * 0.1` renders as `0.3s`.
pub fn stagger_delay(index: usize, step_secs: f64) -> String {
    let millis = (index as f64 * step_secs * 1000.0).round();
    format!("{}s", millis / 1000.0)
}

/// Tag, stagger and watch every eligible element.
pub(crate) fn wire_reveal<H: PageHost>(
    host: &Rc<H>,
    config: &RevealConfig,
) -> (RoutineStatus, Option<Rc<RefCell<RevealSet<H::Node>>>>) {
    for group in &config.stagger {
        for (index, node) in host.query_all(&group.selector).iter().enumerate() {
            host.set_style(node, "animation-delay", &stagger_delay(index, group.step_secs));
        }
    }

    let nodes = host.query_all(&config.selector);
    if nodes.is_empty() {
        return (RoutineStatus::missing(&config.selector), None);
    }
    for node in &nodes {
        host.add_class(node, &config.pending_class);
    }

    let set = Rc::new(RefCell::new(RevealSet::new(nodes.clone())));
    let watch_set = Rc::clone(&set);
    let page = Rc::clone(host);
    let visible_class = config.visible_class.clone();
    let observed = host.observe_visibility(
        config.threshold,
        &nodes,
        Box::new(move |node: &H::Node| {
            if !watch_set.borrow_mut().drain(node) {
                return;
            }
            page.add_class(node, &visible_class);
            page.unobserve_visibility(node);
            tracing::trace!(?node, "Revealed");
        }),
    );
    if let Err(err) = observed {
        tracing::warn!(error = %err, "Visibility watcher unavailable");
        return (RoutineStatus::failed(err.to_string()), None);
    }
    (RoutineStatus::enabled(nodes.len()), Some(set))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_is_one_shot() {
        let mut set = RevealSet::new(vec![1, 2, 3]);
        assert!(set.drain(&2));
        assert!(!set.drain(&2));
        assert!(!set.is_pending(&2));
        assert_eq!(set.pending_count(), 2);
        assert_eq!(set.revealed_count(), 1);
    }

    #[test]
    fn test_drain_unknown_node() {
        let mut set = RevealSet::new(vec!["a"]);
        assert!(!set.drain(&"b"));
        assert_eq!(set.revealed_count(), 0);
    }

    #[test]
    fn test_stagger_delay_steps() {
        assert_eq!(stagger_delay(0, 0.1), "0s");
        assert_eq!(stagger_delay(3, 0.1), "0.3s");
        assert_eq!(stagger_delay(2, 0.2), "0.4s");
        assert_eq!(stagger_delay(15, 0.1), "1.5s");
    }
}
