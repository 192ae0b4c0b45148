// Host-side tests for listener handles.

use starfield_core::{Subscription, Subscriptions};
use std::cell::Cell;
use std::rc::Rc;

fn counted(label: &'static str) -> (Subscription, Rc<Cell<u32>>) {
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    (Subscription::new(label, move || h.set(h.get() + 1)), hits)
}

#[test]
fn revoke_runs_once() {
    let (sub, hits) = counted("resize");
    assert_eq!(sub.label(), "resize");
    sub.revoke();
    assert_eq!(hits.get(), 1);
}

#[test]
fn drop_revokes() {
    let (sub, hits) = counted("mousemove");
    drop(sub);
    assert_eq!(hits.get(), 1);
}

#[test]
fn detach_keeps_the_registration() {
    let (sub, hits) = counted("change");
    sub.detach();
    assert_eq!(hits.get(), 0);
}

#[test]
fn clearing_a_set_revokes_each_member() {
    let (a, ha) = counted("mousemove");
    let (b, hb) = counted("resize");
    let mut subs = Subscriptions::new();
    subs.push(a);
    subs.push(b);
    assert!(!subs.spilled());
    subs.clear();
    assert_eq!((ha.get(), hb.get()), (1, 1));
}

#[test]
fn debug_shows_label_and_state() {
    let (sub, _hits) = counted("resize");
    let text = format!("{:?}", sub);
    assert!(text.contains("resize"));
    assert!(text.contains("active: true"));
}
