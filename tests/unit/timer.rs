use super::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn drain(q: &mut TimerQueue<&'static str>, now: Duration) -> Vec<(u128, &'static str)> {
    std::iter::from_fn(|| q.pop_due(now))
        .map(|f| (f.due.as_millis(), f.payload))
        .collect()
}

#[test]
fn fires_in_due_order() {
    let mut q = TimerQueue::new();
    q.schedule_once(ms(0), ms(30), "c");
    q.schedule_once(ms(0), ms(10), "a");
    q.schedule_once(ms(5), ms(15), "b");

    assert_eq!(q.next_due(), Some(ms(10)));
    assert_eq!(drain(&mut q, ms(9)), vec![]);
    assert_eq!(drain(&mut q, ms(100)), vec![(10, "a"), (20, "b"), (30, "c")]);
    assert!(q.is_empty());
}

#[test]
fn ties_fire_in_arm_order() {
    let mut q = TimerQueue::new();
    for name in ["first", "second", "third"] {
        q.schedule_once(ms(0), ms(7), name);
    }
    assert_eq!(
        drain(&mut q, ms(7)),
        vec![(7, "first"), (7, "second"), (7, "third")]
    );
}

#[test]
fn cancelled_timers_never_fire() {
    let mut q = TimerQueue::new();
    let a = q.schedule_once(ms(0), ms(1), "a");
    q.schedule_once(ms(0), ms(2), "b");

    assert!(q.cancel(a));
    assert!(!q.cancel(a));
    assert!(!q.is_pending(a));
    assert_eq!(q.len(), 1);
    assert_eq!(q.next_due(), Some(ms(2)));
    assert_eq!(drain(&mut q, ms(10)), vec![(2, "b")]);
}

#[test]
fn one_shot_handles_expire_after_firing() {
    let mut q = TimerQueue::new();
    let h = q.schedule_once(ms(0), ms(3), "x");
    let fired = q.pop_due(ms(3)).unwrap();
    assert_eq!(fired.handle, h);
    assert!(!q.is_pending(h));
    assert!(!q.cancel(h));
}

#[test]
fn repeating_timers_rearm_under_the_same_handle() {
    let mut q = TimerQueue::new();
    let h = q
        .schedule_repeating(ms(300), ms(1), ms(1), "tick")
        .unwrap();
    q.schedule_once(ms(300), ms(2), "once");

    let fired: Vec<_> = std::iter::from_fn(|| q.pop_due(ms(303))).collect();
    let dues: Vec<u128> = fired.iter().map(|f| f.due.as_millis()).collect();
    let names: Vec<&str> = fired.iter().map(|f| f.payload).collect();
    assert_eq!(dues, vec![301, 302, 302, 303]);
    assert_eq!(names, vec!["tick", "once", "tick", "tick"]);
    assert!(fired.iter().filter(|f| f.payload == "tick").all(|f| f.handle == h));

    assert!(q.is_pending(h));
    assert_eq!(q.next_due(), Some(ms(304)));
    assert!(q.cancel(h));
    assert_eq!(q.next_due(), None);
}

#[test]
fn zero_period_is_rejected() {
    let mut q = TimerQueue::<()>::new();
    assert!(q.schedule_repeating(ms(0), ms(1), Duration::ZERO, ()).is_err());
    assert!(q.is_empty());
}
