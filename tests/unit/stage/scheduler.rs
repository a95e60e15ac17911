use super::*;

fn show(page: u32) -> Task {
    Task::ShowPage {
        page: PageId(page),
        epoch: 0,
    }
}

#[test]
fn pops_in_due_order_then_fifo() {
    let mut s = Scheduler::new();
    s.schedule(0.5, show(1));
    s.schedule(0.25, show(2));
    s.schedule(0.5, show(3));
    s.schedule(0.0, show(4));

    let mut order = Vec::new();
    while let Some(task) = s.pop_due(10.0) {
        order.push((s.now(), task));
    }
    assert_eq!(
        order,
        vec![
            (0.0, show(4)),
            (0.25, show(2)),
            (0.5, show(1)),
            (0.5, show(3)),
        ]
    );
}

#[test]
fn respects_limit_and_relative_delays() {
    let mut s = Scheduler::new();
    s.schedule(1.0, show(1));
    assert_eq!(s.pop_due(0.5), None);
    s.advance_to(0.5);
    s.schedule(0.25, show(2));
    assert_eq!(s.next_due(), Some(0.75));
    assert_eq!(s.pop_due(0.75), Some(show(2)));
    assert_eq!(s.now(), 0.75);
    assert_eq!(s.pending(), 1);
}

#[test]
fn negative_delay_fires_now_and_clock_never_rewinds() {
    let mut s = Scheduler::new();
    s.advance_to(2.0);
    s.schedule(-1.0, show(1));
    assert_eq!(s.next_due(), Some(2.0));
    s.advance_to(1.0);
    assert_eq!(s.now(), 2.0);
}
