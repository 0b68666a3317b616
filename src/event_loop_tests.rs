use super::*;
use crate::menu::MenuEntry;
use crate::monitor::PollSchedule;
use crate::notify::{Notification, SinkError};
use crate::port::{EnumerateError, PortRecord, PortSnapshot};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Returns scripted results in order, then `fallback` forever.
struct ScriptedEnumerator {
    results: Mutex<VecDeque<Result<PortSnapshot, EnumerateError>>>,
    fallback: PortSnapshot,
}

impl ScriptedEnumerator {
    fn new(results: Vec<Result<PortSnapshot, EnumerateError>>, fallback: PortSnapshot) -> Self {
        Self {
            results: Mutex::new(results.into()),
            fallback,
        }
    }

    fn fixed(snapshot: PortSnapshot) -> Self {
        Self::new(Vec::new(), snapshot)
    }
}

impl PortEnumerator for ScriptedEnumerator {
    fn try_enumerate(&self) -> Result<PortSnapshot, EnumerateError> {
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

#[derive(Clone, Default)]
struct RecordingSink {
    shown: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationSink for RecordingSink {
    fn show(&self, notification: &Notification) -> Result<(), SinkError> {
        self.shown.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct RecordingMenu {
    populated: Arc<Mutex<Vec<Vec<MenuEntry>>>>,
}

impl MenuDisplay for RecordingMenu {
    fn populate(&mut self, entries: &[MenuEntry]) {
        self.populated.lock().unwrap().push(entries.to_vec());
    }
}

struct Harness {
    sink: RecordingSink,
    menu: RecordingMenu,
    control: UnboundedSender<ControlEvent>,
    event_loop: EventLoop<ScriptedEnumerator, RecordingSink, RecordingMenu>,
}

fn harness(enumerator: ScriptedEnumerator, schedule: PollSchedule) -> Harness {
    let sink = RecordingSink::default();
    let menu = RecordingMenu::default();
    let (control, events) = control_channel();
    let event_loop = EventLoop::new(
        enumerator,
        AdaptivePoller::new(schedule),
        NotificationDispatcher::new(sink.clone()),
        MenuSync::new(menu.clone()),
        events,
    );
    Harness {
        sink,
        menu,
        control,
        event_loop,
    }
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn snapshot(records: &[(&str, &str)]) -> PortSnapshot {
    records
        .iter()
        .map(|(id, desc)| PortRecord::new(*id, *desc))
        .collect()
}

/// Sends `event` after `delay` of (paused) time.
async fn send_after(control: &UnboundedSender<ControlEvent>, delay: Duration, event: ControlEvent) {
    sleep(delay).await;
    control.send(event).unwrap();
}

// With the default schedule (idle 2000ms, active 1000ms, tick 100ms) the
// first cycle runs on the tenth tick, at t = 1000ms. Later cycles follow at
// +2000ms after a quiet cycle and +1000ms after a cycle with changes.

mod lifecycle {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn quit_before_start_runs_no_cycles() {
        let h = harness(
            ScriptedEnumerator::fixed(snapshot(&[])),
            PollSchedule::default(),
        );
        h.control.send(ControlEvent::Quit).unwrap();

        let summary = h.event_loop.run().await;

        assert_eq!(summary, LoopSummary::default());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_sender_stops_loop() {
        let h = harness(
            ScriptedEnumerator::fixed(snapshot(&[])),
            PollSchedule::default(),
        );
        drop(h.control);

        let summary = h.event_loop.run().await;

        assert_eq!(summary.cycles, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn quit_is_observed_within_one_tick() {
        let schedule = PollSchedule::new(ms(60_000), ms(30_000), ms(100));
        let h = harness(ScriptedEnumerator::fixed(snapshot(&[])), schedule);
        let start = Instant::now();

        let (summary, ()) = tokio::join!(
            h.event_loop.run(),
            send_after(&h.control, ms(250), ControlEvent::Quit)
        );

        assert_eq!(summary.cycles, 0);
        assert!(start.elapsed() <= ms(350), "took {:?}", start.elapsed());
    }

    #[tokio::test(start_paused = true)]
    async fn quit_wins_over_later_events_in_same_drain() {
        let h = harness(
            ScriptedEnumerator::fixed(snapshot(&[])),
            PollSchedule::default(),
        );
        h.control.send(ControlEvent::Quit).unwrap();
        h.control.send(ControlEvent::MenuOpening).unwrap();

        h.event_loop.run().await;

        assert!(h.menu.populated.lock().unwrap().is_empty());
    }
}

mod polling {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn baseline_dispatches_nothing() {
        let ports = snapshot(&[("COM1", "A"), ("COM3", "USB Serial"), ("COM7", "")]);
        let h = harness(ScriptedEnumerator::fixed(ports), PollSchedule::default());

        let (summary, ()) = tokio::join!(
            h.event_loop.run(),
            send_after(&h.control, ms(1_050), ControlEvent::Quit)
        );

        assert_eq!(summary.cycles, 1);
        assert_eq!(summary.events, 0);
        assert!(h.sink.shown.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn no_cycle_before_active_interval_elapses() {
        let h = harness(
            ScriptedEnumerator::fixed(snapshot(&[])),
            PollSchedule::default(),
        );

        let start = Instant::now();

        let (summary, ()) = tokio::join!(
            h.event_loop.run(),
            send_after(&h.control, ms(950), ControlEvent::Quit)
        );

        assert_eq!(summary.cycles, 0);
        assert_eq!(start.elapsed(), ms(1_000));
    }

    #[tokio::test(start_paused = true)]
    async fn attach_then_detach_dispatches_each_change_once() {
        let com3 = ("COM3", "USB Serial");
        let com4 = ("COM4", "Bluetooth");
        let enumerator = ScriptedEnumerator::new(
            vec![Ok(snapshot(&[com3])), Ok(snapshot(&[com3, com4]))],
            snapshot(&[com4]),
        );
        let h = harness(enumerator, PollSchedule::default());

        // Cycles at 1000 (baseline), 3000 (+COM4), 4000 (-COM3), 5000 (quiet).
        let (summary, ()) = tokio::join!(
            h.event_loop.run(),
            send_after(&h.control, ms(5_050), ControlEvent::Quit)
        );

        assert_eq!(summary.cycles, 4);
        assert_eq!(summary.events, 2);
        assert_eq!(
            *h.sink.shown.lock().unwrap(),
            vec![
                Notification::connected("COM4"),
                Notification::disconnected("COM3"),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn change_shortens_next_interval() {
        let enumerator = ScriptedEnumerator::new(
            vec![Ok(snapshot(&[])), Ok(snapshot(&[("COM4", "")]))],
            snapshot(&[("COM4", "")]),
        );
        let h = harness(enumerator, PollSchedule::default());

        // Active after the change at 3000 puts the next cycle at 4000, not 5000.
        let (summary, ()) = tokio::join!(
            h.event_loop.run(),
            send_after(&h.control, ms(4_050), ControlEvent::Quit)
        );

        assert_eq!(summary.cycles, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_enumeration_dispatches_nothing() {
        let ports = snapshot(&[("COM3", "USB Serial")]);
        let enumerator = ScriptedEnumerator::new(
            vec![
                Ok(ports.clone()),
                Err(EnumerateError::Unavailable {
                    reason: "simulated".to_string(),
                }),
            ],
            ports,
        );
        let h = harness(enumerator, PollSchedule::default());

        // Cycles at 1000 (baseline), 3000 (failure), 5000 (recovered).
        let (summary, ()) = tokio::join!(
            h.event_loop.run(),
            send_after(&h.control, ms(5_050), ControlEvent::Quit)
        );

        assert_eq!(summary.cycles, 3);
        assert_eq!(summary.events, 0);
        assert!(h.sink.shown.lock().unwrap().is_empty());
    }
}

mod menu_refresh {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn menu_opening_refreshes_with_live_ports() {
        let ports = snapshot(&[("COM4", ""), ("COM3", "USB Serial")]);
        let h = harness(ScriptedEnumerator::fixed(ports), PollSchedule::default());
        h.control.send(ControlEvent::MenuOpening).unwrap();

        let (summary, ()) = tokio::join!(
            h.event_loop.run(),
            send_after(&h.control, ms(150), ControlEvent::Quit)
        );

        assert_eq!(summary.cycles, 0);
        let populated = h.menu.populated.lock().unwrap();
        assert_eq!(populated.len(), 1);
        let labels: Vec<_> = populated[0].iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["COM3 - USB Serial", "COM4"]);
    }

    #[tokio::test(start_paused = true)]
    async fn menu_refresh_does_not_disturb_polling() {
        let ports = snapshot(&[("COM3", "USB Serial")]);
        let h = harness(ScriptedEnumerator::fixed(ports), PollSchedule::default());
        for _ in 0..3 {
            h.control.send(ControlEvent::MenuOpening).unwrap();
        }

        let (summary, ()) = tokio::join!(
            h.event_loop.run(),
            send_after(&h.control, ms(3_050), ControlEvent::Quit)
        );

        assert_eq!(summary.cycles, 2);
        assert_eq!(summary.events, 0);
        assert_eq!(h.menu.populated.lock().unwrap().len(), 3);
    }
}
