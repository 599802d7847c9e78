//! Presentation bus delivery order and structured events.

use std::cell::RefCell;
use std::rc::Rc;
#[cfg(feature = "tracing")]
use std::sync::{Arc, Mutex};

use popmenu_runtime::PresentationBus;
#[cfg(feature = "tracing")]
use popmenu_runtime::TriggerId;
#[cfg(feature = "tracing")]
use tracing::Subscriber;
#[cfg(feature = "tracing")]
use tracing_subscriber::Layer;
#[cfg(feature = "tracing")]
use tracing_subscriber::layer::{Context, SubscriberExt};

#[cfg(feature = "tracing")]
struct MessageCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

#[cfg(feature = "tracing")]
impl<S> Layer<S> for MessageCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        struct Msg {
            message: Option<String>,
        }
        impl tracing::field::Visit for Msg {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.message = Some(value.to_string());
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = Some(format!("{value:?}").trim_matches('"').to_string());
                }
            }
        }
        let mut msg = Msg { message: None };
        event.record(&mut msg);
        if let Some(m) = msg.message {
            self.messages.lock().expect("capture lock").push(m);
        }
    }
}

#[cfg(feature = "tracing")]
#[test]
fn will_present_emits_event_and_notifies_others_first() {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(MessageCapture {
        messages: Arc::clone(&messages),
    });
    let _guard = tracing::subscriber::set_default(subscriber);

    let bus = PresentationBus::new();
    let ids: Vec<TriggerId> = (0..3).map(|_| bus.allocate_id()).collect();
    let log: Rc<RefCell<Vec<(TriggerId, Option<TriggerId>)>>> = Rc::default();

    let subs: Vec<_> = ids
        .iter()
        .map(|&id| {
            let (log, handle) = (Rc::clone(&log), bus.clone());
            bus.subscribe(id, move |_sender| log.borrow_mut().push((id, handle.active())))
        })
        .collect();

    bus.will_present(ids[0]);
    // Listeners observe the previous active trigger, not the sender.
    assert_eq!(*log.borrow(), vec![(ids[1], None), (ids[2], None)]);

    log.borrow_mut().clear();
    bus.will_present(ids[2]);
    assert_eq!(*log.borrow(), vec![(ids[0], Some(ids[0])), (ids[1], Some(ids[0]))]);
    assert_eq!(bus.active(), Some(ids[2]));

    drop(subs);
    assert_eq!(bus.subscriber_count(), 0);
    assert_eq!(bus.active(), None);

    let seen = messages.lock().expect("capture lock");
    assert_eq!(
        seen.iter().filter(|m| m.as_str() == "bus.will_present").count(),
        2
    );
}

#[test]
fn listener_dropping_a_sibling_subscription_is_safe() {
    let bus = PresentationBus::new();
    let a = bus.allocate_id();
    let b = bus.allocate_id();
    let c = bus.allocate_id();

    let slot: Rc<RefCell<Option<popmenu_runtime::Subscription>>> = Rc::default();
    let victim = Rc::clone(&slot);
    let _sb = bus.subscribe(b, move |_| {
        victim.borrow_mut().take();
    });
    *slot.borrow_mut() = Some(bus.subscribe(c, |_| {}));

    bus.will_present(a);
    assert!(slot.borrow().is_none());
    bus.will_present(a);
    assert_eq!(bus.subscriber_count(), 1);
}
