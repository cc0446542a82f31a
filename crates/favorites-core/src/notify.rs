use favorites_models::NotificationKind;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Sink for user-facing messages. Fire-and-forget: nothing is returned.
pub trait Notifier {
    fn notify(&self, message: &str, kind: NotificationKind);
}

/// Routes notifications into the log. Used when no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        match kind {
            NotificationKind::Error => error!(kind = %kind, "{}", message),
            NotificationKind::Warning => warn!(kind = %kind, "{}", message),
            NotificationKind::Success | NotificationKind::Info => info!(kind = %kind, "{}", message),
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, message: &str, kind: NotificationKind) {
        (**self).notify(message, kind)
    }
}

impl<N: Notifier + ?Sized> Notifier for Rc<N> {
    fn notify(&self, message: &str, kind: NotificationKind) {
        (**self).notify(message, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<(String, NotificationKind)>>);

    impl Notifier for Recorder {
        fn notify(&self, message: &str, kind: NotificationKind) {
            self.0.borrow_mut().push((message.to_string(), kind));
        }
    }

    #[test]
    fn test_shared_notifier_forwards() {
        let recorder = Rc::new(Recorder::default());
        let shared: Box<dyn Notifier> = Box::new(Rc::clone(&recorder));

        shared.notify("\"Dune\" added to favorites", NotificationKind::Success);
        assert_eq!(
            recorder.0.borrow().as_slice(),
            &[("\"Dune\" added to favorites".to_string(), NotificationKind::Success)]
        );
    }

    #[test]
    fn test_tracing_notifier_behind_arc() {
        let notifier: Box<dyn Notifier> = Box::new(Arc::new(TracingNotifier));
        notifier.notify("Failed to save favorites", NotificationKind::Error);
        notifier.notify("No favorites to export", NotificationKind::Warning);
    }
}
