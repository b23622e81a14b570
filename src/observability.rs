use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("askchat.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("askchat.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("askchat.client.request_duration_seconds");

pub(crate) static WIDGET_SUBMISSIONS: Counter = Counter::new("askchat.widget.submissions");
pub(crate) static WIDGET_EMPTY_SUBMISSIONS: Counter =
    Counter::new("askchat.widget.empty_submissions");
pub(crate) static WIDGET_REFUSED_SUBMISSIONS: Counter =
    Counter::new("askchat.widget.refused_submissions");
pub(crate) static WIDGET_ANSWERS: Counter = Counter::new("askchat.widget.answers");
pub(crate) static WIDGET_FAILURES: Counter = Counter::new("askchat.widget.failures");
pub(crate) static WIDGET_EXCHANGE_DURATION: Moments =
    Moments::new("askchat.widget.exchange_duration_seconds");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&WIDGET_SUBMISSIONS);
    collector.register_counter(&WIDGET_EMPTY_SUBMISSIONS);
    collector.register_counter(&WIDGET_REFUSED_SUBMISSIONS);
    collector.register_counter(&WIDGET_ANSWERS);
    collector.register_counter(&WIDGET_FAILURES);
    collector.register_moments(&WIDGET_EXCHANGE_DURATION);
}
