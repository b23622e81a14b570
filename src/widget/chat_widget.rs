//! The chat widget.
//!
//! [`ChatWidget`] mediates between the user's surfaces and a [`Transport`].  A submission
//! renders the user's message at once and hands back a [`PendingExchange`]; whoever drives the
//! widget awaits it and passes the [`ExchangeOutcome`] to [`ChatWidget::complete`], which renders
//! the answer or the placeholder.  [`ChatWidget::run`] is the event loop that does this for a
//! stream of [`WidgetEvent`]s.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, Stream, StreamExt};

use crate::client::Transport;
use crate::error::{Error, Result};
use crate::exchange_logger::{ExchangeLogger, StderrLogger};
use crate::observability::{
    WIDGET_ANSWERS, WIDGET_EMPTY_SUBMISSIONS, WIDGET_EXCHANGE_DURATION, WIDGET_FAILURES,
    WIDGET_REFUSED_SUBMISSIONS, WIDGET_SUBMISSIONS,
};
use crate::types::Message;
use crate::widget::surface::{DisplaySurface, InputSurface, WidgetEvent};

/// What a widget does with a submission while another exchange is outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Issue every submission independently.  Answers render in completion order.
    #[default]
    Concurrent,
    /// Refuse submissions until the outstanding exchange has rendered.  A refused submission
    /// renders no message and leaves the input field untouched; the display gets a notice
    /// naming the question that was not sent.
    Exclusive,
}

/// Counts exchanges between issue and render.
#[derive(Debug)]
struct InFlight {
    counter: Arc<AtomicUsize>,
}

impl InFlight {
    fn new(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self {
            counter: Arc::clone(counter),
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

/// One submitted question awaiting its answer.
///
/// Resolves exactly once to an [`ExchangeOutcome`].  Dropping it abandons the exchange.
#[must_use = "an exchange does nothing unless awaited"]
pub struct PendingExchange {
    id: u64,
    question: String,
    started: Instant,
    future: BoxFuture<'static, Result<String>>,
    in_flight: Option<InFlight>,
}

impl PendingExchange {
    /// The widget-assigned exchange number, starting at 1.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The trimmed question that was sent.
    pub fn question(&self) -> &str {
        &self.question
    }
}

impl fmt::Debug for PendingExchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingExchange")
            .field("id", &self.id)
            .field("question", &self.question)
            .finish_non_exhaustive()
    }
}

impl Future for PendingExchange {
    type Output = ExchangeOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match this.future.as_mut().poll(cx) {
            Poll::Ready(result) => Poll::Ready(ExchangeOutcome {
                id: this.id,
                question: std::mem::take(&mut this.question),
                result,
                elapsed: this.started.elapsed(),
                _in_flight: this.in_flight.take(),
            }),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// The result of one exchange, ready to be rendered.
#[derive(Debug)]
pub struct ExchangeOutcome {
    id: u64,
    question: String,
    result: Result<String>,
    elapsed: Duration,
    _in_flight: Option<InFlight>,
}

impl ExchangeOutcome {
    /// The id of the exchange this outcome belongs to.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The question that was sent.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The answer, or why there is none.
    pub fn result(&self) -> &Result<String> {
        &self.result
    }

    /// Time between issue and completion.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// A chat widget over an input surface `I` and a display surface `D`.
pub struct ChatWidget<I, D> {
    transport: Arc<dyn Transport>,
    logger: Arc<dyn ExchangeLogger>,
    input: I,
    display: D,
    overlap: OverlapPolicy,
    in_flight: Arc<AtomicUsize>,
    next_id: u64,
}

impl<I: InputSurface, D: DisplaySurface> ChatWidget<I, D> {
    /// Creates a widget that asks `transport` and logs failures to stderr.
    pub fn new(transport: Arc<dyn Transport>, input: I, display: D) -> Self {
        Self {
            transport,
            logger: Arc::new(StderrLogger::new()),
            input,
            display,
            overlap: OverlapPolicy::default(),
            in_flight: Arc::new(AtomicUsize::new(0)),
            next_id: 1,
        }
    }

    /// Replaces the diagnostic logger.
    pub fn with_logger(mut self, logger: Arc<dyn ExchangeLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Sets the overlap policy.
    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// The input surface.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// The input surface, for mutation.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// The display surface.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// The display surface, for mutation.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// The overlap policy in effect.
    pub fn overlap(&self) -> OverlapPolicy {
        self.overlap
    }

    /// Number of exchanges issued but not yet rendered.
    pub fn outstanding(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Returns true if the widget would refuse a submission right now.
    pub fn is_busy(&self) -> bool {
        self.overlap == OverlapPolicy::Exclusive && self.outstanding() > 0
    }

    /// Submits whatever is in the input field.
    pub fn submit(&mut self) -> Option<PendingExchange> {
        let raw = self.input.value();
        self.submit_text(&raw)
    }

    /// Submits `raw` as if it had been typed into the input field.
    ///
    /// Whitespace-only input is a no-op: nothing renders, no request is issued, and the field is
    /// left as it is.  Otherwise the trimmed text renders as a user message, the field is
    /// cleared, and exactly one request is issued.
    pub fn submit_text(&mut self, raw: &str) -> Option<PendingExchange> {
        let Some(message) = Message::user(raw) else {
            WIDGET_EMPTY_SUBMISSIONS.click();
            return None;
        };
        if self.is_busy() {
            WIDGET_REFUSED_SUBMISSIONS.click();
            self.display
                .show_notice(&format!("Still waiting for an answer. Not sent: {}", message.text()));
            return None;
        }
        WIDGET_SUBMISSIONS.click();

        self.render_message(&message);
        self.input.set_value("");

        let id = self.next_id;
        self.next_id += 1;
        let question = message.text().to_string();
        self.logger.log_request(&question);

        let transport = Arc::clone(&self.transport);
        let sent = question.clone();
        let future: BoxFuture<'static, Result<String>> =
            Box::pin(async move { transport.ask(&sent).await });

        Some(PendingExchange {
            id,
            question,
            started: Instant::now(),
            future,
            in_flight: Some(InFlight::new(&self.in_flight)),
        })
    }

    /// Renders the answer to `question`.
    pub fn on_response(&mut self, question: &str, answer: impl Into<String>) {
        let answer = answer.into();
        WIDGET_ANSWERS.click();
        self.logger.log_answer(question, &answer);
        self.render_message(&Message::bot(answer));
    }

    /// Logs why `question` failed and renders the placeholder in place of an answer.
    pub fn on_failure(&mut self, question: &str, error: &Error) {
        WIDGET_FAILURES.click();
        self.logger.log_failure(question, error);
        self.render_message(&Message::placeholder());
    }

    /// Appends `message` to the display and scrolls so it is visible.
    pub fn render_message(&mut self, message: &Message) {
        self.display.append_message(message);
        let height = self.display.scroll_height();
        self.display.set_scroll_top(height);
    }

    /// Removes every message from the display.
    pub fn clear_view(&mut self) {
        self.display.clear();
    }

    /// Renders the outcome of an exchange.
    ///
    /// Outcomes always render, even if the view was cleared after the exchange was issued.
    pub fn complete(&mut self, outcome: ExchangeOutcome) {
        WIDGET_EXCHANGE_DURATION.add(outcome.elapsed.as_secs_f64());
        match &outcome.result {
            Ok(answer) => self.on_response(&outcome.question, answer.clone()),
            Err(err) => self.on_failure(&outcome.question, err),
        }
    }

    /// Applies one event, returning the exchange it issued, if any.
    pub fn handle(&mut self, event: WidgetEvent) -> Option<PendingExchange> {
        match event {
            WidgetEvent::InputChanged(value) => {
                self.input.set_value(&value);
                None
            }
            WidgetEvent::Triggered(trigger) if trigger.is_submit() => self.submit(),
            WidgetEvent::Triggered(_) => None,
            WidgetEvent::ClearView => {
                self.clear_view();
                None
            }
        }
    }

    /// Runs the widget until `events` ends.
    ///
    /// Events and exchange completions are handled one at a time on the calling task.  Answers
    /// render in the order their requests complete.  When the event stream ends, exchanges
    /// still outstanding are awaited and rendered before returning.
    pub async fn run<S>(&mut self, events: S)
    where
        S: Stream<Item = WidgetEvent>,
    {
        futures::pin_mut!(events);
        let mut pending = FuturesUnordered::new();

        loop {
            tokio::select! {
                event = events.next() => match event {
                    Some(event) => {
                        if let Some(exchange) = self.handle(event) {
                            pending.push(exchange);
                        }
                    }
                    None => break,
                },
                Some(outcome) = pending.next(), if !pending.is_empty() => {
                    self.complete(outcome);
                }
            }
        }

        while let Some(outcome) = pending.next().await {
            self.complete(outcome);
        }
    }
}
