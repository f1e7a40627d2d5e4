use crate::feedback::FeedbackSink;
use crate::input::Keystroke;
use crate::sentence::SentenceSource;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Wires key input to the session and forwards feedback to the sink
pub struct App<S: SentenceSource, F: FeedbackSink> {
    pub session: Session,
    pub source: S,
    pub feedback: F,
}

impl<S: SentenceSource, F: FeedbackSink> App<S, F> {
    pub fn new(mut source: S, feedback: F) -> Self {
        let session = Session::new(source.next_sentence());
        log::debug!("new sentence of {} chars", session.len());

        Self {
            session,
            source,
            feedback,
        }
    }

    /// Start over with a fresh sentence from the source
    pub fn restart(&mut self) {
        self.session.restart(self.source.next_sentence());
        log::debug!("restarted with {} chars", self.session.len());
    }

    /// Start over on the current sentence
    pub fn retry(&mut self) {
        self.session.restart(self.session.sentence());
        log::debug!("retrying current sentence");
    }

    pub fn handle(&mut self, keystroke: Keystroke) -> Control {
        let was_complete = self.session.is_complete();

        let signal = match keystroke {
            Keystroke::Quit => return Control::Quit,
            Keystroke::Restart => {
                self.restart();
                None
            }
            Keystroke::Retry => {
                self.retry();
                None
            }
            Keystroke::Char(c) => self.session.submit_character(c),
            Keystroke::Named(name) => self.session.submit_key(name),
            Keystroke::Backspace => self.session.submit_backspace(),
            Keystroke::Ignored => None,
        };

        if let Some(signal) = signal {
            self.feedback.emit(signal);
        }

        if !was_complete && self.session.is_complete() && !self.session.is_empty() {
            log::info!(
                "sentence complete: {} correct, {} incorrect, {}%",
                self.session.correct_count(),
                self.session.incorrect_count(),
                self.session.correctness_percent()
            );
        }

        Control::Continue
    }
}
