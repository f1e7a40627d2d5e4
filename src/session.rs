use crate::feedback::Feedback;

/// Display state of a single position in the sentence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Unvisited,
    Current,
    Correct,
    Incorrect,
}

/// One play-through: the target sentence, the cursor and the running counters.
///
/// Invariants:
/// - `cursor <= len()`
/// - every position before the cursor is `Correct` or `Incorrect`
/// - the position at the cursor (if any) is `Current`, everything after it `Unvisited`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    sentence: Vec<char>,
    statuses: Vec<Status>,
    cursor: usize,
    correct: usize,
    incorrect: usize,
}

impl Session {
    pub fn new(sentence: impl Into<String>) -> Self {
        let sentence: Vec<char> = sentence.into().chars().collect();
        let mut statuses = vec![Status::Unvisited; sentence.len()];
        if let Some(first) = statuses.first_mut() {
            *first = Status::Current;
        }

        Self {
            sentence,
            statuses,
            cursor: 0,
            correct: 0,
            incorrect: 0,
        }
    }

    /// Throw away all progress and start over on `sentence`
    pub fn restart(&mut self, sentence: impl Into<String>) {
        *self = Self::new(sentence);
    }

    pub fn sentence(&self) -> String {
        self.sentence.iter().collect()
    }

    pub fn chars(&self) -> &[char] {
        &self.sentence
    }

    pub fn len(&self) -> usize {
        self.sentence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentence.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn correct_count(&self) -> usize {
        self.correct
    }

    pub fn incorrect_count(&self) -> usize {
        self.incorrect
    }

    pub fn status(&self, idx: usize) -> Option<Status> {
        self.statuses.get(idx).copied()
    }

    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    /// The character awaiting input, `None` once the sentence is consumed
    pub fn expected_char(&self) -> Option<char> {
        self.sentence.get(self.cursor).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.cursor == self.sentence.len()
    }

    pub fn submit_character(&mut self, input: char) -> Option<Feedback> {
        let expected = self.expected_char()?;
        Some(self.classify(input == expected))
    }

    /// Submit a key that is not a single character, e.g. "Enter".
    ///
    /// The name is compared literally against the expected character, so anything
    /// longer than one char is a miss.
    pub fn submit_key(&mut self, name: &str) -> Option<Feedback> {
        let expected = self.expected_char()?;
        let mut chars = name.chars();
        let matches = chars.next() == Some(expected) && chars.next().is_none();
        Some(self.classify(matches))
    }

    fn classify(&mut self, matches: bool) -> Feedback {
        let feedback = if matches {
            self.statuses[self.cursor] = Status::Correct;
            self.correct += 1;
            Feedback::Soft
        } else {
            self.statuses[self.cursor] = Status::Incorrect;
            self.incorrect += 1;
            Feedback::Hard
        };

        self.cursor += 1;
        if let Some(next) = self.statuses.get_mut(self.cursor) {
            *next = Status::Current;
        }

        feedback
    }

    /// Step back one position and undo its classification.
    ///
    /// Stepping back from the end of the sentence is silent; stepping back from
    /// inside it yields `Feedback::Soft`.
    pub fn submit_backspace(&mut self) -> Option<Feedback> {
        if self.cursor == 0 {
            return None;
        }

        let feedback = if self.cursor == self.sentence.len() {
            None
        } else {
            self.statuses[self.cursor] = Status::Unvisited;
            Some(Feedback::Soft)
        };

        self.cursor -= 1;
        match self.statuses[self.cursor] {
            Status::Correct => self.correct -= 1,
            Status::Incorrect => self.incorrect -= 1,
            Status::Unvisited | Status::Current => {}
        }
        self.statuses[self.cursor] = Status::Current;

        feedback
    }

    /// Correct characters as a whole percentage of the sentence length
    pub fn correctness_percent(&self) -> u32 {
        if self.sentence.is_empty() {
            return 0;
        }
        ((self.correct as f64 / self.sentence.len() as f64) * 100.0).round() as u32
    }
}
