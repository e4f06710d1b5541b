//! Trivia facts shown on the home screen.

pub const TRIVIA_FACTS: [&str; 10] = [
    "The Quran contains exactly 114 surahs (chapters).",
    "Surah Al-Fatihah is the first chapter and is recited in every rak'ah of prayer.",
    "The Quran was revealed over 23 years: 13 years in Mecca and 10 years in Medina.",
    "Bismillah appears at the beginning of every surah except Surah At-Tawbah.",
    "Surah Al-Baqarah is the longest surah with 286 verses.",
    "Surah Al-Kawthar is the shortest surah with only 3 verses.",
    "There are 30 juz (parts) in the Quran.",
    "The Quran mentions 25 prophets by name.",
    "Surah Yusuf is the only surah that narrates a complete story.",
    "The Quran has been preserved without any change since its revelation.",
];

/// Source of random indices in `0..len`.
pub trait IndexPicker {
    fn pick(&mut self, len: usize) -> usize;
}

/// Xorshift generator seeded from the system clock. Good enough for
/// picking a fact or a verse; not for anything else.
#[derive(Debug, Clone)]
pub struct ClockPicker {
    state: u64,
}

impl ClockPicker {
    pub fn new() -> Self {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0) as u64;
        Self::with_seed(nanos)
    }

    pub fn with_seed(seed: u64) -> Self {
        // Zero is a fixed point of xorshift.
        Self {
            state: seed | 1,
        }
    }
}

impl Default for ClockPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexPicker for ClockPicker {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        (x % len as u64) as usize
    }
}

/// Cycles through [`TRIVIA_FACTS`] without showing the same fact twice in a row.
pub struct Trivia {
    index: usize,
    picker: Box<dyn IndexPicker + Send>,
}

impl Trivia {
    pub fn new() -> Self {
        Self::with_picker(Box::new(ClockPicker::new()))
    }

    pub fn with_picker(mut picker: Box<dyn IndexPicker + Send>) -> Self {
        let index = picker.pick(TRIVIA_FACTS.len());
        Self { index, picker }
    }

    pub fn current(&self) -> &'static str {
        TRIVIA_FACTS[self.index]
    }

    pub fn next(&mut self) -> &'static str {
        if TRIVIA_FACTS.len() > 1 {
            let mut candidate = self.picker.pick(TRIVIA_FACTS.len());
            while candidate == self.index {
                candidate = self.picker.pick(TRIVIA_FACTS.len());
            }
            self.index = candidate;
        }
        self.current()
    }
}

impl Default for Trivia {
    fn default() -> Self {
        Self::new()
    }
}
