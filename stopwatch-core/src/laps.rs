//! Lap history: sequence numbering and split deltas.

/// A recorded snapshot of elapsed time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Lap {
    sequence: u64,
    elapsed_ms: u64,
}

impl Lap {
    /// 1-based creation order; never reused within a session.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Signed difference against an older lap.
    pub fn delta_since(&self, older: &Lap) -> i64 {
        self.elapsed_ms as i64 - older.elapsed_ms as i64
    }
}

/// One display row: a lap and its delta against the next-older lap.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LapRow {
    pub lap: Lap,
    pub delta_ms: Option<i64>,
}

/// Laps ordered newest-first.
#[derive(Clone, Debug, Default)]
pub struct LapList {
    // Kept oldest-first so recording is a push; views are reversed.
    laps: Vec<Lap>,
    last_sequence: u64,
}

impl LapList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, elapsed_ms: u64) -> Lap {
        self.last_sequence += 1;
        let lap = Lap {
            sequence: self.last_sequence,
            elapsed_ms,
        };
        self.laps.push(lap);
        lap
    }

    pub fn remove(&mut self, sequence: u64) -> Option<Lap> {
        let idx = self.laps.iter().position(|l| l.sequence == sequence)?;
        Some(self.laps.remove(idx))
    }

    /// Drop all laps but keep numbering upward.
    pub fn clear(&mut self) {
        self.laps.clear();
    }

    /// Drop all laps and restart numbering at 1.
    pub fn reset(&mut self) {
        self.laps.clear();
        self.last_sequence = 0;
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    pub fn newest(&self) -> Option<&Lap> {
        self.laps.last()
    }

    /// Lap at display position `index` (0 = newest).
    pub fn get(&self, index: usize) -> Option<&Lap> {
        let len = self.laps.len();
        if index >= len {
            return None;
        }
        self.laps.get(len - 1 - index)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Lap> + ExactSizeIterator {
        self.laps.iter().rev()
    }

    /// Delta for the lap at display position `index`; `None` for the oldest.
    pub fn delta_at(&self, index: usize) -> Option<i64> {
        let newer = self.get(index)?;
        let older = self.get(index + 1)?;
        Some(newer.delta_since(older))
    }

    pub fn rows(&self) -> impl Iterator<Item = LapRow> + '_ {
        self.iter().enumerate().map(move |(i, lap)| LapRow {
            lap: *lap,
            delta_ms: self.delta_at(i),
        })
    }
}
