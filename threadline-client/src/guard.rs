/// Identifies a period during which a list kept the same subject and
/// contents lineage. Responses to requests issued under an older generation
/// are stale.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct GenerationGuard {
    current: u64,
}

impl GenerationGuard {
    pub fn new() -> GenerationGuard {
        GenerationGuard::default()
    }

    pub fn current(&self) -> Generation {
        Generation(self.current)
    }

    /// Invalidates every generation handed out so far
    pub fn advance(&mut self) -> Generation {
        self.current += 1;
        Generation(self.current)
    }

    pub fn is_current(&self, g: Generation) -> bool {
        g.0 == self.current
    }
}
