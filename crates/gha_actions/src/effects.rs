use bitflags::bitflags;

bitflags! {
    /// Side effects an operation may have.
    ///
    /// Declared per operation in the catalog; used for tracing and for
    /// callers that want to tell read-only operations from mutating ones.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct Effects: u8 {
        /// Writes to the workflow command stream.
        const EMITS_LOG = 1 << 0;
        /// Changes environment or outputs visible to later steps.
        const MUTATES_ENV = 1 << 1;
        /// Appends to a runner-provided file.
        const WRITES_FILE = 1 << 2;
        /// Reads environment variables or files.
        const READS_ENV = 1 << 3;
        /// May cancel the calling script.
        const CANCELS = 1 << 4;
    }
}

impl Effects {
    /// No effect beyond reading the environment.
    pub fn is_read_only(self) -> bool {
        Effects::READS_ENV.contains(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_only() {
        assert!(Effects::READS_ENV.is_read_only());
        assert!(Effects::empty().is_read_only());
        assert!(!(Effects::READS_ENV | Effects::WRITES_FILE).is_read_only());
        assert!(!Effects::CANCELS.is_read_only());
    }
}
