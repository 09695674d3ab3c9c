/// Sink capability accepting rendered log text
///
/// `append` never reports failure to the caller: a logging fault must not
/// disturb the host program. Implementations serialize concurrent callers
/// themselves, so for one writer the order of appended texts equals the order
/// of the calls.
pub trait LogWriter: Send + Sync {
    /// Writes `text` verbatim; no newline is added
    fn append(&self, text: &str);
}
