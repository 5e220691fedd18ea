use std::thread;

/// Advisory upper bound on concurrent compile jobs, queried once per
/// process from the OS's logical processor count. Falls back to 1 when the
/// platform cannot report a count.
pub fn available_jobs() -> usize {
    match thread::available_parallelism() {
        Ok(n) => n.get(),
        Err(err) => {
            log::debug!("could not query processor count ({err}), assuming 1");
            1
        }
    }
}
