use std::fmt;
use std::sync::Arc;

use stagehand_fs::COPY_BUFFER_SIZE;

#[derive(Clone)]
pub struct ExtractOptions {
    pub buffer_size: usize,
    pub on_progress: Option<Arc<dyn Fn(Progress) + Send + Sync>>,
}

#[derive(Clone, Debug)]
pub struct Progress {
    pub entries_processed: usize,
    pub bytes_written: u64,
    pub current_entry: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            buffer_size: COPY_BUFFER_SIZE,
            on_progress: None,
        }
    }
}

impl fmt::Debug for ExtractOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractOptions")
            .field("buffer_size", &self.buffer_size)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

impl ExtractOptions {
    /// Copy chunk size; zero is treated as one.
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    pub fn on_progress(mut self, callback: Arc<dyn Fn(Progress) + Send + Sync>) -> Self {
        self.on_progress = Some(callback);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn defaults_to_reference_buffer() {
        assert_eq!(ExtractOptions::default().buffer_size, 4096);
    }

    #[test]
    fn zero_buffer_clamped() {
        assert_eq!(ExtractOptions::default().buffer_size(0).buffer_size, 1);
    }

    #[test]
    fn progress_callback_invocable() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);
        let options = ExtractOptions::default().on_progress(Arc::new(move |p: Progress| {
            counter_clone.fetch_add(p.entries_processed, Ordering::SeqCst);
        }));

        if let Some(ref cb) = options.on_progress {
            cb(Progress {
                entries_processed: 2,
                bytes_written: 10,
                current_entry: "a.txt".into(),
            });
        }
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
