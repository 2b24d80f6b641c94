use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use filter_studio_application::{ApplicationError, DecodeQueue, DecodedImage, ImageDecoder};

use crate::ImageCrateDecoder;

struct DecodeJob {
    sequence: u64,
    bytes: Vec<u8>,
}

/// Sequence number of the newest submission, shared with the worker.
#[derive(Clone, Default)]
struct LatestSubmission(Arc<AtomicU64>);

impl LatestSubmission {
    fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn supersedes(&self, sequence: u64) -> bool {
        sequence < self.0.load(Ordering::SeqCst)
    }
}

/// Decodes image files on a worker thread. A newer submission supersedes every older one,
/// whether it is still queued, being decoded, or already finished.
pub struct BackgroundDecodeQueue {
    latest: LatestSubmission,
    jobs: mpsc::Sender<DecodeJob>,
    results: Mutex<mpsc::Receiver<DecodedImage>>,
}

impl BackgroundDecodeQueue {
    pub fn new() -> Self {
        Self::with_decoder(Arc::new(ImageCrateDecoder))
    }

    pub fn with_decoder(decoder: Arc<dyn ImageDecoder + Send + Sync>) -> Self {
        let (jobs, job_rx) = mpsc::channel::<DecodeJob>();
        let (result_tx, results) = mpsc::channel::<DecodedImage>();
        let latest = LatestSubmission::default();

        let worker_latest = latest.clone();
        thread::spawn(move || decode_loop(&job_rx, &result_tx, &worker_latest, decoder.as_ref()));

        Self {
            latest,
            jobs,
            results: Mutex::new(results),
        }
    }
}

impl Default for BackgroundDecodeQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodeQueue for BackgroundDecodeQueue {
    fn submit(&self, bytes: Vec<u8>) -> Result<u64, ApplicationError> {
        let sequence = self.latest.advance();
        self.jobs
            .send(DecodeJob { sequence, bytes })
            .map_err(|error| ApplicationError::Io(format!("decode worker stopped: {error}")))?;
        Ok(sequence)
    }

    fn try_receive(&self) -> Result<Option<DecodedImage>, ApplicationError> {
        let results = self
            .results
            .lock()
            .map_err(|_| ApplicationError::Io("decode result lock poisoned".to_string()))?;

        let mut newest = match results.try_recv() {
            Ok(decoded) => decoded,
            Err(mpsc::TryRecvError::Empty) => return Ok(None),
            Err(mpsc::TryRecvError::Disconnected) => {
                return Err(ApplicationError::Io("decode worker stopped".to_string()))
            }
        };
        while let Ok(next) = results.try_recv() {
            newest = next;
        }

        // A newer file is still being decoded; its result will replace this one.
        if self.latest.supersedes(newest.sequence) {
            log::debug!("dropping decode #{} in favour of a newer file", newest.sequence);
            return Ok(None);
        }
        Ok(Some(newest))
    }
}

fn decode_loop(
    jobs: &mpsc::Receiver<DecodeJob>,
    results: &mpsc::Sender<DecodedImage>,
    latest: &LatestSubmission,
    decoder: &(dyn ImageDecoder + Send + Sync),
) {
    while let Ok(mut job) = jobs.recv() {
        while let Ok(next) = jobs.try_recv() {
            job = next;
        }
        if latest.supersedes(job.sequence) {
            continue;
        }

        let image = decoder.decode(&job.bytes);
        if latest.supersedes(job.sequence) {
            log::debug!("decode #{} finished after a newer submission", job.sequence);
            continue;
        }
        let decoded = DecodedImage {
            sequence: job.sequence,
            image,
        };
        if results.send(decoded).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::PngImageEncoder;
    use filter_studio_application::ImageEncoder;
    use filter_studio_domain::Bitmap;

    fn png_of_width(width: u32) -> Vec<u8> {
        let bitmap = Bitmap::filled(width, 2, [10, 20, 30, 255]).expect("bitmap");
        PngImageEncoder.encode_png(&bitmap).expect("encode")
    }

    fn wait_for(queue: &BackgroundDecodeQueue) -> DecodedImage {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            if let Some(decoded) = queue.try_receive().expect("poll") {
                return decoded;
            }
            assert!(
                Instant::now() < deadline,
                "timed out waiting for decoded image"
            );
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn latest_submission_wins() {
        let queue = BackgroundDecodeQueue::new();
        for width in 1..=6 {
            queue.submit(png_of_width(width)).expect("submit");
        }

        let decoded = wait_for(&queue);
        assert_eq!(decoded.sequence, 6);
        let image = decoded.image.expect("decoded image");
        assert_eq!((image.width(), image.height()), (6, 2));
        assert!(queue.try_receive().expect("poll").is_none());
    }

    #[test]
    fn decode_failures_are_delivered() {
        let queue = BackgroundDecodeQueue::new();
        queue.submit(b"definitely not an image".to_vec()).expect("submit");

        let decoded = wait_for(&queue);
        assert_eq!(decoded.sequence, 1);
        assert!(matches!(decoded.image, Err(ApplicationError::Decode(_))));
    }

    #[test]
    fn older_results_are_superseded_by_later_submissions() {
        let latest = LatestSubmission::default();
        let first = latest.advance();
        let second = latest.advance();
        assert!(latest.supersedes(first));
        assert!(!latest.supersedes(second));
    }
}
