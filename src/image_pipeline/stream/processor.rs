use std::any::Any;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info, trace, warn};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::normalize::{FrameNormalizer, GrayscalePixelBuffer};
use crate::image_pipeline::stream::events::{AcquisitionEvent, AcquisitionState};
use crate::image_pipeline::stream::frame_slot::FrameSlot;

const WORKER_NAME: &str = "frame-processor";

#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Events buffered before `send` blocks and `try_send` starts refusing
    pub channel_capacity: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self { channel_capacity: 4 }
    }
}

/// Counters reported when the worker exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessorStats {
    /// Frame events seen
    pub received: u64,
    /// Frames normalized and published
    pub rendered: u64,
    /// Frames rejected by the normalizer
    pub dropped_invalid: u64,
    /// Frames ignored because the sensor was calibrating
    pub skipped_tuning: u64,
}

/// Handle to a background thread that turns acquisition events into
/// published grayscale frames.
pub struct FrameProcessor {
    sender: SyncSender<AcquisitionEvent>,
    slot: FrameSlot,
    worker: JoinHandle<ProcessorStats>,
}

impl FrameProcessor {
    pub fn spawn(config: ProcessorConfig) -> Result<Self> {
        let (sender, receiver) = mpsc::sync_channel(config.channel_capacity);
        let slot = FrameSlot::new();
        let worker_slot = slot.clone();

        let worker = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || run_worker(receiver, worker_slot))?;

        info!(capacity = config.channel_capacity, "Frame processor started");
        Ok(Self { sender, slot, worker })
    }

    /// Sender for an acquisition thread. The worker only stops once every
    /// clone has been dropped.
    pub fn sender(&self) -> SyncSender<AcquisitionEvent> {
        self.sender.clone()
    }

    /// Queues an event, blocking while the channel is full.
    pub fn send(&self, event: AcquisitionEvent) -> Result<()> {
        self.sender
            .send(event)
            .map_err(|_| ConversionError::ChannelClosed)
    }

    /// Queues an event without blocking. `Ok(false)` means the channel was
    /// full and the event was discarded.
    pub fn try_send(&self, event: AcquisitionEvent) -> Result<bool> {
        match self.sender.try_send(event) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(_)) => {
                warn!("Processor busy, discarding event");
                Ok(false)
            }
            Err(TrySendError::Disconnected(_)) => Err(ConversionError::ChannelClosed),
        }
    }

    /// Where completed frames are published.
    pub fn slot(&self) -> FrameSlot {
        self.slot.clone()
    }

    /// Closes this handle's sender, waits for queued events to drain, and
    /// returns the worker's counters.
    pub fn shutdown(self) -> Result<ProcessorStats> {
        let Self { sender, worker, .. } = self;
        drop(sender);
        let stats = worker.join().map_err(|payload| {
            let message = panic_message(payload.as_ref());
            error!("Frame processor worker panicked: {}", message);
            ConversionError::WorkerPanicked(message)
        })?;
        info!(
            received = stats.received,
            rendered = stats.rendered,
            dropped_invalid = stats.dropped_invalid,
            skipped_tuning = stats.skipped_tuning,
            "Frame processor stopped"
        );
        Ok(stats)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn run_worker(receiver: Receiver<AcquisitionEvent>, slot: FrameSlot) -> ProcessorStats {
    let normalizer = FrameNormalizer::new();
    let mut state = AcquisitionState::default();
    let mut stats = ProcessorStats::default();
    let mut recycled: Option<GrayscalePixelBuffer> = None;

    for event in receiver {
        log_event(&event);
        let Some(frame) = state.apply(event) else {
            continue;
        };
        stats.received += 1;

        if !state.tuning.accepts_frames() {
            stats.skipped_tuning += 1;
            trace!("Skipping frame during tuning");
            continue;
        }

        let mut buffer = recycled.take().unwrap_or_default();
        match normalizer.normalize_into(&frame, &mut buffer) {
            Ok(()) => {
                stats.rendered += 1;
                // A replaced buffer is only reused when no reader still holds it.
                recycled = slot
                    .publish(Arc::new(buffer))
                    .and_then(|previous| Arc::try_unwrap(previous).ok());
                trace!(generation = slot.generation(), "Published frame");
            }
            Err(e) => {
                stats.dropped_invalid += 1;
                warn!("Dropping frame: {}", e);
                recycled = Some(buffer);
            }
        }
    }

    debug!("Event channel closed");
    stats
}

fn log_event(event: &AcquisitionEvent) {
    match event {
        AcquisitionEvent::DeviceConnected(device) => info!(device = %device.name, "Device connected"),
        AcquisitionEvent::DeviceDisconnected => info!("Device disconnected"),
        AcquisitionEvent::TuningStateChanged(tuning) => debug!(?tuning, "Tuning state changed"),
        AcquisitionEvent::Frame(frame) => trace!(width = frame.width, height = frame.height, "Frame received"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::raw::RawThermalFrame;
    use crate::image_pipeline::stream::{DeviceInfo, TuningState};

    fn frame(samples: Vec<u16>) -> AcquisitionEvent {
        let width = samples.len() as u32;
        AcquisitionEvent::Frame(RawThermalFrame::new(width, 1, samples))
    }

    #[test]
    fn test_processes_event_sequence() {
        let processor = FrameProcessor::spawn(ProcessorConfig::default()).unwrap();
        let slot = processor.slot();

        processor.send(AcquisitionEvent::DeviceConnected(DeviceInfo::new("sim"))).unwrap();
        processor.send(frame(vec![100, 200])).unwrap();
        processor.send(AcquisitionEvent::TuningStateChanged(TuningState::InProgress)).unwrap();
        processor.send(frame(vec![300, 400])).unwrap();
        processor.send(AcquisitionEvent::TuningStateChanged(TuningState::Tuned)).unwrap();
        processor
            .send(AcquisitionEvent::Frame(RawThermalFrame::new(2, 2, vec![1, 2, 3])))
            .unwrap();
        processor.send(frame(vec![5, 5])).unwrap();

        let stats = processor.shutdown().unwrap();
        assert_eq!(
            stats,
            ProcessorStats {
                received: 4,
                rendered: 2,
                dropped_invalid: 1,
                skipped_tuning: 1,
            }
        );

        let (generation, latest) = slot.latest_with_generation();
        assert_eq!(generation, 2);
        assert_eq!(latest.unwrap().pixels, vec![0, 0, 0, 255, 0, 0, 0, 255]);
    }

    #[test]
    fn test_held_buffer_is_never_overwritten() {
        let processor = FrameProcessor::spawn(ProcessorConfig { channel_capacity: 1 }).unwrap();
        let slot = processor.slot();

        processor.send(frame(vec![0, 10])).unwrap();
        // Wait for the first frame to land so there is something to hold.
        while slot.generation() == 0 {
            thread::yield_now();
        }
        let held = slot.latest().unwrap();
        let snapshot = (*held).clone();

        for i in 0..8u16 {
            processor.send(frame(vec![10 - i, 0])).unwrap();
        }
        processor.shutdown().unwrap();

        assert_eq!(*held, snapshot);
        assert_eq!(slot.generation(), 9);
        assert_eq!(slot.latest().unwrap().pixel(0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_sender_clone_feeds_worker() {
        let processor = FrameProcessor::spawn(ProcessorConfig::default()).unwrap();
        let sender = processor.sender();

        let acquisition = thread::spawn(move || {
            for i in 1..=5u16 {
                sender.send(frame(vec![0, i])).unwrap();
            }
        });
        acquisition.join().unwrap();

        let stats = processor.shutdown().unwrap();
        assert_eq!(stats.rendered, 5);
    }

    // Handle whose worker never reads, so the channel stays full.
    fn stalled_processor(
        worker: impl FnOnce() -> ProcessorStats + Send + 'static,
    ) -> (FrameProcessor, Receiver<AcquisitionEvent>) {
        let (sender, receiver) = mpsc::sync_channel(0);
        let processor = FrameProcessor {
            sender,
            slot: FrameSlot::new(),
            worker: thread::spawn(worker),
        };
        (processor, receiver)
    }

    #[test]
    fn test_try_send_discards_when_full() {
        let (processor, receiver) = stalled_processor(ProcessorStats::default);

        assert!(!processor.try_send(frame(vec![1, 2])).unwrap());
        assert!(receiver.try_recv().is_err());
        assert_eq!(processor.shutdown().unwrap(), ProcessorStats::default());
    }

    #[test]
    fn test_send_after_worker_exit_is_channel_closed() {
        let (processor, receiver) = stalled_processor(ProcessorStats::default);
        drop(receiver);

        assert!(matches!(
            processor.try_send(frame(vec![1, 2])),
            Err(ConversionError::ChannelClosed)
        ));
        assert!(matches!(
            processor.send(frame(vec![1, 2])),
            Err(ConversionError::ChannelClosed)
        ));
    }

    #[test]
    fn test_shutdown_reports_worker_panic() {
        let (processor, _receiver) = stalled_processor(|| panic!("sensor buffer poisoned"));

        match processor.shutdown() {
            Err(ConversionError::WorkerPanicked(message)) => {
                assert_eq!(message, "sensor buffer poisoned");
            }
            other => panic!("unexpected shutdown result {other:?}"),
        }
    }

    #[test]
    fn test_panic_message_from_formatted_payload() {
        let payload: Box<dyn Any + Send> = Box::new(format!("frame {}", 7));
        assert_eq!(panic_message(payload.as_ref()), "frame 7");

        let payload: Box<dyn Any + Send> = Box::new(42u32);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic payload");
    }

    #[test]
    fn test_try_send_accepts_when_idle() {
        let processor = FrameProcessor::spawn(ProcessorConfig::default()).unwrap();
        assert!(processor.try_send(frame(vec![1, 2])).unwrap());
        assert_eq!(processor.shutdown().unwrap().rendered, 1);
    }
}
