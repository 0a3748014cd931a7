use crate::image_pipeline::raw::RawThermalFrame;

/// Sensor self-calibration (flat field correction) state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TuningState {
    #[default]
    Unknown,
    TuningRequired,
    InProgress,
    ApplyingTuning,
    Tuned,
}

impl TuningState {
    /// Frames captured mid-calibration show the shutter, not the scene.
    pub fn accepts_frames(self) -> bool {
        self != TuningState::InProgress
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub name: String,
}

impl DeviceInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Everything the acquisition layer can report.
#[derive(Debug, Clone)]
pub enum AcquisitionEvent {
    DeviceConnected(DeviceInfo),
    DeviceDisconnected,
    TuningStateChanged(TuningState),
    Frame(RawThermalFrame),
}

/// Acquisition state as seen by the processing worker.
#[derive(Debug, Clone, Default)]
pub struct AcquisitionState {
    pub device: Option<DeviceInfo>,
    pub tuning: TuningState,
}

impl AcquisitionState {
    /// Applies a non-frame event. Returns the frame back for `Frame` events.
    pub fn apply(&mut self, event: AcquisitionEvent) -> Option<RawThermalFrame> {
        match event {
            AcquisitionEvent::DeviceConnected(device) => {
                self.device = Some(device);
                None
            }
            AcquisitionEvent::DeviceDisconnected => {
                self.device = None;
                self.tuning = TuningState::Unknown;
                None
            }
            AcquisitionEvent::TuningStateChanged(tuning) => {
                self.tuning = tuning;
                None
            }
            AcquisitionEvent::Frame(frame) => Some(frame),
        }
    }
}
