use std::io::{Read, Write};
use std::time::Duration;
use pedometer::{Instant, Sample, StepConfig, StepDetection};
use serde::{Deserialize, Serialize};
use crate::error::AppError;

/// One row of a recorded session. Rows without a time are assumed to follow each other at the
/// configured sample rate.
/// 
#[derive(Debug, Deserialize)]
struct SampleRecord
{
    /// In nanoseconds.
    #[serde(default)]
    time: Option<u64>,
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Serialize)]
struct StepRecord
{
    index: u64,
    time: u64,
    inter_arrival_ms: Option<f64>,
    bpm: u32,
}

/// Outcome of replaying one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary
{
    pub samples: usize,
    pub dropped: usize,
    pub steps: u64,
    pub bpm: u32,
}

/// Reads all samples from a CSV with an `x,y,z` and optionally a `time` column.
/// 
pub fn read_samples<R: Read>(reader: R, period: Duration) -> Result<Vec<Sample>, AppError> {
    let period = period.as_nanos() as u64;
    let mut reader = csv::Reader::from_reader(reader);
    let mut samples = Vec::new();

    for (index, record) in reader.deserialize::<SampleRecord>().enumerate() {
        let record = record?;
        let time = record.time.unwrap_or(index as u64 * period);
        samples.push(Sample::new(record.x, record.y, record.z, Instant::from_nanos(time)));
    }

    Ok(samples)
}

/// Runs every sample through a fresh detector. The processed signal goes to `signal_out`, one
/// row per accepted sample, and every confirmed step to `steps_out`.
/// 
pub fn replay<S: Write, T: Write>(
    config: StepConfig, 
    samples: &[Sample], 
    signal_out: S, 
    steps_out: T,
) -> Result<Summary, AppError> {
    let mut detection = StepDetection::new(config)?;
    let mut signal_writer = csv::Writer::from_writer(signal_out);
    let mut steps_writer = csv::Writer::from_writer(steps_out);
    let mut dropped = 0;

    for sample in samples {
        if config.signal_mode.extract(&sample.accel).is_none() {
            log::warn!("Skipping non-finite sample at {} ns", sample.time.as_nanos());
            dropped += 1;
            continue;
        }

        let event = detection.process_sample(sample);
        signal_writer.serialize(detection.trace)?;

        if let Some(event) = event {
            steps_writer.serialize(StepRecord {
                index: event.index,
                time: event.timestamp.as_nanos(),
                inter_arrival_ms: event.inter_arrival.map(|d| d.as_secs_f64() * 1000.0),
                bpm: detection.bpm(),
            })?;
        }
    }

    signal_writer.flush()?;
    steps_writer.flush()?;

    Ok(Summary {
        samples: samples.len(),
        dropped,
        steps: detection.steps(),
        bpm: detection.bpm(),
    })
}
