use crate::log_warn;
use crate::png::chunk::{AnimationControl, FrameControl, FrameData};
use crate::utils::error::{PngError, PngResult};

/// An `fcTL` or `fdAT` in the order it was parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceEntry {
    FrameControl(FrameControl),
    FrameAppend(FrameData),
}

impl SequenceEntry {
    pub fn sequence_number(&self) -> u32 {
        match self {
            SequenceEntry::FrameControl(fctl) => fctl.sequence_number,
            SequenceEntry::FrameAppend(fdat) => fdat.sequence_number,
        }
    }
}

/// One animation frame before decoding: its control and its compressed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRecord {
    pub control: FrameControl,
    pub payload: Vec<u8>,
}

/// Groups frame chunks into per-frame records.
///
/// Entries are ordered by sequence number; every `fcTL` opens a record and
/// every `fdAT` appends to the open one. When the first record has no payload
/// of its own it takes `base_data` (the concatenated `IDAT`s).
pub fn assemble(
    mut entries: Vec<SequenceEntry>,
    base_data: &[u8],
    control: &AnimationControl,
) -> PngResult<Vec<FrameRecord>> {
    entries.sort_by_key(SequenceEntry::sequence_number);

    for pair in entries.windows(2) {
        if pair[0].sequence_number() == pair[1].sequence_number() {
            log_warn!("Duplicate animation sequence number {}", pair[0].sequence_number());
        }
    }

    let mut records: Vec<FrameRecord> = Vec::new();

    for entry in entries {
        match entry {
            SequenceEntry::FrameControl(fctl) => records.push(FrameRecord {
                control: fctl,
                payload: Vec::new(),
            }),
            SequenceEntry::FrameAppend(fdat) => match records.last_mut() {
                Some(record) => record.payload.extend_from_slice(&fdat.data),
                None => {
                    return Err(PngError::data(format!(
                        "fdAT chunk {} precedes the first fcTL chunk",
                        fdat.sequence_number
                    )))
                }
            },
        }
    }

    let first = records
        .first_mut()
        .ok_or_else(|| PngError::data("Animation contains no frames"))?;

    if first.payload.is_empty() {
        if base_data.is_empty() {
            return Err(PngError::data("First frame has neither fdAT nor IDAT data"));
        }
        first.payload = base_data.to_vec();
    }

    if records.len() != control.num_frames as usize {
        return Err(PngError::data(format!(
            "acTL declares {} frames but {} were found",
            control.num_frames,
            records.len()
        )));
    }

    Ok(records)
}
