//! Pointer trace types for recorded and synthetic input.
//!
//! Traces are stored in append-only JSONL format: the first line is a
//! `# {...}` comment carrying the stream header, followed by one JSON
//! object per event. Coordinates are viewport pixels.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Schema version written into new trace headers.
pub const TRACE_SCHEMA_VERSION: &str = "1.0";

/// Milliseconds since trace start.
pub type TimestampMs = u64;

/// A single recorded pointer event with timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Milliseconds since trace start.
    #[serde(rename = "t")]
    pub timestamp_ms: TimestampMs,

    /// The event payload.
    #[serde(flatten)]
    pub kind: PointerEventKind,
}

/// Discriminated union of pointer event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEventKind {
    /// Pointer position update.
    Move {
        /// X coordinate in viewport pixels.
        x: f64,
        /// Y coordinate in viewport pixels.
        y: f64,
    },

    /// Pointer left the viewport (or the recorded surface).
    Leave,
}

/// Trace metadata written as the `#`-prefixed first line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time at trace start (ISO 8601).
    pub recorded_at: String,

    /// Viewport dimensions in pixels at recording time.
    pub viewport_width: u32,
    pub viewport_height: u32,

    /// Nominal sampling rate for pointer events (Hz).
    pub sample_rate_hz: u32,
}

impl TraceHeader {
    /// Create a header stamped with the current wall-clock time.
    pub fn new(viewport_width: u32, viewport_height: u32, sample_rate_hz: u32) -> Self {
        Self {
            schema_version: TRACE_SCHEMA_VERSION.to_string(),
            recorded_at: chrono::Utc::now().to_rfc3339(),
            viewport_width,
            viewport_height,
            sample_rate_hz,
        }
    }

    /// The viewport as a rectangle rooted at the origin.
    pub fn viewport(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.viewport_width as f64,
            self.viewport_height as f64,
        )
    }
}

impl PointerEvent {
    /// Create a move event.
    pub fn moved(timestamp_ms: TimestampMs, x: f64, y: f64) -> Self {
        Self {
            timestamp_ms,
            kind: PointerEventKind::Move { x, y },
        }
    }

    /// Create a leave event.
    pub fn leave(timestamp_ms: TimestampMs) -> Self {
        Self {
            timestamp_ms,
            kind: PointerEventKind::Leave,
        }
    }

    /// Timestamp as fractional seconds since trace start.
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ms as f64 / 1000.0
    }

    /// Extract the pointer position if this event carries one.
    pub fn position(&self) -> Option<(f64, f64)> {
        match &self.kind {
            PointerEventKind::Move { x, y } => Some((*x, *y)),
            PointerEventKind::Leave => None,
        }
    }
}

/// Errors that can occur when reading a trace.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("Trace is missing its `# {{...}}` header line")]
    MissingHeader,

    #[error("Malformed trace header: {source}")]
    HeaderParse { source: serde_json::Error },

    #[error("Malformed event on line {line}: {source}")]
    EventParse {
        line: usize,
        source: serde_json::Error,
    },
}

/// A complete pointer trace: header plus event stream.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerTrace {
    pub header: TraceHeader,
    pub events: Vec<PointerEvent>,
}

impl PointerTrace {
    /// Parse a full trace (header line plus events) from JSONL content.
    pub fn from_jsonl(content: &str) -> Result<Self, TraceError> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, header_line) = lines.next().ok_or(TraceError::MissingHeader)?;
        let header_json = header_line
            .strip_prefix('#')
            .ok_or(TraceError::MissingHeader)?
            .trim();
        let header: TraceHeader = serde_json::from_str(header_json)
            .map_err(|source| TraceError::HeaderParse { source })?;

        let mut events = Vec::new();
        for (line_no, line) in lines {
            if line.starts_with('#') {
                continue;
            }
            let event: PointerEvent = serde_json::from_str(line)
                .map_err(|source| TraceError::EventParse {
                    line: line_no,
                    source,
                })?;
            events.push(event);
        }

        Ok(Self { header, events })
    }

    /// Serialize the full trace (header line plus events) to JSONL.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let mut output = String::new();
        output.push_str("# ");
        output.push_str(&serde_json::to_string(&self.header)?);
        output.push('\n');
        output.push_str(&serialize_events(&self.events)?);
        Ok(output)
    }

    /// Total duration covered by the trace in milliseconds.
    pub fn duration_ms(&self) -> TimestampMs {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => last.timestamp_ms.saturating_sub(first.timestamp_ms),
            _ => 0,
        }
    }

    /// Bounding box of all move positions, if any.
    pub fn bounds(&self) -> Option<Rect> {
        let mut positions = self.events.iter().filter_map(PointerEvent::position);
        let (first_x, first_y) = positions.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first_x, first_y, first_x, first_y);
        for (x, y) in positions {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Number of move events in the trace.
    pub fn move_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, PointerEventKind::Move { .. }))
            .count()
    }
}

/// Parse events from JSONL content (one JSON object per line),
/// skipping blank and `#`-prefixed lines.
pub fn parse_events(jsonl: &str) -> Result<Vec<PointerEvent>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize events to JSONL format.
pub fn serialize_events(events: &[PointerEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}
