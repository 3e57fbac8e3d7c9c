//! Group Timeline
//!
//! Records when each branch of a concurrent group starts and finishes.
//! Branch results are merged in declaration order, so the timeline is
//! the only place the physical completion order is visible.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Type of timeline event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventType {
    /// Branch started executing
    Started,
    /// Branch reached its terminal value
    Completed,
    /// Branch failed
    Failed,
}

impl EventType {
    fn is_terminal(&self) -> bool {
        matches!(self, EventType::Completed | EventType::Failed)
    }
}

/// A single event in the timeline.
#[derive(Debug, Clone)]
pub struct TimelineEvent {
    /// Name of the branch
    pub branch: String,
    /// Type of event
    pub event_type: EventType,
    /// When the event occurred
    pub timestamp: Instant,
}

/// Tracks branch start/finish events for one group run.
#[derive(Debug, Clone)]
pub struct ExecutionTimeline {
    events: Vec<TimelineEvent>,
    start_time: Instant,
}

impl ExecutionTimeline {
    /// Creates a new timeline starting now.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            start_time: Instant::now(),
        }
    }

    /// Records an event for a branch.
    pub fn add_event(&mut self, branch: impl Into<String>, event_type: EventType) {
        self.events.push(TimelineEvent {
            branch: branch.into(),
            event_type,
            timestamp: Instant::now(),
        });
    }

    /// Returns all recorded events.
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Branch names in the order they started.
    pub fn start_order(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter(|e| e.event_type == EventType::Started)
            .map(|e| e.branch.as_str())
            .collect()
    }

    /// Branch names in the order they finished (completed or failed).
    pub fn completion_order(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter(|e| e.event_type.is_terminal())
            .map(|e| e.branch.as_str())
            .collect()
    }

    /// Returns the total elapsed time since timeline creation.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns branch durations in milliseconds.
    pub fn durations(&self) -> HashMap<String, u128> {
        let mut starts: HashMap<&str, u128> = HashMap::new();
        let mut durations = HashMap::new();

        for event in &self.events {
            let elapsed = event.timestamp.duration_since(self.start_time).as_millis();

            match event.event_type {
                EventType::Started => {
                    starts.insert(event.branch.as_str(), elapsed);
                }
                EventType::Completed | EventType::Failed => {
                    if let Some(start) = starts.get(event.branch.as_str()) {
                        durations.insert(event.branch.clone(), elapsed - start);
                    }
                }
            }
        }

        durations
    }

    /// Renders an ASCII bar per branch, scaled to 40 columns.
    pub fn gantt_chart(&self) -> String {
        let mut output = String::from("Group timeline:\n");

        let total_time = self.elapsed().as_millis();
        if total_time == 0 {
            return output;
        }

        let scale = 40.0 / total_time as f64;
        let mut spans: Vec<(&str, u128, u128)> = Vec::new();

        for event in &self.events {
            let elapsed = event.timestamp.duration_since(self.start_time).as_millis();
            match event.event_type {
                EventType::Started => spans.push((event.branch.as_str(), elapsed, elapsed)),
                EventType::Completed | EventType::Failed => {
                    if let Some(span) = spans.iter_mut().find(|(b, _, _)| *b == event.branch) {
                        span.2 = elapsed;
                    }
                }
            }
        }

        for (branch, start, end) in spans {
            let start_pos = (start as f64 * scale) as usize;
            let width = ((end - start) as f64 * scale).max(1.0) as usize;
            output.push_str(&format!(
                "{:12} |{}{}| ({} ms)\n",
                truncate(branch, 12),
                " ".repeat(start_pos),
                "#".repeat(width),
                end - start
            ));
        }

        output
    }
}

impl Default for ExecutionTimeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Pads or truncates a label to a fixed width.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
