//! Output formatting for the bench harness.

use std::io::{self, Write};

use serde::Serialize;

use rmx_core::engine::ChannelEngine;
use rmx_core::output::LatchOutput;
use rmx_types::{ChannelDisplay, ClockEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Serialize)]
struct HeaderLine<'a> {
    channels: &'a [ChannelDisplay],
}

#[derive(Serialize)]
struct StepLine<'a> {
    step: usize,
    edge: String,
    outputs: &'a [bool],
}

#[derive(Serialize)]
struct SummaryLine {
    pulses: Vec<u32>,
    writes: Vec<u32>,
}

fn json_line<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    let line = serde_json::to_string(value).map_err(io::Error::other)?;
    writeln!(out, "{}", line)
}

pub fn write_header<W: Write>(
    out: &mut W,
    format: Format,
    channels: &[ChannelDisplay],
) -> io::Result<()> {
    match format {
        Format::Json => json_line(out, &HeaderLine { channels }),
        Format::Text => {
            for (i, ch) in channels.iter().enumerate() {
                writeln!(
                    out,
                    "ch{} {:<14} {:>5} {}",
                    i + 1,
                    ch.mode_name,
                    ch.parameter.label(),
                    ch.clock_label
                )?;
            }
            writeln!(out)
        }
    }
}

pub fn write_step<W: Write>(
    out: &mut W,
    format: Format,
    step: usize,
    event: &ClockEvent,
    outputs: &[bool],
) -> io::Result<()> {
    match format {
        Format::Json => json_line(
            out,
            &StepLine {
                step,
                edge: event.to_string(),
                outputs,
            },
        ),
        Format::Text => writeln!(out, "{:>5} {}  {}", step, event, lamps(outputs)),
    }
}

pub fn write_summary<W: Write>(
    out: &mut W,
    format: Format,
    channels: &[ChannelEngine<LatchOutput>],
) -> io::Result<()> {
    let pulses: Vec<u32> = channels.iter().map(|c| c.output().pulses()).collect();
    match format {
        Format::Json => json_line(
            out,
            &SummaryLine {
                pulses,
                writes: channels.iter().map(|c| c.output().writes()).collect(),
            },
        ),
        Format::Text => {
            let counts: Vec<String> = pulses.iter().map(|p| p.to_string()).collect();
            writeln!(out, "\npulses: {}", counts.join(" "))
        }
    }
}

/// `#` for high, `.` for low.
fn lamps(outputs: &[bool]) -> String {
    outputs
        .iter()
        .map(|high| if *high { "#" } else { "." })
        .collect::<Vec<&str>>()
        .join(" ")
}
