//! Edge script and draw list parsing.

use rmx_types::ClockEvent;

/// Parse an edge script. Each line holds either one event in long form
/// (`a rise`) or any number of compact tokens (`A+ A- B+`). `#` starts a
/// comment.
pub fn parse_edges(source: &str) -> Result<Vec<ClockEvent>, String> {
    let mut events = Vec::new();
    for (n, raw) in source.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        if let Some(event) = ClockEvent::parse(line) {
            events.push(event);
            continue;
        }
        let tokens = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty());
        for token in tokens {
            let event = ClockEvent::parse(token)
                .ok_or_else(|| format!("line {}: unrecognized edge '{}'", n + 1, token))?;
            events.push(event);
        }
    }
    Ok(events)
}

/// Parse a comma-separated list of draws for the scripted random source.
pub fn parse_draws(list: &str) -> Result<Vec<u8>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<u8>() {
            Ok(v) if v < 100 => Ok(v),
            _ => Err(format!("draw '{}' is not in 0..100", s)),
        })
        .collect()
}
