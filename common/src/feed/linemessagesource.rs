// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

use std::io::BufRead;

use crate::feed::{FeedMessage, MessageSource};

/// Reads `topic payload` lines, the format `mosquitto_sub -v` prints.
///
/// The topic ends at the first whitespace, the rest of the line is the payload.
/// Blank lines are skipped.
pub struct LineMessageSource<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> LineMessageSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl LineMessageSource<std::io::BufReader<std::io::Stdin>> {
    pub fn stdin() -> Self {
        Self::new(std::io::BufReader::new(std::io::stdin()))
    }
}

fn parse_line(line: &str) -> Result<FeedMessage, String> {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((topic, payload)) => Ok(FeedMessage::new(topic, payload.trim_start())),
        None => Err(format!("no payload after topic `{line}`")),
    }
}

impl<R: BufRead> MessageSource for LineMessageSource<R> {
    fn next_message(&mut self) -> Result<Option<FeedMessage>, Box<dyn std::error::Error>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            if self.line.trim().is_empty() {
                continue;
            }
            return Ok(Some(parse_line(&self.line)?));
        }
    }
}

#[test]
fn test_line_message_source() {
    let input = "sensors/d1 {\"deviceId\":\"d1\",\"readings\":[]}\n\n  \nsensors/d2\t{}\r\nbroken\nlast {}";
    let mut source = LineMessageSource::new(std::io::Cursor::new(input));

    assert_eq!(
        source.next_message().unwrap(),
        Some(FeedMessage::new(
            "sensors/d1",
            "{\"deviceId\":\"d1\",\"readings\":[]}"
        ))
    );
    assert_eq!(
        source.next_message().unwrap(),
        Some(FeedMessage::new("sensors/d2", "{}"))
    );
    assert!(source.next_message().is_err());
    assert_eq!(
        source.next_message().unwrap(),
        Some(FeedMessage::new("last", "{}"))
    );
    assert_eq!(source.next_message().unwrap(), None);
}
