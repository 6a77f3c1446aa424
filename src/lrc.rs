//! A small parser for LRC synced lyrics.

#[cfg(test)]
mod tests;

use std::{str::FromStr, time::Duration};

use anyhow::{anyhow, ensure, Context as _, Result};

/// A time offset from the start of the song.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeTag(pub Duration);
impl AsRef<Duration> for TimeTag {
    fn as_ref(&self) -> &Duration {
        &self.0
    }
}
impl From<Duration> for TimeTag {
    fn from(d: Duration) -> Self {
        Self(d)
    }
}
impl From<TimeTag> for Duration {
    fn from(t: TimeTag) -> Self {
        t.0
    }
}
#[cfg(test)]
impl TimeTag {
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }
    #[must_use]
    pub fn as_millis(&self) -> u64 {
        u64::try_from(self.0.as_millis()).unwrap_or(u64::MAX)
    }
}

fn ensure_digits(s: &str) -> Result<()> {
    ensure!(
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()),
        "{s:?} is not a number"
    );
    Ok(())
}

fn parse_digits(s: &str) -> Result<u64> {
    ensure_digits(s)?;
    s.parse::<u64>()
        .with_context(|| format!("Failed to parse {s} as u64"))
}

impl FromStr for TimeTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Parse both mm:ss.xx and mm:ss:xx formats
        let (minutes, rest) = s
            .split_once(':')
            .ok_or_else(|| anyhow!("Invalid time tag {s}"))?;
        let (seconds, fraction) = rest
            .split_once(|c| c == '.' || c == ':')
            .ok_or_else(|| anyhow!("Invalid time tag {s}"))?;
        let minutes = parse_digits(minutes)?;
        let seconds = parse_digits(seconds)?;
        ensure_digits(fraction)?;

        // Fraction digits are a decimal fraction of a second: "50" is 500ms, "5" too.
        // Digits past milliseconds are ignored.
        let millis = fraction
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(3)
            .fold(0, |acc, b| acc * 10 + u64::from(b - b'0'));

        let seconds = minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .ok_or_else(|| anyhow!("Time tag {s} out of range"))?;
        Ok(Self(Duration::from_secs(seconds) + Duration::from_millis(millis)))
    }
}

/// A single timed line of lyrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricEntry {
    pub time: TimeTag,
    pub text: String,
}

impl LyricEntry {
    pub fn new(time: impl Into<TimeTag>, text: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            text: text.into(),
        }
    }
}

/// Split a raw line into its leading time tags and the remaining text.
fn split_time_tags(mut s: &str) -> (Vec<TimeTag>, &str) {
    let mut time = Vec::with_capacity(1);
    loop {
        s = s.trim_start();
        if let Some((Ok(tag), rest)) = s
            .split_once(']')
            .and_then(|(tag, rest)| tag.strip_prefix('[').map(|tag| (tag, rest)))
            .map(|(tag, rest)| (tag.parse::<TimeTag>(), rest))
        {
            time.push(tag);
            s = rest;
        } else {
            break;
        }
    }
    (time, s)
}

/// Remove A2 (enhanced LRC) word time tags such as `<00:01.29>`.
fn strip_word_tags(s: &str) -> String {
    let mut text = String::with_capacity(s.len());
    let mut s = s.chars();
    while let Some(c) = s.next() {
        if c != '<' {
            text.push(c);
            continue;
        }
        let mut tag = String::with_capacity(8);
        let mut closed = false;
        for c in s.by_ref() {
            if c == '>' {
                closed = true;
                break;
            }
            tag.push(c);
        }
        if closed && tag.parse::<TimeTag>().is_ok() {
            // Skip following whitespace
            for c in s.by_ref() {
                if !c.is_whitespace() {
                    text.push(c);
                    break;
                }
            }
        } else {
            text.push('<');
            text.push_str(&tag);
            if closed {
                text.push('>');
            }
        }
    }
    text
}

/// Parsed synced lyrics of one track, sorted by time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lyrics(Vec<LyricEntry>);

impl Lyrics {
    /// Parse LRC text. Lines without a leading time tag or without text are skipped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut entries = Vec::new();
        for line in text.lines() {
            let (times, rest) = split_time_tags(line);
            if times.is_empty() {
                continue;
            }
            let text = strip_word_tags(rest);
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            entries.extend(times.into_iter().map(|time| LyricEntry::new(time, text)));
        }
        // Stable, so equal time tags keep their source order
        entries.sort_by_key(|e| e.time);
        Self(entries)
    }

    #[cfg(test)]
    #[must_use]
    pub fn entries(&self) -> &[LyricEntry] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The last entry whose time tag is at or before `position`.
    ///
    /// When several entries share a time tag, the one appearing last in the source wins.
    #[must_use]
    pub fn active_at(&self, position: TimeTag) -> Option<&LyricEntry> {
        let upper = self.0.partition_point(|e| e.time <= position);
        upper.checked_sub(1).map(|i| &self.0[i])
    }
}

impl FromIterator<LyricEntry> for Lyrics {
    fn from_iter<T: IntoIterator<Item = LyricEntry>>(iter: T) -> Self {
        let mut entries: Vec<_> = iter.into_iter().collect();
        entries.sort_by_key(|e| e.time);
        Self(entries)
    }
}
