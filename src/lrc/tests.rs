use super::*;

fn entry(ms: u64, text: &str) -> LyricEntry {
    LyricEntry::new(TimeTag::from_millis(ms), text)
}

#[test]
fn example() {
    const LYRIC: &str = r#"[00:12.00]Line 1 lyrics
[00:17.20]Line 2 lyrics"#;

    assert_eq!(
        Lyrics::parse(LYRIC).entries(),
        [entry(12_000, "Line 1 lyrics"), entry(17_200, "Line 2 lyrics")]
    );
}

#[test]
fn timestamp_math() {
    let lyrics = Lyrics::parse("[01:02.50]Hello");
    assert_eq!(lyrics.entries(), [entry(62_500, "Hello")]);
    assert_eq!(lyrics.entries()[0].time.as_millis(), 62_500);
}

#[test]
fn fraction_widths() {
    assert_eq!("00:01.5".parse::<TimeTag>().unwrap(), TimeTag::from_millis(1_500));
    assert_eq!("00:01.05".parse::<TimeTag>().unwrap(), TimeTag::from_millis(1_050));
    assert_eq!("00:01.123".parse::<TimeTag>().unwrap(), TimeTag::from_millis(1_123));
    assert_eq!("00:01:20".parse::<TimeTag>().unwrap(), TimeTag::from_millis(1_200));
    assert_eq!(
        "00:01.98765432109876543210987".parse::<TimeTag>().unwrap(),
        TimeTag::from_millis(1_987)
    );
    assert!("00:01.12a".parse::<TimeTag>().is_err());
    assert!("00:01".parse::<TimeTag>().is_err());
    assert!("ar: Artist".parse::<TimeTag>().is_err());
    assert!("00:+1.00".parse::<TimeTag>().is_err());
}

#[test]
fn long_fraction_keeps_line() {
    assert_eq!(
        Lyrics::parse("[00:02.500000000000000000000001]Still here").entries(),
        [entry(2_500, "Still here")]
    );
}

#[test]
fn ignores_malformed_lines() {
    const LYRIC: &str = r#"not a timestamp line
[ar: Jefferson Airplane]
[length: 2:58]

[00:01.00]Kept
[xx:01.00]Dropped"#;

    assert_eq!(Lyrics::parse(LYRIC).entries(), [entry(1_000, "Kept")]);
}

#[test]
fn drops_empty_content() {
    assert!(Lyrics::parse("[00:01.00]   ").is_empty());
    assert!(Lyrics::parse("[00:01.00]").is_empty());
    assert!(Lyrics::parse("").is_empty());
}

#[test]
fn trims_content() {
    assert_eq!(
        Lyrics::parse("[00:03.00]   spaced out  \r\n").entries(),
        [entry(3_000, "spaced out")]
    );
}

#[test]
fn sorts_by_time() {
    const LYRIC: &str = r#"[00:30.00]Third
[00:10.00]First
[00:20.00]Second
[00:05.00]Zeroth"#;

    let lyrics = Lyrics::parse(LYRIC);
    assert!(lyrics.entries().windows(2).all(|w| w[0].time <= w[1].time));
    assert_eq!(
        lyrics
            .entries()
            .iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>(),
        ["Zeroth", "First", "Second", "Third"]
    );
}

#[test]
fn parse_is_idempotent() {
    const LYRIC: &str = "[00:02.00]b\n[00:01.00]a\n[00:01.00]a again\nnoise";
    assert_eq!(Lyrics::parse(LYRIC), Lyrics::parse(LYRIC));
}

#[test]
fn repeating_lyrics() {
    const LYRIC: &str = r#"[00:12.00]Line 1 lyrics
[00:21.10][00:45.10]Repeating lyrics (e.g. chorus)"#;

    assert_eq!(
        Lyrics::parse(LYRIC).entries(),
        [
            entry(12_000, "Line 1 lyrics"),
            entry(21_100, "Repeating lyrics (e.g. chorus)"),
            entry(45_100, "Repeating lyrics (e.g. chorus)"),
        ]
    );
}

#[test]
fn enhanced_lrc() {
    const LYRIC: &str = r#"[ti: Somebody to Love]

[00:00.00] <00:00.04> When <00:00.16> the <00:00.82> truth <00:01.29> is <00:01.63> found <00:03.09> to <00:03.37> be <00:05.92> lies
[00:06.47] <00:07.67> And <00:07.94> all <00:08.36> the <00:08.63> joy <00:10.28> within <00:10.53> you <00:13.09> dies
[00:13.34] a <b> c"#;

    assert_eq!(
        Lyrics::parse(LYRIC).entries(),
        [
            entry(0, "When the truth is found to be lies"),
            entry(6_470, "And all the joy within you dies"),
            entry(13_340, "a <b> c"),
        ]
    );
}

#[test]
fn active_lookup_boundaries() {
    let lyrics: Lyrics = [entry(0, "A"), entry(1_000, "B"), entry(2_000, "C")]
        .into_iter()
        .collect();

    let active = |ms| lyrics.active_at(TimeTag::from_millis(ms)).map(|e| e.text.as_str());
    assert_eq!(active(0), Some("A"));
    assert_eq!(active(999), Some("A"));
    assert_eq!(active(1_000), Some("B"));
    assert_eq!(active(1_999), Some("B"));
    assert_eq!(active(60_000), Some("C"));
}

#[test]
fn active_lookup_before_start() {
    let lyrics = Lyrics::parse("[00:00.50]A\n[00:01.00]B");
    assert_eq!(lyrics.active_at(TimeTag::from_millis(0)), None);
    assert_eq!(lyrics.active_at(TimeTag::from_millis(499)), None);
    assert_eq!(Lyrics::default().active_at(TimeTag::from_millis(10)), None);
}

#[test]
fn equal_time_tags_last_line_wins() {
    let lyrics = Lyrics::parse("[00:01.00]first\n[00:02.00]later\n[00:01.00]second");
    assert_eq!(
        lyrics.active_at(TimeTag::from_millis(1_500)).map(|e| e.text.as_str()),
        Some("second")
    );
    assert_eq!(
        lyrics.active_at(TimeTag::from_millis(2_000)).map(|e| e.text.as_str()),
        Some("later")
    );
}
