use crate::Result;
use std::io::{BufRead, Write};

/// Copy `reader` to `writer`, replacing every character that is not
/// alphabetic, a space or a newline with a space.
pub fn filter_text<R: BufRead, W: Write>(mut reader: R, mut writer: W) -> Result<()> {
    let mut line = String::new();
    let mut filtered = String::new();
    while reader.read_line(&mut line)? > 0 {
        filtered.extend(line.chars().map(|c| {
            if c.is_alphabetic() || c == ' ' || c == '\n' {
                c
            } else {
                ' '
            }
        }));
        writer.write_all(filtered.as_bytes())?;
        line.clear();
        filtered.clear();
    }
    writer.flush()?;
    Ok(())
}

/// Words of `line` together with the character offset each starts at.
///
/// A word is a maximal run of characters other than the space.
pub fn word_spans(line: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
    let mut offset = 0;
    line.split(' ').filter_map(move |piece| {
        let start = offset;
        offset += piece.chars().count() + 1;
        if piece.is_empty() {
            None
        } else {
            Some((start, piece))
        }
    })
}

/// Words of `line`
pub fn words(line: &str) -> impl Iterator<Item = &str> + '_ {
    word_spans(line).map(|(_, word)| word)
}

/// Read at most `max` words from the successive lines of `reader`
pub fn read_words<R: BufRead>(reader: R, max: usize) -> Result<Vec<String>> {
    let mut out = Vec::with_capacity(max.min(1 << 16));
    for line in reader.lines() {
        if out.len() >= max {
            break;
        }
        out.extend(words(&line?).map(str::to_owned));
    }
    out.truncate(max);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_replaces_punctuation_and_digits() {
        let mut out = Vec::new();
        filter_text("Hello, world 42!\nÅsa's\n".as_bytes(), &mut out).unwrap();
        assert_eq!("Hello  world    \nÅsa s\n", String::from_utf8(out).unwrap());
    }

    #[test]
    fn spans_count_characters() {
        let spans: Vec<_> = word_spans("  ab  ñé c").collect();
        assert_eq!(vec![(2, "ab"), (6, "ñé"), (9, "c")], spans);
    }

    #[test]
    fn read_words_stops_at_max() {
        let text = "one two three\nfour five\nsix\n";
        let first = read_words(text.as_bytes(), 4).unwrap();
        assert_eq!(vec!["one", "two", "three", "four"], first);
        assert_eq!(6, read_words(text.as_bytes(), 100).unwrap().len());
        assert!(read_words(text.as_bytes(), 0).unwrap().is_empty());
    }
}
