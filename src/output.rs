//! Plain text presentation of alignment lists.

use std::io;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::alignment::Alignment;

fn join_side(segments: &[String]) -> String {
    segments
        .iter()
        .map(|segment| segment.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per alignment: source, target and score separated by tabs.
pub fn print_pairs(alignments: &[Alignment], output: &mut impl io::Write) -> io::Result<()> {
    for alignment in alignments {
        writeln!(
            output,
            "{}\t{}\t{:.4}",
            join_side(&alignment.source),
            join_side(&alignment.target),
            alignment.score
        )?;
    }
    Ok(())
}

/// Greedy word wrap to at most `width` columns. A character wider than
/// `width` gets a line of its own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = vec![];
    let mut line = String::new();
    let mut line_width = 0;
    for word in text.split_whitespace() {
        let word_width = word.width();
        if line_width > 0 && line_width + 1 + word_width > width {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        if word_width > width {
            // Break words that do not fit on a line of their own.
            for c in word.chars() {
                let char_width = c.width().unwrap_or(0);
                if line_width > 0 && line_width + char_width > width {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push(c);
                line_width += char_width;
            }
            continue;
        }
        if line_width > 0 {
            line.push(' ');
            line_width += 1;
        }
        line.push_str(word);
        line_width += word_width;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

pub fn print_side_by_side(alignments: &[Alignment], width: usize, output: &mut impl io::Write) -> io::Result<()> {
    let width = width.max(1);
    for alignment in alignments {
        writeln!(output, "--- {} {:.4} ---", alignment.category(), alignment.score)?;
        let sides = [
            wrap(&join_side(&alignment.source), width),
            wrap(&join_side(&alignment.target), width),
        ];
        for i in 0..sides[0].len().max(sides[1].len()) {
            let left = sides[0].get(i).map_or("", String::as_str);
            let right = sides[1].get(i).map_or("", String::as_str);
            let padding = " ".repeat(width.saturating_sub(left.width()));
            writeln!(output, "{left}{padding} | {right}")?;
        }
    }
    Ok(())
}
