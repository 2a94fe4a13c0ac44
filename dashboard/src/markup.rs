//! Parser for the small markup subset used by insight text: blank-line
//! separated paragraphs, `## ` headings, `- ` bullet lines and `**bold**`.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Span {
    Text(String),
    Bold(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Block {
    Heading(Vec<Span>),
    Paragraph(Vec<Span>),
    Bullets(Vec<Vec<Span>>),
}

pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut bullets: Vec<Vec<Span>> = Vec::new();

    for line in text.lines() {
        let line = line.trim_end();

        if line.trim().is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph);
            flush_bullets(&mut blocks, &mut bullets);
        } else if let Some(heading) = line.strip_prefix("## ") {
            flush_paragraph(&mut blocks, &mut paragraph);
            flush_bullets(&mut blocks, &mut bullets);
            blocks.push(Block::Heading(parse_spans(heading.trim())));
        } else if let Some(item) = line.strip_prefix("- ") {
            flush_paragraph(&mut blocks, &mut paragraph);
            bullets.push(parse_spans(item.trim()));
        } else {
            flush_bullets(&mut blocks, &mut bullets);
            paragraph.push(line.trim());
        }
    }

    flush_paragraph(&mut blocks, &mut paragraph);
    flush_bullets(&mut blocks, &mut bullets);
    blocks
}

fn flush_paragraph(blocks: &mut Vec<Block>, lines: &mut Vec<&str>) {
    if !lines.is_empty() {
        blocks.push(Block::Paragraph(parse_spans(&lines.join(" "))));
        lines.clear();
    }
}

fn flush_bullets(blocks: &mut Vec<Block>, items: &mut Vec<Vec<Span>>) {
    if !items.is_empty() {
        blocks.push(Block::Bullets(std::mem::take(items)));
    }
}

/// Splits on `**` pairs. An unmatched trailing marker stays literal.
pub fn parse_spans(line: &str) -> Vec<Span> {
    let parts: Vec<&str> = line.split("**").collect();
    let balanced = parts.len() % 2 == 1;
    let mut spans = Vec::new();

    for (i, part) in parts.iter().enumerate() {
        let is_bold = i % 2 == 1;
        if is_bold && !balanced && i == parts.len() - 1 {
            push_text(&mut spans, &format!("**{part}"));
        } else if part.is_empty() {
            continue;
        } else if is_bold {
            spans.push(Span::Bold(part.to_string()));
        } else {
            push_text(&mut spans, part);
        }
    }
    spans
}

fn push_text(spans: &mut Vec<Span>, text: &str) {
    if let Some(Span::Text(last)) = spans.last_mut() {
        last.push_str(text);
    } else {
        spans.push(Span::Text(text.to_string()));
    }
}

/// Concatenated span text without markers.
pub fn plain_text(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Text(t) | Span::Bold(t) => t.as_str(),
        })
        .collect()
}
