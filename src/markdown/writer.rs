//! Canonical Markdown serialization of the block model.

use crate::model::{Block, Blockquote, CodeBlock, ColumnAlignment, Deck, List, Node, Table};
use crate::segment::reconstruct;

/// Serialize a flat node sequence to Markdown text.
///
/// Output is canonical: `-` bullets, backtick fences, `---` for both
/// frontmatter fences and thematic breaks, one blank line between
/// top-level blocks, a single trailing newline. Ordered-list markers all
/// carry the list's start number (markers are not incremented), matching
/// the serializer the deck format was built around.
pub fn write(nodes: &[Node]) -> String {
    let mut output = String::new();
    for node in nodes {
        match node {
            Node::Frontmatter(fm) => {
                output.push_str("---\n");
                output.push_str(&fm.text);
                output.push_str("\n---\n\n");
            }
            Node::ThematicBreak => output.push_str("---\n\n"),
            Node::Block(block) => {
                output.push_str(&render_block(block));
                output.push_str("\n\n");
            }
        }
    }

    let mut text = output.trim_end().to_string();
    text.push('\n');
    text
}

/// Reconstruct a deck into a flat tree and serialize it.
pub fn write_deck(deck: &Deck) -> String {
    write(&reconstruct(deck))
}

/// Render one block without trailing blank line.
fn render_block(block: &Block) -> String {
    match block {
        Block::Heading(h) => format!("{} {}", "#".repeat(h.level as usize), h.text),
        Block::Paragraph(p) => p.text.clone(),
        Block::List(list) => render_list(list),
        Block::Table(table) => render_table(table),
        Block::CodeBlock(code) => render_code(code),
        Block::Image(image) => {
            let mut out = format!("![{}]({}", image.alt, image.url);
            if let Some(title) = &image.title {
                out.push_str(" \"");
                out.push_str(title);
                out.push('"');
            }
            out.push(')');
            out
        }
        Block::Blockquote(quote) => render_blockquote(quote),
        Block::Html(html) => html.text.clone(),
    }
}

fn render_list(list: &List) -> String {
    let marker = if list.ordered {
        format!("{}. ", list.start.unwrap_or(1))
    } else {
        "- ".to_string()
    };
    let indent = " ".repeat(marker.chars().count());

    let mut out = String::new();
    for item in &list.items {
        let body = item
            .blocks
            .iter()
            .map(render_block)
            .collect::<Vec<_>>()
            .join("\n");
        if body.is_empty() {
            out.push_str(marker.trim_end());
            out.push('\n');
            continue;
        }
        for (n, line) in body.lines().enumerate() {
            if n == 0 {
                out.push_str(&marker);
            } else if !line.is_empty() {
                out.push_str(&indent);
            }
            out.push_str(line);
            out.push('\n');
        }
    }
    out.trim_end().to_string()
}

fn render_table(table: &Table) -> String {
    let mut lines = Vec::new();
    lines.push(render_row(&table.header));

    let separator: Vec<String> = table
        .alignments
        .iter()
        .map(|a| match a {
            ColumnAlignment::None => "---".to_string(),
            ColumnAlignment::Left => ":---".to_string(),
            ColumnAlignment::Center => ":---:".to_string(),
            ColumnAlignment::Right => "---:".to_string(),
        })
        .collect();
    lines.push(format!("| {} |", separator.join(" | ")));

    for row in &table.rows {
        lines.push(render_row(row));
    }
    lines.join("\n")
}

fn render_row(cells: &[String]) -> String {
    let escaped: Vec<String> = cells.iter().map(|c| c.replace('|', "\\|")).collect();
    format!("| {} |", escaped.join(" | "))
}

fn render_code(code: &CodeBlock) -> String {
    let mut out = String::from("```");
    if let Some(lang) = &code.language {
        out.push_str(lang);
    }
    out.push('\n');
    out.push_str(&code.code);
    if !code.code.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("```");
    out
}

fn render_blockquote(quote: &Blockquote) -> String {
    let inner = quote
        .blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n\n");
    inner
        .lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
