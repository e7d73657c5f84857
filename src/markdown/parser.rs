//! Event-stream parsing of Marp Markdown into the block model.

use crate::model::{
    Block, Blockquote, CodeBlock, ColumnAlignment, Frontmatter, Heading, Html, Image, List,
    ListItem, Node, Paragraph, Table,
};
use pulldown_cmark::{
    CodeBlockKind, Event, HeadingLevel, Options, Parser as CmarkParser, Tag, TagEnd,
};

/// Parse Marp Markdown source into a flat node sequence.
///
/// Tables, strikethrough and YAML frontmatter are enabled. Inline content
/// is re-serialized into canonical Markdown text runs, so the result is
/// stable under a second parse of its written form.
pub fn parse(source: &str) -> Vec<Node> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS;
    let events: Vec<Event> = CmarkParser::new_ext(source, options).collect();

    let mut nodes = Vec::new();
    let mut i = 0;
    while i < events.len() {
        match &events[i] {
            Event::Start(Tag::MetadataBlock(_)) => {
                i += 1;
                let text = collect_text(&events, &mut i, |e| matches!(e, TagEnd::MetadataBlock(_)));
                nodes.push(Node::Frontmatter(Frontmatter::new(text.trim_end())));
            }
            Event::Rule => {
                nodes.push(Node::ThematicBreak);
                i += 1;
            }
            _ => {
                if let Some(block) = parse_block(&events, &mut i) {
                    nodes.push(Node::Block(block));
                }
            }
        }
    }
    nodes
}

/// Parse one block-level construct starting at `events[*i]`, advancing `i`
/// past it. Returns `None` for events that produce no block.
fn parse_block(events: &[Event], i: &mut usize) -> Option<Block> {
    match &events[*i] {
        Event::Start(Tag::Heading { level, .. }) => {
            let level = heading_level_to_u8(*level);
            *i += 1;
            let text = collect_inline(events, i, |e| matches!(e, TagEnd::Heading(_)));
            Some(Block::Heading(Heading::new(level, text)))
        }
        Event::Start(Tag::Paragraph) => {
            *i += 1;
            let pieces = collect_pieces(events, i, |e| matches!(e, TagEnd::Paragraph), false);
            Some(paragraph_from_pieces(pieces))
        }
        Event::Start(Tag::CodeBlock(kind)) => {
            let language = match kind {
                CodeBlockKind::Fenced(info) => {
                    let lang = info.split_whitespace().next().unwrap_or("").to_string();
                    if lang.is_empty() {
                        None
                    } else {
                        Some(lang)
                    }
                }
                CodeBlockKind::Indented => None,
            };
            *i += 1;
            let code = collect_text(events, i, |e| matches!(e, TagEnd::CodeBlock));
            Some(Block::CodeBlock(CodeBlock::new(language, code)))
        }
        Event::Start(Tag::List(start)) => {
            let start = *start;
            *i += 1;
            let items = collect_list_items(events, i);
            Some(Block::List(List {
                ordered: start.is_some(),
                start,
                items,
                classes: Vec::new(),
            }))
        }
        Event::Start(Tag::Table(alignments)) => {
            let alignments: Vec<ColumnAlignment> = alignments
                .iter()
                .map(|a| match a {
                    pulldown_cmark::Alignment::None => ColumnAlignment::None,
                    pulldown_cmark::Alignment::Left => ColumnAlignment::Left,
                    pulldown_cmark::Alignment::Center => ColumnAlignment::Center,
                    pulldown_cmark::Alignment::Right => ColumnAlignment::Right,
                })
                .collect();
            *i += 1;
            let (header, rows) = collect_table(events, i);
            Some(Block::Table(Table {
                alignments,
                header,
                rows,
            }))
        }
        Event::Start(Tag::BlockQuote(_)) => {
            *i += 1;
            let blocks = collect_blocks(events, i, |e| matches!(e, TagEnd::BlockQuote(_)));
            Some(Block::Blockquote(Blockquote::new(blocks)))
        }
        Event::Start(Tag::HtmlBlock) => {
            *i += 1;
            let text = collect_text(events, i, |e| matches!(e, TagEnd::HtmlBlock));
            let text = text.trim_end();
            if text.is_empty() {
                None
            } else {
                Some(Block::Html(Html::new(text)))
            }
        }
        Event::Start(_) => {
            skip_container(events, i);
            None
        }
        _ => {
            *i += 1;
            None
        }
    }
}

/// Collect blocks until the matching end tag, handling the bare inline
/// runs of tight list items by wrapping them in an implicit paragraph.
fn collect_blocks(events: &[Event], i: &mut usize, is_end: impl Fn(&TagEnd) -> bool) -> Vec<Block> {
    let mut blocks = Vec::new();
    while *i < events.len() {
        match &events[*i] {
            Event::End(e) if is_end(e) => {
                *i += 1;
                break;
            }
            ev if is_inline_event(ev) => {
                let pieces = collect_pieces(events, i, &is_end, true);
                blocks.push(paragraph_from_pieces(pieces));
            }
            _ => {
                if let Some(block) = parse_block(events, i) {
                    blocks.push(block);
                }
            }
        }
    }
    blocks
}

fn collect_list_items(events: &[Event], i: &mut usize) -> Vec<ListItem> {
    let mut items = Vec::new();
    while *i < events.len() {
        match &events[*i] {
            Event::End(TagEnd::List(_)) => {
                *i += 1;
                break;
            }
            Event::Start(Tag::Item) => {
                *i += 1;
                let blocks = collect_blocks(events, i, |e| matches!(e, TagEnd::Item));
                items.push(ListItem::new(blocks));
            }
            _ => {
                *i += 1;
            }
        }
    }
    items
}

fn collect_table(events: &[Event], i: &mut usize) -> (Vec<String>, Vec<Vec<String>>) {
    let mut header = Vec::new();
    let mut rows = Vec::new();
    let mut current: Vec<String> = Vec::new();
    while *i < events.len() {
        match &events[*i] {
            Event::End(TagEnd::Table) => {
                *i += 1;
                break;
            }
            Event::End(TagEnd::TableHead) => {
                header = std::mem::take(&mut current);
                *i += 1;
            }
            Event::End(TagEnd::TableRow) => {
                rows.push(std::mem::take(&mut current));
                *i += 1;
            }
            Event::Start(Tag::TableCell) => {
                *i += 1;
                current.push(collect_inline(events, i, |e| matches!(e, TagEnd::TableCell)));
            }
            _ => {
                *i += 1;
            }
        }
    }
    (header, rows)
}

/// Concatenated text of every `Text`/`Html` event until the matching end
/// tag. Used for code blocks, frontmatter and raw HTML blocks.
fn collect_text(events: &[Event], i: &mut usize, is_end: impl Fn(&TagEnd) -> bool) -> String {
    let mut out = String::new();
    while *i < events.len() {
        match &events[*i] {
            Event::End(e) if is_end(e) => {
                *i += 1;
                break;
            }
            Event::Text(t) => {
                out.push_str(t);
                *i += 1;
            }
            Event::Html(h) => {
                out.push_str(h);
                *i += 1;
            }
            _ => {
                *i += 1;
            }
        }
    }
    out
}

/// One piece of a paragraph's inline content: a text run in canonical
/// Markdown form, or a standalone image candidate.
enum InlinePiece {
    Text(String),
    Image(Image),
}

/// Collect inline content as canonical Markdown text.
fn collect_inline(events: &[Event], i: &mut usize, is_end: impl Fn(&TagEnd) -> bool) -> String {
    join_pieces(collect_pieces(events, i, is_end, false))
}

/// Must stay a plain `fn`, not a closure inside `collect_pieces`: a closure
/// there inherits that function's generic parameter, so each recursion level
/// would instantiate a new type and monomorphization would never terminate.
fn is_image_end(e: &TagEnd) -> bool {
    matches!(e, TagEnd::Image)
}

/// Collect inline content into pieces, keeping top-level images separate so
/// an image-only paragraph can be promoted to an image block.
///
/// With `tight` set, collection stops (without consuming) at any
/// block-level start tag and leaves the terminating end tag for the caller;
/// that is the shape of bare text runs inside tight list items.
fn collect_pieces(
    events: &[Event],
    i: &mut usize,
    is_end: impl Fn(&TagEnd) -> bool,
    tight: bool,
) -> Vec<InlinePiece> {
    let mut pieces = Vec::new();
    let mut text = String::new();
    let mut link_targets: Vec<(String, String)> = Vec::new();

    while *i < events.len() {
        match &events[*i] {
            Event::End(e) if is_end(e) => {
                if !tight {
                    *i += 1;
                }
                break;
            }
            Event::Start(tag) if tight && is_block_tag(tag) => break,
            Event::Start(Tag::Image {
                dest_url, title, ..
            }) => {
                let url = dest_url.to_string();
                let title = title.to_string();
                *i += 1;
                let alt = collect_inline(events, i, is_image_end);
                if !text.is_empty() {
                    pieces.push(InlinePiece::Text(std::mem::take(&mut text)));
                }
                let mut image = Image::new(url, alt);
                if !title.is_empty() {
                    image.title = Some(title);
                }
                pieces.push(InlinePiece::Image(image));
                continue;
            }
            Event::Text(t) => text.push_str(t),
            Event::Code(c) => {
                text.push('`');
                text.push_str(c);
                text.push('`');
            }
            Event::SoftBreak => text.push(' '),
            Event::HardBreak => text.push_str("\\\n"),
            Event::InlineHtml(h) => text.push_str(h),
            Event::Start(Tag::Emphasis) | Event::End(TagEnd::Emphasis) => text.push('*'),
            Event::Start(Tag::Strong) | Event::End(TagEnd::Strong) => text.push_str("**"),
            Event::Start(Tag::Strikethrough) | Event::End(TagEnd::Strikethrough) => {
                text.push_str("~~")
            }
            Event::Start(Tag::Link {
                dest_url, title, ..
            }) => {
                text.push('[');
                link_targets.push((dest_url.to_string(), title.to_string()));
            }
            Event::End(TagEnd::Link) => {
                if let Some((url, title)) = link_targets.pop() {
                    text.push_str("](");
                    text.push_str(&url);
                    if !title.is_empty() {
                        text.push_str(" \"");
                        text.push_str(&title);
                        text.push('"');
                    }
                    text.push(')');
                }
            }
            _ => {}
        }
        *i += 1;
    }

    if !text.is_empty() {
        pieces.push(InlinePiece::Text(text));
    }
    pieces
}

/// Build a paragraph block from collected pieces, promoting a lone image
/// (surrounded by nothing but whitespace) to a standalone image block.
fn paragraph_from_pieces(pieces: Vec<InlinePiece>) -> Block {
    let image_count = pieces
        .iter()
        .filter(|p| matches!(p, InlinePiece::Image(_)))
        .count();
    let text_is_blank = pieces.iter().all(|p| match p {
        InlinePiece::Text(t) => t.trim().is_empty(),
        InlinePiece::Image(_) => true,
    });

    if image_count == 1 && text_is_blank {
        for piece in pieces {
            if let InlinePiece::Image(image) = piece {
                return Block::Image(image);
            }
        }
        unreachable!();
    }

    Block::Paragraph(Paragraph::new(join_pieces(pieces)))
}

fn join_pieces(pieces: Vec<InlinePiece>) -> String {
    let mut out = String::new();
    for piece in pieces {
        match piece {
            InlinePiece::Text(t) => out.push_str(&t),
            InlinePiece::Image(image) => {
                out.push_str("![");
                out.push_str(&image.alt);
                out.push_str("](");
                out.push_str(&image.url);
                if let Some(title) = &image.title {
                    out.push_str(" \"");
                    out.push_str(title);
                    out.push('"');
                }
                out.push(')');
            }
        }
    }
    out
}

fn is_inline_event(event: &Event) -> bool {
    match event {
        Event::Text(_)
        | Event::Code(_)
        | Event::InlineHtml(_)
        | Event::SoftBreak
        | Event::HardBreak => true,
        Event::Start(tag) => !is_block_tag(tag),
        _ => false,
    }
}

fn is_block_tag(tag: &Tag) -> bool {
    !matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
    )
}

/// Skip an unhandled container and everything nested inside it.
fn skip_container(events: &[Event], i: &mut usize) {
    let mut depth = 0usize;
    while *i < events.len() {
        match &events[*i] {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    *i += 1;
                    return;
                }
            }
            _ => {}
        }
        *i += 1;
    }
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
