//! Source Text Model
//!
//! Line indexing plus a small lexical state machine that walks code bytes
//! while skipping strings and comments and tracking bracket depth per kind.
//! Everything above this module (scanner, parameter extractor, export
//! resolver) asks depth questions through these types instead of
//! re-implementing their own backward loops.

/// Bracket depth per bracket kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BracketDepth {
    pub paren: usize,
    pub bracket: usize,
    pub brace: usize,
    pub angle: usize,
}

impl BracketDepth {
    /// True when no bracket of any kind is open
    pub fn is_top_level(&self) -> bool {
        self.paren == 0 && self.bracket == 0 && self.brace == 0 && self.angle == 0
    }

    /// Advance past one code byte. `prev` is the byte before it, used so the
    /// `>` of an arrow (`=>`) never closes a generic.
    pub fn apply(&mut self, prev: Option<u8>, byte: u8) {
        match byte {
            b'(' => self.paren += 1,
            b')' => self.paren = self.paren.saturating_sub(1),
            b'[' => self.bracket += 1,
            b']' => self.bracket = self.bracket.saturating_sub(1),
            b'{' => self.brace += 1,
            b'}' => self.brace = self.brace.saturating_sub(1),
            b'<' => self.angle += 1,
            b'>' if prev != Some(b'=') => self.angle = self.angle.saturating_sub(1),
            _ => {}
        }
    }
}

/// Iterator over code bytes of a text, yielding `(offset, byte, depth_before)`.
///
/// String literals, template literals and comments are skipped entirely.
/// Single- and double-quoted strings end at a newline even when unterminated,
/// which keeps stray apostrophes in JSX text from swallowing the file.
/// Regex literals are not recognised.
pub struct CodeBytes<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: BracketDepth,
}

impl<'a> CodeBytes<'a> {
    pub fn new(text: &'a str, from: usize) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: from,
            depth: BracketDepth::default(),
        }
    }

    /// Depth after everything yielded so far
    pub fn depth(&self) -> BracketDepth {
        self.depth
    }
}

impl Iterator for CodeBytes<'_> {
    type Item = (usize, u8, BracketDepth);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let i = self.pos;
            let byte = *self.bytes.get(i)?;
            let next = self.bytes.get(i + 1).copied();
            match (byte, next) {
                (b'/', Some(b'/')) => {
                    self.pos = skip_line_comment(self.bytes, i);
                    continue;
                }
                (b'/', Some(b'*')) => {
                    self.pos = skip_block_comment(self.bytes, i);
                    continue;
                }
                (b'"' | b'\'' | b'`', _) => {
                    self.pos = skip_quoted(self.bytes, i);
                    continue;
                }
                _ => {}
            }

            let before = self.depth;
            let prev = i.checked_sub(1).map(|p| self.bytes[p]);
            self.depth.apply(prev, byte);
            self.pos = i + 1;
            return Some((i, byte, before));
        }
    }
}

fn skip_line_comment(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| start + p)
}

fn skip_block_comment(bytes: &[u8], start: usize) -> usize {
    let body = start + 2;
    bytes
        .get(body..)
        .and_then(|rest| rest.windows(2).position(|w| w == b"*/"))
        .map_or(bytes.len(), |p| body + p + 2)
}

fn skip_quoted(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if quote != b'`' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Offset of the bracket closing the one at `open`, if it closes within `text`.
///
/// `open` must point at `(`, `[`, `{` or `<`. Only the closer of the same
/// kind at the same nesting level counts; a `)` that closes a nested group
/// never terminates the search.
pub fn matching_close(text: &str, open: usize) -> Option<usize> {
    let opener = *text.as_bytes().get(open)?;
    let closer = match opener {
        b'(' => b')',
        b'[' => b']',
        b'{' => b'}',
        b'<' => b'>',
        _ => return None,
    };

    let mut walker = CodeBytes::new(text, open);
    walker.next()?;
    for (i, byte, depth) in walker {
        if byte != closer {
            continue;
        }
        let closes = match closer {
            b')' => depth.paren == 1 && depth.bracket == 0 && depth.brace == 0,
            b']' => depth.bracket == 1 && depth.paren == 0 && depth.brace == 0,
            b'}' => depth.brace == 1 && depth.paren == 0 && depth.bracket == 0,
            _ => {
                let is_arrow = i > 0 && text.as_bytes()[i - 1] == b'=';
                !is_arrow
                    && depth.angle == 1
                    && depth.paren == 0
                    && depth.bracket == 0
                    && depth.brace == 0
            }
        };
        if closes {
            return Some(i);
        }
    }
    None
}

/// Split on `separator` where no bracket of any kind is open.
pub fn split_top_level(text: &str, separator: u8) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, byte, depth) in CodeBytes::new(text, 0) {
        if byte == separator && depth.is_top_level() {
            parts.push(&text[start..i]);
            start = i + 1;
        }
    }
    parts.push(&text[start..]);
    parts
}

/// First top-level occurrence of `target`
pub fn find_top_level(text: &str, target: u8) -> Option<usize> {
    CodeBytes::new(text, 0)
        .find(|(_, byte, depth)| *byte == target && depth.is_top_level())
        .map(|(i, _, _)| i)
}

/// Whether the `=` at `i` is an assignment rather than part of `=>`, `==`,
/// `!=`, `<=`, `>=`
pub fn is_assignment_at(text: &str, i: usize) -> bool {
    let bytes = text.as_bytes();
    if bytes.get(i) != Some(&b'=') {
        return false;
    }
    let next = bytes.get(i + 1).copied();
    let prev = i.checked_sub(1).map(|p| bytes[p]);
    !matches!(next, Some(b'=' | b'>')) && !matches!(prev, Some(b'=' | b'!' | b'<' | b'>'))
}

/// First top-level assignment `=`
pub fn find_top_level_assignment(text: &str) -> Option<usize> {
    CodeBytes::new(text, 0)
        .find(|(i, byte, depth)| {
            *byte == b'=' && depth.is_top_level() && is_assignment_at(text, *i)
        })
        .map(|(i, _, _)| i)
}

/// Depth marker for lines whose first byte is not code
const INSIDE_LITERAL: usize = usize::MAX;

/// File text split into lines with the brace depth at each line start
pub struct SourceText<'a> {
    text: &'a str,
    lines: Vec<&'a str>,
    line_starts: Vec<usize>,
    depth_at_line_start: Vec<usize>,
}

impl<'a> SourceText<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut lines = Vec::new();
        let mut line_starts = Vec::new();
        let mut offset = 0;
        for raw in text.split('\n') {
            line_starts.push(offset);
            lines.push(raw.strip_suffix('\r').unwrap_or(raw));
            offset += raw.len() + 1;
        }

        let depth_at_line_start = Self::brace_depths(text, &line_starts);
        Self {
            text,
            lines,
            line_starts,
            depth_at_line_start,
        }
    }

    /// Brace depth at each line start. Lines that start inside a comment or
    /// a multi-line literal get `INSIDE_LITERAL`.
    fn brace_depths(text: &str, line_starts: &[usize]) -> Vec<usize> {
        let mut depths = Vec::with_capacity(line_starts.len());
        let mut walker = CodeBytes::new(text, 0);
        while let Some((i, _, before)) = walker.next() {
            while depths.len() < line_starts.len() && line_starts[depths.len()] <= i {
                let depth = if line_starts[depths.len()] == i {
                    before.brace
                } else {
                    INSIDE_LITERAL
                };
                depths.push(depth);
            }
        }
        let tail = walker.depth().brace;
        depths.resize(line_starts.len(), tail);
        depths
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> &'a str {
        self.lines.get(index).copied().unwrap_or("")
    }

    /// Byte offset where `index` starts; one past the end for out-of-range lines
    pub fn line_start(&self, index: usize) -> usize {
        self.line_starts
            .get(index)
            .copied()
            .unwrap_or(self.text.len())
    }

    /// Line containing byte `offset`
    pub fn line_of_offset(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        }
    }

    /// Whether `index` starts outside every `{}` block
    pub fn is_top_level(&self, index: usize) -> bool {
        self.depth_at_line_start.get(index).copied() == Some(0)
    }
}
