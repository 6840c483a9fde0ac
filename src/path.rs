//! Offset-to-path resolution for JSON context documents.
//!
//! Maps a byte offset inside a JSON text buffer to the property-access
//! path (`users[0].name`, `settings['two words']`) that reaches the value
//! enclosing that offset. Used for click-to-copy paths in the context
//! editor, so the scan must tolerate documents that are mid-edit.

use regex::Regex;
use std::sync::OnceLock;

/// One structural step inside a JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Array element position.
    Index(usize),
    /// Object member key (unescaped).
    Key(String),
}

/// Resolve the accessor path for the value enclosing `offset`.
///
/// `offset` is a byte index into `document`. Returns `None` when no path
/// encloses the offset: the document is unparseable, the offset lands
/// outside every value, or the enclosing value is the document root.
/// Never panics, including on offsets past the end of the document or in
/// the middle of a multi-byte character.
#[must_use]
pub fn resolve_path(document: &str, offset: usize) -> Option<String> {
    let segments = locate(document.as_bytes(), offset)?;
    let rendered = render(&segments);
    if rendered.is_empty() {
        None
    } else {
        Some(rendered)
    }
}

/// Characters that force a segment into bracket-quoted form, since a bare
/// `.segment` accessor would not survive the expression parser.
fn needs_quoting(segment: &str) -> bool {
    static SPECIAL: OnceLock<Regex> = OnceLock::new();
    let re = SPECIAL
        .get_or_init(|| Regex::new(r"[`~!@#%^&*()|+\\\-=?;:'.,\s]").expect("valid segment regex"));
    re.is_match(segment)
}

/// Render segments into an accessor path, left to right.
fn render(segments: &[Segment]) -> String {
    let mut path = String::new();
    for (i, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Index(n) => {
                path.push_str(&format!("[{n}]"));
            }
            Segment::Key(key) if needs_quoting(key) => {
                path.push_str(&format!("['{key}']"));
            }
            Segment::Key(key) if i == 0 => path.push_str(key),
            Segment::Key(key) if key.is_empty() => {}
            Segment::Key(key) => {
                path.push('.');
                path.push_str(key);
            }
        }
    }
    path
}

/// Find the innermost segment chain whose value spans `target`.
fn locate(bytes: &[u8], target: usize) -> Option<Vec<Segment>> {
    let mut scanner = Scanner {
        bytes,
        pos: 0,
        target,
        found: None,
    };
    let mut path = Vec::new();
    scanner.value(&mut path);
    scanner.found
}

/// Best-effort JSON scanner tracking the structural path at each value.
///
/// Tolerates unterminated strings, missing commas and colons, and stray
/// bytes by resynchronizing rather than bailing out, so that a document
/// with the cursor mid-edit still resolves for the parts already intact.
struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    target: usize,
    found: Option<Vec<Segment>>,
}

impl Scanner<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Claim `path` for the span `[start, end)` if it encloses the target
    /// and no deeper value has claimed it already. Values are claimed in
    /// post-order, so the innermost enclosing value always wins.
    fn claim(&mut self, start: usize, end: usize, path: &[Segment]) {
        if self.found.is_none() && start <= self.target && self.target < end {
            self.found = Some(path.to_vec());
        }
    }

    fn value(&mut self, path: &mut Vec<Segment>) {
        self.skip_ws();
        let start = self.pos;
        match self.peek() {
            None => return,
            Some(b'{') => self.object(path),
            Some(b'[') => self.array(path),
            Some(b'"') => {
                self.string();
            }
            Some(_) => self.scalar(),
        }
        self.claim(start, self.pos, path);
    }

    /// Consume a bare scalar (number, true/false/null, or any stray run
    /// of non-delimiter bytes). Always advances at least one byte.
    fn scalar(&mut self) {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || matches!(b, b',' | b']' | b'}' | b':') {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            self.pos += 1;
        }
    }

    /// Consume a string literal and return its unescaped content.
    /// An unterminated string runs to the end of the document.
    fn string(&mut self) -> String {
        let mut out: Vec<u8> = Vec::new();
        self.pos += 1; // opening quote
        while let Some(b) = self.peek() {
            match b {
                b'"' => {
                    self.pos += 1;
                    break;
                }
                b'\\' => {
                    self.pos += 1;
                    match self.peek() {
                        Some(b'n') => out.push(b'\n'),
                        Some(b't') => out.push(b'\t'),
                        Some(b'r') => out.push(b'\r'),
                        Some(b'b') => out.push(0x08),
                        Some(b'f') => out.push(0x0c),
                        Some(b'u') => {
                            self.pos += 1;
                            self.unicode_escape(&mut out);
                            continue;
                        }
                        Some(other) => out.push(other),
                        None => break,
                    }
                    self.pos += 1;
                }
                _ => {
                    out.push(b);
                    self.pos += 1;
                }
            }
        }
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Decode the four hex digits of a `\uXXXX` escape, if present.
    fn unicode_escape(&mut self, out: &mut Vec<u8>) {
        let end = (self.pos + 4).min(self.bytes.len());
        let digits = &self.bytes[self.pos..end];
        if digits.len() == 4 && digits.iter().all(u8::is_ascii_hexdigit) {
            let code = u32::from_str_radix(&String::from_utf8_lossy(digits), 16).unwrap_or(0);
            if let Some(c) = char::from_u32(code) {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            self.pos = end;
        }
    }

    fn object(&mut self, path: &mut Vec<Segment>) {
        self.pos += 1; // '{'
        loop {
            self.skip_ws();
            match self.peek() {
                None => return,
                Some(b'}') => {
                    self.pos += 1;
                    return;
                }
                Some(b',') => self.pos += 1,
                Some(b'"') => {
                    let key_start = self.pos;
                    let key = self.string();
                    self.claim_key(key_start, self.pos, path, &key);

                    self.skip_ws();
                    if self.peek() == Some(b':') {
                        self.pos += 1;
                    }
                    self.skip_ws();
                    match self.peek() {
                        None | Some(b'}') | Some(b',') => {} // member value missing
                        Some(_) => {
                            path.push(Segment::Key(key));
                            self.value(path);
                            path.pop();
                        }
                    }
                }
                Some(_) => self.pos += 1, // resync on stray byte
            }
        }
    }

    /// An offset on a member key resolves to that member's path.
    fn claim_key(&mut self, start: usize, end: usize, path: &[Segment], key: &str) {
        if self.found.is_none() && start <= self.target && self.target < end {
            let mut claimed = path.to_vec();
            claimed.push(Segment::Key(key.to_string()));
            self.found = Some(claimed);
        }
    }

    fn array(&mut self, path: &mut Vec<Segment>) {
        self.pos += 1; // '['
        let mut index = 0;
        loop {
            self.skip_ws();
            match self.peek() {
                None => return,
                Some(b']') => {
                    self.pos += 1;
                    return;
                }
                Some(b',') => {
                    self.pos += 1;
                    index += 1;
                }
                Some(_) => {
                    path.push(Segment::Index(index));
                    self.value(path);
                    path.pop();
                }
            }
        }
    }
}
