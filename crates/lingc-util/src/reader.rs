//! Byte-at-a-time source reader with one-byte pushback.
//!
//! Mirrors the cursor style of a hand-rolled lexer's character source, but
//! trimmed to exactly the contract the lexer needs: `next_char`/`push_back`
//! plus a 1-based line counter. There is no snapshot/restore here — nothing
//! above this layer ever backtracks by more than the one byte it just read.

pub struct Reader {
    bytes: Vec<u8>,
    pos: usize,
    line: u32,
    pushback: Option<u8>,
}

impl Reader {
    pub fn new(source: &str) -> Self {
        Self {
            bytes: source.as_bytes().to_vec(),
            pos: 0,
            line: 1,
            pushback: None,
        }
    }

    /// Returns the next byte, or `None` at end of input.
    pub fn next_char(&mut self) -> Option<u8> {
        if let Some(b) = self.pushback.take() {
            if b == b'\n' {
                self.line += 1;
            }
            return Some(b);
        }

        if self.pos >= self.bytes.len() {
            return None;
        }

        let b = self.bytes[self.pos];
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
        }
        Some(b)
    }

    /// Pushes one byte back onto the reader. Only one byte of pushback is
    /// supported; pushing back a second byte without an intervening
    /// `next_char` is a caller bug.
    pub fn push_back(&mut self, byte: u8) {
        debug_assert!(self.pushback.is_none(), "pushback buffer already occupied");
        if byte == b'\n' {
            self.line -= 1;
        }
        self.pushback = Some(byte);
    }

    /// The 1-based line the next byte returned by `next_char` lives on.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Rewinds to the start of the source, resetting the line counter.
    /// Used by the driver between the lexical-display pass and the
    /// syntactic/semantic pass.
    pub fn rewind(&mut self) {
        self.pos = 0;
        self.line = 1;
        self.pushback = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_bytes_in_order() {
        let mut r = Reader::new("ab");
        assert_eq!(r.next_char(), Some(b'a'));
        assert_eq!(r.next_char(), Some(b'b'));
        assert_eq!(r.next_char(), None);
    }

    #[test]
    fn push_back_replays_the_same_byte() {
        let mut r = Reader::new("ab");
        let a = r.next_char().unwrap();
        r.push_back(a);
        assert_eq!(r.next_char(), Some(b'a'));
        assert_eq!(r.next_char(), Some(b'b'));
    }

    #[test]
    fn line_counter_increments_on_newline() {
        let mut r = Reader::new("a\nb");
        assert_eq!(r.line(), 1);
        r.next_char(); // a
        assert_eq!(r.line(), 1);
        r.next_char(); // \n
        assert_eq!(r.line(), 2);
        r.next_char(); // b
        assert_eq!(r.line(), 2);
    }

    #[test]
    fn pushing_back_a_newline_decrements_the_line_counter() {
        let mut r = Reader::new("a\nb");
        r.next_char(); // a
        let nl = r.next_char().unwrap(); // \n, line becomes 2
        assert_eq!(r.line(), 2);
        r.push_back(nl);
        assert_eq!(r.line(), 1);
        assert_eq!(r.next_char(), Some(b'\n'));
        assert_eq!(r.line(), 2);
    }

    #[test]
    fn rewind_resets_position_and_line() {
        let mut r = Reader::new("a\nb");
        r.next_char();
        r.next_char();
        r.rewind();
        assert_eq!(r.line(), 1);
        assert_eq!(r.next_char(), Some(b'a'));
    }
}
