use std::{collections::VecDeque, io::Read, mem, rc::Rc};

use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

pub const DEFAULT_CHUNK_SIZE: usize = 1014;

const MAX_CHUNK_CAPACITY: usize = 8192;

/// Double-buffered character source.
///
/// Storage is read in fixed-size chunks: `current` is being consumed while
/// `next` is already staged. `line` is always the line of the character the
/// next successful read returns.
pub struct SourceReader<R: Read> {
    inner: R,
    file: Rc<String>,
    chunk_size: usize,
    position: usize,
    current: VecDeque<char>,
    next: VecDeque<char>,
    line: u32,
}

impl<R: Read> SourceReader<R> {
    pub fn new(inner: R, file: Rc<String>, chunk_size: usize) -> Result<Self, Error> {
        let mut reader = SourceReader {
            inner,
            file,
            chunk_size: chunk_size.max(1),
            position: 0,
            current: VecDeque::new(),
            next: VecDeque::new(),
            line: 1,
        };

        reader.current = reader.read_chunk()?;
        reader.next = reader.read_chunk()?;

        Ok(reader)
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Storage offset of the chunk that will be staged next.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn file(&self) -> &Rc<String> {
        &self.file
    }

    pub fn next_character(&mut self) -> Result<Option<char>, Error> {
        if self.current.is_empty() && !self.next.is_empty() {
            self.current = mem::take(&mut self.next);
            self.next = self.read_chunk()?;
        }

        let character = self.current.pop_front();

        if character == Some('\n') {
            self.line += 1;
        }

        Ok(character)
    }

    /// Exact inverse of one `next_character` call.
    pub fn push_back(&mut self, character: char) {
        if character == '\n' {
            self.line -= 1;
        }

        self.current.push_front(character);
    }

    fn read_chunk(&mut self) -> Result<VecDeque<char>, Error> {
        // The chunk size is an upper bound only; capacity stays capped.
        let mut bytes = Vec::with_capacity(self.chunk_size.min(MAX_CHUNK_CAPACITY));
        let result = (&mut self.inner)
            .take(self.chunk_size as u64)
            .read_to_end(&mut bytes);
        result.map_err(|err| self.read_error(err.to_string()))?;

        self.position = self.position.saturating_add(self.chunk_size);

        // A chunk must never end halfway through a character.
        loop {
            match std::str::from_utf8(&bytes) {
                Ok(_) => break,
                Err(err) if err.error_len().is_none() => {
                    let mut byte = [0u8; 1];
                    let read = self
                        .inner
                        .read(&mut byte)
                        .map_err(|err| self.read_error(err.to_string()))?;

                    if read == 0 {
                        return Err(self.read_error(String::from(
                            "stream ended inside a UTF-8 sequence",
                        )));
                    }

                    bytes.push(byte[0]);
                    self.position = self.position.saturating_add(1);
                }
                Err(err) => return Err(self.read_error(err.to_string())),
            }
        }

        let text = String::from_utf8(bytes).map_err(|err| self.read_error(err.to_string()))?;

        debug!(
            file = %self.file,
            position = self.position,
            bytes = text.len(),
            "staged source chunk"
        );

        Ok(text.chars().collect())
    }

    fn read_error(&self, reason: String) -> Error {
        Error::new(
            ErrorImpl::SourceRead { reason },
            Position(self.line, Rc::clone(&self.file)),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::SourceReader;

    fn reader(source: &str, chunk_size: usize) -> SourceReader<&[u8]> {
        SourceReader::new(source.as_bytes(), Rc::new(String::from("test.logo")), chunk_size)
            .unwrap()
    }

    #[test]
    fn test_reads_across_chunks() {
        let mut reader = reader("FD 100\nRT 90", 3);
        let mut read = String::new();

        while let Some(c) = reader.next_character().unwrap() {
            read.push(c);
        }

        assert_eq!(read, "FD 100\nRT 90");
        assert_eq!(reader.line(), 2);
    }

    #[test]
    fn test_end_marker_is_repeatable() {
        let mut reader = reader("a", 4);

        assert_eq!(reader.next_character().unwrap(), Some('a'));
        assert_eq!(reader.next_character().unwrap(), None);
        assert_eq!(reader.next_character().unwrap(), None);
    }

    #[test]
    fn test_push_back_restores_line() {
        let mut reader = reader("a\nb", 2);

        assert_eq!(reader.next_character().unwrap(), Some('a'));
        assert_eq!(reader.next_character().unwrap(), Some('\n'));
        assert_eq!(reader.line(), 2);

        reader.push_back('\n');
        assert_eq!(reader.line(), 1);

        assert_eq!(reader.next_character().unwrap(), Some('\n'));
        assert_eq!(reader.line(), 2);
        assert_eq!(reader.next_character().unwrap(), Some('b'));
    }

    #[test]
    fn test_push_back_into_empty_chunk() {
        let mut reader = reader("ab", 1);

        assert_eq!(reader.next_character().unwrap(), Some('a'));
        reader.push_back('a');
        assert_eq!(reader.next_character().unwrap(), Some('a'));
        assert_eq!(reader.next_character().unwrap(), Some('b'));
        assert_eq!(reader.next_character().unwrap(), None);
    }

    #[test]
    fn test_multibyte_character_on_chunk_boundary() {
        let mut reader = reader("aé€b", 2);
        let mut read = String::new();

        while let Some(c) = reader.next_character().unwrap() {
            read.push(c);
        }

        assert_eq!(read, "aé€b");
    }

    #[test]
    fn test_position_advances_by_chunk_size() {
        let mut reader = reader("abcdefgh", 3);
        assert_eq!(reader.position(), 6);

        for _ in 0..4 {
            reader.next_character().unwrap();
        }

        assert_eq!(reader.position(), 9);
    }

    #[test]
    fn test_huge_chunk_size_reads_small_source() {
        for chunk_size in [1usize << 44, usize::MAX] {
            let mut reader = reader("fd 10", chunk_size);
            let mut read = String::new();

            while let Some(c) = reader.next_character().unwrap() {
                read.push(c);
            }

            assert_eq!(read, "fd 10");
            assert_eq!(reader.position(), chunk_size.saturating_mul(2));
        }
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let bytes: &[u8] = &[b'a', 0xff, b'b'];
        let result = SourceReader::new(bytes, Rc::new(String::from("bad.logo")), 8);

        match result {
            Err(error) => assert_eq!(error.get_error_name(), "SourceRead"),
            Ok(_) => panic!("Expected a read error"),
        }
    }
}
