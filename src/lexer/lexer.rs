use std::{
    fs::File,
    io::{self, Read},
    path::Path,
    rc::Rc,
};

use tracing::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::{
    keywords::KeywordTable,
    reader::{SourceReader, DEFAULT_CHUNK_SIZE},
    tokens::{Tag, Token, TokenValue},
};

/// Starts a line comment that runs to the end of the line.
const COMMENT: char = '%';

/// Pull-based scanner producing one token per `scan` call.
///
/// Owns its reader and keyword table; run one instance per source.
pub struct Scanner<R: Read> {
    reader: SourceReader<R>,
    words: KeywordTable,
    token_line: u32,
}

impl Scanner<File> {
    pub fn open(path: impl AsRef<Path>, chunk_size: usize) -> Result<Self, Error> {
        let path = path.as_ref();
        let file_name = Rc::new(path.to_string_lossy().into_owned());

        let file = File::open(path).map_err(|err| {
            Error::new(
                ErrorImpl::SourceRead {
                    reason: err.to_string(),
                },
                Position(1, Rc::clone(&file_name)),
            )
        })?;

        Scanner::new(file, file_name, chunk_size)
    }

    pub fn open_default(path: impl AsRef<Path>) -> Result<Self, Error> {
        Scanner::open(path, DEFAULT_CHUNK_SIZE)
    }
}

impl Scanner<io::Cursor<Vec<u8>>> {
    pub fn from_source(source: impl Into<String>, file: Option<String>) -> Result<Self, Error> {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        let bytes = source.into().into_bytes();
        Scanner::new(io::Cursor::new(bytes), file_name, DEFAULT_CHUNK_SIZE)
    }
}

impl<R: Read> Scanner<R> {
    pub fn new(inner: R, file: Rc<String>, chunk_size: usize) -> Result<Self, Error> {
        Ok(Scanner {
            reader: SourceReader::new(inner, file, chunk_size)?,
            words: KeywordTable::new(),
            token_line: 1,
        })
    }

    /// Line of the next unread character.
    pub fn line(&self) -> u32 {
        self.reader.line()
    }

    /// Line on which the most recently scanned token starts.
    pub fn token_line(&self) -> u32 {
        self.token_line
    }

    pub fn file(&self) -> &Rc<String> {
        self.reader.file()
    }

    pub fn keywords(&self) -> &KeywordTable {
        &self.words
    }

    pub fn scan(&mut self) -> Result<Token, Error> {
        let token = self.scan_token()?;
        trace!(line = self.token_line, token = %token, "scanned token");
        Ok(token)
    }

    fn scan_token(&mut self) -> Result<Token, Error> {
        loop {
            self.token_line = self.reader.line();

            let character = match self.reader.next_character()? {
                Some(c) => c,
                None => return Ok(MK_TOKEN!(Tag::Eof)),
            };

            if character.is_whitespace() {
                continue;
            }

            if character == COMMENT {
                self.skip_comment()?;
                continue;
            }

            return match character {
                '<' => self.scan_less(),
                '>' => self.either('=', Tag::Geq, '>'),
                ':' => self.either('=', Tag::Assign, ':'),
                '#' => self.scan_boolean(),
                '"' => self.scan_string(),
                c if c.is_ascii_digit() => self.scan_number(c),
                c if c.is_alphabetic() => self.scan_word(c),
                c => Ok(MK_TOKEN!(Tag::Char(c))),
            };
        }
    }

    /// A comment running into end of input ends the input; the next read
    /// yields the end marker.
    fn skip_comment(&mut self) -> Result<(), Error> {
        while let Some(c) = self.reader.next_character()? {
            if c == '\n' {
                break;
            }
        }

        Ok(())
    }

    fn lookahead(&mut self) -> Result<Option<char>, Error> {
        self.reader.next_character()
    }

    fn unread(&mut self, character: Option<char>) {
        if let Some(c) = character {
            self.reader.push_back(c);
        }
    }

    fn scan_less(&mut self) -> Result<Token, Error> {
        match self.lookahead()? {
            Some('=') => Ok(MK_TOKEN!(Tag::Leq)),
            Some('>') => Ok(MK_TOKEN!(Tag::Neq)),
            other => {
                self.unread(other);
                Ok(MK_TOKEN!(Tag::Char('<')))
            }
        }
    }

    /// `fallback` followed by `expected` forms `tag`; otherwise the
    /// lookahead goes back and `fallback` stands alone.
    fn either(&mut self, expected: char, tag: Tag, fallback: char) -> Result<Token, Error> {
        let next = self.lookahead()?;

        if next == Some(expected) {
            return Ok(MK_TOKEN!(tag));
        }

        self.unread(next);
        Ok(MK_TOKEN!(Tag::Char(fallback)))
    }

    fn scan_boolean(&mut self) -> Result<Token, Error> {
        let next = self.lookahead()?;

        match next.map(|c| c.to_ascii_uppercase()) {
            Some('T') => Ok(MK_TOKEN!(Tag::True, TokenValue::Text(String::from("#T")))),
            Some('F') => Ok(MK_TOKEN!(Tag::False, TokenValue::Text(String::from("#F")))),
            _ => {
                self.unread(next);
                Ok(MK_TOKEN!(Tag::Char('#')))
            }
        }
    }

    fn scan_string(&mut self) -> Result<Token, Error> {
        let start = self.token_line;
        let mut text = String::from('"');

        loop {
            match self.reader.next_character()? {
                Some('"') => break,
                Some(c) => text.push(c),
                None => {
                    return Err(Error::new(
                        ErrorImpl::UnterminatedString { text },
                        Position(start, Rc::clone(self.file())),
                    ))
                }
            }
        }

        text.push('"');
        Ok(MK_TOKEN!(Tag::String, TokenValue::Text(text)))
    }

    fn scan_number(&mut self, first: char) -> Result<Token, Error> {
        let mut lexeme = String::from(first);

        let mut next = self.lookahead()?;
        while let Some(c) = next.filter(char::is_ascii_digit) {
            lexeme.push(c);
            next = self.lookahead()?;
        }

        if next == Some('.') {
            lexeme.push('.');
            next = self.lookahead()?;

            if !next.is_some_and(|c| c.is_ascii_digit()) {
                self.unread(next);
                return Err(self.malformed_number(lexeme, next));
            }

            while let Some(c) = next.filter(char::is_ascii_digit) {
                lexeme.push(c);
                next = self.lookahead()?;
            }
        }

        self.unread(next);

        // Parsing the whole lexeme rounds once, so long fractions stay exact.
        let value = match lexeme.parse::<f64>() {
            Ok(value) => value,
            Err(_) => return Err(self.malformed_number(lexeme, next)),
        };

        Ok(MK_TOKEN!(Tag::Number, TokenValue::Number(value)))
    }

    fn malformed_number(&self, lexeme: String, found: Option<char>) -> Error {
        Error::new(
            ErrorImpl::MalformedNumber { lexeme, found },
            Position(self.line(), Rc::clone(self.file())),
        )
    }

    fn scan_word(&mut self, first: char) -> Result<Token, Error> {
        let mut spelling: String = first.to_uppercase().collect();

        let mut next = self.lookahead()?;
        while let Some(c) = next.filter(|c| c.is_alphanumeric()) {
            spelling.extend(c.to_uppercase());
            next = self.lookahead()?;
        }

        self.unread(next);
        Ok(self.words.lookup_or_intern(spelling))
    }
}

/// Scans `source` to completion. The returned tokens end with exactly one
/// end-of-input token.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut scanner = Scanner::from_source(source, file)?;
    let mut tokens = vec![];

    loop {
        let token = scanner.scan()?;
        let done = token.is_eof();
        tokens.push(token);

        if done {
            return Ok(tokens);
        }
    }
}
