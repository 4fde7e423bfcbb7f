use std::{env, path::PathBuf, process::ExitCode, time::Instant};

use turtle_lexer::{
    display_error, init_tracing,
    lexer::{lexer::Scanner, reader::DEFAULT_CHUNK_SIZE},
};

const USAGE: &str = "usage: turtle-lex <file> [chunk-size]";

/// Exit status for malformed command-line arguments.
const USAGE_ERROR: u8 = 2;

#[derive(Debug, PartialEq)]
struct Args {
    file_path: PathBuf,
    chunk_size: usize,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    if args.len() < 2 || args.len() > 3 {
        return Err(String::from(USAGE));
    }

    let chunk_size = match args.get(2).map(|arg| arg.parse::<usize>()) {
        None => DEFAULT_CHUNK_SIZE,
        Some(Ok(size)) if size > 0 => size,
        Some(_) => {
            return Err(format!("chunk-size must be a positive integer\n{}", USAGE));
        }
    };

    Ok(Args {
        file_path: PathBuf::from(&args[1]),
        chunk_size,
    })
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let Args {
        file_path,
        chunk_size,
    } = match parse_args(&args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(USAGE_ERROR);
        }
    };

    let start = Instant::now();

    let mut scanner = match Scanner::open(&file_path, chunk_size) {
        Ok(scanner) => scanner,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    let mut count = 0;

    loop {
        match scanner.scan() {
            Ok(token) => {
                println!("{}\t{}", scanner.token_line(), token);
                count += 1;

                if token.is_eof() {
                    break;
                }
            }
            Err(error) => {
                display_error(&error, &file_path);
                return ExitCode::FAILURE;
            }
        }
    }

    eprintln!("Tokenized {} tokens in {:?}", count, start.elapsed());
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{parse_args, Args, USAGE};
    use turtle_lexer::lexer::reader::DEFAULT_CHUNK_SIZE;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn test_parse_file_only() {
        assert_eq!(
            parse_args(&args(&["turtle-lex", "square.logo"])),
            Ok(Args {
                file_path: PathBuf::from("square.logo"),
                chunk_size: DEFAULT_CHUNK_SIZE,
            })
        );
    }

    #[test]
    fn test_parse_chunk_size() {
        let parsed = parse_args(&args(&["turtle-lex", "square.logo", "16"])).unwrap();
        assert_eq!(parsed.chunk_size, 16);
    }

    #[test]
    fn test_wrong_argument_count() {
        assert_eq!(parse_args(&args(&["turtle-lex"])), Err(String::from(USAGE)));
        assert_eq!(
            parse_args(&args(&["turtle-lex", "a.logo", "4", "extra"])),
            Err(String::from(USAGE))
        );
    }

    #[test]
    fn test_invalid_chunk_size() {
        for bad in ["0", "-3", "ten", ""] {
            let result = parse_args(&args(&["turtle-lex", "square.logo", bad]));
            assert!(result.is_err(), "chunk size {:?} accepted", bad);
        }
    }
}
