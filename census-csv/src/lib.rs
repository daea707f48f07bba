#![warn(clippy::all, rust_2018_idioms)]

//! A small parser for delimited tables with a header line, as used for the
//! per-region census extracts.
//!
//! Cells are classified while lexing: anything that parses as a finite
//! float is a [`Cell::Number`], blank cells are [`Cell::Empty`], the rest
//! is [`Cell::Text`]. Rows whose width does not match the header are
//! skipped with a warning, they are never padded.

use std::path::Path;

const CANDIDATE_DELIMITERS: [char; 3] = [',', ';', '\t'];

struct Lexer {
    // Holds the raw data from reading the table file.
    raw_input: String,
    delimiter: char,
    cur_state: State,
}

#[derive(PartialEq, Copy, Clone, Debug)]
enum State {
    StartOfField,
    InField,
    InQuoted,
    // A quote inside a quoted field: either the field ends here or the
    // next char is a second quote (an escaped one).
    QuoteInQuoted,
    InComment,
}

#[derive(Debug, PartialEq, Clone)]
enum Token {
    Field(String),
    Newline(usize),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(num) if num.is_finite() => Cell::Number(num),
            _ => Cell::Text(trimmed.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(num) => Some(*num),
            _ => None,
        }
    }

    /// The cell as text. Numbers are printed back, empty cells give "".
    pub fn text(&self) -> String {
        match self {
            Cell::Number(num) => num.to_string(),
            Cell::Text(text) => text.clone(),
            Cell::Empty => String::new(),
        }
    }
}

impl Lexer {
    fn from_path(path: &Path) -> Result<Self, std::io::Error> {
        let raw_input = std::fs::read_to_string(path)?;
        Ok(Lexer::from_string(raw_input))
    }

    fn from_string(raw_input: String) -> Self {
        // Carriage returns and other control characters are dropped, tabs
        // and newlines carry meaning.
        let raw_input: String = raw_input
            .chars()
            .filter(|chr| !chr.is_control() || *chr == '\t' || *chr == '\n')
            .collect();
        let delimiter = detect_delimiter(&raw_input);
        Self {
            raw_input,
            delimiter,
            cur_state: State::StartOfField,
        }
    }

    fn walk_file(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let delimiter = self.delimiter;

        for (line_no, line) in self.raw_input.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            self.cur_state = State::StartOfField;
            let mut field = String::new();
            let mut line_tokens = Vec::new();

            for chr in line.chars() {
                match self.cur_state {
                    State::StartOfField => match chr {
                        '#' if line_tokens.is_empty() => self.cur_state = State::InComment,
                        '"' => self.cur_state = State::InQuoted,
                        c if c == delimiter => {
                            line_tokens.push(Token::Field(std::mem::take(&mut field)));
                        }
                        c => {
                            field.push(c);
                            self.cur_state = State::InField;
                        }
                    },

                    State::InField => match chr {
                        c if c == delimiter => {
                            line_tokens.push(Token::Field(std::mem::take(&mut field)));
                            self.cur_state = State::StartOfField;
                        }
                        c => field.push(c),
                    },

                    State::InQuoted => match chr {
                        '"' => self.cur_state = State::QuoteInQuoted,
                        c => field.push(c),
                    },

                    State::QuoteInQuoted => match chr {
                        '"' => {
                            field.push('"');
                            self.cur_state = State::InQuoted;
                        }
                        c if c == delimiter => {
                            line_tokens.push(Token::Field(std::mem::take(&mut field)));
                            self.cur_state = State::StartOfField;
                        }
                        // Text after a closing quote is kept, as spreadsheet
                        // exports sometimes produce `"a"b`.
                        c => {
                            field.push(c);
                            self.cur_state = State::InField;
                        }
                    },

                    // The rest of the line belongs to the comment.
                    State::InComment => (),
                }
            }

            match self.cur_state {
                State::InComment => continue,
                State::InQuoted => {
                    log::warn!(
                        "unterminated quote in line {}, taking field up to the line end",
                        line_no + 1
                    );
                }
                State::StartOfField | State::InField | State::QuoteInQuoted => (),
            }
            line_tokens.push(Token::Field(field));
            tokens.extend(line_tokens);
            tokens.push(Token::Newline(line_no + 1));
        }
        tokens
    }
}

/// Pick the candidate delimiter occurring most often in the first
/// non-empty line, ignoring quoted sections. Defaults to a comma.
fn detect_delimiter(raw_input: &str) -> char {
    let Some(header) = raw_input.lines().find(|line| !line.trim().is_empty()) else {
        return ',';
    };
    let mut counts = [0usize; CANDIDATE_DELIMITERS.len()];
    let mut in_quotes = false;
    for chr in header.chars() {
        if chr == '"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        if let Some(idx) = CANDIDATE_DELIMITERS.iter().position(|d| *d == chr) {
            counts[idx] += 1;
        }
    }
    let (idx, count) = counts
        .iter()
        .enumerate()
        .max_by_key(|(_, count)| **count)
        .unwrap_or((0, &0));
    if *count == 0 {
        ','
    } else {
        CANDIDATE_DELIMITERS[idx]
    }
}

pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    pub fn from_path(path: &Path) -> Result<Self, std::io::Error> {
        Ok(Self {
            lexer: Lexer::from_path(path)?,
        })
    }

    pub fn from_string(raw_input: String) -> Self {
        Self {
            lexer: Lexer::from_string(raw_input),
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.lexer.delimiter = delimiter;
        self
    }

    pub fn delimiter(&self) -> char {
        self.lexer.delimiter
    }

    /// Parse the input into a [`Table`]. The first non-comment line is the
    /// header. Fails if there is no header line.
    pub fn parse_table(mut self) -> Result<Table, String> {
        let tokens = self.lexer.walk_file();
        let mut lines: Vec<(usize, Vec<String>)> = Vec::new();
        let mut current = Vec::new();
        for token in tokens {
            match token {
                Token::Field(field) => current.push(field),
                Token::Newline(line_no) => lines.push((line_no, std::mem::take(&mut current))),
            }
        }

        let mut lines = lines.into_iter();
        let Some((_, header)) = lines.next() else {
            return Err("table has no header line".to_string());
        };
        let headers: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();
        log::debug!("table headers: {:?}", headers);

        let mut rows = Vec::new();
        for (line_no, fields) in lines {
            if fields.len() != headers.len() {
                log::warn!(
                    "line {} has {} fields, expected {}, skipping line",
                    line_no,
                    fields.len(),
                    headers.len()
                );
                continue;
            }
            rows.push(Row {
                line_no,
                cells: fields.iter().map(|f| Cell::classify(f)).collect(),
            });
        }
        log::debug!("parsed {} rows", rows.len());

        Ok(Table { headers, rows })
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Debug, Clone)]
pub struct Row {
    /// Line number in the source, starting at 1.
    pub line_no: usize,
    cells: Vec<Cell>,
}

impl Row {
    pub fn get(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }
}

impl Table {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Index of the column named `name`, compared case-insensitively.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_lex_fields_single_line() {
        init();
        let mut lexer = Lexer::from_string("state,abbr,age\n".into());

        let tokens = lexer.walk_file();
        assert_eq!(tokens[0], Token::Field("state".into()));
        assert_eq!(tokens[2], Token::Field("age".into()));
        assert_eq!(tokens[3], Token::Newline(1));
    }

    #[test]
    fn test_lex_quoted_field_with_delimiter() {
        init();
        let mut lexer = Lexer::from_string("\"Washington, D.C.\",DC,\"say \"\"hi\"\"\"".into());

        let tokens = lexer.walk_file();
        log::debug!("tokens: {:?}", &tokens);
        assert_eq!(tokens[0], Token::Field("Washington, D.C.".into()));
        assert_eq!(tokens[1], Token::Field("DC".into()));
        assert_eq!(tokens[2], Token::Field("say \"hi\"".into()));
    }

    #[test]
    fn test_lex_trailing_empty_field() {
        init();
        let mut lexer = Lexer::from_string("1,2,\n".into());

        let tokens = lexer.walk_file();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[2], Token::Field(String::new()));
    }

    #[test]
    fn test_lex_skips_comments_and_blank_lines() {
        init();
        let mut lexer = Lexer::from_string("# exported\n\na,b\r\n1,2\n".into());

        let tokens = lexer.walk_file();
        log::debug!("tokens: {:?}", &tokens);
        assert_eq!(
            tokens,
            vec![
                Token::Field("a".into()),
                Token::Field("b".into()),
                Token::Newline(3),
                Token::Field("1".into()),
                Token::Field("2".into()),
                Token::Newline(4),
            ]
        );
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
        assert_eq!(detect_delimiter("a\tb\tc"), '\t');
        assert_eq!(detect_delimiter("\"x;y\",b,c"), ',');
        assert_eq!(detect_delimiter("single"), ',');
        assert_eq!(detect_delimiter(""), ',');
    }

    #[test]
    fn test_classify_cells() {
        assert_eq!(Cell::classify(" 38.6 "), Cell::Number(38.6));
        assert_eq!(Cell::classify("-2e3"), Cell::Number(-2000.0));
        assert_eq!(Cell::classify("Alabama"), Cell::Text("Alabama".into()));
        assert_eq!(Cell::classify("   "), Cell::Empty);
        // Non-finite spellings are not numbers.
        assert_eq!(Cell::classify("NaN"), Cell::Text("NaN".into()));
        assert_eq!(Cell::classify("inf"), Cell::Text("inf".into()));
    }

    #[test]
    fn test_parse_table() {
        init();
        let raw = "id,state,abbr,age\n1,Alabama,AL,38.6\n2,Alaska,AK,33.3\n";
        let table = Parser::from_string(raw.into()).parse_table().unwrap();

        assert_eq!(table.headers(), &["id", "state", "abbr", "age"]);
        assert_eq!(table.len(), 2);
        let age = table.column_index("AGE").unwrap();
        let ages: Vec<_> = table
            .rows()
            .map(|row| row.get(age).and_then(Cell::as_f64))
            .collect();
        assert_eq!(ages, vec![Some(38.6), Some(33.3)]);
        let abbr = table.column_index("abbr").unwrap();
        assert_eq!(table.rows().next().unwrap().get(abbr).unwrap().text(), "AL");
    }

    #[test]
    fn test_parse_table_skips_ragged_rows() {
        init();
        let raw = "state;age\nAlabama;38.6\nAlaska\nArizona;36.9";
        let table = Parser::from_string(raw.into()).parse_table().unwrap();

        assert_eq!(table.len(), 2);
        let line_numbers: Vec<_> = table.rows().map(|row| row.line_no).collect();
        assert_eq!(line_numbers, vec![2, 4]);
    }

    #[test]
    fn test_parse_table_without_header_fails() {
        init();
        assert!(Parser::from_string("# nothing here\n\n".into())
            .parse_table()
            .is_err());
    }

    #[test]
    fn test_explicit_delimiter_overrides_detection() {
        init();
        let parser = Parser::from_string("a,b;c\n1,2;3".into()).with_delimiter(';');
        assert_eq!(parser.delimiter(), ';');
        let table = parser.parse_table().unwrap();
        assert_eq!(table.headers(), &["a,b", "c"]);
    }
}
