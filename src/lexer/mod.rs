use crate::diagnostics::Position;

pub mod lexer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerTokenKind {
    // `>`: Move the cursor one cell to the right
    MoveRight,
    // `<`: Move the cursor one cell to the left
    MoveLeft,

    // `+`: Increment the byte under the cursor by one
    Increment,
    // `-`: Decrement the byte under the cursor by one
    Decrement,

    // `.`: Write the byte under the cursor to the output
    Write,
    // `,`: Read the next byte from the input into the cell under the cursor
    Read,

    // `[`: Start of a loop that repeats while the cell under the cursor is non-zero
    LoopStart,
    // `]`: End of the innermost open loop
    LoopEnd,

    // Every other byte, grouped into runs. Holds the number of bytes in the run.
    Comment(usize),
}

impl LexerTokenKind {
    pub fn from_byte(byte: u8) -> Option<LexerTokenKind> {
        match byte {
            b'>' => Some(LexerTokenKind::MoveRight),
            b'<' => Some(LexerTokenKind::MoveLeft),
            b'+' => Some(LexerTokenKind::Increment),
            b'-' => Some(LexerTokenKind::Decrement),
            b'.' => Some(LexerTokenKind::Write),
            b',' => Some(LexerTokenKind::Read),
            b'[' => Some(LexerTokenKind::LoopStart),
            b']' => Some(LexerTokenKind::LoopEnd),
            _ => None,
        }
    }

    /// The source text of the token, comments are shown by their length
    pub fn symbol(&self) -> String {
        match self {
            LexerTokenKind::MoveRight => ">".to_owned(),
            LexerTokenKind::MoveLeft => "<".to_owned(),
            LexerTokenKind::Increment => "+".to_owned(),
            LexerTokenKind::Decrement => "-".to_owned(),
            LexerTokenKind::Write => ".".to_owned(),
            LexerTokenKind::Read => ",".to_owned(),
            LexerTokenKind::LoopStart => "[".to_owned(),
            LexerTokenKind::LoopEnd => "]".to_owned(),
            LexerTokenKind::Comment(len) => format!("#{}", len),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: LexerTokenKind,
    pub position: Position,
}
