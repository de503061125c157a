use crate::internal::token::{Token, Type, lookup_identifier};

const EOF_CHAR: char = '\0';

pub struct Lexer {
    source_code: Vec<char>,
    position: usize,
    read_position: usize,
    char: char,
}

impl Lexer {
    pub fn new(input: String) -> Lexer {
        let mut lexer = Lexer {
            source_code: input.chars().collect(),
            position: 0,
            read_position: 0,
            char: EOF_CHAR,
        };
        lexer.read_char();
        lexer
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let token = match self.char {
            EOF_CHAR => return Token::new(Type::EOF, ""),
            '(' => Token::new(Type::LPAREN, "("),
            ')' => Token::new(Type::RPAREN, ")"),
            c if is_letter(c) => {
                let identifier = self.read_while(is_letter);
                return Token::new(lookup_identifier(&identifier), identifier);
            }
            c if is_digit(c) => return Token::new(Type::INT, self.read_while(is_digit)),
            c => Token::new(Type::ILLEGAL, c.to_string()),
        };
        self.read_char();
        token
    }

    fn read_while(&mut self, accept: fn(char) -> bool) -> String {
        let start = self.position;
        while accept(self.char) {
            self.read_char();
        }
        self.source_code[start..self.position].iter().collect()
    }

    fn skip_whitespace(&mut self) {
        while is_whitespace(self.char) {
            self.read_char();
        }
    }

    fn read_char(&mut self) {
        // A literal NUL in the source reads as end of input.
        self.char = self
            .source_code
            .get(self.read_position)
            .copied()
            .unwrap_or(EOF_CHAR);
        self.position = self.read_position;
        if self.read_position < self.source_code.len() {
            self.read_position += 1;
        }
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}
