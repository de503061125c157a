use std::mem;

use crate::internal::Program;
use crate::internal::error::MealplanError;
use crate::internal::lexer::Lexer;
use crate::internal::statement::{Kind, Statement};
use crate::internal::token::{Token, Type, Weekday};

const MAX_DEPTH: usize = 256;

pub struct Parser {
    lexer: Lexer,
    cur_token: Token,
    peek_token: Token,
    depth: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Parser {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();
        Parser {
            lexer,
            cur_token,
            peek_token,
            depth: 0,
        }
    }

    pub fn parse(&mut self) -> Result<Program, MealplanError> {
        let mut program = Program::default();
        while !self.cur_token_is(Type::EOF) {
            if let Some(statement) = self.parse_statement()? {
                program.statements.push(statement);
            }
            self.next_token();
        }
        Ok(program)
    }

    fn next_token(&mut self) {
        self.cur_token = mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    fn cur_token_is(&self, token_type: Type) -> bool {
        self.cur_token.token_type == token_type
    }

    fn peek_token_is(&self, token_type: Type) -> bool {
        self.peek_token.token_type == token_type
    }

    fn expect_peek(&mut self, token_type: Type) -> Result<(), MealplanError> {
        if !self.peek_token_is(token_type) {
            return Err(MealplanError::UnexpectedToken {
                expected: token_type,
                found: self.peek_token.clone(),
            });
        }
        self.next_token();
        Ok(())
    }

    /// Parses the statement starting at the current token. Tokens that
    /// start no statement yield `None`: skipped at the top level, rejected
    /// inside a block.
    fn parse_statement(&mut self) -> Result<Option<Statement>, MealplanError> {
        let statement = match self.cur_token.token_type {
            Type::WEEKDAY => self.parse_weekday_statement()?,
            Type::IDENT if self.peek_token_is(Type::LPAREN) => self.parse_recipe_statement()?,
            Type::IDENT if self.peek_token_is(Type::INT) => self.parse_ingredient_statement()?,
            Type::IDENT => self.parse_meal_statement(),
            _ => return Ok(None),
        };
        Ok(Some(statement))
    }

    fn parse_meal_statement(&self) -> Statement {
        Statement::Meal {
            token: self.cur_token.clone(),
        }
    }

    fn parse_weekday_statement(&mut self) -> Result<Statement, MealplanError> {
        let token = self.cur_token.clone();
        let day = token
            .literal
            .parse::<Weekday>()
            .map_err(|_| MealplanError::UnexpectedToken {
                expected: Type::WEEKDAY,
                found: token.clone(),
            })?;
        let meals = self.parse_block(&token, Kind::Meal)?;
        Ok(Statement::Weekday { token, day, meals })
    }

    fn parse_recipe_statement(&mut self) -> Result<Statement, MealplanError> {
        let token = self.cur_token.clone();
        let ingredients = self.parse_block(&token, Kind::Ingredient)?;
        Ok(Statement::Recipe { token, ingredients })
    }

    fn parse_ingredient_statement(&mut self) -> Result<Statement, MealplanError> {
        let token = self.cur_token.clone();
        self.next_token();
        let amount = self
            .cur_token
            .literal
            .parse::<u64>()
            .map_err(|source| MealplanError::InvalidAmount {
                ingredient: token.literal.clone(),
                literal: self.cur_token.literal.clone(),
                source,
            })?;
        // The unit is optional; anything other than a word is left for the
        // enclosing block.
        let mut unit = String::new();
        if self.peek_token_is(Type::UNIT) || self.peek_token_is(Type::IDENT) {
            self.next_token();
            unit = self.cur_token.literal.clone();
        }
        Ok(Statement::Ingredient {
            token,
            amount,
            unit,
        })
    }

    /// Parses `( Statement* )` after the block's name token, leaving the
    /// closing paren as the current token. Every statement in the body must
    /// be of the `expected` kind.
    fn parse_block(&mut self, owner: &Token, expected: Kind) -> Result<Vec<Statement>, MealplanError> {
        if self.depth >= MAX_DEPTH {
            return Err(MealplanError::NestingTooDeep(owner.literal.clone()));
        }
        self.expect_peek(Type::LPAREN)?;
        self.depth += 1;
        let body = self.parse_block_body(owner, expected);
        self.depth -= 1;
        body
    }

    fn parse_block_body(&mut self, owner: &Token, expected: Kind) -> Result<Vec<Statement>, MealplanError> {
        let mut body = Vec::new();
        while !self.peek_token_is(Type::RPAREN) {
            if self.peek_token_is(Type::EOF) {
                return Err(MealplanError::UnterminatedBlock(owner.literal.clone()));
            }
            self.next_token();
            let Some(statement) = self.parse_statement()? else {
                return Err(MealplanError::StrayToken {
                    block: owner.literal.clone(),
                    found: self.cur_token.clone(),
                });
            };
            if statement.kind() != expected {
                return Err(MealplanError::UnexpectedStatement {
                    container: owner.literal.clone(),
                    expected,
                    found: statement.kind(),
                    literal: statement.token_literal().to_string(),
                });
            }
            body.push(statement);
        }
        self.next_token();
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> Result<Program, MealplanError> {
        Parser::new(Lexer::new(input.to_string())).parse()
    }

    fn meal(name: &str) -> Statement {
        Statement::Meal {
            token: Token::new(Type::IDENT, name),
        }
    }

    fn ingredient(name: &str, amount: u64, unit: &str) -> Statement {
        Statement::Ingredient {
            token: Token::new(Type::IDENT, name),
            amount,
            unit: unit.to_string(),
        }
    }

    #[test]
    fn parses_weekdays_and_recipes() {
        let program = parse(
            "monday(eggs toast)\n\
             eggs(eggs 2u butter 10 g)\n",
        )
        .unwrap();
        assert_eq!(
            program.statements,
            vec![
                Statement::Weekday {
                    token: Token::new(Type::WEEKDAY, "monday"),
                    day: Weekday::Monday,
                    meals: vec![meal("eggs"), meal("toast")],
                },
                Statement::Recipe {
                    token: Token::new(Type::IDENT, "eggs"),
                    ingredients: vec![ingredient("eggs", 2, "u"), ingredient("butter", 10, "g")],
                },
            ]
        );
        assert_eq!(program.token_literal(), "monday");
        assert_eq!(program.to_string(), "monday(eggs toast)\neggs(eggs 2u butter 10g)\n");
    }

    #[test]
    fn identifier_lookahead_picks_the_statement() {
        let program = parse("soup salt 1 pinch stew()").unwrap();
        let kinds: Vec<Kind> = program.statements.iter().map(Statement::kind).collect();
        assert_eq!(kinds, vec![Kind::Meal, Kind::Ingredient, Kind::Recipe]);
        assert_eq!(program.statements[1], ingredient("salt", 1, "pinch"));
    }

    #[test]
    fn ingredient_without_unit_leaves_the_paren() {
        let program = parse("omelette(eggs 3)").unwrap();
        assert_eq!(
            program.statements,
            vec![Statement::Recipe {
                token: Token::new(Type::IDENT, "omelette"),
                ingredients: vec![ingredient("eggs", 3, "")],
            }]
        );
    }

    #[test]
    fn skips_stray_tokens_at_the_top_level() {
        let program = parse("% 12 kg tuesday(soup) )").unwrap();
        assert_eq!(program.to_string(), "tuesday(soup)\n");
    }

    fn assert_stray(input: &str, block: &str, found: Token) {
        match parse(input).unwrap_err() {
            MealplanError::StrayToken {
                block: actual_block,
                found: actual_found,
            } => {
                assert_eq!(actual_block, block);
                assert_eq!(actual_found, found);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn stray_tokens_inside_a_block_are_fatal() {
        assert_stray(
            "tuesday(eggs, toast)",
            "tuesday",
            Token::new(Type::ILLEGAL, ","),
        );
        assert_stray("pasta(rice 1.5kg)", "pasta", Token::new(Type::ILLEGAL, "."));
        assert_stray("pasta(rice 100 200g)", "pasta", Token::new(Type::INT, "200"));
        assert_stray("bread(flour 2 3g)", "bread", Token::new(Type::INT, "3"));
        assert_stray("monday((eggs))", "monday", Token::new(Type::LPAREN, "("));
    }

    #[test]
    fn stray_token_message_names_the_block() {
        let err = parse("monday(pasta) pasta(rice 1.5kg)").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected illegal character \".\" in pasta");
    }

    #[test]
    fn block_bodies_must_match_their_owner() {
        match parse("monday(eggs 3)").unwrap_err() {
            MealplanError::UnexpectedStatement {
                container,
                expected,
                found,
                literal,
            } => {
                assert_eq!(container, "monday");
                assert_eq!(expected, Kind::Meal);
                assert_eq!(found, Kind::Ingredient);
                assert_eq!(literal, "eggs");
            }
            other => panic!("unexpected error: {}", other),
        }

        // The first defect in source order wins over the stray unit after it.
        let err = parse("bread(flour abc g)").unwrap_err();
        assert!(matches!(
            &err,
            MealplanError::UnexpectedStatement {
                found: Kind::Meal,
                literal,
                ..
            } if literal == "flour"
        ));

        let err = parse("friday(pizza(cheese 1kg))").unwrap_err();
        assert!(matches!(
            err,
            MealplanError::UnexpectedStatement {
                found: Kind::Recipe,
                ..
            }
        ));
    }

    #[test]
    fn deep_nesting_is_fatal() {
        let depth = 100_000;
        let input = "a(".repeat(depth) + &")".repeat(depth);
        let err = parse(&input).unwrap_err();
        assert!(matches!(err, MealplanError::NestingTooDeep(name) if name == "a"));
    }

    #[test]
    fn empty_input_is_an_empty_program() {
        let program = parse(" \n\t").unwrap();
        assert!(program.statements.is_empty());
        assert_eq!(program.token_literal(), "");
    }

    #[test]
    fn weekday_without_paren_is_fatal() {
        let err = parse("monday eggs").unwrap_err();
        match err {
            MealplanError::UnexpectedToken { expected, found } => {
                assert_eq!(expected, Type::LPAREN);
                assert_eq!(found, Token::new(Type::IDENT, "eggs"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn unterminated_block_is_fatal() {
        let err = parse("wednesday(soup\ntoast").unwrap_err();
        match err {
            MealplanError::UnterminatedBlock(name) => assert_eq!(name, "wednesday"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn oversized_amount_names_the_ingredient() {
        let err = parse("cake(flour 99999999999999999999999 g)").unwrap_err();
        assert!(matches!(err, MealplanError::InvalidAmount { .. }));
        assert!(err.to_string().contains("ingredient flour"));
    }
}
