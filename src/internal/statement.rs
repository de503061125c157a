use std::fmt;

use crate::internal::token::{Token, Weekday};

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// A day and the meals eaten on it.
    Weekday {
        token: Token,
        day: Weekday,
        meals: Vec<Statement>,
    },
    /// A bare meal name; the key into the recipe table.
    Meal { token: Token },
    /// A named meal and the ingredients needed to cook it once.
    Recipe {
        token: Token,
        ingredients: Vec<Statement>,
    },
    Ingredient {
        token: Token,
        amount: u64,
        unit: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Weekday,
    Meal,
    Recipe,
    Ingredient,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Kind::Weekday => "WeekdayStatement",
            Kind::Meal => "MealStatement",
            Kind::Recipe => "RecipeStatement",
            Kind::Ingredient => "IngredientStatement",
        };
        f.write_str(s)
    }
}

impl Statement {
    pub fn kind(&self) -> Kind {
        match self {
            Statement::Weekday { .. } => Kind::Weekday,
            Statement::Meal { .. } => Kind::Meal,
            Statement::Recipe { .. } => Kind::Recipe,
            Statement::Ingredient { .. } => Kind::Ingredient,
        }
    }

    fn token(&self) -> &Token {
        match self {
            Statement::Weekday { token, .. }
            | Statement::Meal { token }
            | Statement::Recipe { token, .. }
            | Statement::Ingredient { token, .. } => token,
        }
    }

    pub fn token_literal(&self) -> &str {
        &self.token().literal
    }

    /// The day, meal, recipe or ingredient name this statement declares.
    pub fn name(&self) -> &str {
        match self {
            Statement::Weekday { day, .. } => day.as_str(),
            _ => self.token_literal(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Statement::Weekday { meals: body, .. } | Statement::Recipe { ingredients: body, .. } => {
                write!(f, "{}(", self.name())?;
                for (i, statement) in body.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", statement)?;
                }
                f.write_str(")")
            }
            Statement::Meal { token } => f.write_str(&token.literal),
            Statement::Ingredient {
                token,
                amount,
                unit,
            } => write!(f, "{} {}{}", token.literal, amount, unit),
        }
    }
}
