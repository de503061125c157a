use std::collections::HashMap;
use std::fmt;

use crate::internal::Program;
use crate::internal::error::MealplanError;
use crate::internal::statement::{Kind, Statement};

/// Total amount per ingredient, scaled by how often each meal is eaten.
#[derive(Debug, Default, PartialEq)]
pub struct ShoppingList {
    pub totals: HashMap<String, u64>,
    pub units: HashMap<String, String>,
    /// Meals eaten on some day that no recipe defines.
    pub missing: Vec<String>,
}

impl ShoppingList {
    /// `(ingredient, amount, unit)` rows sorted by ingredient name.
    pub fn entries(&self) -> Vec<(&str, u64, &str)> {
        let mut entries: Vec<(&str, u64, &str)> = self
            .totals
            .iter()
            .map(|(name, amount)| {
                let unit = self.units.get(name).map(String::as_str).unwrap_or("");
                (name.as_str(), *amount, unit)
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl fmt::Display for ShoppingList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Shopping list:")?;
        for (name, amount, unit) in self.entries() {
            writeln!(f, "- {} {}{}", name, amount, unit)?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct Tally {
    meals: HashMap<String, u64>,
    recipes: HashMap<String, HashMap<String, u64>>,
    units: HashMap<String, String>,
}

pub struct Evaluator {
    program: Program,
    is_verbose: bool,
}

impl Evaluator {
    pub fn new(program: Program, verbose: bool) -> Evaluator {
        Evaluator {
            program,
            is_verbose: verbose,
        }
    }

    pub fn run(&self) -> Result<ShoppingList, MealplanError> {
        let mut tally = Tally::default();
        for statement in &self.program.statements {
            if self.is_verbose {
                eprintln!("resolve statement: {}", statement);
            }
            match statement {
                Statement::Weekday { meals, .. } => {
                    self.resolve_weekday(statement, meals, &mut tally)?
                }
                Statement::Recipe { ingredients, .. } => {
                    self.resolve_recipe(statement, ingredients, &mut tally)?
                }
                Statement::Meal { .. } | Statement::Ingredient { .. } => {}
            }
        }
        self.shopping_list(tally)
    }

    fn resolve_weekday(
        &self,
        day: &Statement,
        meals: &[Statement],
        tally: &mut Tally,
    ) -> Result<(), MealplanError> {
        for meal in meals {
            match meal {
                Statement::Meal { token } => {
                    *tally.meals.entry(token.literal.clone()).or_insert(0) += 1;
                }
                other => return Err(unexpected_statement(day, Kind::Meal, other)),
            }
        }
        Ok(())
    }

    fn resolve_recipe(
        &self,
        recipe: &Statement,
        ingredients: &[Statement],
        tally: &mut Tally,
    ) -> Result<(), MealplanError> {
        let table = tally.recipes.entry(recipe.name().to_string()).or_default();
        for ingredient in ingredients {
            match ingredient {
                Statement::Ingredient {
                    token,
                    amount,
                    unit,
                } => {
                    let total = table.entry(token.literal.clone()).or_insert(0);
                    *total = total
                        .checked_add(*amount)
                        .ok_or_else(|| MealplanError::AmountOverflow(token.literal.clone()))?;
                    // First unit seen for an ingredient sticks.
                    tally
                        .units
                        .entry(token.literal.clone())
                        .or_insert_with(|| unit.clone());
                }
                other => return Err(unexpected_statement(recipe, Kind::Ingredient, other)),
            }
        }
        Ok(())
    }

    fn shopping_list(&self, tally: Tally) -> Result<ShoppingList, MealplanError> {
        let mut totals: HashMap<String, u64> = HashMap::new();
        let mut missing = Vec::new();
        for (meal, count) in &tally.meals {
            let Some(recipe) = tally.recipes.get(meal) else {
                missing.push(meal.clone());
                continue;
            };
            if self.is_verbose {
                eprintln!("scale recipe: {} x{}", meal, count);
            }
            for (ingredient, amount) in recipe {
                let overflow = || MealplanError::AmountOverflow(ingredient.clone());
                let scaled = amount.checked_mul(*count).ok_or_else(overflow)?;
                let total = totals.entry(ingredient.clone()).or_insert(0);
                *total = total.checked_add(scaled).ok_or_else(overflow)?;
            }
        }
        missing.sort();

        let units = tally
            .units
            .into_iter()
            .filter(|(ingredient, _)| totals.contains_key(ingredient))
            .collect();
        Ok(ShoppingList {
            totals,
            units,
            missing,
        })
    }
}

fn unexpected_statement(container: &Statement, expected: Kind, found: &Statement) -> MealplanError {
    MealplanError::UnexpectedStatement {
        container: container.name().to_string(),
        expected,
        found: found.kind(),
        literal: found.token_literal().to_string(),
    }
}
