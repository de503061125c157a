extern crate clap;

use clap::{Arg, ArgAction, Command};

use internal::Program;
use internal::error::MealplanError;
use internal::evaluator::Evaluator;
use internal::lexer::Lexer;
use internal::parser::Parser;

mod internal;

fn main() {
    let cmd = Command::new("mealplan")
        .version("0.1.0")
        .about("Turn a weekly meal plan into a shopping list")
        .arg_required_else_help(true)
        .arg(
            Arg::new("file")
                .required(true)
                .value_name("FILE")
                .help("The meal plan describing the week and its recipes"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable verbose output"),
        )
        .arg(
            Arg::new("ast")
                .long("ast")
                .action(ArgAction::SetTrue)
                .help("Print the parsed meal plan instead of the shopping list"),
        );
    let matches = cmd.get_matches();
    let verbose = matches.get_flag("verbose");

    let path = matches
        .get_one::<String>("file")
        .map(String::as_str)
        .unwrap_or_default();
    let program = match load(path) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Failed to load meal plan: {}", e);
            std::process::exit(1);
        }
    };
    if verbose {
        eprintln!(
            "parsed {} statements starting at {:?}",
            program.statements.len(),
            program.token_literal()
        );
    }
    if matches.get_flag("ast") {
        print!("{}", program);
        return;
    }

    match Evaluator::new(program, verbose).run() {
        Ok(list) => {
            if verbose {
                for meal in &list.missing {
                    eprintln!("no recipe for meal: {}", meal);
                }
            }
            print!("{}", list);
        }
        Err(e) => {
            eprintln!("Failed to build shopping list: {}", e);
            std::process::exit(1);
        }
    }
}

fn load(path: &str) -> Result<Program, MealplanError> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| MealplanError::from(e).with_context(format!("Could not read {}", path)))?;
    Parser::new(Lexer::new(source)).parse()
}
