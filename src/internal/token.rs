use std::fmt;
use std::str::FromStr;

pub const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

pub const UNITS: [&str; 7] = ["u", "g", "kg", "ml", "l", "cup", "tbsp"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub token_type: Type,
    pub literal: String,
}

impl Token {
    pub fn new<S: Into<String>>(token_type: Type, literal: S) -> Token {
        Token {
            token_type,
            literal: literal.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Type {
    EOF,
    ILLEGAL,
    INT,
    LPAREN,
    RPAREN,
    WEEKDAY,
    UNIT,
    IDENT,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Type::EOF => "end of input",
            Type::ILLEGAL => "illegal character",
            Type::INT => "integer",
            Type::LPAREN => "'('",
            Type::RPAREN => "')'",
            Type::WEEKDAY => "weekday",
            Type::UNIT => "unit",
            Type::IDENT => "identifier",
        };
        f.write_str(s)
    }
}

pub fn lookup_identifier(identifier: &str) -> Type {
    if WEEKDAYS.contains(&identifier) {
        Type::WEEKDAY
    } else if UNITS.contains(&identifier) {
        Type::UNIT
    } else {
        Type::IDENT
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn as_str(&self) -> &'static str {
        WEEKDAYS[*self as usize]
    }
}

impl FromStr for Weekday {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_prefers_weekdays_then_units() {
        assert_eq!(lookup_identifier("friday"), Type::WEEKDAY);
        assert_eq!(lookup_identifier("tbsp"), Type::UNIT);
        assert_eq!(lookup_identifier("l"), Type::UNIT);
        assert_eq!(lookup_identifier("pasta"), Type::IDENT);
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        assert_eq!(lookup_identifier("Monday"), Type::IDENT);
        assert_eq!(lookup_identifier("KG"), Type::IDENT);
        assert_eq!(lookup_identifier("mon"), Type::IDENT);
        assert_eq!(lookup_identifier("cups"), Type::IDENT);
    }

    #[test]
    fn weekday_names_match_table() {
        for name in WEEKDAYS {
            let day: Weekday = name.parse().unwrap();
            assert_eq!(day.as_str(), name);
        }
        assert!("Sunday".parse::<Weekday>().is_err());
    }
}
