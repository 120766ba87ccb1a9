use crate::error_handling::*;
use crate::variables::Variables;
use num_bigint::BigInt;
use std::fmt;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    addition,
    subtraction,
    multiplication,
    division,
    exponentiation,
}

impl Operator {
    pub fn precedence(&self) -> i32 {
        use Operator::*;
        match self {
            addition | subtraction => 1,
            multiplication | division => 2,
            exponentiation => 3,
        }
    }

    pub fn symbol(&self) -> char {
        use Operator::*;
        match self {
            addition => '+',
            subtraction => '-',
            multiplication => '*',
            division => '/',
            exponentiation => '^',
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = ExpressionFault;

    fn try_from(c: char) -> std::result::Result<Self, Self::Error> {
        use Operator::*;
        match c {
            '+' => Ok(addition),
            '-' => Ok(subtraction),
            '*' => Ok(multiplication),
            '/' => Ok(division),
            '^' => Ok(exponentiation),
            _ => Err(ExpressionFault::invalid_character(c)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    number(BigInt),
    operator(Operator),
    left_paren,
    right_paren,
    identifier(String),
}

pub trait Scanner {
    fn get_current(&self) -> Option<&Token>;
    fn advance(&mut self) -> Result<()>;

    fn is_valid(&self) -> bool {
        self.get_current().is_some()
    }
}

/// Replays tokens that were already scanned.
pub struct SimpleScanner {
    tokens: Vec<Token>,
    index: usize,
}

impl SimpleScanner {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self{tokens, index: 0}
    }
}

impl Scanner for SimpleScanner {
    fn get_current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn advance(&mut self) -> Result<()> {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        Ok(())
    }
}

/// Scans an expression with all whitespace removed. A run of `+`/`-`
/// characters comes out as a single operator: `-` when the run holds an odd
/// number of minuses, `+` otherwise.
pub struct StringScanner {
    string: String,
    token: Option<Token>,
    index: usize,
}

fn is_sign(character: char) -> bool {
    matches!(character, '+' | '-')
}

fn is_punctuation(character: char) -> bool {
    matches!(character, '(' | ')')
}

impl StringScanner {
    pub fn new(string: &str) -> Result<Self> {
        let mut source = Self {
            string: string.chars().filter(|c| !c.is_whitespace()).collect(),
            token: None,
            index: 0,
        };
        source.advance()?;
        Ok(source)
    }

    fn count<P: Fn(char) -> bool>(&self, predicate: P) -> usize {
        self.view().chars().take_while(|&c| predicate(c)).count()
    }

    fn view(&self) -> &str {
        &self.string[self.index..]
    }

    fn get_sign(&self) -> (Token, usize) {
        let count = self.count(is_sign);
        let minuses = self.view()[..count].matches('-').count();
        let operator = if minuses % 2 == 1 {
            Operator::subtraction
        } else {
            Operator::addition
        };
        (Token::operator(operator), count)
    }

    fn get_number(&self) -> Result<(Token, usize)> {
        let count = self.count(|c| c.is_ascii_digit());
        let digits = &self.view()[..count];
        let value = BigInt::parse_bytes(digits.as_bytes(), 10)
            .ok_or(ExpressionFault::invalid_character(digits.chars().next().unwrap_or('0')))?;
        Ok((Token::number(value), count))
    }

    fn get_word(&self) -> (Token, usize) {
        let count = self.count(|c| c.is_ascii_alphabetic());
        (Token::identifier(self.view()[..count].into()), count)
    }

    fn get_single(&self, character: char) -> Result<(Token, usize)> {
        let token = match character {
            '(' => Token::left_paren,
            ')' => Token::right_paren,
            _ => Token::operator(Operator::try_from(character)?),
        };
        Ok((token, 1))
    }

    fn get_token(&self) -> Result<Option<(Token, usize)>> {
        let Some(current) = self.view().chars().next() else {
            return Ok(None);
        };
        let scanned = if current.is_ascii_digit() {
            self.get_number()?
        } else if current.is_ascii_alphabetic() {
            self.get_word()
        } else if is_sign(current) {
            self.get_sign()
        } else if is_punctuation(current) || Operator::try_from(current).is_ok() {
            self.get_single(current)?
        } else {
            return Err(ExpressionFault::invalid_character(current).into());
        };
        Ok(Some(scanned))
    }
}

impl Scanner for StringScanner {
    fn get_current(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    fn advance(&mut self) -> Result<()> {
        self.token = match self.get_token()? {
            Some((token, width)) => {
                self.index += width;
                Some(token)
            },
            None => None,
        };
        Ok(())
    }
}

/// Splits `expression` into tokens, folding sign runs and replacing every
/// known variable with a snapshot of its current value. Unknown identifiers
/// are left for the parser to reject.
pub fn normalize(expression: &str, variables: &Variables) -> Result<Vec<Token>> {
    let mut source = StringScanner::new(expression)?;
    let mut tokens = Vec::new();
    while let Some(token) = source.get_current() {
        let token = match token {
            Token::identifier(name) => match variables.get(name) {
                Some(value) => Token::number(value.clone()),
                None => token.clone(),
            },
            _ => token.clone(),
        };
        tokens.push(token);
        source.advance()?;
    }
    trace!(?tokens, "normalized expression");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use Operator::*;

    fn num(n: i64) -> Token {
        Token::number(BigInt::from(n))
    }

    fn scan(expression: &str) -> Vec<Token> {
        normalize(expression, &Variables::new()).unwrap()
    }

    #[test]
    fn splits_atoms() {
        assert_eq!(
            scan("12*(ab^3)"),
            vec![
                num(12),
                Token::operator(multiplication),
                Token::left_paren,
                Token::identifier("ab".into()),
                Token::operator(exponentiation),
                num(3),
                Token::right_paren,
            ]
        );
    }

    #[test]
    fn strips_whitespace() {
        assert_eq!(scan("  1 +\t2 "), scan("1+2"));
    }

    #[test]
    fn folds_sign_runs() {
        assert_eq!(scan("5--3"), vec![num(5), Token::operator(addition), num(3)]);
        assert_eq!(scan("5---3"), vec![num(5), Token::operator(subtraction), num(3)]);
        assert_eq!(scan("5 +++ 3"), vec![num(5), Token::operator(addition), num(3)]);
        assert_eq!(scan("5 +-+ 3"), vec![num(5), Token::operator(subtraction), num(3)]);
        assert_eq!(scan("5 - - 3"), vec![num(5), Token::operator(addition), num(3)]);
    }

    #[test]
    fn substitutes_known_variables_as_whole_words() {
        let mut variables = Variables::new();
        variables.set("a", BigInt::from(2));
        variables.set("ab", BigInt::from(-7));
        let tokens = normalize("ab + a + abc", &variables).unwrap();
        assert_eq!(
            tokens,
            vec![
                num(-7),
                Token::operator(addition),
                num(2),
                Token::operator(addition),
                Token::identifier("abc".into()),
            ]
        );
    }

    #[test]
    fn keeps_big_numbers_exact() {
        let digits = "123456789012345678901234567890";
        assert_eq!(scan(digits), vec![Token::number(digits.parse().unwrap())]);
    }

    #[test]
    fn rejects_unknown_characters() {
        assert_eq!(
            normalize("2 % 3", &Variables::new()),
            Err(CalcError::invalid_expression(ExpressionFault::invalid_character('%')))
        );
    }

    #[test]
    fn simple_scanner_replays_tokens() {
        let mut source = SimpleScanner::new(vec![num(1), Token::right_paren]);
        assert_eq!(source.get_current(), Some(&num(1)));
        source.advance().unwrap();
        assert_eq!(source.get_current(), Some(&Token::right_paren));
        source.advance().unwrap();
        assert!(!source.is_valid());
    }
}
