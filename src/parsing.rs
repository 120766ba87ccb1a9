use crate::error_handling::*;
use crate::scanning::*;
use crate::variables::Variables;
use num_bigint::BigInt;
use tracing::trace;

pub enum StackNode {
    operator(Operator),
    negation,
    paren,
}

/// One step of a postfix program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprNode {
    number(BigInt),
    operator(Operator),
    negation,
}

/// Shunting-yard state: postfix output plus the pending operator stack.
pub struct Yard {
    expression: Vec<ExprNode>,
    stack: Vec<StackNode>,
}

impl Yard {
    pub fn new() -> Self {
        Self{expression: Vec::new(), stack: Vec::new()}
    }

    fn add_number(&mut self, value: BigInt) {
        self.expression.push(ExprNode::number(value));
    }

    fn add_negation(&mut self) {
        self.stack.push(StackNode::negation);
    }

    // `>=` for every operator, `^` included, so `2^3^2` is `(2^3)^2`.
    fn pop_higher_operator(&mut self, precedence: i32) -> Option<ExprNode> {
        let higher = match self.stack.last()? {
            StackNode::paren => false,
            StackNode::negation => true,
            StackNode::operator(operator) => operator.precedence() >= precedence,
        };
        if !higher {
            return None;
        }
        match self.stack.pop()? {
            StackNode::operator(operator) => Some(ExprNode::operator(operator)),
            StackNode::negation => Some(ExprNode::negation),
            StackNode::paren => None,
        }
    }

    fn add_operator(&mut self, operator: Operator) {
        while let Some(node) = self.pop_higher_operator(operator.precedence()) {
            self.expression.push(node);
        }
        self.stack.push(StackNode::operator(operator));
    }

    fn add_left_paren(&mut self) {
        self.stack.push(StackNode::paren);
    }

    fn add_right_paren(&mut self) -> Result<()> {
        while let Some(stack_node) = self.stack.pop() {
            match stack_node {
                StackNode::paren => return Ok(()),
                StackNode::operator(operator) => self.expression.push(ExprNode::operator(operator)),
                StackNode::negation => self.expression.push(ExprNode::negation),
            }
        }
        Err(ExpressionFault::unmatched_right_paren.into())
    }

    pub fn finish(mut self) -> Result<Vec<ExprNode>> {
        while let Some(stack_node) = self.stack.pop() {
            match stack_node {
                StackNode::paren => return Err(ExpressionFault::unclosed_left_paren.into()),
                StackNode::operator(operator) => self.expression.push(ExprNode::operator(operator)),
                StackNode::negation => self.expression.push(ExprNode::negation),
            }
        }
        Ok(self.expression)
    }
}

impl Default for Yard {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles a token where an operand is expected. Returns whether an operand
/// was consumed.
pub fn handle_edge(yard: &mut Yard, token: &Token, variables: &Variables) -> Result<bool> {
    match token {
        Token::number(value) => {
            yard.add_number(value.clone());
            Ok(true)
        },
        Token::identifier(name) => {
            let value = variables
                .get(name)
                .ok_or_else(|| CalcError::unknown_variable(name.clone()))?;
            yard.add_number(value.clone());
            Ok(true)
        },
        Token::left_paren => {
            yard.add_left_paren();
            Ok(false)
        },
        // unary minus
        Token::operator(Operator::subtraction) => {
            yard.add_negation();
            Ok(false)
        },
        // unary plus
        Token::operator(Operator::addition) => Ok(false),
        Token::operator(operator) => Err(ExpressionFault::misplaced_operator(operator.symbol()).into()),
        Token::right_paren => Err(ExpressionFault::misplaced_operator(')').into()),
    }
}

/// Handles a token where an operator is expected. Returns whether an
/// operand is expected next.
pub fn handle_middle(yard: &mut Yard, token: &Token) -> Result<bool> {
    match token {
        Token::operator(operator) => {
            yard.add_operator(*operator);
            Ok(true)
        },
        Token::right_paren => {
            yard.add_right_paren()?;
            Ok(false)
        },
        _ => Err(ExpressionFault::misplaced_operand.into()),
    }
}

/// Converts infix tokens into a postfix program.
pub fn parse<S: Scanner>(mut source: S, variables: &Variables) -> Result<Vec<ExprNode>> {
    let mut is_edge = true;
    let mut yard = Yard::new();

    while let Some(token) = source.get_current() {
        if is_edge {
            if handle_edge(&mut yard, token, variables)? {
                is_edge = false;
            }
        } else if handle_middle(&mut yard, token)? {
            is_edge = true;
        }
        source.advance()?;
    }
    if is_edge {
        return Err(ExpressionFault::abrupt_end.into());
    }
    let expression = yard.finish()?;
    trace!(?expression, "postfix");
    Ok(expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use Operator::*;

    fn postfix(expression: &str) -> Result<Vec<ExprNode>> {
        parse(StringScanner::new(expression)?, &Variables::new())
    }

    fn num(n: i64) -> ExprNode {
        ExprNode::number(BigInt::from(n))
    }

    fn op(operator: Operator) -> ExprNode {
        ExprNode::operator(operator)
    }

    #[test]
    fn respects_precedence() {
        assert_eq!(
            postfix("2+3*4").unwrap(),
            vec![num(2), num(3), num(4), op(multiplication), op(addition)]
        );
    }

    #[test]
    fn parentheses_group() {
        assert_eq!(
            postfix("(2+3)*4").unwrap(),
            vec![num(2), num(3), op(addition), num(4), op(multiplication)]
        );
    }

    // Exponentiation pops on equal precedence, making it left-associative.
    #[test]
    fn exponentiation_is_left_associative() {
        assert_eq!(
            postfix("2^3^2").unwrap(),
            vec![num(2), num(3), op(exponentiation), num(2), op(exponentiation)]
        );
    }

    #[test]
    fn leading_minus_is_negation() {
        assert_eq!(
            postfix("-3+8").unwrap(),
            vec![num(3), ExprNode::negation, num(8), op(addition)]
        );
    }

    #[test]
    fn minus_after_operator_is_negation() {
        assert_eq!(
            postfix("2*-3").unwrap(),
            vec![num(2), num(3), ExprNode::negation, op(multiplication)]
        );
    }

    #[test]
    fn negation_of_a_group() {
        assert_eq!(
            postfix("-(2+3)*4").unwrap(),
            vec![num(2), num(3), op(addition), ExprNode::negation, num(4), op(multiplication)]
        );
    }

    #[test]
    fn unary_plus_is_dropped() {
        assert_eq!(postfix("2*+3").unwrap(), vec![num(2), num(3), op(multiplication)]);
    }

    #[test]
    fn resolves_identifiers() {
        let mut variables = Variables::new();
        variables.set("x", BigInt::from(10));
        let expression = parse(StringScanner::new("x-1").unwrap(), &variables).unwrap();
        assert_eq!(expression, vec![num(10), num(1), op(subtraction)]);
    }

    #[test]
    fn unknown_identifier() {
        assert_eq!(postfix("a+1"), Err(CalcError::unknown_variable("a".into())));
    }

    #[test]
    fn unbalanced_parentheses() {
        assert_eq!(
            postfix("(2+3"),
            Err(CalcError::invalid_expression(ExpressionFault::unclosed_left_paren))
        );
        assert_eq!(
            postfix("2+3)"),
            Err(CalcError::invalid_expression(ExpressionFault::unmatched_right_paren))
        );
    }

    #[test]
    fn trailing_operator() {
        assert_eq!(
            postfix("11-5+"),
            Err(CalcError::invalid_expression(ExpressionFault::abrupt_end))
        );
        assert_eq!(postfix(""), Err(CalcError::invalid_expression(ExpressionFault::abrupt_end)));
    }

    #[test]
    fn misplaced_tokens() {
        assert_eq!(
            postfix("*3"),
            Err(CalcError::invalid_expression(ExpressionFault::misplaced_operator('*')))
        );
        assert_eq!(
            postfix("2(3)"),
            Err(CalcError::invalid_expression(ExpressionFault::misplaced_operand))
        );
        assert_eq!(
            postfix("()"),
            Err(CalcError::invalid_expression(ExpressionFault::misplaced_operator(')')))
        );
    }
}
