//! Structural validation of the token stream.
//!
//! The lexer reduces its input to nine kinds of [`Token`]. [`Grammar`] checks
//! each one against the current [`GrammarState`], keeps the nesting stack in
//! step and says which event, if any, the token produces.
//!
//! | state           | expects                                  |
//! |-----------------|------------------------------------------|
//! | `Enter`         | any value                                |
//! | `ObjectIn`      | first key or `}`                         |
//! | `ObjectKey`     | key after `,`                            |
//! | `ObjectAssign`  | `:`                                      |
//! | `ObjectPre`     | member value                             |
//! | `ObjectPost`    | `,` or `}`                               |
//! | `ArrayIn`       | first element or `]`                     |
//! | `ArrayPre`      | element after `,`                        |
//! | `ArrayPost`     | `,` or `]`                               |
//! | `Exit`          | nothing: the document is complete        |

use crate::{
    ParseError,
    literal::Literal,
    nesting::{Container, NestingStack},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GrammarState {
    Enter,
    ObjectIn,
    ObjectKey,
    ObjectAssign,
    ObjectPre,
    ObjectPost,
    ArrayIn,
    ArrayPre,
    ArrayPost,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    ObjectOpen,
    ObjectClose,
    ArrayOpen,
    ArrayClose,
    Colon,
    Comma,
    String,
    Number,
    /// A bare word; `None` when it matched no literal.
    Constant(Option<Literal>),
}

impl Token {
    pub(crate) const fn structural(octet: u8) -> Option<Self> {
        Some(match octet {
            b'{' => Self::ObjectOpen,
            b'}' => Self::ObjectClose,
            b'[' => Self::ArrayOpen,
            b']' => Self::ArrayClose,
            b':' => Self::Colon,
            b',' => Self::Comma,
            _ => return None,
        })
    }
}

/// The event a token produces once the grammar has accepted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Emit {
    None,
    ObjectOpen,
    ObjectClose,
    ArrayOpen,
    ArrayClose,
    Key,
    String,
    Number,
    Literal(Literal),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Grammar<const N: usize> {
    state: GrammarState,
    stack: NestingStack<N>,
    max_depth: u16,
}

impl<const N: usize> Grammar<N> {
    pub(crate) fn new(max_depth: u16) -> Self {
        Self {
            state: GrammarState::Enter,
            stack: NestingStack::new(),
            max_depth: max_depth.min(NestingStack::<N>::CAPACITY),
        }
    }

    pub(crate) const fn state(&self) -> GrammarState {
        self.state
    }

    pub(crate) const fn depth(&self) -> u16 {
        self.stack.depth()
    }

    /// Applies one token and returns the depth to report with its event.
    pub(crate) fn accept(&mut self, token: Token) -> Result<(u16, Emit), ParseError> {
        use GrammarState as S;

        if self.state == S::Exit {
            return Err(ParseError::TrailingData);
        }
        match token {
            Token::ObjectOpen => self.open(Container::Object),
            Token::ArrayOpen => self.open(Container::Array),
            Token::ObjectClose => self.close(Container::Object),
            Token::ArrayClose => self.close(Container::Array),
            Token::Colon => {
                self.state = match self.state {
                    S::ObjectAssign => S::ObjectPre,
                    _ => return Err(ParseError::BadGrammar),
                };
                Ok((self.depth(), Emit::None))
            }
            Token::Comma => {
                self.state = match self.state {
                    S::ArrayPost => S::ArrayPre,
                    S::ObjectPost => S::ObjectKey,
                    _ => return Err(ParseError::BadGrammar),
                };
                Ok((self.depth(), Emit::None))
            }
            Token::String if matches!(self.state, S::ObjectIn | S::ObjectKey) => {
                self.state = S::ObjectAssign;
                Ok((self.depth(), Emit::Key))
            }
            Token::String => self.value(Emit::String),
            Token::Number => self.value(Emit::Number),
            Token::Constant(Some(literal)) => self.value(Emit::Literal(literal)),
            Token::Constant(None) => Err(ParseError::BadConstant),
        }
    }

    fn open(&mut self, container: Container) -> Result<(u16, Emit), ParseError> {
        use GrammarState as S;

        if !matches!(
            self.state,
            S::Enter | S::ArrayIn | S::ArrayPre | S::ObjectPre
        ) {
            return Err(ParseError::BadGrammar);
        }
        let depth = self.depth();
        if depth >= self.max_depth {
            return Err(ParseError::TooDeep);
        }
        self.stack.push(container)?;
        let emit = match container {
            Container::Object => {
                self.state = S::ObjectIn;
                Emit::ObjectOpen
            }
            Container::Array => {
                self.state = S::ArrayIn;
                Emit::ArrayOpen
            }
        };
        Ok((depth, emit))
    }

    fn close(&mut self, container: Container) -> Result<(u16, Emit), ParseError> {
        use GrammarState as S;

        let (legal, emit) = match container {
            Container::Object => (
                matches!(self.state, S::ObjectIn | S::ObjectPost),
                Emit::ObjectClose,
            ),
            Container::Array => (
                matches!(self.state, S::ArrayIn | S::ArrayPost),
                Emit::ArrayClose,
            ),
        };
        if !legal {
            return Err(ParseError::BadGrammar);
        }
        if self.stack.pop() != Some(container) {
            return Err(ParseError::BadState);
        }
        self.state = match self.stack.top() {
            None => S::Exit,
            Some(Container::Object) => S::ObjectPost,
            Some(Container::Array) => S::ArrayPost,
        };
        Ok((self.depth(), emit))
    }

    fn value(&mut self, emit: Emit) -> Result<(u16, Emit), ParseError> {
        use GrammarState as S;

        self.state = match self.state {
            S::Enter => S::Exit,
            S::ArrayIn | S::ArrayPre => S::ArrayPost,
            S::ObjectPre => S::ObjectPost,
            _ => return Err(ParseError::BadGrammar),
        };
        Ok((self.depth(), emit))
    }
}
