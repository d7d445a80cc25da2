use thiserror::Error;

/// Ways the scan of a listing can fail to line up with the parsed module.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("line {line}: function \"@{name}\" is not defined in the module")]
    UnknownFunction { name: String, line: usize },
    #[error("line {line}: function \"@{function}\" has no block named \"{name}\"")]
    UnknownBlock {
        name: String,
        function: String,
        line: usize,
    },
    #[error("line {line}: block label \"{name}\" appears before any function")]
    LabelOutsideFunction { name: String, line: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("the value is not part of the index")]
    UnknownValue,
    #[error("a user of the value is not an instruction")]
    UserNotAnInstruction,
    #[error("a user of the value is an instruction outside the index")]
    UnindexedUser,
    #[error("an operand of the instruction is outside the index")]
    UnindexedOperand,
    #[error("an incoming block of the phi is outside the index")]
    UnindexedPredecessor,
    #[error("the instruction is not a phi")]
    NotAPhi,
}
