//! Pattern parsing.
//!
//! Patterns are byte strings; every byte is one character.
//!
//! # Pattern syntax
//!
//! | Token     | Meaning                                           |
//! |-----------|---------------------------------------------------|
//! | `x`       | The literal byte `x`                              |
//! | `[a-z]`   | One byte in any `low-high` range                  |
//! | `[ace]`   | One byte from the first to the last listed (a..e) |
//! | `(…)`     | Grouping; the contents are concatenated in place  |
//! | `X\|Y`    | Alternation; `X` is everything before the `\|`    |
//! | `X*`      | Zero or more                                      |
//! | `X+`      | One or more                                       |
//! | `X?`      | Zero or one                                       |
//! | `X{n}`    | Exactly n                                         |
//! | `X{n,}`   | At least n                                        |
//! | `X{,m}`   | At most m                                         |
//! | `X{n,m}`  | Between n and m                                   |
//!
//! Groups do not nest, and a quantifier after a group is only accepted when
//! the group parsed to a single node (such as `(a|b)*`).

pub mod ast;
pub mod char_class;
pub mod parser;

pub use ast::{ClassRange, Node, render};
pub use parser::{MAX_REPEAT, PatternError, parse, parse_bytes};
