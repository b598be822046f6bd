//! Gallows drawings keyed by error count. Stage 0 is the empty gallows shown
//! before the first miss; stage [`MAX_ERRORS`] is the completed figure shown
//! on a loss.

use crate::game::MAX_ERRORS;

pub const STAGES: [&str; MAX_ERRORS as usize + 1] = [
    r#" ______
 |    |
 |
_|_
"#,
    r#" ______
 |    |
 |    O
 |
_|_
"#,
    r#" ______
 |    |
 |    O
 |    |
 |
_|_
"#,
    r#" ______
 |    |
 |    O
 |   /|
 |
_|_
"#,
    r#" ______
 |    |
 |    O
 |   /|\
 |
_|_
"#,
    r#" ______
 |    |
 |    O
 |   /|\
 |   /
_|_
"#,
    r#" ______
 |    |
 |    O
 |   /|\
 |   / \
_|_
"#,
];

/// Total over any error count; values past the threshold clamp to the final
/// drawing.
pub fn stage(error_count: u8) -> &'static str {
    let index = (error_count as usize).min(MAX_ERRORS as usize);
    STAGES[index]
}
