//! Parser module — locating documentation blocks in source lines.

pub mod boundary;
pub mod declarations;

use crate::model::MatchKind;
use crate::syntax::Syntax;

/// Decide how the start marker of `identifier`'s blocks is matched.
pub fn match_kind(identifier: &str, syntax: &Syntax) -> MatchKind {
    if syntax.is_multi_function(identifier) {
        MatchKind::ByFunctionName
    } else {
        MatchKind::ByFilename
    }
}
