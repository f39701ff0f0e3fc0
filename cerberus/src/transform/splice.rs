/// Replacement of the byte range `start..end` of the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Applies non-overlapping edits; an edit overlapping an earlier one is dropped.
pub(crate) fn apply_edits(source_text: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|edit| (edit.start, edit.end));
    let mut out = String::with_capacity(source_text.len());
    let mut cursor = 0usize;
    for edit in edits {
        if edit.start < cursor || edit.end > source_text.len() {
            log::warn!(
                "dropping overlapping edit at {}..{}",
                edit.start,
                edit.end
            );
            continue;
        }
        out.push_str(&source_text[cursor..edit.start]);
        out.push_str(&edit.text);
        cursor = edit.end;
    }
    out.push_str(&source_text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::{Edit, apply_edits};

    fn edit(start: usize, end: usize, text: &str) -> Edit {
        Edit {
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn applies_edits_in_source_order() {
        let out = apply_edits("aaa bbb ccc", vec![edit(8, 11, "Z"), edit(0, 3, "X")]);
        assert_eq!(out, "X bbb Z");
    }

    #[test]
    fn drops_overlapping_edit() {
        let out = apply_edits("abcdef", vec![edit(0, 4, "X"), edit(2, 5, "Y")]);
        assert_eq!(out, "Xef");
    }

    #[test]
    fn no_edits_returns_source() {
        assert_eq!(apply_edits("keep me", vec![]), "keep me");
    }
}
