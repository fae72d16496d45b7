//! Minimal edit extraction from two full-text snapshots.
//!
//! Some hosts only report "the text is now X". [`minimal_edit`] turns such a
//! before/after pair into the single positional replace that the model's
//! mutation protocol understands.

/// A positional replace: delete `delete_len` characters at `pos`, then insert
/// `insert`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextEdit {
    pub pos: usize,
    pub delete_len: usize,
    pub insert: String,
}

impl TextEdit {
    /// True when applying the edit changes nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.delete_len == 0 && self.insert.is_empty()
    }

    /// Apply the edit to `old`, returning the new text.
    ///
    /// Panics if the edit does not fit `old`.
    #[must_use]
    pub fn apply(&self, old: &str) -> String {
        let mut chars = old.chars();
        let mut out: String = chars.by_ref().take(self.pos).collect();
        assert_eq!(out.chars().count(), self.pos, "edit position past end");
        for _ in 0..self.delete_len {
            assert!(chars.next().is_some(), "edit deletes past end");
        }
        out.push_str(&self.insert);
        out.extend(chars);
        out
    }
}

/// Compute the smallest `(pos, delete_len, insert)` turning `old` into `new`.
///
/// `pos` is the longest common prefix; the longest common suffix is then
/// measured over what remains, so prefix and suffix never overlap. Work is
/// linear in the shorter snapshot plus the changed span.
#[must_use]
pub fn minimal_edit(old: &str, new: &str) -> TextEdit {
    let mut prefix = 0usize;
    let mut prefix_bytes = (0usize, 0usize);
    for ((ob, oc), (nb, nc)) in old.char_indices().zip(new.char_indices()) {
        if oc != nc {
            break;
        }
        prefix += 1;
        prefix_bytes = (ob + oc.len_utf8(), nb + nc.len_utf8());
    }

    let old_rest = &old[prefix_bytes.0..];
    let new_rest = &new[prefix_bytes.1..];

    let mut suffix_bytes = 0usize;
    for (oc, nc) in old_rest.chars().rev().zip(new_rest.chars().rev()) {
        if oc != nc {
            break;
        }
        suffix_bytes += oc.len_utf8();
    }

    let deleted = &old_rest[..old_rest.len() - suffix_bytes];
    let inserted = &new_rest[..new_rest.len() - suffix_bytes];

    // Both spans are sub-slices of their snapshot; a mismatch here means the
    // prefix/suffix bookkeeping above is broken.
    assert!(
        prefix_bytes.0 + deleted.len() + suffix_bytes == old.len()
            && prefix_bytes.1 + inserted.len() + suffix_bytes == new.len(),
        "diff spans do not tile the snapshots"
    );

    TextEdit {
        pos: prefix,
        delete_len: deleted.chars().count(),
        insert: inserted.to_string(),
    }
}
